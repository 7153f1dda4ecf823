//! Conversation transcript logging.
//!
//! [`JsonlConversationLogger`] appends one JSON line per event and
//! implements the [`ConversationLogger`](nico_application::ConversationLogger)
//! port.

mod jsonl_logger;

pub use jsonl_logger::JsonlConversationLogger;
