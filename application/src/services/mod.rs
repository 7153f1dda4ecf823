//! Application services shared by the use cases.
//!
//! - [`relay::ResponseRelay`] — replays a completion fragment by fragment
//! - [`narrator::Narrator`] — hands fragments to the speech engine off-thread

pub mod narrator;
pub mod relay;
