//! Terminal output
//!
//! [`console::ConsoleSurface`] renders one question's progress and the
//! streamed answer on stdout.

pub mod console;
