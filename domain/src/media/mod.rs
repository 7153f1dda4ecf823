//! Background video clips.

pub mod video;
