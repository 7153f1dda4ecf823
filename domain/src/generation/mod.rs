//! Generation parameters sent with every prompt.

pub mod params;
