//! Background video adapters.

pub mod directory;

pub use directory::DirectoryVideoLibrary;
