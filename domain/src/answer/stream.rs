//! Streaming events for generation gateway communication.
//!
//! [`StreamEvent`] represents individual events in a streaming response,
//! enabling display of model output as it becomes available.

/// An event in a streaming generation response.
///
/// Used to bridge infrastructure-level transport (a single HTTP response, or
/// SSE chunks when the API streams) to the application layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A text chunk from the model.
    Delta(String),
    /// The complete response text (signals stream end).
    Completed(String),
    /// An error that occurred while generating, already worded for display.
    Error(String),
}
