//! Document builder implementations.

pub mod html;
mod noop;
pub mod recording;

pub use html::{HtmlDocumentBuilder, HtmlOptions};
pub use noop::NoOpDocumentBuilder;
pub use recording::{Event, RecordingDocumentBuilder};
