// Library exports for reuse by the CLI and GUI front ends
pub mod cli;
pub mod error;
pub mod image_processing;
pub mod json_output;
pub mod utils;

// Re-export commonly used types
pub use error::{ResizeError, ValidationError};
pub use image_processing::batch::{
    spawn_batch, BatchConfig, BatchHandle, BatchProcessor, BatchReport, FileOutcome, ProgressSink,
};
pub use image_processing::{BoundingBox, Padding, TargetSize};
pub use json_output::JsonMessage;
