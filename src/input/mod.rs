pub mod request_reader;

pub use request_reader::{InputFormat, RequestBatch, RequestReader};

use thiserror::Error;

/// Errors that can occur while loading requests
#[derive(Error, Debug)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid request JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input file not found: {0}")]
    FileNotFound(String),

    #[error("No requests found in input")]
    Empty,
}
