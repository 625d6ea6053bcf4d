//! Synthesis Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Text cannot be empty")]
    EmptyText,

    #[error("Sample rate mismatch: expected {expected}Hz, got {actual}Hz")]
    SampleRateMismatch { expected: u32, actual: u32 },
}
