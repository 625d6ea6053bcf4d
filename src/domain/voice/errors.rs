//! Voice Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("Invalid voice name: {0}")]
    InvalidName(String),

    #[error("Unsupported audio file: {0}")]
    UnsupportedAudio(String),
}
