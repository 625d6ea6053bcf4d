//! Command Handlers

mod synthesis_handlers;
mod voice_handlers;

pub use synthesis_handlers::{GenerateSpeechHandler, GenerateSpeechResponse};
pub use voice_handlers::{CloneVoiceHandler, CloneVoiceResponse, DeleteVoiceHandler};

#[cfg(test)]
pub(crate) mod test_support;
