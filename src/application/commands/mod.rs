//! Commands - CQRS 命令定义

pub mod handlers;
mod synthesis_commands;
mod voice_commands;

pub use synthesis_commands::GenerateSpeech;
pub use voice_commands::{CloneVoice, DeleteVoice};
