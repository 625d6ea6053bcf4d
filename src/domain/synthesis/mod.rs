//! Synthesis Context - 语音合成限界上下文
//!
//! 职责:
//! - 合成文本校验与分段
//! - 输出文件名规范化
//! - 单声道 PCM 波形

mod chunker;
mod errors;
mod value_objects;
mod waveform;

pub use chunker::{chunk_text, ChunkConfig, DEFAULT_MAX_CHUNK_CHARS};
pub use errors::SynthesisError;
pub use value_objects::{OutputFilename, SpeechText};
pub use waveform::Waveform;
