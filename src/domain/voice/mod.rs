//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 音色名称与标识
//! - 参考音频格式识别
//! - 音色档案（VoiceProfile）

mod aggregate;
mod errors;
mod value_objects;

pub use aggregate::VoiceProfile;
pub use errors::VoiceError;
pub use value_objects::{AudioFormat, VoiceEmbedding, VoiceId, VoiceName};
