//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Voice Context: 音色档案管理
//! - Synthesis Context: 语音合成的文本与波形

pub mod synthesis;
pub mod voice;
