//! Persistence Layer - 数据持久化
//!
//! JSON 文件注册表实现

pub mod json;

pub use self::json::JsonVoiceRegistry;
