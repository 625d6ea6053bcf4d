//! Voxclone - 声音克隆 TTS 服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: 音色档案（名称、参考音频、参考编码）
//! - Synthesis Context: 合成文本、分段、波形
//!
//! 应用层 (application/):
//! - Ports: 端口定义（VoiceRegistry, TtsEngine, AudioProcessor, OutputStorage）
//! - Commands: 克隆音色、删除音色、生成语音
//! - Queries: 音色列表
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + 静态页面
//! - Persistence: JSON 文档音色注册表
//! - Adapters: 推理引擎客户端、音频处理、输出文件存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use self::config::{load_config, AppConfig};
