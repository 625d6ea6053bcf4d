//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（VoiceRegistry、TtsEngine、AudioProcessor、OutputStorage）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Voice commands
    CloneVoice,
    DeleteVoice,
    // Synthesis commands
    GenerateSpeech,
    // Handlers
    handlers::{
        CloneVoiceHandler, CloneVoiceResponse, DeleteVoiceHandler, GenerateSpeechHandler,
        GenerateSpeechResponse,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Audio processor
    AudioError,
    AudioProcessorPort,
    PreparedReference,
    // Output storage
    OutputStoragePort,
    StorageError,
    // TTS engine
    DevicePlacement,
    EncodeReferenceRequest,
    ModelInfo,
    ModelStatus,
    SynthesizeRequest,
    TtsEnginePort,
    TtsError,
    // Voice registry
    NewVoice,
    RegistryError,
    VoiceRegistryPort,
};

pub use queries::{
    // Voice queries
    ListVoices,
    // Handlers
    handlers::{ListVoicesHandler, VoiceSummary},
};
