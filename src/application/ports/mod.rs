//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_processor;
mod output_storage;
mod tts_engine;
mod voice_registry;

pub use audio_processor::{AudioError, AudioProcessorPort, PreparedReference};
pub use output_storage::{OutputStoragePort, StorageError};
pub use tts_engine::{
    DevicePlacement, EncodeReferenceRequest, ModelInfo, ModelStatus, SynthesizeRequest,
    TtsEnginePort, TtsError,
};
pub use voice_registry::{NewVoice, RegistryError, VoiceRegistryPort};
