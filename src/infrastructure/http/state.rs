//! Application State
//!
//! 包含端口和所有 Command/Query Handlers，启动时构建一次

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::{
    // Command handlers
    CloneVoiceHandler, DeleteVoiceHandler, GenerateSpeechHandler,
    // Query handlers
    ListVoicesHandler,
    // Ports
    AudioProcessorPort, DevicePlacement, ModelStatus, OutputStoragePort, TtsEnginePort,
    VoiceRegistryPort,
};
use crate::domain::synthesis::ChunkConfig;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub voice_registry: Arc<dyn VoiceRegistryPort>,
    pub tts_engine: Arc<dyn TtsEnginePort>,

    // ========== Model ==========
    /// 启动时的模型加载结果
    pub model_status: ModelStatus,
    pub devices: DevicePlacement,

    /// UI 所在的静态目录
    pub static_dir: Option<PathBuf>,

    // ========== Command Handlers ==========
    pub clone_voice_handler: CloneVoiceHandler,
    pub delete_voice_handler: DeleteVoiceHandler,
    pub generate_speech_handler: GenerateSpeechHandler,

    // ========== Query Handlers ==========
    pub list_voices_handler: ListVoicesHandler,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        voice_registry: Arc<dyn VoiceRegistryPort>,
        tts_engine: Arc<dyn TtsEnginePort>,
        audio_processor: Arc<dyn AudioProcessorPort>,
        output_storage: Arc<dyn OutputStoragePort>,
        model_status: ModelStatus,
        devices: DevicePlacement,
        chunk_config: ChunkConfig,
    ) -> Self {
        Self {
            voice_registry: voice_registry.clone(),
            tts_engine: tts_engine.clone(),
            model_status,
            devices,
            static_dir: None,

            clone_voice_handler: CloneVoiceHandler::new(
                voice_registry.clone(),
                tts_engine.clone(),
                audio_processor.clone(),
            ),
            delete_voice_handler: DeleteVoiceHandler::new(voice_registry.clone()),
            generate_speech_handler: GenerateSpeechHandler::new(
                voice_registry.clone(),
                tts_engine.clone(),
                audio_processor,
                output_storage,
                chunk_config,
            ),

            list_voices_handler: ListVoicesHandler::new(voice_registry),
        }
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }
}
