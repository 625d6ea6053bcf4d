//! 命令处理器测试夹具：临时目录中的真实注册表、输出存储和离线引擎

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use crate::application::commands::handlers::{CloneVoiceHandler, GenerateSpeechHandler};
use crate::domain::synthesis::{ChunkConfig, Waveform};
use crate::infrastructure::adapters::{
    encode_wav, AudioProcessingConfig, FakeTtsClient, FakeTtsClientConfig, FileOutputStorage,
    SymphoniaAudioProcessor,
};
use crate::infrastructure::persistence::json::JsonVoiceRegistry;

pub(crate) struct TestContext {
    _dir: TempDir,
    outputs_dir: PathBuf,
    pub registry: Arc<JsonVoiceRegistry>,
    pub engine: Arc<FakeTtsClient>,
    pub processor: Arc<SymphoniaAudioProcessor>,
    pub storage: Arc<FileOutputStorage>,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_engine(FakeTtsClientConfig::default()).await
    }

    pub async fn with_engine(engine_config: FakeTtsClientConfig) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let outputs_dir = dir.path().join("outputs");
        let registry = Arc::new(
            JsonVoiceRegistry::open(dir.path().join("voices"))
                .await
                .unwrap(),
        );
        let storage = Arc::new(FileOutputStorage::new(&outputs_dir).await.unwrap());

        Self {
            _dir: dir,
            outputs_dir,
            registry,
            engine: Arc::new(FakeTtsClient::new(engine_config)),
            processor: Arc::new(SymphoniaAudioProcessor::new(AudioProcessingConfig::default())),
            storage,
        }
    }

    pub fn outputs_dir(&self) -> &Path {
        &self.outputs_dir
    }

    pub fn clone_handler(&self) -> CloneVoiceHandler {
        CloneVoiceHandler::new(
            self.registry.clone(),
            self.engine.clone(),
            self.processor.clone(),
        )
    }

    pub fn generate_handler(&self) -> GenerateSpeechHandler {
        GenerateSpeechHandler::new(
            self.registry.clone(),
            self.engine.clone(),
            self.processor.clone(),
            self.storage.clone(),
            ChunkConfig::default(),
        )
    }
}

/// 生成 16kHz 单声道正弦波 WAV
pub(crate) fn reference_wav(seconds: f32) -> Vec<u8> {
    let sample_rate = 16000;
    let count = (sample_rate as f32 * seconds) as usize;
    let samples = (0..count)
        .map(|i| 0.5 * (2.0 * std::f32::consts::PI * 220.0 * i as f32 / sample_rate as f32).sin())
        .collect();
    encode_wav(&Waveform::new(samples, sample_rate))
}
