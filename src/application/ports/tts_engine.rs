//! TTS Engine Port - 推理网关抽象
//!
//! 定义声音克隆模型的抽象接口，具体实现在 infrastructure/adapters 层。
//! 引擎在启动时创建并加载一次，之后只读共享，不随请求修改。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::synthesis::Waveform;
use crate::domain::voice::VoiceEmbedding;

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Model not loaded: {0}")]
    ModelNotLoaded(String),

    /// 模型拒绝参考音频（采样率、声道、时长等）
    #[error("Invalid reference audio: {0}")]
    InvalidAudio(String),

    /// 模型合成失败
    #[error("Generation failed: {0}")]
    GenerationError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 模型设备放置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevicePlacement {
    pub backbone_device: String,
    pub codec_device: String,
}

impl Default for DevicePlacement {
    fn default() -> Self {
        Self {
            backbone_device: "cpu".to_string(),
            codec_device: "cpu".to_string(),
        }
    }
}

/// 已加载模型信息
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub backbone: String,
    pub codec: String,
    pub sample_rate: u32,
}

/// 启动时模型加载结果
#[derive(Debug, Clone)]
pub enum ModelStatus {
    Ready(ModelInfo),
    Failed(String),
}

impl ModelStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, ModelStatus::Ready(_))
    }
}

/// 参考音频编码请求
#[derive(Debug, Clone)]
pub struct EncodeReferenceRequest {
    /// 预处理后的参考音频（WAV）
    pub audio_wav: Vec<u8>,
    /// 参考音频的文字稿
    pub reference_text: Option<String>,
    /// 音色 ID（用于日志和追踪）
    pub voice_id: String,
}

/// 合成请求
#[derive(Debug, Clone)]
pub struct SynthesizeRequest {
    /// 要合成的文本
    pub text: String,
    /// 参考编码
    pub embedding: VoiceEmbedding,
    /// 参考音频的文字稿
    pub reference_text: Option<String>,
    /// 音色 ID（用于日志和追踪）
    pub voice_id: String,
}

/// TTS Engine Port
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 加载模型（进程启动时调用一次）
    async fn load(&self) -> Result<ModelInfo, TtsError>;

    /// 对参考音频做条件编码
    async fn encode_reference(
        &self,
        request: EncodeReferenceRequest,
    ) -> Result<VoiceEmbedding, TtsError>;

    /// 以参考编码为条件合成一段文本
    async fn synthesize(&self, request: SynthesizeRequest) -> Result<Waveform, TtsError>;

    /// 检查引擎是否可用
    async fn health_check(&self) -> bool {
        true
    }
}
