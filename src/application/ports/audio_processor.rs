//! Audio Processor Port - 音频处理抽象
//!
//! 参考音频预处理（解码、混音、重采样、归一化）和 WAV 编码。
//! 实现均为 CPU 密集的同步操作，调用方负责放到阻塞线程池执行。

use thiserror::Error;

use crate::domain::synthesis::Waveform;
use crate::domain::voice::AudioFormat;

/// 音频处理错误
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),

    /// 音频可解码但不满足参考音频要求
    #[error("Invalid audio: {0}")]
    InvalidAudio(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}

/// 预处理后的参考音频
#[derive(Debug, Clone)]
pub struct PreparedReference {
    /// 目标采样率的单声道 16-bit WAV
    pub wav_data: Vec<u8>,
    pub sample_rate: u32,
    pub duration_ms: u64,
    /// 原始采样率
    pub source_sample_rate: u32,
    /// 原始声道数
    pub source_channels: u8,
}

/// Audio Processor Port
pub trait AudioProcessorPort: Send + Sync {
    /// 将上传的参考音频转换为模型期望的格式
    fn prepare_reference(
        &self,
        data: &[u8],
        format: AudioFormat,
    ) -> Result<PreparedReference, AudioError>;

    /// 将模型输出重采样到服务输出采样率
    fn to_output_rate(&self, waveform: Waveform) -> Waveform;

    /// 将波形编码为 16-bit PCM WAV
    fn encode_wav(&self, waveform: &Waveform) -> Result<Vec<u8>, AudioError>;
}
