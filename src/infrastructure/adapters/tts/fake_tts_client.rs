//! Fake TTS Client - 离线推理引擎
//!
//! 不调用任何模型：参考编码取自每 20ms 帧的能量，合成结果为正弦波。
//! 输出是确定性的，用于本地开发和测试。

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{
    EncodeReferenceRequest, ModelInfo, SynthesizeRequest, TtsEnginePort, TtsError,
};
use crate::domain::synthesis::Waveform;
use crate::domain::voice::VoiceEmbedding;
use crate::infrastructure::adapters::audio::decode_wav;

/// 每个参考编码对应的帧长（毫秒）
const FRAME_MS: u32 = 20;

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 输出采样率
    pub sample_rate: u32,
    /// 每个字符对应的合成时长（毫秒）
    pub ms_per_char: u64,
    /// 模拟推理延迟（毫秒）
    pub latency_ms: u64,
}

impl Default for FakeTtsClientConfig {
    fn default() -> Self {
        Self {
            sample_rate: 24000,
            ms_per_char: 60,
            latency_ms: 0,
        }
    }
}

/// Fake TTS Client
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
    encode_calls: AtomicUsize,
    synthesize_calls: AtomicUsize,
}

impl FakeTtsClient {
    pub fn new(config: FakeTtsClientConfig) -> Self {
        tracing::info!(
            sample_rate = config.sample_rate,
            latency_ms = config.latency_ms,
            "FakeTtsClient initialized"
        );
        Self {
            config,
            encode_calls: AtomicUsize::new(0),
            synthesize_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeTtsClientConfig::default())
    }

    /// 已执行的参考编码次数
    pub fn encode_calls(&self) -> usize {
        self.encode_calls.load(Ordering::SeqCst)
    }

    /// 已执行的合成次数
    pub fn synthesize_calls(&self) -> usize {
        self.synthesize_calls.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;
        }
    }
}

/// 每帧 RMS 能量量化到 0..=65535
fn energy_codes(waveform: &Waveform) -> Vec<u32> {
    let frame_len = ((waveform.sample_rate * FRAME_MS) / 1000).max(1) as usize;
    waveform
        .samples
        .chunks(frame_len)
        .map(|frame| {
            let rms = (frame.iter().map(|s| s * s).sum::<f32>() / frame.len() as f32).sqrt();
            (rms.clamp(0.0, 1.0) * 65535.0) as u32
        })
        .collect()
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn load(&self) -> Result<ModelInfo, TtsError> {
        Ok(ModelInfo {
            backbone: "fake".to_string(),
            codec: "fake".to_string(),
            sample_rate: self.config.sample_rate,
        })
    }

    async fn encode_reference(
        &self,
        request: EncodeReferenceRequest,
    ) -> Result<VoiceEmbedding, TtsError> {
        self.encode_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        let waveform = decode_wav(&request.audio_wav)
            .map_err(|e| TtsError::InvalidAudio(e.to_string()))?;
        let codes = energy_codes(&waveform);
        if codes.is_empty() {
            return Err(TtsError::InvalidAudio(
                "reference audio contains no frames".to_string(),
            ));
        }

        tracing::debug!(
            voice_id = %request.voice_id,
            codes = codes.len(),
            "FakeTtsClient: reference encoded"
        );

        Ok(VoiceEmbedding::new(codes))
    }

    async fn synthesize(&self, request: SynthesizeRequest) -> Result<Waveform, TtsError> {
        self.synthesize_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        let text = request.text.trim();
        if text.is_empty() {
            return Err(TtsError::GenerationError("text is empty".to_string()));
        }
        if request.embedding.is_empty() {
            return Err(TtsError::GenerationError(
                "voice embedding is empty".to_string(),
            ));
        }

        // 音高由参考编码决定，同一音色输出稳定
        let mean_code = request.embedding.codes.iter().map(|&c| c as u64).sum::<u64>()
            / request.embedding.len() as u64;
        let frequency = 110.0 + (mean_code % 330) as f32;

        let duration_ms = (text.chars().count() as u64 * self.config.ms_per_char).max(250);
        let sample_rate = self.config.sample_rate;
        let count = (sample_rate as u64 * duration_ms / 1000) as usize;
        let samples = (0..count)
            .map(|i| {
                0.3 * (2.0 * std::f32::consts::PI * frequency * i as f32 / sample_rate as f32).sin()
            })
            .collect();

        tracing::debug!(
            voice_id = %request.voice_id,
            text_len = text.len(),
            duration_ms,
            "FakeTtsClient: returning synthetic tone"
        );

        Ok(Waveform::new(samples, sample_rate))
    }
}
