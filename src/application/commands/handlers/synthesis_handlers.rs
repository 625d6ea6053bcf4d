//! Synthesis Command Handlers

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::commands::GenerateSpeech;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AudioProcessorPort, OutputStoragePort, SynthesizeRequest, TtsEnginePort, VoiceRegistryPort,
};
use crate::domain::synthesis::{chunk_text, ChunkConfig, OutputFilename, SpeechText, Waveform};

/// 生成语音响应
#[derive(Debug, Clone)]
pub struct GenerateSpeechResponse {
    /// 输出文件完整路径
    pub output_path: PathBuf,
    pub filename: String,
    /// 本次请求生成的 WAV 内容，响应直接使用这份数据
    pub wav_data: Vec<u8>,
    pub duration_ms: u64,
}

/// GenerateSpeech Handler
///
/// 查找音色 → 分段合成 → 统一到输出采样率 → 拼接 → 写入输出目录。
/// 音色不存在时在任何推理调用之前失败。
pub struct GenerateSpeechHandler {
    voice_registry: Arc<dyn VoiceRegistryPort>,
    tts_engine: Arc<dyn TtsEnginePort>,
    audio_processor: Arc<dyn AudioProcessorPort>,
    output_storage: Arc<dyn OutputStoragePort>,
    chunk_config: ChunkConfig,
}

impl GenerateSpeechHandler {
    pub fn new(
        voice_registry: Arc<dyn VoiceRegistryPort>,
        tts_engine: Arc<dyn TtsEnginePort>,
        audio_processor: Arc<dyn AudioProcessorPort>,
        output_storage: Arc<dyn OutputStoragePort>,
        chunk_config: ChunkConfig,
    ) -> Self {
        Self {
            voice_registry,
            tts_engine,
            audio_processor,
            output_storage,
            chunk_config,
        }
    }

    pub async fn handle(
        &self,
        command: GenerateSpeech,
    ) -> Result<GenerateSpeechResponse, ApplicationError> {
        let text = SpeechText::new(command.text)?;

        let profile = self.voice_registry.get(&command.voice_name).await?;
        let embedding = self.voice_registry.load_embedding(&profile).await?;

        let chunks = chunk_text(text.as_str(), &self.chunk_config);

        tracing::debug!(
            voice_id = %profile.id(),
            text_chars = text.char_count(),
            chunks = chunks.len(),
            "Generating speech"
        );

        let mut segments = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            let waveform = self
                .tts_engine
                .synthesize(SynthesizeRequest {
                    text: chunk,
                    embedding: embedding.clone(),
                    reference_text: profile.reference_text().map(str::to_string),
                    voice_id: profile.id().to_string(),
                })
                .await?;
            segments.push(self.audio_processor.to_output_rate(waveform));
        }

        let waveform = Waveform::concat(segments)?;
        if waveform.is_empty() {
            return Err(ApplicationError::GenerationError(
                "Model returned no audio".to_string(),
            ));
        }

        let wav_data = self.audio_processor.encode_wav(&waveform)?;
        let filename = OutputFilename::from_request(command.output_filename.as_deref());
        let output_path = self.output_storage.save(filename.as_str(), &wav_data).await?;

        tracing::info!(
            voice_id = %profile.id(),
            name = %profile.name(),
            filename = %filename,
            duration_ms = waveform.duration_ms(),
            size = wav_data.len(),
            "Speech generated"
        );

        Ok(GenerateSpeechResponse {
            output_path,
            filename: filename.to_string(),
            wav_data,
            duration_ms: waveform.duration_ms(),
        })
    }
}
