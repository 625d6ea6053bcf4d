//! Voice Command Handlers

use std::sync::Arc;

use crate::application::commands::{CloneVoice, DeleteVoice};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AudioProcessorPort, EncodeReferenceRequest, NewVoice, TtsEnginePort, VoiceRegistryPort,
};
use crate::domain::voice::{AudioFormat, VoiceId, VoiceName};

// ============================================================================
// CloneVoice
// ============================================================================

/// 克隆音色响应
#[derive(Debug, Clone)]
pub struct CloneVoiceResponse {
    pub voice_id: VoiceId,
    pub voice_name: String,
}

/// CloneVoice Handler
///
/// 验证 → 预处理参考音频 → 编码 → 注册。
/// 编码成功之前不写入任何文件或记录。
pub struct CloneVoiceHandler {
    voice_registry: Arc<dyn VoiceRegistryPort>,
    tts_engine: Arc<dyn TtsEnginePort>,
    audio_processor: Arc<dyn AudioProcessorPort>,
}

impl CloneVoiceHandler {
    pub fn new(
        voice_registry: Arc<dyn VoiceRegistryPort>,
        tts_engine: Arc<dyn TtsEnginePort>,
        audio_processor: Arc<dyn AudioProcessorPort>,
    ) -> Self {
        Self {
            voice_registry,
            tts_engine,
            audio_processor,
        }
    }

    pub async fn handle(&self, command: CloneVoice) -> Result<CloneVoiceResponse, ApplicationError> {
        let name = VoiceName::new(command.voice_name)?;

        let original_filename = command
            .file_name
            .filter(|f| !f.trim().is_empty())
            .ok_or_else(|| ApplicationError::validation("Audio file is required"))?;
        let format = AudioFormat::from_filename(&original_filename)?;

        if command.audio_data.is_empty() {
            return Err(ApplicationError::validation("Uploaded audio file is empty"));
        }

        // 推理代价高，先做一次名称预检；最终以 create 内的检查为准
        if self.voice_registry.exists(name.as_str()).await? {
            return Err(ApplicationError::Conflict(format!(
                "Voice '{}' already exists",
                name
            )));
        }

        let processor = self.audio_processor.clone();
        let audio_data = command.audio_data;
        let prepared = tokio::task::spawn_blocking(move || {
            processor.prepare_reference(&audio_data, format)
        })
        .await
        .map_err(|e| ApplicationError::internal(format!("Audio task failed: {}", e)))??;

        let voice_id = VoiceId::new();

        tracing::debug!(
            voice_id = %voice_id,
            name = %name,
            source_sample_rate = prepared.source_sample_rate,
            source_channels = prepared.source_channels,
            duration_ms = prepared.duration_ms,
            "Reference audio prepared"
        );

        let embedding = self
            .tts_engine
            .encode_reference(EncodeReferenceRequest {
                audio_wav: prepared.wav_data.clone(),
                reference_text: command.reference_text.clone(),
                voice_id: voice_id.to_string(),
            })
            .await?;

        let profile = self
            .voice_registry
            .create(NewVoice {
                id: voice_id,
                name,
                reference_wav: prepared.wav_data,
                embedding,
                reference_text: command.reference_text,
                original_filename,
            })
            .await?;

        tracing::info!(
            voice_id = %profile.id(),
            name = %profile.name(),
            has_reference_text = profile.has_reference_text(),
            "Voice cloned"
        );

        Ok(CloneVoiceResponse {
            voice_id: *profile.id(),
            voice_name: profile.name().to_string(),
        })
    }
}

// ============================================================================
// DeleteVoice
// ============================================================================

/// DeleteVoice Handler
pub struct DeleteVoiceHandler {
    voice_registry: Arc<dyn VoiceRegistryPort>,
}

impl DeleteVoiceHandler {
    pub fn new(voice_registry: Arc<dyn VoiceRegistryPort>) -> Self {
        Self { voice_registry }
    }

    pub async fn handle(&self, command: DeleteVoice) -> Result<(), ApplicationError> {
        let profile = self.voice_registry.delete(&command.voice_name).await?;

        tracing::info!(
            voice_id = %profile.id(),
            name = %profile.name(),
            "Voice deleted"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::handlers::test_support::{reference_wav, TestContext};

    fn clone_command(name: &str) -> CloneVoice {
        CloneVoice {
            voice_name: name.to_string(),
            file_name: Some("sample.wav".to_string()),
            audio_data: reference_wav(2.0),
            reference_text: Some("the quick brown fox".to_string()),
        }
    }

    #[tokio::test]
    async fn test_clone_voice_registers_profile() {
        let ctx = TestContext::new().await;
        let result = ctx.clone_handler().handle(clone_command("alice")).await.unwrap();

        assert_eq!(result.voice_name, "alice");
        let profile = ctx.registry.get("alice").await.unwrap();
        assert_eq!(profile.id(), &result.voice_id);
        assert!(profile.file().exists());
        assert!(profile.codes_file().exists());
        assert_eq!(ctx.engine.encode_calls(), 1);
    }

    #[tokio::test]
    async fn test_clone_duplicate_name_conflicts_without_inference() {
        let ctx = TestContext::new().await;
        let handler = ctx.clone_handler();
        handler.handle(clone_command("alice")).await.unwrap();
        let original = ctx.registry.get("alice").await.unwrap();

        let err = handler.handle(clone_command("alice")).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Conflict(_)));
        assert_eq!(ctx.engine.encode_calls(), 1);
        assert_eq!(ctx.registry.get("alice").await.unwrap(), original);
    }

    #[tokio::test]
    async fn test_clone_requires_file() {
        let ctx = TestContext::new().await;
        let mut command = clone_command("alice");
        command.file_name = None;

        let err = ctx.clone_handler().handle(command).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_clone_rejects_unsupported_extension() {
        let ctx = TestContext::new().await;
        let mut command = clone_command("alice");
        command.file_name = Some("notes.txt".to_string());

        let err = ctx.clone_handler().handle(command).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
        assert_eq!(ctx.registry.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clone_rejects_undecodable_audio() {
        let ctx = TestContext::new().await;
        let mut command = clone_command("alice");
        command.audio_data = b"definitely not audio".to_vec();

        let err = ctx.clone_handler().handle(command).await.unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidAudio(_)));
        assert_eq!(ctx.registry.count().await.unwrap(), 0);
        assert_eq!(ctx.engine.encode_calls(), 0);
    }

    #[tokio::test]
    async fn test_delete_voice() {
        let ctx = TestContext::new().await;
        ctx.clone_handler().handle(clone_command("alice")).await.unwrap();
        let profile = ctx.registry.get("alice").await.unwrap();

        let handler = DeleteVoiceHandler::new(ctx.registry.clone());
        handler
            .handle(DeleteVoice { voice_name: "alice".to_string() })
            .await
            .unwrap();

        assert!(!ctx.registry.exists("alice").await.unwrap());
        assert!(!profile.file().exists());

        let err = handler
            .handle(DeleteVoice { voice_name: "alice".to_string() })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }
}
