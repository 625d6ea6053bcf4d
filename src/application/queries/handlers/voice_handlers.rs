//! Voice Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::VoiceRegistryPort;
use crate::application::queries::ListVoices;
use crate::domain::voice::VoiceProfile;

// ============================================================================
// Response DTOs
// ============================================================================

/// 音色摘要
#[derive(Debug, Clone)]
pub struct VoiceSummary {
    pub name: String,
    pub id: String,
    /// 上传时的原始文件名
    pub original_file: String,
    pub has_reference_text: bool,
}

impl From<VoiceProfile> for VoiceSummary {
    fn from(profile: VoiceProfile) -> Self {
        Self {
            name: profile.name().to_string(),
            id: profile.id().to_string(),
            original_file: profile.original_filename().to_string(),
            has_reference_text: profile.has_reference_text(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// ListVoices Handler
pub struct ListVoicesHandler {
    voice_registry: Arc<dyn VoiceRegistryPort>,
}

impl ListVoicesHandler {
    pub fn new(voice_registry: Arc<dyn VoiceRegistryPort>) -> Self {
        Self { voice_registry }
    }

    pub async fn handle(&self, _query: ListVoices) -> Result<Vec<VoiceSummary>, ApplicationError> {
        let voices = self.voice_registry.list().await?;
        Ok(voices.into_iter().map(VoiceSummary::from).collect())
    }
}
