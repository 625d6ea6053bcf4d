//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::VoiceSummary;

// ============================================================================
// 通用响应
// ============================================================================

/// 操作结果
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusMessage {
    pub status: String,
    pub message: String,
}

impl StatusMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Voice DTOs
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CloneVoiceResponse {
    pub status: String,
    pub message: String,
    pub voice_id: String,
    pub voice_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VoiceItem {
    pub name: String,
    pub id: String,
    pub original_file: String,
    pub has_reference_text: bool,
}

impl From<VoiceSummary> for VoiceItem {
    fn from(v: VoiceSummary) -> Self {
        Self {
            name: v.name,
            id: v.id,
            original_file: v.original_file,
            has_reference_text: v.has_reference_text,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VoiceListResponse {
    pub voices: Vec<VoiceItem>,
}

// ============================================================================
// Health DTOs
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" | "degraded"
    pub status: String,
    pub tts_initialized: bool,
    pub voices_count: usize,
    pub backbone_device: String,
    pub codec_device: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceStatusResponse {
    pub status: String,
    pub service: String,
    pub voices: usize,
}
