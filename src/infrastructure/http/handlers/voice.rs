//! Voice HTTP Handlers

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::{CloneVoice, DeleteVoice, ListVoices};
use crate::infrastructure::http::dto::{
    CloneVoiceResponse, StatusMessage, VoiceItem, VoiceListResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// Handlers
// ============================================================================

/// 克隆音色
///
/// multipart 字段: `file`（参考音频）、`voice_name`、`reference_text`（可选）
pub async fn clone_voice(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<CloneVoiceResponse>, ApiError> {
    let mut voice_name: Option<String> = None;
    let mut reference_text: Option<String> = None;
    let mut file_name: Option<String> = None;
    let mut audio_data: Vec<u8> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "voice_name" => {
                voice_name = Some(field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read voice_name: {}", e))
                })?);
            }
            "reference_text" => {
                reference_text = Some(field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read reference_text: {}", e))
                })?);
            }
            "file" => {
                file_name = Some(field.file_name().unwrap_or_default().to_string());
                audio_data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?
                    .to_vec();
            }
            _ => {}
        }
    }

    let command = CloneVoice {
        voice_name: voice_name.unwrap_or_default(),
        file_name,
        audio_data,
        reference_text,
    };

    let result = state.clone_voice_handler.handle(command).await?;

    Ok(Json(CloneVoiceResponse {
        status: "success".to_string(),
        message: format!("Voice '{}' cloned successfully", result.voice_name),
        voice_id: result.voice_id.to_string(),
        voice_name: result.voice_name,
    }))
}

/// 列出所有音色
pub async fn list_voices(
    State(state): State<Arc<AppState>>,
) -> Result<Json<VoiceListResponse>, ApiError> {
    let voices = state.list_voices_handler.handle(ListVoices).await?;

    Ok(Json(VoiceListResponse {
        voices: voices.into_iter().map(VoiceItem::from).collect(),
    }))
}

/// 删除音色
pub async fn delete_voice(
    State(state): State<Arc<AppState>>,
    Path(voice_name): Path<String>,
) -> Result<Json<StatusMessage>, ApiError> {
    state
        .delete_voice_handler
        .handle(DeleteVoice {
            voice_name: voice_name.clone(),
        })
        .await?;

    Ok(Json(StatusMessage::success(format!(
        "Voice '{}' deleted successfully",
        voice_name
    ))))
}
