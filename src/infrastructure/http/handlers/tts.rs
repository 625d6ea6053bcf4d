//! TTS HTTP Handlers

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;

use crate::application::GenerateSpeech;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::FormFields;
use crate::infrastructure::http::state::AppState;

/// 合成语音并以附件形式返回 WAV
///
/// 表单字段: `text`、`voice_name`、`output_filename`（可选）
pub async fn generate_speech(
    State(state): State<Arc<AppState>>,
    mut form: FormFields,
) -> Result<Response, ApiError> {
    let voice_name = form
        .take("voice_name")
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::BadRequest("voice_name is required".to_string()))?;

    let command = GenerateSpeech {
        text: form.take("text").unwrap_or_default(),
        voice_name,
        output_filename: form.take("output_filename"),
    };

    let result = state.generate_speech_handler.handle(command).await?;

    // 输出目录中的同名文件可能被并发请求覆盖，响应只使用本次生成的数据
    let size = result.wav_data.len();
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/wav")
        .header(header::CONTENT_LENGTH, size)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", result.filename),
        )
        .body(Body::from(result.wav_data))
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}
