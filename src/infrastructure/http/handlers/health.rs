//! Health Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::infrastructure::http::dto::{HealthResponse, ServiceStatusResponse};
use crate::infrastructure::http::state::AppState;

async fn voices_count(state: &AppState) -> usize {
    match state.voice_registry.count().await {
        Ok(count) => count,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to count voices");
            0
        }
    }
}

/// 健康检查，模型未加载或推理服务不可达时为 degraded
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let tts_initialized = state.model_status.is_ready();
    let engine_reachable = tts_initialized && state.tts_engine.health_check().await;

    Json(HealthResponse {
        status: (if engine_reachable { "healthy" } else { "degraded" }).to_string(),
        tts_initialized,
        voices_count: voices_count(&state).await,
        backbone_device: state.devices.backbone_device.clone(),
        codec_device: state.devices.codec_device.clone(),
    })
}

/// 服务状态
pub async fn api_status(State(state): State<Arc<AppState>>) -> Json<ServiceStatusResponse> {
    Json(ServiceStatusResponse {
        status: "running".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        voices: voices_count(&state).await,
    })
}
