//! HTTP Routes
//!
//! API Endpoints:
//! - /                   GET     Web UI
//! - /voices/clone       POST    克隆音色（multipart）
//! - /voices             GET     列出所有音色
//! - /voices/:name       DELETE  删除音色
//! - /tts/generate       POST    合成语音（form / multipart）
//! - /health             GET     健康检查
//! - /api/status         GET     服务状态

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/voices", get(handlers::list_voices))
        .route("/voices/clone", post(handlers::clone_voice))
        .route("/voices/:name", delete(handlers::delete_voice))
        .route("/tts/generate", post(handlers::generate_speech))
        .route("/health", get(handlers::health))
        .route("/api/status", get(handlers::api_status))
}

