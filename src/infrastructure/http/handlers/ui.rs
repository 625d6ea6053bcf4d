//! UI Handler

use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::infrastructure::http::state::AppState;

const FALLBACK_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>voxclone</title></head>
<body>
<h1>voxclone</h1>
<p>The web UI is not installed. The API is available:</p>
<ul>
<li><code>POST /voices/clone</code></li>
<li><code>GET /voices</code></li>
<li><code>DELETE /voices/{name}</code></li>
<li><code>POST /tts/generate</code></li>
<li><code>GET /health</code></li>
</ul>
</body>
</html>
"#;

/// 首页：静态目录下的 index.html，不存在时返回内置页面
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    if let Some(dir) = &state.static_dir {
        match tokio::fs::read_to_string(dir.join("index.html")).await {
            Ok(page) => return Html(page),
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "index.html unavailable, using fallback page");
            }
        }
    }
    Html(FALLBACK_PAGE.to_string())
}
