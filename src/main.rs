//! Voxclone - 声音克隆 TTS 服务
//!
//! - Domain: voice/, synthesis/
//! - Application: commands, queries, ports
//! - Infrastructure: http, persistence, adapters

use std::sync::Arc;

use voxclone::application::{ModelStatus, TtsEnginePort};
use voxclone::config::{load_config, print_config, AppConfig, InferenceBackend};
use voxclone::domain::synthesis::ChunkConfig;
use voxclone::infrastructure::adapters::{
    AudioProcessingConfig, FakeTtsClient, FakeTtsClientConfig, FileOutputStorage, HttpTtsClient,
    HttpTtsClientConfig, SymphoniaAudioProcessor,
};
use voxclone::infrastructure::http::{AppState, HttpServer, ServerConfig, StaticFilesConfig};
use voxclone::infrastructure::persistence::JsonVoiceRegistry;

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},voxclone={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_engine(config: &AppConfig) -> anyhow::Result<Arc<dyn TtsEnginePort>> {
    let engine: Arc<dyn TtsEnginePort> = match config.inference.backend {
        InferenceBackend::Http => {
            let tts_config = HttpTtsClientConfig {
                base_url: config.inference.url.clone(),
                timeout_secs: config.inference.timeout_secs,
                backbone_repo: config.inference.backbone_repo.clone(),
                codec_repo: config.inference.codec_repo.clone(),
                devices: config.inference.devices(),
            };
            Arc::new(HttpTtsClient::new(tts_config)?)
        }
        InferenceBackend::Fake => Arc::new(FakeTtsClient::new(FakeTtsClientConfig {
            sample_rate: config.audio.sample_rate,
            ..Default::default()
        })),
    };
    Ok(engine)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Voxclone - 声音克隆 TTS 服务");
    print_config(&config);

    let registry = Arc::new(JsonVoiceRegistry::open(&config.storage.voices_dir).await?);
    let output_storage = Arc::new(FileOutputStorage::new(&config.storage.outputs_dir).await?);
    let audio_processor = Arc::new(SymphoniaAudioProcessor::new(AudioProcessingConfig {
        target_sample_rate: config.audio.sample_rate,
        min_reference_secs: config.audio.min_reference_secs,
        max_reference_secs: config.audio.max_reference_secs,
    }));

    // 模型只在启动时加载一次，失败时服务以 degraded 状态继续运行
    let tts_engine = build_engine(&config)?;
    let model_status = match tts_engine.load().await {
        Ok(info) => {
            tracing::info!(
                backbone = %info.backbone,
                codec = %info.codec,
                sample_rate = info.sample_rate,
                "Model loaded"
            );
            ModelStatus::Ready(info)
        }
        Err(e) => {
            tracing::error!(error = %e, "Model failed to load, serving in degraded mode");
            ModelStatus::Failed(e.to_string())
        }
    };

    let mut state = AppState::new(
        registry,
        tts_engine,
        audio_processor,
        output_storage,
        model_status,
        config.inference.devices(),
        ChunkConfig {
            max_chars: config.audio.max_chunk_chars,
        },
    );

    let mut server_config = ServerConfig::new(&config.server.host, config.server.port);
    server_config.max_body_size = config.storage.max_upload_size as usize;
    if config.server.static_files.enabled {
        state = state.with_static_dir(&config.server.static_files.dir);
        server_config.static_files = Some(StaticFilesConfig {
            dir: config.server.static_files.dir.clone(),
            path: config.server.static_files.path.clone(),
        });
    }

    let server = HttpServer::new(server_config, state);

    server.run_with_shutdown(shutdown_signal()).await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
