//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigBuilder, ConfigError as ConfigCrateError, Environment, File};
use config::builder::DefaultState;
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, InferenceBackend};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "VOXCLONE";

/// 未加前缀的设备变量，作为设备放置的默认值
const LEGACY_BACKBONE_DEVICE: &str = "BACKBONE_DEVICE";
const LEGACY_CODEC_DEVICE: &str = "CODEC_DEVICE";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `VOXCLONE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值（`BACKBONE_DEVICE` / `CODEC_DEVICE` 覆盖设备默认值）
///
/// # 环境变量示例
/// - `VOXCLONE_SERVER__PORT=8080`
/// - `VOXCLONE_INFERENCE__URL=http://model-server:9000`
/// - `VOXCLONE_INFERENCE__BACKEND=fake`
/// - `VOXCLONE_STORAGE__VOICES_DIR=/data/voices`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let backbone_device =
        std::env::var(LEGACY_BACKBONE_DEVICE).unwrap_or_else(|_| "cpu".to_string());
    let codec_device = std::env::var(LEGACY_CODEC_DEVICE).unwrap_or_else(|_| "cpu".to_string());

    let mut builder = with_defaults(Config::builder(), &backbone_device, &codec_device)?;

    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 例如: VOXCLONE_INFERENCE__URL=http://model-server:9000
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
    backbone_device: &str,
    codec_device: &str,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("server.static_files.enabled", true)?
        .set_default("server.static_files.dir", "static")?
        .set_default("server.static_files.path", "/static")?
        .set_default("inference.backend", "http")?
        .set_default("inference.url", "http://localhost:9000")?
        .set_default("inference.timeout_secs", 300)?
        .set_default("inference.backbone_repo", "neuphonic/neutts-air")?
        .set_default("inference.backbone_device", backbone_device)?
        .set_default("inference.codec_repo", "neuphonic/neucodec")?
        .set_default("inference.codec_device", codec_device)?
        .set_default("audio.sample_rate", 24000)?
        .set_default("audio.min_reference_secs", 1.0)?
        .set_default("audio.max_reference_secs", 60.0)?
        .set_default("audio.max_chunk_chars", 200)?
        .set_default("storage.voices_dir", "data/voices")?
        .set_default("storage.outputs_dir", "data/outputs")?
        .set_default("storage.max_upload_size", 50 * 1024 * 1024)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.inference.backend == InferenceBackend::Http && config.inference.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Inference URL cannot be empty".to_string(),
        ));
    }

    if config.audio.sample_rate == 0 {
        return Err(ConfigError::ValidationError(
            "Audio sample rate cannot be 0".to_string(),
        ));
    }

    if config.audio.min_reference_secs >= config.audio.max_reference_secs {
        return Err(ConfigError::ValidationError(format!(
            "min_reference_secs ({}) must be less than max_reference_secs ({})",
            config.audio.min_reference_secs, config.audio.max_reference_secs
        )));
    }

    if config.audio.max_chunk_chars == 0 {
        return Err(ConfigError::ValidationError(
            "max_chunk_chars cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Inference Backend: {:?}", config.inference.backend);
    if config.inference.backend == InferenceBackend::Http {
        tracing::info!("Inference URL: {}", config.inference.url);
        tracing::info!("Inference Timeout: {}s", config.inference.timeout_secs);
    }
    tracing::info!(
        "Backbone: {} ({})",
        config.inference.backbone_repo,
        config.inference.backbone_device
    );
    tracing::info!(
        "Codec: {} ({})",
        config.inference.codec_repo,
        config.inference.codec_device
    );
    tracing::info!("Voices Directory: {:?}", config.storage.voices_dir);
    tracing::info!("Outputs Directory: {:?}", config.storage.outputs_dir);
    if config.server.static_files.enabled {
        tracing::info!(
            "Static Files: {:?} -> {}",
            config.server.static_files.dir,
            config.server.static_files.path
        );
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
