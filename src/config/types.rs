//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::application::ports::DevicePlacement;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 推理网关配置
    #[serde(default)]
    pub inference: InferenceConfig,

    /// 音频配置
    #[serde(default)]
    pub audio: AudioConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 静态文件服务配置
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态文件服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// 是否启用静态文件服务
    #[serde(default = "default_static_enabled")]
    pub enabled: bool,

    /// 静态文件目录（同时存放 UI 的 index.html）
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,

    /// URL 路径前缀
    #[serde(default = "default_static_path")]
    pub path: String,
}

fn default_static_enabled() -> bool {
    true
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_static_path() -> String {
    "/static".to_string()
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: default_static_enabled(),
            dir: default_static_dir(),
            path: default_static_path(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 推理后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InferenceBackend {
    /// 外部模型服务
    #[default]
    Http,
    /// 离线假引擎
    Fake,
}

/// 推理网关配置
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    #[serde(default)]
    pub backend: InferenceBackend,

    /// 模型服务基础 URL
    #[serde(default = "default_inference_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_inference_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_backbone_repo")]
    pub backbone_repo: String,

    #[serde(default = "default_device")]
    pub backbone_device: String,

    #[serde(default = "default_codec_repo")]
    pub codec_repo: String,

    #[serde(default = "default_device")]
    pub codec_device: String,
}

fn default_inference_url() -> String {
    "http://localhost:9000".to_string()
}

fn default_inference_timeout() -> u64 {
    300
}

fn default_backbone_repo() -> String {
    "neuphonic/neutts-air".to_string()
}

fn default_codec_repo() -> String {
    "neuphonic/neucodec".to_string()
}

fn default_device() -> String {
    "cpu".to_string()
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            backend: InferenceBackend::default(),
            url: default_inference_url(),
            timeout_secs: default_inference_timeout(),
            backbone_repo: default_backbone_repo(),
            backbone_device: default_device(),
            codec_repo: default_codec_repo(),
            codec_device: default_device(),
        }
    }
}

impl InferenceConfig {
    pub fn devices(&self) -> DevicePlacement {
        DevicePlacement {
            backbone_device: self.backbone_device.clone(),
            codec_device: self.codec_device.clone(),
        }
    }
}

/// 音频配置
#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    /// 模型采样率（Hz）
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// 参考音频最短时长（秒）
    #[serde(default = "default_min_reference_secs")]
    pub min_reference_secs: f64,

    /// 参考音频最长时长（秒）
    #[serde(default = "default_max_reference_secs")]
    pub max_reference_secs: f64,

    /// 合成文本单段最大字符数
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,
}

fn default_sample_rate() -> u32 {
    24000
}

fn default_min_reference_secs() -> f64 {
    1.0
}

fn default_max_reference_secs() -> f64 {
    60.0
}

fn default_max_chunk_chars() -> usize {
    200
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            min_reference_secs: default_min_reference_secs(),
            max_reference_secs: default_max_reference_secs(),
            max_chunk_chars: default_max_chunk_chars(),
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 音色注册表和参考音频目录
    #[serde(default = "default_voices_dir")]
    pub voices_dir: PathBuf,

    /// 合成结果目录
    #[serde(default = "default_outputs_dir")]
    pub outputs_dir: PathBuf,

    /// 上传文件最大大小（字节），默认 50MB
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,
}

fn default_voices_dir() -> PathBuf {
    PathBuf::from("data/voices")
}

fn default_outputs_dir() -> PathBuf {
    PathBuf::from("data/outputs")
}

fn default_max_upload_size() -> u64 {
    50 * 1024 * 1024 // 50 MB
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            voices_dir: default_voices_dir(),
            outputs_dir: default_outputs_dir(),
            max_upload_size: default_max_upload_size(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
