//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use super::VoiceError;

/// 音色名称最大字符数
const MAX_NAME_CHARS: usize = 100;

/// 音色唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceId(Uuid);

impl VoiceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for VoiceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for VoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 音色名称
///
/// 不变量:
/// - 去除首尾空白后非空
/// - 不超过 100 字符
/// - 不含 `/` 和控制字符（名称会出现在 URL 路径中）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceName(String);

impl VoiceName {
    pub fn new(name: impl Into<String>) -> Result<Self, VoiceError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(VoiceError::InvalidName(
                "voice name cannot be empty".to_string(),
            ));
        }
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(VoiceError::InvalidName(format!(
                "voice name cannot exceed {} characters",
                MAX_NAME_CHARS
            )));
        }
        if name.chars().any(|c| c == '/' || c.is_control()) {
            return Err(VoiceError::InvalidName(
                "voice name cannot contain '/' or control characters".to_string(),
            ));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 上传参考音频的格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioFormat {
    Wav,
    Mp3,
    Flac,
    Ogg,
    WebM,
}

impl AudioFormat {
    pub const SUPPORTED: &'static [&'static str] = &["wav", "mp3", "flac", "ogg", "webm"];

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "wav" => Some(Self::Wav),
            "mp3" => Some(Self::Mp3),
            "flac" => Some(Self::Flac),
            "ogg" => Some(Self::Ogg),
            "webm" => Some(Self::WebM),
            _ => None,
        }
    }

    /// 从上传文件名推断格式
    pub fn from_filename(filename: &str) -> Result<Self, VoiceError> {
        Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| {
                VoiceError::UnsupportedAudio(format!(
                    "only audio files are supported ({})",
                    Self::SUPPORTED.join(", ")
                ))
            })
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Flac => "flac",
            Self::Ogg => "ogg",
            Self::WebM => "webm",
        }
    }
}

/// 参考音频编码（模型的 reference codes）
///
/// 对本服务不透明，只负责持久化和回传给推理引擎
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceEmbedding {
    pub codes: Vec<u32>,
}

impl VoiceEmbedding {
    pub fn new(codes: Vec<u32>) -> Self {
        Self { codes }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
