//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{AudioError, RegistryError, StorageError, TtsError};
use crate::domain::synthesis::SynthesisError;
use crate::domain::voice::VoiceError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} '{id}' not found")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("{0}")]
    ValidationError(String),

    /// 资源冲突（名称重复）
    #[error("{0}")]
    Conflict(String),

    /// 参考音频不可用
    #[error("Invalid audio: {0}")]
    InvalidAudio(String),

    /// 模型合成失败
    #[error("Generation failed: {0}")]
    GenerationError(String),

    /// 注册表错误
    #[error("Registry error: {0}")]
    RegistryError(String),

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<RegistryError> for ApplicationError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(name) => Self::not_found("Voice", name),
            RegistryError::DuplicateName(_) => Self::Conflict(err.to_string()),
            _ => Self::RegistryError(err.to_string()),
        }
    }
}

impl From<TtsError> for ApplicationError {
    fn from(err: TtsError) -> Self {
        match err {
            TtsError::InvalidAudio(msg) => Self::InvalidAudio(msg),
            TtsError::GenerationError(msg) => Self::GenerationError(msg),
            _ => Self::ExternalServiceError(err.to_string()),
        }
    }
}

impl From<AudioError> for ApplicationError {
    fn from(err: AudioError) -> Self {
        match err {
            AudioError::UnsupportedFormat(msg) => Self::ValidationError(msg),
            AudioError::DecodingError(msg) | AudioError::InvalidAudio(msg) => {
                Self::InvalidAudio(msg)
            }
            AudioError::EncodingError(msg) => Self::InternalError(msg),
        }
    }
}

impl From<StorageError> for ApplicationError {
    fn from(err: StorageError) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl From<VoiceError> for ApplicationError {
    fn from(err: VoiceError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<SynthesisError> for ApplicationError {
    fn from(err: SynthesisError) -> Self {
        match err {
            SynthesisError::EmptyText => Self::ValidationError(err.to_string()),
            SynthesisError::SampleRateMismatch { .. } => Self::GenerationError(err.to_string()),
        }
    }
}
