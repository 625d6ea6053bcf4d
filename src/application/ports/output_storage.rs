//! Output Storage Port - 合成结果存储抽象

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(String),
}

/// Output Storage Port
///
/// 生成的音频以文件形式写入输出目录，同名文件会被覆盖；不做过期清理
#[async_trait]
pub trait OutputStoragePort: Send + Sync {
    /// 输出目录
    fn output_dir(&self) -> &Path;

    /// 写入音频文件，返回完整路径
    async fn save(&self, filename: &str, data: &[u8]) -> Result<PathBuf, StorageError>;
}
