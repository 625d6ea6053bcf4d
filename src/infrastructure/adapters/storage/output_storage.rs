//! File Output Storage - 合成结果文件存储
//!
//! 实现 OutputStoragePort trait

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{OutputStoragePort, StorageError};

/// 文件系统输出存储
pub struct FileOutputStorage {
    /// 输出目录
    base_dir: PathBuf,
}

impl FileOutputStorage {
    /// 创建输出存储，确保目录存在
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        Ok(Self { base_dir })
    }
}

#[async_trait]
impl OutputStoragePort for FileOutputStorage {
    fn output_dir(&self) -> &Path {
        &self.base_dir
    }

    async fn save(&self, filename: &str, data: &[u8]) -> Result<PathBuf, StorageError> {
        // 只取最后一段，文件名不能逃出输出目录
        let name = Path::new(filename)
            .file_name()
            .ok_or_else(|| StorageError::IoError(format!("Invalid filename: {}", filename)))?;
        let path = self.base_dir.join(name);

        fs::write(&path, data)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        tracing::debug!(
            path = %path.display(),
            size = data.len(),
            "Saved output audio"
        );

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_new_creates_directory() {
        let dir = TempDir::new().unwrap();
        let outputs = dir.path().join("nested/outputs");
        let storage = FileOutputStorage::new(&outputs).await.unwrap();
        assert!(outputs.is_dir());
        assert_eq!(storage.output_dir(), outputs.as_path());
    }

    #[tokio::test]
    async fn test_save_overwrites_same_name() {
        let dir = TempDir::new().unwrap();
        let storage = FileOutputStorage::new(dir.path()).await.unwrap();

        let path = storage.save("hello.wav", b"first").await.unwrap();
        storage.save("hello.wav", b"second").await.unwrap();

        assert_eq!(path, dir.path().join("hello.wav"));
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_save_stays_inside_output_dir() {
        let dir = TempDir::new().unwrap();
        let outputs = dir.path().join("out");
        let storage = FileOutputStorage::new(&outputs).await.unwrap();

        let path = storage.save("../escape.wav", b"x").await.unwrap();
        assert_eq!(path, outputs.join("escape.wav"));
        assert!(!dir.path().join("escape.wav").exists());

        assert!(storage.save("..", b"x").await.is_err());
    }
}
