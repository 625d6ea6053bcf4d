//! Voice Registry Port - 音色注册表抽象

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::voice::{VoiceEmbedding, VoiceId, VoiceName, VoiceProfile};

/// 注册表错误
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Voice '{0}' not found")]
    NotFound(String),

    #[error("Voice '{0}' already exists")]
    DuplicateName(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// 待注册的新音色
#[derive(Debug, Clone)]
pub struct NewVoice {
    pub id: VoiceId,
    pub name: VoiceName,
    /// 预处理后的参考音频（WAV）
    pub reference_wav: Vec<u8>,
    pub embedding: VoiceEmbedding,
    pub reference_text: Option<String>,
    pub original_filename: String,
}

/// Voice Registry Port
///
/// 所有变更都是对整个注册表文档的读-改-写，实现必须串行化
#[async_trait]
pub trait VoiceRegistryPort: Send + Sync {
    /// 注册音色并持久化参考音频和参考编码，名称重复时失败
    async fn create(&self, voice: NewVoice) -> Result<VoiceProfile, RegistryError>;

    /// 按插入顺序列出所有音色
    async fn list(&self) -> Result<Vec<VoiceProfile>, RegistryError>;

    /// 按名称查找音色
    async fn get(&self, name: &str) -> Result<VoiceProfile, RegistryError>;

    /// 名称是否已注册
    async fn exists(&self, name: &str) -> Result<bool, RegistryError>;

    /// 删除音色及其文件，返回被删除的档案
    async fn delete(&self, name: &str) -> Result<VoiceProfile, RegistryError>;

    /// 读取音色的参考编码
    async fn load_embedding(&self, profile: &VoiceProfile)
        -> Result<VoiceEmbedding, RegistryError>;

    /// 音色数量
    async fn count(&self) -> Result<usize, RegistryError> {
        Ok(self.list().await?.len())
    }
}
