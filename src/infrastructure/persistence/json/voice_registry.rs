//! JSON Voice Registry
//!
//! 注册表是 voices 目录下的单个 `profiles.json`（按插入顺序的数组），
//! 每个音色另有 `<id>.wav` 参考音频和 `<id>_codes.json` 参考编码。
//! 所有读-改-写都在同一把锁内完成，文档通过临时文件 + rename 原子替换。

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::application::ports::{NewVoice, RegistryError, VoiceRegistryPort};
use crate::domain::voice::{VoiceEmbedding, VoiceProfile};

/// 注册表文档文件名
pub const REGISTRY_FILE: &str = "profiles.json";

fn io_error(e: std::io::Error) -> RegistryError {
    RegistryError::IoError(e.to_string())
}

/// 基于 JSON 文档的音色注册表
pub struct JsonVoiceRegistry {
    voices_dir: PathBuf,
    document: PathBuf,
    lock: Mutex<()>,
}

impl JsonVoiceRegistry {
    /// 打开注册表，目录或文档不存在时创建
    pub async fn open(voices_dir: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let voices_dir = voices_dir.as_ref().to_path_buf();
        fs::create_dir_all(&voices_dir).await.map_err(io_error)?;

        let registry = Self {
            document: voices_dir.join(REGISTRY_FILE),
            voices_dir,
            lock: Mutex::new(()),
        };

        if fs::try_exists(&registry.document).await.map_err(io_error)? {
            // 启动时校验文档可读，损坏的注册表直接报错
            let profiles = registry.read_profiles().await?;
            tracing::info!(
                path = %registry.document.display(),
                voices = profiles.len(),
                "Voice registry loaded"
            );
        } else {
            registry.write_profiles(&[]).await?;
            tracing::info!(path = %registry.document.display(), "Voice registry created");
        }

        Ok(registry)
    }

    pub fn voices_dir(&self) -> &Path {
        &self.voices_dir
    }

    async fn read_profiles(&self) -> Result<Vec<VoiceProfile>, RegistryError> {
        let raw = match fs::read(&self.document).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(e)),
        };
        serde_json::from_slice(&raw).map_err(|e| RegistryError::SerializationError(e.to_string()))
    }

    async fn write_profiles(&self, profiles: &[VoiceProfile]) -> Result<(), RegistryError> {
        let raw = serde_json::to_vec_pretty(profiles)
            .map_err(|e| RegistryError::SerializationError(e.to_string()))?;

        let tmp = self.document.with_extension("json.tmp");
        fs::write(&tmp, raw).await.map_err(io_error)?;
        fs::rename(&tmp, &self.document).await.map_err(io_error)
    }

    async fn write_voice_files(
        &self,
        voice: &NewVoice,
        file: &Path,
        codes_file: &Path,
    ) -> Result<(), RegistryError> {
        let codes = serde_json::to_vec(&voice.embedding)
            .map_err(|e| RegistryError::SerializationError(e.to_string()))?;
        fs::write(file, &voice.reference_wav).await.map_err(io_error)?;
        fs::write(codes_file, codes).await.map_err(io_error)
    }

    async fn remove_file_quietly(path: &Path) {
        if let Err(e) = fs::remove_file(path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove voice file");
            }
        }
    }
}

#[async_trait]
impl VoiceRegistryPort for JsonVoiceRegistry {
    async fn create(&self, voice: NewVoice) -> Result<VoiceProfile, RegistryError> {
        let _guard = self.lock.lock().await;

        let mut profiles = self.read_profiles().await?;
        if profiles.iter().any(|p| p.name() == &voice.name) {
            return Err(RegistryError::DuplicateName(voice.name.to_string()));
        }

        let file = self.voices_dir.join(format!("{}.wav", voice.id));
        let codes_file = self.voices_dir.join(format!("{}_codes.json", voice.id));

        let persisted = async {
            self.write_voice_files(&voice, &file, &codes_file).await?;
            let profile = VoiceProfile::new(
                voice.id,
                voice.name.clone(),
                file.clone(),
                codes_file.clone(),
                voice.reference_text.clone(),
                voice.original_filename.clone(),
            );
            profiles.push(profile.clone());
            self.write_profiles(&profiles).await?;
            Ok::<_, RegistryError>(profile)
        }
        .await;

        match persisted {
            Ok(profile) => {
                tracing::info!(
                    voice_id = %profile.id(),
                    name = %profile.name(),
                    "Voice registered"
                );
                Ok(profile)
            }
            Err(e) => {
                Self::remove_file_quietly(&file).await;
                Self::remove_file_quietly(&codes_file).await;
                Err(e)
            }
        }
    }

    async fn list(&self) -> Result<Vec<VoiceProfile>, RegistryError> {
        let _guard = self.lock.lock().await;
        self.read_profiles().await
    }

    async fn get(&self, name: &str) -> Result<VoiceProfile, RegistryError> {
        let _guard = self.lock.lock().await;
        self.read_profiles()
            .await?
            .into_iter()
            .find(|p| p.name().as_str() == name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    async fn exists(&self, name: &str) -> Result<bool, RegistryError> {
        let _guard = self.lock.lock().await;
        Ok(self
            .read_profiles()
            .await?
            .iter()
            .any(|p| p.name().as_str() == name))
    }

    async fn delete(&self, name: &str) -> Result<VoiceProfile, RegistryError> {
        let _guard = self.lock.lock().await;

        let mut profiles = self.read_profiles().await?;
        let index = profiles
            .iter()
            .position(|p| p.name().as_str() == name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        let removed = profiles.remove(index);
        self.write_profiles(&profiles).await?;

        // 文档已更新，文件删除失败只记录
        Self::remove_file_quietly(removed.file()).await;
        Self::remove_file_quietly(removed.codes_file()).await;

        tracing::info!(
            voice_id = %removed.id(),
            name = %removed.name(),
            "Voice removed"
        );

        Ok(removed)
    }

    async fn load_embedding(
        &self,
        profile: &VoiceProfile,
    ) -> Result<VoiceEmbedding, RegistryError> {
        let raw = fs::read(profile.codes_file()).await.map_err(io_error)?;
        serde_json::from_slice(&raw).map_err(|e| RegistryError::SerializationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voice::{VoiceId, VoiceName};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn new_voice(name: &str) -> NewVoice {
        NewVoice {
            id: VoiceId::new(),
            name: VoiceName::new(name).unwrap(),
            reference_wav: b"RIFF....WAVE".to_vec(),
            embedding: VoiceEmbedding::new(vec![1, 2, 3]),
            reference_text: Some("hello there".to_string()),
            original_filename: format!("{}.mp3", name),
        }
    }

    #[tokio::test]
    async fn test_open_creates_empty_document() {
        let dir = TempDir::new().unwrap();
        let registry = JsonVoiceRegistry::open(dir.path().join("voices")).await.unwrap();

        let raw = std::fs::read_to_string(registry.voices_dir().join(REGISTRY_FILE)).unwrap();
        assert_eq!(raw.trim(), "[]");
        assert_eq!(registry.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_persists_files_and_profile() {
        let dir = TempDir::new().unwrap();
        let registry = JsonVoiceRegistry::open(dir.path()).await.unwrap();

        let voice = new_voice("alice");
        let id = voice.id;
        let profile = registry.create(voice).await.unwrap();

        assert_eq!(profile.id(), &id);
        assert_eq!(profile.file(), dir.path().join(format!("{}.wav", id)));
        assert!(profile.file().exists());
        assert!(profile.codes_file().exists());
        assert_eq!(profile.original_filename(), "alice.mp3");

        let embedding = registry.load_embedding(&profile).await.unwrap();
        assert_eq!(embedding.codes, vec![1, 2, 3]);
        assert_eq!(registry.get("alice").await.unwrap(), profile);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let dir = TempDir::new().unwrap();
        let registry = JsonVoiceRegistry::open(dir.path()).await.unwrap();

        registry.create(new_voice("alice")).await.unwrap();
        let duplicate = new_voice("alice");
        let dup_file = dir.path().join(format!("{}.wav", duplicate.id));
        let err = registry.create(duplicate).await.unwrap_err();

        assert!(matches!(err, RegistryError::DuplicateName(_)));
        assert!(!dup_file.exists());
        assert_eq!(registry.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let dir = TempDir::new().unwrap();
        let registry = JsonVoiceRegistry::open(dir.path()).await.unwrap();

        for name in ["zed", "alice", "mike"] {
            registry.create(new_voice(name)).await.unwrap();
        }
        let names: Vec<_> = registry
            .list()
            .await
            .unwrap()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["zed", "alice", "mike"]);
    }

    #[tokio::test]
    async fn test_delete_removes_files() {
        let dir = TempDir::new().unwrap();
        let registry = JsonVoiceRegistry::open(dir.path()).await.unwrap();

        let profile = registry.create(new_voice("alice")).await.unwrap();
        let removed = registry.delete("alice").await.unwrap();

        assert_eq!(removed.id(), profile.id());
        assert!(!profile.file().exists());
        assert!(!profile.codes_file().exists());
        assert!(!registry.exists("alice").await.unwrap());
        assert!(matches!(
            registry.delete("alice").await,
            Err(RegistryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_tolerates_missing_files() {
        let dir = TempDir::new().unwrap();
        let registry = JsonVoiceRegistry::open(dir.path()).await.unwrap();

        let profile = registry.create(new_voice("alice")).await.unwrap();
        std::fs::remove_file(profile.file()).unwrap();

        registry.delete("alice").await.unwrap();
        assert_eq!(registry.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reopen_sees_persisted_voices() {
        let dir = TempDir::new().unwrap();
        {
            let registry = JsonVoiceRegistry::open(dir.path()).await.unwrap();
            registry.create(new_voice("alice")).await.unwrap();
        }

        let registry = JsonVoiceRegistry::open(dir.path()).await.unwrap();
        let profile = registry.get("alice").await.unwrap();
        assert_eq!(profile.reference_text(), Some("hello there"));
    }

    #[tokio::test]
    async fn test_corrupt_document_fails_to_open() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(REGISTRY_FILE), "{ not json").unwrap();

        let err = JsonVoiceRegistry::open(dir.path()).await.err().unwrap();
        assert!(matches!(err, RegistryError::SerializationError(_)));
    }

    #[tokio::test]
    async fn test_concurrent_creates_are_all_recorded() {
        let dir = TempDir::new().unwrap();
        let registry = Arc::new(JsonVoiceRegistry::open(dir.path()).await.unwrap());

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let registry = registry.clone();
                tokio::spawn(async move { registry.create(new_voice(&format!("voice-{}", i))).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(registry.count().await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_concurrent_duplicates_admit_one() {
        let dir = TempDir::new().unwrap();
        let registry = Arc::new(JsonVoiceRegistry::open(dir.path()).await.unwrap());

        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let registry = registry.clone();
                tokio::spawn(async move { registry.create(new_voice("same")).await })
            })
            .collect();
        let mut ok = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                ok += 1;
            }
        }

        assert_eq!(ok, 1);
        assert_eq!(registry.count().await.unwrap(), 1);
    }
}
