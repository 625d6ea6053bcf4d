//! Voice Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{VoiceId, VoiceName};

/// 音色档案（聚合根）
///
/// 不变量:
/// - 名称在注册表内唯一
/// - 创建后不可修改，只能整体删除
/// - 删除时连同参考音频和参考编码文件一起移除
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceProfile {
    name: VoiceName,
    id: VoiceId,
    /// 预处理后的参考音频（24kHz 单声道 WAV）
    file: PathBuf,
    /// 参考编码文件
    codes_file: PathBuf,
    #[serde(default)]
    reference_text: Option<String>,
    original_filename: String,
    created_at: DateTime<Utc>,
}

impl VoiceProfile {
    /// 创建新档案
    ///
    /// 空白的参考文本视为未提供
    pub fn new(
        id: VoiceId,
        name: VoiceName,
        file: PathBuf,
        codes_file: PathBuf,
        reference_text: Option<String>,
        original_filename: impl Into<String>,
    ) -> Self {
        let reference_text = reference_text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Self {
            name,
            id,
            file,
            codes_file,
            reference_text,
            original_filename: original_filename.into(),
            created_at: Utc::now(),
        }
    }

    // Getters
    pub fn id(&self) -> &VoiceId {
        &self.id
    }

    pub fn name(&self) -> &VoiceName {
        &self.name
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn codes_file(&self) -> &Path {
        &self.codes_file
    }

    pub fn reference_text(&self) -> Option<&str> {
        self.reference_text.as_deref()
    }

    pub fn has_reference_text(&self) -> bool {
        self.reference_text.is_some()
    }

    pub fn original_filename(&self) -> &str {
        &self.original_filename
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(reference_text: Option<&str>) -> VoiceProfile {
        VoiceProfile::new(
            VoiceId::new(),
            VoiceName::new("alice").unwrap(),
            PathBuf::from("/tmp/alice.wav"),
            PathBuf::from("/tmp/alice_codes.json"),
            reference_text.map(str::to_string),
            "alice.wav",
        )
    }

    #[test]
    fn test_profile_creation() {
        let p = profile(Some("the quick brown fox"));
        assert_eq!(p.name().as_str(), "alice");
        assert_eq!(p.reference_text(), Some("the quick brown fox"));
        assert!(p.has_reference_text());
        assert_eq!(p.original_filename(), "alice.wav");
    }

    #[test]
    fn test_blank_reference_text_is_none() {
        assert!(!profile(Some("   ")).has_reference_text());
        assert!(!profile(None).has_reference_text());
    }

    #[test]
    fn test_profile_serde_roundtrip_keeps_fields() {
        let p = profile(None);
        let json = serde_json::to_string(&p).unwrap();
        let back: VoiceProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
