//! Synthesis Context - Value Objects

use std::path::Path;
use uuid::Uuid;

use super::SynthesisError;

/// 待合成文本
///
/// 不变量: 去除首尾空白后非空
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechText(String);

impl SpeechText {
    pub fn new(text: impl Into<String>) -> Result<Self, SynthesisError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SynthesisError::EmptyText);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

/// 输出文件名
///
/// 只保留最后一级路径，替换引号和控制字符，保证以 `.wav` 结尾；
/// 未提供或无效时生成 `<uuid>.wav`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFilename(String);

impl OutputFilename {
    pub fn from_request(requested: Option<&str>) -> Self {
        let base = requested
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| Path::new(s).file_name())
            .and_then(|s| s.to_str())
            .map(|s| {
                s.chars()
                    .map(|c| if c == '"' || c == '\\' || c.is_control() { '_' } else { c })
                    .collect::<String>()
            })
            .filter(|s| !s.is_empty() && s != "." && s != "..");

        match base {
            Some(name) if name.ends_with(".wav") => Self(name),
            Some(name) => Self(format!("{}.wav", name)),
            None => Self(format!("{}.wav", Uuid::new_v4())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OutputFilename {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speech_text_rejects_blank() {
        assert!(SpeechText::new("").is_err());
        assert!(SpeechText::new(" \n\t ").is_err());
        assert_eq!(SpeechText::new(" hi ").unwrap().as_str(), "hi");
    }

    #[test]
    fn test_output_filename_appends_extension() {
        let name = OutputFilename::from_request(Some("greeting"));
        assert_eq!(name.as_str(), "greeting.wav");

        let name = OutputFilename::from_request(Some("greeting.wav"));
        assert_eq!(name.as_str(), "greeting.wav");
    }

    #[test]
    fn test_output_filename_strips_directories() {
        let name = OutputFilename::from_request(Some("../../etc/passwd"));
        assert_eq!(name.as_str(), "passwd.wav");
    }

    #[test]
    fn test_output_filename_replaces_quotes() {
        let name = OutputFilename::from_request(Some("a\"b.wav"));
        assert_eq!(name.as_str(), "a_b.wav");
    }

    #[test]
    fn test_output_filename_defaults_to_uuid() {
        for requested in [None, Some(""), Some("   "), Some("..")] {
            let name = OutputFilename::from_request(requested);
            let stem = name.as_str().trim_end_matches(".wav");
            assert!(Uuid::parse_str(stem).is_ok(), "unexpected name {}", name);
        }
    }
}
