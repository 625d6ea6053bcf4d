//! Synthesis Commands

/// 生成语音命令
#[derive(Debug, Clone)]
pub struct GenerateSpeech {
    pub text: String,
    pub voice_name: String,
    pub output_filename: Option<String>,
}
