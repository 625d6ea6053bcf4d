//! Voice Commands

/// 克隆音色命令
#[derive(Debug, Clone)]
pub struct CloneVoice {
    pub voice_name: String,
    /// 上传文件名（用于格式识别）
    pub file_name: Option<String>,
    pub audio_data: Vec<u8>,
    pub reference_text: Option<String>,
}

/// 删除音色命令
#[derive(Debug, Clone)]
pub struct DeleteVoice {
    pub voice_name: String,
}
