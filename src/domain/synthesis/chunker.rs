//! 合成文本分段
//!
//! 推理模型对单次输入长度有限制，长文本按句子切分后逐段合成

/// 默认单段最大字符数
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 200;

/// 分段配置
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// 单段最大字符数
    pub max_chars: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHUNK_CHARS,
        }
    }
}

/// 句末标点（`!` 和 `?` 按 `.` 处理）
#[inline]
fn is_sentence_end(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// 对文本分段
///
/// 分段策略：
/// 1. 不超过 `max_chars` 的文本原样作为一段
/// 2. 按句末标点切句，去除空句
/// 3. 贪心合并相邻句子，每句以 `". "` 结尾，合并后不超过 `max_chars`
///
/// 单句超过上限时独立成段，不做截断
pub fn chunk_text(text: &str, config: &ChunkConfig) -> Vec<String> {
    if text.chars().count() <= config.max_chars {
        return vec![text.to_string()];
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for sentence in text.split(is_sentence_end) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }

        let sentence_chars = sentence.chars().count();
        if current_chars + sentence_chars + 2 <= config.max_chars {
            current.push_str(sentence);
            current.push_str(". ");
            current_chars += sentence_chars + 2;
        } else {
            if !current.is_empty() {
                chunks.push(current.trim().to_string());
            }
            current = format!("{}. ", sentence);
            current_chars = sentence_chars + 2;
        }
    }

    if !current.is_empty() {
        chunks.push(current.trim().to_string());
    }

    if chunks.is_empty() {
        vec![text.to_string()]
    } else {
        chunks
    }
}
