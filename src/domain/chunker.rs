//! 文本分块器
//!
//! 按句末标点切分文本，再贪心合并为受限长度的朗读块

/// 默认最大块字符数
/// 单块过长会导致语音引擎长时间无反馈，过短则停顿生硬
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 200;

/// 合并句子时使用的连接符
const SENTENCE_JOINER: &str = ". ";

/// 分块配置
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// 最大块字符数（按字符计，不是字节）
    pub max_chunk_chars: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
        }
    }
}

/// 检查是否为句末标点
#[inline]
fn is_sentence_terminal(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// 按句末标点切分文本（连续标点视为一个分隔）
///
/// 返回去除首尾空白后的非空句子，不含标点本身
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences: Vec<String> = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if is_sentence_terminal(ch) {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        } else {
            current.push(ch);
        }
    }

    // 剩余内容（没有句末标点收尾的文本）
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }

    sentences
}

/// 将文本切分为朗读块
///
/// 切分策略：
/// 1. 按句末标点（`.` `!` `?`，连续多个算一个）切分为句子
/// 2. 贪心合并：句子之间以 `". "` 连接，合并后超过 `max_chunk_chars`
///    且缓冲区已有内容时，先输出缓冲区再另起新块
/// 3. 单句超长时整句保留为一个超限块，绝不从句中截断
pub fn split_into_chunks(text: &str, config: &ChunkConfig) -> Vec<String> {
    let sentences = split_sentences(text);
    let mut chunks: Vec<String> = Vec::new();
    let mut buffer = String::new();
    let mut buffer_chars = 0usize;

    for sentence in sentences {
        let sentence_chars = sentence.chars().count();

        if buffer_chars > 0 {
            let joined_chars = buffer_chars + SENTENCE_JOINER.len() + sentence_chars;
            if joined_chars > config.max_chunk_chars {
                chunks.push(std::mem::take(&mut buffer));
                buffer_chars = 0;
            } else {
                buffer.push_str(SENTENCE_JOINER);
                buffer.push_str(&sentence);
                buffer_chars = joined_chars;
                continue;
            }
        }

        buffer_chars = sentence_chars;
        buffer.push_str(&sentence);
    }

    if !buffer.is_empty() {
        chunks.push(buffer);
    }

    chunks
}

/// 使用默认配置分块（便捷方法）
pub fn split_into_chunks_default(text: &str) -> Vec<String> {
    split_into_chunks(text, &ChunkConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max: usize) -> ChunkConfig {
        ChunkConfig {
            max_chunk_chars: max,
        }
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        assert!(split_into_chunks("", &config(200)).is_empty());
        assert!(split_into_chunks("   ...  !? ", &config(200)).is_empty());
    }

    #[test]
    fn test_single_sentence() {
        let chunks = split_into_chunks("Hello world.", &config(200));
        assert_eq!(chunks, vec!["Hello world"]);
    }

    #[test]
    fn test_tight_limit_forces_per_sentence_chunks() {
        // 每句单独放得下，合并则超限
        let chunks = split_into_chunks("A. B. C.", &config(3));
        assert_eq!(chunks, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_sentences_merge_under_limit() {
        let chunks = split_into_chunks("One. Two. Three.", &config(200));
        assert_eq!(chunks, vec!["One. Two. Three"]);
    }

    #[test]
    fn test_repeated_terminators_split_once() {
        let chunks = split_into_chunks("Wait... what?! Really?", &config(200));
        assert_eq!(chunks, vec!["Wait. what. Really"]);
    }

    #[test]
    fn test_oversized_sentence_kept_whole() {
        let long = "x".repeat(50);
        let text = format!("Short. {}. End.", long);
        let chunks = split_into_chunks(&text, &config(10));

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], "Short");
        assert_eq!(chunks[1], long);
        assert_eq!(chunks[2], "End");
    }

    #[test]
    fn test_no_chunk_is_empty_and_order_preserved() {
        let text = "First sentence here. Second one follows! Third? Fourth ends it.";
        let chunks = split_into_chunks(text, &config(30));

        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(!chunk.is_empty());
        }

        // 以 ". " 连接后按原顺序还原所有句子
        let rejoined = chunks.join(". ");
        assert_eq!(
            rejoined,
            "First sentence here. Second one follows. Third. Fourth ends it"
        );
    }

    #[test]
    fn test_length_bound_holds_except_oversized_singles() {
        let text = "Alpha beta gamma. Delta epsilon. Zeta eta theta iota kappa lambda mu nu xi omicron pi rho sigma tau. Ok.";
        let max = 25;
        let chunks = split_into_chunks(text, &config(max));

        for chunk in &chunks {
            let len = chunk.chars().count();
            if len > max {
                // 超限块必须是单个句子（不含连接符）
                assert!(!chunk.contains(SENTENCE_JOINER));
            }
        }
    }

    #[test]
    fn test_default_config() {
        let chunks = split_into_chunks_default("Just one line.");
        assert_eq!(chunks, vec!["Just one line"]);
    }
}
