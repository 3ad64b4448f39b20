//! 正文提取器
//!
//! 从宿主文档中提取可朗读的正文文本：
//! 1. 按优先级探测正文选择器，全部落空则退回整个 body
//! 2. 在独立副本上剔除导航、页眉页脚、广告等非正文子树
//! 3. 展平文本并归一化空白

use crate::application::error::ExtractError;
use crate::application::ports::DocumentPort;
use crate::config::ExtractionConfig;
use crate::domain::document::Selector;

/// 提取页面正文
pub fn extract_page_text(
    document: &dyn DocumentPort,
    config: &ExtractionConfig,
) -> Result<String, ExtractError> {
    // 探测正文区域，第一个命中的选择器生效
    let mut fragment = config
        .content_selectors
        .iter()
        .find_map(|raw| document.query(&Selector::parse(raw)))
        .unwrap_or_else(|| document.body());

    // 剔除非正文子树（按结构标记，不看文本内容）
    for raw in &config.excluded_selectors {
        fragment.remove_matching(&Selector::parse(raw));
    }

    let text = normalize_whitespace(&fragment.flatten_text());
    if text.is_empty() {
        tracing::debug!("Extraction produced no readable text");
        return Err(ExtractError::NoReadableContent);
    }

    tracing::debug!(chars = text.chars().count(), "Page text extracted");
    Ok(text)
}

/// 将所有空白串（含换行）折叠为单个空格并去除首尾空白
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
