//! 文档片段模型
//!
//! 提取器操作的独立节点树（detached copy），以及简化的结构选择器。
//! 宿主文档只通过 DocumentPort 交出副本，原文档永远不会被修改。

/// 结构选择器
///
/// 支持三种形式：标签名（`nav`）、类名（`.sidebar`）、ID（`#content`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// 按标签名匹配
    Tag(String),
    /// 按 class 匹配
    Class(String),
    /// 按 id 匹配
    Id(String),
}

impl Selector {
    /// 解析选择器字符串
    ///
    /// `.foo` -> Class, `#foo` -> Id, 其余 -> Tag
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Some(class) = raw.strip_prefix('.') {
            Selector::Class(class.to_string())
        } else if let Some(id) = raw.strip_prefix('#') {
            Selector::Id(id.to_string())
        } else {
            Selector::Tag(raw.to_string())
        }
    }

    /// 判断节点是否匹配
    pub fn matches(&self, node: &ContentNode) -> bool {
        match self {
            Selector::Tag(tag) => node.tag.eq_ignore_ascii_case(tag),
            Selector::Class(class) => node.classes.iter().any(|c| c == class),
            Selector::Id(id) => node.id.as_deref() == Some(id.as_str()),
        }
    }
}

/// 内容节点
///
/// 文档树的独立副本节点，owned、可变，与宿主环境无关
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentNode {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// 节点自身直接持有的文本
    pub text: String,
    pub children: Vec<ContentNode>,
}

impl ContentNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_child(mut self, child: ContentNode) -> Self {
        self.children.push(child);
        self
    }

    /// 深度优先查找第一个匹配的节点
    pub fn find_first(&self, selector: &Selector) -> Option<&ContentNode> {
        if selector.matches(self) {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_first(selector))
    }

    /// 移除所有匹配的子树
    ///
    /// 匹配的节点连同其整个子树一起删除；根节点自身不会被移除
    pub fn remove_matching(&mut self, selector: &Selector) {
        self.children.retain(|child| !selector.matches(child));
        for child in &mut self.children {
            child.remove_matching(selector);
        }
    }

    /// 展平子树的全部文本（深度优先，以空格连接）
    ///
    /// 不做空白归一化，由调用方处理
    pub fn flatten_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text<'a>(&'a self, parts: &mut Vec<&'a str>) {
        if !self.text.is_empty() {
            parts.push(&self.text);
        }
        for child in &self.children {
            child.collect_text(parts);
        }
    }
}
