//! In-Memory Tree Document Implementation
//!
//! 以 ContentNode 树为底座的文档适配器，供测试和非 DOM 宿主使用。
//! 真实宿主（如浏览器内容脚本）在宿主侧实现同样的端口。

use crate::application::ports::DocumentPort;
use crate::domain::document::{ContentNode, Selector};

/// 内存文档
pub struct TreeDocument {
    root: ContentNode,
}

impl TreeDocument {
    pub fn new(root: ContentNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &ContentNode {
        &self.root
    }
}

impl DocumentPort for TreeDocument {
    fn query(&self, selector: &Selector) -> Option<ContentNode> {
        self.root.find_first(selector).cloned()
    }

    fn body(&self) -> ContentNode {
        self.root.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_returns_detached_copy() {
        let doc = TreeDocument::new(
            ContentNode::new("body")
                .with_child(ContentNode::new("main").with_text("content")),
        );

        let mut copy = doc.query(&Selector::parse("main")).unwrap();
        copy.text = "mutated".to_string();

        // 副本的修改不影响宿主文档
        assert_eq!(
            doc.root()
                .find_first(&Selector::parse("main"))
                .unwrap()
                .text,
            "content"
        );
    }

    #[test]
    fn test_query_miss_returns_none() {
        let doc = TreeDocument::new(ContentNode::new("body"));
        assert!(doc.query(&Selector::parse("article")).is_none());
    }

    #[test]
    fn test_body_returns_whole_tree() {
        let doc = TreeDocument::new(
            ContentNode::new("body")
                .with_child(ContentNode::new("p").with_text("one"))
                .with_child(ContentNode::new("p").with_text("two")),
        );
        assert_eq!(doc.body().children.len(), 2);
    }
}
