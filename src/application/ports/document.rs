//! Document Port - 宿主文档抽象
//!
//! 提取算法通过此接口查询文档结构，不依赖任何真实渲染环境。
//! 两个方法都返回独立副本（detached copy），宿主文档不会被修改。

use crate::domain::document::{ContentNode, Selector};

/// Document Port
///
/// 宿主文档的只读视图
pub trait DocumentPort: Send + Sync {
    /// 返回第一个匹配选择器的节点的独立副本
    fn query(&self, selector: &Selector) -> Option<ContentNode>;

    /// 返回整个文档主体的独立副本
    fn body(&self) -> ContentNode;
}
