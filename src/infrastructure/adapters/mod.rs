//! 适配器实现

mod espeak_engine;
mod tree_document;

pub use espeak_engine::EspeakEngine;
pub use tree_document::TreeDocument;
