//! Arena content tree: parsing, traversal and serialization.

mod arena;
mod serialize;
mod tree_sink;
mod walk;

pub use arena::{
    AncestorsIter, ArenaDom, Attribute, ChildrenIter, Node, NodeData, NodeId, Split, SplitSide,
    WordUnit,
};
pub use serialize::{NODE_ID_ATTR, SerializeOptions, serialize_children};
pub use tree_sink::{ArenaSink, NodeHandle, parse_article};
pub use walk::{Visitor, Walk, highlights, walk, words};

#[cfg(test)]
pub(crate) use arena::qname;

use crate::Config;

/// Whether text inside `tag` is parser character data rather than visible
/// article prose. Such text is never tokenized.
pub fn holds_raw_text(tag: &str) -> bool {
    serialize::RAW_TEXT_ELEMENTS
        .iter()
        .chain(serialize::RCDATA_ELEMENTS)
        .any(|t| t.eq_ignore_ascii_case(tag))
}

/// Nearest block container at or above a node, as classified by `config`.
pub fn nearest_block(dom: &ArenaDom, id: NodeId, config: &Config) -> Option<NodeId> {
    dom.ancestors(id).find(|&a| {
        dom.element_name(a)
            .is_some_and(|name| config.is_block_tag(name.as_ref()))
    })
}

/// Nearest link element at or above a node, as classified by `config`.
pub fn nearest_link(dom: &ArenaDom, id: NodeId, config: &Config) -> Option<NodeId> {
    dom.ancestors(id).find(|&a| {
        dom.element_name(a)
            .is_some_and(|name| config.is_link_tag(name.as_ref()))
    })
}

/// Nearest word node at or above a node.
pub fn nearest_word(dom: &ArenaDom, id: NodeId) -> Option<NodeId> {
    dom.ancestors(id).find(|&a| dom.is_word(a))
}
