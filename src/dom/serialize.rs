//! Serializes the content tree back to HTML markup.
//!
//! Words become `<span class="word">` and highlights become
//! `<mark class="notare-mark">` (both names come from [`Config`]), so the
//! output can be handed to an export pipeline or rendered again.

use std::fmt::Write;

use super::arena::{ArenaDom, NodeData, NodeId};
use crate::Config;

/// Elements that never have an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose text content is written without escaping. `noscript` is
/// raw text because articles are parsed with scripting enabled.
pub(crate) const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

/// Elements whose text is parsed as character data but never holds markup.
pub(crate) const RCDATA_ELEMENTS: &[&str] = &["textarea", "title"];

/// Attribute written on elements, words and highlights when node handles are
/// requested.
pub const NODE_ID_ATTR: &str = "data-nid";

/// Options for [`serialize_children`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SerializeOptions {
    /// Emit `data-nid` on every element, word and highlight so a host can
    /// route clicks back to tree nodes, including clicks on links and images
    /// that land on no word.
    pub node_ids: bool,
}

/// Serialize the children of `root` (not `root` itself).
pub fn serialize_children(
    dom: &ArenaDom,
    root: NodeId,
    config: &Config,
    options: SerializeOptions,
) -> String {
    let mut ctx = Context {
        out: String::new(),
        dom,
        config,
        options,
    };
    for child in dom.children(root) {
        ctx.node(child, false);
    }
    ctx.out
}

struct Context<'a> {
    out: String,
    dom: &'a ArenaDom,
    config: &'a Config,
    options: SerializeOptions,
}

impl Context<'_> {
    fn node(&mut self, id: NodeId, raw_text: bool) {
        let Some(data) = self.dom.data(id) else {
            return;
        };

        match data {
            NodeData::Text(text) if raw_text => self.out.push_str(text),
            NodeData::Text(text) => escape_text(&mut self.out, text),
            NodeData::Word(word) => {
                self.out.push_str("<span class=\"");
                escape_attr(&mut self.out, &self.config.word_class);
                self.out.push('"');
                self.node_id(id);
                self.out.push('>');
                escape_text(&mut self.out, word.text());
                self.out.push_str("</span>");
            }
            NodeData::Highlight { .. } => {
                let tag = &self.config.highlight_tag;
                write!(self.out, "<{tag} class=\"").ok();
                escape_attr(&mut self.out, &self.config.highlight_class);
                self.out.push('"');
                self.node_id(id);
                self.out.push('>');
                self.children(id, false);
                write!(self.out, "</{tag}>").ok();
            }
            NodeData::Element { name, attrs, .. } => {
                let tag = name.local.as_ref();
                write!(self.out, "<{tag}").ok();
                for attr in attrs {
                    let name = attr.name.local.as_ref();
                    if self.options.node_ids && name == NODE_ID_ATTR {
                        continue;
                    }
                    write!(self.out, " {name}=\"").ok();
                    escape_attr(&mut self.out, &attr.value);
                    self.out.push('"');
                }
                self.node_id(id);
                self.out.push('>');

                if VOID_ELEMENTS.contains(&tag) {
                    return;
                }
                self.children(id, RAW_TEXT_ELEMENTS.contains(&tag));
                write!(self.out, "</{tag}>").ok();
            }
            NodeData::Comment(text) => {
                write!(self.out, "<!--{text}-->").ok();
            }
            NodeData::Document => self.children(id, false),
            NodeData::Doctype { .. } => {}
        }
    }

    fn children(&mut self, id: NodeId, raw_text: bool) {
        for child in self.dom.children(id) {
            self.node(child, raw_text);
        }
    }

    fn node_id(&mut self, id: NodeId) {
        if self.options.node_ids {
            write!(self.out, " {NODE_ID_ATTR}=\"{}\"", id.0).ok();
        }
    }
}

fn escape_text(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
}

fn escape_attr(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
}
