//! Depth-first traversal over the content tree.
//!
//! Visitors are dispatched by node kind. Element and highlight callbacks
//! decide whether the walk descends into the node's children.

use super::arena::{ArenaDom, NodeData, NodeId, WordUnit};

/// Whether to descend into a node's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    Continue,
    Skip,
}

/// Callbacks for a pre-order walk. All methods default to doing nothing.
pub trait Visitor {
    fn element(&mut self, _dom: &ArenaDom, _id: NodeId) -> Walk {
        Walk::Continue
    }

    fn highlight(&mut self, _dom: &ArenaDom, _id: NodeId) -> Walk {
        Walk::Continue
    }

    fn text(&mut self, _dom: &ArenaDom, _id: NodeId, _text: &str) {}

    fn word(&mut self, _dom: &ArenaDom, _id: NodeId, _word: &WordUnit) {}
}

/// Walk the subtree under `root` in document order. `root` itself is not visited.
pub fn walk<V: Visitor>(dom: &ArenaDom, root: NodeId, visitor: &mut V) {
    let mut stack: Vec<NodeId> = dom.children(root).collect();
    stack.reverse();

    while let Some(id) = stack.pop() {
        let descend = match dom.data(id) {
            Some(NodeData::Element { .. }) => visitor.element(dom, id),
            Some(NodeData::Highlight { .. }) => visitor.highlight(dom, id),
            Some(NodeData::Text(text)) => {
                visitor.text(dom, id, text);
                Walk::Skip
            }
            Some(NodeData::Word(word)) => {
                visitor.word(dom, id, word);
                Walk::Skip
            }
            Some(NodeData::Document) => Walk::Continue,
            Some(NodeData::Comment(_) | NodeData::Doctype { .. }) | None => Walk::Skip,
        };

        if descend == Walk::Continue {
            let first = stack.len();
            stack.extend(dom.children(id));
            stack[first..].reverse();
        }
    }
}

/// Collect every word node under `root` in document order.
pub fn words(dom: &ArenaDom, root: NodeId) -> Vec<NodeId> {
    struct Words(Vec<NodeId>);

    impl Visitor for Words {
        fn word(&mut self, _dom: &ArenaDom, id: NodeId, _word: &WordUnit) {
            self.0.push(id);
        }
    }

    let mut collector = Words(Vec::new());
    walk(dom, root, &mut collector);
    collector.0
}

/// Collect every highlight wrapper under `root` in document order.
pub fn highlights(dom: &ArenaDom, root: NodeId) -> Vec<NodeId> {
    struct Highlights(Vec<NodeId>);

    impl Visitor for Highlights {
        fn highlight(&mut self, _dom: &ArenaDom, id: NodeId) -> Walk {
            self.0.push(id);
            Walk::Continue
        }
    }

    let mut collector = Highlights(Vec::new());
    walk(dom, root, &mut collector);
    collector.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::arena::qname;

    #[derive(Default)]
    struct Trace(Vec<String>);

    impl Visitor for Trace {
        fn element(&mut self, dom: &ArenaDom, id: NodeId) -> Walk {
            let name = dom.element_name(id).map(|n| n.to_string()).unwrap_or_default();
            self.0.push(format!("<{name}>"));
            if name == "script" { Walk::Skip } else { Walk::Continue }
        }

        fn highlight(&mut self, _dom: &ArenaDom, _id: NodeId) -> Walk {
            self.0.push("<mark>".into());
            Walk::Continue
        }

        fn text(&mut self, _dom: &ArenaDom, _id: NodeId, text: &str) {
            self.0.push(text.to_string());
        }

        fn word(&mut self, _dom: &ArenaDom, _id: NodeId, word: &WordUnit) {
            self.0.push(format!("[{}]", word.text()));
        }
    }

    #[test]
    fn test_walk_is_preorder_and_respects_skip() {
        let mut dom = ArenaDom::new();
        let body = dom.create_element(qname("body"), vec![]);
        let p = dom.create_element(qname("p"), vec![]);
        let script = dom.create_element(qname("script"), vec![]);
        let mark = dom.create_highlight(Vec::new());
        let w1 = dom.create_word(WordUnit::new("one", 0, Some(p)));
        let w2 = dom.create_word(WordUnit::new("two.", 1, Some(p)));

        dom.append(dom.document(), body);
        dom.append(body, p);
        dom.append(p, mark);
        dom.append(mark, w1);
        dom.append_text(mark, " ");
        dom.append(mark, w2);
        dom.append(body, script);
        dom.append_text(script, "hidden()");

        let mut trace = Trace::default();
        walk(&dom, body, &mut trace);

        assert_eq!(trace.0, ["<p>", "<mark>", "[one]", " ", "[two.]", "<script>"]);
        assert_eq!(words(&dom, body), vec![w1, w2]);
        assert_eq!(highlights(&dom, body), vec![mark]);
    }
}
