//! Arena-based content tree.
//!
//! Every node lives in one contiguous vector and links to its relatives by
//! index, so wrapping and unwrapping ranges are splice operations on sibling
//! chains rather than pointer surgery. Detached nodes stay in the arena; a
//! tree is rebuilt from scratch on every render, so nothing is reclaimed.

use html5ever::{LocalName, QualName};

/// Unique identifier for a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value for no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this is a valid node ID.
    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Check if this is the sentinel value.
    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }

    fn into_option(self) -> Option<NodeId> {
        self.is_some().then_some(self)
    }
}

/// A word: one maximal run of non-whitespace characters from a text node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordUnit {
    text: String,
    order: usize,
    block: Option<NodeId>,
}

impl WordUnit {
    pub fn new(text: impl Into<String>, order: usize, block: Option<NodeId>) -> Self {
        Self {
            text: text.into(),
            order,
            block,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Position of this word among the words of its block container.
    pub fn order(&self) -> usize {
        self.order
    }

    /// The block container this word was assigned to when it was created.
    pub fn block(&self) -> Option<NodeId> {
        self.block
    }
}

/// Which side of the original element a split fragment was moved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitSide {
    Before,
    After,
}

/// An element that wrapping had to cut in two.
///
/// `original` keeps the part inside the highlight, `fragment` holds the
/// siblings that fell outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    pub original: NodeId,
    pub fragment: NodeId,
    pub side: SplitSide,
}

/// Node type in the arena.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root.
    Document,
    /// Element with name and attributes.
    ///
    /// The name is boxed so its address survives arena growth.
    Element {
        name: Box<QualName>,
        attrs: Vec<Attribute>,
        /// Pre-extracted classes for fast matching.
        classes: Vec<String>,
    },
    /// Text content.
    Text(String),
    /// Tokenized word.
    Word(WordUnit),
    /// Sentence highlight wrapper, with the splits made while wrapping.
    Highlight { splits: Vec<Split> },
    /// Comment (kept for round-tripping).
    Comment(String),
    /// Document type declaration.
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
}

/// HTML attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

/// A node in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub data: NodeData,
    parent: NodeId,
    first_child: NodeId,
    last_child: NodeId,
    prev_sibling: NodeId,
    next_sibling: NodeId,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
        }
    }
}

/// Arena-based DOM tree.
pub struct ArenaDom {
    nodes: Vec<Node>,
    document: NodeId,
}

impl ArenaDom {
    /// Create a new empty DOM with a document root.
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            document: NodeId::NONE,
        };
        dom.document = dom.alloc(Node::new(NodeData::Document));
        dom
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the document root ID.
    pub fn document(&self) -> NodeId {
        self.document
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Get the data of a node.
    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.get(id).map(|n| &n.data)
    }

    /// Create a new element node.
    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> NodeId {
        let classes = attrs
            .iter()
            .find(|a| a.name.local.as_ref() == "class")
            .map(|a| a.value.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        self.alloc(Node::new(NodeData::Element {
            name: Box::new(name),
            attrs,
            classes,
        }))
    }

    /// Create a new text node.
    pub fn create_text(&mut self, text: String) -> NodeId {
        self.alloc(Node::new(NodeData::Text(text)))
    }

    /// Create a new word node.
    pub fn create_word(&mut self, word: WordUnit) -> NodeId {
        self.alloc(Node::new(NodeData::Word(word)))
    }

    /// Create a new, empty highlight wrapper.
    pub fn create_highlight(&mut self, splits: Vec<Split>) -> NodeId {
        self.alloc(Node::new(NodeData::Highlight { splits }))
    }

    /// Create a new comment node.
    pub fn create_comment(&mut self, text: String) -> NodeId {
        self.alloc(Node::new(NodeData::Comment(text)))
    }

    /// Create a doctype node.
    pub fn create_doctype(&mut self, name: String, public_id: String, system_id: String) -> NodeId {
        self.alloc(Node::new(NodeData::Doctype {
            name,
            public_id,
            system_id,
        }))
    }

    /// Allocate a childless copy of a node. An element copy drops its `id`
    /// attribute so the document never holds the same id twice.
    pub fn clone_shell(&mut self, id: NodeId) -> Option<NodeId> {
        let mut data = self.get(id)?.data.clone();
        if let NodeData::Element { attrs, .. } = &mut data {
            attrs.retain(|a| a.name.local.as_ref() != "id");
        }
        Some(self.alloc(Node::new(data)))
    }

    /// Replace the data of a node, keeping its links.
    pub fn set_data(&mut self, id: NodeId, data: NodeData) {
        if let Some(node) = self.get_mut(id) {
            node.data = data;
        }
    }

    /// Append a detached child to a parent node.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        let last_child = self.get(parent).map(|n| n.last_child).unwrap_or(NodeId::NONE);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = parent;
            child_node.prev_sibling = last_child;
            child_node.next_sibling = NodeId::NONE;
        }

        if let Some(last_node) = self.get_mut(last_child) {
            last_node.next_sibling = child;
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
    }

    /// Insert a detached node before a sibling.
    pub fn insert_before(&mut self, sibling: NodeId, new_node: NodeId) {
        let Some((parent, prev)) = self.get(sibling).map(|n| (n.parent, n.prev_sibling)) else {
            return;
        };

        if let Some(new) = self.get_mut(new_node) {
            new.parent = parent;
            new.prev_sibling = prev;
            new.next_sibling = sibling;
        }

        if let Some(sib) = self.get_mut(sibling) {
            sib.prev_sibling = new_node;
        }

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = new_node;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = new_node;
        }
    }

    /// Insert a detached node after a sibling.
    pub fn insert_after(&mut self, sibling: NodeId, new_node: NodeId) {
        match self.next_sibling(sibling) {
            Some(next) => self.insert_before(next, new_node),
            None => {
                if let Some(parent) = self.parent(sibling) {
                    self.append(parent, new_node);
                }
            }
        }
    }

    /// Insert a detached node as the first child of a parent.
    pub fn prepend(&mut self, parent: NodeId, child: NodeId) {
        match self.first_child(parent) {
            Some(first) => self.insert_before(first, child),
            None => self.append(parent, child),
        }
    }

    /// Unlink a node from its parent and siblings. Its own children stay.
    pub fn detach(&mut self, target: NodeId) {
        let Some((parent, prev, next)) = self
            .get(target)
            .map(|n| (n.parent, n.prev_sibling, n.next_sibling))
        else {
            return;
        };

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = next;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = next;
        }

        if next.is_some() {
            if let Some(n) = self.get_mut(next) {
                n.prev_sibling = prev;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.last_child = prev;
        }

        if let Some(node) = self.get_mut(target) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }
    }

    /// Move every child of `from` to the end of `to`, keeping order.
    pub fn reparent_children(&mut self, from: NodeId, to: NodeId) {
        let children: Vec<_> = self.children(from).collect();
        for child in children {
            self.detach(child);
            self.append(to, child);
        }
    }

    /// Append text to an existing text node, or create new if last child isn't text.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        let last_child = self.get(parent).map(|n| n.last_child).unwrap_or(NodeId::NONE);

        if let Some(last) = self.get_mut(last_child)
            && let NodeData::Text(existing) = &mut last.data
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_text(text.to_string());
        self.append(parent, text_node);
    }

    /// Get the number of nodes, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the DOM is empty (only has document root).
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent.into_option())
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.first_child.into_option())
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.last_child.into_option())
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling.into_option())
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling.into_option())
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: NodeId) -> ChildrenIter<'_> {
        ChildrenIter {
            dom: self,
            current: self.get(parent).map(|n| n.first_child).unwrap_or(NodeId::NONE),
        }
    }

    /// Iterate from a node up to the document root, starting with the node itself.
    pub fn ancestors(&self, id: NodeId) -> AncestorsIter<'_> {
        AncestorsIter {
            dom: self,
            current: if self.get(id).is_some() { id } else { NodeId::NONE },
        }
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    pub fn contains(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Find the first node in document order matching a predicate.
    pub fn find<F>(&self, predicate: F) -> Option<NodeId>
    where
        F: Fn(&Node) -> bool,
    {
        let mut stack = vec![self.document];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.get(id) {
                if predicate(node) {
                    return Some(id);
                }
                // Push children in reverse order for left-to-right traversal
                let mut children: Vec<_> = self.children(id).collect();
                children.reverse();
                stack.extend(children);
            }
        }
        None
    }

    /// Find element by tag name (first match).
    pub fn find_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.find(|node| match &node.data {
            NodeData::Element { name, .. } => name.local.as_ref() == tag,
            _ => false,
        })
    }
}

impl Default for ArenaDom {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over children of a node.
pub struct ChildrenIter<'a> {
    dom: &'a ArenaDom,
    current: NodeId,
}

impl Iterator for ChildrenIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self.dom.get(id).map(|n| n.next_sibling).unwrap_or(NodeId::NONE);
        Some(id)
    }
}

/// Iterator over a node and its ancestors.
pub struct AncestorsIter<'a> {
    dom: &'a ArenaDom,
    current: NodeId,
}

impl Iterator for AncestorsIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self.dom.get(id).map(|n| n.parent).unwrap_or(NodeId::NONE);
        Some(id)
    }
}

/// Convenience accessors by node kind.
impl ArenaDom {
    /// Get element's local name (tag).
    pub fn element_name(&self, id: NodeId) -> Option<&LocalName> {
        match self.data(id)? {
            NodeData::Element { name, .. } => Some(&name.local),
            _ => None,
        }
    }

    /// Whether the node is an element with the given local name.
    pub fn is_element_named(&self, id: NodeId, tag: &str) -> bool {
        self.element_name(id).is_some_and(|n| n.as_ref() == tag)
    }

    /// Get an attribute value.
    pub fn get_attr(&self, id: NodeId, attr_name: &str) -> Option<&str> {
        match self.data(id)? {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name.local.as_ref() == attr_name)
                .map(|a| a.value.as_str()),
            _ => None,
        }
    }

    /// Get element's classes.
    pub fn element_classes(&self, id: NodeId) -> &[String] {
        match self.data(id) {
            Some(NodeData::Element { classes, .. }) => classes.as_slice(),
            _ => &[],
        }
    }

    /// Check if node is a text node.
    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.data(id), Some(NodeData::Text(_)))
    }

    /// Get text content of a text node.
    pub fn text_content(&self, id: NodeId) -> Option<&str> {
        match self.data(id)? {
            NodeData::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get the word carried by a word node.
    pub fn word(&self, id: NodeId) -> Option<&WordUnit> {
        match self.data(id)? {
            NodeData::Word(word) => Some(word),
            _ => None,
        }
    }

    pub fn is_word(&self, id: NodeId) -> bool {
        self.word(id).is_some()
    }

    pub fn is_highlight(&self, id: NodeId) -> bool {
        matches!(self.data(id), Some(NodeData::Highlight { .. }))
    }

    /// Nearest highlight wrapper at or above a node.
    pub fn enclosing_highlight(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id).find(|&a| self.is_highlight(a))
    }

    /// Concatenated text of all text and word nodes under `id`, in document order.
    pub fn collect_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            match self.data(current) {
                Some(NodeData::Text(text)) => out.push_str(text),
                Some(NodeData::Word(word)) => out.push_str(word.text()),
                Some(_) => {
                    let mut children: Vec<_> = self.children(current).collect();
                    children.reverse();
                    stack.extend(children);
                }
                None => {}
            }
        }
        out
    }
}

#[cfg(test)]
pub(crate) fn qname(local: &str) -> QualName {
    QualName::new(None, html5ever::ns!(html), LocalName::from(local))
}
