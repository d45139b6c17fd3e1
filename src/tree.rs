//! Arena document tree
//!
//! The renderer never walks the html5ever `RcDom` directly. Instead the DOM is
//! copied once into a flat arena where every node is addressed by a [`NodeId`]
//! and parent/sibling/child relations are stored as indices. Navigation stays
//! O(1) in every direction and no reference cycles exist.
//!
//! Comments and doctypes are dropped while the arena is built, so they never
//! take part in sibling adjacency checks or list numbering. Tag names and
//! attribute names are lower-cased at this boundary.
//!
//! # Examples
//!
//! ```rust
//! use markdownify::tree::{Document, NodeId};
//!
//! let mut doc = Document::new();
//! let p = doc.append_element(NodeId::ROOT, "P", Vec::new());
//! doc.append_text(p, "Hello");
//!
//! assert_eq!(doc.tag_name(p), Some("p"));
//! assert_eq!(doc.children(p).len(), 1);
//! ```

use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::ConversionError;

/// Index of a node within its [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The document root (always index 0)
    pub const ROOT: NodeId = NodeId(0);

    /// Position of this node in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// Payload of an arena node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document root
    Document,
    /// An element with its lower-cased tag name and ordered attributes
    Element {
        name: String,
        attrs: Vec<(String, String)>,
    },
    /// Decoded character data
    Text(String),
}

/// A single arena node with index links to its relatives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub prev_sibling: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            parent,
            prev_sibling: None,
            next_sibling: None,
            children: Vec::new(),
        }
    }
}

/// Flat, index-addressed document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding only the root node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document, None)],
        }
    }

    /// Copy an html5ever DOM into a new arena
    ///
    /// # Errors
    ///
    /// Returns `ConversionError::InvariantViolation` when the DOM contains a
    /// node kind the renderer has no meaning for: a document node below the
    /// root, or a processing instruction (the HTML tree builder never emits
    /// one, so its presence means the parser broke its contract).
    pub fn from_dom(dom: &RcDom) -> Result<Self, ConversionError> {
        let mut doc = Document::new();

        // Explicit work stack so deep documents do not grow the call stack.
        // Children are pushed in reverse so they are visited in document order.
        let mut stack: Vec<(Handle, NodeId)> = dom
            .document
            .children
            .borrow()
            .iter()
            .rev()
            .map(|child| (child.clone(), NodeId::ROOT))
            .collect();

        while let Some((handle, parent)) = stack.pop() {
            match handle.data {
                NodeData::Element {
                    ref name,
                    ref attrs,
                    ..
                } => {
                    let attrs = attrs
                        .borrow()
                        .iter()
                        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                        .collect();
                    let id = doc.append_element(parent, name.local.as_ref(), attrs);
                    for child in handle.children.borrow().iter().rev() {
                        stack.push((child.clone(), id));
                    }
                }
                NodeData::Text { ref contents } => {
                    doc.append_text(parent, &contents.borrow());
                }
                NodeData::Comment { .. } | NodeData::Doctype { .. } => {}
                NodeData::Document => {
                    return Err(ConversionError::InvariantViolation(
                        "document node found below the root".to_string(),
                    ));
                }
                NodeData::ProcessingInstruction { ref target, .. } => {
                    return Err(ConversionError::InvariantViolation(format!(
                        "unexpected processing instruction '{}'",
                        target
                    )));
                }
            }
        }

        Ok(doc)
    }

    /// Append an element as the last child of `parent`
    ///
    /// The tag name and attribute names are lower-cased. When an attribute
    /// name repeats, the first occurrence wins.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        name: &str,
        attrs: Vec<(String, String)>,
    ) -> NodeId {
        let mut unique: Vec<(String, String)> = Vec::with_capacity(attrs.len());
        for (key, value) in attrs {
            let key = key.to_ascii_lowercase();
            if !unique.iter().any(|(existing, _)| *existing == key) {
                unique.push((key, value));
            }
        }

        self.append(
            parent,
            NodeKind::Element {
                name: name.to_ascii_lowercase(),
                attrs: unique,
            },
        )
    }

    /// Append a text node as the last child of `parent`
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.append(parent, NodeKind::Text(text.to_string()))
    }

    fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        let prev = self.nodes[parent.0].children.last().copied();

        let mut node = Node::new(kind, Some(parent));
        node.prev_sibling = prev;
        self.nodes.push(node);

        if let Some(prev) = prev {
            self.nodes[prev.0].next_sibling = Some(id);
        }
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the document holds nothing but its root
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Iterate every node id in creation (document) order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + use<> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].prev_sibling
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].next_sibling
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Tag name of an element, `None` for text and the root
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match self.nodes[id.0].kind {
            NodeKind::Element { ref name, .. } => Some(name),
            _ => None,
        }
    }

    /// Content of a text node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.nodes[id.0].kind {
            NodeKind::Text(ref text) => Some(text),
            _ => None,
        }
    }

    pub(crate) fn set_text(&mut self, id: NodeId, text: String) {
        if let NodeKind::Text(ref mut current) = self.nodes[id.0].kind {
            *current = text;
        }
    }

    /// Value of an element attribute (`name` must be lower-case)
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match self.nodes[id.0].kind {
            NodeKind::Element { ref attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::Element { .. })
    }

    /// Element children of `id`, text nodes skipped
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|child| self.is_element(*child))
    }

    /// Nearest preceding sibling that is an element
    pub fn prev_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.prev_sibling(id);
        while let Some(sibling) = current {
            if self.is_element(sibling) {
                return Some(sibling);
            }
            current = self.prev_sibling(sibling);
        }
        None
    }

    /// Nearest following sibling that is an element
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.next_sibling(id);
        while let Some(sibling) = current {
            if self.is_element(sibling) {
                return Some(sibling);
            }
            current = self.next_sibling(sibling);
        }
        None
    }

    /// Following sibling, skipping whitespace-only text nodes
    pub fn next_content_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.next_sibling(id);
        while let Some(sibling) = current {
            match self.text(sibling) {
                Some(text) if text.trim().is_empty() => current = self.next_sibling(sibling),
                _ => return Some(sibling),
            }
        }
        None
    }

    /// Number of element siblings preceding `id`
    pub fn element_index(&self, id: NodeId) -> usize {
        let mut index = 0;
        let mut current = self.prev_element_sibling(id);
        while let Some(sibling) = current {
            index += 1;
            current = self.prev_element_sibling(sibling);
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_html;

    fn find(doc: &Document, tag: &str) -> NodeId {
        doc.node_ids()
            .find(|id| doc.tag_name(*id) == Some(tag))
            .unwrap_or_else(|| panic!("no <{tag}> in document"))
    }

    #[test]
    fn test_new_document_has_only_root() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.node(NodeId::ROOT).kind, NodeKind::Document);
    }

    #[test]
    fn test_sibling_links_follow_child_order() {
        let mut doc = Document::new();
        let ul = doc.append_element(NodeId::ROOT, "ul", Vec::new());
        let a = doc.append_element(ul, "li", Vec::new());
        let ws = doc.append_text(ul, "\n");
        let b = doc.append_element(ul, "li", Vec::new());

        assert_eq!(doc.children(ul), &[a, ws, b]);
        assert_eq!(doc.prev_sibling(a), None);
        assert_eq!(doc.next_sibling(a), Some(ws));
        assert_eq!(doc.prev_sibling(b), Some(ws));
        assert_eq!(doc.next_sibling(b), None);
        assert_eq!(doc.parent(ws), Some(ul));
    }

    #[test]
    fn test_element_navigation_skips_text() {
        let mut doc = Document::new();
        let ol = doc.append_element(NodeId::ROOT, "ol", Vec::new());
        let first = doc.append_element(ol, "li", Vec::new());
        doc.append_text(ol, "  ");
        let second = doc.append_element(ol, "li", Vec::new());
        doc.append_text(ol, "  ");
        let third = doc.append_element(ol, "li", Vec::new());

        assert_eq!(doc.element_index(first), 0);
        assert_eq!(doc.element_index(second), 1);
        assert_eq!(doc.element_index(third), 2);
        assert_eq!(doc.next_element_sibling(first), Some(second));
        assert_eq!(doc.prev_element_sibling(third), Some(second));
        assert_eq!(doc.element_children(ol).count(), 3);
    }

    #[test]
    fn test_names_are_lowercased_and_attrs_unique() {
        let mut doc = Document::new();
        let a = doc.append_element(
            NodeId::ROOT,
            "A",
            vec![
                ("HREF".to_string(), "first".to_string()),
                ("href".to_string(), "second".to_string()),
            ],
        );
        assert_eq!(doc.tag_name(a), Some("a"));
        assert_eq!(doc.attr(a, "href"), Some("first"));
        assert_eq!(doc.attr(a, "title"), None);
    }

    #[test]
    fn test_next_content_sibling_skips_whitespace_text() {
        let mut doc = Document::new();
        let first = doc.append_element(NodeId::ROOT, "ul", Vec::new());
        doc.append_text(NodeId::ROOT, "\n   \n");
        let second = doc.append_element(NodeId::ROOT, "ol", Vec::new());
        let text = doc.append_text(NodeId::ROOT, " tail");

        assert_eq!(doc.next_content_sibling(first), Some(second));
        assert_eq!(doc.next_content_sibling(second), Some(text));
        assert_eq!(doc.next_content_sibling(text), None);
    }

    #[test]
    fn test_from_dom_drops_comments_and_doctype() {
        let dom = parse_html("<!DOCTYPE html><ul><li>a</li><!-- note --><li>b</li></ul>");
        let doc = Document::from_dom(&dom).expect("DOM should convert");

        let ul = find(&doc, "ul");
        let items: Vec<NodeId> = doc.element_children(ul).collect();
        assert_eq!(items.len(), 2);
        assert_eq!(doc.children(ul).len(), 2);
        assert_eq!(doc.element_index(items[1]), 1);
    }

    #[test]
    fn test_from_dom_keeps_text_and_attributes() {
        let dom = parse_html(r#"<p>Hi <a href="http://example.com">there</a></p>"#);
        let doc = Document::from_dom(&dom).expect("DOM should convert");

        let a = find(&doc, "a");
        assert_eq!(doc.attr(a, "href"), Some("http://example.com"));
        let text = doc.children(a)[0];
        assert_eq!(doc.text(text), Some("there"));

        let p = find(&doc, "p");
        assert_eq!(doc.text(doc.children(p)[0]), Some("Hi "));
    }

    #[test]
    fn test_from_dom_deep_nesting_does_not_recurse() {
        let depth = 2000;
        let html = format!("{}x{}", "<span>".repeat(depth), "</span>".repeat(depth));
        let dom = parse_html(&html);
        let doc = Document::from_dom(&dom).expect("DOM should convert");
        assert!(doc.len() > depth);
    }
}
