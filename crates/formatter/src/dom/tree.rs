// ABOUTME: Arena-backed mutable HTML tree imported from a tolerant html5ever parse.
// ABOUTME: Nodes are addressed by NodeId; children lists own ordering, parent links are lookups only.

use std::collections::HashSet;

use scraper::Html;
use tracing::debug;

use crate::error::FormatError;
use crate::options::ParseOptions;

/// Message html5ever uses for tree-construction errors when exact errors are off.
const MISSING_DOCTYPE_DIAGNOSTIC: &str = "Unexpected token";

/// Handle to a node slot in a [`Document`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// An element with its tag name and attributes in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(k, _)| k == name)
    }

    /// Sets an attribute, overwriting the value in place if it already exists.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    /// Removes an attribute, returning its previous value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|(k, _)| k == name)?;
        Some(self.attrs.remove(pos).1)
    }
}

/// Payload of a tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Document,
    Doctype(String),
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A parsed HTML document held in an arena.
///
/// Discarded nodes leave an empty slot behind; their ids stop resolving.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Option<Node>>,
    root: NodeId,
    diagnostics: Vec<String>,
}

impl Document {
    /// Parse markup, recovering from anything malformed.
    pub fn parse(raw: &str) -> Self {
        let html = Html::parse_document(raw);
        let diagnostics: Vec<String> = html.errors.iter().map(|e| e.to_string()).collect();
        if !diagnostics.is_empty() {
            debug!(
                recovered = diagnostics.len(),
                "parser recovered from malformed markup"
            );
        }

        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            diagnostics,
        };
        let root = match doc.import(html.tree.root(), None) {
            Some(id) => id,
            None => doc.push(NodeData::Document, None),
        };
        doc.root = root;
        doc
    }

    /// Parse markup with explicit options.
    ///
    /// With recovery switched off, any diagnostic from [`Document::malformations`]
    /// rejects the input.
    pub fn parse_with(raw: &str, opts: &ParseOptions) -> Result<Self, FormatError> {
        let doc = Self::parse(raw);
        if !opts.recover_from_malformed_input {
            let malformations = doc.malformations();
            if let Some(first) = malformations.first() {
                return Err(FormatError::malformed(
                    "Parse",
                    Some(anyhow::anyhow!(
                        "{} ({} diagnostics)",
                        first,
                        malformations.len()
                    )),
                ));
            }
        }
        Ok(doc)
    }

    fn import(
        &mut self,
        src: ego_tree::NodeRef<'_, scraper::Node>,
        parent: Option<NodeId>,
    ) -> Option<NodeId> {
        let data = match src.value() {
            scraper::Node::Document | scraper::Node::Fragment => NodeData::Document,
            scraper::Node::Doctype(d) => NodeData::Doctype(d.name().to_string()),
            scraper::Node::Comment(c) => NodeData::Comment(String::from(&**c)),
            scraper::Node::Text(t) => NodeData::Text(String::from(&**t)),
            scraper::Node::Element(el) => NodeData::Element(Element {
                name: el.name().to_string(),
                attrs: el
                    .attrs()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            }),
            _ => return None,
        };

        let id = self.push(data, parent);
        for child in src.children() {
            if let Some(child_id) = self.import(child, Some(id)) {
                if let Some(node) = self.node_mut(id) {
                    node.children.push(child_id);
                }
            }
        }
        Some(id)
    }

    fn push(&mut self, data: NodeData, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node {
            data,
            parent,
            children: Vec::new(),
        }));
        id
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        if let Some(node) = self.node_mut(id) {
            node.parent = parent;
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of parser diagnostics recovered from while building the tree.
    pub fn recovered_errors(&self) -> usize {
        self.diagnostics.len()
    }

    /// Every parser diagnostic, in the order html5ever raised them.
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    /// Diagnostics that point at broken markup.
    ///
    /// html5ever raises one "Unexpected token" in its initial insertion mode for
    /// any document without a DOCTYPE. Word exports never carry one, so that
    /// first notice is dropped when no doctype node was parsed.
    pub fn malformations(&self) -> Vec<&str> {
        let mut skip_doctype_notice = !self.has_doctype();
        self.diagnostics
            .iter()
            .map(String::as_str)
            .filter(|d| {
                if skip_doctype_notice && *d == MISSING_DOCTYPE_DIAGNOSTIC {
                    skip_doctype_notice = false;
                    return false;
                }
                true
            })
            .collect()
    }

    fn has_doctype(&self) -> bool {
        self.children(self.root)
            .iter()
            .any(|c| matches!(self.data(*c), Some(NodeData::Doctype(_))))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.node(id).map(|n| &n.data)
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.data(id)? {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match self.node_mut(id) {
            Some(Node {
                data: NodeData::Element(el),
                ..
            }) => Some(el),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// All nodes below `id` in pre-order, not including `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Elements in document order that satisfy `pred`.
    pub fn select_elements<F>(&self, pred: F) -> Vec<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        self.descendants(self.root)
            .into_iter()
            .filter(|id| self.element(*id).is_some_and(|el| pred(el)))
            .collect()
    }

    /// Elements whose tag name is in `names`, in document order.
    ///
    /// Names are compared case-insensitively.
    pub fn query_by_tag_names(&self, names: &HashSet<String>) -> Vec<NodeId> {
        let names: HashSet<String> = names.iter().map(|n| n.to_ascii_lowercase()).collect();
        self.select_elements(|el| names.contains(&el.name.to_ascii_lowercase()))
    }

    /// Elements with the given tag name, in document order.
    pub fn query_by_tag_name(&self, name: &str) -> Vec<NodeId> {
        self.select_elements(|el| el.name.eq_ignore_ascii_case(name))
    }

    /// Elements whose `class` attribute contains `token` as a substring, in document order.
    pub fn query_by_class_token(&self, token: &str) -> Vec<NodeId> {
        self.select_elements(|el| el.attr("class").is_some_and(|c| c.contains(token)))
    }

    /// Allocate a detached element node.
    pub fn create_element(&mut self, element: Element) -> NodeId {
        self.push(NodeData::Element(element), None)
    }

    /// Move every child of `from` to the end of `to`, keeping their order.
    pub fn reparent_children(&mut self, from: NodeId, to: NodeId) {
        if from == to || !self.contains(from) || !self.contains(to) {
            return;
        }
        let moved = match self.node_mut(from) {
            Some(node) => std::mem::take(&mut node.children),
            None => return,
        };
        for child in &moved {
            self.set_parent(*child, Some(to));
        }
        if let Some(node) = self.node_mut(to) {
            node.children.extend(moved);
        }
    }

    /// Put `new` at the position `old` holds in its parent and discard `old`.
    ///
    /// Returns false without changing anything when `old` has no parent.
    pub fn replace(&mut self, old: NodeId, new: NodeId) -> bool {
        let Some(parent) = self.parent(old) else {
            return false;
        };
        if !self.contains(new) {
            return false;
        }
        self.detach(new);

        let Some(siblings) = self.node_mut(parent).map(|n| &mut n.children) else {
            return false;
        };
        let Some(slot) = siblings.iter_mut().find(|c| **c == old) else {
            return false;
        };
        *slot = new;
        self.set_parent(new, Some(parent));
        self.discard(old);
        true
    }

    /// Unlink a node from its parent. The node and its subtree stay allocated.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|c| *c != id);
        }
        self.set_parent(id, None);
    }

    /// Free the slot of `id` and of every node still below it.
    fn discard(&mut self, id: NodeId) {
        let mut doomed = self.descendants(id);
        doomed.push(id);
        for d in doomed {
            if let Some(slot) = self.nodes.get_mut(d.0) {
                *slot = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(doc: &Document, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .filter_map(|id| doc.element(*id).map(|el| el.name.clone()))
            .collect()
    }

    #[test]
    fn parse_never_fails_on_broken_markup() {
        let doc = Document::parse("<div><p>unclosed <b>bold</div></span><h2>after");
        let h2 = doc.query_by_tag_name("h2");
        assert_eq!(h2.len(), 1);
        assert!(doc.recovered_errors() > 0);
    }

    #[test]
    fn strict_parse_rejects_diagnostics() {
        let err = Document::parse_with(
            "<div></span>",
            &ParseOptions {
                recover_from_malformed_input: false,
            },
        )
        .unwrap_err();
        assert!(err.is_malformed());

        let ok = Document::parse_with("<div></span>", &ParseOptions::default());
        assert!(ok.is_ok());
    }

    #[test]
    fn strict_parse_accepts_markup_without_doctype() {
        let strict = ParseOptions {
            recover_from_malformed_input: false,
        };
        let doc = Document::parse_with(
            "<html><head></head><body><p>fine</p></body></html>",
            &strict,
        )
        .unwrap();
        assert_eq!(doc.recovered_errors(), 1);
        assert!(doc.malformations().is_empty());

        let with_doctype = Document::parse("<!DOCTYPE html><p>fine</p>");
        assert!(with_doctype.diagnostics().is_empty());

        let broken = Document::parse("<!DOCTYPE html><div></span></div>");
        assert_eq!(broken.malformations().len(), broken.recovered_errors());
        assert!(Document::parse_with("<!DOCTYPE html><div></span></div>", &strict).is_err());
    }

    #[test]
    fn query_by_tag_names_keeps_document_order() {
        let doc = Document::parse("<h2>a</h2><div><h1>b</h1><h3>c</h3></div><h1>d</h1>");
        let set: HashSet<String> = ["h1", "H3"].iter().map(|s| s.to_string()).collect();
        let ids = doc.query_by_tag_names(&set);
        assert_eq!(names(&doc, &ids), vec!["h1", "h3", "h1"]);
    }

    #[test]
    fn query_by_class_token_uses_substring_containment() {
        let doc = Document::parse(
            r#"<div class="WordSection1">a</div><div class="x WordSection12">b</div><div class="Other">c</div>"#,
        );
        let ids = doc.query_by_class_token("WordSection1");
        assert_eq!(ids.len(), 2);
        assert!(doc.query_by_class_token("Missing").is_empty());
    }

    #[test]
    fn element_attr_helpers() {
        let mut el = Element::new("img");
        el.set_attr("src", "a.png");
        el.set_attr("src", "b.png");
        assert_eq!(el.attrs.len(), 1);
        assert_eq!(el.attr("src"), Some("b.png"));
        assert_eq!(el.remove_attr("src"), Some("b.png".to_string()));
        assert_eq!(el.remove_attr("src"), None);
        assert!(!el.has_attr("src"));
    }

    #[test]
    fn replace_swaps_in_place_and_discards_old() {
        let mut doc = Document::parse("<div><p>one</p><span>two</span><p>three</p></div>");
        let span = doc.query_by_tag_name("span")[0];
        let parent = doc.parent(span).unwrap();

        let em = doc.create_element(Element::new("em"));
        doc.reparent_children(span, em);
        assert!(doc.replace(span, em));

        assert!(!doc.contains(span));
        assert_eq!(doc.parent(em), Some(parent));
        assert_eq!(names(&doc, doc.children(parent)), vec!["p", "em", "p"]);
        assert_eq!(
            doc.data(doc.children(em)[0]),
            Some(&NodeData::Text("two".to_string()))
        );
    }

    #[test]
    fn replace_without_parent_is_refused() {
        let mut doc = Document::parse("<p>x</p>");
        let a = doc.create_element(Element::new("a"));
        let b = doc.create_element(Element::new("b"));
        assert!(!doc.replace(a, b));
        assert!(doc.contains(a));
    }

    #[test]
    fn reparent_children_updates_parent_links() {
        let mut doc = Document::parse("<ul><li>1</li><li>2</li></ul>");
        let ul = doc.query_by_tag_name("ul")[0];
        let ol = doc.create_element(Element::new("ol"));
        doc.reparent_children(ul, ol);
        assert!(doc.children(ul).is_empty());
        assert_eq!(doc.children(ol).len(), 2);
        for li in doc.children(ol) {
            assert_eq!(doc.parent(*li), Some(ol));
        }
    }
}
