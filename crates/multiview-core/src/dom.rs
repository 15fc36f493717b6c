//! In-memory document model.
//!
//! The renderer mutates a [`Document`] made of reference-counted [`Node`]s.
//! Nodes behave like live DOM nodes: appending a node that already has a
//! parent moves it, and a node can be swapped for another in place.
//!
//! Reactive text bindings are owned by the node they update. They are
//! released when the node (or one of its ancestors) is removed from the tree
//! with [`Node::remove`] or swapped out with [`Node::replace_with`].
//!
//! ## Example
//!
//! ```ignore
//! use multiview_core::dom::Node;
//!
//! let layout = Node::element("main")
//!     .with_child(Node::element("nav").with_text("Menu"))
//!     .with_child(Node::slot());
//!
//! let slot = layout.query_selector("slot").unwrap();
//! slot.replace_with(&Node::text("Page"));
//! assert_eq!(layout.to_html(), "<main><nav>Menu</nav>Page</main>");
//! ```

use crate::reactive::Subscription;
use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Tag name of the placeholder a layout uses to mark where page content goes.
pub const SLOT_TAG: &str = "slot";

/// Elements rendered without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
	"wbr",
];

/// The data carried by a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
	/// An element with its tag name and attributes.
	Element {
		/// The tag name (e.g., "div", "slot").
		tag: String,
		/// Attributes in insertion order.
		attrs: Vec<(String, String)>,
	},
	/// A text node.
	Text(String),
}

struct NodeInner {
	kind: RefCell<NodeKind>,
	parent: RefCell<Weak<NodeInner>>,
	children: RefCell<Vec<Node>>,
	bindings: RefCell<Vec<Subscription>>,
}

/// A node of the document tree.
///
/// Cloning a `Node` clones the handle, not the subtree.
#[derive(Clone)]
pub struct Node {
	inner: Rc<NodeInner>,
}

/// A non-owning handle to a [`Node`].
#[derive(Clone)]
pub struct WeakNode {
	inner: Weak<NodeInner>,
}

impl WeakNode {
	/// Returns the node if it is still alive.
	pub fn upgrade(&self) -> Option<Node> {
		self.inner.upgrade().map(|inner| Node { inner })
	}
}

impl Node {
	fn from_kind(kind: NodeKind) -> Self {
		Self {
			inner: Rc::new(NodeInner {
				kind: RefCell::new(kind),
				parent: RefCell::new(Weak::new()),
				children: RefCell::new(Vec::new()),
				bindings: RefCell::new(Vec::new()),
			}),
		}
	}

	/// Creates an element node.
	pub fn element(tag: impl Into<String>) -> Self {
		Self::from_kind(NodeKind::Element {
			tag: tag.into(),
			attrs: Vec::new(),
		})
	}

	/// Creates a text node.
	pub fn text(data: impl Into<String>) -> Self {
		Self::from_kind(NodeKind::Text(data.into()))
	}

	/// Creates a layout slot placeholder.
	pub fn slot() -> Self {
		Self::element(SLOT_TAG)
	}

	/// Sets an attribute and returns the node (builder style).
	pub fn with_attr(self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.set_attr(name, value);
		self
	}

	/// Appends a child and returns the node (builder style).
	pub fn with_child(self, child: Node) -> Self {
		self.append_child(&child);
		self
	}

	/// Appends a text child and returns the node (builder style).
	pub fn with_text(self, data: impl Into<String>) -> Self {
		self.with_child(Node::text(data))
	}

	/// Returns a copy of the node's data.
	pub fn kind(&self) -> NodeKind {
		self.inner.kind.borrow().clone()
	}

	/// Returns the tag name, or `None` for text nodes.
	pub fn tag_name(&self) -> Option<String> {
		match &*self.inner.kind.borrow() {
			NodeKind::Element { tag, .. } => Some(tag.clone()),
			NodeKind::Text(_) => None,
		}
	}

	/// Returns whether this is a text node.
	pub fn is_text(&self) -> bool {
		matches!(&*self.inner.kind.borrow(), NodeKind::Text(_))
	}

	/// Returns an attribute value.
	pub fn attr(&self, name: &str) -> Option<String> {
		match &*self.inner.kind.borrow() {
			NodeKind::Element { attrs, .. } => attrs
				.iter()
				.find(|(key, _)| key == name)
				.map(|(_, value)| value.clone()),
			NodeKind::Text(_) => None,
		}
	}

	/// Sets an attribute, replacing any previous value. No-op on text nodes.
	pub fn set_attr(&self, name: impl Into<String>, value: impl Into<String>) {
		if let NodeKind::Element { attrs, .. } = &mut *self.inner.kind.borrow_mut() {
			let name = name.into();
			let value = value.into();
			match attrs.iter_mut().find(|(key, _)| *key == name) {
				Some(entry) => entry.1 = value,
				None => attrs.push((name, value)),
			}
		}
	}

	/// Returns the parent node.
	pub fn parent(&self) -> Option<Node> {
		self.inner
			.parent
			.borrow()
			.upgrade()
			.map(|inner| Node { inner })
	}

	/// Returns the child nodes.
	pub fn children(&self) -> Vec<Node> {
		self.inner.children.borrow().clone()
	}

	/// Returns the number of child nodes.
	pub fn child_count(&self) -> usize {
		self.inner.children.borrow().len()
	}

	/// Returns the last child node.
	pub fn last_child(&self) -> Option<Node> {
		self.inner.children.borrow().last().cloned()
	}

	/// Returns whether both handles point to the same node.
	pub fn ptr_eq(&self, other: &Node) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}

	/// Creates a non-owning handle.
	pub fn downgrade(&self) -> WeakNode {
		WeakNode {
			inner: Rc::downgrade(&self.inner),
		}
	}

	/// Returns whether `other` is this node or one of its descendants.
	pub fn contains(&self, other: &Node) -> bool {
		let mut current = Some(other.clone());
		while let Some(node) = current {
			if node.ptr_eq(self) {
				return true;
			}
			current = node.parent();
		}
		false
	}

	/// Appends `child` as the last child, moving it from its current parent.
	///
	/// Returns `false`, leaving both trees untouched, when `child` is this
	/// node or one of its ancestors.
	pub fn append_child(&self, child: &Node) -> bool {
		if child.contains(self) {
			tracing::warn!("refusing to append a node into its own subtree");
			return false;
		}
		child.detach();
		*child.inner.parent.borrow_mut() = Rc::downgrade(&self.inner);
		self.inner.children.borrow_mut().push(child.clone());
		true
	}

	/// Replaces this node with `replacement` at the same position.
	///
	/// Returns `false` when this node has no parent or when `replacement`
	/// contains the parent. The replaced node's bindings are released.
	pub fn replace_with(&self, replacement: &Node) -> bool {
		if replacement.ptr_eq(self) {
			return true;
		}
		let Some(parent) = self.parent() else {
			return false;
		};
		if replacement.contains(&parent) {
			tracing::warn!("refusing to swap a node for one of its ancestors");
			return false;
		}
		// The replacement may be a sibling, so detach it before locating self.
		replacement.detach();
		let Some(index) = self.detach() else {
			return false;
		};
		*replacement.inner.parent.borrow_mut() = Rc::downgrade(&parent.inner);
		parent
			.inner
			.children
			.borrow_mut()
			.insert(index, replacement.clone());
		self.release_bindings();
		true
	}

	/// Removes this node from its parent and releases its bindings.
	pub fn remove(&self) {
		if self.detach().is_some() {
			self.release_bindings();
		}
	}

	fn detach(&self) -> Option<usize> {
		let parent = self.parent()?;
		let index = {
			let mut siblings = parent.inner.children.borrow_mut();
			let index = siblings.iter().position(|node| node.ptr_eq(self))?;
			siblings.remove(index);
			index
		};
		*self.inner.parent.borrow_mut() = Weak::new();
		Some(index)
	}

	/// Attaches a subscription whose lifetime is scoped to this node.
	pub fn bind(&self, subscription: Subscription) {
		self.inner.bindings.borrow_mut().push(subscription);
	}

	/// Returns the number of live bindings attached to this node.
	pub fn binding_count(&self) -> usize {
		self.inner.bindings.borrow().len()
	}

	fn release_bindings(&self) {
		let bindings = std::mem::take(&mut *self.inner.bindings.borrow_mut());
		drop(bindings);
		for child in self.children() {
			child.release_bindings();
		}
	}

	/// Returns the first descendant element with the given tag (depth first).
	pub fn query_selector(&self, tag: &str) -> Option<Node> {
		for child in self.children() {
			if child.tag_name().as_deref() == Some(tag) {
				return Some(child);
			}
			if let Some(found) = child.query_selector(tag) {
				return Some(found);
			}
		}
		None
	}

	/// Returns the concatenated text of this node and its descendants.
	pub fn text_content(&self) -> String {
		match &*self.inner.kind.borrow() {
			NodeKind::Text(data) => data.clone(),
			NodeKind::Element { .. } => self
				.children()
				.iter()
				.map(Node::text_content)
				.collect(),
		}
	}

	/// Sets the text of a text node, or replaces an element's children with
	/// a single text node.
	pub fn set_text(&self, data: impl Into<String>) {
		let data = data.into();
		if let NodeKind::Text(current) = &mut *self.inner.kind.borrow_mut() {
			*current = data;
			return;
		}
		for child in self.children() {
			child.remove();
		}
		self.append_child(&Node::text(data));
	}

	/// Serializes the subtree to HTML.
	pub fn to_html(&self) -> String {
		let mut out = String::new();
		self.write_html(&mut out);
		out
	}

	fn write_html(&self, out: &mut String) {
		match &*self.inner.kind.borrow() {
			NodeKind::Text(data) => out.push_str(&escape(data, false)),
			NodeKind::Element { tag, attrs } => {
				out.push('<');
				out.push_str(tag);
				for (name, value) in attrs {
					out.push(' ');
					out.push_str(name);
					out.push_str("=\"");
					out.push_str(&escape(value, true));
					out.push('"');
				}
				out.push('>');
				if VOID_ELEMENTS.contains(&tag.as_str()) {
					return;
				}
				for child in self.inner.children.borrow().iter() {
					child.write_html(out);
				}
				out.push_str("</");
				out.push_str(tag);
				out.push('>');
			}
		}
	}
}

impl fmt::Debug for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Node")
			.field("kind", &*self.inner.kind.borrow())
			.field("children", &*self.inner.children.borrow())
			.field("bindings", &self.binding_count())
			.finish()
	}
}

/// Escapes text for serialization. Text nodes only need `&`, `<` and `>`
/// escaped; double-quoted attribute values only need `&` and `"`.
fn escape(s: &str, in_attribute: bool) -> Cow<'_, str> {
	let special = |c: char| match c {
		'&' => true,
		'<' | '>' => !in_attribute,
		'"' => in_attribute,
		_ => false,
	};
	if !s.contains(special) {
		return Cow::Borrowed(s);
	}
	let mut escaped = String::with_capacity(s.len() + 8);
	for c in s.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			c if !special(c) => escaped.push(c),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			_ => escaped.push_str("&quot;"),
		}
	}
	Cow::Owned(escaped)
}

/// A parsed stylesheet adopted by the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
	rules: Vec<String>,
}

impl StyleSheet {
	/// Parses inline CSS text into rules.
	///
	/// Each rule ends at a closing brace; surrounding whitespace is dropped.
	pub fn parse(css: &str) -> Self {
		let rules = css
			.split_inclusive('}')
			.map(str::trim)
			.filter(|rule| !rule.is_empty())
			.map(str::to_string)
			.collect();
		Self { rules }
	}

	/// Returns the parsed rules.
	pub fn rules(&self) -> &[String] {
		&self.rules
	}

	/// Returns the rules joined back into CSS text.
	pub fn css_text(&self) -> String {
		self.rules.join("\n")
	}
}

struct DocumentInner {
	title: RefCell<String>,
	style_sheets: RefCell<Vec<StyleSheet>>,
	body: Node,
}

/// The live document: title, adopted stylesheets and body.
///
/// Cloning a `Document` clones the handle.
#[derive(Clone)]
pub struct Document {
	inner: Rc<DocumentInner>,
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

impl Document {
	/// Creates an empty document with a `<body>` element.
	pub fn new() -> Self {
		Self {
			inner: Rc::new(DocumentInner {
				title: RefCell::new(String::new()),
				style_sheets: RefCell::new(Vec::new()),
				body: Node::element("body"),
			}),
		}
	}

	/// Returns the document title.
	pub fn title(&self) -> String {
		self.inner.title.borrow().clone()
	}

	/// Sets the document title.
	pub fn set_title(&self, title: impl Into<String>) {
		*self.inner.title.borrow_mut() = title.into();
	}

	/// Adds a stylesheet to the adopted stylesheets.
	pub fn adopt_style_sheet(&self, sheet: StyleSheet) {
		self.inner.style_sheets.borrow_mut().push(sheet);
	}

	/// Returns the adopted stylesheets in adoption order.
	pub fn adopted_style_sheets(&self) -> Vec<StyleSheet> {
		self.inner.style_sheets.borrow().clone()
	}

	/// Returns the `<body>` element.
	pub fn body(&self) -> Node {
		self.inner.body.clone()
	}
}

impl fmt::Debug for Document {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Document")
			.field("title", &*self.inner.title.borrow())
			.field("style_sheets", &self.inner.style_sheets.borrow().len())
			.field("body", &self.inner.body)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_append_child_moves_node() {
		let first = Node::element("div");
		let second = Node::element("section");
		let child = Node::text("x");

		first.append_child(&child);
		second.append_child(&child);

		assert_eq!(first.child_count(), 0);
		assert_eq!(second.child_count(), 1);
		assert!(child.parent().unwrap().ptr_eq(&second));
	}

	#[rstest]
	fn test_replace_with_keeps_position() {
		let root = Node::element("main")
			.with_child(Node::element("header"))
			.with_child(Node::slot())
			.with_child(Node::element("footer"));
		let slot = root.query_selector(SLOT_TAG).unwrap();

		assert!(slot.replace_with(&Node::text("content")));

		assert_eq!(
			root.to_html(),
			"<main><header></header>content<footer></footer></main>"
		);
		assert!(slot.parent().is_none());
	}

	#[rstest]
	fn test_replace_with_without_parent_is_noop() {
		let orphan = Node::slot();
		assert!(!orphan.replace_with(&Node::text("x")));
	}

	#[rstest]
	fn test_query_selector_depth_first() {
		let root = Node::element("div")
			.with_child(Node::element("section").with_child(Node::slot().with_attr("name", "a")))
			.with_child(Node::slot().with_attr("name", "b"));

		let slot = root.query_selector(SLOT_TAG).unwrap();
		assert_eq!(slot.attr("name").as_deref(), Some("a"));
		assert!(root.query_selector("article").is_none());
	}

	#[rstest]
	fn test_query_selector_excludes_self() {
		let slot = Node::slot();
		assert!(slot.query_selector(SLOT_TAG).is_none());
	}

	#[rstest]
	fn test_to_html_escapes_text_and_attributes() {
		let node = Node::element("p")
			.with_attr("title", "a\"b")
			.with_text("<script>");
		assert_eq!(node.to_html(), "<p title=\"a&quot;b\">&lt;script&gt;</p>");
	}

	#[rstest]
	#[case("a < b", false, "a &lt; b")]
	#[case("say \"hi\"", false, "say \"hi\"")]
	#[case("a < b", true, "a < b")]
	#[case("say \"hi\" & go", true, "say &quot;hi&quot; &amp; go")]
	fn test_escape_by_context(#[case] raw: &str, #[case] in_attribute: bool, #[case] expected: &str) {
		assert_eq!(escape(raw, in_attribute), expected);
	}

	#[rstest]
	fn test_append_ancestor_into_descendant_is_refused() {
		let outer = Node::element("section");
		let inner = Node::element("div");
		outer.append_child(&inner);

		assert!(!inner.append_child(&outer));
		assert!(!outer.append_child(&outer));

		assert!(outer.parent().is_none());
		assert_eq!(inner.child_count(), 0);
		assert_eq!(outer.to_html(), "<section><div></div></section>");
	}

	#[rstest]
	fn test_swap_for_ancestor_is_refused() {
		let root = Node::element("main").with_child(Node::element("div").with_child(Node::slot()));
		let slot = root.query_selector(SLOT_TAG).unwrap();

		assert!(!slot.replace_with(&root));

		assert_eq!(root.to_html(), "<main><div><slot></slot></div></main>");
		assert!(slot.parent().is_some());
	}

	#[rstest]
	fn test_contains_is_inclusive() {
		let root = Node::element("main").with_child(Node::element("p").with_text("x"));
		let text = root.query_selector("p").unwrap().last_child().unwrap();

		assert!(root.contains(&root));
		assert!(root.contains(&text));
		assert!(!text.contains(&root));
	}

	#[rstest]
	fn test_void_element_has_no_closing_tag() {
		let node = Node::element("br");
		assert_eq!(node.to_html(), "<br>");
	}

	#[rstest]
	fn test_set_text_on_element_replaces_children() {
		let node = Node::element("span").with_text("a").with_text("b");
		node.set_text("c");
		assert_eq!(node.child_count(), 1);
		assert_eq!(node.text_content(), "c");
	}

	#[rstest]
	fn test_remove_releases_bindings() {
		let released = Rc::new(RefCell::new(false));
		let flag = released.clone();
		let parent = Node::element("div");
		let child = Node::text("x");
		parent.append_child(&child);
		child.bind(Subscription::new(move || *flag.borrow_mut() = true));

		child.remove();

		assert!(*released.borrow());
		assert_eq!(child.binding_count(), 0);
	}

	#[rstest]
	fn test_stylesheet_parse_splits_rules() {
		let sheet = StyleSheet::parse("body { margin: 0 }\n h1 { color: red; }  ");
		assert_eq!(sheet.rules(), &["body { margin: 0 }", "h1 { color: red; }"]);
	}

	#[rstest]
	fn test_document_title_and_sheets() {
		let document = Document::new();
		document.set_title("Home");
		document.adopt_style_sheet(StyleSheet::parse("p{}"));

		assert_eq!(document.title(), "Home");
		assert_eq!(document.adopted_style_sheets().len(), 1);
		assert_eq!(document.body().tag_name().as_deref(), Some("body"));
	}
}
