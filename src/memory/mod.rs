//! A headless, single-threaded document.
//!
//! [`MemoryDocument`] implements [`Dom`] without a browser, which makes the guard layer usable in native
//! tests and tools. It also provides the structural operations ([`MemoryDocument::replace_with`],
//! [`MemoryDocument::clone_node`], …) that the guard layer itself never performs, so that tests can
//! simulate re-renders.

mod parse;
mod selector;
mod tree;

use crate::{
	dom::{Dom, NodeKind, Root},
	Error, Result,
};
use core::cell::RefCell;
use selector::SelectorList;
use tracing::{instrument, trace};
use tree::{normalize_property, Data, ElementData, Tree};

/// A node handle into one [`MemoryDocument`].
///
/// Equality is identity. Handles stay valid (but may become disconnected) for the lifetime of their document.
/// Using a handle with a document other than the one that created it is a logic error and may panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
	Html,
	Svg,
	MathMl,
}

impl Namespace {
	#[must_use]
	pub fn url(self) -> &'static str {
		match self {
			Namespace::Html => "http://www.w3.org/1999/xhtml",
			Namespace::Svg => "http://www.w3.org/2000/svg",
			Namespace::MathMl => "http://www.w3.org/1998/Math/MathML",
		}
	}

	/// Unknown namespaces are treated as HTML.
	#[must_use]
	pub fn from_url(url: &str) -> Self {
		[Namespace::Svg, Namespace::MathMl].iter().copied().find(|namespace| namespace.url() == url).unwrap_or(Namespace::Html)
	}
}

#[derive(Debug)]
pub struct MemoryDocument {
	tree: RefCell<Tree>,
}

impl Default for MemoryDocument {
	fn default() -> Self {
		Self::new()
	}
}

fn check_attribute_name(name: &str) -> Result<()> {
	if name.is_empty() || name.chars().any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '>' | '/' | '=' | '<')) {
		return Err(Error::invalid_argument("set_attribute", format!("'{}' is not a valid attribute name", name)));
	}
	Ok(())
}

fn check_token(operation: &'static str, token: &str) -> Result<()> {
	if token.is_empty() {
		return Err(Error::invalid_argument(operation, "the token must not be empty"));
	}
	if token.chars().any(|c| c.is_ascii_whitespace()) {
		return Err(Error::invalid_argument(operation, format!("the token '{}' contains whitespace", token)));
	}
	Ok(())
}

impl MemoryDocument {
	/// An empty document.
	#[must_use]
	pub fn new() -> Self {
		Self { tree: RefCell::new(Tree::new()) }
	}

	/// A document whose children are parsed from `markup` as a `<body>` fragment.
	///
	/// Malformed markup is recovered from the way a browser would, so this can't fail.
	#[must_use]
	pub fn parse(markup: &str) -> Self {
		let document = Self::new();
		parse::parse_into(&mut document.tree.borrow_mut(), Tree::DOCUMENT, markup);
		document
	}

	/// The document node itself.
	#[must_use]
	pub fn document(&self) -> NodeId {
		Tree::DOCUMENT
	}

	#[must_use]
	pub fn create_element(&self, local_name: &str) -> NodeId {
		self.create_element_ns(Namespace::Html, local_name)
	}

	#[must_use]
	pub fn create_element_ns(&self, namespace: Namespace, local_name: &str) -> NodeId {
		self.tree.borrow_mut().create(Data::Element(ElementData::new(namespace, local_name)))
	}

	#[must_use]
	pub fn create_text_node(&self, text: &str) -> NodeId {
		self.tree.borrow_mut().create(Data::Text(text.to_owned()))
	}

	/// Moves `child` to the end of `parent`'s children.
	///
	/// # Errors
	///
	/// [`Error::InvalidArgument`] iff `parent` can't have children or `child` is the document or an inclusive ancestor of `parent`.
	pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<()> {
		let mut tree = self.tree.borrow_mut();
		let parent_kind = kind(&tree, parent);
		if !parent_kind.is_container() {
			return Err(Error::invalid_argument("append_child", format!("a {} can't have children", parent_kind)));
		}
		if child == Tree::DOCUMENT || tree.is_ancestor(child, parent) {
			return Err(Error::invalid_argument("append_child", "the new child would contain its parent"));
		}
		tree.append(parent, child);
		Ok(())
	}

	/// Detaches `node` from its parent, if any.
	pub fn remove(&self, node: NodeId) {
		self.tree.borrow_mut().detach(node);
	}

	/// [***ChildNode.replaceWith***](https://developer.mozilla.org/en-US/docs/Web/API/Element/replaceWith) with a single node.
	///
	/// Does nothing if `old` has no parent.
	///
	/// # Errors
	///
	/// [`Error::InvalidArgument`] iff `new` is the document or an inclusive ancestor of `old`'s parent.
	pub fn replace_with(&self, old: NodeId, new: NodeId) -> Result<()> {
		let mut tree = self.tree.borrow_mut();
		let parent = match tree.parent(old) {
			Some(parent) => parent,
			None => return Ok(()),
		};
		if new == old {
			return Ok(());
		}
		if new == Tree::DOCUMENT || tree.is_ancestor(new, parent) {
			return Err(Error::invalid_argument("replace_with", "the replacement would contain its parent"));
		}
		tree.detach(new);
		let index = tree.get(parent).children.iter().position(|&child| child == old).unwrap_or(usize::MAX);
		tree.detach(old);
		tree.insert(parent, index, new);
		trace!("Replaced {:?} with {:?}.", old, new);
		Ok(())
	}

	/// A detached copy of `node`, including its descendants iff `deep`.
	#[must_use]
	pub fn clone_node(&self, node: NodeId, deep: bool) -> NodeId {
		self.tree.borrow_mut().clone_node(node, deep)
	}

	#[must_use]
	pub fn parent(&self, node: NodeId) -> Option<NodeId> {
		self.tree.borrow().parent(node)
	}

	#[must_use]
	pub fn children(&self, node: NodeId) -> Vec<NodeId> {
		self.tree.borrow().get(node).children.clone()
	}

	/// [***Element.tagName***](https://developer.mozilla.org/en-US/docs/Web/API/Element/tagName): upper case for HTML elements.
	#[must_use]
	pub fn tag_name(&self, node: NodeId) -> Option<String> {
		self.tree.borrow().element(node).map(|element| match element.namespace {
			Namespace::Html => element.local_name.to_ascii_uppercase(),
			Namespace::Svg | Namespace::MathMl => element.local_name.clone(),
		})
	}

	#[must_use]
	pub fn namespace(&self, node: NodeId) -> Option<Namespace> {
		self.tree.borrow().element(node).map(|element| element.namespace)
	}

	#[must_use]
	pub fn inner_html(&self, node: NodeId) -> String {
		let mut html = String::new();
		self.tree.borrow().serialize_children(node, &mut html);
		html
	}

	#[must_use]
	pub fn outer_html(&self, node: NodeId) -> String {
		let mut html = String::new();
		self.tree.borrow().serialize(node, &mut html);
		html
	}

	/// The element last focused with [`Dom::focus`], if it is still connected.
	#[must_use]
	pub fn active_element(&self) -> Option<NodeId> {
		let tree = self.tree.borrow();
		tree.active_element.filter(|&node| tree.is_connected(node))
	}

	fn with_element<T>(&self, operation: &'static str, node: NodeId, f: impl FnOnce(&mut ElementData) -> T) -> Result<T> {
		let mut tree = self.tree.borrow_mut();
		let found = kind(&tree, node);
		match tree.element_mut(node) {
			Some(element) => Ok(f(element)),
			None => Err(Error::UnsupportedCapability { operation, found }),
		}
	}
}

fn kind(tree: &Tree, node: NodeId) -> NodeKind {
	if !tree.contains_id(node) {
		return NodeKind::Other;
	}
	match &tree.get(node).data {
		Data::Document => NodeKind::Document,
		Data::Text(_) => NodeKind::Text,
		Data::Comment(_) => NodeKind::Comment,
		Data::Element(element) => match element.namespace {
			Namespace::Html => NodeKind::HtmlElement,
			Namespace::Svg => NodeKind::SvgElement,
			Namespace::MathMl => NodeKind::Element,
		},
	}
}

impl Dom for MemoryDocument {
	type Node = NodeId;

	fn kind(&self, node: &NodeId) -> NodeKind {
		kind(&self.tree.borrow(), *node)
	}

	fn is_connected(&self, node: &NodeId) -> bool {
		let tree = self.tree.borrow();
		tree.contains_id(*node) && tree.is_connected(*node)
	}

	#[instrument(skip(self))]
	fn query_selector_all(&self, root: Root<'_, NodeId>, selector: &str) -> Result<Vec<NodeId>> {
		let selector = SelectorList::parse(selector).map_err(|reason| Error::invalid_argument("query_selector_all", reason))?;
		let root = match root {
			Root::Document => Tree::DOCUMENT,
			Root::Node(&node) => node,
		};

		let tree = self.tree.borrow();
		let root_kind = kind(&tree, root);
		if !root_kind.is_container() {
			return Err(Error::invalid_argument("query_selector_all", format!("a {} can't be queried", root_kind)));
		}
		let matches: Vec<_> = tree.descendants(root).into_iter().filter(|&node| selector.matches(&tree, node)).collect();
		trace!("{} match(es).", matches.len());
		Ok(matches)
	}

	fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
		let tree = self.tree.borrow();
		tree.descendants(Tree::DOCUMENT)
			.into_iter()
			.find(|&node| tree.element(node).and_then(|element| element.attribute("id")) == Some(id))
	}

	fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
		self.tree.borrow().is_ancestor(*ancestor, *node)
	}

	fn text_content(&self, node: &NodeId) -> String {
		self.tree.borrow().text_content(*node)
	}

	fn set_text_content(&self, node: &NodeId, text: &str) {
		self.tree.borrow_mut().set_text_content(*node, text)
	}

	fn set_inner_html(&self, node: &NodeId, markup: &str) -> Result<()> {
		let mut tree = self.tree.borrow_mut();
		let found = kind(&tree, *node);
		if found.capability().is_none() {
			return Err(Error::UnsupportedCapability {
				operation: "set_inner_html",
				found,
			});
		}
		tree.remove_children(*node);
		parse::parse_into(&mut tree, *node, markup);
		Ok(())
	}

	fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
		self.tree.borrow().element(*node)?.attribute(name).map(ToOwned::to_owned)
	}

	fn set_attribute(&self, node: &NodeId, name: &str, value: &str) -> Result<()> {
		check_attribute_name(name)?;
		self.with_element("set_attribute", *node, |element| element.set_attribute(name, value.to_owned()))
	}

	fn class_list_contains(&self, node: &NodeId, class: &str) -> bool {
		self.tree.borrow().element(*node).map_or(false, |element| element.classes().contains(&class))
	}

	fn class_list_add(&self, node: &NodeId, class: &str) -> Result<()> {
		check_token("class_list_add", class)?;
		self.with_element("class_list_add", *node, |element| {
			let mut classes = element.classes();
			if !classes.contains(&class) {
				classes.push(class);
			}
			let classes: Vec<String> = classes.into_iter().map(ToOwned::to_owned).collect();
			element.set_classes(&classes.iter().map(String::as_str).collect::<Vec<_>>());
		})
	}

	fn class_list_remove(&self, node: &NodeId, class: &str) -> Result<()> {
		check_token("class_list_remove", class)?;
		self.with_element("class_list_remove", *node, |element| {
			if element.attribute("class").is_none() {
				return;
			}
			let classes: Vec<String> = element.classes().into_iter().filter(|&c| c != class).map(ToOwned::to_owned).collect();
			element.set_classes(&classes.iter().map(String::as_str).collect::<Vec<_>>());
		})
	}

	fn class_list_toggle(&self, node: &NodeId, class: &str, force: Option<bool>) -> Result<bool> {
		check_token("class_list_toggle", class)?;
		let present = self.class_list_contains(node, class);
		let wanted = force.unwrap_or(!present);
		if wanted != present {
			if wanted {
				self.class_list_add(node, class)?;
			} else {
				self.class_list_remove(node, class)?;
			}
		} else {
			// Still reject non-elements.
			self.with_element("class_list_toggle", *node, |_| ())?;
		}
		Ok(wanted)
	}

	fn style_property(&self, node: &NodeId, property: &str) -> String {
		let property = normalize_property(property);
		self.tree
			.borrow()
			.element(*node)
			.and_then(|element| element.style().into_iter().find(|(p, _)| *p == property))
			.map(|(_, value)| value)
			.unwrap_or_default()
	}

	fn set_style_property(&self, node: &NodeId, property: &str, value: &str) -> Result<()> {
		let property = normalize_property(property.trim());
		let value = value.trim();
		if value.contains(';') {
			return Err(Error::invalid_argument("set_style_property", format!("'{}' is not a single value", value)));
		}
		self.with_element("set_style_property", *node, |element| {
			let mut declarations = element.style();
			let existing = declarations.iter().position(|(p, _)| *p == property);
			match (existing, value.is_empty()) {
				(Some(i), true) => {
					declarations.remove(i);
				}
				(Some(i), false) => declarations[i].1 = value.to_owned(),
				(None, true) => (),
				(None, false) => declarations.push((property, value.to_owned())),
			}
			element.set_style(&declarations);
		})
	}

	fn focus(&self, node: &NodeId) -> Result<()> {
		let mut tree = self.tree.borrow_mut();
		let found = kind(&tree, *node);
		if found.capability().is_none() {
			return Err(Error::UnsupportedCapability { operation: "focus", found });
		}
		tree.active_element = Some(*node);
		Ok(())
	}
}
