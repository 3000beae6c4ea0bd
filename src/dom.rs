//! The boundary to whatever owns the document tree.
//!
//! The guard layer never changes the tree's structure. It only needs to find nodes and to change
//! the attributes and content of nodes it is handed, so that is all [`Dom`] asks for.

use crate::Result;
use core::fmt::{self, Debug, Display, Formatter};

/// What a node handle is, as far as mutation is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
	Document,
	/// An element in the HTML namespace, with inline style, class list and text APIs.
	HtmlElement,
	SvgElement,
	/// Any other element, e.g. MathML.
	Element,
	Text,
	Comment,
	Other,
}

/// The two capability sets a node handle can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
	/// Bare [***Element***](https://developer.mozilla.org/en-US/docs/Web/API/element): attributes and class list.
	Element,
	/// [***HTMLElement***](https://developer.mozilla.org/en-US/docs/Web/API/HTMLElement): everything the mutation primitives need.
	HtmlCapable,
}

impl NodeKind {
	#[must_use]
	pub fn capability(self) -> Option<Capability> {
		match self {
			NodeKind::HtmlElement => Some(Capability::HtmlCapable),
			NodeKind::SvgElement | NodeKind::Element => Some(Capability::Element),
			NodeKind::Document | NodeKind::Text | NodeKind::Comment | NodeKind::Other => None,
		}
	}

	/// Whether a selector can be evaluated underneath a node of this kind.
	#[must_use]
	pub fn is_container(self) -> bool {
		self == NodeKind::Document || self.capability().is_some()
	}
}

impl Display for NodeKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			NodeKind::Document => "Document",
			NodeKind::HtmlElement => "HTMLElement",
			NodeKind::SvgElement => "SVGElement",
			NodeKind::Element => "Element",
			NodeKind::Text => "Text",
			NodeKind::Comment => "Comment",
			NodeKind::Other => "Node",
		})
	}
}

/// Where a selector is evaluated.
#[derive(Debug)]
pub enum Root<'a, N> {
	/// The whole document.
	Document,
	/// Descendants of this node only.
	Node(&'a N),
}

impl<'a, N> Clone for Root<'a, N> {
	fn clone(&self) -> Self {
		*self
	}
}
impl<'a, N> Copy for Root<'a, N> {}

impl<'a, N> Default for Root<'a, N> {
	fn default() -> Self {
		Root::Document
	}
}

impl<'a, N> From<&'a N> for Root<'a, N> {
	fn from(node: &'a N) -> Self {
		Root::Node(node)
	}
}

/// Tree query and mutation capabilities supplied by the hosting environment.
///
/// Implementations are single-threaded: at most one logical thread of control touches the tree,
/// and ordering between structural replacement and later mutation is up to the caller
/// (see [`ensure_live`](`crate::ensure_live`)).
///
/// Mutators return [`Error::InvalidArgument`](`crate::Error::InvalidArgument`) where the DOM would throw
/// (invalid attribute names, class tokens containing whitespace, malformed selectors).
pub trait Dom {
	/// An opaque node reference. Equality is identity.
	type Node: Clone + PartialEq + Debug;

	fn kind(&self, node: &Self::Node) -> NodeKind;

	/// [***Node.isConnected***](https://developer.mozilla.org/en-US/docs/Web/API/Node/isConnected)
	fn is_connected(&self, node: &Self::Node) -> bool;

	/// All element descendants of `root` matching `selector`, in document order.
	///
	/// # Errors
	///
	/// Iff `selector` is not a valid selector or `root` can't contain elements.
	fn query_selector_all(&self, root: Root<'_, Self::Node>, selector: &str) -> Result<Vec<Self::Node>>;

	/// The first of [`Dom::query_selector_all`].
	///
	/// # Errors
	///
	/// See [`Dom::query_selector_all`].
	fn query_selector(&self, root: Root<'_, Self::Node>, selector: &str) -> Result<Option<Self::Node>> {
		Ok(self.query_selector_all(root, selector)?.into_iter().next())
	}

	fn get_element_by_id(&self, id: &str) -> Option<Self::Node>;

	/// Inclusive: a node contains itself.
	fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

	fn text_content(&self, node: &Self::Node) -> String;
	fn set_text_content(&self, node: &Self::Node, text: &str);

	/// # Errors
	///
	/// Iff `node` isn't an element or `markup` can't be parsed.
	fn set_inner_html(&self, node: &Self::Node, markup: &str) -> Result<()>;

	fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
	fn has_attribute(&self, node: &Self::Node, name: &str) -> bool {
		self.attribute(node, name).is_some()
	}
	#[allow(clippy::missing_errors_doc)]
	fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) -> Result<()>;

	fn class_list_contains(&self, node: &Self::Node, class: &str) -> bool;
	#[allow(clippy::missing_errors_doc)]
	fn class_list_add(&self, node: &Self::Node, class: &str) -> Result<()>;
	#[allow(clippy::missing_errors_doc)]
	fn class_list_remove(&self, node: &Self::Node, class: &str) -> Result<()>;
	/// Returns whether `class` is present afterwards.
	///
	/// # Errors
	///
	/// Iff `class` is not a valid token or `node` has no class list.
	fn class_list_toggle(&self, node: &Self::Node, class: &str, force: Option<bool>) -> Result<bool>;

	/// The inline value, or an empty string if unset.
	fn style_property(&self, node: &Self::Node, property: &str) -> String;
	#[allow(clippy::missing_errors_doc)]
	fn set_style_property(&self, node: &Self::Node, property: &str, value: &str) -> Result<()>;

	#[allow(clippy::missing_errors_doc)]
	fn focus(&self, node: &Self::Node) -> Result<()>;
}
