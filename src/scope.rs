use crate::{
	dom::{Dom, Root},
	live, mutate, select, Result,
};
use core::fmt::Display;

/// The selector guards with a fixed root, plus the mutation primitives passed through unchanged.
///
/// ```rust
/// use dom_guard::{memory::MemoryDocument, Dom, Root, Scope};
///
/// let document = MemoryDocument::parse(r#"<div data-ui="card"><h2 data-ui="card.title">Old</h2></div>"#);
/// let card = dom_guard::required(&document, r#"[data-ui="card"]"#, Root::Document).unwrap();
///
/// let scope = Scope::new(&document, &card);
/// let title = scope.required(r#"[data-ui="card.title"]"#).unwrap();
/// scope.set_text(&title, "New").unwrap();
/// assert_eq!(document.text_content(&title), "New");
/// ```
pub struct Scope<'a, D: Dom + ?Sized> {
	dom: &'a D,
	root: Root<'a, D::Node>,
}

impl<'a, D: Dom + ?Sized> Clone for Scope<'a, D> {
	fn clone(&self) -> Self {
		Self { dom: self.dom, root: self.root }
	}
}
impl<'a, D: Dom + ?Sized> Copy for Scope<'a, D> {}

impl<'a, D: Dom + ?Sized> Scope<'a, D> {
	#[must_use]
	pub fn new(dom: &'a D, root: &'a D::Node) -> Self {
		Self { dom, root: Root::Node(root) }
	}

	/// A scope over the whole document.
	#[must_use]
	pub fn document(dom: &'a D) -> Self {
		Self { dom, root: Root::Document }
	}

	#[must_use]
	pub fn dom(&self) -> &'a D {
		self.dom
	}

	#[must_use]
	pub fn root(&self) -> Root<'a, D::Node> {
		self.root
	}

	/// See [`required`](`crate::required`).
	///
	/// # Errors
	///
	/// See [`required`](`crate::required`).
	pub fn required(&self, selector: &str) -> Result<D::Node> {
		select::required(self.dom, selector, self.root)
	}

	/// See [`optional`](`crate::optional`).
	///
	/// # Errors
	///
	/// See [`optional`](`crate::optional`).
	pub fn optional(&self, selector: &str) -> Result<Option<D::Node>> {
		select::optional(self.dom, selector, self.root)
	}

	/// See [`exactly_one`](`crate::exactly_one`).
	///
	/// # Errors
	///
	/// See [`exactly_one`](`crate::exactly_one`).
	pub fn exactly_one(&self, selector: &str) -> Result<D::Node> {
		select::exactly_one(self.dom, selector, self.root)
	}

	/// Document-wide, regardless of the bound root.
	///
	/// # Errors
	///
	/// See [`by_id`](`crate::by_id`).
	pub fn by_id(&self, id: &str) -> Result<D::Node> {
		select::by_id(self.dom, id)
	}

	/// # Errors
	///
	/// See [`ensure_live`](`crate::ensure_live`).
	pub fn ensure_live(&self, node: Option<D::Node>, reselect: impl FnOnce() -> Option<D::Node>) -> Result<D::Node> {
		live::ensure_live(self.dom, node, reselect)
	}

	#[allow(clippy::missing_errors_doc)]
	pub fn set_text(&self, node: &D::Node, value: impl Display) -> Result<()> {
		mutate::set_text(self.dom, node, value)
	}

	#[allow(clippy::missing_errors_doc)]
	pub fn set_markup(&self, node: &D::Node, value: impl Display) -> Result<()> {
		mutate::set_markup(self.dom, node, value)
	}

	#[allow(clippy::missing_errors_doc)]
	pub fn set_attribute(&self, node: &D::Node, name: &str, value: impl Display) -> Result<()> {
		mutate::set_attribute(self.dom, node, name, value)
	}

	#[allow(clippy::missing_errors_doc)]
	pub fn add_class(&self, node: &D::Node, class: &str) -> Result<()> {
		mutate::add_class(self.dom, node, class)
	}

	#[allow(clippy::missing_errors_doc)]
	pub fn remove_class(&self, node: &D::Node, class: &str) -> Result<()> {
		mutate::remove_class(self.dom, node, class)
	}

	#[allow(clippy::missing_errors_doc)]
	pub fn toggle_class(&self, node: &D::Node, class: &str, force: Option<bool>) -> Result<bool> {
		mutate::toggle_class(self.dom, node, class, force)
	}

	#[allow(clippy::missing_errors_doc)]
	pub fn set_style(&self, node: &D::Node, property: &str, value: impl Display) -> Result<()> {
		mutate::set_style(self.dom, node, property, value)
	}

	#[allow(clippy::missing_errors_doc)]
	pub fn set_attribute_any(&self, node: &D::Node, name: &str, value: impl Display) -> Result<()> {
		mutate::set_attribute_any(self.dom, node, name, value)
	}

	#[allow(clippy::missing_errors_doc)]
	pub fn add_class_any(&self, node: &D::Node, class: &str) -> Result<()> {
		mutate::add_class_any(self.dom, node, class)
	}

	#[allow(clippy::missing_errors_doc)]
	pub fn remove_class_any(&self, node: &D::Node, class: &str) -> Result<()> {
		mutate::remove_class_any(self.dom, node, class)
	}

	#[allow(clippy::missing_errors_doc)]
	pub fn toggle_class_any(&self, node: &D::Node, class: &str, force: Option<bool>) -> Result<bool> {
		mutate::toggle_class_any(self.dom, node, class, force)
	}
}
