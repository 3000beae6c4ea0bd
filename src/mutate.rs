//! Small mutation primitives.
//!
//! Every function without an `_any` suffix narrows its target with [`assert_mutable`](`crate::assert_mutable`)
//! before touching it. The `_any` class helpers only require a bare element and are kept as separate functions,
//! so that mutating a non-HTML node is always spelled out at the call site.

use crate::{
	dom::{Capability, Dom},
	narrow::narrow,
	Error, Result,
};
use core::fmt::Display;
use tracing::{instrument, trace};

fn html<'a, D: Dom + ?Sized>(dom: &D, operation: &'static str, node: &'a D::Node) -> Result<&'a D::Node> {
	narrow(dom, operation, node, Capability::HtmlCapable)
}

fn element<'a, D: Dom + ?Sized>(dom: &D, operation: &'static str, node: &'a D::Node) -> Result<&'a D::Node> {
	narrow(dom, operation, node, Capability::Element)
}

fn relabel(operation: &'static str) -> impl FnOnce(Error) -> Error {
	move |error| match error {
		Error::InvalidArgument { reason, .. } => Error::InvalidArgument { operation, reason },
		Error::UnsupportedCapability { found, .. } => Error::UnsupportedCapability { operation, found },
		other => other,
	}
}

/// Replaces the node's text content with `value`'s string form. Never interprets markup.
///
/// # Errors
///
/// [`Error::UnsupportedCapability`] iff `node` isn't an HTML element.
#[instrument(skip(dom, value))]
pub fn set_text<D: Dom + ?Sized>(dom: &D, node: &D::Node, value: impl Display) -> Result<()> {
	let node = html(dom, "set_text", node)?;
	dom.set_text_content(node, &value.to_string());
	trace!("Text set.");
	Ok(())
}

/// Replaces the node's content by parsing `value` as markup.
///
/// **`value` must never be derived from untrusted input.** Use [`set_text`] for anything user-facing.
///
/// # Errors
///
/// [`Error::UnsupportedCapability`] iff `node` isn't an HTML element,
/// [`Error::InvalidArgument`] iff the markup is rejected by the environment.
#[instrument(skip(dom, value))]
pub fn set_markup<D: Dom + ?Sized>(dom: &D, node: &D::Node, value: impl Display) -> Result<()> {
	let node = html(dom, "set_markup", node)?;
	dom.set_inner_html(node, &value.to_string()).map_err(relabel("set_markup"))?;
	trace!("Markup set.");
	Ok(())
}

/// Sets the attribute `name` to `value`'s string form.
///
/// # Errors
///
/// [`Error::UnsupportedCapability`] iff `node` isn't an HTML element,
/// [`Error::InvalidArgument`] iff `name` isn't a valid attribute name.
#[instrument(skip(dom, value))]
pub fn set_attribute<D: Dom + ?Sized>(dom: &D, node: &D::Node, name: &str, value: impl Display) -> Result<()> {
	let node = html(dom, "set_attribute", node)?;
	dom.set_attribute(node, name, &value.to_string()).map_err(relabel("set_attribute"))
}

/// Like [`set_attribute`], but accepts any element, SVG included.
///
/// # Errors
///
/// [`Error::UnsupportedCapability`] iff `node` isn't an element at all,
/// [`Error::InvalidArgument`] iff `name` isn't a valid attribute name.
#[instrument(skip(dom, value))]
pub fn set_attribute_any<D: Dom + ?Sized>(dom: &D, node: &D::Node, name: &str, value: impl Display) -> Result<()> {
	let node = element(dom, "set_attribute_any", node)?;
	dom.set_attribute(node, name, &value.to_string()).map_err(relabel("set_attribute_any"))
}

/// # Errors
///
/// [`Error::UnsupportedCapability`] iff `node` isn't an HTML element,
/// [`Error::InvalidArgument`] iff `class` is empty or contains whitespace.
#[instrument(skip(dom))]
pub fn add_class<D: Dom + ?Sized>(dom: &D, node: &D::Node, class: &str) -> Result<()> {
	let node = html(dom, "add_class", node)?;
	dom.class_list_add(node, class).map_err(relabel("add_class"))
}

/// # Errors
///
/// As for [`add_class`].
#[instrument(skip(dom))]
pub fn remove_class<D: Dom + ?Sized>(dom: &D, node: &D::Node, class: &str) -> Result<()> {
	let node = html(dom, "remove_class", node)?;
	dom.class_list_remove(node, class).map_err(relabel("remove_class"))
}

/// Flips `class`, or sets its membership to `force` if given. Returns whether the class is present afterwards.
///
/// # Errors
///
/// As for [`add_class`].
#[instrument(skip(dom))]
pub fn toggle_class<D: Dom + ?Sized>(dom: &D, node: &D::Node, class: &str, force: Option<bool>) -> Result<bool> {
	let node = html(dom, "toggle_class", node)?;
	dom.class_list_toggle(node, class, force).map_err(relabel("toggle_class"))
}

/// Sets one inline style property to `value`'s string form.
///
/// # Errors
///
/// [`Error::UnsupportedCapability`] iff `node` isn't an HTML element,
/// [`Error::InvalidArgument`] iff `property` is empty.
#[instrument(skip(dom, value))]
pub fn set_style<D: Dom + ?Sized>(dom: &D, node: &D::Node, property: &str, value: impl Display) -> Result<()> {
	let node = html(dom, "set_style", node)?;
	if property.is_empty() {
		return Err(Error::invalid_argument("set_style", "property must be a non-empty string"));
	}
	dom.set_style_property(node, property, &value.to_string()).map_err(relabel("set_style"))
}

/// [`add_class`] for any element, e.g. an SVG icon.
///
/// # Errors
///
/// [`Error::UnsupportedCapability`] iff `node` isn't an element,
/// [`Error::InvalidArgument`] iff `class` is empty or contains whitespace.
#[instrument(skip(dom))]
pub fn add_class_any<D: Dom + ?Sized>(dom: &D, node: &D::Node, class: &str) -> Result<()> {
	let node = element(dom, "add_class_any", node)?;
	dom.class_list_add(node, class).map_err(relabel("add_class_any"))
}

/// [`remove_class`] for any element.
///
/// # Errors
///
/// As for [`add_class_any`].
#[instrument(skip(dom))]
pub fn remove_class_any<D: Dom + ?Sized>(dom: &D, node: &D::Node, class: &str) -> Result<()> {
	let node = element(dom, "remove_class_any", node)?;
	dom.class_list_remove(node, class).map_err(relabel("remove_class_any"))
}

/// [`toggle_class`] for any element.
///
/// # Errors
///
/// As for [`add_class_any`].
#[instrument(skip(dom))]
pub fn toggle_class_any<D: Dom + ?Sized>(dom: &D, node: &D::Node, class: &str, force: Option<bool>) -> Result<bool> {
	let node = element(dom, "toggle_class_any", node)?;
	dom.class_list_toggle(node, class, force).map_err(relabel("toggle_class_any"))
}
