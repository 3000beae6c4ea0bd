use crate::{
	dom::{Capability, Dom},
	Error, Result,
};

/// Returns `node` unchanged iff it is an HTML element.
///
/// This deliberately rejects SVG and other non-HTML elements even where the environment would technically
/// allow the mutation. Use the `*_any` class helpers to opt into those.
///
/// # Errors
///
/// [`Error::UnsupportedCapability`] naming the kind that was found instead.
pub fn assert_mutable<'a, D: Dom + ?Sized>(dom: &D, node: &'a D::Node) -> Result<&'a D::Node> {
	narrow(dom, "assert_mutable", node, Capability::HtmlCapable)
}

pub(crate) fn narrow<'a, D: Dom + ?Sized>(dom: &D, operation: &'static str, node: &'a D::Node, required: Capability) -> Result<&'a D::Node> {
	let found = dom.kind(node);
	match (required, found.capability()) {
		(Capability::HtmlCapable, Some(Capability::HtmlCapable)) | (Capability::Element, Some(_)) => Ok(node),
		_ => Err(Error::UnsupportedCapability { operation, found }),
	}
}
