//! Selection with cardinality contracts.

use crate::{
	dom::{Dom, Root},
	Error, Result,
};
use tracing::{debug, instrument, trace, warn};

fn check_selector(operation: &'static str, selector: &str) -> Result<()> {
	if selector.is_empty() {
		return Err(Error::invalid_argument(operation, "selector must be a non-empty string"));
	}
	Ok(())
}

fn check_root<D: Dom + ?Sized>(dom: &D, operation: &'static str, root: Root<'_, D::Node>) -> Result<()> {
	if let Root::Node(node) = root {
		let kind = dom.kind(node);
		if !kind.is_container() {
			return Err(Error::invalid_argument(operation, format!("invalid root provided -> {}", kind)));
		}
	}
	Ok(())
}

/// Backend errors name the backend call, but callers should see the guard they used.
fn relabel(operation: &'static str) -> impl FnOnce(Error) -> Error {
	move |error| match error {
		Error::InvalidArgument { reason, .. } => Error::InvalidArgument { operation, reason },
		other => other,
	}
}

fn first_match<D: Dom + ?Sized>(dom: &D, operation: &'static str, selector: &str, root: Root<'_, D::Node>) -> Result<Option<D::Node>> {
	check_selector(operation, selector)?;
	check_root(dom, operation, root)?;
	dom.query_selector(root, selector).map_err(relabel(operation))
}

/// Fail-fast: the first match of `selector` under `root`.
///
/// Like [***querySelector***](https://developer.mozilla.org/en-US/docs/Web/API/Document/querySelector),
/// this does **not** check that the match is unique. Use [`exactly_one`] where that matters.
///
/// # Errors
///
/// - [`Error::InvalidArgument`] iff `selector` is empty or malformed, or `root` isn't a document or element.
/// - [`Error::NotFound`] iff nothing matches.
#[instrument(skip(dom))]
pub fn required<D: Dom + ?Sized>(dom: &D, selector: &str, root: Root<'_, D::Node>) -> Result<D::Node> {
	match first_match(dom, "required", selector, root)? {
		Some(node) => {
			trace!("Selected {:?}.", node);
			Ok(node)
		}
		None => Err(Error::NotFound {
			operation: "required",
			query: selector.to_owned(),
		}),
	}
}

/// Fail-soft: the first match of `selector` under `root`, if any.
///
/// # Errors
///
/// Iff `selector` or `root` are invalid, as for [`required`]. A missing match is **not** an error.
#[instrument(skip(dom))]
pub fn optional<D: Dom + ?Sized>(dom: &D, selector: &str, root: Root<'_, D::Node>) -> Result<Option<D::Node>> {
	let node = first_match(dom, "optional", selector, root)?;
	match &node {
		Some(node) => trace!("Selected {:?}.", node),
		None => debug!("Optional selector {:?} matched nothing.", selector),
	}
	Ok(node)
}

/// Fail-fast document-wide lookup by [***id***](https://developer.mozilla.org/en-US/docs/Web/HTML/Global_attributes/id).
///
/// # Errors
///
/// - [`Error::InvalidArgument`] iff `id` is empty.
/// - [`Error::NotFound`] iff no connected element has that id.
#[instrument(skip(dom))]
pub fn by_id<D: Dom + ?Sized>(dom: &D, id: &str) -> Result<D::Node> {
	if id.is_empty() {
		return Err(Error::invalid_argument("by_id", "id must be a non-empty string"));
	}
	dom.get_element_by_id(id).ok_or_else(|| Error::NotFound {
		operation: "by_id",
		query: format!("#{}", id),
	})
}

/// Fail-fast on missing **or** duplicated: the one and only match of `selector` under `root`.
///
/// # Errors
///
/// - [`Error::InvalidArgument`] as for [`required`].
/// - [`Error::NotFound`] iff nothing matches.
/// - [`Error::MultipleMatches`] iff more than one node matches. The count is part of the message.
#[instrument(skip(dom))]
pub fn exactly_one<D: Dom + ?Sized>(dom: &D, selector: &str, root: Root<'_, D::Node>) -> Result<D::Node> {
	const OPERATION: &str = "exactly_one";
	check_selector(OPERATION, selector)?;
	check_root(dom, OPERATION, root)?;

	let mut matches = dom.query_selector_all(root, selector).map_err(relabel(OPERATION))?;
	match matches.len() {
		0 => Err(Error::NotFound {
			operation: OPERATION,
			query: selector.to_owned(),
		}),
		1 => {
			let node = matches.swap_remove(0);
			trace!("Selected {:?}.", node);
			Ok(node)
		}
		count => {
			warn!("Expected exactly one match for {:?} but found {}.", selector, count);
			Err(Error::MultipleMatches {
				selector: selector.to_owned(),
				count,
			})
		}
	}
}
