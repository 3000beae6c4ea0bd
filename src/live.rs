use crate::{dom::Dom, Error, Result};
use tracing::{debug, instrument};

/// Returns `node` if it is still connected to the document, otherwise whatever `reselect` finds instead.
///
/// Replacing a node (re-rendering a template, [***replaceWith***](https://developer.mozilla.org/en-US/docs/Web/API/Element/replaceWith), …)
/// silently invalidates handles captured before. Route long-lived handles through this before each use
/// after anything that may have restructured the tree.
///
/// `reselect` is called at most once, and only if `node` is [`None`] or disconnected.
///
/// # Errors
///
/// [`Error::ReselectionFailed`] iff `reselect` was called and returned [`None`].
#[instrument(skip(dom, reselect))]
pub fn ensure_live<D, F>(dom: &D, node: Option<D::Node>, reselect: F) -> Result<D::Node>
where
	D: Dom + ?Sized,
	F: FnOnce() -> Option<D::Node>,
{
	if let Some(node) = node {
		if dom.is_connected(&node) {
			return Ok(node);
		}
		debug!("Handle {:?} went stale. Reselecting.", node);
	}

	reselect().ok_or(Error::ReselectionFailed)
}
