use crate::dom::NodeKind;

/// Everything that can go wrong in this crate.
///
/// None of these are transient: they point either to a caller bug (bad selector, wrong node kind)
/// or to a structural precondition of the page that doesn't hold (a required node is missing or duplicated).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	/// A malformed selector, id, root, attribute name or class token was passed in.
	#[error("{operation}(): {reason}")]
	InvalidArgument { operation: &'static str, reason: String },

	/// A required selection matched nothing.
	#[error("{operation}(): not found -> {query}")]
	NotFound { operation: &'static str, query: String },

	/// A uniqueness-enforcing selection matched more than one node.
	#[error("exactly_one(): expected 1, found {count} -> {selector}")]
	MultipleMatches { selector: String, count: usize },

	/// A mutation was attempted on a node outside the capability set it requires.
	#[error("{operation}(): unsupported node, got {found}")]
	UnsupportedCapability { operation: &'static str, found: NodeKind },

	/// [`ensure_live`](`crate::ensure_live`) couldn't find a replacement for a stale handle.
	#[error("ensure_live(): reselection returned nothing")]
	ReselectionFailed,
}

impl Error {
	pub(crate) fn invalid_argument(operation: &'static str, reason: impl Into<String>) -> Self {
		Self::InvalidArgument {
			operation,
			reason: reason.into(),
		}
	}
}

pub type Result<T> = core::result::Result<T, Error>;
