use crate::{dom::Dom, Result, Scope};
use core::{fmt::Display, time::Duration};
use tracing::instrument;

/// How long after [`StayCard::disable_cta`] the host should call [`StayCard::restore_cta`].
pub const CTA_RESTORE_DELAY: Duration = Duration::from_millis(1200);

pub const DEFAULT_CURRENCY: &str = "£";

const CTA: &str = r#"[data-ui="card.cta"]"#;

/// A listing card whose call-to-action button may be re-rendered behind its back.
pub struct StayCard<'a, D: Dom + ?Sized> {
	scope: Scope<'a, D>,
	title: D::Node,
	cta: D::Node,
	price: D::Node,
}

impl<'a, D: Dom + ?Sized> StayCard<'a, D> {
	/// # Errors
	///
	/// Iff the title, call-to-action or price is missing under `root`.
	#[instrument(skip(dom))]
	pub fn new(dom: &'a D, root: &'a D::Node) -> Result<Self> {
		let scope = Scope::new(dom, root);
		Ok(Self {
			scope,
			title: scope.required(r#"[data-ui="card.title"]"#)?,
			cta: scope.required(CTA)?,
			price: scope.required(r#"[data-ui="card.price"]"#)?,
		})
	}

	#[allow(clippy::missing_errors_doc)]
	pub fn set_title(&self, text: impl Display) -> Result<()> {
		self.scope.set_text(&self.title, text)
	}

	/// Writes `value` to `data-value` and `{currency}{value}` as text.
	#[allow(clippy::missing_errors_doc)]
	pub fn set_price(&self, value: impl Display, currency: &str) -> Result<()> {
		let value = value.to_string();
		self.scope.set_attribute(&self.price, "data-value", &value)?;
		self.scope.set_text(&self.price, format!("{}{}", currency, value))
	}

	/// Selection errors from the reselection are passed on as they are. Only a missing call-to-action
	/// becomes [`Error::ReselectionFailed`](`crate::Error::ReselectionFailed`).
	fn refresh_refs(&mut self) -> Result<()> {
		let scope = self.scope;
		let mut selection_error = None;
		let cta = scope.ensure_live(Some(self.cta.clone()), || {
			scope.optional(CTA).unwrap_or_else(|error| {
				selection_error = Some(error);
				None
			})
		});
		if let Some(error) = selection_error {
			return Err(error);
		}
		self.cta = cta?;
		Ok(())
	}

	/// Puts the call-to-action into its processing state, reselecting it first in case the card was re-rendered.
	///
	/// Schedule [`StayCard::restore_cta`] after [`CTA_RESTORE_DELAY`].
	#[allow(clippy::missing_errors_doc)]
	pub fn disable_cta(&mut self) -> Result<()> {
		self.refresh_refs()?;
		self.scope.set_attribute(&self.cta, "aria-disabled", true)?;
		self.scope.set_text(&self.cta, "Processing…")
	}

	#[allow(clippy::missing_errors_doc)]
	pub fn restore_cta(&mut self) -> Result<()> {
		self.refresh_refs()?;
		self.scope.set_attribute(&self.cta, "aria-disabled", false)?;
		self.scope.set_text(&self.cta, "Save")
	}

	/// The call-to-action as of the last reselection.
	#[must_use]
	pub fn cta(&self) -> &D::Node {
		&self.cta
	}
}
