use crate::{dom::Dom, Result, Scope};
use core::{fmt::Display, time::Duration};
use tracing::instrument;

/// How long after [`Toolbar::on_refresh`] the host should call `set_status(Status::Online)`.
pub const REFRESH_SETTLE: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
	Online,
	Refreshing,
	Offline,
}

/// A toolbar with a title, a unique live status indicator, a refresh button and a notice toggle.
///
/// ```html
/// <div data-ui="toolbar">
///   <h1 data-ui="title"></h1>
///   <span data-ui="status" role="status"></span>
///   <button data-ui="refresh">Refresh</button>
///   <button data-ui="toggle">Notice</button>
///   <p data-ui="notice" class="hidden">…</p> <!-- optional -->
/// </div>
/// ```
pub struct Toolbar<'a, D: Dom + ?Sized> {
	scope: Scope<'a, D>,
	title: D::Node,
	status: D::Node,
	refresh: D::Node,
	toggle: D::Node,
	notice: Option<D::Node>,
}

impl<'a, D: Dom + ?Sized> Toolbar<'a, D> {
	/// # Errors
	///
	/// Iff a required part is missing or the status indicator isn't unique under `root`.
	#[instrument(skip(dom))]
	pub fn new(dom: &'a D, root: &'a D::Node) -> Result<Self> {
		let scope = Scope::new(dom, root);
		let title = scope.required(r#"[data-ui="title"]"#)?;
		let status = scope.exactly_one(r#"[data-ui="status"]"#)?;
		let refresh = scope.required(r#"[data-ui="refresh"]"#)?;
		let toggle = scope.required(r#"[data-ui="toggle"]"#)?;
		let notice = scope.optional(r#"[data-ui="notice"]"#)?;

		scope.set_attribute(&status, "aria-live", "polite")?;
		if !dom.has_attribute(&toggle, "aria-pressed") {
			scope.set_attribute(&toggle, "aria-pressed", false)?;
		}

		Ok(Self {
			scope,
			title,
			status,
			refresh,
			toggle,
			notice,
		})
	}

	#[allow(clippy::missing_errors_doc)]
	pub fn set_title(&self, text: impl Display) -> Result<()> {
		self.scope.set_text(&self.title, text)
	}

	#[allow(clippy::missing_errors_doc)]
	pub fn set_status(&self, status: Status) -> Result<()> {
		let online = status == Status::Online;
		let refreshing = status == Status::Refreshing;
		self.scope.toggle_class(&self.status, "ok", Some(online))?;
		self.scope.toggle_class(&self.status, "warn", Some(!online && !refreshing))?;
		self.scope.set_text(
			&self.status,
			match status {
				Status::Online => "Online",
				Status::Refreshing => "Refreshing...",
				Status::Offline => "Offline",
			},
		)
	}

	/// Shows or hides the notice and mirrors that in the toggle's `aria-pressed`. A no-op without a notice.
	#[allow(clippy::missing_errors_doc)]
	pub fn set_notice_visible(&self, visible: bool) -> Result<()> {
		let notice = match &self.notice {
			Some(notice) => notice,
			None => return Ok(()),
		};
		self.scope.toggle_class(notice, "hidden", Some(!visible))?;
		self.scope.set_attribute(&self.toggle, "aria-pressed", visible)
	}

	/// Click handler for the refresh button. Schedule `set_status(Status::Online)` after [`REFRESH_SETTLE`].
	#[allow(clippy::missing_errors_doc)]
	pub fn on_refresh(&self) -> Result<()> {
		self.set_status(Status::Refreshing)
	}

	/// Click handler for the notice toggle.
	#[allow(clippy::missing_errors_doc)]
	pub fn on_toggle(&self) -> Result<()> {
		let dom = self.scope.dom();
		let next = self.notice.as_ref().map_or(false, |notice| dom.class_list_contains(notice, "hidden"));
		self.set_notice_visible(next)
	}

	#[must_use]
	pub fn refresh_button(&self) -> &D::Node {
		&self.refresh
	}

	#[must_use]
	pub fn toggle_button(&self) -> &D::Node {
		&self.toggle
	}
}
