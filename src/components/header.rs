use crate::{dom::Dom, Result, Scope};
use core::sync::atomic::{AtomicUsize, Ordering};
use tracing::{instrument, trace};

static NEXT_NAV_ID: AtomicUsize = AtomicUsize::new(1);

/// A site header with a logo, a navigation menu and its toggle, plus an optional promo banner and unread counter.
pub struct Header<'a, D: Dom + ?Sized> {
	scope: Scope<'a, D>,
	root: &'a D::Node,
	logo: D::Node,
	nav: D::Node,
	toggle: D::Node,
	promo: Option<D::Node>,
	count: Option<D::Node>,
}

impl<'a, D: Dom + ?Sized> Header<'a, D> {
	/// Ties the toggle to the menu (`aria-controls`, giving the menu an id if it has none) and defaults it to collapsed.
	///
	/// # Errors
	///
	/// Iff the logo is missing, or the menu or its toggle aren't unique under `root`.
	#[instrument(skip(dom))]
	pub fn new(dom: &'a D, root: &'a D::Node) -> Result<Self> {
		let scope = Scope::new(dom, root);
		let logo = scope.required(r#"[data-ui="logo"]"#)?;
		let nav = scope.exactly_one(r#"[data-ui="nav"]"#)?;
		let toggle = scope.exactly_one(r#"[data-ui="menu.toggle"]"#)?;
		let promo = scope.optional(r#"[data-ui="promo"]"#)?;
		let count = scope.optional(r#"[data-ui="count"]"#)?;

		let nav_id = match dom.attribute(&nav, "id").filter(|id| !id.is_empty()) {
			Some(id) => id,
			None => {
				let id = format!("nav-{}", NEXT_NAV_ID.fetch_add(1, Ordering::Relaxed));
				scope.set_attribute(&nav, "id", &id)?;
				id
			}
		};
		scope.set_attribute(&toggle, "aria-controls", nav_id)?;
		if !dom.has_attribute(&toggle, "aria-expanded") {
			scope.set_attribute(&toggle, "aria-expanded", false)?;
		}

		Ok(Self {
			scope,
			root,
			logo,
			nav,
			toggle,
			promo,
			count,
		})
	}

	#[must_use]
	pub fn is_open(&self) -> bool {
		self.scope.dom().attribute(&self.toggle, "aria-expanded").as_deref() == Some("true")
	}

	#[allow(clippy::missing_errors_doc)]
	pub fn set_open(&self, open: bool) -> Result<()> {
		self.scope.set_attribute(&self.toggle, "aria-expanded", open)?;
		self.scope.toggle_class(&self.nav, "is-open", Some(open))?;
		trace!(open, "Menu state changed.");
		Ok(())
	}

	#[allow(clippy::missing_errors_doc)]
	pub fn toggle_menu(&self) -> Result<()> {
		self.set_open(!self.is_open())
	}

	/// Click handler for the menu toggle.
	#[allow(clippy::missing_errors_doc)]
	pub fn on_click(&self) -> Result<()> {
		self.toggle_menu()
	}

	/// Key handler for the menu toggle. Returns whether the key's default action should be prevented.
	///
	/// Enter and Space toggle the menu. Escape closes it and focuses the toggle.
	#[allow(clippy::missing_errors_doc)]
	pub fn on_key_down(&self, key: &str) -> Result<bool> {
		match key {
			"Enter" | " " => {
				self.toggle_menu()?;
				Ok(true)
			}
			"Escape" => {
				self.set_open(false)?;
				self.scope.dom().focus(&self.toggle)?;
				Ok(false)
			}
			_ => Ok(false),
		}
	}

	/// Capturing pointer-down handler for the whole document: closes an open menu on outside clicks.
	#[allow(clippy::missing_errors_doc)]
	pub fn on_document_pointer_down(&self, target: &D::Node) -> Result<()> {
		if !self.is_open() {
			return Ok(());
		}
		if !self.scope.dom().contains(self.root, target) && *target != self.toggle {
			self.set_open(false)?;
		}
		Ok(())
	}

	/// Shows the promo with `text`, or hides it for [`None`] or an empty string. A no-op without a promo.
	#[allow(clippy::missing_errors_doc)]
	pub fn set_promo(&self, text: Option<&str>) -> Result<()> {
		let promo = match &self.promo {
			Some(promo) => promo,
			None => return Ok(()),
		};
		let show = text.map_or(false, |text| !text.is_empty());
		self.scope.toggle_class(promo, "hidden", Some(!show))?;
		self.scope.set_attribute(promo, "aria-hidden", !show)?;
		if let (true, Some(text)) = (show, text) {
			self.scope.set_text(promo, text)?;
		}
		Ok(())
	}

	/// Negative counts are shown as zero. A no-op without a counter.
	#[allow(clippy::missing_errors_doc)]
	pub fn set_unread(&self, n: i64) -> Result<()> {
		let count = match &self.count {
			Some(count) => count,
			None => return Ok(()),
		};
		let value = n.max(0);
		self.scope.set_text(count, group_thousands(value))?;
		self.scope.set_attribute(count, "aria-label", format!("{} unread", value))
	}

	#[must_use]
	pub fn logo(&self) -> &D::Node {
		&self.logo
	}

	#[must_use]
	pub fn menu_toggle(&self) -> &D::Node {
		&self.toggle
	}

	#[must_use]
	pub fn nav(&self) -> &D::Node {
		&self.nav
	}
}

fn group_thousands(value: i64) -> String {
	let digits = value.to_string();
	let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, digit) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			grouped.push(',');
		}
		grouped.push(digit);
	}
	grouped
}
