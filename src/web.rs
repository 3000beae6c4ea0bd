//! The browser's DOM, through [`web_sys`].
//!
//! This compiles on every target, but only does anything useful on `wasm32` inside a browser.

use crate::{
	dom::{Dom, NodeKind, Root},
	Error, Result,
};
use tracing::{instrument, trace};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Comment, CssStyleDeclaration, Document, Element, HtmlElement, Node, SvgElement, Text};

/// [`Dom`] over a live [`web_sys::Document`]. Node handles are [`web_sys::Node`]s.
#[derive(Debug, Clone)]
pub struct WebDom {
	document: Document,
}

impl WebDom {
	#[must_use]
	pub fn new(document: Document) -> Self {
		Self { document }
	}

	/// The current window's document, if there is one.
	#[must_use]
	pub fn from_window() -> Option<Self> {
		web_sys::window()?.document().map(Self::new)
	}

	#[must_use]
	pub fn document(&self) -> &Document {
		&self.document
	}
}

/// Exceptions thrown by the DOM here are all argument errors (`SyntaxError`, `InvalidCharacterError`).
fn js_error(operation: &'static str) -> impl FnOnce(JsValue) -> Error {
	move |value| {
		let reason = match value.dyn_ref::<js_sys::Error>() {
			Some(error) => String::from(error.message()),
			None => format!("{:?}", value),
		};
		Error::InvalidArgument { operation, reason }
	}
}

fn element<'a>(dom: &WebDom, operation: &'static str, node: &'a Node) -> Result<&'a Element> {
	node.dyn_ref::<Element>().ok_or_else(|| Error::UnsupportedCapability {
		operation,
		found: dom.kind(node),
	})
}

fn style(dom: &WebDom, operation: &'static str, node: &Node) -> Result<CssStyleDeclaration> {
	if let Some(html_element) = node.dyn_ref::<HtmlElement>() {
		Ok(html_element.style())
	} else if let Some(svg_element) = node.dyn_ref::<SvgElement>() {
		Ok(svg_element.style())
	} else {
		Err(Error::UnsupportedCapability {
			operation,
			found: dom.kind(node),
		})
	}
}

impl Dom for WebDom {
	type Node = Node;

	fn kind(&self, node: &Node) -> NodeKind {
		if node.is_instance_of::<HtmlElement>() {
			NodeKind::HtmlElement
		} else if node.is_instance_of::<SvgElement>() {
			NodeKind::SvgElement
		} else if node.is_instance_of::<Element>() {
			NodeKind::Element
		} else if node.is_instance_of::<Text>() {
			NodeKind::Text
		} else if node.is_instance_of::<Comment>() {
			NodeKind::Comment
		} else if node.is_instance_of::<Document>() {
			NodeKind::Document
		} else {
			NodeKind::Other
		}
	}

	fn is_connected(&self, node: &Node) -> bool {
		node.is_connected()
	}

	#[instrument(skip(self))]
	fn query_selector_all(&self, root: Root<'_, Node>, selector: &str) -> Result<Vec<Node>> {
		let list = match root {
			Root::Document => self.document.query_selector_all(selector),
			Root::Node(node) => {
				if let Some(element) = node.dyn_ref::<Element>() {
					element.query_selector_all(selector)
				} else if let Some(document) = node.dyn_ref::<Document>() {
					document.query_selector_all(selector)
				} else {
					return Err(Error::invalid_argument("query_selector_all", format!("a {} can't be queried", self.kind(node))));
				}
			}
		}
		.map_err(js_error("query_selector_all"))?;

		let matches: Vec<Node> = (0..list.length()).filter_map(|i| list.item(i)).collect();
		trace!("{} match(es).", matches.len());
		Ok(matches)
	}

	fn query_selector(&self, root: Root<'_, Node>, selector: &str) -> Result<Option<Node>> {
		let found = match root {
			Root::Document => self.document.query_selector(selector),
			Root::Node(node) => {
				if let Some(element) = node.dyn_ref::<Element>() {
					element.query_selector(selector)
				} else if let Some(document) = node.dyn_ref::<Document>() {
					document.query_selector(selector)
				} else {
					return Err(Error::invalid_argument("query_selector", format!("a {} can't be queried", self.kind(node))));
				}
			}
		}
		.map_err(js_error("query_selector"))?;
		Ok(found.map(Node::from))
	}

	fn get_element_by_id(&self, id: &str) -> Option<Node> {
		self.document.get_element_by_id(id).map(Node::from)
	}

	fn contains(&self, ancestor: &Node, node: &Node) -> bool {
		ancestor.contains(Some(node))
	}

	fn text_content(&self, node: &Node) -> String {
		node.text_content().unwrap_or_default()
	}

	fn set_text_content(&self, node: &Node, text: &str) {
		node.set_text_content(Some(text))
	}

	fn set_inner_html(&self, node: &Node, markup: &str) -> Result<()> {
		element(self, "set_inner_html", node)?.set_inner_html(markup);
		Ok(())
	}

	fn attribute(&self, node: &Node, name: &str) -> Option<String> {
		node.dyn_ref::<Element>()?.get_attribute(name)
	}

	fn has_attribute(&self, node: &Node, name: &str) -> bool {
		node.dyn_ref::<Element>().map_or(false, |element| element.has_attribute(name))
	}

	fn set_attribute(&self, node: &Node, name: &str, value: &str) -> Result<()> {
		element(self, "set_attribute", node)?.set_attribute(name, value).map_err(js_error("set_attribute"))
	}

	fn class_list_contains(&self, node: &Node, class: &str) -> bool {
		node.dyn_ref::<Element>().map_or(false, |element| element.class_list().contains(class))
	}

	fn class_list_add(&self, node: &Node, class: &str) -> Result<()> {
		element(self, "class_list_add", node)?.class_list().add_1(class).map_err(js_error("class_list_add"))
	}

	fn class_list_remove(&self, node: &Node, class: &str) -> Result<()> {
		element(self, "class_list_remove", node)?.class_list().remove_1(class).map_err(js_error("class_list_remove"))
	}

	fn class_list_toggle(&self, node: &Node, class: &str, force: Option<bool>) -> Result<bool> {
		let class_list = element(self, "class_list_toggle", node)?.class_list();
		match force {
			Some(force) => class_list.toggle_with_force(class, force),
			None => class_list.toggle(class),
		}
		.map_err(js_error("class_list_toggle"))
	}

	fn style_property(&self, node: &Node, property: &str) -> String {
		style(self, "style_property", node)
			.ok()
			.and_then(|style| style.get_property_value(property).ok())
			.unwrap_or_default()
	}

	fn set_style_property(&self, node: &Node, property: &str, value: &str) -> Result<()> {
		style(self, "set_style_property", node)?.set_property(property, value).map_err(js_error("set_style_property"))
	}

	fn focus(&self, node: &Node) -> Result<()> {
		if let Some(html_element) = node.dyn_ref::<HtmlElement>() {
			html_element.focus().map_err(js_error("focus"))
		} else if let Some(svg_element) = node.dyn_ref::<SvgElement>() {
			svg_element.focus().map_err(js_error("focus"))
		} else {
			Err(Error::UnsupportedCapability {
				operation: "focus",
				found: self.kind(node),
			})
		}
	}
}
