//! HTML fragment parsing through [`html5ever`].
//!
//! Markup is parsed with the element it is inserted into as context (`<body>` for a whole document),
//! so implied end tags, foster parenting, foreign content and error recovery all behave like
//! [***innerHTML***](https://developer.mozilla.org/en-US/docs/Web/API/Element/innerHTML) in a browser.
//! The resulting [`RcDom`] is then copied into the arena.

use super::{
	tree::{Data, ElementData, Tree},
	Namespace, NodeId,
};
use html5ever::{parse_fragment, tendril::TendrilSink, LocalName, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use tracing::trace;

/// Parses `markup` in the context of `parent` and appends the result to `parent`'s children.
///
/// Like a browser, this never fails. Malformed markup is recovered from.
pub(crate) fn parse_into(tree: &mut Tree, parent: NodeId, markup: &str) {
	let context = match tree.element(parent) {
		Some(element) => QualName::new(None, element.namespace.url().into(), LocalName::from(element.local_name.as_str())),
		None => QualName::new(None, Namespace::Html.url().into(), LocalName::from("body")),
	};
	let dom = parse_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new(), false).one(markup);

	// Fragment content is parented to a synthetic <html> root.
	let root = dom.document.children.borrow().first().cloned();
	if let Some(root) = root {
		let children = root.children.borrow();
		trace!("Parsed {} top-level node(s).", children.len());
		for child in children.iter() {
			convert(tree, child, parent);
		}
	}
}

fn convert(tree: &mut Tree, handle: &Handle, parent: NodeId) {
	let node = match &handle.data {
		NodeData::Text { contents } => tree.create(Data::Text(contents.borrow().to_string())),
		NodeData::Comment { contents } => tree.create(Data::Comment(contents.to_string())),
		NodeData::Element { name, attrs, .. } => {
			let mut element = ElementData::new(Namespace::from_url(&name.ns), &name.local);
			for attribute in attrs.borrow().iter() {
				let qualified = match &attribute.name.prefix {
					Some(prefix) => format!("{}:{}", prefix, attribute.name.local),
					None => attribute.name.local.to_string(),
				};
				element.set_attribute(&qualified, attribute.value.to_string());
			}
			tree.create(Data::Element(element))
		}
		// Not representable in a fragment.
		NodeData::Document | NodeData::Doctype { .. } | NodeData::ProcessingInstruction { .. } => return,
	};
	tree.append(parent, node);

	for child in handle.children.borrow().iter() {
		convert(tree, child, node);
	}
}
