use dom_guard::{
	add_class, add_class_any, assert_mutable,
	memory::{MemoryDocument, Namespace, NodeId},
	remove_class, remove_class_any, required, set_attribute, set_attribute_any, set_markup, set_style, set_text, toggle_class, toggle_class_any, Dom, Error, NodeKind, Root,
};
use proptest::prelude::*;

fn fixture() -> (MemoryDocument, NodeId, NodeId) {
	let document = MemoryDocument::parse(r#"<div data-ui="toolbar"><span data-ui="status">Offline</span><svg data-ui="icon" class="icon"></svg></div>"#);
	let status = required(&document, r#"[data-ui="status"]"#, Root::Document).unwrap();
	let icon = required(&document, r#"svg[data-ui="icon"]"#, Root::Document).unwrap();
	(document, status, icon)
}

#[test]
fn assert_mutable_narrows() {
	let (document, status, icon) = fixture();
	let text = document.children(status)[0];

	assert_eq!(assert_mutable(&document, &status).unwrap(), &status);

	for (node, kind) in vec![(icon, NodeKind::SvgElement), (text, NodeKind::Text), (document.document(), NodeKind::Document)] {
		match assert_mutable(&document, &node) {
			Err(Error::UnsupportedCapability { found, .. }) => assert_eq!(found, kind),
			other => panic!("expected UnsupportedCapability, got {:?}", other),
		}
	}

	let error = assert_mutable(&document, &icon).unwrap_err();
	assert_eq!(error.to_string(), "assert_mutable(): unsupported node, got SVGElement");
}

#[test]
fn guarded_family_rejects_svg() {
	let (document, _, icon) = fixture();

	assert!(matches!(set_text(&document, &icon, "x"), Err(Error::UnsupportedCapability { operation: "set_text", .. })));
	assert!(matches!(set_markup(&document, &icon, "<b>x</b>"), Err(Error::UnsupportedCapability { .. })));
	assert!(matches!(set_attribute(&document, &icon, "fill", "#555"), Err(Error::UnsupportedCapability { .. })));
	assert!(matches!(add_class(&document, &icon, "active"), Err(Error::UnsupportedCapability { operation: "add_class", .. })));
	assert!(matches!(remove_class(&document, &icon, "icon"), Err(Error::UnsupportedCapability { .. })));
	assert!(matches!(toggle_class(&document, &icon, "active", None), Err(Error::UnsupportedCapability { .. })));
	assert!(matches!(set_style(&document, &icon, "opacity", 1), Err(Error::UnsupportedCapability { .. })));

	assert_eq!(document.outer_html(icon), r#"<svg data-ui="icon" class="icon"></svg>"#);
}

#[test]
fn any_family_accepts_svg() {
	let (document, status, icon) = fixture();

	add_class_any(&document, &icon, "active").unwrap();
	assert!(document.class_list_contains(&icon, "active"));
	assert!(!toggle_class_any(&document, &icon, "active", None).unwrap());
	remove_class_any(&document, &icon, "icon").unwrap();
	assert_eq!(document.attribute(&icon, "class").as_deref(), Some(""));

	set_attribute_any(&document, &icon, "fill", "#555").unwrap();
	assert_eq!(document.attribute(&icon, "fill").as_deref(), Some("#555"));

	// Still needs an element.
	let text = document.children(status)[0];
	assert!(matches!(add_class_any(&document, &text, "x"), Err(Error::UnsupportedCapability { operation: "add_class_any", found: NodeKind::Text })));
}

#[test]
fn attribute_round_trip() {
	let (document, status, _) = fixture();
	set_attribute(&document, &status, "data-level", "good").unwrap();
	assert_eq!(document.attribute(&status, "data-level").as_deref(), Some("good"));

	set_attribute(&document, &status, "aria-pressed", false).unwrap();
	assert_eq!(document.attribute(&status, "aria-pressed").as_deref(), Some("false"));

	assert!(matches!(set_attribute(&document, &status, "", "x"), Err(Error::InvalidArgument { operation: "set_attribute", .. })));
	assert!(matches!(set_attribute(&document, &status, "a b", "x"), Err(Error::InvalidArgument { .. })));
}

#[test]
fn text_never_interprets_markup() {
	let (document, status, _) = fixture();
	set_text(&document, &status, "<b>bold</b> & more").unwrap();
	assert_eq!(document.text_content(&status), "<b>bold</b> & more");
	assert_eq!(document.inner_html(status), "&lt;b&gt;bold&lt;/b&gt; &amp; more");
	assert!(document.query_selector_all(Root::Node(&status), "b").unwrap().is_empty());
}

#[test]
fn markup_is_parsed() {
	let (document, status, _) = fixture();
	set_markup(&document, &status, r#"<b class="x">bold</b> &amp; more"#).unwrap();
	assert_eq!(document.text_content(&status), "bold & more");
	assert_eq!(document.query_selector_all(Root::Node(&status), "b.x").unwrap().len(), 1);

	// Recovered from like innerHTML, with implied end tags.
	set_markup(&document, &status, "<p>one<p>two<b").unwrap();
	assert_eq!(document.inner_html(status), "<p>one</p><p>two</p>");
}

#[test]
fn classes() {
	let (document, status, _) = fixture();

	add_class(&document, &status, "ok").unwrap();
	add_class(&document, &status, "ok").unwrap();
	add_class(&document, &status, "warn").unwrap();
	assert_eq!(document.attribute(&status, "class").as_deref(), Some("ok warn"));

	remove_class(&document, &status, "ok").unwrap();
	remove_class(&document, &status, "missing").unwrap();
	assert_eq!(document.attribute(&status, "class").as_deref(), Some("warn"));

	assert!(toggle_class(&document, &status, "ok", Some(true)).unwrap());
	assert!(toggle_class(&document, &status, "ok", Some(true)).unwrap());
	assert!(!toggle_class(&document, &status, "ok", Some(false)).unwrap());
	assert!(!toggle_class(&document, &status, "ok", Some(false)).unwrap());

	assert!(matches!(add_class(&document, &status, ""), Err(Error::InvalidArgument { operation: "add_class", .. })));
	assert!(matches!(toggle_class(&document, &status, "a b", None), Err(Error::InvalidArgument { .. })));
}

#[test]
fn style_last_write_wins() {
	let (document, status, _) = fixture();

	set_style(&document, &status, "transform", "scale(1.05)").unwrap();
	set_style(&document, &status, "transform", "scale(1)").unwrap();
	assert_eq!(document.style_property(&status, "transform"), "scale(1)");

	set_style(&document, &status, "letter-spacing", "0.02em").unwrap();
	set_style(&document, &status, "opacity", 1).unwrap();
	assert_eq!(document.attribute(&status, "style").as_deref(), Some("transform: scale(1); letter-spacing: 0.02em; opacity: 1;"));

	set_style(&document, &status, "letter-spacing", "").unwrap();
	assert_eq!(document.style_property(&status, "letter-spacing"), "");
	assert_eq!(document.style_property(&status, "Opacity"), "1");

	assert!(matches!(set_style(&document, &status, "", "1"), Err(Error::InvalidArgument { operation: "set_style", .. })));
}

#[test]
fn svg_created_programmatically() {
	let document = MemoryDocument::new();
	let svg = document.create_element_ns(Namespace::Svg, "svg");
	document.append_child(document.document(), svg).unwrap();

	assert!(add_class(&document, &svg, "active").is_err());
	add_class_any(&document, &svg, "active").unwrap();
	assert!(document.class_list_contains(&svg, "active"));
}

proptest! {
	#[test]
	fn set_text_is_idempotent(prior in ".*", value in ".*") {
		let (document, status, _) = fixture();
		set_text(&document, &status, &prior).unwrap();
		set_text(&document, &status, &value).unwrap();
		set_text(&document, &status, &value).unwrap();
		prop_assert_eq!(document.text_content(&status), value);
	}

	#[test]
	fn toggle_coherence(flips in 0usize..16, start_present: bool, force: Option<bool>) {
		let (document, status, _) = fixture();
		toggle_class(&document, &status, "x", Some(start_present)).unwrap();

		for _ in 0..flips {
			toggle_class(&document, &status, "x", None).unwrap();
		}
		prop_assert_eq!(document.class_list_contains(&status, "x"), start_present ^ (flips % 2 == 1));

		if let Some(force) = force {
			prop_assert_eq!(toggle_class(&document, &status, "x", Some(force)).unwrap(), force);
			prop_assert_eq!(document.class_list_contains(&status, "x"), force);
		}
	}
}
