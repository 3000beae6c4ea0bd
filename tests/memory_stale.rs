use core::cell::Cell;
use dom_guard::{ensure_live, memory::MemoryDocument, required, set_text, Dom, Error, Root, Scope};

const CARD: &str = r#"<article data-ui="card"><h2 data-ui="card.title">Old</h2><button data-ui="card.cta">Save</button></article>"#;

#[test]
fn connected_handle_is_kept() {
	let document = MemoryDocument::parse(CARD);
	let cta = required(&document, r#"[data-ui="card.cta"]"#, Root::Document).unwrap();

	let calls = Cell::new(0);
	let live = ensure_live(&document, Some(cta), || {
		calls.set(calls.get() + 1);
		None
	})
	.unwrap();
	assert_eq!(live, cta);
	assert_eq!(calls.get(), 0);
}

#[test]
fn missing_handle_is_reselected() {
	let document = MemoryDocument::parse(CARD);
	let cta = required(&document, r#"[data-ui="card.cta"]"#, Root::Document).unwrap();

	assert_eq!(ensure_live(&document, None, || Some(cta)).unwrap(), cta);
}

#[test]
fn detached_handle_is_reselected_once() {
	let document = MemoryDocument::parse(CARD);
	let cta = required(&document, r#"[data-ui="card.cta"]"#, Root::Document).unwrap();
	let replacement = document.create_element("button");
	document.replace_with(cta, replacement).unwrap();
	assert!(!document.is_connected(&cta));

	let calls = Cell::new(0);
	let live = ensure_live(&document, Some(cta), || {
		calls.set(calls.get() + 1);
		Some(replacement)
	})
	.unwrap();
	assert_eq!(live, replacement);
	assert_eq!(calls.get(), 1);
}

#[test]
fn failed_reselection() {
	let document = MemoryDocument::parse(CARD);
	let cta = required(&document, r#"[data-ui="card.cta"]"#, Root::Document).unwrap();
	document.remove(cta);

	let error = ensure_live(&document, Some(cta), || None).unwrap_err();
	assert_eq!(error, Error::ReselectionFailed);
	assert_eq!(error.to_string(), "ensure_live(): reselection returned nothing");

	assert_eq!(ensure_live(&document, None, || None), Err(Error::ReselectionFailed));
}

#[test]
fn title_survives_rerender() {
	let document = MemoryDocument::parse(CARD);
	let card = required(&document, r#"[data-ui="card"]"#, Root::Document).unwrap();
	let title = required(&document, r#"[data-ui="card.title"]"#, Root::Node(&card)).unwrap();

	let rerendered = document.clone_node(title, true);
	document.replace_with(title, rerendered).unwrap();
	assert!(!document.is_connected(&title));
	assert!(document.is_connected(&rerendered));

	let scope = Scope::new(&document, &card);
	let live = scope.ensure_live(Some(title), || scope.required(r#"[data-ui="card.title"]"#).ok()).unwrap();
	assert_eq!(live, rerendered);
	set_text(&document, &live, "Fresh").unwrap();

	let visible = required(&document, r#"[data-ui="card.title"]"#, Root::Node(&card)).unwrap();
	assert_eq!(document.text_content(&visible), "Fresh");

	// Writes through the stale handle go nowhere visible.
	set_text(&document, &title, "Lost").unwrap();
	assert_eq!(document.text_content(&visible), "Fresh");
	assert_eq!(document.text_content(&card), "FreshSave");
}

#[test]
fn detached_subtree_is_stale() {
	let document = MemoryDocument::parse(CARD);
	let card = required(&document, r#"[data-ui="card"]"#, Root::Document).unwrap();
	let title = required(&document, r#"[data-ui="card.title"]"#, Root::Node(&card)).unwrap();

	document.remove(card);
	assert!(!document.is_connected(&title));
	assert_eq!(ensure_live(&document, Some(title), || None), Err(Error::ReselectionFailed));
}
