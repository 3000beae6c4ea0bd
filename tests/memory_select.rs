use dom_guard::{by_id, exactly_one, memory::MemoryDocument, optional, required, Dom, Error, Root, Scope};

const TOOLBAR: &str = r#"
<div id="app">
	<div data-ui="toolbar">
		<h1 data-ui="title">Devices</h1>
		<span data-ui="status" role="status">Offline</span>
		<button data-ui="refresh">Refresh</button>
	</div>
	<ul data-ui="grid">
		<li data-ui="card"><h2 data-ui="card.title">Router</h2></li>
		<li data-ui="card"><h2 data-ui="card.title">NAS</h2></li>
	</ul>
</div>
"#;

fn document() -> MemoryDocument {
	MemoryDocument::parse(TOOLBAR)
}

#[test]
fn single_match_agrees() {
	let document = document();
	let toolbar = required(&document, r#"[data-ui="toolbar"]"#, Root::Document).unwrap();

	let a = required(&document, r#"[role="status"]"#, Root::Node(&toolbar)).unwrap();
	let b = optional(&document, r#"[role="status"]"#, Root::Node(&toolbar)).unwrap().unwrap();
	let c = exactly_one(&document, r#"[role="status"]"#, Root::Node(&toolbar)).unwrap();
	assert_eq!(a, b);
	assert_eq!(b, c);
	assert_eq!(document.text_content(&a), "Offline");
}

#[test]
fn zero_matches() {
	let document = document();

	assert!(matches!(
		required(&document, r#"[data-ui="does-not-exist"]"#, Root::Document),
		Err(Error::NotFound { operation: "required", .. })
	));
	assert!(matches!(
		exactly_one(&document, r#"[data-ui="does-not-exist"]"#, Root::Document),
		Err(Error::NotFound { operation: "exactly_one", .. })
	));
	assert_eq!(optional(&document, r#"[data-ui="does-not-exist"]"#, Root::Document).unwrap(), None);
}

#[test]
fn multiple_matches() {
	let document = document();
	let grid = required(&document, r#"[data-ui="grid"]"#, Root::Document).unwrap();

	let error = exactly_one(&document, r#"[data-ui="card"]"#, Root::Node(&grid)).unwrap_err();
	assert_eq!(
		error,
		Error::MultipleMatches {
			selector: r#"[data-ui="card"]"#.to_owned(),
			count: 2,
		}
	);
	assert!(error.to_string().contains("found 2"));

	let first = required(&document, r#"[data-ui="card"]"#, Root::Node(&grid)).unwrap();
	let all = document.query_selector_all(Root::Node(&grid), r#"[data-ui="card"]"#).unwrap();
	assert_eq!(first, all[0]);
	assert_ne!(first, all[1]);
}

#[test]
fn invalid_arguments() {
	let document = document();
	let title = required(&document, r#"[data-ui="title"]"#, Root::Document).unwrap();
	let text = document.children(title)[0];

	for result in vec![
		required(&document, "", Root::Document).map(|_| ()),
		optional(&document, "", Root::Document).map(|_| ()),
		exactly_one(&document, "", Root::Document).map(|_| ()),
		required(&document, "[data-ui=", Root::Document).map(|_| ()),
		optional(&document, "div >", Root::Document).map(|_| ()),
		exactly_one(&document, ":hover", Root::Document).map(|_| ()),
		required(&document, "span", Root::Node(&text)).map(|_| ()),
		optional(&document, "span", Root::Node(&text)).map(|_| ()),
		exactly_one(&document, "span", Root::Node(&text)).map(|_| ()),
		by_id(&document, "").map(|_| ()),
	] {
		assert!(matches!(result, Err(Error::InvalidArgument { .. })), "{:?}", result);
	}

	let error = optional(&document, "span", Root::Node(&text)).unwrap_err();
	assert_eq!(error.to_string(), "optional(): invalid root provided -> Text");
}

#[test]
fn by_id_is_document_wide() {
	let document = document();
	let app = by_id(&document, "app").unwrap();
	assert_eq!(document.tag_name(app).as_deref(), Some("DIV"));

	let error = by_id(&document, "banner").unwrap_err();
	assert_eq!(error.to_string(), "by_id(): not found -> #banner");

	document.remove(app);
	assert!(matches!(by_id(&document, "app"), Err(Error::NotFound { .. })));
}

#[test]
fn scoping() {
	let document = document();
	let grid = required(&document, r#"[data-ui="grid"]"#, Root::Document).unwrap();
	let second = required(&document, r#"[data-ui="card"]:nth-of-type(2)"#, Root::Node(&grid)).unwrap();

	let scope = Scope::new(&document, &second);
	let title = scope.exactly_one(r#"[data-ui="card.title"]"#).unwrap();
	assert_eq!(document.text_content(&title), "NAS");

	// The root itself is never a match.
	assert_eq!(scope.optional(r#"[data-ui="card"]"#).unwrap(), None);
	assert!(matches!(scope.required(r#"[data-ui="title"]"#), Err(Error::NotFound { .. })));

	let whole = Scope::document(&document);
	assert!(matches!(whole.root(), Root::Document));
	assert_eq!(whole.by_id("app").unwrap(), scope.by_id("app").unwrap());
}

#[test]
fn status_duplication() {
	let document = document();
	let toolbar = required(&document, r#"[data-ui="toolbar"]"#, Root::Document).unwrap();
	let status = exactly_one(&document, r#"[role="status"]"#, Root::Node(&toolbar)).unwrap();

	let copy = document.clone_node(status, true);
	document.append_child(toolbar, copy).unwrap();

	match exactly_one(&document, r#"[role="status"]"#, Root::Node(&toolbar)) {
		Err(Error::MultipleMatches { count, .. }) => assert_eq!(count, 2),
		other => panic!("expected MultipleMatches, got {:?}", other),
	}
	assert_eq!(required(&document, r#"[role="status"]"#, Root::Node(&toolbar)).unwrap(), status);
}

#[test]
fn selector_forms() {
	let document = MemoryDocument::parse(
		r#"<nav class="main dark" lang="en-GB">
			<a href="/home" class="link">Home</a>
			<a href="https://example.com/docs.pdf" class="link external">Docs</a>
			<span>sep</span>
			<a href="/about" class="link" hidden>About</a>
		</nav>
		<svg data-ui="icon"><circle r="1"/></svg>"#,
	);
	let count = |selector: &str| document.query_selector_all(Root::Document, selector).unwrap().len();

	assert_eq!(count("a"), 3);
	assert_eq!(count("A"), 3);
	assert_eq!(count(".link.external"), 1);
	assert_eq!(count("nav > a"), 3);
	assert_eq!(count("nav a:first-child"), 1);
	assert_eq!(count("a:last-of-type"), 1);
	assert_eq!(count("span + a"), 1);
	assert_eq!(count("span ~ a"), 1);
	assert_eq!(count("a:nth-of-type(odd)"), 2);
	assert_eq!(count("a:not([hidden])"), 2);
	assert_eq!(count(r#"a[href^="https"]"#), 1);
	assert_eq!(count(r#"a[href$=".pdf"]"#), 1);
	assert_eq!(count(r#"a[href*="about"]"#), 1);
	assert_eq!(count("[class~=external]"), 1);
	assert_eq!(count("[lang|=en]"), 1);
	assert_eq!(count("[LANG='EN-gb' i]"), 1);
	assert_eq!(count(r#"svg[data-ui="icon"] circle"#), 1);
	assert_eq!(count("a, span, a.link"), 4);
	assert_eq!(count("*"), 7);
}

#[test]
fn implied_end_tags() {
	let document = MemoryDocument::parse("<ul><li>one<li>two</ul>");
	assert_eq!(document.query_selector_all(Root::Document, "ul > li").unwrap().len(), 2);

	let document = MemoryDocument::parse(r#"<p>intro<div data-ui="status">x</div></p>"#);
	assert!(matches!(
		exactly_one(&document, r#"p [data-ui="status"]"#, Root::Document),
		Err(Error::NotFound { .. })
	));
	assert!(exactly_one(&document, r#"[data-ui="status"]"#, Root::Document).is_ok());
}

#[test]
fn extreme_nth_coefficients() {
	let document = MemoryDocument::parse("<ul><li>a</li><li>b</li></ul>");

	assert!(optional(&document, "li:nth-child(n-9223372036854775808)", Root::Document).unwrap().is_some());
	assert_eq!(optional(&document, "li:nth-child(-n-9223372036854775808)", Root::Document).unwrap(), None);
	assert_eq!(optional(&document, "li:nth-of-type(9223372036854775807n+9223372036854775807)", Root::Document).unwrap(), None);
}

#[test]
fn scope_any_family() {
	let document = MemoryDocument::parse(r#"<div data-ui="toolbar"><svg data-ui="icon"></svg></div>"#);
	let toolbar = required(&document, r#"[data-ui="toolbar"]"#, Root::Document).unwrap();
	let scope = Scope::new(&document, &toolbar);
	let icon = scope.required("svg").unwrap();

	assert!(matches!(scope.add_class(&icon, "active"), Err(Error::UnsupportedCapability { .. })));
	scope.add_class_any(&icon, "active").unwrap();
	assert!(!scope.toggle_class_any(&icon, "spin", Some(false)).unwrap());
	scope.set_attribute_any(&icon, "aria-hidden", true).unwrap();
	assert_eq!(document.outer_html(icon), r#"<svg data-ui="icon" class="active" aria-hidden="true"></svg>"#);

	scope.remove_class_any(&icon, "active").unwrap();
	assert!(!document.class_list_contains(&icon, "active"));
}
