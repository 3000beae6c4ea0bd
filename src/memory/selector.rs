//! A CSS selector subset for [`MemoryDocument`](`super::MemoryDocument`).
//!
//! Anything outside this subset is rejected like a syntax error, the same way a browser's
//! [***querySelector***](https://developer.mozilla.org/en-US/docs/Web/API/Document/querySelector) throws.

use super::{tree::Tree, Namespace, NodeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorList(Vec<Complex>);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex(Vec<Part>);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Part {
	compound: Compound,
	// Relation to the part on the left.
	combinator: Option<Combinator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
	Descendant,
	Child,
	NextSibling,
	SubsequentSibling,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
	tag: Option<String>,
	id: Option<String>,
	classes: Vec<String>,
	attributes: Vec<AttributeCondition>,
	pseudo_classes: Vec<PseudoClass>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeCondition {
	name: String,
	test: Option<(AttributeOperator, String)>,
	case_insensitive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttributeOperator {
	Equals,
	Includes,
	DashMatch,
	Prefix,
	Suffix,
	Substring,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PseudoClass {
	FirstChild,
	LastChild,
	OnlyChild,
	FirstOfType,
	LastOfType,
	NthChild(Nth),
	NthOfType(Nth),
	Not(SelectorList),
}

/// `An+B`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Nth {
	a: i64,
	b: i64,
}

impl Nth {
	/// Computed in `i128`, so that no `i64` coefficients can overflow.
	fn matches(self, position: usize) -> bool {
		let n = position as i128;
		let (a, b) = (i128::from(self.a), i128::from(self.b));
		if a == 0 {
			return n == b;
		}
		let offset = n - b;
		offset % a == 0 && offset / a >= 0
	}
}

impl SelectorList {
	/// # Errors
	///
	/// A short description of what's wrong with `selector`.
	pub(crate) fn parse(selector: &str) -> Result<Self, String> {
		let mut cursor = Cursor { input: selector, at: 0 };
		let list = cursor.list(false)?;
		if !cursor.is_done() {
			return Err(format!("'{}' is not a valid selector", selector));
		}
		Ok(list)
	}

	pub(crate) fn matches(&self, tree: &Tree, node: NodeId) -> bool {
		self.0.iter().any(|complex| matches_parts(tree, node, &complex.0))
	}
}

struct Cursor<'a> {
	input: &'a str,
	at: usize,
}

impl<'a> Cursor<'a> {
	fn rest(&self) -> &'a str {
		&self.input[self.at..]
	}

	fn peek(&self) -> Option<char> {
		self.rest().chars().next()
	}

	fn bump(&mut self) -> Option<char> {
		let c = self.peek()?;
		self.at += c.len_utf8();
		Some(c)
	}

	fn eat(&mut self, c: char) -> bool {
		if self.peek() == Some(c) {
			self.at += c.len_utf8();
			true
		} else {
			false
		}
	}

	fn is_done(&self) -> bool {
		self.at >= self.input.len()
	}

	/// Returns whether any whitespace was skipped.
	fn skip_whitespace(&mut self) -> bool {
		let start = self.at;
		while matches!(self.peek(), Some(c) if c.is_ascii_whitespace()) {
			self.at += 1;
		}
		self.at != start
	}

	fn error(&self) -> String {
		format!("'{}' is not a valid selector (at byte {})", self.input, self.at)
	}

	fn list(&mut self, nested: bool) -> Result<SelectorList, String> {
		let mut complexes = Vec::new();
		loop {
			self.skip_whitespace();
			complexes.push(self.complex()?);
			self.skip_whitespace();
			if self.eat(',') {
				continue;
			}
			if self.is_done() || (nested && self.peek() == Some(')')) {
				break;
			}
			return Err(self.error());
		}
		Ok(SelectorList(complexes))
	}

	fn complex(&mut self) -> Result<Complex, String> {
		let mut parts = vec![Part {
			compound: self.compound()?,
			combinator: None,
		}];
		loop {
			let had_whitespace = self.skip_whitespace();
			let combinator = match self.peek() {
				None | Some(',' | ')') => break,
				Some('>') => Combinator::Child,
				Some('+') => Combinator::NextSibling,
				Some('~') => Combinator::SubsequentSibling,
				Some(_) if had_whitespace => Combinator::Descendant,
				Some(_) => return Err(self.error()),
			};
			if combinator != Combinator::Descendant {
				self.bump();
				self.skip_whitespace();
			}
			parts.push(Part {
				compound: self.compound()?,
				combinator: Some(combinator),
			});
		}
		Ok(Complex(parts))
	}

	fn compound(&mut self) -> Result<Compound, String> {
		let start = self.at;
		let mut compound = Compound::default();

		if !self.eat('*') && self.peek().map_or(false, is_ident_start) {
			compound.tag = Some(self.ident()?);
		}

		loop {
			match self.peek() {
				Some('#') => {
					self.bump();
					let id = self.ident()?;
					compound.id = Some(id);
				}
				Some('.') => {
					self.bump();
					compound.classes.push(self.ident()?);
				}
				Some('[') => {
					self.bump();
					compound.attributes.push(self.attribute()?);
				}
				Some(':') => {
					self.bump();
					compound.pseudo_classes.push(self.pseudo_class()?);
				}
				_ => break,
			}
		}

		if self.at == start {
			return Err(self.error());
		}
		Ok(compound)
	}

	fn ident(&mut self) -> Result<String, String> {
		let mut ident = String::new();
		while let Some(c) = self.peek() {
			if c == '\\' {
				self.bump();
				ident.push(self.bump().ok_or_else(|| self.error())?);
			} else if is_ident_char(c) {
				self.bump();
				ident.push(c);
			} else {
				break;
			}
		}
		if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
			return Err(self.error());
		}
		Ok(ident)
	}

	fn attribute(&mut self) -> Result<AttributeCondition, String> {
		self.skip_whitespace();
		let name = self.ident()?;
		self.skip_whitespace();

		let operator = match self.peek() {
			Some(']') => {
				self.bump();
				return Ok(AttributeCondition {
					name,
					test: None,
					case_insensitive: false,
				});
			}
			Some('=') => AttributeOperator::Equals,
			Some('~') => AttributeOperator::Includes,
			Some('|') => AttributeOperator::DashMatch,
			Some('^') => AttributeOperator::Prefix,
			Some('$') => AttributeOperator::Suffix,
			Some('*') => AttributeOperator::Substring,
			_ => return Err(self.error()),
		};
		self.bump();
		if operator != AttributeOperator::Equals && !self.eat('=') {
			return Err(self.error());
		}
		self.skip_whitespace();

		let value = match self.peek() {
			Some(quote @ ('"' | '\'')) => {
				self.bump();
				let mut value = String::new();
				loop {
					match self.bump() {
						Some('\\') => value.push(self.bump().ok_or_else(|| self.error())?),
						Some(c) if c == quote => break,
						Some(c) => value.push(c),
						None => return Err(self.error()),
					}
				}
				value
			}
			_ => self.ident()?,
		};

		self.skip_whitespace();
		let case_insensitive = matches!(self.peek(), Some('i' | 'I'));
		if matches!(self.peek(), Some('i' | 'I' | 's' | 'S')) {
			self.bump();
		}
		self.skip_whitespace();
		if !self.eat(']') {
			return Err(self.error());
		}

		Ok(AttributeCondition {
			name,
			test: Some((operator, value)),
			case_insensitive,
		})
	}

	fn pseudo_class(&mut self) -> Result<PseudoClass, String> {
		let name = self.ident()?.to_ascii_lowercase();
		let pseudo_class = match name.as_str() {
			"first-child" => PseudoClass::FirstChild,
			"last-child" => PseudoClass::LastChild,
			"only-child" => PseudoClass::OnlyChild,
			"first-of-type" => PseudoClass::FirstOfType,
			"last-of-type" => PseudoClass::LastOfType,
			"nth-child" => PseudoClass::NthChild(self.nth_argument()?),
			"nth-of-type" => PseudoClass::NthOfType(self.nth_argument()?),
			"not" => {
				if !self.eat('(') {
					return Err(self.error());
				}
				let list = self.list(true)?;
				if !self.eat(')') {
					return Err(self.error());
				}
				PseudoClass::Not(list)
			}
			_ => return Err(format!("'{}' is not a valid selector (unsupported :{})", self.input, name)),
		};
		Ok(pseudo_class)
	}

	fn nth_argument(&mut self) -> Result<Nth, String> {
		if !self.eat('(') {
			return Err(self.error());
		}
		let end = self.rest().find(')').ok_or_else(|| self.error())?;
		let argument = &self.rest()[..end];
		let nth = parse_nth(argument).ok_or_else(|| self.error())?;
		self.at += end + 1;
		Ok(nth)
	}
}

fn is_ident_start(c: char) -> bool {
	c.is_ascii_alphabetic() || c == '_' || c == '-' || c == '\\' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
}

fn parse_nth(argument: &str) -> Option<Nth> {
	let argument: String = argument.chars().filter(|c| !c.is_ascii_whitespace()).collect::<String>().to_ascii_lowercase();
	match argument.as_str() {
		"odd" => return Some(Nth { a: 2, b: 1 }),
		"even" => return Some(Nth { a: 2, b: 0 }),
		"" => return None,
		_ => (),
	}

	match argument.find('n') {
		None => Some(Nth { a: 0, b: argument.parse().ok()? }),
		Some(n) => {
			let a = match &argument[..n] {
				"" | "+" => 1,
				"-" => -1,
				a => a.parse().ok()?,
			};
			let b = match &argument[n + 1..] {
				"" => 0,
				b if b.starts_with('+') || b.starts_with('-') => b.parse().ok()?,
				_ => return None,
			};
			Some(Nth { a, b })
		}
	}
}

fn matches_parts(tree: &Tree, node: NodeId, parts: &[Part]) -> bool {
	let (last, rest) = match parts.split_last() {
		Some(split) => split,
		None => return true,
	};
	if !matches_compound(tree, node, &last.compound) {
		return false;
	}
	if rest.is_empty() {
		return true;
	}

	match last.combinator {
		None => false,
		Some(Combinator::Child) => tree.parent_element(node).map_or(false, |parent| matches_parts(tree, parent, rest)),
		Some(Combinator::Descendant) => {
			let mut ancestor = tree.parent_element(node);
			while let Some(current) = ancestor {
				if matches_parts(tree, current, rest) {
					return true;
				}
				ancestor = tree.parent_element(current);
			}
			false
		}
		Some(Combinator::NextSibling) => tree.previous_element_sibling(node).map_or(false, |sibling| matches_parts(tree, sibling, rest)),
		Some(Combinator::SubsequentSibling) => {
			let mut sibling = tree.previous_element_sibling(node);
			while let Some(current) = sibling {
				if matches_parts(tree, current, rest) {
					return true;
				}
				sibling = tree.previous_element_sibling(current);
			}
			false
		}
	}
}

fn matches_compound(tree: &Tree, node: NodeId, compound: &Compound) -> bool {
	let element = match tree.element(node) {
		Some(element) => element,
		None => return false,
	};

	if let Some(tag) = &compound.tag {
		let matches = match element.namespace {
			Namespace::Html => element.local_name.eq_ignore_ascii_case(tag),
			Namespace::Svg | Namespace::MathMl => element.local_name == *tag,
		};
		if !matches {
			return false;
		}
	}

	if let Some(id) = &compound.id {
		if element.attribute("id") != Some(id.as_str()) {
			return false;
		}
	}

	if !compound.classes.is_empty() {
		let class = element.attribute("class").unwrap_or("");
		if !compound.classes.iter().all(|wanted| class.split_ascii_whitespace().any(|c| c == wanted)) {
			return false;
		}
	}

	compound.attributes.iter().all(|condition| matches_attribute(element.attribute(&condition.name), condition))
		&& compound.pseudo_classes.iter().all(|pseudo_class| matches_pseudo_class(tree, node, pseudo_class))
}

fn matches_attribute(actual: Option<&str>, condition: &AttributeCondition) -> bool {
	let actual = match actual {
		Some(actual) => actual,
		None => return false,
	};
	let (operator, expected) = match &condition.test {
		Some(test) => test,
		None => return true,
	};

	let (actual, expected) = if condition.case_insensitive {
		(actual.to_lowercase(), expected.to_lowercase())
	} else {
		(actual.to_owned(), expected.clone())
	};

	match operator {
		AttributeOperator::Equals => actual == expected,
		AttributeOperator::Includes => !expected.is_empty() && actual.split_ascii_whitespace().any(|word| word == expected),
		AttributeOperator::DashMatch => actual == expected || actual.starts_with(&format!("{}-", expected)),
		AttributeOperator::Prefix => !expected.is_empty() && actual.starts_with(&expected),
		AttributeOperator::Suffix => !expected.is_empty() && actual.ends_with(&expected),
		AttributeOperator::Substring => !expected.is_empty() && actual.contains(&expected),
	}
}

fn matches_pseudo_class(tree: &Tree, node: NodeId, pseudo_class: &PseudoClass) -> bool {
	let siblings = match tree.parent(node) {
		Some(parent) => tree.element_children(parent),
		None => return matches!(pseudo_class, PseudoClass::Not(list) if !list.matches(tree, node)),
	};
	let position = siblings.iter().position(|&sibling| sibling == node).map_or(0, |i| i + 1);
	let same_type = || -> Vec<NodeId> {
		let name = tree.element(node).map(|element| (element.namespace, element.local_name.to_ascii_lowercase()));
		siblings
			.iter()
			.copied()
			.filter(|&sibling| tree.element(sibling).map(|element| (element.namespace, element.local_name.to_ascii_lowercase())) == name)
			.collect()
	};

	match pseudo_class {
		PseudoClass::FirstChild => position == 1,
		PseudoClass::LastChild => position == siblings.len(),
		PseudoClass::OnlyChild => siblings.len() == 1,
		PseudoClass::FirstOfType => same_type().first() == Some(&node),
		PseudoClass::LastOfType => same_type().last() == Some(&node),
		PseudoClass::NthChild(nth) => nth.matches(position),
		PseudoClass::NthOfType(nth) => {
			let same_type = same_type();
			same_type.iter().position(|&sibling| sibling == node).map_or(false, |i| nth.matches(i + 1))
		}
		PseudoClass::Not(list) => !list.matches(tree, node),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejects_malformed() {
		for selector in &["", " ", "[data-ui", "div >", "> div", "a,,b", ":hover", "#1a", "div..x", "[x~y]", ":nth-child()", "a)"] {
			assert!(SelectorList::parse(selector).is_err(), "{:?} should not parse", selector);
		}
	}

	#[test]
	fn accepts_common_forms() {
		for selector in &[
			"*",
			"div",
			"#app",
			".a.b",
			r#"[data-ui="card.title"]"#,
			"[data-ui='status' i]",
			"svg[data-ui=icon]",
			"ul > li + li ~ li",
			"div p",
			"a, b ,c",
			r#"[data-ui="card"]:nth-of-type(2)"#,
			"li:nth-child(2n+1)",
			"li:not(.hidden, [aria-hidden])",
			"#card\\.title",
		] {
			assert!(SelectorList::parse(selector).is_ok(), "{:?} should parse", selector);
		}
	}

	#[test]
	fn nth() {
		assert_eq!(parse_nth("odd"), Some(Nth { a: 2, b: 1 }));
		assert_eq!(parse_nth(" 3 "), Some(Nth { a: 0, b: 3 }));
		assert_eq!(parse_nth("-n + 3"), Some(Nth { a: -1, b: 3 }));
		assert_eq!(parse_nth("2n"), Some(Nth { a: 2, b: 0 }));

		let first_three = Nth { a: -1, b: 3 };
		assert!(first_three.matches(1));
		assert!(first_three.matches(3));
		assert!(!first_three.matches(4));

		let even = Nth { a: 2, b: 0 };
		assert!(even.matches(2));
		assert!(!even.matches(3));
	}

	#[test]
	fn nth_extremes() {
		assert_eq!(parse_nth("n-9223372036854775808"), Some(Nth { a: 1, b: i64::MIN }));

		let all = Nth { a: 1, b: i64::MIN };
		assert!(all.matches(1));
		assert!(all.matches(usize::MAX));

		let none = Nth { a: -1, b: i64::MIN };
		assert!(!none.matches(1));

		let wide = Nth { a: i64::MIN, b: i64::MAX };
		assert!(!wide.matches(1));
		assert!(!Nth { a: i64::MAX, b: i64::MIN }.matches(usize::MAX));
		assert!(!Nth { a: 0, b: i64::MAX }.matches(0));
	}
}
