use super::{Namespace, NodeId};
use hashbrown::HashSet;

#[derive(Debug, Clone)]
pub(crate) enum Data {
	Document,
	Element(ElementData),
	Text(String),
	Comment(String),
}

#[derive(Debug, Clone)]
pub(crate) struct ElementData {
	pub(crate) namespace: Namespace,
	pub(crate) local_name: String,
	pub(crate) attributes: Vec<(String, String)>,
}

impl ElementData {
	pub(crate) fn new(namespace: Namespace, local_name: &str) -> Self {
		Self {
			namespace,
			local_name: match namespace {
				Namespace::Html => local_name.to_ascii_lowercase(),
				Namespace::Svg | Namespace::MathMl => local_name.to_owned(),
			},
			attributes: Vec::new(),
		}
	}

	fn same_name(&self, a: &str, b: &str) -> bool {
		match self.namespace {
			Namespace::Html => a.eq_ignore_ascii_case(b),
			Namespace::Svg | Namespace::MathMl => a == b,
		}
	}

	pub(crate) fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes.iter().find(|(n, _)| self.same_name(n, name)).map(|(_, v)| v.as_str())
	}

	pub(crate) fn set_attribute(&mut self, name: &str, value: String) {
		let position = self.attributes.iter().position(|(n, _)| self.same_name(n, name));
		match position {
			Some(i) => self.attributes[i].1 = value,
			None => {
				let name = match self.namespace {
					Namespace::Html => name.to_ascii_lowercase(),
					Namespace::Svg | Namespace::MathMl => name.to_owned(),
				};
				self.attributes.push((name, value))
			}
		}
	}

	/// Class tokens in order, without duplicates.
	pub(crate) fn classes(&self) -> Vec<&str> {
		let mut seen = HashSet::new();
		self.attribute("class")
			.unwrap_or("")
			.split_ascii_whitespace()
			.filter(|class| seen.insert(*class))
			.collect()
	}

	pub(crate) fn set_classes(&mut self, classes: &[&str]) {
		let value = classes.join(" ");
		self.set_attribute("class", value);
	}

	/// Declarations of the `style` attribute, in order.
	pub(crate) fn style(&self) -> Vec<(String, String)> {
		self.attribute("style")
			.unwrap_or("")
			.split(';')
			.filter_map(|declaration| {
				let colon = declaration.find(':')?;
				let property = normalize_property(declaration[..colon].trim());
				let value = declaration[colon + 1..].trim();
				if property.is_empty() || value.is_empty() {
					None
				} else {
					Some((property, value.to_owned()))
				}
			})
			.collect()
	}

	pub(crate) fn set_style(&mut self, declarations: &[(String, String)]) {
		let mut value = String::new();
		for (property, v) in declarations {
			if !value.is_empty() {
				value.push(' ');
			}
			value.push_str(&format!("{}: {};", property, v));
		}
		self.set_attribute("style", value);
	}
}

/// Custom properties are case-sensitive, everything else isn't.
pub(crate) fn normalize_property(property: &str) -> String {
	if property.starts_with("--") {
		property.to_owned()
	} else {
		property.to_ascii_lowercase()
	}
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
	pub(crate) parent: Option<NodeId>,
	pub(crate) children: Vec<NodeId>,
	pub(crate) data: Data,
}

/// Node storage. Slots are never reused, so a [`NodeId`] keeps its identity after detaching.
#[derive(Debug)]
pub(crate) struct Tree {
	nodes: Vec<NodeData>,
	pub(crate) active_element: Option<NodeId>,
}

const VOID_ELEMENTS: &[&str] = &["area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr"];

fn is_void(namespace: Namespace, local_name: &str) -> bool {
	namespace == Namespace::Html && VOID_ELEMENTS.contains(&local_name)
}

impl Tree {
	pub(crate) const DOCUMENT: NodeId = NodeId(0);

	pub(crate) fn new() -> Self {
		Self {
			nodes: vec![NodeData {
				parent: None,
				children: Vec::new(),
				data: Data::Document,
			}],
			active_element: None,
		}
	}

	pub(crate) fn contains_id(&self, node: NodeId) -> bool {
		node.0 < self.nodes.len()
	}

	pub(crate) fn get(&self, node: NodeId) -> &NodeData {
		&self.nodes[node.0]
	}

	pub(crate) fn get_mut(&mut self, node: NodeId) -> &mut NodeData {
		&mut self.nodes[node.0]
	}

	pub(crate) fn create(&mut self, data: Data) -> NodeId {
		self.nodes.push(NodeData {
			parent: None,
			children: Vec::new(),
			data,
		});
		NodeId(self.nodes.len() - 1)
	}

	pub(crate) fn element(&self, node: NodeId) -> Option<&ElementData> {
		match &self.get(node).data {
			Data::Element(element) => Some(element),
			_ => None,
		}
	}

	pub(crate) fn element_mut(&mut self, node: NodeId) -> Option<&mut ElementData> {
		match &mut self.get_mut(node).data {
			Data::Element(element) => Some(element),
			_ => None,
		}
	}

	pub(crate) fn parent(&self, node: NodeId) -> Option<NodeId> {
		self.get(node).parent
	}

	pub(crate) fn parent_element(&self, node: NodeId) -> Option<NodeId> {
		self.parent(node).filter(|&parent| self.element(parent).is_some())
	}

	pub(crate) fn element_children(&self, parent: NodeId) -> Vec<NodeId> {
		self.get(parent).children.iter().copied().filter(|&child| self.element(child).is_some()).collect()
	}

	pub(crate) fn previous_element_sibling(&self, node: NodeId) -> Option<NodeId> {
		let siblings = &self.get(self.parent(node)?).children;
		let index = siblings.iter().position(|&sibling| sibling == node)?;
		siblings[..index].iter().rev().copied().find(|&sibling| self.element(sibling).is_some())
	}

	/// Inclusive.
	pub(crate) fn is_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
		loop {
			if node == ancestor {
				return true;
			}
			match self.parent(node) {
				Some(parent) => node = parent,
				None => return false,
			}
		}
	}

	pub(crate) fn is_connected(&self, node: NodeId) -> bool {
		self.is_ancestor(Self::DOCUMENT, node)
	}

	/// Descendants of `root` in document order, excluding `root`.
	pub(crate) fn descendants(&self, root: NodeId) -> Vec<NodeId> {
		let mut descendants = Vec::new();
		let mut stack: Vec<NodeId> = self.get(root).children.iter().rev().copied().collect();
		while let Some(node) = stack.pop() {
			descendants.push(node);
			stack.extend(self.get(node).children.iter().rev().copied());
		}
		descendants
	}

	pub(crate) fn detach(&mut self, node: NodeId) {
		if let Some(parent) = self.get_mut(node).parent.take() {
			self.get_mut(parent).children.retain(|&child| child != node);
		}
	}

	/// `child` must not be an inclusive ancestor of `parent`.
	pub(crate) fn insert(&mut self, parent: NodeId, index: usize, child: NodeId) {
		self.detach(child);
		self.get_mut(child).parent = Some(parent);
		let children = &mut self.get_mut(parent).children;
		let index = index.min(children.len());
		children.insert(index, child);
	}

	pub(crate) fn append(&mut self, parent: NodeId, child: NodeId) {
		self.insert(parent, usize::MAX, child)
	}

	pub(crate) fn remove_children(&mut self, parent: NodeId) {
		for child in core::mem::take(&mut self.get_mut(parent).children) {
			self.get_mut(child).parent = None;
		}
	}

	pub(crate) fn clone_node(&mut self, node: NodeId, deep: bool) -> NodeId {
		let data = self.get(node).data.clone();
		let copy = self.create(data);
		if deep {
			for child in self.get(node).children.clone() {
				let child_copy = self.clone_node(child, true);
				self.append(copy, child_copy);
			}
		}
		copy
	}

	pub(crate) fn text_content(&self, node: NodeId) -> String {
		match &self.get(node).data {
			Data::Text(text) | Data::Comment(text) => text.clone(),
			Data::Document => String::new(),
			Data::Element(_) => self
				.descendants(node)
				.into_iter()
				.filter_map(|descendant| match &self.get(descendant).data {
					Data::Text(text) => Some(text.as_str()),
					_ => None,
				})
				.collect(),
		}
	}

	pub(crate) fn set_text_content(&mut self, node: NodeId, text: &str) {
		if self.element(node).is_some() {
			self.remove_children(node);
			if !text.is_empty() {
				let text = self.create(Data::Text(text.to_owned()));
				self.append(node, text);
			}
		} else if let Data::Text(data) | Data::Comment(data) = &mut self.get_mut(node).data {
			*data = text.to_owned();
		}
	}

	pub(crate) fn serialize_children(&self, node: NodeId, out: &mut String) {
		for &child in &self.get(node).children {
			self.serialize(child, out)
		}
	}

	pub(crate) fn serialize(&self, node: NodeId, out: &mut String) {
		match &self.get(node).data {
			Data::Document => self.serialize_children(node, out),
			Data::Text(text) => {
				let raw_text = self.element(self.parent(node).unwrap_or(node)).map_or(false, |parent| is_raw_text(&parent.local_name));
				if raw_text {
					out.push_str(text)
				} else {
					escape(text, false, out)
				}
			}
			Data::Comment(comment) => {
				out.push_str("<!--");
				out.push_str(comment);
				out.push_str("-->");
			}
			Data::Element(element) => {
				out.push('<');
				out.push_str(&element.local_name);
				for (name, value) in &element.attributes {
					out.push(' ');
					out.push_str(name);
					out.push_str("=\"");
					escape(value, true, out);
					out.push('"');
				}
				out.push('>');
				if is_void(element.namespace, &element.local_name) {
					return;
				}
				self.serialize_children(node, out);
				out.push_str("</");
				out.push_str(&element.local_name);
				out.push('>');
			}
		}
	}
}

fn is_raw_text(local_name: &str) -> bool {
	local_name == "script" || local_name == "style"
}

fn escape(text: &str, attribute: bool, out: &mut String) {
	for c in text.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'\u{a0}' => out.push_str("&nbsp;"),
			'"' if attribute => out.push_str("&quot;"),
			'<' if !attribute => out.push_str("&lt;"),
			'>' if !attribute => out.push_str("&gt;"),
			c => out.push(c),
		}
	}
}
