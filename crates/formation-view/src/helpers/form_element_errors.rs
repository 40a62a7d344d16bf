//! Validation message list rendering

use crate::helper::{HelperCore, ViewHelper};
use formation_forms::{Attributes, FormElement};

/// Renders an element's validation messages as `<ul><li>..</li></ul>`
#[derive(Debug, Clone)]
pub struct FormElementErrors {
	core: HelperCore,
	attributes: Attributes,
}

impl Default for FormElementErrors {
	fn default() -> Self {
		Self::new()
	}
}

impl FormElementErrors {
	pub fn new() -> Self {
		Self {
			core: HelperCore::new(&[]),
			attributes: Attributes::new(),
		}
	}

	/// Attributes placed on the `<ul>`
	pub fn with_attributes(mut self, attributes: Attributes) -> Self {
		self.attributes = attributes;
		self
	}

	/// Empty when the element has no messages
	pub fn render(&self, element: &dyn FormElement) -> String {
		let messages = element.messages();
		if messages.is_empty() {
			return String::new();
		}
		let items: Vec<String> = messages
			.iter()
			.map(|message| format!("<li>{}</li>", self.core.escape_html(message)))
			.collect();
		let attributes = self.core.create_attributes_string(&self.attributes);
		let open = if attributes.is_empty() {
			"<ul>".to_string()
		} else {
			format!("<ul {attributes}>")
		};
		format!("{open}{}</ul>", items.concat())
	}
}

impl ViewHelper for FormElementErrors {
	fn core(&self) -> &HelperCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut HelperCore {
		&mut self.core
	}
}
