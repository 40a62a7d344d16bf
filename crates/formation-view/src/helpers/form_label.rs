//! `<label>` rendering

use crate::error::{ViewError, ViewResult};
use crate::helper::{HelperCore, ViewHelper};
use formation_forms::FormElement;

const LABEL_ATTRIBUTES: &[&str] = &["for", "form"];

/// Renders an element's label
///
/// The `for` attribute comes from the element's `id` unless the label
/// attributes already carry one.
#[derive(Debug, Clone)]
pub struct FormLabel {
	core: HelperCore,
}

impl Default for FormLabel {
	fn default() -> Self {
		Self::new()
	}
}

impl FormLabel {
	pub fn new() -> Self {
		Self {
			core: HelperCore::new(LABEL_ATTRIBUTES),
		}
	}

	pub fn render(&self, element: &dyn FormElement) -> ViewResult<String> {
		let label = element.label().ok_or_else(|| {
			ViewError::Domain(
				"FormLabel::render requires that the element has a label; none discovered"
					.to_string(),
			)
		})?;
		Ok(format!(
			"{}{}{}",
			self.open_tag(element),
			self.core.escape_html(label),
			self.close_tag()
		))
	}

	pub fn open_tag(&self, element: &dyn FormElement) -> String {
		let mut attributes = element.label_attributes().clone();
		if !attributes.contains_key("for") {
			if let Some(id) = element.attribute("id").filter(|id| !id.is_null()) {
				attributes.insert("for".to_string(), id.clone());
			}
		}
		let rendered = self.core.create_attributes_string(&attributes);
		if rendered.is_empty() {
			"<label>".to_string()
		} else {
			format!("<label {rendered}>")
		}
	}

	pub fn close_tag(&self) -> &'static str {
		"</label>"
	}
}

impl ViewHelper for FormLabel {
	fn core(&self) -> &HelperCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut HelperCore {
		&mut self.core
	}
}
