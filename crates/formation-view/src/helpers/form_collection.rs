//! `<fieldset>` rendering of element groups

use super::form_row::FormRow;
use crate::error::{ViewError, ViewResult};
use crate::helper::{HelperCore, ViewHelper};
use formation_forms::FormElement;
use tracing::debug;

const FIELDSET_ATTRIBUTES: &[&str] = &["disabled", "form", "name"];

/// Renders a fieldset and everything in it, nested fieldsets included
///
/// # Examples
///
/// ```
/// use formation_forms::{Element, Fieldset, FormElement};
/// use formation_view::FormCollection;
///
/// let mut fieldset = Fieldset::new("address");
/// fieldset.set_label("Address");
/// fieldset.add(Box::new(Element::new("street"))).unwrap();
///
/// assert_eq!(
///     FormCollection::new().render(&fieldset).unwrap(),
///     r#"<fieldset><legend>Address</legend><input name="street" type="text" value=""></fieldset>"#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct FormCollection {
	core: HelperCore,
	row_helper: FormRow,
	should_wrap: bool,
}

impl Default for FormCollection {
	fn default() -> Self {
		Self::new()
	}
}

impl FormCollection {
	pub fn new() -> Self {
		Self {
			core: HelperCore::new(FIELDSET_ATTRIBUTES),
			row_helper: FormRow::new(),
			should_wrap: true,
		}
	}

	/// Render rows only, without the `<fieldset>` and `<legend>`
	pub fn with_should_wrap(mut self, should_wrap: bool) -> Self {
		self.should_wrap = should_wrap;
		self
	}

	pub fn row_helper_mut(&mut self) -> &mut FormRow {
		&mut self.row_helper
	}

	pub fn render(&self, element: &dyn FormElement) -> ViewResult<String> {
		let fieldset = element.as_fieldset().ok_or_else(|| {
			ViewError::InvalidArgument(
				"FormCollection::render requires that the element is a fieldset".to_string(),
			)
		})?;
		debug!(
			helper = "FormCollection",
			element = element.name().unwrap_or_default(),
			children = fieldset.len(),
			"rendering element"
		);

		let mut markup = String::new();
		for (_, child) in fieldset.iter() {
			if child.as_fieldset().is_some() {
				markup.push_str(&self.render(child)?);
			} else {
				markup.push_str(&self.row_helper.render(child)?);
			}
		}
		if !self.should_wrap {
			return Ok(markup);
		}

		let mut attributes = element.attributes().clone();
		attributes.shift_remove("name");
		let rendered = self.core.create_attributes_string(&attributes);
		let open = if rendered.is_empty() {
			"<fieldset>".to_string()
		} else {
			format!("<fieldset {rendered}>")
		};
		let legend = element
			.label()
			.filter(|label| !label.is_empty())
			.map(|label| format!("<legend>{}</legend>", self.core.escape_html(label)))
			.unwrap_or_default();
		Ok(format!("{open}{legend}{markup}</fieldset>"))
	}
}

impl ViewHelper for FormCollection {
	fn core(&self) -> &HelperCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut HelperCore {
		&mut self.core
	}

	fn inner_helpers_mut(&mut self) -> Vec<&mut dyn ViewHelper> {
		vec![&mut self.row_helper]
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use formation_forms::{Element, Fieldset};
	use serde_json::json;

	#[test]
	fn test_nested_fieldsets() {
		let mut inner = Fieldset::new("inner");
		inner.add(Box::new(Element::new("b"))).unwrap();
		let mut outer = Fieldset::new("outer");
		outer.set_attribute("class", json!("group")).unwrap();
		outer.add(Box::new(Element::new("a"))).unwrap();
		outer.add(Box::new(inner)).unwrap();

		let markup = FormCollection::new().render(&outer).unwrap();

		assert_eq!(
			markup,
			concat!(
				r#"<fieldset class="group"><input name="a" type="text" value="">"#,
				r#"<fieldset><input name="b" type="text" value=""></fieldset></fieldset>"#,
			)
		);
	}

	#[test]
	fn test_without_wrapper() {
		let mut fieldset = Fieldset::new("outer");
		fieldset.set_label("Ignored");
		fieldset.add(Box::new(Element::new("a"))).unwrap();

		let markup = FormCollection::new()
			.with_should_wrap(false)
			.render(&fieldset)
			.unwrap();

		assert_eq!(markup, r#"<input name="a" type="text" value="">"#);
	}

	#[test]
	fn test_requires_fieldset() {
		assert!(matches!(
			FormCollection::new().render(&Element::new("a")),
			Err(ViewError::InvalidArgument(_))
		));
	}
}
