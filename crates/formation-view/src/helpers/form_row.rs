//! Label, element and errors rendered together

use super::form_element::FormElementHelper;
use super::form_element_errors::FormElementErrors;
use super::form_label::FormLabel;
use crate::error::ViewResult;
use crate::helper::{HelperCore, ViewHelper, append_class};
use formation_forms::{ElementKind, FormElement};
use serde_json::Value;

/// Where the label text goes relative to the element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelPosition {
	#[default]
	Prepend,
	Append,
}

/// Renders a full form row
///
/// An element with an `id` gets a separate `<label for>`; without one the
/// label wraps the element. Elements carrying messages get the input error
/// class added; composite selects pass it on to each of their selects.
///
/// # Examples
///
/// ```
/// use formation_forms::Element;
/// use formation_view::FormRow;
///
/// let element = Element::new("city").with_label("City");
///
/// assert_eq!(
///     FormRow::new().render(&element).unwrap(),
///     r#"<label>City<input name="city" type="text" value=""></label>"#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct FormRow {
	core: HelperCore,
	label_helper: FormLabel,
	element_helper: FormElementHelper,
	errors_helper: FormElementErrors,
	label_position: LabelPosition,
	render_errors: bool,
	input_error_class: String,
}

impl Default for FormRow {
	fn default() -> Self {
		Self::new()
	}
}

impl FormRow {
	pub fn new() -> Self {
		Self {
			core: HelperCore::new(&[]),
			label_helper: FormLabel::new(),
			element_helper: FormElementHelper::new(),
			errors_helper: FormElementErrors::new(),
			label_position: LabelPosition::default(),
			render_errors: true,
			input_error_class: "input-error".to_string(),
		}
	}

	pub fn with_label_position(mut self, position: LabelPosition) -> Self {
		self.label_position = position;
		self
	}

	pub fn set_label_position(&mut self, position: LabelPosition) {
		self.label_position = position;
	}

	pub fn with_render_errors(mut self, render_errors: bool) -> Self {
		self.render_errors = render_errors;
		self
	}

	pub fn with_input_error_class(mut self, class: &str) -> Self {
		self.input_error_class = class.to_string();
		self
	}

	pub fn element_helper_mut(&mut self) -> &mut FormElementHelper {
		&mut self.element_helper
	}

	pub fn render(&self, element: &dyn FormElement) -> ViewResult<String> {
		let element_markup = if !element.messages().is_empty() && !self.input_error_class.is_empty() {
			let mut flagged = element.clone_box();
			let class = append_class(flagged.attribute("class"), &self.input_error_class);
			flagged.set_attribute("class", Value::String(class))?;
			self.element_helper.render(flagged.as_ref())?
		} else {
			self.element_helper.render(element)?
		};

		let errors = if self.render_errors {
			self.errors_helper.render(element)
		} else {
			String::new()
		};

		let hidden = element.kind() == ElementKind::Input("hidden".to_string());
		let Some(label) = element.label().filter(|label| !label.is_empty() && !hidden) else {
			return Ok(format!("{element_markup}{errors}"));
		};

		let markup = if element.attribute("id").is_some_and(|id| !id.is_null()) {
			let label_markup = self.label_helper.render(element)?;
			match self.label_position {
				LabelPosition::Prepend => format!("{label_markup}{element_markup}"),
				LabelPosition::Append => format!("{element_markup}{label_markup}"),
			}
		} else {
			let open = self.label_helper.open_tag(element);
			let text = self.core.escape_html(label);
			let close = self.label_helper.close_tag();
			match self.label_position {
				LabelPosition::Prepend => format!("{open}{text}{element_markup}{close}"),
				LabelPosition::Append => format!("{open}{element_markup}{text}{close}"),
			}
		};
		Ok(format!("{markup}{errors}"))
	}
}

impl ViewHelper for FormRow {
	fn core(&self) -> &HelperCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut HelperCore {
		&mut self.core
	}

	fn inner_helpers_mut(&mut self) -> Vec<&mut dyn ViewHelper> {
		vec![
			&mut self.label_helper,
			&mut self.element_helper,
			&mut self.errors_helper,
		]
	}
}
