//! `<select>` rendering

use crate::error::{ViewError, ViewResult};
use crate::helper::{HelperCore, ViewHelper};
use formation_forms::{Attributes, FormElement, Select, ValueOption, ValueOptionEntry};
use serde_json::Value;
use tracing::debug;

const SELECT_ATTRIBUTES: &[&str] = &[
	"name",
	"autocomplete",
	"autofocus",
	"disabled",
	"form",
	"multiple",
	"required",
	"size",
];

const OPTION_ATTRIBUTES: &[&str] = &["disabled", "selected", "label", "value"];

const OPTGROUP_ATTRIBUTES: &[&str] = &["disabled", "label"];

/// Renders a [`Select`] with its options and option groups
///
/// # Examples
///
/// ```
/// use formation_forms::{FormElement, Select};
/// use formation_view::FormSelect;
/// use serde_json::json;
///
/// let mut select = Select::new("color").with_choices([("r", "Red"), ("g", "Green")]);
/// select.set_value(json!("g")).unwrap();
///
/// assert_eq!(
///     FormSelect::new().render(&select).unwrap(),
///     "<select name=\"color\"><option value=\"r\">Red</option>\n<option value=\"g\" selected=\"selected\">Green</option></select>"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct FormSelect {
	core: HelperCore,
}

impl Default for FormSelect {
	fn default() -> Self {
		Self::new()
	}
}

impl FormSelect {
	pub fn new() -> Self {
		Self {
			core: HelperCore::new(SELECT_ATTRIBUTES),
		}
	}

	pub fn render(&self, element: &dyn FormElement) -> ViewResult<String> {
		let select = element.as_any().downcast_ref::<Select>().ok_or_else(|| {
			ViewError::InvalidArgument(
				"FormSelect::render requires that the element is a Select".to_string(),
			)
		})?;
		let name = select.name().ok_or_else(|| {
			ViewError::Domain(
				"FormSelect::render requires that the element has an assigned name; none discovered"
					.to_string(),
			)
		})?;

		let mut attributes = select.attributes().clone();
		attributes.shift_remove("type");
		let selected = selected_values(&select.value(), select.is_multiple())?;
		if select.is_multiple() && !name.ends_with("[]") {
			attributes.insert("name".to_string(), Value::String(format!("{name}[]")));
		}

		let mut options = Vec::new();
		if let Some(empty_option) = select.empty_option() {
			options.push(format!(
				"<option value=\"\">{}</option>",
				self.core.escape_html(empty_option)
			));
		}
		for entry in select.value_options() {
			options.push(self.render_entry(entry, &selected));
		}

		debug!(helper = "FormSelect", element = name, "rendering element");

		Ok(format!(
			"<select {}>{}</select>",
			self.core.create_attributes_string(&attributes),
			options.join("\n")
		))
	}

	fn render_entry(&self, entry: &ValueOptionEntry, selected: &[String]) -> String {
		match entry {
			ValueOptionEntry::Single(option) => self.render_option(option, selected),
			ValueOptionEntry::Group {
				label,
				disabled,
				options,
			} => {
				let mut attributes = Attributes::new();
				attributes.insert("label".to_string(), Value::String(label.clone()));
				attributes.insert("disabled".to_string(), Value::Bool(*disabled));
				let options: Vec<String> = options
					.iter()
					.map(|option| self.render_option(option, selected))
					.collect();
				format!(
					"<optgroup {}>{}</optgroup>",
					self.core
						.attributes_string_with(OPTGROUP_ATTRIBUTES, &attributes),
					options.join("\n")
				)
			}
		}
	}

	fn render_option(&self, option: &ValueOption, selected: &[String]) -> String {
		let mut attributes = Attributes::new();
		attributes.insert("value".to_string(), Value::String(option.value.clone()));
		attributes.insert(
			"selected".to_string(),
			Value::Bool(option.selected || selected.contains(&option.value)),
		);
		attributes.insert("disabled".to_string(), Value::Bool(option.disabled));
		for (key, value) in &option.attributes {
			attributes.insert(key.clone(), value.clone());
		}
		format!(
			"<option {}>{}</option>",
			self.core.attributes_string_with(OPTION_ATTRIBUTES, &attributes),
			self.core.escape_html(&option.label)
		)
	}
}

fn selected_values(value: &Value, multiple: bool) -> ViewResult<Vec<String>> {
	match value {
		Value::Null => Ok(vec![]),
		Value::String(text) => Ok(vec![text.clone()]),
		Value::Number(number) => Ok(vec![number.to_string()]),
		Value::Bool(flag) => Ok(vec![flag.to_string()]),
		Value::Array(items) if multiple => Ok(items
			.iter()
			.filter_map(|item| match item {
				Value::String(text) => Some(text.clone()),
				Value::Number(number) => Some(number.to_string()),
				_ => None,
			})
			.collect()),
		Value::Array(_) => Err(ViewError::InvalidArgument(
			"FormSelect::render does not allow multiple values when the multiple attribute is not set"
				.to_string(),
		)),
		Value::Object(_) => Err(ViewError::InvalidArgument(format!(
			"FormSelect::render expects a scalar or list value, got {value}"
		))),
	}
}

impl ViewHelper for FormSelect {
	fn core(&self) -> &HelperCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut HelperCore {
		&mut self.core
	}
}
