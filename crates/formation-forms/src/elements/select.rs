//! Select element with flat and grouped value options

use crate::element::{
	Attributes, Element, ElementKind, FormElement, bool_option, is_truthy, scalar_to_string,
};
use crate::error::{FormError, FormResult};
use crate::input_filter::InputSpecification;
use crate::validators::Validator;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;

/// A single `<option>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueOption {
	pub value: String,
	pub label: String,
	#[serde(default)]
	pub selected: bool,
	#[serde(default)]
	pub disabled: bool,
	#[serde(default)]
	pub attributes: Attributes,
}

impl ValueOption {
	pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			label: label.into(),
			selected: false,
			disabled: false,
			attributes: Attributes::new(),
		}
	}
}

/// An option or an `<optgroup>` of options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueOptionEntry {
	Group {
		label: String,
		#[serde(default)]
		disabled: bool,
		options: Vec<ValueOption>,
	},
	Single(ValueOption),
}

impl ValueOptionEntry {
	pub fn option(value: impl Into<String>, label: impl Into<String>) -> Self {
		Self::Single(ValueOption::new(value, label))
	}
}

/// `<select>` element
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
	element: Element,
	value_options: Vec<ValueOptionEntry>,
	empty_option: Option<String>,
	disable_in_array_validator: bool,
}

impl Select {
	/// Create a new select element
	///
	/// # Examples
	///
	/// ```
	/// use formation_forms::{FormElement, Select};
	///
	/// let select = Select::new("color").with_choices([("r", "Red"), ("g", "Green")]);
	/// assert_eq!(select.option_values(), vec!["r", "g"]);
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			element: Element::with_type(name, "select"),
			value_options: vec![],
			empty_option: None,
			disable_in_array_validator: false,
		}
	}
	pub fn with_value_options(mut self, value_options: Vec<ValueOptionEntry>) -> Self {
		self.value_options = value_options;
		self
	}
	/// Builder taking `(value, label)` pairs
	pub fn with_choices<I, V, L>(self, choices: I) -> Self
	where
		I: IntoIterator<Item = (V, L)>,
		V: Into<String>,
		L: Into<String>,
	{
		let options = choices
			.into_iter()
			.map(|(value, label)| ValueOptionEntry::option(value, label))
			.collect();
		self.with_value_options(options)
	}
	pub fn with_empty_option(mut self, empty_option: impl Into<String>) -> Self {
		self.empty_option = Some(empty_option.into());
		self
	}
	pub fn value_options(&self) -> &[ValueOptionEntry] {
		&self.value_options
	}
	pub fn set_value_options(&mut self, value_options: Vec<ValueOptionEntry>) {
		self.value_options = value_options;
	}
	pub fn empty_option(&self) -> Option<&str> {
		self.empty_option.as_deref()
	}
	pub fn set_empty_option(&mut self, empty_option: Option<String>) {
		self.empty_option = empty_option;
	}
	/// Values of every option, groups flattened
	pub fn option_values(&self) -> Vec<String> {
		self.value_options
			.iter()
			.flat_map(|entry| match entry {
				ValueOptionEntry::Single(option) => vec![option.value.clone()],
				ValueOptionEntry::Group { options, .. } => {
					options.iter().map(|option| option.value.clone()).collect()
				}
			})
			.collect()
	}
	pub fn is_multiple(&self) -> bool {
		self.element
			.attributes
			.get("multiple")
			.is_some_and(is_truthy)
	}
}

/// Parse the `value_options` option: a `{value: label}` object or a list
/// of strings, option objects and group objects
fn parse_value_options(value: &Value) -> FormResult<Vec<ValueOptionEntry>> {
	match value {
		Value::Object(map) => map
			.iter()
			.map(|(key, entry)| match entry {
				Value::String(label) => Ok(ValueOptionEntry::option(key.clone(), label.clone())),
				other => parse_entry(other),
			})
			.collect(),
		Value::Array(items) => items
			.iter()
			.map(|item| match scalar_to_string(item) {
				Some(text) => Ok(ValueOptionEntry::option(text.clone(), text)),
				None => parse_entry(item),
			})
			.collect(),
		Value::Null => Ok(vec![]),
		other => Err(FormError::invalid(format!(
			"The value_options option expects an object or a list, got {other}"
		))),
	}
}

fn parse_entry(value: &Value) -> FormResult<ValueOptionEntry> {
	serde_json::from_value(value.clone())
		.map_err(|e| FormError::invalid(format!("Invalid value option {value}: {e}")))
}

impl FormElement for Select {
	fn element(&self) -> &Element {
		&self.element
	}

	fn element_mut(&mut self) -> &mut Element {
		&mut self.element
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}

	fn clone_box(&self) -> Box<dyn FormElement> {
		Box::new(self.clone())
	}

	fn kind(&self) -> ElementKind {
		ElementKind::Select
	}

	fn set_option(&mut self, key: &str, value: Value) -> FormResult<()> {
		match key {
			"value_options" => self.value_options = parse_value_options(&value)?,
			"empty_option" => {
				self.empty_option = match &value {
					Value::Null => None,
					other => Some(scalar_to_string(other).ok_or_else(|| {
						FormError::invalid(format!("The empty_option option expects a string, got {other}"))
					})?),
				}
			}
			"disable_inarray_validator" => {
				self.disable_in_array_validator = bool_option(key, &value)?;
			}
			_ => {}
		}
		self.element.apply_option(key, value)
	}

	fn input_specification(&self) -> FormResult<Option<InputSpecification>> {
		let mut spec = InputSpecification::new(self.name().unwrap_or_default());
		if !self.disable_in_array_validator {
			let in_array = Validator::InArray {
				haystack: self.option_values(),
			};
			spec = spec.with_validator(if self.is_multiple() {
				Validator::Explode {
					separator: ",".to_string(),
					validator: Box::new(in_array),
				}
			} else {
				in_array
			});
		}
		Ok(Some(spec))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_value_options_from_object() {
		let mut select = Select::new("color");
		select
			.set_option("value_options", json!({"r": "Red", "g": "Green"}))
			.unwrap();

		assert_eq!(select.option_values(), vec!["r", "g"]);
		assert_eq!(
			select.value_options()[0],
			ValueOptionEntry::option("r", "Red")
		);
	}

	#[test]
	fn test_value_options_with_groups() {
		let mut select = Select::new("car");
		select
			.set_option(
				"value_options",
				json!([
					"plain",
					{"value": "v", "label": "Volvo", "disabled": true},
					{"label": "German", "options": [
						{"value": "a", "label": "Audi"},
						{"value": "b", "label": "BMW"}
					]}
				]),
			)
			.unwrap();

		assert_eq!(select.option_values(), vec!["plain", "v", "a", "b"]);
		assert!(matches!(
			&select.value_options()[2],
			ValueOptionEntry::Group { label, options, .. } if label == "German" && options.len() == 2
		));
	}

	#[test]
	fn test_invalid_value_options() {
		let mut select = Select::new("car");
		assert!(select.set_option("value_options", json!(5)).is_err());
		assert!(select
			.set_option("value_options", json!([{"nope": true}]))
			.is_err());
	}

	#[test]
	fn test_empty_option() {
		let mut select = Select::new("car");
		select.set_option("empty_option", json!("Choose...")).unwrap();
		assert_eq!(select.empty_option(), Some("Choose..."));

		select.set_option("empty_option", Value::Null).unwrap();
		assert_eq!(select.empty_option(), None);
	}

	#[test]
	fn test_input_specification_uses_in_array() {
		let select = Select::new("color").with_choices([("r", "Red")]);
		let spec = select.input_specification().unwrap().unwrap();

		assert_eq!(spec.name, "color");
		assert_eq!(
			spec.validators,
			vec![Validator::InArray {
				haystack: vec!["r".to_string()]
			}]
		);
	}

	#[test]
	fn test_multiple_select_explodes() {
		let mut select = Select::new("colors").with_choices([("r", "Red"), ("g", "Green")]);
		select.set_attribute("multiple", json!(true)).unwrap();
		let spec = select.input_specification().unwrap().unwrap();

		assert!(matches!(spec.validators[0], Validator::Explode { .. }));
		assert!(spec.validators[0].validate(&json!(["r", "g"])).is_ok());
		assert!(spec.validators[0].validate(&json!(["r", "x"])).is_err());
	}

	#[test]
	fn test_disable_in_array_validator() {
		let mut select = Select::new("free").with_choices([("r", "Red")]);
		select
			.set_option("disable_inarray_validator", json!(true))
			.unwrap();
		let spec = select.input_specification().unwrap().unwrap();
		assert!(spec.validators.is_empty());
	}
}
