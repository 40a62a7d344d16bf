//! Base form element and the trait every element implements

use crate::error::{FormError, FormResult};
use crate::fieldset::Fieldset;
use crate::input_filter::InputSpecification;
use indexmap::IndexMap;
use serde_json::Value;
use std::any::Any;
use std::fmt;

/// Insertion-ordered HTML attributes of an element
pub type Attributes = IndexMap<String, Value>;

/// Insertion-ordered element options (label, layout flags, select choices, ...)
pub type Options = IndexMap<String, Value>;

/// What kind of control an element renders as
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
	/// A single `<input>` of the given type
	Input(String),
	/// A `<select>` control
	Select,
	/// Year, month and day selects
	DateSelect,
	/// Year and month selects
	MonthSelect,
	/// Year, month, day, hour, minute and second selects
	DateTimeSelect,
	/// A group of elements
	Fieldset,
}

/// State shared by every form element: name, value, attributes and options.
///
/// The element name is stored as the `name` attribute, so it renders in
/// attribute order like any other attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
	pub(crate) attributes: Attributes,
	pub(crate) value: Value,
	pub(crate) options: Options,
	pub(crate) label: Option<String>,
	pub(crate) label_attributes: Attributes,
	pub(crate) messages: Vec<String>,
}

impl Element {
	/// Create a new element with the given name
	///
	/// # Examples
	///
	/// ```
	/// use formation_forms::{Element, FormElement};
	///
	/// let element = Element::new("email");
	/// assert_eq!(element.name(), Some("email"));
	/// assert!(element.value().is_null());
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		let mut element = Self::default();
		let name = name.into();
		if !name.is_empty() {
			element
				.attributes
				.insert("name".to_string(), Value::String(name));
		}
		element
	}
	/// Create an element without a name
	pub fn unnamed() -> Self {
		Self::default()
	}
	/// Create a named element carrying a `type` attribute
	///
	/// # Examples
	///
	/// ```
	/// use formation_forms::{Element, ElementKind, FormElement};
	///
	/// let element = Element::with_type("password", "password");
	/// assert_eq!(element.kind(), ElementKind::Input("password".to_string()));
	/// ```
	pub fn with_type(name: impl Into<String>, input_type: &str) -> Self {
		let mut element = Self::new(name);
		element
			.attributes
			.insert("type".to_string(), Value::String(input_type.to_string()));
		element
	}
	/// Builder form of [`FormElement::set_attribute`] for plain attributes
	///
	/// # Examples
	///
	/// ```
	/// use formation_forms::{Element, FormElement};
	///
	/// let element = Element::new("age").with_attribute("min", 18);
	/// assert_eq!(element.attribute("min"), Some(&serde_json::json!(18)));
	/// ```
	pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
		let value = value.into();
		match key {
			"value" => self.value = value,
			_ => {
				self.attributes.insert(key.to_string(), value);
			}
		}
		self
	}
	/// Builder form of [`FormElement::set_value`]
	pub fn with_value(mut self, value: impl Into<Value>) -> Self {
		self.value = value.into();
		self
	}
	/// Builder form of [`FormElement::set_label`]
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}
	/// The `type` attribute, when present and a string
	pub fn input_type(&self) -> Option<&str> {
		self.attributes.get("type").and_then(Value::as_str)
	}
	/// Store an option, populating the label from `label` and `label_attributes`
	pub fn apply_option(&mut self, key: &str, value: Value) -> FormResult<()> {
		match key {
			"label" => match &value {
				Value::String(label) => self.label = Some(label.clone()),
				Value::Null => self.label = None,
				other => {
					return Err(FormError::invalid(format!(
						"The label option expects a string, got {other}"
					)));
				}
			},
			"label_attributes" => {
				self.label_attributes = object_option(key, &value)?;
			}
			_ => {}
		}
		self.options.insert(key.to_string(), value);
		Ok(())
	}
	/// Mutable access to the raw attribute map
	pub fn attributes_mut(&mut self) -> &mut Attributes {
		&mut self.attributes
	}
}

/// Common interface of form elements.
///
/// Implementors only provide access to their inner [`Element`] plus the
/// `Any`/clone plumbing; everything else has a default that composite
/// elements override where their semantics differ.
pub trait FormElement: fmt::Debug + Send + Sync {
	fn element(&self) -> &Element;

	fn element_mut(&mut self) -> &mut Element;

	fn as_any(&self) -> &dyn Any;

	fn as_any_mut(&mut self) -> &mut dyn Any;

	fn clone_box(&self) -> Box<dyn FormElement>;

	/// How view helpers should render this element
	fn kind(&self) -> ElementKind {
		ElementKind::Input(self.element().input_type().unwrap_or("text").to_string())
	}

	/// The element name; `None` when unset or empty
	fn name(&self) -> Option<&str> {
		self.element()
			.attributes
			.get("name")
			.and_then(Value::as_str)
			.filter(|name| !name.is_empty())
	}

	fn set_name(&mut self, name: &str) {
		self.element_mut()
			.attributes
			.insert("name".to_string(), Value::String(name.to_string()));
	}

	fn attributes(&self) -> &Attributes {
		&self.element().attributes
	}

	fn attribute(&self, key: &str) -> Option<&Value> {
		self.element().attributes.get(key)
	}

	fn has_attribute(&self, key: &str) -> bool {
		self.element().attributes.contains_key(key)
	}

	/// Set a single attribute.
	///
	/// `value` is routed to [`FormElement::set_value`] and `name` to
	/// [`FormElement::set_name`].
	fn set_attribute(&mut self, key: &str, value: Value) -> FormResult<()> {
		match key {
			"value" => self.set_value(value),
			"name" => match value {
				Value::String(name) => {
					self.set_name(&name);
					Ok(())
				}
				other => Err(FormError::invalid(format!(
					"Element name must be a string, got {other}"
				))),
			},
			_ => {
				self.element_mut()
					.attributes
					.insert(key.to_string(), value);
				Ok(())
			}
		}
	}

	/// Merge attributes into the existing set
	fn set_attributes(&mut self, attributes: Attributes) -> FormResult<()> {
		for (key, value) in attributes {
			self.set_attribute(&key, value)?;
		}
		Ok(())
	}

	fn remove_attribute(&mut self, key: &str) -> Option<Value> {
		self.element_mut().attributes.shift_remove(key)
	}

	fn clear_attributes(&mut self) {
		self.element_mut().attributes.clear();
	}

	fn value(&self) -> Value {
		self.element().value.clone()
	}

	fn set_value(&mut self, value: Value) -> FormResult<()> {
		self.element_mut().value = value;
		Ok(())
	}

	fn label(&self) -> Option<&str> {
		self.element().label.as_deref()
	}

	fn set_label(&mut self, label: &str) {
		self.element_mut().label = Some(label.to_string());
	}

	fn label_attributes(&self) -> &Attributes {
		&self.element().label_attributes
	}

	fn options(&self) -> &Options {
		&self.element().options
	}

	fn option(&self, key: &str) -> Option<&Value> {
		self.element().options.get(key)
	}

	/// Set a single option.
	///
	/// `label` and `label_attributes` also populate the label; elements with
	/// their own options override this and fall back to it.
	fn set_option(&mut self, key: &str, value: Value) -> FormResult<()> {
		self.element_mut().apply_option(key, value)
	}

	fn set_options(&mut self, options: Options) -> FormResult<()> {
		for (key, value) in options {
			self.set_option(&key, value)?;
		}
		Ok(())
	}

	/// Validation messages attached after filtering
	fn messages(&self) -> &[String] {
		&self.element().messages
	}

	fn set_messages(&mut self, messages: Vec<String>) {
		self.element_mut().messages = messages;
	}

	/// Input specification consumed by the input filter, if the element has one
	fn input_specification(&self) -> FormResult<Option<InputSpecification>> {
		Ok(None)
	}

	/// Hook run by the element factory once the element is fully configured
	fn init(&mut self) -> FormResult<()> {
		Ok(())
	}

	fn as_fieldset(&self) -> Option<&Fieldset> {
		None
	}

	fn as_fieldset_mut(&mut self) -> Option<&mut Fieldset> {
		None
	}
}

impl Clone for Box<dyn FormElement> {
	fn clone(&self) -> Self {
		self.clone_box()
	}
}

impl FormElement for Element {
	fn element(&self) -> &Element {
		self
	}

	fn element_mut(&mut self) -> &mut Element {
		self
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
}

/// Loose truthiness used for flag-like attributes and options
pub fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(flag) => *flag,
		Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
		Value::String(text) => !text.is_empty() && text != "0" && text != "false",
		Value::Array(items) => !items.is_empty(),
		Value::Object(map) => !map.is_empty(),
	}
}

/// Render a scalar value as the string a form would submit
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
	match value {
		Value::String(text) => Some(text.clone()),
		Value::Number(number) => Some(number.to_string()),
		_ => None,
	}
}

pub(crate) fn object_option(key: &str, value: &Value) -> FormResult<Attributes> {
	match value {
		Value::Object(map) => Ok(map
			.iter()
			.map(|(k, v)| (k.clone(), v.clone()))
			.collect()),
		Value::Null => Ok(Attributes::new()),
		other => Err(FormError::invalid(format!(
			"The {key} option expects an object, got {other}"
		))),
	}
}

pub(crate) fn bool_option(key: &str, value: &Value) -> FormResult<bool> {
	match value {
		Value::Bool(flag) => Ok(*flag),
		Value::Null => Ok(false),
		Value::Number(_) | Value::String(_) => Ok(is_truthy(value)),
		other => Err(FormError::invalid(format!(
			"The {key} option expects a boolean, got {other}"
		))),
	}
}
