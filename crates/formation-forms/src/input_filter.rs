//! Input specifications and the input filter that runs them
//!
//! Elements describe how their submitted value is filtered and validated
//! with an [`InputSpecification`]; fieldsets aggregate these into an
//! [`InputFilterSpecification`]. [`InputFilter::from_specification`] turns
//! a specification into a runnable filter.

use crate::filters::Filter;
use crate::validators::{ValidationError, Validator};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// Declarative description of how one submitted value is filtered and validated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSpecification {
	pub name: String,
	pub required: bool,
	pub allow_empty: bool,
	pub filters: Vec<Filter>,
	pub validators: Vec<Validator>,
}

impl InputSpecification {
	/// Create a required specification without filters or validators
	///
	/// # Examples
	///
	/// ```
	/// use formation_forms::InputSpecification;
	/// use formation_forms::filters::Filter;
	///
	/// let spec = InputSpecification::new("email").with_filter(Filter::StringTrim);
	/// assert!(spec.required);
	/// assert_eq!(spec.filters, vec![Filter::StringTrim]);
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			required: true,
			allow_empty: false,
			filters: vec![],
			validators: vec![],
		}
	}
	pub fn with_required(mut self, required: bool) -> Self {
		self.required = required;
		self
	}
	pub fn with_allow_empty(mut self, allow_empty: bool) -> Self {
		self.allow_empty = allow_empty;
		self
	}
	pub fn with_filter(mut self, filter: Filter) -> Self {
		self.filters.push(filter);
		self
	}
	pub fn with_validator(mut self, validator: Validator) -> Self {
		self.validators.push(validator);
		self
	}
}

/// Entry of an input filter specification: a single input or a nested group
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InputFilterEntry {
	Input(InputSpecification),
	Nested(InputFilterSpecification),
}

/// Ordered specification of a whole input filter, keyed by input name
pub type InputFilterSpecification = IndexMap<String, InputFilterEntry>;

/// Validation messages of an input or of a nested input filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InputMessages {
	Input(Vec<String>),
	Nested(InputFilterMessages),
}

/// Messages of every invalid input, keyed by input name
pub type InputFilterMessages = IndexMap<String, InputMessages>;

/// A single input: raw value, filter chain and validator chain
#[derive(Debug, Clone)]
pub struct Input {
	specification: InputSpecification,
	raw_value: Value,
	messages: Vec<String>,
}

impl Input {
	pub fn from_specification(specification: InputSpecification) -> Self {
		Self {
			specification,
			raw_value: Value::Null,
			messages: vec![],
		}
	}
	pub fn name(&self) -> &str {
		&self.specification.name
	}
	pub fn specification(&self) -> &InputSpecification {
		&self.specification
	}
	pub fn set_value(&mut self, value: Value) {
		self.raw_value = value;
	}
	pub fn raw_value(&self) -> &Value {
		&self.raw_value
	}
	/// The raw value passed through every filter in order
	pub fn value(&self) -> Value {
		self.specification
			.filters
			.iter()
			.fold(self.raw_value.clone(), |value, filter| filter.apply(value))
	}
	/// Run the filters and validators, collecting every failure message
	pub fn is_valid(&mut self) -> bool {
		let value = self.value();
		self.messages.clear();

		if is_empty_value(&value) {
			if self.specification.required && !self.specification.allow_empty {
				self.messages.push(ValidationError::IsEmpty.to_string());
			}
			return self.messages.is_empty();
		}

		for validator in &self.specification.validators {
			if let Err(error) = validator.validate(&value) {
				self.messages.push(error.to_string());
			}
		}
		self.messages.is_empty()
	}
	pub fn messages(&self) -> &[String] {
		&self.messages
	}
}

/// Member of an input filter
#[derive(Debug, Clone)]
pub enum InputFilterMember {
	Input(Input),
	Filter(InputFilter),
}

/// Ordered collection of inputs (and nested input filters) validated together
#[derive(Debug, Clone, Default)]
pub struct InputFilter {
	members: IndexMap<String, InputFilterMember>,
}

impl InputFilter {
	pub fn new() -> Self {
		Self::default()
	}
	/// Build an input filter from its specification
	///
	/// # Examples
	///
	/// ```
	/// use formation_forms::{DateTimeSelect, FormElement, InputFilter, InputFilterEntry, InputFilterSpecification};
	/// use serde_json::json;
	///
	/// let element = DateTimeSelect::new("test");
	/// let mut specification = InputFilterSpecification::new();
	/// specification.insert(
	///     "test".to_string(),
	///     InputFilterEntry::Input(element.input_specification().unwrap().unwrap()),
	/// );
	///
	/// let mut filter = InputFilter::from_specification(&specification);
	/// filter.set_data(json!({
	///     "test": {"year": "2013", "month": "02", "day": "07", "hour": "03", "minute": "14"},
	/// }).as_object().unwrap().clone());
	/// assert!(filter.is_valid());
	/// ```
	pub fn from_specification(specification: &InputFilterSpecification) -> Self {
		let mut filter = Self::new();
		for (name, entry) in specification {
			let member = match entry {
				InputFilterEntry::Input(spec) => {
					let mut spec = spec.clone();
					spec.name = name.clone();
					InputFilterMember::Input(Input::from_specification(spec))
				}
				InputFilterEntry::Nested(nested) => {
					InputFilterMember::Filter(Self::from_specification(nested))
				}
			};
			filter.members.insert(name.clone(), member);
		}
		filter
	}
	pub fn add(&mut self, input: Input) {
		self.members
			.insert(input.name().to_string(), InputFilterMember::Input(input));
	}
	pub fn add_filter(&mut self, name: impl Into<String>, filter: InputFilter) {
		self.members
			.insert(name.into(), InputFilterMember::Filter(filter));
	}
	pub fn get(&self, name: &str) -> Option<&InputFilterMember> {
		self.members.get(name)
	}
	pub fn has(&self, name: &str) -> bool {
		self.members.contains_key(name)
	}
	pub fn len(&self) -> usize {
		self.members.len()
	}
	pub fn is_empty(&self) -> bool {
		self.members.is_empty()
	}
	/// Distribute submitted data to the inputs; missing keys become `null`
	pub fn set_data(&mut self, data: Map<String, Value>) {
		for (name, member) in self.members.iter_mut() {
			let value = data.get(name).cloned().unwrap_or(Value::Null);
			match member {
				InputFilterMember::Input(input) => input.set_value(value),
				InputFilterMember::Filter(nested) => match value {
					Value::Object(nested_data) => nested.set_data(nested_data),
					_ => nested.set_data(Map::new()),
				},
			}
		}
	}
	/// Validate every input; all inputs run even after a failure
	pub fn is_valid(&mut self) -> bool {
		let mut invalid = 0usize;
		for member in self.members.values_mut() {
			let valid = match member {
				InputFilterMember::Input(input) => input.is_valid(),
				InputFilterMember::Filter(nested) => nested.is_valid(),
			};
			if !valid {
				invalid += 1;
			}
		}
		tracing::debug!(
			inputs = self.members.len(),
			invalid,
			"input filter validated"
		);
		invalid == 0
	}
	/// Filtered values, nested filters as objects
	pub fn values(&self) -> Map<String, Value> {
		self.members
			.iter()
			.map(|(name, member)| {
				let value = match member {
					InputFilterMember::Input(input) => input.value(),
					InputFilterMember::Filter(nested) => Value::Object(nested.values()),
				};
				(name.clone(), value)
			})
			.collect()
	}
	/// Values as submitted, before filtering
	pub fn raw_values(&self) -> Map<String, Value> {
		self.members
			.iter()
			.map(|(name, member)| {
				let value = match member {
					InputFilterMember::Input(input) => input.raw_value().clone(),
					InputFilterMember::Filter(nested) => Value::Object(nested.raw_values()),
				};
				(name.clone(), value)
			})
			.collect()
	}
	/// Messages of invalid inputs from the last [`InputFilter::is_valid`] run
	pub fn messages(&self) -> InputFilterMessages {
		let mut messages = InputFilterMessages::new();
		for (name, member) in &self.members {
			match member {
				InputFilterMember::Input(input) if !input.messages().is_empty() => {
					messages.insert(
						name.clone(),
						InputMessages::Input(input.messages().to_vec()),
					);
				}
				InputFilterMember::Filter(nested) => {
					let nested_messages = nested.messages();
					if !nested_messages.is_empty() {
						messages.insert(name.clone(), InputMessages::Nested(nested_messages));
					}
				}
				InputFilterMember::Input(_) => {}
			}
		}
		messages
	}
	/// Names of the inputs that failed validation
	pub fn invalid_inputs(&self) -> Vec<String> {
		self.messages().into_keys().collect()
	}
}

fn is_empty_value(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::String(text) => text.is_empty(),
		Value::Array(items) => items.is_empty(),
		Value::Object(map) => map.is_empty(),
		Value::Bool(_) | Value::Number(_) => false,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn data(value: Value) -> Map<String, Value> {
		value.as_object().cloned().unwrap()
	}

	fn email_spec() -> InputSpecification {
		InputSpecification::new("email")
			.with_filter(Filter::StringTrim)
			.with_validator(Validator::EmailAddress)
	}

	#[test]
	fn test_required_input_rejects_empty_value() {
		let mut input = Input::from_specification(email_spec());
		input.set_value(json!("   "));

		assert!(!input.is_valid());
		assert_eq!(input.messages(), ["Value is required and can't be empty"]);
	}

	#[test]
	fn test_optional_input_skips_validators_when_empty() {
		let mut input = Input::from_specification(email_spec().with_required(false));
		assert!(input.is_valid());

		input.set_value(json!("nope"));
		assert!(!input.is_valid());
	}

	#[test]
	fn test_allow_empty() {
		let mut input = Input::from_specification(email_spec().with_allow_empty(true));
		input.set_value(json!(""));
		assert!(input.is_valid());
	}

	#[test]
	fn test_all_validator_messages_collected() {
		let spec = InputSpecification::new("age")
			.with_validator(Validator::GreaterThan {
				min: "18".to_string(),
				inclusive: true,
			})
			.with_validator(Validator::Step {
				base_value: 0.0,
				step: 2.0,
			});
		let mut input = Input::from_specification(spec);
		input.set_value(json!("17"));

		assert!(!input.is_valid());
		assert_eq!(input.messages().len(), 2);
	}

	#[test]
	fn test_input_filter_values_are_filtered() {
		let mut specification = InputFilterSpecification::new();
		specification.insert("email".to_string(), InputFilterEntry::Input(email_spec()));
		let mut filter = InputFilter::from_specification(&specification);

		filter.set_data(data(json!({"email": "  user@example.com "})));

		assert!(filter.is_valid());
		assert_eq!(filter.values().get("email"), Some(&json!("user@example.com")));
		assert_eq!(
			filter.raw_values().get("email"),
			Some(&json!("  user@example.com "))
		);
		assert!(filter.messages().is_empty());
	}

	#[test]
	fn test_nested_input_filter_messages() {
		let mut nested = InputFilterSpecification::new();
		nested.insert("email".to_string(), InputFilterEntry::Input(email_spec()));
		let mut specification = InputFilterSpecification::new();
		specification.insert("contact".to_string(), InputFilterEntry::Nested(nested));
		specification.insert(
			"nickname".to_string(),
			InputFilterEntry::Input(InputSpecification::new("nickname").with_required(false)),
		);
		let mut filter = InputFilter::from_specification(&specification);

		filter.set_data(data(json!({"contact": {"email": "broken"}})));

		assert!(!filter.is_valid());
		assert_eq!(filter.invalid_inputs(), vec!["contact".to_string()]);
		let messages = serde_json::to_value(filter.messages()).unwrap();
		assert_eq!(
			messages,
			json!({"contact": {"email": [
				"The input is not a valid email address. Use the basic format local-part@hostname"
			]}})
		);
		assert_eq!(
			filter.values().get("contact"),
			Some(&json!({"email": "broken"}))
		);
	}

	#[test]
	fn test_specification_key_names_the_input() {
		let mut specification = InputFilterSpecification::new();
		specification.insert(
			"renamed".to_string(),
			InputFilterEntry::Input(InputSpecification::new("original")),
		);
		let filter = InputFilter::from_specification(&specification);

		match filter.get("renamed") {
			Some(InputFilterMember::Input(input)) => assert_eq!(input.name(), "renamed"),
			other => panic!("unexpected member: {other:?}"),
		}
	}

	#[test]
	fn test_specification_serializes_with_validators_key() {
		let spec = InputSpecification::new("when").with_validator(Validator::Date {
			format: "%Y-%m-%d".to_string(),
		});
		let value = serde_json::to_value(&spec).unwrap();
		assert_eq!(value["validators"][0]["name"], json!("Date"));
		assert_eq!(value["required"], json!(true));
	}
}
