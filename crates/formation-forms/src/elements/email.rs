use crate::element::{Element, FormElement, is_truthy};
use crate::error::FormResult;
use crate::filters::Filter;
use crate::input_filter::InputSpecification;
use crate::validators::Validator;
use serde_json::Value;
use std::any::Any;

/// `<input type="email">`; with `multiple`, a comma-separated list of addresses
#[derive(Debug, Clone, PartialEq)]
pub struct Email {
	element: Element,
}

impl Email {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			element: Element::with_type(name, "email"),
		}
	}
	pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
		self.element = self.element.with_attribute(key, value);
		self
	}
}

impl FormElement for Email {
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

	fn input_specification(&self) -> FormResult<Option<InputSpecification>> {
		let multiple = self.attribute("multiple").is_some_and(is_truthy);
		let validator = if multiple {
			Validator::Explode {
				separator: ",".to_string(),
				validator: Box::new(Validator::EmailAddress),
			}
		} else {
			Validator::EmailAddress
		};
		Ok(Some(
			InputSpecification::new(self.name().unwrap_or_default())
				.with_filter(Filter::StringTrim)
				.with_filter(Filter::StripNewlines)
				.with_validator(validator),
		))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::input_filter::Input;
	use serde_json::json;

	#[test]
	fn test_single_address() {
		let spec = Email::new("email").input_specification().unwrap().unwrap();
		let mut input = Input::from_specification(spec);

		input.set_value(json!(" user@example.com\n"));
		assert!(input.is_valid());
		assert_eq!(input.value(), json!("user@example.com"));

		input.set_value(json!("a@example.com, b@example.com"));
		assert!(!input.is_valid());
	}

	#[test]
	fn test_multiple_addresses() {
		let element = Email::new("emails").with_attribute("multiple", true);
		let mut input = Input::from_specification(element.input_specification().unwrap().unwrap());

		input.set_value(json!("a@example.com, b@example.com"));
		assert!(input.is_valid());

		input.set_value(json!("a@example.com, nope"));
		assert!(!input.is_valid());
	}
}
