use crate::element::{Element, FormElement, scalar_to_string};
use crate::error::{FormError, FormResult};
use crate::filters::Filter;
use crate::input_filter::InputSpecification;
use crate::validators::Validator;
use serde_json::Value;
use std::any::Any;

const NUMBER_PATTERN: &str = r"^-?\d*(\.\d+)?$";

/// `<input type="number">`
#[derive(Debug, Clone, PartialEq)]
pub struct Number {
	element: Element,
}

impl Number {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			element: Element::with_type(name, "number"),
		}
	}
	pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
		self.element = self.element.with_attribute(key, value);
		self
	}

	fn numeric_attribute(&self, key: &str) -> FormResult<Option<f64>> {
		let Some(value) = self.attribute(key).filter(|value| !value.is_null()) else {
			return Ok(None);
		};
		scalar_to_string(value)
			.and_then(|text| text.trim().parse::<f64>().ok())
			.map(Some)
			.ok_or_else(|| FormError::invalid(format!("The {key} attribute expects a number, got {value}")))
	}
}

impl FormElement for Number {
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
		let min = self.numeric_attribute("min")?;
		let max = self.numeric_attribute("max")?;

		let mut spec = InputSpecification::new(self.name().unwrap_or_default())
			.with_filter(Filter::StringTrim)
			.with_validator(Validator::Regex {
				pattern: NUMBER_PATTERN.to_string(),
			});
		if let Some(min) = min {
			spec = spec.with_validator(Validator::GreaterThan {
				min: min.to_string(),
				inclusive: true,
			});
		}
		if let Some(max) = max {
			spec = spec.with_validator(Validator::LessThan {
				max: max.to_string(),
				inclusive: true,
			});
		}
		let any_step = self
			.attribute("step")
			.and_then(Value::as_str)
			.is_some_and(|step| step.eq_ignore_ascii_case("any"));
		if !any_step {
			spec = spec.with_validator(Validator::Step {
				base_value: min.unwrap_or(0.0),
				step: self.numeric_attribute("step")?.unwrap_or(1.0),
			});
		}
		Ok(Some(spec))
	}
}
