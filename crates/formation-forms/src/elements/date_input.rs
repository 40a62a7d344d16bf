//! Single-input date and time elements (`date`, `time`, `month`, ...)

use crate::element::{Element, FormElement, scalar_to_string};
use crate::error::{FormError, FormResult};
use crate::filters::Filter;
use crate::input_filter::InputSpecification;
use crate::validators::{StepUnit, Validator};
use serde_json::Value;
use std::any::Any;

/// The HTML5 date/time input types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateInputKind {
	Date,
	DateTime,
	DateTimeLocal,
	Time,
	Month,
	Week,
}

impl DateInputKind {
	pub const ALL: [Self; 6] = [
		Self::Date,
		Self::DateTime,
		Self::DateTimeLocal,
		Self::Time,
		Self::Month,
		Self::Week,
	];

	pub fn input_type(self) -> &'static str {
		match self {
			Self::Date => "date",
			Self::DateTime => "datetime",
			Self::DateTimeLocal => "datetime-local",
			Self::Time => "time",
			Self::Month => "month",
			Self::Week => "week",
		}
	}

	pub fn from_input_type(input_type: &str) -> Option<Self> {
		Self::ALL
			.into_iter()
			.find(|kind| kind.input_type().eq_ignore_ascii_case(input_type))
	}

	/// chrono format of the submitted value
	pub fn format(self) -> &'static str {
		match self {
			Self::Date => "%Y-%m-%d",
			Self::DateTime => "%Y-%m-%dT%H:%M%:z",
			Self::DateTimeLocal => "%Y-%m-%dT%H:%M",
			Self::Time => "%H:%M:%S",
			Self::Month => "%Y-%m",
			Self::Week => "%G-W%V",
		}
	}

	pub fn step_unit(self) -> StepUnit {
		match self {
			Self::Date => StepUnit::Days,
			Self::DateTime | Self::DateTimeLocal => StepUnit::Minutes,
			Self::Time => StepUnit::Seconds,
			Self::Month => StepUnit::Months,
			Self::Week => StepUnit::Weeks,
		}
	}

	pub fn default_step(self) -> u32 {
		match self {
			Self::Time => 60,
			_ => 1,
		}
	}

	/// Value steps are counted from when no `min` is set
	pub fn step_base(self) -> &'static str {
		match self {
			Self::Date => "1970-01-01",
			Self::DateTime => "1970-01-01T00:00+00:00",
			Self::DateTimeLocal => "1970-01-01T00:00",
			Self::Time => "00:00:00",
			Self::Month => "1970-01",
			Self::Week => "1970-W01",
		}
	}

	/// Validator checking that a value has the kind's shape
	pub fn format_validator(self) -> Validator {
		match self {
			Self::Month => Validator::Regex {
				pattern: r"^[0-9]{4}\-(0[1-9]|1[012])$".to_string(),
			},
			Self::Week => Validator::Regex {
				pattern: r"^[0-9]{4}\-W[0-9]{2}$".to_string(),
			},
			_ => Validator::Date {
				format: self.format().to_string(),
			},
		}
	}
}

/// `<input type="date">` and its siblings
///
/// # Examples
///
/// ```
/// use formation_forms::{DateInput, FormElement};
/// use serde_json::json;
///
/// let element = DateInput::date("start")
///     .with_attribute("min", "2025-01-01")
///     .with_attribute("step", 7);
/// let spec = element.input_specification().unwrap().unwrap();
///
/// assert!(spec.validators.iter().all(|v| v.validate(&json!("2025-01-15")).is_ok()));
/// assert!(spec.validators.iter().any(|v| v.validate(&json!("2025-01-16")).is_err()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DateInput {
	element: Element,
	kind: DateInputKind,
}

impl DateInput {
	pub fn new(kind: DateInputKind, name: impl Into<String>) -> Self {
		Self {
			element: Element::with_type(name, kind.input_type()),
			kind,
		}
	}
	pub fn date(name: impl Into<String>) -> Self {
		Self::new(DateInputKind::Date, name)
	}
	pub fn datetime(name: impl Into<String>) -> Self {
		Self::new(DateInputKind::DateTime, name)
	}
	pub fn datetime_local(name: impl Into<String>) -> Self {
		Self::new(DateInputKind::DateTimeLocal, name)
	}
	pub fn time(name: impl Into<String>) -> Self {
		Self::new(DateInputKind::Time, name)
	}
	pub fn month(name: impl Into<String>) -> Self {
		Self::new(DateInputKind::Month, name)
	}
	pub fn week(name: impl Into<String>) -> Self {
		Self::new(DateInputKind::Week, name)
	}
	pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
		self.element = self.element.with_attribute(key, value);
		self
	}
	pub fn date_kind(&self) -> DateInputKind {
		self.kind
	}

	/// A `min`/`max` bound, checked against the kind's format
	fn bound(&self, key: &str) -> FormResult<Option<String>> {
		let Some(value) = self.element.attributes.get(key).and_then(scalar_to_string) else {
			return Ok(None);
		};
		self.kind
			.format_validator()
			.validate(&Value::String(value.clone()))
			.map_err(|_| {
				FormError::invalid(format!(
					"{} element {key} value '{value}' does not match the format '{}'",
					self.kind.input_type(),
					self.kind.format()
				))
			})?;
		Ok(Some(value))
	}

	/// `None` when stepping is disabled with `step="any"`
	fn step(&self) -> FormResult<Option<u32>> {
		match self.element.attributes.get("step") {
			None | Some(Value::Null) => Ok(Some(self.kind.default_step())),
			Some(Value::String(text)) if text.eq_ignore_ascii_case("any") => Ok(None),
			Some(value) => scalar_to_string(value)
				.and_then(|text| text.trim().parse::<u32>().ok())
				.filter(|step| *step > 0)
				.map(Some)
				.ok_or_else(|| FormError::invalid(format!("Invalid step value {value}"))),
		}
	}
}

impl FormElement for DateInput {
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
		let min = self.bound("min")?;
		let max = self.bound("max")?;

		let mut spec = InputSpecification::new(self.name().unwrap_or_default())
			.with_filter(Filter::StringTrim)
			.with_validator(self.kind.format_validator());
		if let Some(min) = &min {
			spec = spec.with_validator(Validator::GreaterThan {
				min: min.clone(),
				inclusive: true,
			});
		}
		if let Some(max) = max {
			spec = spec.with_validator(Validator::LessThan {
				max,
				inclusive: true,
			});
		}
		if let Some(step) = self.step()? {
			spec = spec.with_validator(Validator::DateStep {
				format: self.kind.format().to_string(),
				base_value: min.unwrap_or_else(|| self.kind.step_base().to_string()),
				step,
				unit: self.kind.step_unit(),
			});
		}
		Ok(Some(spec))
	}
}
