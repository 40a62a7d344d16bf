//! `<input>` rendering

use crate::error::{ViewError, ViewResult};
use crate::helper::{HelperCore, ViewHelper};
use formation_forms::FormElement;
use serde_json::Value;
use strum::{AsRefStr, Display, EnumIter, EnumString};
use tracing::debug;

/// Input types rendered by [`FormInput`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum InputType {
	Text,
	Email,
	Password,
	Hidden,
	Number,
	Search,
	Tel,
	Url,
	Color,
	Range,
	Date,
	#[strum(serialize = "datetime")]
	DateTime,
	#[strum(serialize = "datetime-local")]
	DateTimeLocal,
	Time,
	Month,
	Week,
}

const TEXT_ATTRIBUTES: &[&str] = &[
	"name",
	"autocomplete",
	"autofocus",
	"dirname",
	"disabled",
	"form",
	"list",
	"maxlength",
	"minlength",
	"pattern",
	"placeholder",
	"readonly",
	"required",
	"size",
	"type",
	"value",
];

const EMAIL_ATTRIBUTES: &[&str] = &[
	"name",
	"autocomplete",
	"autofocus",
	"disabled",
	"form",
	"list",
	"maxlength",
	"minlength",
	"multiple",
	"pattern",
	"placeholder",
	"readonly",
	"required",
	"size",
	"type",
	"value",
];

const PASSWORD_ATTRIBUTES: &[&str] = &[
	"name",
	"autocomplete",
	"autofocus",
	"disabled",
	"form",
	"maxlength",
	"minlength",
	"pattern",
	"placeholder",
	"readonly",
	"required",
	"size",
	"type",
	"value",
];

const HIDDEN_ATTRIBUTES: &[&str] = &["name", "disabled", "form", "type", "value"];

const NUMBER_ATTRIBUTES: &[&str] = &[
	"name",
	"autocomplete",
	"autofocus",
	"disabled",
	"form",
	"list",
	"max",
	"min",
	"step",
	"placeholder",
	"readonly",
	"required",
	"type",
	"value",
];

const TEL_ATTRIBUTES: &[&str] = &[
	"name",
	"autocomplete",
	"autofocus",
	"disabled",
	"form",
	"list",
	"maxlength",
	"minlength",
	"pattern",
	"placeholder",
	"readonly",
	"required",
	"size",
	"type",
	"value",
];

const COLOR_ATTRIBUTES: &[&str] = &[
	"name",
	"autocomplete",
	"autofocus",
	"disabled",
	"form",
	"list",
	"type",
	"value",
];

const RANGE_ATTRIBUTES: &[&str] = &[
	"name",
	"autocomplete",
	"autofocus",
	"disabled",
	"form",
	"list",
	"max",
	"min",
	"step",
	"type",
	"value",
];

const DATE_ATTRIBUTES: &[&str] = &[
	"name",
	"autocomplete",
	"autofocus",
	"disabled",
	"form",
	"list",
	"max",
	"min",
	"step",
	"readonly",
	"required",
	"type",
	"value",
];

impl InputType {
	/// Attributes an `<input>` of this type accepts besides the global ones
	pub fn valid_attributes(self) -> &'static [&'static str] {
		match self {
			Self::Text | Self::Search => TEXT_ATTRIBUTES,
			Self::Email => EMAIL_ATTRIBUTES,
			Self::Password => PASSWORD_ATTRIBUTES,
			Self::Hidden => HIDDEN_ATTRIBUTES,
			Self::Number => NUMBER_ATTRIBUTES,
			Self::Tel | Self::Url => TEL_ATTRIBUTES,
			Self::Color => COLOR_ATTRIBUTES,
			Self::Range => RANGE_ATTRIBUTES,
			Self::Date
			| Self::DateTime
			| Self::DateTimeLocal
			| Self::Time
			| Self::Month
			| Self::Week => DATE_ATTRIBUTES,
		}
	}
}

/// Renders an element as a single `<input>`
///
/// A helper built with [`FormInput::new`] takes the type from the element;
/// the typed constructors always render their own type.
///
/// # Examples
///
/// ```
/// use formation_forms::DateInput;
/// use formation_view::FormInput;
///
/// let element = DateInput::date("birthday").with_attribute("min", "1900-01-01");
/// let markup = FormInput::date().render(&element).unwrap();
///
/// assert_eq!(
///     markup,
///     r#"<input name="birthday" type="date" min="1900-01-01" value="">"#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct FormInput {
	core: HelperCore,
	input_type: Option<InputType>,
}

impl Default for FormInput {
	fn default() -> Self {
		Self::new()
	}
}

impl FormInput {
	/// Helper rendering the element's own `type`, falling back to `text`
	pub fn new() -> Self {
		Self {
			core: HelperCore::new(TEXT_ATTRIBUTES),
			input_type: None,
		}
	}

	pub fn with_type(input_type: InputType) -> Self {
		Self {
			core: HelperCore::new(input_type.valid_attributes()),
			input_type: Some(input_type),
		}
	}

	pub fn text() -> Self {
		Self::with_type(InputType::Text)
	}

	pub fn email() -> Self {
		Self::with_type(InputType::Email)
	}

	pub fn password() -> Self {
		Self::with_type(InputType::Password)
	}

	pub fn hidden() -> Self {
		Self::with_type(InputType::Hidden)
	}

	pub fn number() -> Self {
		Self::with_type(InputType::Number)
	}

	pub fn date() -> Self {
		Self::with_type(InputType::Date)
	}

	pub fn datetime() -> Self {
		Self::with_type(InputType::DateTime)
	}

	pub fn datetime_local() -> Self {
		Self::with_type(InputType::DateTimeLocal)
	}

	pub fn time() -> Self {
		Self::with_type(InputType::Time)
	}

	pub fn month() -> Self {
		Self::with_type(InputType::Month)
	}

	pub fn week() -> Self {
		Self::with_type(InputType::Week)
	}

	/// Type rendered for `element`
	pub fn input_type_for(&self, element: &dyn FormElement) -> InputType {
		self.input_type.unwrap_or_else(|| {
			element
				.attribute("type")
				.and_then(Value::as_str)
				.and_then(|name| name.parse().ok())
				.unwrap_or(InputType::Text)
		})
	}

	pub fn render(&self, element: &dyn FormElement) -> ViewResult<String> {
		let name = element.name().ok_or_else(|| {
			ViewError::Domain(
				"FormInput::render requires that the element has an assigned name; none discovered"
					.to_string(),
			)
		})?;
		let input_type = self.input_type_for(element);

		let mut attributes = element.attributes().clone();
		attributes.insert("name".to_string(), Value::String(name.to_string()));
		attributes.insert(
			"type".to_string(),
			Value::String(input_type.as_ref().to_string()),
		);
		attributes.insert("value".to_string(), element.value());

		debug!(helper = "FormInput", element = name, input_type = %input_type, "rendering element");

		Ok(format!(
			"<input {}{}",
			self.core
				.attributes_string_with(input_type.valid_attributes(), &attributes),
			self.core.closing_bracket()
		))
	}
}

impl ViewHelper for FormInput {
	fn core(&self) -> &HelperCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut HelperCore {
		&mut self.core
	}
}
