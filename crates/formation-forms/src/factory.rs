//! Element factory
//!
//! Builds elements and fieldsets from declarative [`ElementSpec`]s. Custom
//! element types are registered as constructor closures, which can capture
//! whatever the element needs before its [`FormElement::init`] hook runs.

use crate::element::{Attributes, Element, FormElement, Options};
use crate::elements::{
	DateInput, DateInputKind, DateSelect, DateTimeSelect, Email, MonthSelect, Number, Select,
};
use crate::error::{FormError, FormResult};
use crate::fieldset::Fieldset;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Constructor of a registered element type
pub type ElementConstructor = Box<dyn Fn(&ElementSpec) -> FormResult<Box<dyn FormElement>> + Send + Sync>;

fn default_type() -> String {
	"element".to_string()
}

/// Declarative description of an element (or a fieldset and its children)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElementSpec {
	#[serde(rename = "type", default = "default_type")]
	pub element_type: String,
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub options: Options,
	#[serde(default)]
	pub attributes: Attributes,
	#[serde(default)]
	pub value: Option<Value>,
	#[serde(default)]
	pub elements: Vec<ElementSpec>,
}

impl ElementSpec {
	pub fn new(element_type: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			element_type: element_type.into(),
			name: Some(name.into()),
			options: Options::new(),
			attributes: Attributes::new(),
			value: None,
			elements: vec![],
		}
	}
	fn name(&self) -> &str {
		self.name.as_deref().unwrap_or_default()
	}
}

/// Registry of element constructors keyed by lower-cased type name
///
/// # Examples
///
/// ```
/// use formation_forms::{ElementFactory, FormElement};
/// use serde_json::json;
///
/// let factory = ElementFactory::new();
/// let element = factory
///     .create_from_json(&json!({
///         "type": "datetime_select",
///         "name": "starts_at",
///         "options": {"should_show_seconds": true},
///         "value": "2013-02-07 03:14:15",
///     }))
///     .unwrap();
///
/// assert_eq!(element.name(), Some("starts_at"));
/// assert_eq!(element.value(), json!("2013-02-07 03:14:15"));
/// ```
pub struct ElementFactory {
	constructors: HashMap<String, ElementConstructor>,
}

impl Default for ElementFactory {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for ElementFactory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut types: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
		types.sort_unstable();
		f.debug_struct("ElementFactory").field("types", &types).finish()
	}
}

impl ElementFactory {
	/// Create a factory with every built-in element type registered
	pub fn new() -> Self {
		let mut factory = Self {
			constructors: HashMap::new(),
		};
		factory.register("element", |spec| Ok(Box::new(Element::new(spec.name()))));
		for input_type in ["text", "hidden", "password"] {
			factory.register(input_type, move |spec| {
				Ok(Box::new(Element::with_type(spec.name(), input_type)))
			});
		}
		factory.register("email", |spec| Ok(Box::new(Email::new(spec.name()))));
		factory.register("number", |spec| Ok(Box::new(Number::new(spec.name()))));
		factory.register("select", |spec| Ok(Box::new(Select::new(spec.name()))));
		for kind in DateInputKind::ALL {
			factory.register(kind.input_type(), move |spec| {
				Ok(Box::new(DateInput::new(kind, spec.name())))
			});
		}
		factory.register("date_select", |spec| Ok(Box::new(DateSelect::new(spec.name()))));
		factory.register("month_select", |spec| Ok(Box::new(MonthSelect::new(spec.name()))));
		factory.register("datetime_select", |spec| {
			Ok(Box::new(DateTimeSelect::new(spec.name())))
		});
		factory.register("fieldset", |spec| Ok(Box::new(Fieldset::new(spec.name()))));
		factory
	}

	/// Register a constructor, replacing any previous one for the type
	///
	/// # Arguments
	///
	/// * `element_type` - Type name, matched case-insensitively
	/// * `constructor` - Builds the bare element; the factory configures it afterwards
	pub fn register<F>(&mut self, element_type: &str, constructor: F)
	where
		F: Fn(&ElementSpec) -> FormResult<Box<dyn FormElement>> + Send + Sync + 'static,
	{
		self.constructors
			.insert(element_type.to_ascii_lowercase(), Box::new(constructor));
	}

	pub fn has(&self, element_type: &str) -> bool {
		self.constructors
			.contains_key(&element_type.to_ascii_lowercase())
	}

	/// Build and configure an element.
	///
	/// Options are applied before attributes and the value, children are
	/// added to fieldsets, and `init` runs last.
	pub fn create(&self, spec: &ElementSpec) -> FormResult<Box<dyn FormElement>> {
		let constructor = self
			.constructors
			.get(&spec.element_type.to_ascii_lowercase())
			.ok_or_else(|| {
				FormError::invalid(format!("Unknown element type '{}'", spec.element_type))
			})?;
		let mut element = constructor(spec)?;

		if let Some(name) = spec.name.as_deref().filter(|name| !name.is_empty()) {
			element.set_name(name);
		}
		element.set_options(spec.options.clone())?;
		element.set_attributes(spec.attributes.clone())?;
		if !spec.elements.is_empty() {
			let fieldset = element.as_fieldset_mut().ok_or_else(|| {
				FormError::invalid(format!(
					"Element type '{}' cannot contain elements",
					spec.element_type
				))
			})?;
			for child in &spec.elements {
				fieldset.add(self.create(child)?)?;
			}
		}
		if let Some(value) = &spec.value {
			element.set_value(value.clone())?;
		}
		element.init()?;

		tracing::debug!(
			element_type = %spec.element_type,
			name = element.name().unwrap_or_default(),
			"element created"
		);
		Ok(element)
	}

	/// Deserialize an [`ElementSpec`] and build it
	pub fn create_from_json(&self, value: &Value) -> FormResult<Box<dyn FormElement>> {
		let spec: ElementSpec = serde_json::from_value(value.clone())
			.map_err(|e| FormError::invalid(format!("Invalid element specification: {e}")))?;
		self.create(&spec)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::element::ElementKind;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case("text", ElementKind::Input("text".to_string()))]
	#[case("Password", ElementKind::Input("password".to_string()))]
	#[case("week", ElementKind::Input("week".to_string()))]
	#[case("datetime-local", ElementKind::Input("datetime-local".to_string()))]
	#[case("select", ElementKind::Select)]
	#[case("DATE_SELECT", ElementKind::DateSelect)]
	#[case("month_select", ElementKind::MonthSelect)]
	#[case("datetime_select", ElementKind::DateTimeSelect)]
	#[case("fieldset", ElementKind::Fieldset)]
	fn test_builtin_types(#[case] element_type: &str, #[case] kind: ElementKind) {
		let factory = ElementFactory::new();
		let element = factory.create(&ElementSpec::new(element_type, "foo")).unwrap();

		assert_eq!(element.kind(), kind);
		assert_eq!(element.name(), Some("foo"));
	}

	#[test]
	fn test_unknown_type() {
		let factory = ElementFactory::new();
		let result = factory.create(&ElementSpec::new("widget", "foo"));
		assert!(matches!(result, Err(FormError::InvalidArgument(_))));
	}

	#[test]
	fn test_type_defaults_to_element() {
		let factory = ElementFactory::new();
		let element = factory
			.create_from_json(&json!({"name": "foo", "attributes": {"class": "wide"}}))
			.unwrap();

		assert!(element.as_any().downcast_ref::<Element>().is_some());
		assert_eq!(element.attribute("class"), Some(&json!("wide")));
	}

	#[test]
	fn test_options_apply_before_value() {
		let factory = ElementFactory::new();
		let element = factory
			.create_from_json(&json!({
				"type": "select",
				"name": "color",
				"options": {"label": "Color", "value_options": {"r": "Red"}},
				"value": "r",
			}))
			.unwrap();

		assert_eq!(element.label(), Some("Color"));
		assert_eq!(element.value(), json!("r"));
	}

	#[test]
	fn test_children_only_for_fieldsets() {
		let factory = ElementFactory::new();
		let result = factory.create_from_json(&json!({
			"type": "text",
			"name": "foo",
			"elements": [{"name": "bar"}],
		}));
		assert!(result.is_err());
	}

	#[test]
	fn test_malformed_specification() {
		let factory = ElementFactory::new();
		assert!(factory.create_from_json(&json!({"type": 5})).is_err());
	}
}
