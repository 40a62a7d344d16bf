//! Fieldset and element factory tests
//!
//! Building nested forms from specifications, injecting dependencies into
//! custom elements before `init`, and validating a whole fieldset

use formation_forms::{
	DateTimeSelect, Element, ElementFactory, ElementKind, ElementSpec, FormElement, FormError, FormResult,
	Fieldset, InputFilter, InputFilterEntry, InputFilterSpecification, InputSpecification,
};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::any::Any;

/// Fieldset that needs an input filter injected before `init`
#[derive(Debug, Clone)]
struct FieldsetWithDependency {
	fieldset: Fieldset,
	dependency: Option<InputFilter>,
	initialized: bool,
}

impl FieldsetWithDependency {
	fn new() -> Self {
		Self {
			fieldset: Fieldset::new("fieldset_with_dependency"),
			dependency: None,
			initialized: false,
		}
	}

	fn set_dependency(&mut self, dependency: InputFilter) {
		self.dependency = Some(dependency);
	}
}

impl FormElement for FieldsetWithDependency {
	fn element(&self) -> &Element {
		self.fieldset.element()
	}

	fn element_mut(&mut self) -> &mut Element {
		self.fieldset.element_mut()
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
		ElementKind::Fieldset
	}

	fn init(&mut self) -> FormResult<()> {
		let dependency = self.dependency.as_ref().ok_or_else(|| {
			FormError::Domain("fieldset_with_dependency requires an input filter".to_string())
		})?;
		// the dependency must be usable here
		let _ = dependency.values();
		self.initialized = true;
		self.fieldset.init()
	}

	fn as_fieldset(&self) -> Option<&Fieldset> {
		Some(&self.fieldset)
	}

	fn as_fieldset_mut(&mut self) -> Option<&mut Fieldset> {
		Some(&mut self.fieldset)
	}
}

#[fixture]
fn dependency() -> InputFilter {
	let mut specification = InputFilterSpecification::new();
	specification.insert(
		"token".to_string(),
		InputFilterEntry::Input(InputSpecification::new("token")),
	);
	InputFilter::from_specification(&specification)
}

#[rstest]
fn test_dependency_injected_before_init(dependency: InputFilter) {
	// Arrange
	let mut factory = ElementFactory::new();
	factory.register("fieldset_with_dependency", move |_spec| {
		let mut fieldset = FieldsetWithDependency::new();
		fieldset.set_dependency(dependency.clone());
		Ok(Box::new(fieldset))
	});

	// Act
	let element = factory
		.create(&ElementSpec::new("fieldset_with_dependency", ""))
		.unwrap();

	// Assert
	let fieldset = element
		.as_any()
		.downcast_ref::<FieldsetWithDependency>()
		.unwrap();
	assert!(fieldset.initialized);
	assert!(fieldset.dependency.as_ref().unwrap().has("token"));
	assert_eq!(element.name(), Some("fieldset_with_dependency"));
}

#[rstest]
fn test_missing_dependency_fails_init() {
	let mut factory = ElementFactory::new();
	factory.register("fieldset_with_dependency", |_spec| {
		Ok(Box::new(FieldsetWithDependency::new()))
	});

	let result = factory.create(&ElementSpec::new("fieldset_with_dependency", ""));

	assert!(matches!(result, Err(FormError::Domain(_))));
}

#[rstest]
fn test_init_reaches_nested_custom_elements(dependency: InputFilter) {
	let mut factory = ElementFactory::new();
	factory.register("fieldset_with_dependency", move |_spec| {
		let mut fieldset = FieldsetWithDependency::new();
		fieldset.set_dependency(dependency.clone());
		Ok(Box::new(fieldset))
	});

	let form = factory
		.create_from_json(&json!({
			"type": "fieldset",
			"name": "form",
			"elements": [{"type": "fieldset_with_dependency"}],
		}))
		.unwrap();

	let child = form
		.as_fieldset()
		.and_then(|form| form.get_as::<FieldsetWithDependency>("fieldset_with_dependency"))
		.unwrap();
	assert!(child.initialized);
}

fn registration_form() -> Box<dyn FormElement> {
	ElementFactory::new()
		.create_from_json(&json!({
			"type": "fieldset",
			"name": "registration",
			"options": {"label": "Registration"},
			"elements": [
				{"type": "text", "name": "username", "attributes": {"required": true}},
				{"type": "email", "name": "email"},
				{
					"type": "fieldset",
					"name": "schedule",
					"elements": [
						{"type": "datetime_select", "name": "starts_at"},
						{"type": "date", "name": "day", "attributes": {"min": "2013-01-01"}},
					],
				},
			],
		}))
		.unwrap()
}

#[rstest]
fn test_nested_form_from_specification() {
	let form = registration_form();
	let fieldset = form.as_fieldset().unwrap();

	assert_eq!(form.label(), Some("Registration"));
	assert_eq!(fieldset.len(), 3);
	assert_eq!(fieldset.elements().count(), 2);
	let schedule = fieldset.fieldsets().next().unwrap();
	assert!(schedule.get_as::<DateTimeSelect>("starts_at").is_some());
	assert_eq!(
		schedule.get("day").unwrap().attribute("type"),
		Some(&json!("date"))
	);
}

#[rstest]
fn test_validate_and_distribute_messages() {
	// Arrange
	let mut form = registration_form();
	let specification = form.as_fieldset().unwrap().input_filter_specification().unwrap();
	let mut filter = InputFilter::from_specification(&specification);
	let data = json!({
		"username": "ada",
		"email": "not-an-email",
		"schedule": {
			"starts_at": {"year": "2013", "month": "02", "day": "07", "hour": "03", "minute": "14"},
			"day": "2012-12-31",
		},
	});

	// Act
	filter.set_data(data.as_object().cloned().unwrap());
	let valid = filter.is_valid();
	form.as_fieldset_mut()
		.unwrap()
		.set_messages_from(&filter.messages());

	// Assert
	assert!(!valid);
	let mut invalid = filter.invalid_inputs();
	invalid.sort();
	assert_eq!(invalid, vec!["email".to_string(), "schedule".to_string()]);

	let fieldset = form.as_fieldset().unwrap();
	assert_eq!(fieldset.get("email").unwrap().messages().len(), 1);
	assert!(fieldset.get("username").unwrap().messages().is_empty());
	let schedule = fieldset.fieldsets().next().unwrap();
	assert_eq!(
		schedule.get("day").unwrap().messages(),
		["The input is not greater than or equal to '2013-01-01'"]
	);
	assert!(schedule.get("starts_at").unwrap().messages().is_empty());
	assert_eq!(
		filter.values()["schedule"]["starts_at"],
		json!("2013-02-07 03:14:00")
	);
}

#[rstest]
fn test_populate_values_from_submission() {
	let mut form = registration_form();

	form.set_value(json!({
		"username": "ada",
		"schedule": {"starts_at": "2013-02-07 03:14:15"},
	}))
	.unwrap();

	let value = form.value();
	assert_eq!(value["username"], json!("ada"));
	assert_eq!(value["email"], Value::Null);
	assert_eq!(value["schedule"]["starts_at"], json!("2013-02-07 03:14:15"));
}
