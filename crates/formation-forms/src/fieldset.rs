//! Named, ordered groups of elements

use crate::element::{Element, ElementKind, FormElement};
use crate::error::{FormError, FormResult};
use crate::input_filter::{
	InputFilterEntry, InputFilterMessages, InputFilterSpecification, InputMessages,
};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::any::Any;

/// A group of elements and nested fieldsets, keyed by element name
///
/// # Examples
///
/// ```
/// use formation_forms::{Element, Email, Fieldset, FormElement};
/// use serde_json::json;
///
/// let mut fieldset = Fieldset::new("contact");
/// fieldset.add(Box::new(Element::new("name"))).unwrap();
/// fieldset.add(Box::new(Email::new("email"))).unwrap();
///
/// fieldset.set_value(json!({"name": "Ada", "email": "ada@example.com"})).unwrap();
/// assert_eq!(fieldset.value(), json!({"name": "Ada", "email": "ada@example.com"}));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Fieldset {
	element: Element,
	children: IndexMap<String, Box<dyn FormElement>>,
}

impl Fieldset {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			element: Element::new(name),
			children: IndexMap::new(),
		}
	}

	/// Add an element; an existing element with the same name is replaced in place
	pub fn add(&mut self, element: Box<dyn FormElement>) -> FormResult<()> {
		let name = element
			.name()
			.ok_or_else(|| FormError::invalid("Elements added to a fieldset must have a name"))?
			.to_string();
		self.children.insert(name, element);
		Ok(())
	}

	pub fn get(&self, name: &str) -> Option<&dyn FormElement> {
		self.children.get(name).map(|element| element.as_ref())
	}

	pub fn get_mut(&mut self, name: &str) -> Option<&mut Box<dyn FormElement>> {
		self.children.get_mut(name)
	}

	/// Typed access to a child
	pub fn get_as<T: 'static>(&self, name: &str) -> Option<&T> {
		self.get(name)?.as_any().downcast_ref::<T>()
	}

	pub fn has(&self, name: &str) -> bool {
		self.children.contains_key(name)
	}

	pub fn remove(&mut self, name: &str) -> Option<Box<dyn FormElement>> {
		self.children.shift_remove(name)
	}

	pub fn len(&self) -> usize {
		self.children.len()
	}

	pub fn is_empty(&self) -> bool {
		self.children.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn FormElement)> {
		self.children
			.iter()
			.map(|(name, element)| (name.as_str(), element.as_ref()))
	}

	/// Children that are not fieldsets
	pub fn elements(&self) -> impl Iterator<Item = &dyn FormElement> {
		self.children
			.values()
			.filter(|element| element.as_fieldset().is_none())
			.map(|element| element.as_ref())
	}

	/// Nested fieldsets
	pub fn fieldsets(&self) -> impl Iterator<Item = &Fieldset> {
		self.children
			.values()
			.filter_map(|element| element.as_fieldset())
	}

	/// Assign values to children by name; keys without a child are ignored
	pub fn populate_values(&mut self, data: &Map<String, Value>) -> FormResult<()> {
		for (name, element) in self.children.iter_mut() {
			if let Some(value) = data.get(name) {
				element.set_value(value.clone())?;
			}
		}
		Ok(())
	}

	/// Input filter specification of every child that has one
	pub fn input_filter_specification(&self) -> FormResult<InputFilterSpecification> {
		let mut specification = InputFilterSpecification::new();
		for (name, element) in &self.children {
			if let Some(fieldset) = element.as_fieldset() {
				specification.insert(
					name.clone(),
					InputFilterEntry::Nested(fieldset.input_filter_specification()?),
				);
			} else if let Some(input) = element.input_specification()? {
				specification.insert(name.clone(), InputFilterEntry::Input(input));
			}
		}
		Ok(specification)
	}

	/// Hand validation messages to the children they belong to
	pub fn set_messages_from(&mut self, messages: &InputFilterMessages) {
		let none = InputFilterMessages::new();
		for (name, element) in self.children.iter_mut() {
			if let Some(fieldset) = element.as_fieldset_mut() {
				match messages.get(name) {
					Some(InputMessages::Nested(nested)) => fieldset.set_messages_from(nested),
					_ => fieldset.set_messages_from(&none),
				}
			} else {
				match messages.get(name) {
					Some(InputMessages::Input(input_messages)) => {
						element.set_messages(input_messages.clone())
					}
					_ => element.set_messages(vec![]),
				}
			}
		}
	}
}

impl FormElement for Fieldset {
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
		ElementKind::Fieldset
	}

	fn value(&self) -> Value {
		Value::Object(
			self.children
				.iter()
				.map(|(name, element)| (name.clone(), element.value()))
				.collect(),
		)
	}

	fn set_value(&mut self, value: Value) -> FormResult<()> {
		match value {
			Value::Object(data) => self.populate_values(&data),
			other => Err(FormError::invalid(format!(
				"Fieldset values must be objects, got {other}"
			))),
		}
	}

	fn init(&mut self) -> FormResult<()> {
		self.children
			.values_mut()
			.try_for_each(|element| element.init())
	}

	fn as_fieldset(&self) -> Option<&Fieldset> {
		Some(self)
	}

	fn as_fieldset_mut(&mut self) -> Option<&mut Fieldset> {
		Some(self)
	}
}
