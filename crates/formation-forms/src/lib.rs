//! Form elements and input validation for Formation
//!
//! This crate provides the model side of forms:
//! - Elements with ordered attributes, options, labels and validation messages
//! - Composite date/time elements assembled from several selects
//! - Fieldsets grouping elements into nested structures
//! - An element factory building elements from declarative specifications
//! - Input filter specifications and the input filter that runs them

pub mod element;
pub mod elements;
pub mod error;
pub mod factory;
pub mod fieldset;
pub mod filters;
pub mod input_filter;
pub mod validators;

pub use element::{Attributes, Element, ElementKind, FormElement, Options, is_truthy};
pub use elements::{
	Clock, DateInput, DateInputKind, DateSelect, DateTimeSelect, Email, MonthSelect, Number,
	Select, ValueOption, ValueOptionEntry, system_clock,
};
pub use error::{FormError, FormResult};
pub use factory::{ElementConstructor, ElementFactory, ElementSpec};
pub use fieldset::Fieldset;
pub use filters::Filter;
pub use input_filter::{
	Input, InputFilter, InputFilterEntry, InputFilterMember, InputFilterMessages,
	InputFilterSpecification, InputMessages, InputSpecification,
};
pub use validators::{StepUnit, ValidationError, ValidationResult, Validator};
