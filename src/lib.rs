//! # Formation
//!
//! Form elements, input validation and HTML view helpers.
//!
//! ## Feature Flags
//!
//! - `minimal` - Elements, fieldsets, the element factory and input filters
//! - `full` (default) - Everything, including the view helpers
//! - `view` - HTML view helpers (`formation-view`)
//!
//! ## Quick Example
//!
//! ```rust
//! use formation::prelude::*;
//! use serde_json::json;
//!
//! let form = ElementFactory::new()
//!     .create_from_json(&json!({
//!         "type": "fieldset",
//!         "name": "event",
//!         "elements": [
//!             {"type": "date", "name": "day", "options": {"label": "Day"}},
//!         ],
//!     }))
//!     .unwrap();
//!
//! let markup = FormCollection::new().render(form.as_ref()).unwrap();
//! assert!(markup.contains(r#"type="date""#));
//! ```

pub use formation_forms as forms;
#[cfg(feature = "view")]
pub use formation_view as view;

pub use formation_forms::{
	DateInput, DateSelect, DateTimeSelect, Element, ElementFactory, ElementKind, ElementSpec,
	Fieldset, FormElement, FormError, FormResult, InputFilter, MonthSelect, Select,
};

#[cfg(feature = "view")]
pub use formation_view::{Doctype, View, ViewError, ViewHelper, ViewResult, ViewSettings};

/// Commonly used types
pub mod prelude {
	pub use formation_forms::{
		Attributes, DateInput, DateSelect, DateTimeSelect, Element, ElementFactory, ElementKind,
		ElementSpec, Email, Fieldset, FormElement, FormError, FormResult, InputFilter,
		InputFilterSpecification, MonthSelect, Number, Select, ValueOption, ValueOptionEntry,
	};

	#[cfg(feature = "view")]
	pub use formation_view::{
		Doctype, FormCollection, FormDateSelect, FormDateTimeSelect, FormElementErrors,
		FormElementHelper, FormInput, FormLabel, FormMonthSelect, FormRow, FormSelect, View,
		ViewError, ViewHelper, ViewResult, ViewSettings,
	};
}
