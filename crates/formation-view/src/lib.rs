//! HTML view helpers for Formation
//!
//! Renders the elements of `formation-forms` to markup:
//! - A shared [`View`] context carrying the doctype, escaper and date patterns
//! - Context-aware escaping for text and attribute values
//! - One helper per element kind, plus rows, labels, errors and fieldsets
//!
//! ```
//! use formation_forms::DateInput;
//! use formation_view::{Doctype, FormInput, View, ViewHelper};
//!
//! let view = View::new();
//! view.set_doctype(Doctype::Xhtml5);
//!
//! let mut helper = FormInput::date();
//! helper.set_view(view);
//!
//! let element = DateInput::date("start");
//! assert_eq!(
//!     helper.render(&element).unwrap(),
//!     r#"<input name="start" type="date" value="" />"#
//! );
//! ```

pub mod doctype;
pub mod error;
pub mod escaper;
pub mod helper;
pub mod helpers;
pub mod settings;
pub mod view;

pub use doctype::Doctype;
pub use error::{ViewError, ViewResult};
pub use escaper::Escaper;
pub use helper::{HelperCore, ViewHelper};
pub use helpers::{
	FormCollection, FormDateSelect, FormDateTimeSelect, FormElementErrors, FormElementHelper,
	FormInput, FormLabel, FormMonthSelect, FormRow, FormSelect, InputType, LabelPosition,
};
pub use settings::ViewSettings;
pub use view::View;
