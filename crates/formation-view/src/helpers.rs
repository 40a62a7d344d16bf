//! View helpers rendering form elements to HTML

mod date_pattern;
pub mod form_collection;
pub mod form_date_select;
pub mod form_element;
pub mod form_element_errors;
pub mod form_input;
pub mod form_label;
pub mod form_row;
pub mod form_select;

pub use form_collection::FormCollection;
pub use form_date_select::{FormDateSelect, FormDateTimeSelect, FormMonthSelect};
pub use form_element::FormElementHelper;
pub use form_element_errors::FormElementErrors;
pub use form_input::{FormInput, InputType};
pub use form_label::FormLabel;
pub use form_row::{FormRow, LabelPosition};
pub use form_select::FormSelect;
