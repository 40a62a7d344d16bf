// Single-value inputs
pub mod date_input;
pub mod email;
pub mod number;
pub mod select;

// Composite date/time selects
mod date_parts;
pub mod date_select;
pub mod datetime_select;
pub mod month_select;

pub use date_input::{DateInput, DateInputKind};
pub use date_parts::{Clock, system_clock};
pub use date_select::DateSelect;
pub use datetime_select::DateTimeSelect;
pub use email::Email;
pub use month_select::MonthSelect;
pub use number::Number;
pub use select::{Select, ValueOption, ValueOptionEntry};
