//! Composite date selects rendered in date pattern order

use super::date_pattern::{Token, part_label, tokenize, without_seconds};
use super::form_select::FormSelect;
use crate::error::{ViewError, ViewResult};
use crate::helper::{HelperCore, ViewHelper, append_class};
use crate::view::{DEFAULT_DATE_PATTERN, DEFAULT_TIME_PATTERN};
use formation_forms::{
	DateSelect, DateTimeSelect, FormElement, MonthSelect, Select, ValueOptionEntry,
};
use serde_json::Value;
use tracing::debug;

const DEFAULT_MONTH_PATTERN: &str = "MMMM y";

fn require_name<'a>(helper: &str, element: &'a dyn FormElement) -> ViewResult<&'a str> {
	element.name().ok_or_else(|| {
		ViewError::Domain(format!(
			"{helper}::render requires that the element has an assigned name; none discovered"
		))
	})
}

fn downcast<'a, T: 'static>(helper: &str, expected: &str, element: &'a dyn FormElement) -> ViewResult<&'a T> {
	element.as_any().downcast_ref::<T>().ok_or_else(|| {
		ViewError::InvalidArgument(format!(
			"{helper}::render requires that the element is a {expected}"
		))
	})
}

/// Copy of `select` with option labels formatted for the pattern field
///
/// The composite has no tag of its own, so its `class` goes on every select.
fn prepare(select: &Select, letter: char, width: usize, class: Option<&str>) -> ViewResult<Select> {
	let mut select = select.clone();
	if let Some(class) = class.filter(|class| !class.is_empty()) {
		let merged = append_class(select.attribute("class"), class);
		select.set_attribute("class", Value::String(merged))?;
	}
	let options = select
		.value_options()
		.iter()
		.map(|entry| match entry {
			ValueOptionEntry::Single(option) => {
				let mut option = option.clone();
				if let Ok(number) = option.value.parse::<u32>() {
					option.label = part_label(letter, width, number);
				}
				ValueOptionEntry::Single(option)
			}
			group => group.clone(),
		})
		.collect();
	select.set_value_options(options);
	Ok(select)
}

/// Render the sub-selects named by the pattern's fields, in pattern order
fn render_pattern(
	core: &HelperCore,
	select_helper: &FormSelect,
	element: &dyn FormElement,
	tokens: &[Token],
	parts: &[(char, &Select)],
	render_delimiters: bool,
) -> ViewResult<String> {
	let class = element.attribute("class").and_then(Value::as_str);
	let mut markup = String::new();
	for token in tokens {
		match token {
			Token::Field(letter, width) => {
				let Some((_, select)) = parts.iter().find(|(part, _)| part == letter) else {
					continue;
				};
				markup.push_str(&select_helper.render(&prepare(select, *letter, *width, class)?)?);
			}
			Token::Literal(text) if render_delimiters => markup.push_str(&core.escape_html(text)),
			Token::Literal(_) => {}
		}
	}
	Ok(markup.trim().to_string())
}

/// Renders a [`DateSelect`] as year, month and day selects
///
/// # Examples
///
/// ```
/// use formation_forms::DateSelect;
/// use formation_view::FormDateSelect;
///
/// let element = DateSelect::new("birthday");
/// let markup = FormDateSelect::new().with_pattern("y-MM-dd").render(&element).unwrap();
///
/// assert!(markup.starts_with(r#"<select name="birthday&#x5B;year&#x5D;">"#));
/// assert!(markup.contains("</select>-<select"));
/// ```
#[derive(Debug, Clone)]
pub struct FormDateSelect {
	core: HelperCore,
	select_helper: FormSelect,
	pattern: Option<String>,
}

impl Default for FormDateSelect {
	fn default() -> Self {
		Self::new()
	}
}

impl FormDateSelect {
	pub fn new() -> Self {
		Self {
			core: HelperCore::new(&[]),
			select_helper: FormSelect::new(),
			pattern: None,
		}
	}

	pub fn with_pattern(mut self, pattern: &str) -> Self {
		self.pattern = Some(pattern.to_string());
		self
	}

	pub fn set_pattern(&mut self, pattern: &str) {
		self.pattern = Some(pattern.to_string());
	}

	/// Explicit pattern, else the view's date pattern, else `MMMM d, y`
	pub fn pattern(&self) -> String {
		self.pattern
			.clone()
			.or_else(|| self.core.view().map(|view| view.date_pattern()))
			.unwrap_or_else(|| DEFAULT_DATE_PATTERN.to_string())
	}

	pub fn render(&self, element: &dyn FormElement) -> ViewResult<String> {
		let date = downcast::<DateSelect>("FormDateSelect", "DateSelect", element)?;
		let name = require_name("FormDateSelect", element)?;
		debug!(helper = "FormDateSelect", element = name, "rendering element");

		render_pattern(
			&self.core,
			&self.select_helper,
			element,
			&tokenize(&self.pattern()),
			&[
				('y', date.year_element()),
				('M', date.month_element()),
				('d', date.day_element()),
			],
			date.should_render_delimiters(),
		)
	}
}

impl ViewHelper for FormDateSelect {
	fn core(&self) -> &HelperCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut HelperCore {
		&mut self.core
	}

	fn inner_helpers_mut(&mut self) -> Vec<&mut dyn ViewHelper> {
		vec![&mut self.select_helper]
	}
}

/// Renders a [`MonthSelect`] as month and year selects
#[derive(Debug, Clone)]
pub struct FormMonthSelect {
	core: HelperCore,
	select_helper: FormSelect,
	pattern: Option<String>,
}

impl Default for FormMonthSelect {
	fn default() -> Self {
		Self::new()
	}
}

impl FormMonthSelect {
	pub fn new() -> Self {
		Self {
			core: HelperCore::new(&[]),
			select_helper: FormSelect::new(),
			pattern: None,
		}
	}

	pub fn with_pattern(mut self, pattern: &str) -> Self {
		self.pattern = Some(pattern.to_string());
		self
	}

	pub fn pattern(&self) -> String {
		self.pattern
			.clone()
			.unwrap_or_else(|| DEFAULT_MONTH_PATTERN.to_string())
	}

	pub fn render(&self, element: &dyn FormElement) -> ViewResult<String> {
		let month = downcast::<MonthSelect>("FormMonthSelect", "MonthSelect", element)?;
		let name = require_name("FormMonthSelect", element)?;
		debug!(helper = "FormMonthSelect", element = name, "rendering element");

		render_pattern(
			&self.core,
			&self.select_helper,
			element,
			&tokenize(&self.pattern()),
			&[('y', month.year_element()), ('M', month.month_element())],
			month.should_render_delimiters(),
		)
	}
}

impl ViewHelper for FormMonthSelect {
	fn core(&self) -> &HelperCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut HelperCore {
		&mut self.core
	}

	fn inner_helpers_mut(&mut self) -> Vec<&mut dyn ViewHelper> {
		vec![&mut self.select_helper]
	}
}

/// Renders a [`DateTimeSelect`]; the seconds select only when the element shows seconds
#[derive(Debug, Clone)]
pub struct FormDateTimeSelect {
	core: HelperCore,
	select_helper: FormSelect,
	pattern: Option<String>,
	date_pattern: Option<String>,
	time_pattern: Option<String>,
}

impl Default for FormDateTimeSelect {
	fn default() -> Self {
		Self::new()
	}
}

impl FormDateTimeSelect {
	pub fn new() -> Self {
		Self {
			core: HelperCore::new(&[]),
			select_helper: FormSelect::new(),
			pattern: None,
			date_pattern: None,
			time_pattern: None,
		}
	}

	/// Full pattern, overriding the date and time patterns
	pub fn with_pattern(mut self, pattern: &str) -> Self {
		self.pattern = Some(pattern.to_string());
		self
	}

	pub fn with_date_pattern(mut self, pattern: &str) -> Self {
		self.date_pattern = Some(pattern.to_string());
		self
	}

	pub fn with_time_pattern(mut self, pattern: &str) -> Self {
		self.time_pattern = Some(pattern.to_string());
		self
	}

	pub fn pattern(&self) -> String {
		if let Some(pattern) = &self.pattern {
			return pattern.clone();
		}
		let view = self.core.view();
		let date = self
			.date_pattern
			.clone()
			.or_else(|| view.map(|view| view.date_pattern()))
			.unwrap_or_else(|| DEFAULT_DATE_PATTERN.to_string());
		let time = self
			.time_pattern
			.clone()
			.or_else(|| view.map(|view| view.time_pattern()))
			.unwrap_or_else(|| DEFAULT_TIME_PATTERN.to_string());
		format!("{date} {time}")
	}

	pub fn render(&self, element: &dyn FormElement) -> ViewResult<String> {
		let datetime = downcast::<DateTimeSelect>("FormDateTimeSelect", "DateTimeSelect", element)?;
		let name = require_name("FormDateTimeSelect", element)?;
		debug!(helper = "FormDateTimeSelect", element = name, "rendering element");

		let mut tokens = tokenize(&self.pattern());
		if !datetime.should_show_seconds() {
			tokens = without_seconds(tokens);
		}
		render_pattern(
			&self.core,
			&self.select_helper,
			element,
			&tokens,
			&[
				('y', datetime.year_element()),
				('M', datetime.month_element()),
				('d', datetime.day_element()),
				('H', datetime.hour_element()),
				('m', datetime.minute_element()),
				('s', datetime.second_element()),
			],
			datetime.should_render_delimiters(),
		)
	}
}

impl ViewHelper for FormDateTimeSelect {
	fn core(&self) -> &HelperCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut HelperCore {
		&mut self.core
	}

	fn inner_helpers_mut(&mut self) -> Vec<&mut dyn ViewHelper> {
		vec![&mut self.select_helper]
	}
}
