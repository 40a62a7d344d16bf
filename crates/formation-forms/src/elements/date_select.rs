//! Date entered through year, month and day selects

use super::date_parts::{
	Clock, Part, YearSettings, apply_part_attributes, parse_datetime, part_value, set_empty_option,
	set_part, unparsable_value,
};
use super::select::Select;
use crate::element::{Element, ElementKind, FormElement};
use crate::error::FormResult;
use crate::filters::Filter;
use crate::input_filter::InputSpecification;
use crate::validators::Validator;
use chrono::{Datelike, NaiveDate};
use serde_json::{Map, Value};
use std::any::Any;

/// Composite of `<name>[year]`, `<name>[month]` and `<name>[day]` selects
///
/// # Examples
///
/// ```
/// use formation_forms::{DateSelect, FormElement};
/// use serde_json::json;
///
/// let mut element = DateSelect::new("birthday");
/// element.set_value(json!("2012-09-24")).unwrap();
/// assert_eq!(element.value(), json!("2012-09-24"));
/// assert_eq!(element.day_element().name(), Some("birthday[day]"));
/// ```
#[derive(Debug, Clone)]
pub struct DateSelect {
	element: Element,
	year: Select,
	month: Select,
	day: Select,
	settings: YearSettings,
}

impl DateSelect {
	pub fn new(name: impl Into<String>) -> Self {
		let element = Element::new(name);
		let base = element.name().map(str::to_string);
		let mut select = Self {
			element,
			year: Select::new(Part::Year.select_name(base.as_deref())),
			month: Part::Month.select(base.as_deref()),
			day: Part::Day.select(base.as_deref()),
			settings: YearSettings::default(),
		};
		select.refresh_years();
		select
	}
	/// Replace the clock used for the default year range and "now"
	pub fn with_clock(mut self, clock: Clock) -> Self {
		self.settings.clock = clock;
		self.refresh_years();
		self
	}
	pub fn year_element(&self) -> &Select {
		&self.year
	}
	pub fn month_element(&self) -> &Select {
		&self.month
	}
	pub fn day_element(&self) -> &Select {
		&self.day
	}
	pub fn min_year(&self) -> i32 {
		self.settings.min_year()
	}
	pub fn max_year(&self) -> i32 {
		self.settings.max_year()
	}
	pub fn should_create_empty_option(&self) -> bool {
		self.settings.create_empty_option
	}
	pub fn should_render_delimiters(&self) -> bool {
		self.settings.render_delimiters
	}
	pub(crate) fn clock(&self) -> Clock {
		self.settings.clock
	}
	pub fn set_date(&mut self, date: NaiveDate) {
		set_part(&mut self.year, Some(Part::Year.format(date.year().unsigned_abs())));
		set_part(&mut self.month, Some(Part::Month.format(date.month())));
		set_part(&mut self.day, Some(Part::Day.format(date.day())));
	}
	pub(crate) fn clear(&mut self) {
		for select in [&mut self.year, &mut self.month, &mut self.day] {
			set_part(select, None);
		}
	}
	/// Store already normalised parts
	pub(crate) fn set_parts(&mut self, year: Option<String>, month: Option<String>, day: Option<String>) {
		set_part(&mut self.year, year);
		set_part(&mut self.month, month);
		set_part(&mut self.day, day);
	}
	pub(crate) fn has_any_part(&self) -> bool {
		[&self.year, &self.month, &self.day]
			.into_iter()
			.any(|select| part_value(select).is_some())
	}
	fn refresh_years(&mut self) {
		let choices = self.settings.year_choices();
		self.year = self.year.clone().with_choices(choices);
	}
	fn set_parts_from(&mut self, parts: &Map<String, Value>) -> FormResult<()> {
		let year = Part::Year.normalize(parts.get("year"))?;
		let month = Part::Month.normalize(parts.get("month"))?;
		let day = Part::Day.normalize(parts.get("day"))?;
		self.set_parts(year, month, day);
		Ok(())
	}
}

impl FormElement for DateSelect {
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
		ElementKind::DateSelect
	}

	fn set_name(&mut self, name: &str) {
		self.element
			.attributes
			.insert("name".to_string(), Value::String(name.to_string()));
		for (part, select) in [
			(Part::Year, &mut self.year),
			(Part::Month, &mut self.month),
			(Part::Day, &mut self.day),
		] {
			select.set_name(&part.select_name(Some(name)));
		}
	}

	fn set_option(&mut self, key: &str, value: Value) -> FormResult<()> {
		if self.settings.apply(key, &value)? {
			match key {
				"min_year" | "max_year" => self.refresh_years(),
				"create_empty_option" => {
					for select in [&mut self.year, &mut self.month, &mut self.day] {
						set_empty_option(select, self.settings.create_empty_option);
					}
				}
				_ => {}
			}
		}
		match key {
			"year_attributes" => apply_part_attributes(&mut self.year, key, &value)?,
			"month_attributes" => apply_part_attributes(&mut self.month, key, &value)?,
			"day_attributes" => apply_part_attributes(&mut self.day, key, &value)?,
			_ => {}
		}
		self.element.apply_option(key, value)
	}

	fn value(&self) -> Value {
		match (
			part_value(&self.year),
			part_value(&self.month),
			part_value(&self.day),
		) {
			(Some(year), Some(month), Some(day)) => Value::String(format!("{year}-{month}-{day}")),
			_ => Value::Null,
		}
	}

	fn set_value(&mut self, value: Value) -> FormResult<()> {
		match value {
			Value::String(text) => {
				let datetime = parse_datetime(&text).ok_or_else(unparsable_value)?;
				self.set_date(datetime.date());
			}
			Value::Null if self.settings.create_empty_option => self.clear(),
			Value::Null => self.set_date((self.settings.clock)().date()),
			Value::Object(parts) => self.set_parts_from(&parts)?,
			_ => return Err(unparsable_value()),
		}
		Ok(())
	}

	fn input_specification(&self) -> FormResult<Option<InputSpecification>> {
		Ok(Some(
			InputSpecification::new(self.name().unwrap_or_default())
				.with_required(false)
				.with_filter(Filter::ComposeDate)
				.with_validator(Validator::Date {
					format: "%Y-%m-%d".to_string(),
				}),
		))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::FormError;
	use chrono::NaiveDateTime;
	use serde_json::json;

	fn fixed_clock() -> NaiveDateTime {
		NaiveDate::from_ymd_opt(2013, 2, 7)
			.and_then(|date| date.and_hms_opt(0, 0, 0))
			.unwrap()
	}

	#[test]
	fn test_sub_selects_follow_name() {
		// Arrange
		let mut element = DateSelect::new("foo");

		// Act
		element.set_name("bar");

		// Assert
		assert_eq!(element.name(), Some("bar"));
		assert_eq!(element.year_element().name(), Some("bar[year]"));
		assert_eq!(element.month_element().name(), Some("bar[month]"));
		assert_eq!(element.day_element().name(), Some("bar[day]"));
	}

	#[test]
	fn test_year_range_defaults_to_clock() {
		let element = DateSelect::new("foo").with_clock(fixed_clock);

		assert_eq!(element.max_year(), 2013);
		assert_eq!(element.min_year(), 1913);
		assert_eq!(element.year_element().option_values()[0], "2013");
		assert_eq!(element.month_element().option_values().len(), 12);
		assert_eq!(element.day_element().option_values()[30], "31");
	}

	#[test]
	fn test_year_range_options() {
		let mut element = DateSelect::new("foo");
		element.set_option("min_year", json!(2000)).unwrap();
		element.set_option("max_year", json!(2002)).unwrap();

		assert_eq!(
			element.year_element().option_values(),
			vec!["2002", "2001", "2000"]
		);
		assert_eq!(element.option("min_year"), Some(&json!(2000)));
	}

	#[test]
	fn test_year_range_out_of_bounds_rejected() {
		let mut element = DateSelect::new("foo").with_clock(fixed_clock);

		assert!(matches!(
			element.set_option("max_year", json!(i32::MIN)),
			Err(FormError::InvalidArgument(_))
		));
		assert!(element.set_option("min_year", json!(-2_000_000_000)).is_err());
		assert_eq!(element.option("max_year"), None);
		assert_eq!(element.year_element().option_values().len(), 101);
	}

	#[test]
	fn test_value_from_object() {
		let mut element = DateSelect::new("foo");
		element
			.set_value(json!({"year": "2012", "month": 9, "day": "4"}))
			.unwrap();

		assert_eq!(element.value(), json!("2012-09-04"));
	}

	#[test]
	fn test_incomplete_parts_have_no_value() {
		let mut element = DateSelect::new("foo");
		element
			.set_value(json!({"year": "2012", "month": ""}))
			.unwrap();

		assert_eq!(element.value(), Value::Null);
		assert!(element.has_any_part());
	}

	#[test]
	fn test_null_uses_clock_without_empty_option() {
		let mut element = DateSelect::new("foo").with_clock(fixed_clock);
		element.set_value(Value::Null).unwrap();
		assert_eq!(element.value(), json!("2013-02-07"));

		element.set_option("create_empty_option", json!(true)).unwrap();
		element.set_value(Value::Null).unwrap();
		assert_eq!(element.value(), Value::Null);
		assert_eq!(element.year_element().empty_option(), Some(""));
	}

	#[test]
	fn test_invalid_values() {
		let mut element = DateSelect::new("foo");

		let error = element.set_value(json!("hello world")).unwrap_err();
		assert_eq!(
			error,
			FormError::InvalidArgument(
				"Value should be a parsable string or a date/time value".to_string()
			)
		);
		assert!(element.set_value(json!(12)).is_err());
		assert!(element.set_value(json!({"month": "13"})).is_err());
	}

	#[test]
	fn test_part_attributes_option() {
		let mut element = DateSelect::new("foo");
		element
			.set_option("day_attributes", json!({"class": "day"}))
			.unwrap();

		assert_eq!(element.day_element().attribute("class"), Some(&json!("day")));
		assert!(element.month_element().attribute("class").is_none());
	}

	#[test]
	fn test_input_specification() {
		let spec = DateSelect::new("foo").input_specification().unwrap().unwrap();

		assert!(!spec.required);
		assert_eq!(spec.filters, vec![Filter::ComposeDate]);
		assert_eq!(
			spec.validators,
			vec![Validator::Date {
				format: "%Y-%m-%d".to_string()
			}]
		);
	}
}
