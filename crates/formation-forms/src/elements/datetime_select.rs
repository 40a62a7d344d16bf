//! Date and time entered through six selects

use super::date_parts::{
	Clock, Part, apply_part_attributes, parse_datetime, part_value, set_empty_option, set_part,
	unparsable_value,
};
use super::date_select::DateSelect;
use super::select::Select;
use crate::element::{Element, ElementKind, FormElement, bool_option};
use crate::error::FormResult;
use crate::filters::Filter;
use crate::input_filter::InputSpecification;
use crate::validators::Validator;
use chrono::{NaiveDateTime, Timelike};
use serde_json::{Map, Value};
use std::any::Any;

/// A [`DateSelect`] extended with hour, minute and second selects
///
/// The value is always `YYYY-MM-DD HH:MM:SS`, even when the seconds select
/// is not rendered.
///
/// # Examples
///
/// ```
/// use formation_forms::{DateTimeSelect, FormElement};
/// use serde_json::json;
///
/// let mut element = DateTimeSelect::new("meeting");
/// element.set_value(json!({
///     "year": "2012", "month": "09", "day": "24", "hour": "03", "minute": "04",
/// })).unwrap();
///
/// assert_eq!(element.value(), json!("2012-09-24 03:04:00"));
/// assert_eq!(element.second_element().value(), json!("00"));
/// ```
#[derive(Debug, Clone)]
pub struct DateTimeSelect {
	date: DateSelect,
	hour: Select,
	minute: Select,
	second: Select,
	should_show_seconds: bool,
}

impl DateTimeSelect {
	pub fn new(name: impl Into<String>) -> Self {
		let date = DateSelect::new(name);
		let base = date.name().map(str::to_string);
		Self {
			hour: Part::Hour.select(base.as_deref()),
			minute: Part::Minute.select(base.as_deref()),
			second: Part::Second.select(base.as_deref()),
			date,
			should_show_seconds: false,
		}
	}
	pub fn with_clock(mut self, clock: Clock) -> Self {
		self.date = self.date.with_clock(clock);
		self
	}
	/// The date half: year, month and day selects plus the year settings
	pub fn date_element(&self) -> &DateSelect {
		&self.date
	}
	pub fn year_element(&self) -> &Select {
		self.date.year_element()
	}
	pub fn month_element(&self) -> &Select {
		self.date.month_element()
	}
	pub fn day_element(&self) -> &Select {
		self.date.day_element()
	}
	pub fn hour_element(&self) -> &Select {
		&self.hour
	}
	pub fn minute_element(&self) -> &Select {
		&self.minute
	}
	pub fn second_element(&self) -> &Select {
		&self.second
	}
	pub fn should_show_seconds(&self) -> bool {
		self.should_show_seconds
	}
	pub fn set_should_show_seconds(&mut self, show: bool) {
		self.should_show_seconds = show;
	}
	pub fn should_create_empty_option(&self) -> bool {
		self.date.should_create_empty_option()
	}
	pub fn should_render_delimiters(&self) -> bool {
		self.date.should_render_delimiters()
	}
	pub fn set_datetime(&mut self, datetime: NaiveDateTime) {
		self.date.set_date(datetime.date());
		set_part(&mut self.hour, Some(Part::Hour.format(datetime.hour())));
		set_part(&mut self.minute, Some(Part::Minute.format(datetime.minute())));
		set_part(&mut self.second, Some(Part::Second.format(datetime.second())));
	}
	fn time_selects(&mut self) -> [&mut Select; 3] {
		[&mut self.hour, &mut self.minute, &mut self.second]
	}
	fn set_parts_from(&mut self, parts: &Map<String, Value>) -> FormResult<()> {
		let year = Part::Year.normalize(parts.get("year"))?;
		let month = Part::Month.normalize(parts.get("month"))?;
		let day = Part::Day.normalize(parts.get("day"))?;
		let hour = Part::Hour.normalize(parts.get("hour"))?;
		let minute = Part::Minute.normalize(parts.get("minute"))?;
		let second = Part::Second.normalize(parts.get("second"))?;

		let has_date = year.is_some() || month.is_some() || day.is_some();
		let has_time = hour.is_some() || minute.is_some() || second.is_some();

		if !has_date && !has_time {
			self.date.clear();
			for select in self.time_selects() {
				set_part(select, None);
			}
			return Ok(());
		}

		if has_date {
			self.date.set_parts(year, month, day);
		} else {
			self.date.set_date((self.date.clock())().date());
		}
		let midnight = || Some("00".to_string());
		set_part(&mut self.hour, hour.or_else(midnight));
		set_part(&mut self.minute, minute.or_else(midnight));
		set_part(&mut self.second, second.or_else(midnight));
		Ok(())
	}
}

impl FormElement for DateTimeSelect {
	fn element(&self) -> &Element {
		self.date.element()
	}

	fn element_mut(&mut self) -> &mut Element {
		self.date.element_mut()
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
		ElementKind::DateTimeSelect
	}

	fn set_name(&mut self, name: &str) {
		self.date.set_name(name);
		self.hour.set_name(&Part::Hour.select_name(Some(name)));
		self.minute.set_name(&Part::Minute.select_name(Some(name)));
		self.second.set_name(&Part::Second.select_name(Some(name)));
	}

	fn set_option(&mut self, key: &str, value: Value) -> FormResult<()> {
		match key {
			"should_show_seconds" => self.should_show_seconds = bool_option(key, &value)?,
			"create_empty_option" => {
				let create = bool_option(key, &value)?;
				for select in self.time_selects() {
					set_empty_option(select, create);
				}
			}
			"hour_attributes" => apply_part_attributes(&mut self.hour, key, &value)?,
			"minute_attributes" => apply_part_attributes(&mut self.minute, key, &value)?,
			"second_attributes" => apply_part_attributes(&mut self.second, key, &value)?,
			_ => {}
		}
		self.date.set_option(key, value)
	}

	fn value(&self) -> Value {
		let Value::String(date) = self.date.value() else {
			return Value::Null;
		};
		match (
			part_value(&self.hour),
			part_value(&self.minute),
			part_value(&self.second),
		) {
			(Some(hour), Some(minute), Some(second)) => {
				Value::String(format!("{date} {hour}:{minute}:{second}"))
			}
			_ => Value::Null,
		}
	}

	fn set_value(&mut self, value: Value) -> FormResult<()> {
		match value {
			Value::String(text) => {
				let datetime = parse_datetime(&text).ok_or_else(unparsable_value)?;
				self.set_datetime(datetime);
			}
			Value::Null if self.should_create_empty_option() => {
				self.date.clear();
				for select in self.time_selects() {
					set_part(select, None);
				}
			}
			Value::Null => self.set_datetime((self.date.clock())()),
			Value::Object(parts) => self.set_parts_from(&parts)?,
			_ => return Err(unparsable_value()),
		}
		Ok(())
	}

	fn input_specification(&self) -> FormResult<Option<InputSpecification>> {
		Ok(Some(
			InputSpecification::new(self.name().unwrap_or_default())
				.with_required(false)
				.with_filter(Filter::ComposeDateTime)
				.with_validator(Validator::Date {
					format: "%Y-%m-%d %H:%M:%S".to_string(),
				}),
		))
	}
}
