//! Shared plumbing of the composite date/time selects

use super::select::Select;
use crate::element::{FormElement, bool_option, object_option};
use crate::error::{FormError, FormResult};
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::ops::RangeInclusive;

/// Source of the current date and time
pub type Clock = fn() -> NaiveDateTime;

/// Local wall-clock time
pub fn system_clock() -> NaiveDateTime {
	Local::now().naive_local()
}

const DATETIME_FORMATS: &[&str] = &[
	"%Y-%m-%d %H:%M:%S",
	"%Y-%m-%d %H:%M",
	"%Y-%m-%dT%H:%M:%S",
	"%Y-%m-%dT%H:%M",
];

pub(crate) fn unparsable_value() -> FormError {
	FormError::invalid("Value should be a parsable string or a date/time value")
}

/// Parse the string forms accepted by the composite selects
pub(crate) fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
	let text = text.trim();
	DATETIME_FORMATS
		.iter()
		.find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
		.or_else(|| {
			DateTime::parse_from_rfc3339(text)
				.ok()
				.map(|datetime| datetime.naive_local())
		})
		.or_else(|| {
			NaiveDate::parse_from_str(text, "%Y-%m-%d")
				.ok()
				.and_then(|date| date.and_hms_opt(0, 0, 0))
		})
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Part {
	Year,
	Month,
	Day,
	Hour,
	Minute,
	Second,
}

impl Part {
	pub(crate) fn key(self) -> &'static str {
		match self {
			Self::Year => "year",
			Self::Month => "month",
			Self::Day => "day",
			Self::Hour => "hour",
			Self::Minute => "minute",
			Self::Second => "second",
		}
	}

	fn range(self) -> RangeInclusive<u32> {
		match self {
			Self::Year => 1..=9999,
			Self::Month => 1..=12,
			Self::Day => 1..=31,
			Self::Hour => 0..=23,
			Self::Minute | Self::Second => 0..=59,
		}
	}

	pub(crate) fn format(self, number: u32) -> String {
		match self {
			Self::Year => format!("{number:04}"),
			_ => format!("{number:02}"),
		}
	}

	/// Name of the sub-select for a composite called `base`
	pub(crate) fn select_name(self, base: Option<&str>) -> String {
		match base {
			Some(base) => format!("{base}[{}]", self.key()),
			None => String::new(),
		}
	}

	/// A sub-select offering every value of the part in ascending order
	pub(crate) fn select(self, base: Option<&str>) -> Select {
		Select::new(self.select_name(base)).with_choices(
			self.range()
				.map(|number| (self.format(number), self.format(number))),
		)
	}

	/// Normalise a submitted part: `None` when absent, zero-padded otherwise
	pub(crate) fn normalize(self, value: Option<&Value>) -> FormResult<Option<String>> {
		let number = match value {
			None | Some(Value::Null) => return Ok(None),
			Some(Value::String(text)) if text.is_empty() => return Ok(None),
			Some(Value::String(text)) if text.bytes().all(|b| b.is_ascii_digit()) => {
				text.parse::<u32>().ok()
			}
			Some(Value::Number(number)) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
			Some(_) => None,
		};
		match number {
			Some(number) if self.range().contains(&number) => Ok(Some(self.format(number))),
			_ => Err(FormError::invalid(format!(
				"Invalid {} value {}",
				self.key(),
				value.map(Value::to_string).unwrap_or_default()
			))),
		}
	}
}

/// Settings shared by the composites carrying a year select
#[derive(Debug, Clone)]
pub(crate) struct YearSettings {
	pub(crate) min_year: Option<i32>,
	pub(crate) max_year: Option<i32>,
	pub(crate) create_empty_option: bool,
	pub(crate) render_delimiters: bool,
	pub(crate) clock: Clock,
}

impl Default for YearSettings {
	fn default() -> Self {
		Self {
			min_year: None,
			max_year: None,
			create_empty_option: false,
			render_delimiters: true,
			clock: system_clock,
		}
	}
}

impl YearSettings {
	pub(crate) fn max_year(&self) -> i32 {
		self.max_year.unwrap_or_else(|| (self.clock)().year())
	}

	/// Explicit minimum, else a century before the maximum (never below year 1)
	pub(crate) fn min_year(&self) -> i32 {
		self.min_year
			.unwrap_or_else(|| self.max_year().saturating_sub(100).max(YEAR_MIN))
	}

	/// Year choices, newest first
	pub(crate) fn year_choices(&self) -> Vec<(String, String)> {
		(self.min_year()..=self.max_year())
			.rev()
			.map(|year| (format!("{year:04}"), format!("{year:04}")))
			.collect()
	}

	/// Apply one of the shared options; `Ok(false)` when `key` is not one of them
	pub(crate) fn apply(&mut self, key: &str, value: &Value) -> FormResult<bool> {
		match key {
			"min_year" => self.min_year = Some(year_option(key, value)?),
			"max_year" => self.max_year = Some(year_option(key, value)?),
			"create_empty_option" => self.create_empty_option = bool_option(key, value)?,
			"render_delimiters" => self.render_delimiters = bool_option(key, value)?,
			_ => return Ok(false),
		}
		Ok(true)
	}
}

const YEAR_MIN: i32 = 1;
const YEAR_MAX: i32 = 9999;

/// A year option within the range the year sub-select can render
fn year_option(key: &str, value: &Value) -> FormResult<i32> {
	let year = match value {
		Value::Number(number) => number.as_i64().and_then(|n| i32::try_from(n).ok()),
		Value::String(text) => text.trim().parse::<i32>().ok(),
		_ => None,
	};
	year.filter(|year| (YEAR_MIN..=YEAR_MAX).contains(year))
		.ok_or_else(|| {
			FormError::invalid(format!(
				"The {key} option expects a year between {YEAR_MIN} and {YEAR_MAX}, got {value}"
			))
		})
}

/// Current value of a sub-select, `None` when empty
pub(crate) fn part_value(select: &Select) -> Option<String> {
	select
		.element()
		.value
		.as_str()
		.filter(|text| !text.is_empty())
		.map(str::to_string)
}

pub(crate) fn set_part(select: &mut Select, value: Option<String>) {
	select.element_mut().value = value.map(Value::String).unwrap_or(Value::Null);
}

/// Forward a `<part>_attributes` option to the matching sub-select
pub(crate) fn apply_part_attributes(select: &mut Select, key: &str, value: &Value) -> FormResult<()> {
	select.set_attributes(object_option(key, value)?)
}

pub(crate) fn set_empty_option(select: &mut Select, create: bool) {
	select.set_empty_option(create.then(String::new));
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case("2012-09-24 10:05:09", "2012-09-24 10:05:09")]
	#[case("2012-09-24 10:05", "2012-09-24 10:05:00")]
	#[case("2012-09-24T10:05:09", "2012-09-24 10:05:09")]
	#[case("2012-09-24T10:05", "2012-09-24 10:05:00")]
	#[case("2012-09-24T10:05:09+02:00", "2012-09-24 10:05:09")]
	#[case("2012-09-24", "2012-09-24 00:00:00")]
	fn test_parse_datetime(#[case] input: &str, #[case] expected: &str) {
		let parsed = parse_datetime(input).unwrap();
		assert_eq!(parsed.format("%Y-%m-%d %H:%M:%S").to_string(), expected);
	}

	#[rstest]
	#[case("hello")]
	#[case("2012-13-24")]
	#[case("")]
	fn test_parse_datetime_rejects(#[case] input: &str) {
		assert!(parse_datetime(input).is_none());
	}

	#[rstest]
	#[case(Part::Month, json!("9"), Some("09"))]
	#[case(Part::Month, json!(12), Some("12"))]
	#[case(Part::Year, json!("812"), Some("0812"))]
	#[case(Part::Second, json!(""), None)]
	#[case(Part::Second, json!(null), None)]
	fn test_normalize_part(
		#[case] part: Part,
		#[case] value: Value,
		#[case] expected: Option<&str>,
	) {
		assert_eq!(
			part.normalize(Some(&value)).unwrap().as_deref(),
			expected
		);
	}

	#[rstest]
	#[case(Part::Month, json!("13"))]
	#[case(Part::Hour, json!(24))]
	#[case(Part::Day, json!("0"))]
	#[case(Part::Day, json!("tw"))]
	#[case(Part::Minute, json!(-1))]
	#[case(Part::Minute, json!(["1"]))]
	fn test_normalize_part_rejects(#[case] part: Part, #[case] value: Value) {
		assert!(matches!(
			part.normalize(Some(&value)),
			Err(FormError::InvalidArgument(_))
		));
	}

	#[test]
	fn test_year_settings_follow_clock() {
		fn clock() -> NaiveDateTime {
			NaiveDate::from_ymd_opt(2020, 5, 1)
				.and_then(|date| date.and_hms_opt(0, 0, 0))
				.unwrap()
		}
		let settings = YearSettings {
			clock,
			..YearSettings::default()
		};

		assert_eq!(settings.max_year(), 2020);
		assert_eq!(settings.min_year(), 1920);
		let choices = settings.year_choices();
		assert_eq!(choices.len(), 101);
		assert_eq!(choices[0].0, "2020");
	}

	#[test]
	fn test_year_option_accepts_strings() {
		let mut settings = YearSettings::default();
		assert!(settings.apply("min_year", &json!("1990")).unwrap());
		assert!(settings.apply("max_year", &json!(2000)).unwrap());
		assert!(!settings.apply("label", &json!("x")).unwrap());

		assert_eq!(settings.year_choices().last().unwrap().0, "1990");
		assert!(settings.apply("max_year", &json!("soon")).is_err());
	}

	#[rstest]
	#[case("max_year", json!(i32::MIN))]
	#[case("max_year", json!(i64::MAX))]
	#[case("min_year", json!(-2_000_000_000))]
	#[case("max_year", json!(2_000_000_000))]
	#[case("min_year", json!(0))]
	#[case("max_year", json!("10000"))]
	fn test_year_option_rejects_out_of_range(#[case] key: &str, #[case] value: Value) {
		// Arrange
		let mut settings = YearSettings::default();

		// Act
		let result = settings.apply(key, &value);

		// Assert
		assert!(matches!(result, Err(FormError::InvalidArgument(_))));
		assert_eq!(settings.min_year, None);
		assert_eq!(settings.max_year, None);
	}

	#[test]
	fn test_min_year_stays_at_year_one() {
		let mut settings = YearSettings::default();
		settings.apply("max_year", &json!(40)).unwrap();

		assert_eq!(settings.min_year(), 1);
		let choices = settings.year_choices();
		assert_eq!(choices.len(), 40);
		assert_eq!(choices.last().unwrap().0, "0001");
	}
}
