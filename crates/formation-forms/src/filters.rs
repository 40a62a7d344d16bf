//! Filters applied to submitted values before validation

use crate::element::scalar_to_string;
use serde::Serialize;
use serde_json::{Map, Value};

/// Filter descriptor carried by an input specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "name")]
pub enum Filter {
	/// Trim surrounding whitespace from strings
	StringTrim,
	/// Remove carriage returns and line feeds from strings
	StripNewlines,
	/// Join `year`, `month` and `day` parts into `YYYY-MM-DD`
	ComposeDate,
	/// Join `year` and `month` parts into `YYYY-MM`
	ComposeMonth,
	/// Join date and time parts into `YYYY-MM-DD HH:MM:SS`
	ComposeDateTime,
}

impl Filter {
	/// Apply the filter, passing through values it does not handle
	///
	/// # Examples
	///
	/// ```
	/// use formation_forms::filters::Filter;
	/// use serde_json::json;
	///
	/// let composed = Filter::ComposeDateTime.apply(json!({
	///     "year": "2013", "month": "02", "day": "07", "hour": "03", "minute": "14",
	/// }));
	/// assert_eq!(composed, json!("2013-02-07 03:14:00"));
	///
	/// assert_eq!(Filter::StringTrim.apply(json!("  x ")), json!("x"));
	/// ```
	pub fn apply(&self, value: Value) -> Value {
		match (self, value) {
			(Self::StringTrim, Value::String(text)) => Value::String(text.trim().to_string()),
			(Self::StripNewlines, Value::String(text)) => {
				Value::String(text.chars().filter(|c| *c != '\r' && *c != '\n').collect())
			}
			(Self::ComposeDate, Value::Object(parts)) => {
				compose(&parts, &["year", "month", "day"], &[])
					.map(|p| format!("{}-{}-{}", p[0], p[1], p[2]))
					.map(Value::String)
					.unwrap_or(Value::Object(parts))
			}
			(Self::ComposeMonth, Value::Object(parts)) => compose(&parts, &["year", "month"], &[])
				.map(|p| format!("{}-{}", p[0], p[1]))
				.map(Value::String)
				.unwrap_or(Value::Object(parts)),
			(Self::ComposeDateTime, Value::Object(parts)) => compose(
				&parts,
				&["year", "month", "day", "hour", "minute"],
				&["second"],
			)
			.map(|p| format!("{}-{}-{} {}:{}:{}", p[0], p[1], p[2], p[3], p[4], p[5]))
			.map(Value::String)
			.unwrap_or(Value::Object(parts)),
			(_, other) => other,
		}
	}
}

/// Collect the required parts followed by the defaulted ones (`00` when absent)
fn compose(parts: &Map<String, Value>, required: &[&str], defaulted: &[&str]) -> Option<Vec<String>> {
	let mut collected = Vec::with_capacity(required.len() + defaulted.len());
	for key in required {
		collected.push(part(parts, key)?);
	}
	for key in defaulted {
		collected.push(part(parts, key).unwrap_or_else(|| "00".to_string()));
	}
	Some(collected)
}

/// A zero-padded part; digit strings are padded like numbers
fn part(parts: &Map<String, Value>, key: &str) -> Option<String> {
	let width = if key == "year" { 4 } else { 2 };
	let text = match parts.get(key)? {
		Value::Number(number) => number.as_u64().map(|n| format!("{n:0width$}"))?,
		other => scalar_to_string(other)?,
	};
	if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
		return Some(format!("{text:0>width$}"));
	}
	(!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_strip_newlines() {
		assert_eq!(
			Filter::StripNewlines.apply(json!("a\r\nb\nc")),
			json!("abc")
		);
	}

	#[test]
	fn test_string_filters_ignore_non_strings() {
		assert_eq!(Filter::StringTrim.apply(json!(5)), json!(5));
		assert_eq!(Filter::StringTrim.apply(Value::Null), Value::Null);
	}

	#[test]
	fn test_compose_date() {
		let value = json!({"year": "2012", "month": "09", "day": "24"});
		assert_eq!(Filter::ComposeDate.apply(value), json!("2012-09-24"));
	}

	#[test]
	fn test_compose_month_pads_numbers() {
		let value = json!({"year": 2012, "month": 9});
		assert_eq!(Filter::ComposeMonth.apply(value), json!("2012-09"));
	}

	#[test]
	fn test_compose_pads_digit_strings() {
		let value = json!({"year": "812", "month": "9", "day": "4"});
		assert_eq!(Filter::ComposeDate.apply(value), json!("0812-09-04"));

		let value = json!({"year": "2012", "month": "9", "day": "24", "hour": "3", "minute": "4"});
		assert_eq!(
			Filter::ComposeDateTime.apply(value),
			json!("2012-09-24 03:04:00")
		);
	}

	#[test]
	fn test_compose_passes_through_incomplete_parts() {
		let value = json!({"year": "2012", "month": "", "day": "24"});
		assert_eq!(Filter::ComposeDate.apply(value.clone()), value);

		let value = json!({"year": "2012", "month": "01", "day": "24", "hour": "10"});
		assert_eq!(Filter::ComposeDateTime.apply(value.clone()), value);

		assert_eq!(
			Filter::ComposeDateTime.apply(json!("2012-01-24 10:00:00")),
			json!("2012-01-24 10:00:00")
		);
	}

	#[test]
	fn test_compose_datetime_with_seconds() {
		let value = json!({
			"year": "2012", "month": "01", "day": "24",
			"hour": "10", "minute": "05", "second": "09",
		});
		assert_eq!(
			Filter::ComposeDateTime.apply(value),
			json!("2012-01-24 10:05:09")
		);
	}

	#[test]
	fn test_filter_descriptor_shape() {
		assert_eq!(
			serde_json::to_value(Filter::StringTrim).unwrap(),
			json!({"name": "StringTrim"})
		);
	}
}
