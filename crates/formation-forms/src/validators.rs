//! Validators referenced by input specifications
//!
//! A [`Validator`] is plain data: elements describe the validation they
//! need, the input filter runs it. Serialised, a validator is a
//! `{"name": ..., "options": {...}}` descriptor.

use crate::element::scalar_to_string;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt::{Display, Write};
use std::sync::LazyLock;

// Basic `local-part@hostname` shape with dot-separated hostname labels.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9]([A-Za-z0-9\-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9\-]{0,61}[A-Za-z0-9])?)+$",
	)
	.expect("EMAIL_REGEX: invalid regex pattern")
});

static MONTH_VALUE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^([0-9]{4})-([0-9]{1,2})$").expect("MONTH_VALUE_REGEX: invalid regex pattern")
});

static WEEK_VALUE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^([0-9]{4})-W([0-9]{2})$").expect("WEEK_VALUE_REGEX: invalid regex pattern")
});

/// Validation failures; the display text is the user-facing message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
	#[error("Value is required and can't be empty")]
	IsEmpty,
	#[error("Invalid type given. String, integer or float expected")]
	InvalidType,
	#[error("The input does not fit the date format '{format}'")]
	FalseFormat { format: String },
	#[error("The input is not a valid step")]
	NotStep,
	#[error("The input is not greater than '{min}'")]
	NotGreater { min: String },
	#[error("The input is not greater than or equal to '{min}'")]
	NotGreaterInclusive { min: String },
	#[error("The input is not less than '{max}'")]
	NotLess { max: String },
	#[error("The input is not less than or equal to '{max}'")]
	NotLessInclusive { max: String },
	#[error("The input does not match against pattern '{pattern}'")]
	NotMatch { pattern: String },
	#[error("There was an internal error while using the pattern '{pattern}'")]
	ErrorousPattern { pattern: String },
	#[error("The input is not a valid email address. Use the basic format local-part@hostname")]
	InvalidEmail,
	#[error("The input was not found in the haystack")]
	NotInArray,
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Unit of a date step interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepUnit {
	Seconds,
	Minutes,
	Days,
	Weeks,
	Months,
}

impl StepUnit {
	fn seconds(self) -> Option<i64> {
		match self {
			Self::Seconds => Some(1),
			Self::Minutes => Some(60),
			Self::Days => Some(86_400),
			Self::Weeks | Self::Months => None,
		}
	}
}

/// Validator descriptor carried by an input specification
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "name", content = "options")]
pub enum Validator {
	/// Value parses with the given chrono format and is written the way the
	/// format writes it, zero padding included
	Date { format: String },
	/// Value lies a whole number of steps away from `base_value`
	DateStep {
		format: String,
		base_value: String,
		step: u32,
		unit: StepUnit,
	},
	GreaterThan { min: String, inclusive: bool },
	LessThan { max: String, inclusive: bool },
	Regex { pattern: String },
	EmailAddress,
	/// Split the value and validate every item
	Explode {
		separator: String,
		validator: Box<Validator>,
	},
	InArray { haystack: Vec<String> },
	/// Numeric value lies a whole number of steps away from `base_value`
	Step { base_value: f64, step: f64 },
}

impl Validator {
	/// Validate a submitted value
	///
	/// # Examples
	///
	/// ```
	/// use formation_forms::validators::Validator;
	/// use serde_json::json;
	///
	/// let validator = Validator::Date { format: "%Y-%m-%d %H:%M:%S".to_string() };
	/// assert!(validator.validate(&json!("2013-02-07 03:14:00")).is_ok());
	/// assert!(validator.validate(&json!("hello world")).is_err());
	/// ```
	pub fn validate(&self, value: &Value) -> ValidationResult<()> {
		match self {
			Self::Explode {
				separator,
				validator,
			} => {
				let items: Vec<Value> = match value {
					Value::Array(items) => items.clone(),
					Value::String(text) => text
						.split(separator.as_str())
						.map(|item| Value::String(item.trim().to_string()))
						.collect(),
					other => vec![other.clone()],
				};
				items.iter().try_for_each(|item| validator.validate(item))
			}
			Self::InArray { haystack } => {
				let needle = scalar_to_string(value).ok_or(ValidationError::NotInArray)?;
				if haystack.iter().any(|candidate| *candidate == needle) {
					Ok(())
				} else {
					Err(ValidationError::NotInArray)
				}
			}
			_ => {
				let text = scalar_to_string(value).ok_or(ValidationError::InvalidType)?;
				self.validate_str(&text)
			}
		}
	}

	fn validate_str(&self, text: &str) -> ValidationResult<()> {
		match self {
			Self::Date { format } => {
				if is_canonical(text, format) {
					Ok(())
				} else {
					Err(ValidationError::FalseFormat {
						format: format.clone(),
					})
				}
			}
			Self::DateStep {
				format,
				base_value,
				step,
				unit,
			} => validate_date_step(text, format, base_value, *step, *unit),
			Self::GreaterThan { min, inclusive } => match (compare(text, min), inclusive) {
				(Ordering::Greater, _) | (Ordering::Equal, true) => Ok(()),
				(_, true) => Err(ValidationError::NotGreaterInclusive { min: min.clone() }),
				(_, false) => Err(ValidationError::NotGreater { min: min.clone() }),
			},
			Self::LessThan { max, inclusive } => match (compare(text, max), inclusive) {
				(Ordering::Less, _) | (Ordering::Equal, true) => Ok(()),
				(_, true) => Err(ValidationError::NotLessInclusive { max: max.clone() }),
				(_, false) => Err(ValidationError::NotLess { max: max.clone() }),
			},
			Self::Regex { pattern } => {
				let regex = Regex::new(pattern).map_err(|_| ValidationError::ErrorousPattern {
					pattern: pattern.clone(),
				})?;
				if regex.is_match(text) {
					Ok(())
				} else {
					Err(ValidationError::NotMatch {
						pattern: pattern.clone(),
					})
				}
			}
			Self::EmailAddress => {
				if EMAIL_REGEX.is_match(text) {
					Ok(())
				} else {
					Err(ValidationError::InvalidEmail)
				}
			}
			Self::Step { base_value, step } => {
				let number: f64 = text.trim().parse().map_err(|_| ValidationError::NotStep)?;
				if *step == 0.0 {
					return Err(ValidationError::NotStep);
				}
				let steps = (number - base_value) / step;
				if (steps - steps.round()).abs() < 1e-9 {
					Ok(())
				} else {
					Err(ValidationError::NotStep)
				}
			}
			Self::Explode { .. } | Self::InArray { .. } => self.validate(&Value::String(text.to_string())),
		}
	}
}

/// A parsed date, time or date-time value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temporal {
	DateTime(NaiveDateTime),
	Date(NaiveDate),
	Time(NaiveTime),
}

impl Temporal {
	fn to_datetime(self) -> NaiveDateTime {
		match self {
			Self::DateTime(datetime) => datetime,
			Self::Date(date) => date.and_time(NaiveTime::default()),
			Self::Time(time) => NaiveDate::default().and_time(time),
		}
	}
}

/// Parse `text` with a chrono format, trying the richest type first.
///
/// Offsets in the format are accepted and ignored.
pub fn parse_temporal(text: &str, format: &str) -> Option<Temporal> {
	if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
		return Some(Temporal::DateTime(datetime));
	}
	if let Ok(date) = NaiveDate::parse_from_str(text, format) {
		return Some(Temporal::Date(date));
	}
	NaiveTime::parse_from_str(text, format)
		.ok()
		.map(Temporal::Time)
}

/// Whether `text` parses with `format` and formats back to itself
///
/// chrono accepts unpadded numbers for `%m`, `%d` or `%H`; bounds compare
/// lexicographically, so only the canonical spelling is valid.
fn is_canonical(text: &str, format: &str) -> bool {
	fn render(formatted: impl Display) -> Option<String> {
		let mut out = String::new();
		write!(out, "{formatted}").ok()?;
		Some(out)
	}

	// Offset-bearing formats only render from an offset-aware value
	let rendered = match DateTime::parse_from_str(text, format) {
		Ok(datetime) => render(datetime.format(format)),
		Err(_) => match parse_temporal(text, format) {
			Some(Temporal::DateTime(datetime)) => render(datetime.format(format)),
			Some(Temporal::Date(date)) => render(date.format(format)),
			Some(Temporal::Time(time)) => render(time.format(format)),
			None => None,
		},
	};
	rendered.as_deref() == Some(text)
}

fn parse_month_index(text: &str) -> Option<i64> {
	let captures = MONTH_VALUE_REGEX.captures(text)?;
	let year: i64 = captures[1].parse().ok()?;
	let month: i64 = captures[2].parse().ok()?;
	(1..=12)
		.contains(&month)
		.then_some(year * 12 + month - 1)
}

fn parse_week_start(text: &str) -> Option<NaiveDate> {
	let captures = WEEK_VALUE_REGEX.captures(text)?;
	let year: i32 = captures[1].parse().ok()?;
	let week: u32 = captures[2].parse().ok()?;
	NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
}

fn validate_date_step(
	text: &str,
	format: &str,
	base_value: &str,
	step: u32,
	unit: StepUnit,
) -> ValidationResult<()> {
	let false_format = || ValidationError::FalseFormat {
		format: format.to_string(),
	};
	let step = i64::from(step.max(1));
	let distance = match unit {
		StepUnit::Months => {
			let value = parse_month_index(text).ok_or_else(false_format)?;
			let base = parse_month_index(base_value).ok_or(ValidationError::NotStep)?;
			value - base
		}
		StepUnit::Weeks => {
			let value = parse_week_start(text).ok_or_else(false_format)?;
			let base = parse_week_start(base_value).ok_or(ValidationError::NotStep)?;
			(value - base).num_days() / 7
		}
		StepUnit::Seconds | StepUnit::Minutes | StepUnit::Days => {
			let value = parse_temporal(text, format).ok_or_else(false_format)?;
			let base = parse_temporal(base_value, format).ok_or(ValidationError::NotStep)?;
			let seconds = (value.to_datetime() - base.to_datetime()).num_seconds();
			let unit_seconds = unit.seconds().unwrap_or(1);
			if seconds % unit_seconds != 0 {
				return Err(ValidationError::NotStep);
			}
			seconds / unit_seconds
		}
	};
	if distance % step == 0 {
		Ok(())
	} else {
		Err(ValidationError::NotStep)
	}
}

/// Numeric comparison when both sides are numbers, lexicographic otherwise
fn compare(left: &str, right: &str) -> Ordering {
	match (left.trim().parse::<f64>(), right.trim().parse::<f64>()) {
		(Ok(l), Ok(r)) => l.partial_cmp(&r).unwrap_or(Ordering::Equal),
		_ => left.cmp(right),
	}
}
