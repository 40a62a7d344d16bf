//! Month entered through year and month selects

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
use serde_json::Value;
use std::any::Any;

/// Composite of `<name>[year]` and `<name>[month]` selects
#[derive(Debug, Clone)]
pub struct MonthSelect {
	element: Element,
	year: Select,
	month: Select,
	settings: YearSettings,
}

impl MonthSelect {
	pub fn new(name: impl Into<String>) -> Self {
		let element = Element::new(name);
		let base = element.name().map(str::to_string);
		let mut select = Self {
			element,
			year: Select::new(Part::Year.select_name(base.as_deref())),
			month: Part::Month.select(base.as_deref()),
			settings: YearSettings::default(),
		};
		select.refresh_years();
		select
	}
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
	/// Set the year and month of `date`
	pub fn set_month(&mut self, date: NaiveDate) {
		set_part(&mut self.year, Some(Part::Year.format(date.year().unsigned_abs())));
		set_part(&mut self.month, Some(Part::Month.format(date.month())));
	}
	fn refresh_years(&mut self) {
		let choices = self.settings.year_choices();
		self.year = self.year.clone().with_choices(choices);
	}
}

/// `YYYY-MM` on top of the formats shared with the other composites
fn parse_month(text: &str) -> Option<NaiveDate> {
	parse_datetime(text)
		.map(|datetime| datetime.date())
		.or_else(|| NaiveDate::parse_from_str(&format!("{}-01", text.trim()), "%Y-%m-%d").ok())
}

impl FormElement for MonthSelect {
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
		ElementKind::MonthSelect
	}

	fn set_name(&mut self, name: &str) {
		self.element
			.attributes
			.insert("name".to_string(), Value::String(name.to_string()));
		self.year.set_name(&Part::Year.select_name(Some(name)));
		self.month.set_name(&Part::Month.select_name(Some(name)));
	}

	fn set_option(&mut self, key: &str, value: Value) -> FormResult<()> {
		if self.settings.apply(key, &value)? {
			match key {
				"min_year" | "max_year" => self.refresh_years(),
				"create_empty_option" => {
					set_empty_option(&mut self.year, self.settings.create_empty_option);
					set_empty_option(&mut self.month, self.settings.create_empty_option);
				}
				_ => {}
			}
		}
		match key {
			"year_attributes" => apply_part_attributes(&mut self.year, key, &value)?,
			"month_attributes" => apply_part_attributes(&mut self.month, key, &value)?,
			_ => {}
		}
		self.element.apply_option(key, value)
	}

	fn value(&self) -> Value {
		match (part_value(&self.year), part_value(&self.month)) {
			(Some(year), Some(month)) => Value::String(format!("{year}-{month}")),
			_ => Value::Null,
		}
	}

	fn set_value(&mut self, value: Value) -> FormResult<()> {
		match value {
			Value::String(text) => {
				let date = parse_month(&text).ok_or_else(unparsable_value)?;
				self.set_month(date);
			}
			Value::Null if self.settings.create_empty_option => {
				set_part(&mut self.year, None);
				set_part(&mut self.month, None);
			}
			Value::Null => self.set_month((self.settings.clock)().date()),
			Value::Object(parts) => {
				let year = Part::Year.normalize(parts.get("year"))?;
				let month = Part::Month.normalize(parts.get("month"))?;
				set_part(&mut self.year, year);
				set_part(&mut self.month, month);
			}
			_ => return Err(unparsable_value()),
		}
		Ok(())
	}

	fn input_specification(&self) -> FormResult<Option<InputSpecification>> {
		Ok(Some(
			InputSpecification::new(self.name().unwrap_or_default())
				.with_required(false)
				.with_filter(Filter::ComposeMonth)
				.with_validator(Validator::Regex {
					pattern: r"^[0-9]{4}\-(0?[1-9]|1[012])$".to_string(),
				}),
		))
	}
}
