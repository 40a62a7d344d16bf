//! Dispatch to the helper matching an element's kind

use super::form_collection::FormCollection;
use super::form_date_select::{FormDateSelect, FormDateTimeSelect, FormMonthSelect};
use super::form_input::FormInput;
use super::form_select::FormSelect;
use crate::error::ViewResult;
use crate::helper::{HelperCore, ViewHelper};
use formation_forms::{ElementKind, FormElement};

/// Renders any element with the helper for its [`ElementKind`]
///
/// # Examples
///
/// ```
/// use formation_forms::{Element, Select};
/// use formation_view::FormElementHelper;
///
/// let helper = FormElementHelper::new();
///
/// assert_eq!(
///     helper.render(&Element::with_type("q", "search")).unwrap(),
///     r#"<input name="q" type="search" value="">"#
/// );
/// assert!(helper.render(&Select::new("color")).unwrap().starts_with("<select"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormElementHelper {
	core: HelperCore,
	input: FormInput,
	select: FormSelect,
	date_select: FormDateSelect,
	month_select: FormMonthSelect,
	datetime_select: FormDateTimeSelect,
}

impl FormElementHelper {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn date_select_mut(&mut self) -> &mut FormDateSelect {
		&mut self.date_select
	}

	pub fn render(&self, element: &dyn FormElement) -> ViewResult<String> {
		match element.kind() {
			ElementKind::Input(_) => self.input.render(element),
			ElementKind::Select => self.select.render(element),
			ElementKind::DateSelect => self.date_select.render(element),
			ElementKind::MonthSelect => self.month_select.render(element),
			ElementKind::DateTimeSelect => self.datetime_select.render(element),
			ElementKind::Fieldset => {
				let mut collection = FormCollection::new();
				self.core.configure(&mut collection)?;
				collection.render(element)
			}
		}
	}
}

impl ViewHelper for FormElementHelper {
	fn core(&self) -> &HelperCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut HelperCore {
		&mut self.core
	}

	fn inner_helpers_mut(&mut self) -> Vec<&mut dyn ViewHelper> {
		vec![
			&mut self.input,
			&mut self.select,
			&mut self.date_select,
			&mut self.month_select,
			&mut self.datetime_select,
		]
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::doctype::Doctype;
	use formation_forms::{DateInput, DateSelect, Element, Fieldset};

	#[test]
	fn test_dispatch_by_kind() {
		let helper = FormElementHelper::new();

		let date = helper.render(&DateInput::date("when")).unwrap();
		let selects = helper.render(&DateSelect::new("born")).unwrap();

		assert_eq!(date, r#"<input name="when" type="date" value="">"#);
		assert_eq!(selects.matches("<select").count(), 3);
	}

	#[test]
	fn test_doctype_reaches_inner_helpers() {
		let mut helper = FormElementHelper::new();
		helper.set_doctype(Doctype::Xhtml1Strict);

		let markup = helper.render(&Element::new("plain")).unwrap();

		assert!(markup.ends_with(" />"));
	}

	#[test]
	fn test_fieldset_rendered_as_collection() {
		let mut fieldset = Fieldset::new("address");
		fieldset.add(Box::new(Element::new("street"))).unwrap();

		let markup = FormElementHelper::new().render(&fieldset).unwrap();

		assert_eq!(
			markup,
			r#"<fieldset><input name="street" type="text" value=""></fieldset>"#
		);
	}
}
