//! Behavior shared by every view helper: encoding and doctype resolution

use formation_view::{
	Doctype, FormCollection, FormDateSelect, FormDateTimeSelect, FormElementErrors,
	FormElementHelper, FormInput, FormLabel, FormMonthSelect, FormRow, FormSelect, View,
	ViewHelper,
};
use rstest::rstest;

/// One detached instance of every helper
fn helpers() -> Vec<(&'static str, Box<dyn ViewHelper>)> {
	let mut helpers: Vec<(&'static str, Box<dyn ViewHelper>)> = Vec::new();
	helpers.push(("FormInput::date", Box::new(FormInput::date())));
	helpers.push(("FormInput", Box::new(FormInput::new())));
	helpers.push(("FormSelect", Box::new(FormSelect::new())));
	helpers.push(("FormDateSelect", Box::new(FormDateSelect::new())));
	helpers.push(("FormMonthSelect", Box::new(FormMonthSelect::new())));
	helpers.push(("FormDateTimeSelect", Box::new(FormDateTimeSelect::new())));
	helpers.push(("FormLabel", Box::new(FormLabel::new())));
	helpers.push(("FormElementErrors", Box::new(FormElementErrors::new())));
	helpers.push(("FormRow", Box::new(FormRow::new())));
	helpers.push(("FormElementHelper", Box::new(FormElementHelper::new())));
	helpers.push(("FormCollection", Box::new(FormCollection::new())));
	helpers
}

/// Every helper attached to its own fresh view
fn attached() -> Vec<(&'static str, Box<dyn ViewHelper>, View)> {
	helpers()
		.into_iter()
		.map(|(name, mut helper)| {
			let view = View::new();
			helper.set_view(view.clone());
			(name, helper, view)
		})
		.collect()
}

#[rstest]
fn test_uses_utf8_by_default() {
	for (name, helper, _) in attached() {
		assert_eq!(helper.encoding(), "UTF-8", "{name}");
	}
	for (name, helper) in helpers() {
		assert_eq!(helper.encoding(), "UTF-8", "{name}");
	}
}

#[rstest]
fn test_can_inject_encoding() {
	for (name, mut helper, _) in attached() {
		helper.set_encoding("iso-8859-1").unwrap();

		assert_eq!(helper.encoding(), "iso-8859-1", "{name}");
	}
}

#[rstest]
fn test_injecting_encoding_proxies_to_view_escaper() {
	for (name, mut helper, view) in attached() {
		// Act
		helper.set_encoding("iso-8859-1").unwrap();

		// Assert
		assert_eq!(view.escaper().encoding(), "iso-8859-1", "{name}");
	}
}

#[rstest]
fn test_unknown_encoding_rejected() {
	for (name, mut helper) in helpers() {
		assert!(helper.set_encoding("utf-7").is_err(), "{name}");
		assert_eq!(helper.encoding(), "UTF-8", "{name}");
	}
}

#[rstest]
fn test_assumes_html4_loose_by_default() {
	for (name, helper) in helpers() {
		assert_eq!(helper.doctype(), Doctype::Html4Loose, "{name}");
	}
}

#[rstest]
#[case(Doctype::Html5)]
#[case(Doctype::Xhtml1Strict)]
fn test_can_inject_doctype(#[case] doctype: Doctype) {
	for (name, mut helper, _) in attached() {
		helper.set_doctype(doctype);

		assert_eq!(helper.doctype(), doctype, "{name}");
	}
}

#[rstest]
fn test_doctype_taken_from_view() {
	for (name, helper, view) in attached() {
		view.set_doctype(Doctype::Xhtml1Strict);

		assert_eq!(helper.doctype(), Doctype::Xhtml1Strict, "{name}");
	}
}
