//! Loading view settings from TOML files

use formation_forms::Element;
use formation_view::{Doctype, FormInput, View, ViewError, ViewHelper, ViewSettings};
use rstest::rstest;
use std::io::Write;
use tempfile::NamedTempFile;

#[rstest]
fn test_settings_file_configures_view() {
	// Arrange
	let mut file = NamedTempFile::new().unwrap();
	writeln!(
		file,
		r#"
doctype = "XHTML1_STRICT"
encoding = "iso-8859-15"
date_pattern = "dd.MM.y"
"#
	)
	.unwrap();

	// Act
	let settings = ViewSettings::from_file(file.path()).unwrap();
	let view = View::from_settings(&settings).unwrap();
	let mut helper = FormInput::text();
	helper.set_view(view.clone());

	// Assert
	assert_eq!(settings.time_pattern, "HH:mm:ss");
	assert_eq!(view.doctype(), Doctype::Xhtml1Strict);
	assert_eq!(helper.encoding(), "iso-8859-15");
	assert_eq!(view.date_pattern(), "dd.MM.y");
	assert_eq!(
		helper.render(&Element::new("city")).unwrap(),
		r#"<input name="city" type="text" value="" />"#
	);
}

#[rstest]
fn test_missing_file_reports_path() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("view.toml");

	let error = ViewSettings::from_file(&path).unwrap_err();

	assert!(matches!(&error, ViewError::Io { path: reported, .. } if reported == &path));
	assert!(error.to_string().contains("view.toml"));
}

#[rstest]
#[case("doctype = 5")]
#[case("doctype = \"HTML6\"")]
#[case("not toml at all")]
fn test_malformed_settings(#[case] content: &str) {
	let mut file = NamedTempFile::new().unwrap();
	write!(file, "{content}").unwrap();

	let result = ViewSettings::from_file(file.path());

	assert!(matches!(result, Err(ViewError::Settings(_))));
}
