//! State and behavior shared by every view helper

use crate::doctype::Doctype;
use crate::error::ViewResult;
use crate::escaper::Escaper;
use crate::view::View;
use formation_forms::Attributes;
use formation_forms::is_truthy;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// Attributes valid on every HTML element
const GLOBAL_ATTRIBUTES: &[&str] = &[
	"accesskey",
	"class",
	"contenteditable",
	"contextmenu",
	"dir",
	"draggable",
	"dropzone",
	"hidden",
	"id",
	"lang",
	"spellcheck",
	"style",
	"tabindex",
	"title",
	"translate",
	"xml:base",
	"xml:lang",
	"xml:space",
];

const DEFAULT_PREFIXES: &[&str] = &["data-", "aria-", "x-"];

/// Attributes rendered as on/off tokens: `(on, off)`; an empty token omits the attribute
fn boolean_tokens(key: &str) -> Option<(&str, &'static str)> {
	match key {
		"autocomplete" => Some(("on", "off")),
		"autofocus" | "checked" | "disabled" | "multiple" | "readonly" | "required"
		| "selected" => Some((key, "")),
		_ => None,
	}
}

/// Per-helper rendering state
///
/// A helper either stands alone, using its own doctype override and escaper,
/// or is attached to a [`View`] whose doctype and escaper it then follows.
#[derive(Debug, Clone)]
pub struct HelperCore {
	doctype: Option<Doctype>,
	escaper: Escaper,
	view: Option<View>,
	valid_tag_attributes: &'static [&'static str],
	extra_attributes: HashSet<String>,
	extra_prefixes: Vec<String>,
}

impl Default for HelperCore {
	fn default() -> Self {
		Self::new(&[])
	}
}

impl HelperCore {
	/// Create a core accepting the given tag attributes besides the global ones
	pub fn new(valid_tag_attributes: &'static [&'static str]) -> Self {
		Self {
			doctype: None,
			escaper: Escaper::default(),
			view: None,
			valid_tag_attributes,
			extra_attributes: HashSet::new(),
			extra_prefixes: DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
		}
	}

	pub fn view(&self) -> Option<&View> {
		self.view.as_ref()
	}

	pub fn set_view(&mut self, view: View) {
		self.view = Some(view);
	}

	/// Explicit doctype, else the attached view's, else `HTML4_LOOSE`
	pub fn doctype(&self) -> Doctype {
		self.doctype
			.or_else(|| self.view.as_ref().map(View::doctype))
			.unwrap_or_default()
	}

	pub fn set_doctype(&mut self, doctype: Doctype) {
		self.doctype = Some(doctype);
	}

	pub fn encoding(&self) -> String {
		match &self.view {
			Some(view) => view.encoding(),
			None => self.escaper.encoding().to_string(),
		}
	}

	pub fn set_encoding(&mut self, encoding: &str) -> ViewResult<()> {
		match &self.view {
			Some(view) => view.set_encoding(encoding),
			None => self.escaper.set_encoding(encoding),
		}
	}

	pub fn escape_html(&self, text: &str) -> String {
		match &self.view {
			Some(view) => view.escape_html(text),
			None => self.escaper.escape_html(text),
		}
	}

	pub fn escape_html_attr(&self, text: &str) -> String {
		match &self.view {
			Some(view) => view.escape_html_attr(text),
			None => self.escaper.escape_html_attr(text),
		}
	}

	/// Give `helper` this core's view, doctype override and encoding
	pub(crate) fn configure(&self, helper: &mut dyn ViewHelper) -> ViewResult<()> {
		match &self.view {
			Some(view) => helper.set_view(view.clone()),
			None => helper.set_encoding(self.escaper.encoding())?,
		}
		if let Some(doctype) = self.doctype {
			helper.set_doctype(doctype);
		}
		Ok(())
	}

	/// `" />"` for XHTML doctypes, `">"` otherwise
	pub fn closing_bracket(&self) -> &'static str {
		if self.doctype().is_xhtml() { " />" } else { ">" }
	}

	pub fn add_valid_attribute(&mut self, attribute: &str) {
		self.extra_attributes.insert(attribute.to_lowercase());
	}

	pub fn add_valid_attribute_prefix(&mut self, prefix: &str) {
		let prefix = prefix.to_lowercase();
		if !self.extra_prefixes.contains(&prefix) {
			self.extra_prefixes.push(prefix);
		}
	}

	/// Whether `key` (already lower-cased) renders on a tag accepting `valid`
	pub fn is_valid_attribute(&self, valid: &[&str], key: &str) -> bool {
		GLOBAL_ATTRIBUTES.contains(&key)
			|| (key.len() > 2 && key.starts_with("on"))
			|| valid.contains(&key)
			|| self.extra_attributes.contains(key)
			|| self.extra_prefixes.iter().any(|prefix| key.starts_with(prefix.as_str()))
	}

	/// Render attributes valid for this helper's tag
	///
	/// # Examples
	///
	/// ```
	/// use formation_forms::Attributes;
	/// use formation_view::HelperCore;
	/// use serde_json::json;
	///
	/// let core = HelperCore::new(&["name", "required"]);
	/// let mut attributes = Attributes::new();
	/// attributes.insert("name".to_string(), json!("user"));
	/// attributes.insert("required".to_string(), json!(true));
	/// attributes.insert("layout".to_string(), json!("wide"));
	///
	/// assert_eq!(
	/// 	core.create_attributes_string(&attributes),
	/// 	r#"name="user" required="required""#
	/// );
	/// ```
	pub fn create_attributes_string(&self, attributes: &Attributes) -> String {
		self.attributes_string_with(self.valid_tag_attributes, attributes)
	}

	/// Render attributes against an explicit tag attribute set
	pub fn attributes_string_with(&self, valid: &[&str], attributes: &Attributes) -> String {
		let mut normalized: IndexMap<String, &Value> = IndexMap::new();
		for (key, value) in attributes {
			normalized.insert(key.to_lowercase(), value);
		}

		let mut rendered = Vec::with_capacity(normalized.len());
		for (key, value) in normalized {
			if !self.is_valid_attribute(valid, &key) {
				debug!(attribute = %key, "dropping attribute not valid for tag");
				continue;
			}
			let text = match boolean_tokens(&key) {
				Some((on, off)) => {
					let token = match value.as_str() {
						Some(text) if text == on || text == off => text.to_string(),
						_ if is_truthy(value) => on.to_string(),
						_ => off.to_string(),
					};
					if token.is_empty() {
						continue;
					}
					token
				}
				None => attribute_text(value),
			};
			rendered.push(format!("{key}=\"{}\"", self.escape_html_attr(&text)));
		}
		rendered.join(" ")
	}
}

/// `existing` class list with `class` appended
pub(crate) fn append_class(existing: Option<&Value>, class: &str) -> String {
	match existing.and_then(Value::as_str) {
		Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
		_ => class.to_string(),
	}
}

fn attribute_text(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::Bool(flag) => flag.to_string(),
		Value::Number(number) => number.to_string(),
		Value::String(text) => text.clone(),
		Value::Array(items) => items
			.iter()
			.map(attribute_text)
			.collect::<Vec<_>>()
			.join(" "),
		Value::Object(_) => value.to_string(),
	}
}

/// Common interface of view helpers
///
/// Helpers composed of other helpers return them from
/// [`ViewHelper::inner_helpers_mut`] so view, doctype and encoding changes
/// reach the whole tree.
pub trait ViewHelper {
	fn core(&self) -> &HelperCore;

	fn core_mut(&mut self) -> &mut HelperCore;

	fn inner_helpers_mut(&mut self) -> Vec<&mut dyn ViewHelper> {
		Vec::new()
	}

	fn view(&self) -> Option<&View> {
		self.core().view()
	}

	fn set_view(&mut self, view: View) {
		for helper in self.inner_helpers_mut() {
			helper.set_view(view.clone());
		}
		self.core_mut().set_view(view);
	}

	fn doctype(&self) -> Doctype {
		self.core().doctype()
	}

	fn set_doctype(&mut self, doctype: Doctype) {
		for helper in self.inner_helpers_mut() {
			helper.set_doctype(doctype);
		}
		self.core_mut().set_doctype(doctype);
	}

	fn encoding(&self) -> String {
		self.core().encoding()
	}

	fn set_encoding(&mut self, encoding: &str) -> ViewResult<()> {
		for helper in self.inner_helpers_mut() {
			helper.set_encoding(encoding)?;
		}
		self.core_mut().set_encoding(encoding)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn attributes(pairs: &[(&str, Value)]) -> Attributes {
		pairs
			.iter()
			.map(|(key, value)| (key.to_string(), value.clone()))
			.collect()
	}

	#[rstest]
	#[case("required", json!(true), r#"required="required""#)]
	#[case("required", json!("required"), r#"required="required""#)]
	#[case("required", json!(false), "")]
	#[case("required", json!(""), "")]
	#[case("autocomplete", json!("off"), r#"autocomplete="off""#)]
	#[case("autocomplete", json!(false), r#"autocomplete="off""#)]
	#[case("autocomplete", json!(1), r#"autocomplete="on""#)]
	fn test_boolean_attributes(#[case] key: &str, #[case] value: Value, #[case] expected: &str) {
		let core = HelperCore::new(&["required", "autocomplete"]);
		let rendered = core.create_attributes_string(&attributes(&[(key, value)]));
		assert_eq!(rendered, expected);
	}

	#[test]
	fn test_invalid_attributes_dropped() {
		let core = HelperCore::new(&["name"]);
		let rendered = core.create_attributes_string(&attributes(&[
			("name", json!("foo")),
			("label_position", json!("append")),
			("data-role", json!("picker")),
			("onclick", json!("go()")),
			("class", json!(["wide", "dark"])),
		]));

		assert_eq!(
			rendered,
			r#"name="foo" data-role="picker" onclick="go&#x28;&#x29;" class="wide&#x20;dark""#
		);
	}

	#[test]
	fn test_keys_lowercased_later_wins() {
		let core = HelperCore::new(&["name"]);
		let rendered = core.create_attributes_string(&attributes(&[
			("NAME", json!("first")),
			("name", json!("second")),
		]));
		assert_eq!(rendered, r#"name="second""#);
	}

	#[test]
	fn test_added_attributes_and_prefixes() {
		let mut core = HelperCore::new(&[]);
		core.add_valid_attribute("Foo");
		core.add_valid_attribute_prefix("ng-");
		let rendered = core.create_attributes_string(&attributes(&[
			("foo", json!("x")),
			("ng-model", json!("y")),
			("bar", json!("z")),
		]));
		assert_eq!(rendered, r#"foo="x" ng-model="y""#);
	}

	#[rstest]
	#[case(Doctype::Html4Loose, ">")]
	#[case(Doctype::Html5, ">")]
	#[case(Doctype::Xhtml1Strict, " />")]
	#[case(Doctype::Xhtml5, " />")]
	fn test_closing_bracket(#[case] doctype: Doctype, #[case] expected: &str) {
		let mut core = HelperCore::new(&[]);
		core.set_doctype(doctype);
		assert_eq!(core.closing_bracket(), expected);
	}

	#[test]
	fn test_explicit_doctype_wins_over_view() {
		let view = View::new();
		view.set_doctype(Doctype::Html5);
		let mut core = HelperCore::new(&[]);
		core.set_view(view);
		assert_eq!(core.doctype(), Doctype::Html5);

		core.set_doctype(Doctype::Xhtml11);
		assert_eq!(core.doctype(), Doctype::Xhtml11);
	}
}
