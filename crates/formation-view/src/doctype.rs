//! Document types

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Document type markup is rendered for
///
/// Parsed from and displayed as its constant name (`HTML5`, `XHTML1_STRICT`, ...).
///
/// # Examples
///
/// ```
/// use formation_view::Doctype;
///
/// let doctype: Doctype = "XHTML1_STRICT".parse().unwrap();
/// assert!(doctype.is_xhtml());
/// assert_eq!(Doctype::default(), Doctype::Html4Loose);
/// assert_eq!(Doctype::Html5.declaration(), "<!DOCTYPE html>");
/// ```
#[derive(
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	Hash,
	Default,
	EnumString,
	Display,
	AsRefStr,
	EnumIter,
	Serialize,
	Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Doctype {
	#[strum(serialize = "XHTML11")]
	#[serde(rename = "XHTML11")]
	Xhtml11,
	#[strum(serialize = "XHTML1_STRICT")]
	#[serde(rename = "XHTML1_STRICT")]
	Xhtml1Strict,
	#[strum(serialize = "XHTML1_TRANSITIONAL")]
	#[serde(rename = "XHTML1_TRANSITIONAL")]
	Xhtml1Transitional,
	#[strum(serialize = "XHTML1_FRAMESET")]
	#[serde(rename = "XHTML1_FRAMESET")]
	Xhtml1Frameset,
	#[strum(serialize = "XHTML1_RDFA")]
	#[serde(rename = "XHTML1_RDFA")]
	Xhtml1Rdfa,
	#[strum(serialize = "XHTML1_RDFA11")]
	#[serde(rename = "XHTML1_RDFA11")]
	Xhtml1Rdfa11,
	#[strum(serialize = "XHTML_BASIC1")]
	#[serde(rename = "XHTML_BASIC1")]
	XhtmlBasic1,
	#[strum(serialize = "XHTML5")]
	#[serde(rename = "XHTML5")]
	Xhtml5,
	#[strum(serialize = "HTML4_STRICT")]
	#[serde(rename = "HTML4_STRICT")]
	Html4Strict,
	#[default]
	#[strum(serialize = "HTML4_LOOSE")]
	#[serde(rename = "HTML4_LOOSE")]
	Html4Loose,
	#[strum(serialize = "HTML4_FRAMESET")]
	#[serde(rename = "HTML4_FRAMESET")]
	Html4Frameset,
	#[strum(serialize = "HTML5")]
	#[serde(rename = "HTML5")]
	Html5,
}

impl Doctype {
	pub fn is_xhtml(self) -> bool {
		self.as_ref().starts_with("XHTML")
	}

	pub fn is_html5(self) -> bool {
		matches!(self, Self::Html5 | Self::Xhtml5)
	}

	/// HTML5 documents and the XHTML+RDFa types accept RDFa attributes
	pub fn is_rdfa(self) -> bool {
		self.is_html5() || matches!(self, Self::Xhtml1Rdfa | Self::Xhtml1Rdfa11)
	}

	/// The `<!DOCTYPE ...>` declaration
	pub fn declaration(self) -> &'static str {
		match self {
			Self::Xhtml11 => {
				r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.1//EN" "http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd">"#
			}
			Self::Xhtml1Strict => {
				r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">"#
			}
			Self::Xhtml1Transitional => {
				r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">"#
			}
			Self::Xhtml1Frameset => {
				r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Frameset//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-frameset.dtd">"#
			}
			Self::Xhtml1Rdfa => {
				r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML+RDFa 1.0//EN" "http://www.w3.org/MarkUp/DTD/xhtml-rdfa-1.dtd">"#
			}
			Self::Xhtml1Rdfa11 => {
				r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML+RDFa 1.1//EN" "http://www.w3.org/MarkUp/DTD/xhtml-rdfa-2.dtd">"#
			}
			Self::XhtmlBasic1 => {
				r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML Basic 1.0//EN" "http://www.w3.org/TR/xhtml-basic/xhtml-basic10.dtd">"#
			}
			Self::Html4Strict => {
				r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#
			}
			Self::Html4Loose => {
				r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN" "http://www.w3.org/TR/html4/loose.dtd">"#
			}
			Self::Html4Frameset => {
				r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Frameset//EN" "http://www.w3.org/TR/html4/frameset.dtd">"#
			}
			Self::Html5 | Self::Xhtml5 => "<!DOCTYPE html>",
		}
	}
}
