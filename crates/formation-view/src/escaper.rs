//! Context-specific escaping of text for HTML bodies and attribute values

use crate::error::{ViewError, ViewResult};

const SUPPORTED_ENCODINGS: &[&str] = &[
	"iso-8859-1",
	"iso8859-1",
	"iso-8859-5",
	"iso8859-5",
	"iso-8859-15",
	"iso8859-15",
	"utf-8",
	"cp866",
	"ibm866",
	"866",
	"cp1251",
	"windows-1251",
	"win-1251",
	"1251",
	"cp1252",
	"windows-1252",
	"1252",
	"koi8-r",
	"koi8-ru",
	"koi8r",
	"big5",
	"950",
	"gb2312",
	"936",
	"big5-hkscs",
	"shift_jis",
	"sjis",
	"sjis-win",
	"cp932",
	"932",
	"euc-jp",
	"eucjp",
	"eucjp-win",
	"macroman",
];

/// Escapes text for a declared character encoding
///
/// Output is always a Rust string; the encoding is carried so markup can
/// declare it.
///
/// # Examples
///
/// ```
/// use formation_view::Escaper;
///
/// let escaper = Escaper::default();
/// assert_eq!(escaper.encoding(), "UTF-8");
/// assert_eq!(escaper.escape_html("<b>Tom & Jerry</b>"), "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;");
/// assert_eq!(escaper.escape_html_attr("a b"), "a&#x20;b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Escaper {
	encoding: String,
}

impl Default for Escaper {
	fn default() -> Self {
		Self {
			encoding: "UTF-8".to_string(),
		}
	}
}

impl Escaper {
	pub fn new(encoding: &str) -> ViewResult<Self> {
		let mut escaper = Self::default();
		escaper.set_encoding(encoding)?;
		Ok(escaper)
	}

	pub fn encoding(&self) -> &str {
		&self.encoding
	}

	/// Change the encoding; names are matched case-insensitively and stored as given
	pub fn set_encoding(&mut self, encoding: &str) -> ViewResult<()> {
		if !is_supported_encoding(encoding) {
			return Err(ViewError::UnsupportedEncoding(encoding.to_string()));
		}
		self.encoding = encoding.to_string();
		Ok(())
	}

	/// Escape text placed between tags
	pub fn escape_html(&self, text: &str) -> String {
		let mut result = String::with_capacity(text.len() + 10);
		for ch in text.chars() {
			match ch {
				'&' => result.push_str("&amp;"),
				'<' => result.push_str("&lt;"),
				'>' => result.push_str("&gt;"),
				'"' => result.push_str("&quot;"),
				'\'' => result.push_str("&#039;"),
				_ => result.push(ch),
			}
		}
		result
	}

	/// Escape an attribute value; everything except ASCII alphanumerics and
	/// `,` `.` `-` `_` becomes an entity
	pub fn escape_html_attr(&self, text: &str) -> String {
		if text.is_empty() || text.bytes().all(|b| b.is_ascii_digit()) {
			return text.to_string();
		}
		let mut result = String::with_capacity(text.len() * 2);
		for ch in text.chars() {
			if ch.is_ascii_alphanumeric() || matches!(ch, ',' | '.' | '-' | '_') {
				result.push(ch);
				continue;
			}
			let code = u32::from(ch);
			match ch {
				'"' => result.push_str("&quot;"),
				'&' => result.push_str("&amp;"),
				'<' => result.push_str("&lt;"),
				'>' => result.push_str("&gt;"),
				_ if is_undefined_in_html(ch) => result.push_str("&#xFFFD;"),
				_ if code <= 0xFF => result.push_str(&format!("&#x{code:02X};")),
				_ => result.push_str(&format!("&#x{code:04X};")),
			}
		}
		result
	}
}

/// Control characters with no HTML representation
fn is_undefined_in_html(ch: char) -> bool {
	(ch.is_ascii_control() && !matches!(ch, '\t' | '\n' | '\r')) || ('\u{7f}'..='\u{9f}').contains(&ch)
}

pub fn is_supported_encoding(encoding: &str) -> bool {
	SUPPORTED_ENCODINGS
		.iter()
		.any(|supported| supported.eq_ignore_ascii_case(encoding))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("UTF-8")]
	#[case("iso-8859-1")]
	#[case("ISO-8859-15")]
	#[case("Shift_JIS")]
	fn test_supported_encodings(#[case] encoding: &str) {
		let escaper = Escaper::new(encoding).unwrap();
		assert_eq!(escaper.encoding(), encoding);
	}

	#[test]
	fn test_unsupported_encoding() {
		let mut escaper = Escaper::default();
		let result = escaper.set_encoding("ebcdic");

		assert!(matches!(result, Err(ViewError::UnsupportedEncoding(name)) if name == "ebcdic"));
		assert_eq!(escaper.encoding(), "UTF-8");
	}

	#[test]
	fn test_escape_html() {
		let escaper = Escaper::default();
		assert_eq!(
			escaper.escape_html(r#"<a href="x">'quoted'</a>"#),
			"&lt;a href=&quot;x&quot;&gt;&#039;quoted&#039;&lt;/a&gt;"
		);
		assert_eq!(escaper.escape_html("plain"), "plain");
	}

	#[rstest]
	#[case("", "")]
	#[case("12345", "12345")]
	#[case("foo-bar_baz.qux,1", "foo-bar_baz.qux,1")]
	#[case("a b", "a&#x20;b")]
	#[case("x:y", "x&#x3A;y")]
	#[case(r#""<&>""#, "&quot;&lt;&amp;&gt;&quot;")]
	#[case("\u{1}", "&#xFFFD;")]
	#[case("\u{85}", "&#xFFFD;")]
	#[case("\t", "&#x09;")]
	#[case("é", "&#xE9;")]
	#[case("€", "&#x20AC;")]
	fn test_escape_html_attr(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(Escaper::default().escape_html_attr(input), expected);
	}
}
