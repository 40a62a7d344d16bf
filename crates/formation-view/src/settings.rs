//! View settings loaded from TOML
//!
//! ```toml
//! doctype = "HTML5"
//! encoding = "UTF-8"
//! date_pattern = "MMMM d, y"
//! time_pattern = "HH:mm:ss"
//! ```

use crate::doctype::Doctype;
use crate::error::{ViewError, ViewResult};
use crate::escaper::is_supported_encoding;
use crate::view::{DEFAULT_DATE_PATTERN, DEFAULT_TIME_PATTERN};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rendering defaults applied to a [`View`](crate::View)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
	/// Doctype constant name
	pub doctype: Doctype,
	pub encoding: String,
	/// Default pattern of the date select helpers
	pub date_pattern: String,
	/// Default time pattern of the date-time select helper
	pub time_pattern: String,
}

impl Default for ViewSettings {
	fn default() -> Self {
		Self {
			doctype: Doctype::default(),
			encoding: "UTF-8".to_string(),
			date_pattern: DEFAULT_DATE_PATTERN.to_string(),
			time_pattern: DEFAULT_TIME_PATTERN.to_string(),
		}
	}
}

impl ViewSettings {
	/// Load settings from a TOML file.
	///
	/// # Errors
	///
	/// Returns error if the file cannot be read or parsed.
	pub fn from_file(path: impl AsRef<Path>) -> ViewResult<Self> {
		let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ViewError::Io {
			path: path.as_ref().to_path_buf(),
			source: e,
		})?;

		Self::from_toml_str(&content)
	}

	/// Parse settings from a TOML string; unknown doctypes and encodings are rejected
	pub fn from_toml_str(content: &str) -> ViewResult<Self> {
		let settings: Self =
			toml::from_str(content).map_err(|e| ViewError::Settings(e.to_string()))?;
		if !is_supported_encoding(&settings.encoding) {
			return Err(ViewError::UnsupportedEncoding(settings.encoding));
		}
		Ok(settings)
	}
}
