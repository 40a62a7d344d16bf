//! Shared view context

use crate::doctype::Doctype;
use crate::error::ViewResult;
use crate::escaper::Escaper;
use crate::settings::ViewSettings;
use parking_lot::RwLock;
use std::sync::Arc;

pub const DEFAULT_DATE_PATTERN: &str = "MMMM d, y";
pub const DEFAULT_TIME_PATTERN: &str = "HH:mm:ss";

#[derive(Debug)]
struct ViewState {
	doctype: Doctype,
	escaper: Escaper,
	date_pattern: String,
	time_pattern: String,
}

impl Default for ViewState {
	fn default() -> Self {
		Self {
			doctype: Doctype::default(),
			escaper: Escaper::default(),
			date_pattern: DEFAULT_DATE_PATTERN.to_string(),
			time_pattern: DEFAULT_TIME_PATTERN.to_string(),
		}
	}
}

/// Document-wide rendering context shared by the helpers attached to it
///
/// Clones share state: a doctype or encoding set through one handle is seen
/// by every helper holding another.
///
/// # Examples
///
/// ```
/// use formation_view::{Doctype, View};
///
/// let view = View::new();
/// let handle = view.clone();
/// handle.set_doctype(Doctype::Html5);
///
/// assert_eq!(view.doctype(), Doctype::Html5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct View {
	state: Arc<RwLock<ViewState>>,
}

impl View {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a view from loaded settings
	pub fn from_settings(settings: &ViewSettings) -> ViewResult<Self> {
		let state = ViewState {
			doctype: settings.doctype,
			escaper: Escaper::new(&settings.encoding)?,
			date_pattern: settings.date_pattern.clone(),
			time_pattern: settings.time_pattern.clone(),
		};
		Ok(Self {
			state: Arc::new(RwLock::new(state)),
		})
	}

	pub fn doctype(&self) -> Doctype {
		self.state.read().doctype
	}

	pub fn set_doctype(&self, doctype: Doctype) {
		self.state.write().doctype = doctype;
	}

	pub fn encoding(&self) -> String {
		self.state.read().escaper.encoding().to_string()
	}

	pub fn set_encoding(&self, encoding: &str) -> ViewResult<()> {
		self.state.write().escaper.set_encoding(encoding)
	}

	/// Snapshot of the escaper
	pub fn escaper(&self) -> Escaper {
		self.state.read().escaper.clone()
	}

	pub fn escape_html(&self, text: &str) -> String {
		self.state.read().escaper.escape_html(text)
	}

	pub fn escape_html_attr(&self, text: &str) -> String {
		self.state.read().escaper.escape_html_attr(text)
	}

	/// Default pattern of the date select helpers
	pub fn date_pattern(&self) -> String {
		self.state.read().date_pattern.clone()
	}

	pub fn set_date_pattern(&self, pattern: &str) {
		self.state.write().date_pattern = pattern.to_string();
	}

	/// Default time pattern of the date-time select helper
	pub fn time_pattern(&self) -> String {
		self.state.read().time_pattern.clone()
	}

	pub fn set_time_pattern(&self, pattern: &str) {
		self.state.write().time_pattern = pattern.to_string();
	}
}
