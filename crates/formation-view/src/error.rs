//! Error types raised while rendering and configuring views

use formation_forms::FormError;
use std::path::PathBuf;

/// Errors raised by view helpers, the escaper and view settings
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
	/// The element cannot be rendered in its current state
	#[error("Domain error: {0}")]
	Domain(String),
	/// The escaper does not know the requested character encoding
	#[error("Unsupported encoding: {0}")]
	UnsupportedEncoding(String),
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
	/// View settings could not be parsed
	#[error("Settings error: {0}")]
	Settings(String),
	/// View settings file could not be read
	#[error("Failed to read {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error(transparent)]
	Form(#[from] FormError),
}

pub type ViewResult<T> = Result<T, ViewError>;
