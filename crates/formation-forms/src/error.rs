//! Error types raised by elements, fieldsets and the element factory

/// Errors raised while configuring or assigning values to form elements
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
	/// A value or option could not be accepted at the point of assignment
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
	/// An operation was attempted on an element in an unsuitable state
	#[error("Domain error: {0}")]
	Domain(String),
}

pub type FormResult<T> = Result<T, FormError>;

impl FormError {
	pub(crate) fn invalid(message: impl Into<String>) -> Self {
		Self::InvalidArgument(message.into())
	}
}
