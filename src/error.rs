use crate::Element;
use thiserror::Error;

/// Errors raised by set operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
	/// An operand element cannot be interpreted as an integer.
	#[error("{}", invalid_type_message(.value, .type_name, .container))]
	InvalidElement {
		/// Debug representation of the offending value.
		value: String,
		type_name: &'static str,
		/// Name of the set type that rejected the value.
		container: &'static str,
	},

	/// `remove` of an absent value, or `pop` on an empty set (`value` is `None`).
	#[error("{}", missing_message(.value))]
	MissingElement { value: Option<i64> },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
	pub fn invalid_element(value: &dyn Element, container: &'static str) -> Self {
		Self::InvalidElement {
			value: format!("{value:?}"),
			type_name: value.type_name(),
			container,
		}
	}

	pub fn missing(value: i64) -> Self {
		Self::MissingElement { value: Some(value) }
	}

	pub fn empty() -> Self {
		Self::MissingElement { value: None }
	}
}

/// Formats the message reported when `value` cannot be stored in a
/// `container`.
pub fn format_invalid_type(value: &dyn Element, container: &str) -> String {
	invalid_type_message(&format!("{value:?}"), value.type_name(), container)
}

fn invalid_type_message(value: &str, type_name: &str, container: &str) -> String {
	format!("unsupported value {value} of type `{type_name}` for a `{container}`, must be an integer")
}

fn missing_message(value: &Option<i64>) -> String {
	match value {
		Some(value) => format!("{value} is not a member"),
		None => "pop from an empty set".to_string(),
	}
}
