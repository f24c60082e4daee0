//! Strongly typed identifiers used to key sessions and address provider users.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

const IDENTIFIER_MAX_LEN: usize = 128;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier.
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier.
		kind: &'static str,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier.
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
}

/// Key under which the relay tracks one access token.
///
/// Callers pick a session through the `x-session-id` header; requests without one share
/// [`SessionId::DEFAULT`], which keeps the single-token demo behavior intact.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);
impl SessionId {
	/// Session used when the caller does not name one.
	pub const DEFAULT: &'static str = "default";

	/// Creates a new identifier after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
		let view = value.as_ref();

		validate_view("Session", view)?;

		Ok(Self(view.to_owned()))
	}
}
impl Default for SessionId {
	fn default() -> Self {
		Self(Self::DEFAULT.to_owned())
	}
}
impl Deref for SessionId {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for SessionId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for SessionId {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<SessionId> for String {
	fn from(value: SessionId) -> Self {
		value.0
	}
}
impl TryFrom<String> for SessionId {
	type Error = IdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view("Session", &value)?;

		Ok(Self(value))
	}
}
impl FromStr for SessionId {
	type Err = IdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl Debug for SessionId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Session({})", self.0)
	}
}
impl Display for SessionId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Provider-facing `client_user_id`.
///
/// The value is forwarded verbatim; the provider owns its validation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);
impl UserId {
	/// Identifier used when the caller omits `userId`.
	pub const DEMO: &'static str = "demo-user-123";

	/// Wraps a caller-supplied identifier.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}
}
impl Default for UserId {
	fn default() -> Self {
		Self(Self::DEMO.to_owned())
	}
}
impl AsRef<str> for UserId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Display for UserId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

fn validate_view(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}
