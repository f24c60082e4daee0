//! Redacted strings for the client secret and per-session access tokens.
//!
//! Both values pass through `tracing` fields and `Debug` output of configs, stores, and provider
//! requests. [`TokenSecret`] prints `<redacted>` in either formatter; the raw value is only read
//! when building the `PLAID-SECRET` header, the outbound request body, or the exchange response.

// self
use crate::_prelude::*;

const REDACTED: &str = "<redacted>";

/// Client secret or access token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps `value`.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Raw value for the wire. Never log it.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl From<String> for TokenSecret {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&REDACTED).finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(REDACTED)
	}
}
