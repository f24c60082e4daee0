//! Relay-level error types shared across the provider client, stores, and the HTTP boundary.

// self
use crate::{
	_prelude::*,
	auth::IdentifierError,
	provider::{PlaidErrorBody, UnknownEnvironment},
	store::StoreError,
};

/// Relay-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical relay error propagated from operations to the HTTP boundary.
///
/// Precondition variants are detected locally and never reach the provider; everything else
/// collapses to the failing operation's generic 500 code at the boundary.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Transactions were requested before any successful exchange for the session.
	#[error("No access token has been exchanged for session `{session}`.")]
	NoAccessToken {
		/// Session that has no token yet.
		session: crate::auth::SessionId,
	},
	/// The caller-supplied session identifier is malformed.
	#[error("Session identifier is invalid.")]
	InvalidSession(#[from] IdentifierError),

	/// The request body could not be read or decoded for the route.
	#[error("Request body could not be decoded.")]
	InvalidBody {
		/// Read or JSON decoding failure.
		#[source]
		source: BoxError,
	},

	/// Any failure raised while talking to the provider.
	#[error(transparent)]
	Upstream(#[from] ProviderError),
	/// Session store failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		StoreError,
	),
	/// The trailing transaction window fell outside the supported calendar range.
	#[error("Transaction window cannot be computed.")]
	DateWindow(#[from] time::error::ComponentRange),
}
impl Error {
	/// Wraps a request body read or decode failure.
	pub fn invalid_body(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::InvalidBody { source: Box::new(src) }
	}

	/// Returns `true` for failures detected locally before any provider call.
	pub fn is_precondition(&self) -> bool {
		matches!(self, Self::NoAccessToken { .. } | Self::InvalidSession(_))
	}
}

/// Failures raised by provider calls.
#[derive(Debug, ThisError)]
pub enum ProviderError {
	/// Client identifier or secret was not configured.
	#[error("Provider credentials are not configured.")]
	MissingCredentials,
	/// The configured environment names no known deployment.
	#[error(transparent)]
	Environment(#[from] UnknownEnvironment),
	/// A field the provider requires was absent from the caller's request.
	#[error("Request is missing the `{field}` field.")]
	MissingField {
		/// Missing field name.
		field: &'static str,
	},
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling `{endpoint}`.")]
	Network {
		/// Provider path that was being called.
		endpoint: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Provider answered with a non-success status.
	#[error("Provider rejected `{endpoint}` with HTTP {status}: {}.", describe(.error.as_ref()))]
	Api {
		/// Provider path that was being called.
		endpoint: &'static str,
		/// HTTP status code.
		status: u16,
		/// Decoded provider error envelope, when the body carried one.
		error: Option<PlaidErrorBody>,
	},
	/// Provider responded with JSON that could not be decoded.
	#[error("Provider returned malformed JSON from `{endpoint}`.")]
	Decode {
		/// Provider path that was being called.
		endpoint: &'static str,
		/// HTTP status code.
		status: u16,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl ProviderError {
	/// Wraps a transport-specific network error.
	pub fn network(endpoint: &'static str, src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { endpoint, source: Box::new(src) }
	}
}

/// Startup configuration failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Environment or defaults could not be merged into a configuration.
	#[error("Configuration could not be loaded.")]
	Load(#[source] Box<figment::Error>),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl From<figment::Error> for ConfigError {
	fn from(e: figment::Error) -> Self {
		Self::Load(Box::new(e))
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::HttpClientBuild { source: Box::new(e) }
	}
}

fn describe(error: Option<&PlaidErrorBody>) -> String {
	match error {
		Some(body) => format!("{} ({})", body.error_code, body.error_message),
		None => "no error envelope".into(),
	}
}
