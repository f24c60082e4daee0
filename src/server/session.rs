//! Session selection from the `x-session-id` request header.

// crates.io
use axum::{extract::FromRequestParts, http::request::Parts};
// self
use crate::{_prelude::*, auth::SessionId, server::ApiError};

/// Header naming the caller's session.
pub const SESSION_HEADER: &str = "x-session-id";

/// Extracted session; absent headers select [`SessionId::default`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session(pub SessionId);
impl<S> FromRequestParts<S> for Session
where
	S: Send + Sync,
{
	type Rejection = ApiError;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let Some(value) = parts.headers.get(SESSION_HEADER) else {
			return Ok(Self(SessionId::default()));
		};

		SessionId::new(value.to_str().unwrap_or_default()).map(Self).map_err(|e| {
			tracing::warn!(error = %e, "Rejected session header.");

			Error::from(e).into()
		})
	}
}
