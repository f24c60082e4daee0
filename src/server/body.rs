//! Lenient JSON request bodies.
//!
//! A missing body, an empty body, or a body sent without `application/json` decodes as
//! `T::default()`. Anything else that fails to read or decode is rejected with
//! [`Error::InvalidBody`], which handlers tag with their operation.

// crates.io
use axum::{
	body::Bytes,
	extract::{FromRequest, Request},
	http::{HeaderMap, header},
};
use serde::de::DeserializeOwned;
// self
use crate::{_prelude::*, server::ApiError};

/// Decoded request body; falls back to `T::default()` when the caller sent nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JsonBody<T>(pub T);
impl<T, S> FromRequest<S> for JsonBody<T>
where
	T: DeserializeOwned + Default,
	S: Send + Sync,
{
	type Rejection = ApiError;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
		let is_json = has_json_content_type(req.headers());
		let bytes = Bytes::from_request(req, state).await.map_err(Error::invalid_body)?;

		if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
			return Ok(Self(T::default()));
		}

		serde_json::from_slice(&bytes).map(Self).map_err(|e| Error::invalid_body(e).into())
	}
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
	headers
		.get(header::CONTENT_TYPE)
		.and_then(|value| value.to_str().ok())
		.and_then(|value| value.split(';').next())
		.is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}
