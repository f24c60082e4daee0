//! Boundary error type mapping relay errors to HTTP status codes and error codes.

// crates.io
use axum::{
	Json,
	http::StatusCode,
	response::{IntoResponse, Response},
};
use serde_json::json;
// self
use crate::{_prelude::*, obs::Operation};

/// Relay [`Error`] tagged with the operation it interrupted; implements [`IntoResponse`].
///
/// Only the error code reaches the caller. Precondition failures map to `400`; every other
/// failure collapses to `500` with the operation's failure code.
#[derive(Debug)]
pub struct ApiError {
	/// Operation the error belongs to; `None` when the request failed before routing to one.
	pub operation: Option<Operation>,
	/// Underlying relay error.
	pub error: Error,
}
impl ApiError {
	/// Tags `error` with `operation`.
	pub fn new(operation: Operation, error: Error) -> Self {
		Self { operation: Some(operation), error }
	}

	/// Returns a mapper suitable for `Result::map_err`.
	pub fn for_operation(operation: Operation) -> impl Fn(Error) -> Self {
		move |error| Self::new(operation, error)
	}

	/// Returns `(status, error_code)` for the wrapped error.
	pub fn classify(&self) -> (StatusCode, &'static str) {
		match &self.error {
			Error::NoAccessToken { .. } => (StatusCode::BAD_REQUEST, "no_access_token"),
			Error::InvalidSession(_) => (StatusCode::BAD_REQUEST, "invalid_session"),
			_ => (
				StatusCode::INTERNAL_SERVER_ERROR,
				self.operation.map(Operation::failure_code).unwrap_or("internal_error"),
			),
		}
	}
}
impl From<Error> for ApiError {
	fn from(error: Error) -> Self {
		Self { operation: None, error }
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let (status, code) = self.classify();

		(status, Json(json!({ "error": code }))).into_response()
	}
}
