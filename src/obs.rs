//! Observability helpers for relay operations.
//!
//! # Feature Flags
//!
//! - Spans named `plaid_relay.operation` carry the `operation` and `stage` fields and are always
//!   emitted through `tracing`.
//! - Enable `metrics` to increment the `plaid_relay_operation_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Relay operations, one per HTTP endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// `POST /link_token`.
	CreateLinkToken,
	/// `POST /exchange_public_token`.
	ExchangePublicToken,
	/// `GET /transactions`.
	GetTransactions,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::CreateLinkToken => "create_link_token",
			Operation::ExchangePublicToken => "exchange_public_token",
			Operation::GetTransactions => "get_transactions",
		}
	}

	/// Error code returned to callers when the operation fails upstream.
	pub const fn failure_code(self) -> &'static str {
		match self {
			Operation::CreateLinkToken => "link_token_failed",
			Operation::ExchangePublicToken => "exchange_failed",
			Operation::GetTransactions => "transactions_failed",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Entry to a relay operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
