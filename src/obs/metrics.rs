//! Operation counters.
//!
//! Every relay operation bumps `plaid_relay_operation_total` once on entry and once on exit,
//! labeled with the operation name and `attempt`, `success`, or `failure`. Without the `metrics`
//! feature the calls compile to nothing.

// self
use crate::obs::{Operation, Outcome};

/// Counter incremented by [`record_outcome`].
pub const OPERATION_COUNTER: &str = "plaid_relay_operation_total";

/// Bumps [`OPERATION_COUNTER`] for `operation` and `outcome`.
pub fn record_outcome(operation: Operation, outcome: Outcome) {
	#[cfg(feature = "metrics")]
	{
		let counter = metrics::counter!(
			OPERATION_COUNTER,
			"operation" => operation.as_str(),
			"outcome" => outcome.as_str()
		);

		counter.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, outcome);
	}
}
