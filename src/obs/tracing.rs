// crates.io
use tracing::{Instrument, instrument::Instrumented};
use tracing_subscriber::EnvFilter;
// self
use crate::{_prelude::*, obs::Operation};

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,plaid_relay=info,tower_http=info";

/// Installs the global fmt subscriber, honoring `RUST_LOG` when present.
///
/// Calling this more than once is harmless; later calls leave the first subscriber in place.
pub fn init_tracing() {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
	let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).try_init();
}

/// A span builder used by relay operations.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	span: tracing::Span,
}
impl OperationSpan {
	/// Creates a new span tagged with the provided operation + stage.
	pub fn new(operation: Operation, stage: &'static str) -> Self {
		let span =
			tracing::info_span!("plaid_relay.operation", operation = operation.as_str(), stage);

		Self { span }
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> Instrumented<Fut>
	where
		Fut: Future,
	{
		fut.instrument(self.span.clone())
	}
}
