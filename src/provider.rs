//! Provider-facing contract (behavior) plus the Plaid REST implementation (transport).
//!
//! `model` holds the request and response bodies of the three provider operations the relay
//! exposes. `environment` maps the configured environment selector to a base URL. `plaid`
//! implements [`Provider`] over reqwest, sending credentials as `PLAID-CLIENT-ID` and
//! `PLAID-SECRET` headers.

pub mod environment;
pub mod model;
pub mod plaid;

pub use environment::*;
pub use model::*;
pub use plaid::*;

// self
use crate::{_prelude::*, error::ProviderError};

/// Boxed future returned by [`Provider`] operations.
pub type ProviderFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, ProviderError>> + 'a + Send>>;

/// The three provider operations the relay delegates to.
///
/// Implementations must be `Send + Sync` so a single client can be shared across request
/// handlers. Every call maps exactly to one outbound provider request; implementations must not
/// retry.
pub trait Provider
where
	Self: Send + Sync,
{
	/// Mints a link token for the client-side linking flow.
	fn create_link_token<'a>(
		&'a self,
		request: &'a LinkTokenCreateRequest,
	) -> ProviderFuture<'a, LinkTokenCreateResponse>;

	/// Exchanges a public token for a durable access token.
	fn exchange_public_token<'a>(
		&'a self,
		request: &'a PublicTokenExchangeRequest,
	) -> ProviderFuture<'a, PublicTokenExchangeResponse>;

	/// Lists transactions; the raw body is returned untouched.
	fn get_transactions<'a>(
		&'a self,
		request: &'a TransactionsGetRequest,
	) -> ProviderFuture<'a, serde_json::Value>;
}
