//! The relay service: one provider call per operation plus the session token lifecycle.
//!
//! [`Relay`] owns the provider client and the session store. Each operation runs inside an
//! [`OperationSpan`], records attempt/success/failure outcomes, and logs the full error before
//! handing a typed [`Error`] back to the caller. Tokens move one way per session, from absent to
//! present, and are overwritten by every successful exchange.

pub mod window;

pub use window::TransactionWindow;

// self
use crate::{
	_prelude::*,
	auth::{SessionId, UserId},
	error::ProviderError,
	obs::{self, Operation, OperationSpan, Outcome},
	provider::{
		LinkTokenCreateRequest, Provider, PublicTokenExchangeRequest, TransactionsGetOptions,
		TransactionsGetRequest,
	},
	store::{SessionStore, SessionToken},
};

/// Source of "today" for the transaction window.
pub type Clock = Arc<dyn Fn() -> Date + Send + Sync>;

/// Result of [`Relay::create_link_token`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTokenResponse {
	/// Provider-issued link token, unchanged.
	pub link_token: String,
}

/// Result of [`Relay::exchange_public_token`].
///
/// Echoes the access token to the caller. Demo use only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeResponse {
	/// Access token now tracked for the session.
	pub access_token: String,
}

/// Coordinates provider calls and the session token store.
#[derive(Clone)]
pub struct Relay {
	/// Provider client every operation delegates to.
	pub provider: Arc<dyn Provider>,
	/// Store tracking one access token per session.
	pub store: Arc<dyn SessionStore>,
	clock: Clock,
}
impl Relay {
	/// Creates a relay whose clock reads the current UTC date.
	pub fn new(provider: Arc<dyn Provider>, store: Arc<dyn SessionStore>) -> Self {
		Self { provider, store, clock: Arc::new(|| OffsetDateTime::now_utc().date()) }
	}

	/// Replaces the clock used to compute the transaction window.
	pub fn with_clock(mut self, clock: impl 'static + Fn() -> Date + Send + Sync) -> Self {
		self.clock = Arc::new(clock);

		self
	}

	/// Current date according to the relay's clock.
	pub fn today(&self) -> Date {
		(self.clock)()
	}

	/// Mints a link token for `user`, falling back to the demo user.
	pub async fn create_link_token(&self, user: Option<UserId>) -> Result<LinkTokenResponse> {
		observe(Operation::CreateLinkToken, "create_link_token", async move {
			let request = LinkTokenCreateRequest::for_user(user.unwrap_or_default());
			let response = self.provider.create_link_token(&request).await?;

			Ok(LinkTokenResponse { link_token: response.link_token })
		})
		.await
	}

	/// Exchanges `public_token` and tracks the resulting access token for `session`.
	///
	/// The stored token is only replaced after the provider answers successfully.
	pub async fn exchange_public_token(
		&self,
		session: &SessionId,
		public_token: Option<String>,
	) -> Result<ExchangeResponse> {
		observe(Operation::ExchangePublicToken, "exchange_public_token", async move {
			let public_token =
				public_token.ok_or(ProviderError::MissingField { field: "public_token" })?;
			let response = self
				.provider
				.exchange_public_token(&PublicTokenExchangeRequest { public_token })
				.await?;
			let access_token = response.access_token.expose().to_owned();

			<dyn SessionStore>::save(
				self.store.as_ref(),
				session.clone(),
				SessionToken::new(response.access_token, response.item_id),
			)
			.await?;

			tracing::info!(%session, "Access token stored.");

			Ok(ExchangeResponse { access_token })
		})
		.await
	}

	/// Lists the last month of transactions using the session's access token.
	///
	/// Fails with [`Error::NoAccessToken`] without calling the provider when the session has
	/// not completed an exchange.
	pub async fn get_transactions(&self, session: &SessionId) -> Result<serde_json::Value> {
		observe(Operation::GetTransactions, "get_transactions", async move {
			let token = <dyn SessionStore>::fetch(self.store.as_ref(), session)
				.await?
				.ok_or_else(|| Error::NoAccessToken { session: session.clone() })?;
			let window = TransactionWindow::trailing_month(self.today())?;
			let request = TransactionsGetRequest {
				access_token: token.access_token,
				start_date: window.start,
				end_date: window.end,
				options: TransactionsGetOptions::default(),
			};

			Ok(self.provider.get_transactions(&request).await?)
		})
		.await
	}
}
impl Debug for Relay {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Relay").field("today", &self.today()).finish_non_exhaustive()
	}
}

async fn observe<T, Fut>(operation: Operation, stage: &'static str, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = OperationSpan::new(operation, stage);

	obs::record_outcome(operation, Outcome::Attempt);

	let result = span
		.instrument(async move {
			let result = fut.await;

			match &result {
				Ok(_) => {},
				Err(e) if e.is_precondition() => tracing::warn!(error = %e, "Precondition failed."),
				Err(e) => tracing::error!(error = %e, detail = ?e, "Operation failed."),
			}

			result
		})
		.await;

	match &result {
		Ok(_) => obs::record_outcome(operation, Outcome::Success),
		Err(_) => obs::record_outcome(operation, Outcome::Failure),
	}

	result
}
