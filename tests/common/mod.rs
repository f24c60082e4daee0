#![allow(dead_code)]

// std
use std::{
	collections::HashMap,
	sync::{
		Arc,
		atomic::{AtomicBool, Ordering},
	},
	time::Duration,
};
// crates.io
use parking_lot::Mutex;
use serde_json::json;
use time::{Date, macros::date};
// self
use plaid_relay::{
	auth::TokenSecret,
	error::ProviderError,
	provider::{
		LinkTokenCreateRequest, LinkTokenCreateResponse, Provider, ProviderFuture,
		PublicTokenExchangeRequest, PublicTokenExchangeResponse, TransactionsGetRequest,
	},
	relay::Relay,
	store::MemoryStore,
};

pub const CLIENT_ID: &str = "client-relay-tests";
pub const SECRET: &str = "secret-relay-tests";

/// Fixed "today" used by tests that assert on the transaction window.
pub const TODAY: Date = date!(2024 - 03 - 15);

/// In-process [`Provider`] that records every request and answers from a script.
#[derive(Default)]
pub struct FakeProvider {
	pub link_requests: Mutex<Vec<LinkTokenCreateRequest>>,
	pub exchange_requests: Mutex<Vec<PublicTokenExchangeRequest>>,
	pub transaction_requests: Mutex<Vec<TransactionsGetRequest>>,
	/// Per-public-token delay applied before answering an exchange.
	pub exchange_delays: Mutex<HashMap<String, Duration>>,
	failing: AtomicBool,
}
impl FakeProvider {
	pub fn fail_from_now_on(&self) {
		self.failing.store(true, Ordering::SeqCst);
	}

	pub fn delay_exchange(&self, public_token: &str, delay: Duration) {
		self.exchange_delays.lock().insert(public_token.into(), delay);
	}

	pub fn calls(&self) -> usize {
		self.link_requests.lock().len()
			+ self.exchange_requests.lock().len()
			+ self.transaction_requests.lock().len()
	}

	fn rejection(&self, endpoint: &'static str) -> Option<ProviderError> {
		self.failing
			.load(Ordering::SeqCst)
			.then_some(ProviderError::Api { endpoint, status: 400, error: None })
	}
}
impl Provider for FakeProvider {
	fn create_link_token<'a>(
		&'a self,
		request: &'a LinkTokenCreateRequest,
	) -> ProviderFuture<'a, LinkTokenCreateResponse> {
		Box::pin(async move {
			self.link_requests.lock().push(request.clone());

			if let Some(err) = self.rejection("/link/token/create") {
				return Err(err);
			}

			Ok(LinkTokenCreateResponse {
				link_token: format!("link-sandbox-{}", request.user.client_user_id),
				expiration: None,
				request_id: None,
			})
		})
	}

	fn exchange_public_token<'a>(
		&'a self,
		request: &'a PublicTokenExchangeRequest,
	) -> ProviderFuture<'a, PublicTokenExchangeResponse> {
		Box::pin(async move {
			self.exchange_requests.lock().push(request.clone());

			let delay = self.exchange_delays.lock().get(&request.public_token).copied();

			if let Some(delay) = delay {
				tokio::time::sleep(delay).await;
			}
			if let Some(err) = self.rejection("/item/public_token/exchange") {
				return Err(err);
			}

			Ok(PublicTokenExchangeResponse {
				access_token: TokenSecret::new(format!("access-for-{}", request.public_token)),
				item_id: Some(format!("item-for-{}", request.public_token)),
				request_id: None,
			})
		})
	}

	fn get_transactions<'a>(
		&'a self,
		request: &'a TransactionsGetRequest,
	) -> ProviderFuture<'a, serde_json::Value> {
		Box::pin(async move {
			self.transaction_requests.lock().push(request.clone());

			if let Some(err) = self.rejection("/transactions/get") {
				return Err(err);
			}

			Ok(json!({
				"accounts": [],
				"transactions": [{ "transaction_id": "txn-1", "amount": 12.5 }],
				"total_transactions": 1,
			}))
		})
	}
}

/// Relay backed by a [`FakeProvider`] and a fresh memory store, pinned to [`TODAY`].
pub fn fake_relay() -> (Relay, Arc<FakeProvider>, Arc<MemoryStore>) {
	let provider = Arc::new(FakeProvider::default());
	let store = Arc::new(MemoryStore::default());
	let relay = Relay::new(provider.clone(), store.clone()).with_clock(|| TODAY);

	(relay, provider, store)
}
