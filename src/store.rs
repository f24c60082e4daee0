//! Storage contracts and the in-memory implementation for session access tokens.

pub mod memory;

pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	auth::{SessionId, TokenSecret},
};

/// Boxed future returned by [`SessionStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract for session-keyed access tokens.
///
/// Each session holds at most one token. [`SessionStore::save`] replaces whatever the session
/// held before, so concurrent writers resolve last-write-wins.
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Persists or replaces the token tracked for `session`.
	fn save(&self, session: SessionId, token: SessionToken) -> StoreFuture<'_, ()>;

	/// Fetches the token tracked for `session`, if any.
	fn fetch<'a>(&'a self, session: &'a SessionId) -> StoreFuture<'a, Option<SessionToken>>;
}

/// Access token produced by a successful public-token exchange.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
	/// Provider access token.
	pub access_token: TokenSecret,
	/// Provider item the token grants access to.
	pub item_id: Option<String>,
	/// Instant the exchange completed.
	#[serde(with = "time::serde::rfc3339")]
	pub linked_at: OffsetDateTime,
}
impl SessionToken {
	/// Creates a record stamped with the current time.
	pub fn new(access_token: TokenSecret, item_id: Option<String>) -> Self {
		Self { access_token, item_id, linked_at: OffsetDateTime::now_utc() }
	}
}

/// Error type produced by [`SessionStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
