//! Thread-safe in-memory [`SessionStore`] implementation.

// self
use crate::{
	_prelude::*,
	auth::SessionId,
	store::{SessionStore, SessionToken, StoreError, StoreFuture},
};

type StoreMap = Arc<RwLock<HashMap<SessionId, SessionToken>>>;

/// Storage backend that keeps session tokens in-process; everything is lost on restart.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Number of sessions currently holding a token.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` when no session holds a token.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	fn save_now(map: StoreMap, session: SessionId, token: SessionToken) -> Result<(), StoreError> {
		map.write().insert(session, token);

		Ok(())
	}

	fn fetch_now(map: StoreMap, session: SessionId) -> Option<SessionToken> {
		map.read().get(&session).cloned()
	}
}
impl SessionStore for MemoryStore {
	fn save(&self, session: SessionId, token: SessionToken) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move { Self::save_now(map, session, token) })
	}

	fn fetch<'a>(&'a self, session: &'a SessionId) -> StoreFuture<'a, Option<SessionToken>> {
		let map = self.0.clone();
		let session = session.to_owned();

		Box::pin(async move { Ok(Self::fetch_now(map, session)) })
	}
}
