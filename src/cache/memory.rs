//! Thread-safe in-memory [`TokenCache`] holding a single token slot.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	cache::{CacheError, CacheFuture, CachedToken, TokenCache},
};

type Slot = Arc<RwLock<Option<CachedToken>>>;

/// Single-slot cache kept in process memory.
///
/// Clones share the slot, so a host can hand one clone to a fetcher and keep another to
/// inspect or clear the cached token.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenCache(Slot);
impl MemoryTokenCache {
	/// Creates a cache pre-populated with `token`.
	pub fn with_token(token: TokenSecret) -> Self {
		Self(Arc::new(RwLock::new(Some(CachedToken::new(token)))))
	}

	/// Returns the cached token without going through the async contract.
	pub fn snapshot(&self) -> Option<CachedToken> {
		self.0.read().clone()
	}

	fn set_now(slot: Slot, token: TokenSecret) -> Result<(), CacheError> {
		*slot.write() = Some(CachedToken::new(token));

		Ok(())
	}
}
impl TokenCache for MemoryTokenCache {
	fn get(&self) -> CacheFuture<'_, Option<CachedToken>> {
		let slot = self.0.clone();

		Box::pin(async move { Ok(slot.read().clone()) })
	}

	fn set(&self, token: TokenSecret) -> CacheFuture<'_, ()> {
		let slot = self.0.clone();

		Box::pin(async move { Self::set_now(slot, token) })
	}

	fn clear(&self) -> CacheFuture<'_, ()> {
		let slot = self.0.clone();

		Box::pin(async move {
			slot.write().take();

			Ok(())
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn set_overwrites_and_clear_empties() {
		let cache = MemoryTokenCache::default();

		assert!(cache.get().await.expect("Empty cache read should succeed.").is_none());

		cache.set(TokenSecret::new("first")).await.expect("First write should succeed.");
		cache.set(TokenSecret::new("second")).await.expect("Second write should succeed.");

		let cached = cache
			.get()
			.await
			.expect("Cache read should succeed.")
			.expect("Cache should hold the last written token.");

		assert_eq!(cached.token.expose(), "second");

		cache.clear().await.expect("Clear should succeed.");

		assert!(cache.snapshot().is_none());
	}

	#[tokio::test]
	async fn clones_share_the_slot() {
		let cache = MemoryTokenCache::with_token(TokenSecret::new("seeded"));
		let shared: Arc<dyn TokenCache> = Arc::new(cache.clone());

		shared.set(TokenSecret::new("replaced")).await.expect("Shared write should succeed.");

		assert_eq!(
			cache.snapshot().map(|cached| cached.token.expose().to_owned()).as_deref(),
			Some("replaced")
		);
	}
}
