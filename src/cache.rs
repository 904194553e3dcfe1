//! Token cache contract and the built-in in-memory slot for buyer tokens.
//!
//! The buyer strategy consults a [`TokenCache`] before minting an anonymous token. The cache
//! is owned by the host and injected into [`Fetcher::buyer`](crate::fetch::Fetcher::buyer);
//! sharing one instance across fetchers gives process-wide reuse, while separate instances
//! scope tokens per tenant or per request.
//!
//! The buyer strategy reads then writes without a lock. Two calls racing on an empty cache may
//! both mint a token; the last write wins.

pub mod memory;

pub use memory::MemoryTokenCache;

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Boxed future returned by [`TokenCache`] operations.
pub type CacheFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CacheError>> + 'a + Send>>;

/// Storage contract for the buyer token slot.
pub trait TokenCache
where
	Self: Send + Sync,
{
	/// Returns the cached token, if any.
	fn get(&self) -> CacheFuture<'_, Option<CachedToken>>;

	/// Stores `token`, replacing whatever was cached.
	fn set(&self, token: TokenSecret) -> CacheFuture<'_, ()>;

	/// Empties the slot.
	fn clear(&self) -> CacheFuture<'_, ()>;
}

/// A cached token together with the instant it was stored.
///
/// The broker never inspects `cached_at`; hosts may use it to evict tokens on their own
/// schedule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedToken {
	/// Bearer token value.
	pub token: TokenSecret,
	/// When the token entered the cache.
	#[serde(with = "time::serde::rfc3339")]
	pub cached_at: OffsetDateTime,
}
impl CachedToken {
	/// Wraps `token`, stamping it with the current UTC instant.
	pub fn new(token: TokenSecret) -> Self {
		Self { token, cached_at: OffsetDateTime::now_utc() }
	}
}

/// Error type produced by [`TokenCache`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum CacheError {
	/// Backend-level failure for the storage engine.
	#[error("Token cache backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
