//! Optional observability helpers for grants, fetches, and the buyer token cache.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `commerce_broker.fetch` (fields `fetcher`
//!   and `stage`) and `commerce_broker.grant` (field `grant`).
//! - Enable `metrics` to increment `commerce_broker_fetch_total` (labels `fetcher` + `outcome`),
//!   `commerce_broker_grant_total` (labels `grant` + `outcome`), and
//!   `commerce_broker_cache_total` (label `outcome`).

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Fetcher variants observed by the broker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FetcherKind {
	/// Elevated service-to-service fetcher.
	Middleware,
	/// Anonymous shopper fetcher backed by the token cache.
	Buyer,
	/// Authenticated shopper fetcher.
	User,
}
impl FetcherKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FetcherKind::Middleware => "middleware",
			FetcherKind::Buyer => "buyer",
			FetcherKind::User => "user",
		}
	}
}
impl Display for FetcherKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a broker helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// How the buyer strategy settled on a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheOutcome {
	/// A cached token was reused.
	Hit,
	/// The cache was empty and a new token was minted.
	Miss,
	/// The caller supplied a token that replaced the cached one.
	Override,
}
impl CacheOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CacheOutcome::Hit => "hit",
			CacheOutcome::Miss => "miss",
			CacheOutcome::Override => "override",
		}
	}
}
impl Display for CacheOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
