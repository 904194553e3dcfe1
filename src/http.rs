//! Shared reqwest transport used by the grant client and the REST executor.
//!
//! Hosts that need timeouts, proxies, or custom TLS roots build their own
//! [`ReqwestClient`] and wrap it with [`ReqwestHttpClient::with_client`]; the broker never
//! imposes timeouts of its own.

// std
use std::ops::Deref;
// crates.io
use reqwest::redirect::Policy;
// self
use crate::{_prelude::*, error::ConfigError};

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client that refuses to follow redirects.
	///
	/// Token endpoints answer directly, and a redirected resource call would replay the bearer
	/// token against another origin.
	pub fn without_redirects() -> Result<Self, ConfigError> {
		let client =
			ReqwestClient::builder().redirect(Policy::none()).build().map_err(ConfigError::from)?;

		Ok(Self(client))
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl From<ReqwestClient> for ReqwestHttpClient {
	fn from(client: ReqwestClient) -> Self {
		Self(client)
	}
}

impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
