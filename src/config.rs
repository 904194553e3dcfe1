//! Backend configuration consumed by grants and fetchers.
//!
//! [`CommerceConfig`] is an immutable record assembled through [`CommerceConfigBuilder`] or
//! read from the process environment (see [`env`]). Fetchers never hold a config directly;
//! they hold a [`ConfigSource`] and resolve a fresh value on every call so hosts can rotate
//! secrets or switch tenants without rebuilding fetchers.

/// Builder API for assembling configurations.
pub mod builder;
/// Environment-variable loading.
pub mod env;

pub use builder::*;
pub use env::*;

// self
use crate::{
	_prelude::*,
	auth::{BuyerId, ClientId, ScopeSet},
	error::ConfigError,
};

/// Immutable configuration describing one commerce backend and the clients registered with it.
#[derive(Clone, PartialEq, Eq)]
pub struct CommerceConfig {
	/// Backend base URL; the token endpoint and every resource path hang off it.
	pub commerce_url: Url,
	/// API version path segment inserted between the base URL and resource paths.
	pub api_version: String,
	/// Cookie name carrying the shopper token between browser and server.
	pub customer_cookie: String,
	/// Client used for trusted, elevated service-to-service calls.
	pub middleware_client_id: ClientId,
	/// Secret paired with [`middleware_client_id`](Self::middleware_client_id).
	pub middleware_client_secret: Option<String>,
	/// Public client used for anonymous buyer tokens and shopper password grants.
	pub buyer_client_id: ClientId,
	/// Buyer organization that owns shopper accounts.
	pub buyer_id: Option<BuyerId>,
	/// Roles requested by the password grant.
	pub user_scope: ScopeSet,
}
impl CommerceConfig {
	/// Default API version segment.
	pub const DEFAULT_API_VERSION: &'static str = "v1";
	/// Default shopper-token cookie name.
	pub const DEFAULT_CUSTOMER_COOKIE: &'static str = "commerce.customer";

	/// Creates a new builder for the provided backend URL.
	pub fn builder(commerce_url: Url) -> CommerceConfigBuilder {
		CommerceConfigBuilder::new(commerce_url)
	}

	/// Base URL as a string without a trailing slash.
	pub fn base_url(&self) -> &str {
		self.commerce_url.as_str().trim_end_matches('/')
	}

	/// Token endpoint: `{base}/oauth/token`.
	pub fn token_endpoint(&self) -> Result<Url, ConfigError> {
		crate::oauth::token_endpoint(self.base_url())
	}

	/// Resource endpoint: `{base}/{api_version}{path}`.
	///
	/// `path` is appended verbatim and is expected to start with `/`.
	pub fn resource_url(&self, path: &str) -> Result<Url, ConfigError> {
		parse_endpoint(format!("{}/{}{path}", self.base_url(), self.api_version))
	}
}
impl Debug for CommerceConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CommerceConfig")
			.field("commerce_url", &self.commerce_url.as_str())
			.field("api_version", &self.api_version)
			.field("customer_cookie", &self.customer_cookie)
			.field("middleware_client_id", &self.middleware_client_id)
			.field("middleware_client_secret_set", &self.middleware_client_secret.is_some())
			.field("buyer_client_id", &self.buyer_client_id)
			.field("buyer_id", &self.buyer_id)
			.field("user_scope", &self.user_scope)
			.finish()
	}
}

/// Zero-argument resolver that yields the configuration for the current call.
pub trait ConfigSource: Send + Sync {
	/// Returns the configuration to use for one fetch.
	fn resolve(&self) -> CommerceConfig;
}
impl ConfigSource for CommerceConfig {
	fn resolve(&self) -> CommerceConfig {
		self.clone()
	}
}
impl<F> ConfigSource for F
where
	F: Fn() -> CommerceConfig + Send + Sync,
{
	fn resolve(&self) -> CommerceConfig {
		self()
	}
}

fn parse_endpoint(url: String) -> Result<Url, ConfigError> {
	Url::parse(&url).map_err(|source| ConfigError::InvalidEndpoint { url, source })
}
