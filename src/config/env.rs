// self
use crate::{
	_prelude::*,
	auth::{BuyerId, ClientId, ScopeSet},
	config::{CommerceConfig, ConfigBuildError},
};

/// Backend base URL.
pub const ENV_COMMERCE_URL: &str = "COMMERCE_URL";
/// API version segment.
pub const ENV_API_VERSION: &str = "COMMERCE_API_VERSION";
/// Shopper-token cookie name.
pub const ENV_CUSTOMER_COOKIE: &str = "COMMERCE_CUSTOMER_COOKIE";
/// Middleware client id.
pub const ENV_MIDDLEWARE_CLIENT_ID: &str = "COMMERCE_MIDDLEWARE_CLIENT_ID";
/// Middleware client secret.
pub const ENV_MIDDLEWARE_CLIENT_SECRET: &str = "COMMERCE_MIDDLEWARE_CLIENT_SECRET";
/// Buyer client id.
pub const ENV_BUYER_CLIENT_ID: &str = "COMMERCE_BUYER_CLIENT_ID";
/// Buyer organization id.
pub const ENV_BUYER_ID: &str = "COMMERCE_BUYER_ID";
/// Space-delimited password-grant roles.
pub const ENV_USER_SCOPE: &str = "COMMERCE_USER_SCOPE";

impl CommerceConfig {
	/// Loads the configuration from the process environment.
	pub fn from_env() -> Result<Self, ConfigBuildError> {
		Self::from_env_with(|name| std::env::var(name).ok())
	}

	/// Loads the configuration through a custom variable lookup.
	///
	/// Empty values are treated as unset.
	pub fn from_env_with<F>(lookup: F) -> Result<Self, ConfigBuildError>
	where
		F: Fn(&'static str) -> Option<String>,
	{
		let var = |name: &'static str| lookup(name).filter(|value| !value.is_empty());
		let required = |name: &'static str| var(name).ok_or(ConfigBuildError::MissingVariable { name });
		let commerce_url = required(ENV_COMMERCE_URL)?;
		let commerce_url = Url::parse(&commerce_url).map_err(|e| invalid(ENV_COMMERCE_URL, e))?;
		let middleware_client_id = ClientId::new(required(ENV_MIDDLEWARE_CLIENT_ID)?)
			.map_err(|e| invalid(ENV_MIDDLEWARE_CLIENT_ID, e))?;
		let buyer_client_id = ClientId::new(required(ENV_BUYER_CLIENT_ID)?)
			.map_err(|e| invalid(ENV_BUYER_CLIENT_ID, e))?;
		let mut builder = CommerceConfig::builder(commerce_url)
			.middleware_client_id(middleware_client_id)
			.buyer_client_id(buyer_client_id);

		if let Some(version) = var(ENV_API_VERSION) {
			builder = builder.api_version(version);
		}
		if let Some(cookie) = var(ENV_CUSTOMER_COOKIE) {
			builder = builder.customer_cookie(cookie);
		}
		if let Some(secret) = var(ENV_MIDDLEWARE_CLIENT_SECRET) {
			builder = builder.middleware_client_secret(secret);
		}
		if let Some(buyer) = var(ENV_BUYER_ID) {
			builder = builder.buyer_id(BuyerId::new(buyer).map_err(|e| invalid(ENV_BUYER_ID, e))?);
		}
		if let Some(scope) = var(ENV_USER_SCOPE) {
			builder = builder
				.user_scope(ScopeSet::from_str(&scope).map_err(|e| invalid(ENV_USER_SCOPE, e))?);
		}

		builder.build()
	}
}

fn invalid(name: &'static str, err: impl Display) -> ConfigBuildError {
	ConfigBuildError::InvalidVariable { name, reason: err.to_string() }
}
