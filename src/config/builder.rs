// self
use crate::{
	_prelude::*,
	auth::{BuyerId, ClientId, ScopeSet},
	config::CommerceConfig,
};

/// Errors raised while constructing or validating configurations.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ConfigBuildError {
	/// Backend URL must use HTTP(S).
	#[error("The commerce URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// URL that failed validation.
		url: String,
	},
	/// Backend URL must name a host.
	#[error("The commerce URL has no host: {url}.")]
	MissingHost {
		/// URL that failed validation.
		url: String,
	},
	/// API version must be a single non-empty path segment.
	#[error("API version `{value}` must be a single non-empty path segment.")]
	InvalidApiVersion {
		/// Rejected value.
		value: String,
	},
	/// Cookie names must be RFC 6265 tokens.
	#[error("Cookie name `{name}` is not a valid cookie token.")]
	InvalidCookieName {
		/// Rejected value.
		name: String,
	},
	/// The middleware client id is mandatory.
	#[error("Missing middleware client id.")]
	MissingMiddlewareClientId,
	/// The buyer client id is mandatory.
	#[error("Missing buyer client id.")]
	MissingBuyerClientId,
	/// An environment variable the configuration requires is unset.
	#[error("Environment variable `{name}` is not set.")]
	MissingVariable {
		/// Variable name.
		name: &'static str,
	},
	/// An environment variable holds a value that failed to parse.
	#[error("Environment variable `{name}` is invalid: {reason}.")]
	InvalidVariable {
		/// Variable name.
		name: &'static str,
		/// Parser message.
		reason: String,
	},
}

/// Builder for [`CommerceConfig`] values.
#[derive(Debug)]
pub struct CommerceConfigBuilder {
	/// Backend base URL.
	pub commerce_url: Url,
	/// API version segment.
	pub api_version: String,
	/// Shopper-token cookie name.
	pub customer_cookie: String,
	/// Middleware client id.
	pub middleware_client_id: Option<ClientId>,
	/// Middleware client secret.
	pub middleware_client_secret: Option<String>,
	/// Buyer client id.
	pub buyer_client_id: Option<ClientId>,
	/// Buyer organization id.
	pub buyer_id: Option<BuyerId>,
	/// Roles requested by the password grant.
	pub user_scope: ScopeSet,
}
impl CommerceConfigBuilder {
	/// Creates a new builder seeded with the backend URL and defaults.
	pub fn new(commerce_url: Url) -> Self {
		Self {
			commerce_url,
			api_version: CommerceConfig::DEFAULT_API_VERSION.into(),
			customer_cookie: CommerceConfig::DEFAULT_CUSTOMER_COOKIE.into(),
			middleware_client_id: None,
			middleware_client_secret: None,
			buyer_client_id: None,
			buyer_id: None,
			user_scope: ScopeSet::shopper(),
		}
	}

	/// Sets the API version segment.
	pub fn api_version(mut self, version: impl Into<String>) -> Self {
		self.api_version = version.into();

		self
	}

	/// Sets the shopper-token cookie name.
	pub fn customer_cookie(mut self, name: impl Into<String>) -> Self {
		self.customer_cookie = name.into();

		self
	}

	/// Sets the middleware client id.
	pub fn middleware_client_id(mut self, id: ClientId) -> Self {
		self.middleware_client_id = Some(id);

		self
	}

	/// Sets the middleware client secret.
	pub fn middleware_client_secret(mut self, secret: impl Into<String>) -> Self {
		self.middleware_client_secret = Some(secret.into());

		self
	}

	/// Sets the buyer client id.
	pub fn buyer_client_id(mut self, id: ClientId) -> Self {
		self.buyer_client_id = Some(id);

		self
	}

	/// Sets the buyer organization id.
	pub fn buyer_id(mut self, id: BuyerId) -> Self {
		self.buyer_id = Some(id);

		self
	}

	/// Overrides the roles requested by the password grant.
	pub fn user_scope(mut self, scope: ScopeSet) -> Self {
		self.user_scope = scope;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<CommerceConfig, ConfigBuildError> {
		let middleware_client_id =
			self.middleware_client_id.ok_or(ConfigBuildError::MissingMiddlewareClientId)?;
		let buyer_client_id = self.buyer_client_id.ok_or(ConfigBuildError::MissingBuyerClientId)?;
		let config = CommerceConfig {
			commerce_url: self.commerce_url,
			api_version: self.api_version,
			customer_cookie: self.customer_cookie,
			middleware_client_id,
			middleware_client_secret: self.middleware_client_secret,
			buyer_client_id,
			buyer_id: self.buyer_id,
			user_scope: self.user_scope,
		};

		config.validate()?;

		Ok(config)
	}
}

impl CommerceConfig {
	fn validate(&self) -> Result<(), ConfigBuildError> {
		validate_url(&self.commerce_url)?;
		validate_api_version(&self.api_version)?;

		if !is_cookie_token(&self.customer_cookie) {
			return Err(ConfigBuildError::InvalidCookieName { name: self.customer_cookie.clone() });
		}

		Ok(())
	}
}

fn validate_url(url: &Url) -> Result<(), ConfigBuildError> {
	if !matches!(url.scheme(), "http" | "https") {
		return Err(ConfigBuildError::UnsupportedScheme { url: url.to_string() });
	}
	if url.host_str().is_none_or(str::is_empty) {
		return Err(ConfigBuildError::MissingHost { url: url.to_string() });
	}

	Ok(())
}

fn validate_api_version(value: &str) -> Result<(), ConfigBuildError> {
	if value.is_empty() || value.contains('/') || value.chars().any(char::is_whitespace) {
		Err(ConfigBuildError::InvalidApiVersion { value: value.into() })
	} else {
		Ok(())
	}
}

/// Checks the RFC 6265 `token` grammar used for cookie names.
pub(crate) fn is_cookie_token(name: &str) -> bool {
	const SEPARATORS: &str = "()<>@,;:\\\"/[]?={} \t";

	!name.is_empty()
		&& name.chars().all(|c| c.is_ascii() && !c.is_ascii_control() && !SEPARATORS.contains(c))
}
