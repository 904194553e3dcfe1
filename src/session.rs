//! Shopper session cookie carrying the user token between browser and server.

// crates.io
use cookie::Cookie;
use reqwest::header::HeaderValue;
// self
use crate::{_prelude::*, auth::TokenSecret, config::CommerceConfig, error::ConfigError};

/// `Set-Cookie` payload for a signed-in shopper.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCookie {
	/// Cookie name, taken from [`CommerceConfig::customer_cookie`].
	pub name: String,
	/// Shopper token stored as the cookie value.
	pub token: TokenSecret,
}
impl SessionCookie {
	/// Cookie path attribute.
	pub const PATH: &'static str = "/";

	/// Builds the cookie named by `config` for `token`.
	pub fn new(config: &CommerceConfig, token: TokenSecret) -> Self {
		Self { name: config.customer_cookie.clone(), token }
	}

	/// Renders `{name}={token}; Path=/` with the token percent-encoded.
	pub fn render(&self) -> String {
		Cookie::build((self.name.as_str(), self.token.expose()))
			.path(Self::PATH)
			.build()
			.encoded()
			.to_string()
	}

	/// Renders the cookie as a sensitive `Set-Cookie` header value.
	pub fn header_value(&self) -> Result<HeaderValue, ConfigError> {
		let mut value = HeaderValue::from_str(&self.render())
			.map_err(|_| ConfigError::InvalidHeader { name: "set-cookie" })?;

		value.set_sensitive(true);

		Ok(value)
	}

	/// Finds the shopper token named by `config` in a request `Cookie` header.
	///
	/// Empty values are treated as absent, as are values that do not decode to UTF-8.
	pub fn token_from_header(config: &CommerceConfig, header: &str) -> Option<TokenSecret> {
		Cookie::split_parse_encoded(header)
			.filter_map(Result::ok)
			.find(|cookie| cookie.name() == config.customer_cookie)
			.map(|cookie| cookie.value().trim_matches('"').to_owned())
			.filter(|value| !value.is_empty())
			.map(TokenSecret::new)
	}
}
impl Debug for SessionCookie {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SessionCookie")
			.field("name", &self.name)
			.field("token", &self.token)
			.finish()
	}
}
