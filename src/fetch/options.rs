//! Per-request options and shopper credentials accepted by the fetchers.

// crates.io
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
// self
use crate::{_prelude::*, auth::TokenSecret};

/// Per-call options accepted by every fetcher.
///
/// `token` and `credentials` are only consulted by the strategies that understand them: the
/// buyer strategy uses `token` as a cache override, the user strategy uses `token` or falls
/// back to `credentials`, and the middleware strategy ignores both.
#[derive(Clone, Debug, Default)]
pub struct FetchOptions {
	/// Caller-supplied bearer token.
	pub token: Option<TokenSecret>,
	/// Shopper credentials for the password grant.
	pub credentials: Option<UserCredentials>,
	/// Extra request headers; the executor's own headers take precedence.
	pub headers: HeaderMap,
}
impl FetchOptions {
	/// Supplies a bearer token.
	pub fn with_token(mut self, token: impl Into<TokenSecret>) -> Self {
		self.token = Some(token.into());

		self
	}

	/// Supplies shopper credentials.
	pub fn with_credentials(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
		self.credentials = Some(UserCredentials::new(email, password));

		self
	}

	/// Adds an extra request header.
	pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);

		self
	}
}

/// Shopper e-mail and password.
#[derive(Clone, PartialEq, Eq)]
pub struct UserCredentials {
	/// Login e-mail; the username is derived from it.
	pub email: String,
	/// Password, redacted in debug output.
	pub password: TokenSecret,
}
impl UserCredentials {
	/// Bundles an e-mail and password.
	pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
		Self { email: email.into(), password: TokenSecret::new(password.into()) }
	}

	/// Both fields must be non-empty for a password grant to be attempted.
	pub fn is_complete(&self) -> bool {
		!self.email.is_empty() && !self.password.is_empty()
	}
}
impl Debug for UserCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("UserCredentials")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.finish()
	}
}
