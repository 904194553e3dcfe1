//! Token-aware fetchers over one request pipeline.
//!
//! A [`Fetcher`] pairs a [`ConfigSource`] with a [`TokenStrategy`]. Every call resolves the
//! configuration, obtains a token through the strategy, and hands the request to the shared
//! [`RestExecutor`]. The three constructors mirror the backend's three principals:
//!
//! - [`Fetcher::middleware`] mints a service token per call and returns data only.
//! - [`Fetcher::buyer`] reuses an anonymous token from a [`TokenCache`] and returns the token.
//! - [`Fetcher::user`] acts as a signed-in shopper and returns the token.

pub mod options;
pub mod strategy;

pub use options::*;
pub use strategy::*;

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	cache::TokenCache,
	config::{CommerceConfig, ConfigSource},
	error::ConfigError,
	http::ReqwestHttpClient,
	oauth::GrantClient,
	obs::{self, FetcherKind, FlowOutcome, FlowSpan},
	rest::RestExecutor,
};

/// Result of one fetch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fetched<T> {
	/// Decoded body, `None` when the backend sent nothing decodable.
	pub data: Option<T>,
	/// Token metadata, present for the buyer and user fetchers.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub meta: Option<FetchMeta>,
}
impl<T> Fetched<T> {
	/// Token used for the call, when the fetcher exposes it.
	pub fn token(&self) -> Option<&TokenSecret> {
		self.meta.as_ref().map(|meta| &meta.token)
	}

	/// Drops the metadata and returns the body.
	pub fn into_data(self) -> Option<T> {
		self.data
	}
}

/// Metadata attached to buyer and user results.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchMeta {
	/// Bearer token that authenticated the call.
	pub token: TokenSecret,
}

/// Authenticated REST fetcher.
///
/// Cloning is cheap; clones share the config source, the transport pool, and (for buyers) the
/// token cache.
#[derive(Clone)]
pub struct Fetcher {
	config: Arc<dyn ConfigSource>,
	strategy: TokenStrategy,
	grants: GrantClient,
	executor: RestExecutor,
}
impl Debug for Fetcher {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Fetcher")
			.field("kind", &self.kind())
			.field("strategy", &self.strategy)
			.finish_non_exhaustive()
	}
}
impl Fetcher {
	/// Creates a fetcher with an explicit strategy and the default transport.
	pub fn new<C>(config: C, strategy: TokenStrategy) -> Self
	where
		C: 'static + ConfigSource,
	{
		Self {
			config: Arc::new(config),
			strategy,
			grants: GrantClient::default(),
			executor: RestExecutor::default(),
		}
	}

	/// Service fetcher authenticated with the middleware client credentials.
	pub fn middleware<C>(config: C) -> Self
	where
		C: 'static + ConfigSource,
	{
		Self::new(config, TokenStrategy::Service)
	}

	/// Anonymous shopper fetcher whose token lives in `cache`.
	pub fn buyer<C>(config: C, cache: Arc<dyn TokenCache>) -> Self
	where
		C: 'static + ConfigSource,
	{
		Self::new(config, TokenStrategy::CachedAnonymous(cache))
	}

	/// Signed-in shopper fetcher.
	pub fn user<C>(config: C) -> Self
	where
		C: 'static + ConfigSource,
	{
		Self::new(config, TokenStrategy::User)
	}

	/// Routes grants and resource calls through `http`.
	pub fn with_http_client(mut self, http: impl Into<ReqwestHttpClient>) -> Self {
		let http = http.into();

		self.grants = GrantClient::new(http.clone());
		self.executor = RestExecutor::new(http);

		self
	}

	/// Fetcher label used in spans and metrics.
	pub fn kind(&self) -> FetcherKind {
		self.strategy.kind()
	}

	/// Token strategy in use.
	pub fn strategy(&self) -> &TokenStrategy {
		&self.strategy
	}

	/// Resolves the configuration the next call would use.
	pub fn config(&self) -> CommerceConfig {
		self.config.resolve()
	}

	/// Performs an authenticated call against `{base}/{api_version}{path}`.
	///
	/// No resource request is issued when the token cannot be obtained.
	pub async fn fetch<T, B>(
		&self,
		method: Method,
		path: &str,
		body: Option<&B>,
		options: FetchOptions,
	) -> Result<Fetched<T>>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		let kind = self.kind();
		let span = FlowSpan::fetch(kind, "fetch");

		obs::record_fetch_outcome(kind, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let config = self.config.resolve();
				let token = self.strategy.resolve(&self.grants, &config, &options).await?;
				let data = self
					.executor
					.execute(&config, &token, method, path, body, &options.headers)
					.await?;
				let meta = self.strategy.exposes_token().then_some(FetchMeta { token });

				Ok(Fetched { data, meta })
			})
			.await;

		match &result {
			Ok(_) => obs::record_fetch_outcome(kind, FlowOutcome::Success),
			Err(_) => obs::record_fetch_outcome(kind, FlowOutcome::Failure),
		}

		result
	}

	/// [`fetch`](Self::fetch) without a request body.
	pub async fn fetch_without_body<T>(
		&self,
		method: Method,
		path: &str,
		options: FetchOptions,
	) -> Result<Fetched<T>>
	where
		T: DeserializeOwned,
	{
		self.fetch::<T, ()>(method, path, None, options).await
	}

	/// Exchanges shopper credentials for a token with the buyer client.
	///
	/// The token is returned to the caller and never cached.
	pub async fn user_token(&self, email: &str, password: &str) -> Result<TokenSecret> {
		if email.is_empty() || password.is_empty() {
			return Err(ConfigError::MissingUserCredentials.into());
		}

		let config = self.config.resolve();
		let options = FetchOptions::default().with_credentials(email, password);

		FlowSpan::fetch(self.kind(), "user_token")
			.instrument(TokenStrategy::User.resolve(&self.grants, &config, &options))
			.await
	}
}
