//! Token acquisition strategies shared by every fetcher.

// self
use crate::{
	_prelude::*,
	auth::{TokenSecret, username_from_email},
	cache::TokenCache,
	config::CommerceConfig,
	error::ConfigError,
	fetch::FetchOptions,
	oauth::GrantClient,
	obs::{self, CacheOutcome, FetcherKind},
};

/// How a fetcher obtains the bearer token for a call.
#[derive(Clone)]
pub enum TokenStrategy {
	/// Fresh `client_credentials` grant with the middleware client on every call.
	Service,
	/// Anonymous buyer token: caller override, then cache, then a new `client_credentials`
	/// grant with the buyer client (no secret).
	CachedAnonymous(Arc<dyn TokenCache>),
	/// Caller token, else a `password` grant from the caller's credentials. Never cached.
	User,
}
impl TokenStrategy {
	/// Fetcher label used for spans and metrics.
	pub fn kind(&self) -> FetcherKind {
		match self {
			Self::Service => FetcherKind::Middleware,
			Self::CachedAnonymous(_) => FetcherKind::Buyer,
			Self::User => FetcherKind::User,
		}
	}

	/// Whether results carry the token that was used.
	pub fn exposes_token(&self) -> bool {
		!matches!(self, Self::Service)
	}

	/// Produces the token for one call; fails before any resource request when none can be
	/// produced.
	pub async fn resolve(
		&self,
		grants: &GrantClient,
		config: &CommerceConfig,
		options: &FetchOptions,
	) -> Result<TokenSecret> {
		match self {
			Self::Service =>
				grants
					.service_token(
						config.base_url(),
						&config.middleware_client_id,
						config.middleware_client_secret.as_deref(),
					)
					.await,
			Self::CachedAnonymous(cache) =>
				resolve_cached(cache.as_ref(), grants, config, options).await,
			Self::User => resolve_user(grants, config, options).await,
		}
	}
}
impl Debug for TokenStrategy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(match self {
			Self::Service => "TokenStrategy::Service",
			Self::CachedAnonymous(_) => "TokenStrategy::CachedAnonymous(..)",
			Self::User => "TokenStrategy::User",
		})
	}
}

async fn resolve_cached(
	cache: &dyn TokenCache,
	grants: &GrantClient,
	config: &CommerceConfig,
	options: &FetchOptions,
) -> Result<TokenSecret> {
	if let Some(token) = options.token.clone() {
		cache.set(token.clone()).await?;
		obs::record_cache_lookup(CacheOutcome::Override);

		return Ok(token);
	}
	if let Some(cached) = cache.get().await? {
		obs::record_cache_lookup(CacheOutcome::Hit);

		return Ok(cached.token);
	}

	let token = grants.service_token(config.base_url(), &config.buyer_client_id, None).await?;

	cache.set(token.clone()).await?;
	obs::record_cache_lookup(CacheOutcome::Miss);

	Ok(token)
}

async fn resolve_user(
	grants: &GrantClient,
	config: &CommerceConfig,
	options: &FetchOptions,
) -> Result<TokenSecret> {
	if let Some(token) = options.token.clone() {
		return Ok(token);
	}

	match options.credentials.as_ref().filter(|credentials| credentials.is_complete()) {
		Some(credentials) =>
			grants
				.user_token(
					config.base_url(),
					&config.buyer_client_id,
					&username_from_email(&credentials.email),
					Some(credentials.password.expose()),
					&config.user_scope,
				)
				.await,
		None => Err(ConfigError::MissingUserCredentials.into()),
	}
}
