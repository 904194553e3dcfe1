//! Password-grant login that hands the shopper token back as a session cookie.

// self
use crate::{_prelude::*, auth::TokenSecret, fetch::Fetcher, session::SessionCookie};

/// Token minted by a successful login together with the cookie that carries it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginOutcome {
	/// Shopper token from the password grant.
	pub token: TokenSecret,
	/// Cookie the host should send back as `Set-Cookie`.
	pub cookie: SessionCookie,
}

/// Logs a shopper in with the password grant.
///
/// The token is not cached; persisting it is the cookie's job.
pub async fn login(fetcher: &Fetcher, email: &str, password: &str) -> Result<LoginOutcome> {
	let token = fetcher.user_token(email, password).await?;
	let cookie = SessionCookie::new(&fetcher.config(), token.clone());

	Ok(LoginOutcome { token, cookie })
}
