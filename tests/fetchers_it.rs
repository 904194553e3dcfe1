mod common;

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use serde::{Deserialize, Serialize};
// self
use commerce_broker::{
	auth::TokenSecret,
	cache::{MemoryTokenCache, TokenCache},
	config::CommerceConfig,
	error::{ConfigError, Error},
	fetch::{FetchOptions, Fetcher},
	reqwest::Method,
};
use common::*;

#[derive(Debug, PartialEq, Deserialize)]
struct User {
	#[serde(rename = "ID")]
	id: String,
	#[serde(rename = "Email")]
	email: String,
}

#[derive(Serialize)]
struct NewUser<'a> {
	#[serde(rename = "ID")]
	id: &'a str,
	#[serde(rename = "Email")]
	email: &'a str,
}

#[tokio::test]
async fn middleware_posts_with_fresh_service_token() {
	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token").body(SERVICE_GRANT_FORM);
			then.status(200).body(token_body("svc-token"));
		})
		.await;
	let create_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/v1/buyers/B1/users")
				.header("authorization", "Bearer svc-token")
				.body("{\"ID\":\"jdoe\",\"Email\":\"j@doe.com\"}");
			then.status(201).body("{\"ID\":\"jdoe\",\"Email\":\"j@doe.com\"}");
		})
		.await;
	let fetcher = Fetcher::middleware(build_config(&server));
	let body = NewUser { id: "jdoe", email: "j@doe.com" };

	for _ in 0..2 {
		let fetched = fetcher
			.fetch::<User, _>(Method::POST, "/buyers/B1/users", Some(&body), FetchOptions::default())
			.await
			.expect("Middleware fetch should succeed.");

		assert_eq!(fetched.data, Some(User { id: "jdoe".into(), email: "j@doe.com".into() }));
		assert!(fetched.meta.is_none());
	}

	token_mock.assert_calls_async(2).await;
	create_mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn buyer_reuses_cached_anonymous_token() {
	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token").body(ANONYMOUS_GRANT_FORM);
			then.status(200).body(token_body("anon-token"));
		})
		.await;
	let products_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/me/products").header("authorization", "Bearer anon-token");
			then.status(200).body("{\"Items\":[]}");
		})
		.await;
	let cache = MemoryTokenCache::default();
	let fetcher = Fetcher::buyer(build_config(&server), Arc::new(cache.clone()));

	for _ in 0..2 {
		let fetched = fetcher
			.fetch_without_body::<serde_json::Value>(
				Method::GET,
				"/me/products",
				FetchOptions::default(),
			)
			.await
			.expect("Buyer fetch should succeed.");

		assert_eq!(fetched.token().map(TokenSecret::expose), Some("anon-token"));
	}

	token_mock.assert_calls_async(1).await;
	products_mock.assert_calls_async(2).await;
	assert_eq!(
		cache.snapshot().map(|cached| cached.token.expose().to_owned()).as_deref(),
		Some("anon-token")
	);
}

#[tokio::test]
async fn buyer_explicit_token_overwrites_cache() {
	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200).body(token_body("anon-token"));
		})
		.await;
	let cart_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/cart").header("authorization", "Bearer shopper-token");
			then.status(200).body("{\"ID\":\"c1\"}");
		})
		.await;
	let cache = MemoryTokenCache::with_token(TokenSecret::new("stale-token"));
	let shared: Arc<dyn TokenCache> = Arc::new(cache.clone());
	let fetcher = Fetcher::buyer(build_config(&server), shared.clone());
	let fetched = fetcher
		.fetch_without_body::<serde_json::Value>(
			Method::GET,
			"/cart",
			FetchOptions::default().with_token("shopper-token"),
		)
		.await
		.expect("Buyer fetch with explicit token should succeed.");

	assert_eq!(fetched.token().map(TokenSecret::expose), Some("shopper-token"));

	let fetched = fetcher
		.fetch_without_body::<serde_json::Value>(Method::GET, "/cart", FetchOptions::default())
		.await
		.expect("Follow-up buyer fetch should reuse the override.");

	assert_eq!(fetched.token().map(TokenSecret::expose), Some("shopper-token"));

	token_mock.assert_calls_async(0).await;
	cart_mock.assert_calls_async(2).await;

	let cached = shared
		.get()
		.await
		.expect("Cache read should succeed.")
		.expect("Cache should hold the override.");

	assert_eq!(cached.token.expose(), "shopper-token");
}

#[tokio::test]
async fn buyer_grant_failure_leaves_cache_empty() {
	let server = MockServer::start_async().await;
	let _token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(401).body("{\"error\":\"invalid_client\"}");
		})
		.await;
	let resource_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/me/products");
			then.status(200).body("{}");
		})
		.await;
	let cache = MemoryTokenCache::default();
	let fetcher = Fetcher::buyer(build_config(&server), Arc::new(cache.clone()));
	let err = fetcher
		.fetch_without_body::<serde_json::Value>(Method::GET, "/me/products", FetchOptions::default())
		.await
		.expect_err("Rejected anonymous grant should fail the fetch.");

	assert!(matches!(err, Error::TokenAcquisition(ref e) if e.status == 401));
	assert!(cache.snapshot().is_none());

	resource_mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn user_fetch_exchanges_credentials_and_returns_token() {
	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token").body(password_grant_form("jdoe", "pw"));
			then.status(200).body(token_body("user-token"));
		})
		.await;
	let me_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/me").header("authorization", "Bearer user-token");
			then.status(200).body("{\"ID\":\"jdoe\",\"Email\":\"j.doe@x.com\"}");
		})
		.await;
	let fetcher = Fetcher::user(build_config(&server));
	let fetched = fetcher
		.fetch_without_body::<User>(
			Method::GET,
			"/me",
			FetchOptions::default().with_credentials("j.doe@x.com", "pw"),
		)
		.await
		.expect("User fetch should succeed.");

	assert_eq!(fetched.token().map(TokenSecret::expose), Some("user-token"));
	assert_eq!(fetched.data.map(|user| user.id).as_deref(), Some("jdoe"));

	token_mock.assert_calls_async(1).await;
	me_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn user_fetch_with_token_skips_exchange() {
	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200).body(token_body("unused"));
		})
		.await;
	let me_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/me").header("authorization", "Bearer cookie-token");
			then.status(200).body("");
		})
		.await;
	let fetcher = Fetcher::user(build_config(&server));
	let fetched = fetcher
		.fetch_without_body::<User>(
			Method::GET,
			"/me",
			FetchOptions::default().with_token("cookie-token").with_credentials("a@b.com", "pw"),
		)
		.await
		.expect("User fetch with token should succeed.");

	assert_eq!(fetched.data, None);
	assert_eq!(fetched.token().map(TokenSecret::expose), Some("cookie-token"));

	token_mock.assert_calls_async(0).await;
	me_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn user_fetch_without_credentials_sends_nothing() {
	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200).body(token_body("unused"));
		})
		.await;
	let me_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/me");
			then.status(200).body("{}");
		})
		.await;
	let fetcher = Fetcher::user(build_config(&server));
	let err = fetcher
		.fetch_without_body::<serde_json::Value>(
			Method::GET,
			"/me",
			FetchOptions::default().with_credentials("a@b.com", ""),
		)
		.await
		.expect_err("Incomplete credentials should fail.");

	assert!(matches!(err, Error::Config(ConfigError::MissingUserCredentials)));

	token_mock.assert_calls_async(0).await;
	me_mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn config_source_is_resolved_per_call() {
	let server = MockServer::start_async().await;
	let _token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200).body(token_body("svc-token"));
		})
		.await;
	let v2_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/catalogs");
			then.status(200).body("[]");
		})
		.await;
	let base = build_config(&server);
	let source = move || CommerceConfig { api_version: "v2".into(), ..base.clone() };
	let fetched = Fetcher::middleware(source)
		.fetch_without_body::<Vec<serde_json::Value>>(
			Method::GET,
			"/catalogs",
			FetchOptions::default(),
		)
		.await
		.expect("Fetch through a closure source should succeed.");

	assert_eq!(fetched.data, Some(Vec::new()));

	v2_mock.assert_calls_async(1).await;
}
