//! Walks an anonymous shopper through a cached buyer session, then signs them in and reads
//! their profile, all against a local mock backend.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use commerce_broker::{
	cache::MemoryTokenCache,
	config::{
		CommerceConfig, ENV_BUYER_CLIENT_ID, ENV_COMMERCE_URL, ENV_MIDDLEWARE_CLIENT_ID,
	},
	fetch::{FetchOptions, Fetcher},
	ops,
	reqwest::Method,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let anonymous_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth/token")
				.body("client_id=demo-buyer&grant_type=client_credentials");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"demo-anonymous\",\"token_type\":\"bearer\"}");
		})
		.await;
	let password_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token").body(
				"client_id=demo-buyer&username=demo&password=demo-password&grant_type=password\
				 &scope=BuyerImpersonation+MeAdmin+MeCreditCardAdmin+PromotionReader+Shopper",
			);
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"demo-shopper\",\"token_type\":\"bearer\"}");
		})
		.await;
	let _products_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v1/me/products")
				.header("authorization", "Bearer demo-anonymous");
			then.status(200).body("{\"Items\":[{\"ID\":\"tee\"}]}");
		})
		.await;
	let _me_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/me").header("authorization", "Bearer demo-shopper");
			then.status(200).body("{\"ID\":\"demo\",\"Email\":\"demo@shop.test\",\"Active\":true}");
		})
		.await;
	let base_url = server.base_url();
	let config = CommerceConfig::from_env_with(|name| match name {
		ENV_COMMERCE_URL => Some(base_url.clone()),
		ENV_MIDDLEWARE_CLIENT_ID => Some("demo-middleware".into()),
		ENV_BUYER_CLIENT_ID => Some("demo-buyer".into()),
		_ => None,
	})?;
	let cache = MemoryTokenCache::default();
	let buyer = Fetcher::buyer(config.clone(), Arc::new(cache.clone()));

	for _ in 0..2 {
		let products = buyer
			.fetch_without_body::<serde_json::Value>(
				Method::GET,
				"/me/products",
				FetchOptions::default(),
			)
			.await?;

		println!("Anonymous catalog: {}.", products.data.unwrap_or_default());
	}

	anonymous_mock.assert_calls_async(1).await;

	let user = Fetcher::user(config);
	let session = ops::login(&user, "demo@shop.test", "demo-password").await?;

	println!("Set-Cookie: {}", session.cookie.render());

	let customer = ops::logged_in_customer(&user, Some(session.token)).await?;

	println!("Signed in as {} <{}>.", customer.id, customer.email);

	password_mock.assert_calls_async(1).await;

	Ok(())
}
