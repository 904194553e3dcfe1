//! Fixtures shared by the integration tests.

#![allow(dead_code)]

// crates.io
use httpmock::prelude::*;
// self
use commerce_broker::{
	auth::{BuyerId, ClientId},
	config::CommerceConfig,
	url::Url,
};

pub const MIDDLEWARE_CLIENT_ID: &str = "middleware-client";
pub const MIDDLEWARE_CLIENT_SECRET: &str = "middleware-secret";
pub const BUYER_CLIENT_ID: &str = "buyer-client";
pub const BUYER_ID: &str = "B1";

/// Form the middleware client sends for a service token.
pub const SERVICE_GRANT_FORM: &str =
	"client_id=middleware-client&client_secret=middleware-secret&grant_type=client_credentials";
/// Form the buyer client sends for an anonymous token.
pub const ANONYMOUS_GRANT_FORM: &str = "client_id=buyer-client&grant_type=client_credentials";

/// Form the buyer client sends for a shopper password grant with the default scopes.
pub fn password_grant_form(username: &str, password: &str) -> String {
	format!(
		"client_id=buyer-client&username={username}&password={password}&grant_type=password\
		 &scope=BuyerImpersonation+MeAdmin+MeCreditCardAdmin+PromotionReader+Shopper"
	)
}

/// Successful token endpoint body.
pub fn token_body(token: &str) -> String {
	format!("{{\"access_token\":\"{token}\",\"token_type\":\"bearer\",\"expires_in\":600}}")
}

/// Configuration pointing every endpoint at `server`.
pub fn build_config(server: &MockServer) -> CommerceConfig {
	CommerceConfig::builder(
		Url::parse(&server.base_url()).expect("Mock server URL should parse successfully."),
	)
	.middleware_client_id(
		ClientId::new(MIDDLEWARE_CLIENT_ID).expect("Middleware client id should be valid."),
	)
	.middleware_client_secret(MIDDLEWARE_CLIENT_SECRET)
	.buyer_client_id(ClientId::new(BUYER_CLIENT_ID).expect("Buyer client id should be valid."))
	.buyer_id(BuyerId::new(BUYER_ID).expect("Buyer id should be valid."))
	.build()
	.expect("Mock configuration should build successfully.")
}
