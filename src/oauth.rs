//! Credential grant client for the backend's token endpoint.
//!
//! Every exchange is a form-encoded `POST {base}/oauth/token`. Error bodies come in two shapes:
//! the OAuth-standard `{"error": .., "error_description": "text"}` and the backend's richer
//! `{"error_description": {"Code": .., "HttpStatus": .., "Message": ..}}`. Both map into
//! [`TokenAcquisitionError`]; a body that is not JSON at all is a [`ParseError`].

// crates.io
use reqwest::{StatusCode, header::ACCEPT};
// self
use crate::{
	_prelude::*,
	auth::{ClientId, ScopeSet, TokenSecret},
	error::{ConfigError, ParseError, TokenAcquisitionError, TransportError},
	http::ReqwestHttpClient,
	obs::{self, FlowOutcome, FlowSpan},
};

/// Grant types issued by the broker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Client Credentials grant for service and anonymous buyer tokens.
	ClientCredentials,
	/// Resource Owner Password grant for shopper tokens.
	Password,
}
impl GrantType {
	/// Returns the RFC 6749 identifier for the grant type.
	pub const fn as_str(self) -> &'static str {
		match self {
			GrantType::ClientCredentials => "client_credentials",
			GrantType::Password => "password",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Builds `{base_url}/oauth/token`.
pub fn token_endpoint(base_url: &str) -> Result<Url, ConfigError> {
	let url = format!("{}/oauth/token", base_url.trim_end_matches('/'));

	Url::parse(&url).map_err(|source| ConfigError::InvalidEndpoint { url, source })
}

/// Exchanges client or shopper credentials for bearer tokens.
///
/// The client holds no token state; caching is the caller's concern.
#[derive(Clone, Debug, Default)]
pub struct GrantClient {
	http: ReqwestHttpClient,
}
impl GrantClient {
	/// Creates a grant client over the provided transport.
	pub fn new(http: impl Into<ReqwestHttpClient>) -> Self {
		Self { http: http.into() }
	}

	/// Performs the `client_credentials` grant.
	///
	/// `client_secret` is omitted from the form when absent, which is how public buyer clients
	/// obtain anonymous tokens.
	pub async fn service_token(
		&self,
		base_url: &str,
		client_id: &ClientId,
		client_secret: Option<&str>,
	) -> Result<TokenSecret> {
		let grant = GrantType::ClientCredentials;
		let mut form = vec![("client_id", client_id.as_ref())];

		if let Some(secret) = client_secret {
			form.push(("client_secret", secret));
		}

		form.push(("grant_type", grant.as_str()));

		self.exchange(base_url, grant, &form).await
	}

	/// Performs the `password` grant for a shopper.
	pub async fn user_token(
		&self,
		base_url: &str,
		client_id: &ClientId,
		username: &str,
		password: Option<&str>,
		scope: &ScopeSet,
	) -> Result<TokenSecret> {
		let grant = GrantType::Password;
		let scope = scope.normalized();
		let mut form = vec![("client_id", client_id.as_ref()), ("username", username)];

		if let Some(password) = password {
			form.push(("password", password));
		}

		form.push(("grant_type", grant.as_str()));
		form.push(("scope", scope.as_str()));

		self.exchange(base_url, grant, &form).await
	}

	async fn exchange(
		&self,
		base_url: &str,
		grant: GrantType,
		form: &[(&str, &str)],
	) -> Result<TokenSecret> {
		let span = FlowSpan::grant(grant);

		obs::record_grant_outcome(grant, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let endpoint = token_endpoint(base_url)?;
				let response = self
					.http
					.post(endpoint)
					.header(ACCEPT, "application/json")
					.form(form)
					.send()
					.await
					.map_err(|e| TransportError::network("oauth/token", e))?;
				let status = response.status();
				let body =
					response.bytes().await.map_err(|e| TransportError::network("oauth/token", e))?;

				if !status.is_success() {
					let error = parse_token_body::<TokenErrorBody>(&body, status)?;

					return Err(error.into_acquisition_error(grant, status).into());
				}

				let success = parse_token_body::<TokenSuccessBody>(&body, status)?;

				Ok(TokenSecret::new(success.access_token))
			})
			.await;

		match &result {
			Ok(_) => obs::record_grant_outcome(grant, FlowOutcome::Success),
			Err(_) => obs::record_grant_outcome(grant, FlowOutcome::Failure),
		}

		result
	}
}

#[derive(Deserialize)]
struct TokenSuccessBody {
	access_token: String,
}

#[derive(Deserialize)]
struct TokenErrorBody {
	#[serde(default)]
	error: Option<String>,
	#[serde(default)]
	error_description: Option<ErrorDescription>,
}
impl TokenErrorBody {
	fn into_acquisition_error(self, grant: GrantType, status: StatusCode) -> TokenAcquisitionError {
		let transport_status = status.as_u16();
		let (reported_status, message) = match self.error_description {
			Some(ErrorDescription::Detailed(detail)) =>
				(detail.http_status, detail.code.or(detail.message)),
			Some(ErrorDescription::Text(text)) => (None, Some(text)),
			None => (None, None),
		};
		let message = message
			.or(self.error)
			.or_else(|| status.canonical_reason().map(str::to_owned))
			.unwrap_or_else(|| format!("HTTP {transport_status}"));

		TokenAcquisitionError {
			grant,
			status: reported_status.unwrap_or(transport_status),
			message,
		}
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorDescription {
	Detailed(DetailedDescription),
	Text(String),
}

#[derive(Deserialize)]
struct DetailedDescription {
	#[serde(rename = "Code", default)]
	code: Option<String>,
	#[serde(rename = "HttpStatus", default)]
	http_status: Option<u16>,
	#[serde(rename = "Message", default)]
	message: Option<String>,
}

fn parse_token_body<T>(body: &[u8], status: StatusCode) -> Result<T, ParseError>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| ParseError::TokenResponse { source, status: status.as_u16() })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn acquisition_error(body: &str, status: u16) -> TokenAcquisitionError {
		let status = StatusCode::from_u16(status).expect("Fixture status should be valid.");

		parse_token_body::<TokenErrorBody>(body.as_bytes(), status)
			.expect("Fixture error body should parse.")
			.into_acquisition_error(GrantType::Password, status)
	}

	#[test]
	fn detailed_description_wins_over_transport_status() {
		let err = acquisition_error(
			"{\"error\":\"invalid_grant\",\"error_description\":{\"Code\":\"InvalidUsernameOrPassword\",\"HttpStatus\":401}}",
			400,
		);

		assert_eq!(err.status, 401);
		assert_eq!(err.message, "InvalidUsernameOrPassword");
		assert_eq!(err.grant, GrantType::Password);
	}

	#[test]
	fn text_description_and_bare_errors_fall_back() {
		let err = acquisition_error(
			"{\"error\":\"invalid_client\",\"error_description\":\"Unknown client.\"}",
			401,
		);

		assert_eq!((err.status, err.message.as_str()), (401, "Unknown client."));

		let err = acquisition_error("{\"error\":\"invalid_client\"}", 401);

		assert_eq!(err.message, "invalid_client");

		let err = acquisition_error("{}", 503);

		assert_eq!((err.status, err.message.as_str()), (503, "Service Unavailable"));
	}

	#[test]
	fn malformed_bodies_report_the_failing_path() {
		let err = parse_token_body::<TokenSuccessBody>(b"{\"access_token\":42}", StatusCode::OK)
			.err()
			.expect("Numeric access token should be rejected.");

		match err {
			ParseError::TokenResponse { source, status } => {
				assert_eq!(status, 200);
				assert_eq!(source.path().to_string(), "access_token");
			},
			other => panic!("Unexpected parse error: {other:?}."),
		}
	}

	#[test]
	fn token_endpoint_trims_trailing_slash() {
		assert_eq!(
			token_endpoint("https://x/").expect("Endpoint should parse.").as_str(),
			"https://x/oauth/token"
		);
	}
}
