//! Authenticated JSON request executor.
//!
//! [`RestExecutor`] performs exactly one HTTP call per invocation and normalizes the outcome:
//! success bodies decode into the caller's type (or `None` when there is nothing to decode),
//! failures become [`RequestError`] with the backend's entries preserved.

// crates.io
use reqwest::{
	StatusCode,
	header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	config::CommerceConfig,
	error::{ConfigError, ErrorEntry, ParseError, RequestError, TransportError},
	http::ReqwestHttpClient,
};

const JSON: &str = "application/json";
const ACCEPT_ANY: &str = "application/json, text/plain, */*";

/// Issues bearer-authenticated JSON calls against `{base}/{api_version}{path}`.
#[derive(Clone, Debug, Default)]
pub struct RestExecutor {
	http: ReqwestHttpClient,
}
impl RestExecutor {
	/// Creates an executor over the provided transport.
	pub fn new(http: impl Into<ReqwestHttpClient>) -> Self {
		Self { http: http.into() }
	}

	/// Performs one call with `token`.
	///
	/// `headers` are sent first; `Content-Type`, `Accept`, and `Authorization` are always
	/// overwritten by the executor's own values. Returns `Ok(None)` when the success body is
	/// empty, not JSON, or JSON `null`.
	pub async fn execute<T, B>(
		&self,
		config: &CommerceConfig,
		token: &TokenSecret,
		method: Method,
		path: &str,
		body: Option<&B>,
		headers: &HeaderMap,
	) -> Result<Option<T>>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		let url = config.resource_url(path)?;
		let mut request = self.http.request(method, url).headers(merge_headers(headers, token)?);

		if let Some(body) = body {
			request = request.body(serde_json::to_vec(body).map_err(ParseError::RequestBody)?);
		}

		let response = request.send().await.map_err(|e| TransportError::network(path, e))?;
		let status = response.status();

		if !status.is_success() {
			let text = response.text().await.map_err(|e| TransportError::network(path, e))?;

			return Err(request_error(status, text).into());
		}

		let bytes = response.bytes().await.map_err(|e| TransportError::network(path, e))?;

		decode_success(&bytes)
	}
}

fn merge_headers(extra: &HeaderMap, token: &TokenSecret) -> Result<HeaderMap, ConfigError> {
	let mut headers = extra.clone();
	let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token.expose()))
		.map_err(|_| ConfigError::InvalidHeader { name: "authorization" })?;

	bearer.set_sensitive(true);
	headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
	headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_ANY));
	headers.insert(AUTHORIZATION, bearer);

	Ok(headers)
}

fn decode_success<T>(bytes: &[u8]) -> Result<Option<T>>
where
	T: DeserializeOwned,
{
	if bytes.iter().all(u8::is_ascii_whitespace) {
		return Ok(None);
	}

	let value = match serde_json::from_slice::<serde_json::Value>(bytes) {
		Ok(value) => value,
		Err(e) => {
			#[cfg(feature = "tracing")]
			tracing::debug!(error = %e, len = bytes.len(), "Success body is not JSON; returning no data.");
			#[cfg(not(feature = "tracing"))]
			let _ = e;

			return Ok(None);
		},
	};

	if value.is_null() {
		return Ok(None);
	}

	serde_path_to_error::deserialize(value)
		.map(Some)
		.map_err(|source| ParseError::ResponseBody { source }.into())
}

#[derive(Deserialize)]
struct ErrorsBody {
	#[serde(rename = "Errors")]
	errors: Vec<ErrorsBodyEntry>,
}

#[derive(Deserialize)]
struct ErrorsBodyEntry {
	#[serde(rename = "ErrorCode", default)]
	error_code: Option<String>,
	#[serde(rename = "Message", default)]
	message: Option<String>,
}

/// Builds the uniform error for a non-success response body.
///
/// A body shaped like `{"Errors": [{"ErrorCode": .., "Message": ..}]}` keeps one entry per
/// backend error with its code. Anything else becomes a single entry holding the verbatim body,
/// or the status reason when the body is empty.
pub(crate) fn request_error(status: StatusCode, text: String) -> RequestError {
	let structured = serde_json::from_str::<ErrorsBody>(&text)
		.ok()
		.map(|body| {
			body.errors
				.into_iter()
				.filter_map(|entry| {
					let message = entry.message.or_else(|| entry.error_code.clone())?;

					Some(ErrorEntry { message, code: entry.error_code })
				})
				.collect::<Vec<_>>()
		})
		.filter(|entries| !entries.is_empty());
	let errors = structured.unwrap_or_else(|| {
		let message = if text.is_empty() {
			status
				.canonical_reason()
				.map(str::to_owned)
				.unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
		} else {
			text
		};

		vec![ErrorEntry::message(message)]
	});

	RequestError { status: status.as_u16(), errors }
}
