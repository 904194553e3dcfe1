//! Broker-level error types shared across grants, fetchers, and caches.

// self
use crate::{_prelude::*, oauth::GrantType};

/// Broker-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical broker error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Token cache failure.
	#[error("{0}")]
	Cache(
		#[from]
		#[source]
		crate::cache::CacheError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// A body could not be encoded or decoded.
	#[error(transparent)]
	Parse(#[from] ParseError),

	/// Token endpoint rejected the grant.
	#[error(transparent)]
	TokenAcquisition(#[from] TokenAcquisitionError),
	/// Resource endpoint answered with a non-success status.
	#[error(transparent)]
	Request(#[from] RequestError),
}
impl Error {
	/// Returns the backend status for acquisition and request failures.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::TokenAcquisition(e) => Some(e.status),
			Self::Request(e) => Some(e.status),
			Self::Parse(ParseError::TokenResponse { status, .. }) => Some(*status),
			_ => None,
		}
	}

	/// Borrows the inner [`RequestError`], if this is a resource failure.
	pub fn as_request(&self) -> Option<&RequestError> {
		match self {
			Self::Request(e) => Some(e),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised before any request is sent.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Endpoint URL could not be assembled.
	#[error("Endpoint URL `{url}` is invalid.")]
	InvalidEndpoint {
		/// The URL that failed to parse.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A header value contains characters HTTP does not allow.
	#[error("Header `{name}` has an invalid value.")]
	InvalidHeader {
		/// Header name.
		name: &'static str,
	},
	/// The user strategy had neither a token nor credentials to work with.
	#[error("User fetch requires either a token or an email and password.")]
	MissingUserCredentials,
	/// The operation needs a buyer organization id but none is configured.
	#[error("Configuration does not define a buyer id.")]
	MissingBuyerId,
	/// Configuration values failed validation.
	#[error(transparent)]
	Build(#[from] crate::config::ConfigBuildError),
	/// Request scopes cannot be normalized.
	#[error("Requested scopes are invalid.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling `{endpoint}`.")]
	Network {
		/// Endpoint label (`token` or the resource path).
		endpoint: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(
		endpoint: impl Into<String>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { endpoint: endpoint.into(), source: Box::new(src) }
	}
}

/// Encoding and decoding failures.
#[derive(Debug, ThisError)]
pub enum ParseError {
	/// Token endpoint responded with a body that could not be parsed.
	#[error("Token endpoint returned malformed JSON.")]
	TokenResponse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Resource response is JSON but does not match the requested type.
	#[error("Response body does not match the expected shape.")]
	ResponseBody {
		/// Structured decoding failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	RequestBody(#[source] serde_json::Error),
}

/// Token endpoint rejected a grant.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Token endpoint rejected the {grant} grant with status {status}: {message}.")]
pub struct TokenAcquisitionError {
	/// Grant that was attempted.
	pub grant: GrantType,
	/// Backend-reported status.
	pub status: u16,
	/// Backend-reported description.
	pub message: String,
}

/// A single backend error entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
	/// Message text, preserved verbatim from the backend.
	pub message: String,
	/// Structured error code, when the backend supplied one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub code: Option<String>,
}
impl ErrorEntry {
	/// Creates an entry without a code.
	pub fn message(message: impl Into<String>) -> Self {
		Self { message: message.into(), code: None }
	}

	/// Attaches a structured code.
	pub fn with_code(mut self, code: impl Into<String>) -> Self {
		self.code = Some(code.into());

		self
	}
}

/// Resource endpoint answered with a non-success status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestError {
	/// HTTP status code.
	pub status: u16,
	/// Ordered error entries; never empty when produced by the executor.
	pub errors: Vec<ErrorEntry>,
}
impl RequestError {
	/// Returns the first entry's message.
	pub fn first_message(&self) -> Option<&str> {
		self.errors.first().map(|entry| entry.message.as_str())
	}

	/// Checks whether any entry carries exactly this code.
	pub fn has_code(&self, code: &str) -> bool {
		self.errors.iter().any(|entry| entry.code.as_deref() == Some(code))
	}

	/// Checks entries for `needle`, matching codes first and message text second.
	///
	/// Backends that return plain-text errors only expose their codes inside the message, so
	/// the text fallback keeps classification working for them.
	pub fn mentions(&self, needle: &str) -> bool {
		self.has_code(needle) || self.errors.iter().any(|entry| entry.message.contains(needle))
	}
}
impl Display for RequestError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(
			f,
			"Request failed with status {}: {}.",
			self.status,
			self.first_message().unwrap_or("no details")
		)
	}
}
impl StdError for RequestError {}
