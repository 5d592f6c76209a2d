//! Crate-wide error types shared by the provider adapter, the transport, and the host flows.

// self
use crate::{_prelude::*, provider::ProviderResponse};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Identity provider reported a failure (HTTP error status or OAuth error payload).
	#[error(transparent)]
	Provider(#[from] ProviderError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Provider response could not be interpreted.
	#[error(transparent)]
	Response(#[from] ResponseError),
	/// Transport failure (DNS, TCP, TLS, IO).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The `state` returned through the redirect does not match the session.
	#[error("Authorization state mismatch.")]
	StateMismatch,
}

/// Failures classified by a provider's response inspection.
///
/// Variants are mutually exclusive per response: the HTTP status check runs first, so a
/// 4xx/5xx response is always [`ProviderError::Client`] even when its body also carries an
/// OAuth `error` field.
#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum ProviderError {
	/// Provider answered with an HTTP status of 400 or above.
	#[error("Provider responded with HTTP {status}: {reason}.")]
	Client {
		/// HTTP status code.
		status: u16,
		/// Canonical reason phrase for the status.
		reason: String,
		/// Raw response body.
		body: String,
		/// Parsed response body.
		parsed: Value,
	},
	/// Provider answered with a well-formed OAuth error payload on a non-error status.
	#[error("Provider returned an OAuth error: {code}.")]
	OAuth {
		/// Machine-readable OAuth `error` code (e.g. `invalid_client`).
		code: String,
		/// Optional human-readable `error_description`.
		description: Option<String>,
		/// HTTP status code that carried the payload.
		status: u16,
	},
}
impl ProviderError {
	/// Builds a [`ProviderError::Client`] from the received response and its parsed body.
	pub fn client(response: &ProviderResponse, parsed: &Value) -> Self {
		Self::Client {
			status: response.status,
			reason: response.reason_phrase().to_owned(),
			body: response.body.clone(),
			parsed: parsed.clone(),
		}
	}

	/// Builds a [`ProviderError::OAuth`] from the received response and its parsed body.
	pub fn oauth(response: &ProviderResponse, parsed: &Value) -> Self {
		let code = match parsed.get("error") {
			Some(Value::String(code)) => code.clone(),
			Some(other) => other.to_string(),
			None => String::new(),
		};
		let description = parsed.get("error_description").and_then(Value::as_str).map(str::to_owned);

		Self::OAuth { code, description, status: response.status }
	}

	/// HTTP status code of the failing response.
	pub fn status(&self) -> u16 {
		match self {
			Self::Client { status, .. } | Self::OAuth { status, .. } => *status,
		}
	}

	/// OAuth `error` code, when the failing response carried one.
	pub fn oauth_error(&self) -> Option<&str> {
		match self {
			Self::Client { parsed, .. } => parsed.get("error").and_then(Value::as_str),
			Self::OAuth { code, .. } => Some(code),
		}
	}

	/// OAuth `error_description`, when the failing response carried one.
	pub fn error_description(&self) -> Option<&str> {
		match self {
			Self::Client { parsed, .. } => parsed.get("error_description").and_then(Value::as_str),
			Self::OAuth { description, .. } => description.as_deref(),
		}
	}
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Provider supplied an endpoint that is not a valid absolute URL.
	#[error("The {endpoint} endpoint is not a valid URL: {url}.")]
	InvalidEndpoint {
		/// Which endpoint failed to parse.
		endpoint: &'static str,
		/// Offending URL string.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Requested scopes cannot be normalized.
	#[error("Requested scopes are invalid.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
	/// An extra authorization parameter collides with one the client sets itself.
	#[error("The `{key}` authorization parameter is set by the client and cannot be overridden.")]
	ReservedParameter {
		/// Offending parameter name.
		key: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Provider responses that cannot be turned into tokens or claims.
#[derive(Debug, ThisError)]
pub enum ResponseError {
	/// Response declared a JSON content type but the body is not valid JSON.
	#[error("Provider returned malformed JSON at `{path}` (HTTP {status}).")]
	InvalidJson {
		/// HTTP status code.
		status: u16,
		/// Location of the parsing failure.
		path: String,
		/// Structured parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// HTTP 500 response whose body is not JSON.
	#[error("An OAuth server error was encountered that did not contain a JSON body.")]
	ServerErrorWithoutJson {
		/// HTTP status code.
		status: u16,
	},
	/// Token and userinfo endpoints must answer with a JSON object.
	#[error("Provider returned a {kind} where a JSON object was expected (HTTP {status}).")]
	NotAnObject {
		/// HTTP status code.
		status: u16,
		/// JSON kind that was received instead.
		kind: &'static str,
	},
	/// Token response omitted a usable `access_token`.
	#[error("Token response is missing access_token.")]
	MissingAccessToken,
	/// Token response carried a non-numeric expiry field.
	#[error("Token response field {field} must be an integer.")]
	InvalidExpiry {
		/// Offending field name (`expires_in` or `expires`).
		field: &'static str,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request timed out before the provider answered.
	#[error("Request timed out while calling the provider.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
	/// HTTP client failed without a structured cause.
	#[error("HTTP client error occurred while calling the provider: {message}.")]
	Other {
		/// Client-supplied failure summary.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn response(status: u16, body: &str) -> ProviderResponse {
		ProviderResponse::new(status, body).with_content_type("application/json")
	}

	#[test]
	fn client_error_exposes_oauth_fields_from_body() {
		let body = r#"{"error":"invalid_client","error_description":"App not found."}"#;
		let parsed: Value = serde_json::from_str(body).expect("Fixture body should be JSON.");
		let err = ProviderError::client(&response(400, body), &parsed);

		assert_eq!(err.status(), 400);
		assert_eq!(err.oauth_error(), Some("invalid_client"));
		assert_eq!(err.error_description(), Some("App not found."));
		assert_eq!(err.to_string(), "Provider responded with HTTP 400: Bad Request.");
	}

	#[test]
	fn oauth_error_stringifies_non_string_codes() {
		let parsed = serde_json::json!({ "error": 42 });
		let err = ProviderError::oauth(&response(200, "{\"error\":42}"), &parsed);

		assert_eq!(err.oauth_error(), Some("42"));
		assert_eq!(err.error_description(), None);
	}
}
