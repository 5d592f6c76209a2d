//! OAuth wire helpers: request construction and transport error mapping.

pub use oauth2;

// crates.io
use oauth2::{
	HttpClientError, HttpRequest,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
	obs::FlowKind,
	provider::TokenParams,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_ACCEPT: &str = "application/json";

/// Maps HTTP transport failures into crate [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport during `flow` into an error.
	fn map_transport_error(&self, flow: FlowKind, error: HttpClientError<E>) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, flow: FlowKind, err: HttpClientError<ReqwestError>) -> Error {
		// Flow label reserved for per-flow policies.
		let _ = flow;

		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(*inner),
			other => map_generic_transport_error(other),
		}
	}
}

/// Shared mapping for the transport-independent [`HttpClientError`] variants.
pub fn map_generic_transport_error<E>(err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::network(*inner).into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { message }.into(),
		_ => TransportError::Other { message: "unrecognized HTTP client failure".into() }.into(),
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}
	if err.is_timeout() {
		return TransportError::timeout(err).into();
	}

	TransportError::from(err).into()
}

/// Builds the form-encoded `POST` sent to the token endpoint.
pub fn token_request(url: &Url, params: &TokenParams) -> Result<HttpRequest> {
	let body = url::form_urlencoded::Serializer::new(String::new()).extend_pairs(params).finish();
	let request = Request::builder()
		.method(Method::POST)
		.uri(url.as_str())
		.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
		.header(ACCEPT, JSON_ACCEPT)
		.body(body.into_bytes())
		.map_err(ConfigError::from)?;

	Ok(request)
}

/// Builds the authenticated `GET` sent to the userinfo endpoint.
pub fn resource_owner_request(url: &Url, authorization: Option<&str>) -> Result<HttpRequest> {
	let mut builder = Request::builder().method(Method::GET).uri(url.as_str()).header(ACCEPT, JSON_ACCEPT);

	if let Some(value) = authorization {
		builder = builder.header(AUTHORIZATION, value);
	}

	builder.body(Vec::new()).map_err(|e| ConfigError::from(e).into())
}

/// Parses a provider-supplied endpoint string.
pub fn parse_endpoint(endpoint: &'static str, url: String) -> Result<Url> {
	Url::parse(&url)
		.map_err(|source| ConfigError::InvalidEndpoint { endpoint, url, source }.into())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Failed to parse test endpoint URL.")
	}

	#[test]
	fn token_request_encodes_form_body() {
		let mut params = TokenParams::new();

		params.insert("grant_type".into(), "authorization_code".into());
		params.insert("redirect_uri".into(), "https://app.example.com/cb?x=1".into());

		let request = token_request(&url("https://api.privacyportal.org/oauth/token"), &params)
			.expect("Token request should build.");

		assert_eq!(request.method(), &Method::POST);
		assert_eq!(request.uri(), "https://api.privacyportal.org/oauth/token");
		assert_eq!(
			request.headers().get(CONTENT_TYPE).map(|value| value.as_bytes()),
			Some(FORM_CONTENT_TYPE.as_bytes())
		);
		assert_eq!(
			String::from_utf8_lossy(request.body()),
			"grant_type=authorization_code&redirect_uri=https%3A%2F%2Fapp.example.com%2Fcb%3Fx%3D1"
		);
	}

	#[test]
	fn resource_owner_request_carries_authorization() {
		let request = resource_owner_request(
			&url("https://api.privacyportal.org/oauth/userinfo"),
			Some("Bearer abc"),
		)
		.expect("Userinfo request should build.");

		assert_eq!(request.method(), &Method::GET);
		assert_eq!(
			request.headers().get(AUTHORIZATION).map(|value| value.as_bytes()),
			Some("Bearer abc".as_bytes())
		);

		let anonymous = resource_owner_request(&url("https://api.privacyportal.org/oauth/userinfo"), None)
			.expect("Userinfo request should build.");

		assert!(anonymous.headers().get(AUTHORIZATION).is_none());
	}

	#[test]
	fn invalid_endpoints_surface_config_errors() {
		let err = parse_endpoint("token", "not a url".into()).expect_err("Relative URL must fail.");

		assert!(matches!(err, Error::Config(ConfigError::InvalidEndpoint { endpoint: "token", .. })));
	}
}
