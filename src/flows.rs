//! Authorization-code client that drives a [`Provider`] adapter.
//!
//! The client owns the generic half of the OAuth exchange (redirect construction, state and
//! PKCE generation, token requests, userinfo requests, body parsing) and calls back into
//! the provider at exactly two points: to classify every response and to wrap the userinfo
//! payload. It never stores tokens and keeps no per-user state.

pub mod access_token;
pub mod authorization;
pub mod common;
pub mod resource_owner;

pub use authorization::*;

// self
use crate::{_prelude::*, http::ProviderHttpClient, oauth::TransportErrorMapper, provider::Provider};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper, provider::PrivacyPortal};

#[cfg(feature = "reqwest")]
/// PrivacyPortal client specialized for the crate's default reqwest transport stack.
pub type PrivacyPortalClient =
	ProviderClient<PrivacyPortal, ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// OAuth client registration shared by every request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientOptions {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// Client secret for confidential clients.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client_secret: Option<String>,
	/// Redirect URI registered with the provider.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub redirect_uri: Option<Url>,
}
impl ClientOptions {
	/// Creates options for a public client.
	pub fn new(client_id: impl Into<String>) -> Self {
		Self { client_id: client_id.into(), client_secret: None, redirect_uri: None }
	}

	/// Sets or replaces the client secret.
	pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
		self.client_secret = Some(secret.into());

		self
	}

	/// Sets or replaces the redirect URI.
	pub fn with_redirect_uri(mut self, redirect_uri: Url) -> Self {
		self.redirect_uri = Some(redirect_uri);

		self
	}
}
impl Debug for ClientOptions {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientOptions")
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("redirect_uri", &self.redirect_uri)
			.finish()
	}
}

/// Drives the authorization-code flow against a single provider adapter.
pub struct ProviderClient<P, C, M>
where
	P: Provider,
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Provider adapter supplying endpoints, classification, and resource owner mapping.
	pub provider: Arc<P>,
	/// Client registration.
	pub options: ClientOptions,
	/// HTTP client used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
}
impl<P, C, M> ProviderClient<P, C, M>
where
	P: Provider,
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		provider: impl Into<Arc<P>>,
		options: ClientOptions,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			provider: provider.into(),
			options,
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
		}
	}
}
#[cfg(feature = "reqwest")]
impl<P> ProviderClient<P, ReqwestHttpClient, ReqwestTransportErrorMapper>
where
	P: Provider,
{
	/// Creates a client backed by a default reqwest transport.
	pub fn new(provider: impl Into<Arc<P>>, options: ClientOptions) -> Self {
		Self::with_http_client(
			provider,
			options,
			ReqwestHttpClient::default(),
			ReqwestTransportErrorMapper,
		)
	}
}
impl<P, C, M> Clone for ProviderClient<P, C, M>
where
	P: Provider,
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			provider: self.provider.clone(),
			options: self.options.clone(),
			http_client: self.http_client.clone(),
			transport_mapper: self.transport_mapper.clone(),
		}
	}
}
impl<P, C, M> Debug for ProviderClient<P, C, M>
where
	P: Provider,
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ProviderClient").field("options", &self.options).finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn options_deserialize_and_redact_secret() {
		let options: ClientOptions = serde_json::from_str(
			r#"{"client_id":"mock_client_id","client_secret":"mock_secret","redirect_uri":"https://app.example.com/cb"}"#,
		)
		.expect("Client options should deserialize.");

		assert_eq!(options.client_id, "mock_client_id");
		assert_eq!(options.client_secret.as_deref(), Some("mock_secret"));
		assert_eq!(
			options.redirect_uri.as_ref().map(Url::as_str),
			Some("https://app.example.com/cb")
		);
		assert!(!format!("{options:?}").contains("mock_secret"));

		let public: ClientOptions =
			serde_json::from_str(r#"{"client_id":"public"}"#).expect("Public options should deserialize.");

		assert_eq!(public, ClientOptions::new("public"));
	}
}
