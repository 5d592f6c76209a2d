//! Provider capabilities (data + behavior) and the PrivacyPortal adapter.
//!
//! A host client only ever talks to an identity provider through three capabilities:
//! [`ProviderConfig`] supplies endpoints, scopes, and the token authorization header,
//! [`ResponseClassifier`] decides whether a received response is an error, and
//! [`ResourceOwnerFactory`] wraps the userinfo payload into a domain object. Anything that
//! implements all three is a [`Provider`]; nothing here performs I/O.

pub mod grant;
pub mod privacy_portal;
pub mod response;

pub use grant::*;
pub use privacy_portal::*;
pub use response::*;

// self
use crate::{_prelude::*, auth::AccessToken, error::ProviderError};

/// Ordered claim mapping as returned by the provider (keys keep their response order).
pub type Claims = Map<String, Value>;
/// Form parameters sent to the token endpoint.
pub type TokenParams = BTreeMap<String, String>;

/// Endpoint and scope configuration consumed by the authorization-code flow.
pub trait ProviderConfig: Send + Sync {
	/// Authorization endpoint users are redirected to.
	fn base_authorization_url(&self) -> String;

	/// Token endpoint for the grant described by `params`.
	fn base_access_token_url(&self, params: &TokenParams) -> String;

	/// Userinfo endpoint for the supplied token.
	fn resource_owner_details_url(&self, token: &AccessToken) -> String;

	/// Scopes requested when the caller does not name any.
	fn default_scopes(&self) -> &[&str];

	/// Character joining scopes in the `scope` parameter.
	fn scope_separator(&self) -> char {
		','
	}

	/// Token response field holding the resource owner identifier, if any.
	fn access_token_resource_owner_id(&self) -> Option<&str> {
		None
	}

	/// `Authorization` header value attached to authenticated requests.
	fn authorization_header(&self, _token: &AccessToken) -> Option<String> {
		None
	}
}

/// Response inspection hook invoked for every provider response.
pub trait ResponseClassifier: Send + Sync {
	/// Fails when the response (or its parsed body) describes an error.
	fn check_response(&self, response: &ProviderResponse, parsed: &Value)
	-> Result<(), ProviderError>;
}

/// Minimal view shared by every resource owner representation.
pub trait ResourceOwner: Send + Sync {
	/// Stable identifier of the end user, if the payload carries one.
	fn id(&self) -> Option<&str>;

	/// Raw payload, exactly as received.
	fn to_map(&self) -> Claims;
}

/// Maps a successful userinfo payload into a resource owner.
pub trait ResourceOwnerFactory: Send + Sync {
	/// Concrete resource owner type.
	type Owner: ResourceOwner;

	/// Wraps `claims` fetched with `token`.
	fn create_resource_owner(&self, claims: Claims, token: &AccessToken) -> Self::Owner;
}

/// Umbrella capability implemented by every complete provider adapter.
pub trait Provider: ProviderConfig + ResponseClassifier + ResourceOwnerFactory {}
impl<T> Provider for T where T: ProviderConfig + ResponseClassifier + ResourceOwnerFactory {}
