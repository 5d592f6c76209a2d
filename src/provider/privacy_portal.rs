//! PrivacyPortal identity provider adapter.
//!
//! PrivacyPortal speaks plain OpenID Connect: the web app hosts the authorize page, the API
//! host serves the token and userinfo endpoints, scopes are space-separated, and userinfo
//! requests authenticate with a bearer header.

pub mod owner;

pub use owner::*;

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	error::ProviderError,
	provider::{
		Claims, ProviderConfig, ProviderResponse, ResourceOwnerFactory, ResponseClassifier,
		TokenParams,
	},
};

/// Default portal web domain (authorize page, user-facing links).
pub const DEFAULT_DOMAIN: &str = "https://app.privacyportal.org";
/// Default API domain (token and userinfo endpoints).
pub const DEFAULT_API_DOMAIN: &str = "https://api.privacyportal.org";

const AUTHORIZE_PATH: &str = "/oauth/authorize";
const TOKEN_PATH: &str = "/oauth/token";
const USERINFO_PATH: &str = "/oauth/userinfo";
const DEFAULT_SCOPES: &[&str] = &["openid"];
const SCOPE_SEPARATOR: char = ' ';

/// Provider adapter for PrivacyPortal.
///
/// Both domains default to the production hosts; overriding them only relocates the
/// endpoints, the endpoint paths never change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacyPortal {
	/// Portal web domain; also stamped on resource owners for building links.
	pub domain: String,
	/// API domain hosting the token and userinfo endpoints.
	pub api_domain: String,
}
impl PrivacyPortal {
	/// Creates an adapter pointing at the production hosts.
	pub fn new() -> Self {
		Self::default()
	}

	/// Overrides the portal web domain.
	pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
		self.domain = domain.into();

		self
	}

	/// Overrides the API domain.
	pub fn with_api_domain(mut self, api_domain: impl Into<String>) -> Self {
		self.api_domain = api_domain.into();

		self
	}
}
impl Default for PrivacyPortal {
	fn default() -> Self {
		Self { domain: DEFAULT_DOMAIN.into(), api_domain: DEFAULT_API_DOMAIN.into() }
	}
}
impl ProviderConfig for PrivacyPortal {
	fn base_authorization_url(&self) -> String {
		endpoint(&self.domain, AUTHORIZE_PATH)
	}

	fn base_access_token_url(&self, _params: &TokenParams) -> String {
		endpoint(&self.api_domain, TOKEN_PATH)
	}

	fn resource_owner_details_url(&self, _token: &AccessToken) -> String {
		endpoint(&self.api_domain, USERINFO_PATH)
	}

	fn default_scopes(&self) -> &[&str] {
		DEFAULT_SCOPES
	}

	fn scope_separator(&self) -> char {
		SCOPE_SEPARATOR
	}

	fn authorization_header(&self, token: &AccessToken) -> Option<String> {
		Some(format!("Bearer {}", token.token()))
	}
}
impl ResponseClassifier for PrivacyPortal {
	fn check_response(
		&self,
		response: &ProviderResponse,
		parsed: &Value,
	) -> Result<(), ProviderError> {
		// Status wins over payload inspection; non-object bodies never carry `error`.
		if response.status >= 400 {
			Err(ProviderError::client(response, parsed))
		} else if parsed.get("error").is_some_and(|error| !error.is_null()) {
			Err(ProviderError::oauth(response, parsed))
		} else {
			Ok(())
		}
	}
}
impl ResourceOwnerFactory for PrivacyPortal {
	type Owner = PrivacyPortalResourceOwner;

	fn create_resource_owner(&self, claims: Claims, _token: &AccessToken) -> Self::Owner {
		PrivacyPortalResourceOwner::new(claims).with_domain(self.domain.as_str())
	}
}

fn endpoint(domain: &str, path: &str) -> String {
	format!("{}{path}", domain.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn endpoints_join_domains_without_double_slashes() {
		let portal = PrivacyPortal::new()
			.with_domain("http://127.0.0.1:8080/")
			.with_api_domain("http://127.0.0.1:9090");

		assert_eq!(portal.base_authorization_url(), "http://127.0.0.1:8080/oauth/authorize");
		assert_eq!(portal.base_access_token_url(&TokenParams::new()), "http://127.0.0.1:9090/oauth/token");
	}

	#[test]
	fn deserializes_with_production_defaults() {
		let portal: PrivacyPortal = serde_json::from_str(r#"{"api_domain":"https://api.staging.test"}"#)
			.expect("Partial adapter config should deserialize.");

		assert_eq!(portal.domain, DEFAULT_DOMAIN);
		assert_eq!(portal.api_domain, "https://api.staging.test");
	}
}
