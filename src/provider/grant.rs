//! OAuth grant types and the token form parameters each one contributes.

// self
use crate::{_prelude::*, provider::TokenParams};

/// OAuth 2.0 grant types understood by the token endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Authorization Code grant.
	AuthorizationCode,
	/// Refresh Token grant for long-lived sessions.
	RefreshToken,
	/// Client Credentials grant for app-only tokens.
	ClientCredentials,
	/// Resource Owner Password Credentials grant.
	Password,
}
impl GrantType {
	/// Returns the RFC 6749 identifier for the grant type.
	pub fn as_str(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::RefreshToken => "refresh_token",
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

/// Grant plus the parameters it contributes to a token request.
#[derive(Clone, PartialEq, Eq)]
pub enum Grant {
	/// Exchange an authorization code, optionally proving PKCE possession.
	AuthorizationCode {
		/// Code received through the redirect.
		code: String,
		/// PKCE verifier generated with the authorization session.
		code_verifier: Option<String>,
	},
	/// Rotate a refresh token.
	RefreshToken {
		/// Refresh token issued earlier.
		refresh_token: String,
	},
	/// App-only token.
	ClientCredentials,
	/// Exchange end-user credentials directly.
	Password {
		/// End-user name.
		username: String,
		/// End-user password.
		password: String,
	},
}
impl Grant {
	/// Authorization code grant without PKCE.
	pub fn authorization_code(code: impl Into<String>) -> Self {
		Self::AuthorizationCode { code: code.into(), code_verifier: None }
	}

	/// Refresh token grant.
	pub fn refresh_token(refresh_token: impl Into<String>) -> Self {
		Self::RefreshToken { refresh_token: refresh_token.into() }
	}

	/// Grant type implemented by this value.
	pub fn grant_type(&self) -> GrantType {
		match self {
			Self::AuthorizationCode { .. } => GrantType::AuthorizationCode,
			Self::RefreshToken { .. } => GrantType::RefreshToken,
			Self::ClientCredentials => GrantType::ClientCredentials,
			Self::Password { .. } => GrantType::Password,
		}
	}

	/// Writes `grant_type` and the grant-specific fields into `params`.
	pub fn extend_params(&self, params: &mut TokenParams) {
		params.insert("grant_type".into(), self.grant_type().as_str().into());

		match self {
			Self::AuthorizationCode { code, code_verifier } => {
				params.insert("code".into(), code.clone());

				if let Some(verifier) = code_verifier {
					params.insert("code_verifier".into(), verifier.clone());
				}
			},
			Self::RefreshToken { refresh_token } => {
				params.insert("refresh_token".into(), refresh_token.clone());
			},
			Self::ClientCredentials => {},
			Self::Password { username, password } => {
				params.insert("username".into(), username.clone());
				params.insert("password".into(), password.clone());
			},
		}
	}
}
impl Debug for Grant {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Grant").field("grant_type", &self.grant_type()).finish_non_exhaustive()
	}
}
