//! Authorization redirect construction (state, scopes, optional PKCE).

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};
// self
use crate::{
	_prelude::*,
	auth::ScopeList,
	error::ConfigError,
	flows::{ProviderClient, common},
	http::ProviderHttpClient,
	oauth::{self, TransportErrorMapper},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::{Grant, Provider},
};

const STATE_LEN: usize = 32;
const PKCE_VERIFIER_LEN: usize = 64;
const DEFAULT_APPROVAL_PROMPT: &str = "auto";
// Keys owned by the client; callers set them through dedicated options instead.
const RESERVED_PARAMS: [&str; 7] = [
	"state",
	"scope",
	"response_type",
	"redirect_uri",
	"client_id",
	"code_challenge",
	"code_challenge_method",
];

/// Supported PKCE challenge methods surfaced via [`AuthorizationSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PkceCodeChallengeMethod {
	/// SHA-256 based PKCE (RFC 7636 S256).
	S256,
}
impl PkceCodeChallengeMethod {
	/// Returns the RFC 7636 identifier for the challenge method.
	pub fn as_str(self) -> &'static str {
		match self {
			PkceCodeChallengeMethod::S256 => "S256",
		}
	}
}

/// Caller overrides for a single authorization redirect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthorizationOptions {
	/// Scopes to request instead of the provider defaults.
	pub scopes: Option<Vec<String>>,
	/// Caller-chosen `state`; a random one is generated otherwise.
	pub state: Option<String>,
	/// Attach an S256 PKCE challenge.
	pub pkce: bool,
	/// Additional query parameters (`prompt`, `login_hint`, `nonce`, ...).
	pub extra_params: BTreeMap<String, String>,
}
impl AuthorizationOptions {
	/// Requests the provided scopes instead of the provider defaults.
	pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scopes = Some(scopes.into_iter().map(Into::into).collect());

		self
	}

	/// Uses a caller-chosen `state`.
	pub fn with_state(mut self, state: impl Into<String>) -> Self {
		self.state = Some(state.into());

		self
	}

	/// Attaches an S256 PKCE challenge.
	pub fn with_pkce(mut self) -> Self {
		self.pkce = true;

		self
	}

	/// Adds an extra query parameter.
	///
	/// A `prompt` or `approval_prompt` replaces the default `approval_prompt=auto`. Keys the
	/// client sets itself (`state`, `scope`, `response_type`, `redirect_uri`, `client_id`,
	/// and the PKCE pair) are rejected by [`ProviderClient::start_authorization`]; use
	/// [`with_state`](Self::with_state) and [`with_scopes`](Self::with_scopes) instead.
	pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.extra_params.insert(key.into(), value.into());

		self
	}
}

/// Authorization redirect metadata returned by [`ProviderClient::start_authorization`].
///
/// Callers keep the session (keyed by `state`) until the redirect comes back, then hand it
/// to [`ProviderClient::exchange_code`].
#[derive(Clone)]
pub struct AuthorizationSession {
	/// Opaque state value that must round-trip via the redirect handler.
	pub state: String,
	/// Scopes requested in the redirect.
	pub scope: ScopeList,
	/// Redirect URI sent with the request, if configured.
	pub redirect_uri: Option<Url>,
	/// Fully-formed authorize URL that callers should send end users to.
	pub authorize_url: Url,
	pkce: Option<PkcePair>,
}
impl AuthorizationSession {
	/// PKCE code challenge, when PKCE was requested.
	pub fn code_challenge(&self) -> Option<&str> {
		self.pkce.as_ref().map(|pkce| pkce.challenge.as_str())
	}

	/// PKCE challenge method, when PKCE was requested.
	pub fn code_challenge_method(&self) -> Option<PkceCodeChallengeMethod> {
		self.pkce.as_ref().map(|pkce| pkce.method)
	}

	/// Validates the returned `state` parameter after the authorization redirect.
	pub fn validate_state(&self, returned_state: &str) -> Result<()> {
		if returned_state == self.state { Ok(()) } else { Err(Error::StateMismatch) }
	}

	/// Turns the session plus the returned code into an authorization code grant.
	pub fn into_grant(self, code: impl Into<String>) -> Grant {
		Grant::AuthorizationCode {
			code: code.into(),
			code_verifier: self.pkce.map(|pkce| pkce.verifier),
		}
	}
}
impl Debug for AuthorizationSession {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizationSession")
			.field("state", &self.state)
			.field("scope", &self.scope)
			.field("redirect_uri", &self.redirect_uri)
			.field("authorize_url", &self.authorize_url)
			.field("code_challenge", &self.code_challenge())
			.field("code_challenge_method", &self.code_challenge_method())
			.finish()
	}
}

#[derive(Clone)]
struct PkcePair {
	verifier: String,
	challenge: String,
	method: PkceCodeChallengeMethod,
}
impl PkcePair {
	fn generate() -> Self {
		let verifier = random_string(PKCE_VERIFIER_LEN);
		let challenge = compute_pkce_challenge(&verifier);

		Self { verifier, challenge, method: PkceCodeChallengeMethod::S256 }
	}
}

impl<P, C, M> ProviderClient<P, C, M>
where
	P: Provider,
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Builds the authorization redirect for the provider.
	///
	/// Scopes default to [`ProviderConfig::default_scopes`](crate::provider::ProviderConfig::default_scopes)
	/// and are joined with the provider's separator.
	pub fn start_authorization(&self, options: AuthorizationOptions) -> Result<AuthorizationSession> {
		const KIND: FlowKind = FlowKind::Authorization;

		let span = FlowSpan::new(KIND, "start_authorization");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span.in_scope(|| self.build_session(options));

		obs::record_flow_result(&span, KIND, &result);

		result
	}

	fn build_session(&self, options: AuthorizationOptions) -> Result<AuthorizationSession> {
		let AuthorizationOptions { scopes, state, pkce, extra_params } = options;

		if let Some(key) = extra_params.keys().find(|key| RESERVED_PARAMS.contains(&key.as_str())) {
			return Err(ConfigError::ReservedParameter { key: key.clone() }.into());
		}

		let scope = match scopes {
			Some(scopes) => ScopeList::new(scopes),
			None => ScopeList::new(self.provider.default_scopes().iter().copied()),
		}
		.map_err(ConfigError::from)?;
		let state = state.unwrap_or_else(|| random_string(STATE_LEN));
		let pkce = pkce.then(PkcePair::generate);
		let mut authorize_url =
			oauth::parse_endpoint("authorization", self.provider.base_authorization_url())?;
		let redirect_uri = self.options.redirect_uri.clone();
		let mut pairs = authorize_url.query_pairs_mut();

		pairs.append_pair("state", &state);

		if let Some(scope_value) = common::format_scope(&scope, self.provider.scope_separator()) {
			pairs.append_pair("scope", &scope_value);
		}

		pairs.append_pair("response_type", "code");

		if !extra_params.contains_key("prompt") && !extra_params.contains_key("approval_prompt") {
			pairs.append_pair("approval_prompt", DEFAULT_APPROVAL_PROMPT);
		}
		if let Some(redirect) = redirect_uri.as_ref() {
			pairs.append_pair("redirect_uri", redirect.as_str());
		}

		pairs.append_pair("client_id", &self.options.client_id);

		if let Some(pkce) = pkce.as_ref() {
			pairs.append_pair("code_challenge", &pkce.challenge);
			pairs.append_pair("code_challenge_method", pkce.method.as_str());
		}

		for (key, value) in &extra_params {
			pairs.append_pair(key, value);
		}

		drop(pairs);

		Ok(AuthorizationSession { state, scope, redirect_uri, authorize_url, pkce })
	}
}

fn random_string(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}

fn compute_pkce_challenge(verifier: &str) -> String {
	let digest = Sha256::digest(verifier.as_bytes());

	URL_SAFE_NO_PAD.encode(digest)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn session(pkce: Option<PkcePair>) -> AuthorizationSession {
		AuthorizationSession {
			state: "expected".into(),
			scope: ScopeList::new(["openid"]).expect("Failed to build scope fixture."),
			redirect_uri: None,
			authorize_url: Url::parse("https://app.privacyportal.org/oauth/authorize?state=expected")
				.expect("Authorization URL fixture should parse successfully."),
			pkce,
		}
	}

	#[test]
	fn reserved_keys_cover_every_client_owned_parameter() {
		for key in ["state", "scope", "response_type", "redirect_uri", "client_id"] {
			assert!(RESERVED_PARAMS.contains(&key), "`{key}` must be reserved.");
		}

		assert!(!RESERVED_PARAMS.contains(&"prompt"));
		assert!(!RESERVED_PARAMS.contains(&"approval_prompt"));
	}

	#[test]
	fn state_validation_errors_on_mismatch() {
		let session = session(None);

		assert!(session.validate_state("expected").is_ok());
		assert!(matches!(session.validate_state("other"), Err(Error::StateMismatch)));
	}

	#[test]
	fn pkce_challenge_matches_rfc_7636_vector() {
		assert_eq!(
			compute_pkce_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk"),
			"E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
		);
	}

	#[test]
	fn grant_carries_the_pkce_verifier() {
		let pkce = PkcePair::generate();
		let verifier = pkce.verifier.clone();

		assert_eq!(verifier.len(), PKCE_VERIFIER_LEN);
		assert_eq!(
			session(Some(pkce)).into_grant("code"),
			Grant::AuthorizationCode { code: "code".into(), code_verifier: Some(verifier) }
		);
		assert_eq!(session(None).into_grant("code"), Grant::authorization_code("code"));
	}
}
