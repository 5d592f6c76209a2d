//! Token endpoint exchange for every supported grant.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	flows::{AuthorizationSession, ProviderClient},
	http::ProviderHttpClient,
	oauth::{self, TransportErrorMapper},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::{Grant, Provider, TokenParams},
};

impl<P, C, M> ProviderClient<P, C, M>
where
	P: Provider,
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Requests an access token for `grant`.
	///
	/// The body is classified by the provider before any token field is read, so an error
	/// payload never turns into a half-built token.
	pub async fn get_access_token(&self, grant: Grant) -> Result<AccessToken> {
		const KIND: FlowKind = FlowKind::AccessToken;

		let span = FlowSpan::new(KIND, "get_access_token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let params = self.token_params(&grant);
				let url =
					oauth::parse_endpoint("token", self.provider.base_access_token_url(&params))?;
				let request = oauth::token_request(&url, &params)?;
				let claims = self.fetch_claims(KIND, request).await?;

				AccessToken::from_response(claims, self.provider.access_token_resource_owner_id())
					.map_err(Error::from)
			})
			.await;

		obs::record_flow_result(&span, KIND, &result);

		result
	}

	/// Exchanges the authorization `code` returned to the redirect URI.
	///
	/// Callers validate `state` with [`AuthorizationSession::validate_state`] first; the
	/// session's PKCE verifier, if any, is attached to the request.
	pub async fn exchange_code(
		&self,
		session: AuthorizationSession,
		code: impl Into<String>,
	) -> Result<AccessToken> {
		self.get_access_token(session.into_grant(code)).await
	}

	fn token_params(&self, grant: &Grant) -> TokenParams {
		let mut params = TokenParams::new();

		params.insert("client_id".into(), self.options.client_id.clone());

		if let Some(secret) = self.options.client_secret.as_ref() {
			params.insert("client_secret".into(), secret.clone());
		}
		if let Some(redirect_uri) = self.options.redirect_uri.as_ref() {
			params.insert("redirect_uri".into(), redirect_uri.to_string());
		}

		grant.extend_params(&mut params);

		params
	}
}
