//! Userinfo retrieval.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	flows::ProviderClient,
	http::ProviderHttpClient,
	oauth::{self, TransportErrorMapper},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::{Provider, ResourceOwnerFactory},
};

impl<P, C, M> ProviderClient<P, C, M>
where
	P: Provider,
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches the userinfo payload for `token` and wraps it in the provider's resource owner.
	pub async fn get_resource_owner(
		&self,
		token: &AccessToken,
	) -> Result<<P as ResourceOwnerFactory>::Owner> {
		const KIND: FlowKind = FlowKind::ResourceOwner;

		let span = FlowSpan::new(KIND, "get_resource_owner");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = oauth::parse_endpoint(
					"resource_owner_details",
					self.provider.resource_owner_details_url(token),
				)?;
				let authorization = self.provider.authorization_header(token);
				let request = oauth::resource_owner_request(&url, authorization.as_deref())?;
				let claims = self.fetch_claims(KIND, request).await?;

				Ok(self.provider.create_resource_owner(claims, token))
			})
			.await;

		obs::record_flow_result(&span, KIND, &result);

		result
	}
}
