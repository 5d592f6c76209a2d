//! Shared helpers for flow implementations (request dispatch, classification, scope formatting).

// crates.io
use oauth2::{AsyncHttpClient, HttpRequest};
// self
use crate::{
	_prelude::*,
	auth::ScopeList,
	error::ResponseError,
	flows::ProviderClient,
	http::ProviderHttpClient,
	oauth::TransportErrorMapper,
	obs::FlowKind,
	provider::{Claims, Provider, ProviderResponse, json_kind},
};

impl<P, C, M> ProviderClient<P, C, M>
where
	P: Provider,
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Sends `request`, lets the provider classify the response, and returns the JSON object
	/// body.
	pub(crate) async fn fetch_claims(&self, kind: FlowKind, request: HttpRequest) -> Result<Claims> {
		let handle = self.http_client.handle();
		let response = handle
			.call(request)
			.await
			.map_err(|err| self.transport_mapper.map_transport_error(kind, err))?;
		let response = ProviderResponse::from_http(response);
		let parsed = response.parse()?;

		self.provider.check_response(&response, &parsed)?;

		match parsed {
			Value::Object(claims) => Ok(claims),
			other => Err(ResponseError::NotAnObject { status: response.status, kind: json_kind(&other) }
				.into()),
		}
	}
}

/// Joins scopes with the provider's separator; `None` when nothing is requested.
pub(crate) fn format_scope(scope: &ScopeList, separator: char) -> Option<String> {
	if scope.is_empty() { None } else { Some(scope.join(separator)) }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn scope_formatting_handles_custom_separators() {
		let scope = ScopeList::new(["openid", "email"]).expect("Failed to build test scope.");

		assert_eq!(format_scope(&scope, ' '), Some("openid email".into()));
		assert_eq!(format_scope(&scope, ','), Some("openid,email".into()));
		assert_eq!(format_scope(&ScopeList::default(), ' '), None);
	}
}
