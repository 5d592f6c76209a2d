//! Resource owner built from the PrivacyPortal userinfo payload.

// self
use crate::{
	_prelude::*,
	provider::{Claims, ResourceOwner},
};

/// End user returned by the PrivacyPortal userinfo endpoint.
///
/// The claims are kept exactly as received; accessors only look keys up and never fail.
/// A claim that is missing, or present with a non-string value, reads as `None` while the
/// raw value stays available through [`to_map`](Self::to_map).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrivacyPortalResourceOwner {
	claims: Claims,
	domain: Option<String>,
}
impl PrivacyPortalResourceOwner {
	/// Takes ownership of a userinfo payload.
	pub fn new(claims: Claims) -> Self {
		Self { claims, domain: None }
	}

	/// Subject identifier (`sub`).
	pub fn id(&self) -> Option<&str> {
		self.string_claim("sub")
	}

	/// Display name (`name`).
	pub fn name(&self) -> Option<&str> {
		self.string_claim("name")
	}

	/// Email address (`email`).
	pub fn email(&self) -> Option<&str> {
		self.string_claim("email")
	}

	/// Raw value of any claim.
	pub fn claim(&self, key: &str) -> Option<&Value> {
		self.claims.get(key)
	}

	/// Stamps the portal web domain used for user-facing links.
	///
	/// The domain is stamped once; later calls leave the first value in place.
	pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
		if self.domain.is_none() {
			self.domain = Some(domain.into());
		}

		self
	}

	/// Portal web domain, once stamped.
	pub fn domain(&self) -> Option<&str> {
		self.domain.as_deref()
	}

	/// Borrowed view of the original payload.
	pub fn claims(&self) -> &Claims {
		&self.claims
	}

	/// Copy of the original payload; the domain is never part of it.
	pub fn to_map(&self) -> Claims {
		self.claims.clone()
	}

	/// Consumes the owner and returns the original payload.
	pub fn into_map(self) -> Claims {
		self.claims
	}

	fn string_claim(&self, key: &str) -> Option<&str> {
		self.claims.get(key).and_then(Value::as_str)
	}
}
impl ResourceOwner for PrivacyPortalResourceOwner {
	fn id(&self) -> Option<&str> {
		self.string_claim("sub")
	}

	fn to_map(&self) -> Claims {
		self.claims.clone()
	}
}
impl From<Claims> for PrivacyPortalResourceOwner {
	fn from(claims: Claims) -> Self {
		Self::new(claims)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn owner(value: Value) -> PrivacyPortalResourceOwner {
		match value {
			Value::Object(claims) => PrivacyPortalResourceOwner::new(claims),
			other => panic!("Fixture must be a JSON object, got {other}."),
		}
	}

	#[test]
	fn getters_return_none_when_no_key_exists() {
		let owner = owner(serde_json::json!({ "sub": "U1", "name": "Alice" }));

		assert_eq!(owner.id(), Some("U1"));
		assert_eq!(owner.name(), Some("Alice"));
		assert_eq!(owner.email(), None);
		assert_eq!(owner.domain(), None);
	}

	#[test]
	fn non_string_claims_read_as_none_but_survive_round_trip() {
		let owner = owner(serde_json::json!({ "sub": 7, "email_verified": true }));

		assert_eq!(owner.id(), None);
		assert_eq!(owner.claim("sub"), Some(&Value::from(7)));
		assert_eq!(owner.to_map().get("email_verified"), Some(&Value::Bool(true)));
	}

	#[test]
	fn domain_never_leaks_into_the_payload() {
		let payload = serde_json::json!({ "sub": "U1", "locale": "en" });
		let owner = owner(payload.clone()).with_domain("https://app.privacyportal.org");

		assert_eq!(owner.domain(), Some("https://app.privacyportal.org"));
		assert_eq!(Value::Object(owner.to_map()), payload);
		assert_eq!(Value::Object(owner.into_map()), payload);
	}
}
