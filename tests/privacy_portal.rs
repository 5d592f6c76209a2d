// crates.io
use serde_json::{Value, json};
// self
use oauth2_privacyportal::{
	auth::AccessToken,
	error::ProviderError,
	provider::{
		DEFAULT_API_DOMAIN, DEFAULT_DOMAIN, PrivacyPortal, ProviderConfig, ProviderResponse,
		ResourceOwner, ResourceOwnerFactory, ResponseClassifier, TokenParams,
	},
};

fn check(status: u16, body: Value) -> Result<(), ProviderError> {
	let response = ProviderResponse::new(status, body.to_string()).with_content_type("application/json");

	PrivacyPortal::new().check_response(&response, &body)
}

#[test]
fn endpoints_are_fixed_and_ignore_their_inputs() {
	let portal = PrivacyPortal::new();
	let mut params = TokenParams::new();

	params.insert("grant_type".into(), "authorization_code".into());
	params.insert("code".into(), "mock_authorization_code".into());

	assert_eq!(portal.base_authorization_url(), "https://app.privacyportal.org/oauth/authorize");
	assert_eq!(portal.base_access_token_url(&TokenParams::new()), "https://api.privacyportal.org/oauth/token");
	assert_eq!(portal.base_access_token_url(&params), "https://api.privacyportal.org/oauth/token");
	assert_eq!(
		portal.resource_owner_details_url(&AccessToken::new("first")),
		portal.resource_owner_details_url(&AccessToken::new("second"))
	);
	assert_eq!(
		portal.resource_owner_details_url(&AccessToken::new("mock_access_token")),
		"https://api.privacyportal.org/oauth/userinfo"
	);
	assert_eq!(portal.domain, DEFAULT_DOMAIN);
	assert_eq!(portal.api_domain, DEFAULT_API_DOMAIN);
}

#[test]
fn scopes_default_to_openid_and_join_with_a_space() {
	let portal = PrivacyPortal::new();

	assert_eq!(portal.default_scopes(), &["openid"]);
	assert_eq!(portal.scope_separator(), ' ');
	assert_eq!(portal.access_token_resource_owner_id(), None);
}

#[test]
fn authorization_header_uses_bearer_scheme() {
	let portal = PrivacyPortal::new();

	assert_eq!(
		portal.authorization_header(&AccessToken::new("mock_access_token")).as_deref(),
		Some("Bearer mock_access_token")
	);
}

#[test]
fn error_statuses_fail_as_client_errors() {
	for status in [400, 401, 404, 429, 500, 503, 599] {
		let err = check(status, json!({ "message": "nope" }))
			.expect_err("Error statuses must never be accepted.");

		assert!(matches!(err, ProviderError::Client { status: s, .. } if s == status));
		assert_eq!(err.oauth_error(), None);
	}

	let err = check(502, json!("Bad gateway")).expect_err("Non-object bodies still fail on 5xx.");

	assert!(matches!(err, ProviderError::Client { ref parsed, .. } if parsed == &json!("Bad gateway")));
}

#[test]
fn error_statuses_still_report_the_oauth_code() {
	let body = json!({ "error": "invalid_client", "error_description": "App not found." });
	let err = check(400, body.clone()).expect_err("A 400 response must fail.");

	assert_eq!(err.status(), 400);
	assert_eq!(err.oauth_error(), Some("invalid_client"));
	assert_eq!(err.error_description(), Some("App not found."));

	match err {
		ProviderError::Client { reason, body: raw, parsed, .. } => {
			assert_eq!(reason, "Bad Request");
			assert_eq!(raw, body.to_string());
			assert_eq!(parsed, body);
		},
		other => panic!("Status check must win over payload inspection, got {other:?}."),
	}
}

#[test]
fn error_payloads_on_success_statuses_fail_as_oauth_errors() {
	let err = check(200, json!({ "error": "invalid_grant", "error_description": "Code expired." }))
		.expect_err("An `error` field must fail the response.");

	assert_eq!(
		err,
		ProviderError::OAuth {
			code: "invalid_grant".into(),
			description: Some("Code expired.".into()),
			status: 200,
		}
	);

	let err = check(302, json!({ "error": "access_denied" })).expect_err("3xx payloads are inspected too.");

	assert_eq!(err.oauth_error(), Some("access_denied"));
	assert_eq!(err.error_description(), None);

	let err = check(200, json!({ "error": 42 })).expect_err("Non-string codes are still errors.");

	assert_eq!(err.oauth_error(), Some("42"));
}

#[test]
fn clean_bodies_pass() {
	assert!(check(200, json!({ "access_token": "mock_access_token" })).is_ok());
	assert!(check(200, json!({ "error": null })).is_ok());
	assert!(check(200, json!("plain text")).is_ok());
	assert!(check(200, json!(["error"])).is_ok());
	assert!(check(399, json!({})).is_ok());
}

#[test]
fn resource_owners_carry_the_portal_domain() {
	let portal = PrivacyPortal::new().with_domain("https://portal.example.com");
	let claims = json!({ "sub": "U1", "name": "Alice" })
		.as_object()
		.cloned()
		.expect("Fixture must be an object.");
	let owner = portal.create_resource_owner(claims.clone(), &AccessToken::new("mock_access_token"));

	assert_eq!(owner.domain(), Some("https://portal.example.com"));
	assert_eq!(ResourceOwner::id(&owner), Some("U1"));
	assert_eq!(ResourceOwner::to_map(&owner), claims);
}
