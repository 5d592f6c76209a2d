//! Builds a PrivacyPortal authorization redirect and stashes the session for the redirect
//! handler to later exchange.

// std
use std::collections::HashMap;
// crates.io
use color_eyre::Result;
use url::Url;
// self
use oauth2_privacyportal::{
	flows::{AuthorizationOptions, ClientOptions, PrivacyPortalClient},
	provider::PrivacyPortal,
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let options = ClientOptions::new("demo-client")
		.with_client_secret("demo-secret")
		.with_redirect_uri(Url::parse("https://app.example.com/oauth/callback")?);
	let client = PrivacyPortalClient::new(PrivacyPortal::new(), options);
	let session = client.start_authorization(
		AuthorizationOptions::default().with_scopes(["openid", "email", "profile"]).with_pkce(),
	)?;

	println!("Send your user to {}.", &session.authorize_url);
	println!(
		"PKCE challenge ({:?}): {:?}.",
		session.code_challenge_method(),
		session.code_challenge()
	);

	let mut sessions = HashMap::new();

	sessions.insert(session.state.clone(), session.clone());

	// Simulate the redirect handler looking up the stored session by `state`.
	let returned_state = session.state.clone();

	if let Some(stashed) = sessions.remove(&returned_state) {
		stashed.validate_state(&returned_state)?;
		println!("Validated state for scopes `{}`.", stashed.scope);
		println!("Persist this session to call ProviderClient::exchange_code during the callback.");
	} else {
		eprintln!("State `{returned_state}` was not recognized.");
	}

	Ok(())
}
