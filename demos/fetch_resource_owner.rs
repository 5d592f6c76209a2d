//! Interactive walkthrough: authorize with PrivacyPortal, paste the returned `state` and
//! `code`, exchange them for a token, and print the resource owner.

// std
use std::io::{self, Write};
// crates.io
use color_eyre::{Result, eyre::eyre};
use url::Url;
// self
use oauth2_privacyportal::{
	flows::{AuthorizationOptions, ClientOptions, PrivacyPortalClient},
	provider::PrivacyPortal,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let client_id = prompt("Enter your PrivacyPortal client ID")?;
	let client_secret = prompt("Enter your PrivacyPortal client secret")?;
	let redirect_uri = Url::parse(&prompt("Enter the redirect URI registered with PrivacyPortal")?)?;
	let options = ClientOptions::new(client_id)
		.with_client_secret(client_secret)
		.with_redirect_uri(redirect_uri);
	let client = PrivacyPortalClient::new(PrivacyPortal::new(), options);
	let session = client.start_authorization(
		AuthorizationOptions::default().with_scopes(["openid", "email", "name"]),
	)?;

	println!("Authorize URL: {}", &session.authorize_url);

	let returned_state = prompt("State")?;

	session.validate_state(&returned_state)?;

	let code = prompt("Authorization code")?;

	if code.is_empty() {
		return Err(eyre!("An authorization code is required."));
	}

	let token = client.exchange_code(session, code).await?;

	println!("Token expires at: {:?}", token.expires());

	let owner = client.get_resource_owner(&token).await?;

	println!("Subject: {:?}", owner.id());
	println!("Name: {:?}", owner.name());
	println!("Email: {:?}", owner.email());
	println!("Claims: {}", serde_json::to_string_pretty(&owner.to_map())?);

	Ok(())
}

fn prompt(message: &str) -> Result<String> {
	print!("{message}: ");

	io::stdout().flush()?;

	let mut input = String::new();

	io::stdin().read_line(&mut input)?;

	Ok(input.trim().to_owned())
}
