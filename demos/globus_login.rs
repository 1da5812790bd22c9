//! Walks through a Globus Auth login: print the authorize URL, then trade the code the browser
//! brings back for an access token.
//!
//! ```sh
//! GLOBUS_CLIENT_ID=... GLOBUS_CALLBACK=https://app.example.com/cb cargo run --example globus_login
//! GLOBUS_CLIENT_ID=... GLOBUS_CLIENT_SECRET=... cargo run --example globus_login -- <code>
//! ```

// std
use std::env;
// crates.io
use color_eyre::{Result, eyre::eyre};
// self
use oauth2_globus::{auth::ClientCredentials, flows::ReqwestAuthCodeClient};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let client_id =
		env::var("GLOBUS_CLIENT_ID").map_err(|_| eyre!("Set GLOBUS_CLIENT_ID to your Globus app id."))?;
	let callback =
		env::var("GLOBUS_CALLBACK").unwrap_or_else(|_| "https://app.example.com/oauth/callback".into());
	let mut creds = ClientCredentials::new(client_id, callback);

	if let Ok(secret) = env::var("GLOBUS_CLIENT_SECRET") {
		creds = creds.with_client_secret(secret);
	}

	let client = ReqwestAuthCodeClient::globus()?;

	match env::args().nth(1) {
		None => {
			println!("Send your user to {}.", client.authorization_url(&creds)?);
			println!("Run again with the `code` query parameter from the callback to finish.");
		},
		Some(code) => {
			let token = client.exchange_code(&code, &creds).await?;

			println!("Access token issued at {}.", token.issued());

			if let Some(expires_at) = token.expires_at() {
				println!("Expires at {expires_at}.");
			}
			if let Some(scope) = token.scope() {
				println!("Granted scope: {scope}.");
			}
			if let Some(resource_server) = token.get("resource_server").and_then(|v| v.as_str()) {
				println!("Resource server: {resource_server}.");
			}
		},
	}

	Ok(())
}
