//! Globus Auth preset.
//!
//! Globus issues OpenID Connect tokens from `auth.globus.org`. The token endpoint expects a
//! form-encoded POST and answers with a JSON object that, besides `access_token`, carries
//! `id_token`, `expires_in`, `resource_server`, and `other_tokens`, all of which stay reachable
//! through [`AccessToken::raw_response`](crate::auth::AccessToken::raw_response).

// self
use crate::{
	auth::{ProviderId, ScopeSet},
	provider::{ProviderConfig, ProviderConfigError, TokenRequestVerb},
};

/// Identifier used for the Globus preset.
pub const PROVIDER_ID: &str = "globus";
/// Authorize URL template.
pub const AUTHORIZE_URL: &str = "https://auth.globus.org/v2/oauth2/authorize?response_type=code&client_id={client_id}&redirect_uri={redirect_uri}&scope={scope}";
/// Token endpoint.
pub const TOKEN_URL: &str = "https://auth.globus.org/v2/oauth2/token";
/// Space-delimited scopes requested at login.
pub const SCOPES: &str = "openid email profile";

/// Builds the Globus provider config.
///
/// Build it once and share it; the value is immutable.
pub fn config() -> Result<ProviderConfig, ProviderConfigError> {
	ProviderConfig::builder(ProviderId::new(PROVIDER_ID)?)
		.authorization_template(AUTHORIZE_URL)?
		.token_endpoint_str(TOKEN_URL)?
		.token_request_verb(TokenRequestVerb::Post)
		.scopes(SCOPES.parse::<ScopeSet>()?)
		.build()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::provider::ClientAuthMethod;

	#[test]
	fn preset_matches_globus_endpoints() {
		let config = config().expect("Globus preset should build.");

		assert_eq!(config.id.as_ref(), "globus");
		assert_eq!(config.token_endpoint.as_str(), "https://auth.globus.org/v2/oauth2/token");
		assert_eq!(config.token_request_verb, TokenRequestVerb::Post);
		assert_eq!(config.client_auth_method, ClientAuthMethod::ClientSecretPost);
		assert_eq!(config.scopes.iter().collect::<Vec<_>>(), ["openid", "email", "profile"]);
		assert_eq!(config.authorization_endpoint.as_str(), AUTHORIZE_URL);
	}
}
