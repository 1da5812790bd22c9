//! Provider configuration data structures shared by both flow steps.
//!
//! The module exposes validated metadata, a supporting builder, and the authorize URL
//! template type so providers can describe themselves in a transport-agnostic way.

/// Builder API for assembling provider configurations.
pub mod builder;
/// Authorization endpoint templates.
pub mod template;

pub use builder::*;
pub use template::*;

// self
use crate::{
	_prelude::*,
	auth::{ProviderId, ScopeSet},
};

/// HTTP verb used for the token request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenRequestVerb {
	/// Parameters travel in the query string.
	Get,
	#[default]
	/// Parameters travel in a form-urlencoded body.
	Post,
}
impl TokenRequestVerb {
	/// Returns the HTTP method name.
	pub fn as_str(self) -> &'static str {
		match self {
			TokenRequestVerb::Get => "GET",
			TokenRequestVerb::Post => "POST",
		}
	}
}
impl Display for TokenRequestVerb {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Client authentication modes for the token endpoint call.
///
/// Only applies when [`ClientCredentials`](crate::auth::ClientCredentials) carries a secret.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientAuthMethod {
	#[default]
	/// `client_secret` travels alongside the other token request parameters.
	ClientSecretPost,
	/// HTTP Basic with `client_id`/`client_secret`.
	ClientSecretBasic,
}

/// Immutable provider configuration consumed by flows.
///
/// Safe to share read-only across any number of concurrent exchanges. Deserialized configs go
/// through [`ProviderConfig::validate`], the same checks the builder applies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProviderConfig")]
pub struct ProviderConfig {
	/// Configuration identifier.
	pub id: ProviderId,
	/// Authorize URL template rendered for the browser redirect.
	pub authorization_endpoint: AuthorizationTemplate,
	/// Token endpoint used for code exchanges.
	pub token_endpoint: Url,
	/// HTTP verb used for the token request.
	#[serde(default)]
	pub token_request_verb: TokenRequestVerb,
	/// Scopes requested in the authorize URL, in order.
	pub scopes: ScopeSet,
	/// Client authentication mechanism for confidential clients.
	#[serde(default)]
	pub client_auth_method: ClientAuthMethod,
}
impl ProviderConfig {
	/// Creates a new builder for the provided identifier.
	pub fn builder(id: ProviderId) -> ProviderConfigBuilder {
		ProviderConfigBuilder::new(id)
	}
}
impl TryFrom<RawProviderConfig> for ProviderConfig {
	type Error = ProviderConfigError;

	fn try_from(raw: RawProviderConfig) -> Result<Self, Self::Error> {
		let config = Self {
			id: raw.id,
			authorization_endpoint: raw.authorization_endpoint,
			token_endpoint: raw.token_endpoint,
			token_request_verb: raw.token_request_verb,
			scopes: raw.scopes,
			client_auth_method: raw.client_auth_method,
		};

		config.validate()?;

		Ok(config)
	}
}

#[derive(Deserialize)]
struct RawProviderConfig {
	id: ProviderId,
	authorization_endpoint: AuthorizationTemplate,
	token_endpoint: Url,
	#[serde(default)]
	token_request_verb: TokenRequestVerb,
	scopes: ScopeSet,
	#[serde(default)]
	client_auth_method: ClientAuthMethod,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn config_deserializes_with_defaults() {
		let json = r#"{
			"id": "acme",
			"authorization_endpoint": "https://idp.acme.test/authorize?response_type=code&client_id={client_id}&redirect_uri={redirect_uri}&scope={scope}",
			"token_endpoint": "https://idp.acme.test/token",
			"scopes": ["openid", "email"]
		}"#;
		let config: ProviderConfig =
			serde_json::from_str(json).expect("Provider config should deserialize.");

		assert_eq!(config.id.as_ref(), "acme");
		assert_eq!(config.token_request_verb, TokenRequestVerb::Post);
		assert_eq!(config.client_auth_method, ClientAuthMethod::ClientSecretPost);
		assert_eq!(config.scopes.normalized(), "openid email");

		let verb: TokenRequestVerb =
			serde_json::from_str("\"GET\"").expect("Verb should deserialize.");

		assert_eq!(verb, TokenRequestVerb::Get);
		assert_eq!(verb.to_string(), "GET");
	}

	#[test]
	fn deserialization_enforces_validation() {
		let insecure = serde_json::json!({
			"id": "acme",
			"authorization_endpoint": "http://idp.test/a?response_type=code&client_id={client_id}&redirect_uri={redirect_uri}&scope={scope}",
			"token_endpoint": "https://idp.test/token",
			"scopes": ["openid"]
		});
		let err = serde_json::from_value::<ProviderConfig>(insecure)
			.expect_err("Plain HTTP authorize endpoint must fail.");

		assert!(err.to_string().contains("authorization endpoint must use HTTPS"), "{err}");

		let insecure = serde_json::json!({
			"id": "acme",
			"authorization_endpoint": "https://idp.test/a?response_type=code&client_id={client_id}&redirect_uri={redirect_uri}&scope={scope}",
			"token_endpoint": "http://idp.test/token",
			"scopes": ["openid"]
		});
		let err = serde_json::from_value::<ProviderConfig>(insecure)
			.expect_err("Plain HTTP token endpoint must fail.");

		assert!(err.to_string().contains("token endpoint must use HTTPS"), "{err}");

		let empty = serde_json::json!({
			"id": "acme",
			"authorization_endpoint": "https://idp.test/a?response_type=code&client_id={client_id}&redirect_uri={redirect_uri}&scope={scope}",
			"token_endpoint": "https://idp.test/token",
			"scopes": []
		});
		let err = serde_json::from_value::<ProviderConfig>(empty)
			.expect_err("Empty scope list must fail.");

		assert!(err.to_string().contains("at least one scope"), "{err}");
	}
}
