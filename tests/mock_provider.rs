// std
use std::{collections::BTreeMap, sync::Arc};
// self
use oauth2_globus::{
	auth::{AccessToken, ProviderId, ScopeSet},
	error::{ExtractError, TokenExtractionError},
	provider::{
		AuthorizationTemplate, ClientAuthMethod, DefaultProviderStrategy, ExtractWith,
		ProviderConfig, ProviderConfigBuilder, ProviderConfigError, ProviderStrategy, TemplateError,
		TokenRequestVerb, extract_json_token, globus, parse_json_object,
	},
	url::Url,
};

const TEMPLATE: &str = "https://example.com/auth?response_type=code&client_id={client_id}&redirect_uri={redirect_uri}&scope={scope}";

fn url(value: &str) -> Url {
	Url::parse(value).expect("Failed to parse mock provider URL.")
}

fn builder(id: &str) -> ProviderConfigBuilder {
	let provider_id =
		ProviderId::new(id).expect("Failed to build provider identifier for mock config.");

	ProviderConfig::builder(provider_id)
}

#[test]
fn config_rejects_insecure_endpoints_and_missing_scopes() {
	let err = builder("mock-insecure")
		.authorization_template(TEMPLATE)
		.expect("Template should parse.")
		.token_endpoint(url("https://example.com/token"))
		.build()
		.expect_err("Config builder should reject missing scopes.");

	assert!(matches!(err, ProviderConfigError::NoScopes));

	let err = builder("mock")
		.authorization_template(TEMPLATE.replace("https://", "http://"))
		.expect("Template should parse.")
		.token_endpoint(url("https://example.com/token"))
		.scopes(ScopeSet::new(["openid"]).expect("Scope fixture should be valid."))
		.build()
		.expect_err("Config builder should reject insecure authorization endpoints.");

	assert!(matches!(err, ProviderConfigError::InsecureEndpoint { endpoint: "authorization", .. }));
}

#[test]
fn templates_require_every_placeholder() {
	assert_eq!(
		AuthorizationTemplate::new("https://example.com/auth?response_type=code&client_id={client_id}&scope={scope}")
			.expect_err("Missing redirect placeholder must fail."),
		TemplateError::MissingPlaceholder { name: "redirect_uri" }
	);
	assert!(matches!(
		AuthorizationTemplate::new(format!("{TEMPLATE}&state={{state}}")),
		Err(TemplateError::UnknownPlaceholder { ref name }) if name == "state"
	));
	assert_eq!(
		AuthorizationTemplate::new(TEMPLATE.replace("response_type=code&", ""))
			.expect_err("Missing response type must fail."),
		TemplateError::MissingResponseType
	);
}

#[test]
fn config_deserializes_from_json() {
	let config: ProviderConfig = serde_json::from_value(serde_json::json!({
		"id": "globus",
		"authorization_endpoint": globus::AUTHORIZE_URL,
		"token_endpoint": globus::TOKEN_URL,
		"scopes": ["openid", "email", "profile"],
		"client_auth_method": "client_secret_basic",
	}))
	.expect("Config JSON should deserialize.");

	assert_eq!(config.token_request_verb, TokenRequestVerb::Post);
	assert_eq!(config.client_auth_method, ClientAuthMethod::ClientSecretBasic);
	assert_eq!(config.authorization_endpoint.as_str(), globus::AUTHORIZE_URL);
	assert!(config.validate().is_ok());

	let err = serde_json::from_value::<ProviderConfig>(serde_json::json!({
		"id": "broken",
		"authorization_endpoint": "https://example.com/auth?client_id={client_id}",
		"token_endpoint": "https://example.com/token",
		"scopes": ["openid"],
	}))
	.expect_err("Invalid templates must fail deserialization.");

	assert!(err.to_string().contains("placeholder") || err.to_string().contains("response_type"));
}

#[test]
fn default_strategy_reads_access_token() {
	let token = DefaultProviderStrategy
		.extract_token(br#"{"access_token":"abc123","expires_in":3600,"resource_server":"auth.globus.org"}"#)
		.expect("Default strategy should extract the token.");

	assert_eq!(token.token_value(), "abc123");
	assert_eq!(token.get("resource_server").and_then(|v| v.as_str()), Some("auth.globus.org"));

	let err = DefaultProviderStrategy
		.extract_token(br#"{"expires_in":3600}"#)
		.expect_err("Missing token must fail.");

	assert!(matches!(err, ExtractError::Extraction(TokenExtractionError::MissingField { .. })));
}

#[test]
fn custom_strategy_can_augment_token_requests() {
	struct ResourceStrategy;
	impl ProviderStrategy for ResourceStrategy {
		fn augment_token_request(&self, params: &mut BTreeMap<String, String>) {
			params.insert("resource".into(), "transfer.api.globus.org".into());
		}
	}

	let strategy: Arc<dyn ProviderStrategy> = Arc::new(ResourceStrategy);
	let mut params = BTreeMap::new();

	params.insert("grant_type".into(), "authorization_code".into());
	strategy.augment_token_request(&mut params);

	assert_eq!(params.get("resource").map(String::as_str), Some("transfer.api.globus.org"));
	assert!(strategy.extract_token(br#"{"access_token":"still-default"}"#).is_ok());
}

#[test]
fn closure_strategy_can_read_nested_tokens() {
	let strategy = ExtractWith(|body: &[u8]| -> Result<AccessToken, ExtractError> {
		let payload = parse_json_object(body)?;
		let nested = payload
			.get("other_tokens")
			.and_then(|v| v.as_array())
			.and_then(|tokens| tokens.first())
			.and_then(|v| v.as_object())
			.and_then(|v| v.get("access_token"))
			.and_then(|v| v.as_str())
			.ok_or(TokenExtractionError::MissingField { field: "other_tokens[0].access_token".into() })?
			.to_owned();

		Ok(AccessToken::new(nested, payload))
	});
	let token = strategy
		.extract_token(br#"{"access_token":"login","other_tokens":[{"access_token":"transfer"}]}"#)
		.expect("Closure strategy should extract the nested token.");

	assert_eq!(token.token_value(), "transfer");
	assert!(extract_json_token(b"{}", "access_token").is_err());
}
