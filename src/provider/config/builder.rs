// self
use crate::{
	_prelude::*,
	auth::{ProviderId, ScopeSet},
	provider::{AuthorizationTemplate, ClientAuthMethod, ProviderConfig, TokenRequestVerb},
};

/// Errors raised while constructing or validating provider configurations.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ProviderConfigError {
	/// Authorization endpoint template is required.
	#[error("Missing authorization endpoint.")]
	MissingAuthorizationEndpoint,
	/// Token endpoint is mandatory.
	#[error("Missing token endpoint.")]
	MissingTokenEndpoint,
	/// At least one scope must be requested.
	#[error("Provider config must request at least one scope.")]
	NoScopes,
	/// Endpoints must use HTTPS.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Authorization template failed to parse.
	#[error(transparent)]
	Template(#[from] crate::provider::TemplateError),
	/// Endpoint URL failed to parse.
	#[error("The {endpoint} endpoint is not a valid URL: {reason}.")]
	InvalidUrl {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Parser message.
		reason: String,
	},
	/// Scope list failed validation.
	#[error(transparent)]
	Scope(#[from] crate::auth::ScopeValidationError),
	/// Provider identifier failed validation.
	#[error(transparent)]
	Identifier(#[from] crate::auth::IdentifierError),
}

/// Builder for [`ProviderConfig`] values.
#[derive(Debug)]
pub struct ProviderConfigBuilder {
	/// Identifier for the config being constructed.
	pub id: ProviderId,
	/// Authorize URL template.
	pub authorization_endpoint: Option<AuthorizationTemplate>,
	/// Token endpoint used for exchanges.
	pub token_endpoint: Option<Url>,
	/// Token request verb.
	pub token_request_verb: TokenRequestVerb,
	/// Requested scopes.
	pub scopes: ScopeSet,
	/// Client authentication method for the token endpoint.
	pub client_auth_method: ClientAuthMethod,
}
impl ProviderConfigBuilder {
	/// Creates a new builder seeded with the provided identifier.
	pub fn new(id: ProviderId) -> Self {
		Self {
			id,
			authorization_endpoint: None,
			token_endpoint: None,
			token_request_verb: TokenRequestVerb::default(),
			scopes: ScopeSet::default(),
			client_auth_method: ClientAuthMethod::default(),
		}
	}

	/// Sets the authorize URL template.
	pub fn authorization_endpoint(mut self, template: AuthorizationTemplate) -> Self {
		self.authorization_endpoint = Some(template);

		self
	}

	/// Parses and sets the authorize URL template from a string.
	pub fn authorization_template(
		self,
		template: impl Into<String>,
	) -> Result<Self, ProviderConfigError> {
		Ok(self.authorization_endpoint(AuthorizationTemplate::new(template)?))
	}

	/// Sets the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Parses and sets the token endpoint from a string.
	pub fn token_endpoint_str(self, url: &str) -> Result<Self, ProviderConfigError> {
		let url = Url::parse(url).map_err(|e| ProviderConfigError::InvalidUrl {
			endpoint: "token",
			reason: e.to_string(),
		})?;

		Ok(self.token_endpoint(url))
	}

	/// Overrides the token request verb.
	pub fn token_request_verb(mut self, verb: TokenRequestVerb) -> Self {
		self.token_request_verb = verb;

		self
	}

	/// Sets the requested scopes.
	pub fn scopes(mut self, scopes: ScopeSet) -> Self {
		self.scopes = scopes;

		self
	}

	/// Overrides the client authentication method.
	pub fn client_auth_method(mut self, method: ClientAuthMethod) -> Self {
		self.client_auth_method = method;

		self
	}

	/// Consumes the builder and validates the resulting config.
	pub fn build(self) -> Result<ProviderConfig, ProviderConfigError> {
		let authorization_endpoint = self
			.authorization_endpoint
			.ok_or(ProviderConfigError::MissingAuthorizationEndpoint)?;
		let token_endpoint =
			self.token_endpoint.ok_or(ProviderConfigError::MissingTokenEndpoint)?;
		let config = ProviderConfig {
			id: self.id,
			authorization_endpoint,
			token_endpoint,
			token_request_verb: self.token_request_verb,
			scopes: self.scopes,
			client_auth_method: self.client_auth_method,
		};

		config.validate()?;

		Ok(config)
	}
}

impl ProviderConfig {
	/// Validates invariants for the config.
	pub fn validate(&self) -> Result<(), ProviderConfigError> {
		if self.scopes.is_empty() {
			return Err(ProviderConfigError::NoScopes);
		}

		validate_endpoint("authorization", &self.authorization_endpoint.sample_url()?)?;
		validate_endpoint("token", &self.token_endpoint)?;

		Ok(())
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ProviderConfigError> {
	if url.scheme() != "https" {
		Err(ProviderConfigError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	} else {
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const TEMPLATE: &str = "https://idp.example/authorize?response_type=code&client_id={client_id}&redirect_uri={redirect_uri}&scope={scope}";

	fn builder() -> ProviderConfigBuilder {
		ProviderConfig::builder(ProviderId::new("idp").expect("Provider id fixture should be valid."))
	}

	fn scopes() -> ScopeSet {
		ScopeSet::new(["openid"]).expect("Scope fixture should be valid.")
	}

	#[test]
	fn build_requires_endpoints_and_scopes() {
		assert_eq!(
			builder().build().expect_err("Empty builder must fail."),
			ProviderConfigError::MissingAuthorizationEndpoint
		);

		let err = builder()
			.authorization_template(TEMPLATE)
			.expect("Template fixture should parse.")
			.token_endpoint_str("https://idp.example/token")
			.expect("Token URL fixture should parse.")
			.build()
			.expect_err("Missing scopes must fail.");

		assert_eq!(err, ProviderConfigError::NoScopes);
	}

	#[test]
	fn build_rejects_plain_http() {
		let err = builder()
			.authorization_template(TEMPLATE)
			.expect("Template fixture should parse.")
			.token_endpoint_str("http://idp.example/token")
			.expect("Token URL fixture should parse.")
			.scopes(scopes())
			.build()
			.expect_err("Plain HTTP token endpoint must fail.");

		assert!(matches!(err, ProviderConfigError::InsecureEndpoint { endpoint: "token", .. }));

		let err = builder()
			.authorization_template(TEMPLATE.replacen("https", "http", 1))
			.expect("Template fixture should parse.")
			.token_endpoint_str("https://idp.example/token")
			.expect("Token URL fixture should parse.")
			.scopes(scopes())
			.build()
			.expect_err("Plain HTTP authorize endpoint must fail.");

		assert!(matches!(err, ProviderConfigError::InsecureEndpoint { endpoint: "authorization", .. }));
	}

	#[test]
	fn build_keeps_overrides() {
		let config = builder()
			.authorization_template(TEMPLATE)
			.expect("Template fixture should parse.")
			.token_endpoint_str("https://idp.example/token")
			.expect("Token URL fixture should parse.")
			.token_request_verb(TokenRequestVerb::Get)
			.client_auth_method(ClientAuthMethod::ClientSecretBasic)
			.scopes(scopes())
			.build()
			.expect("Config should build.");

		assert_eq!(config.token_request_verb, TokenRequestVerb::Get);
		assert_eq!(config.client_auth_method, ClientAuthMethod::ClientSecretBasic);
		assert_eq!(config.token_endpoint.as_str(), "https://idp.example/token");
	}
}
