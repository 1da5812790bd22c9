//! Caller-owned client identity used by both flow steps.

// self
use crate::{_prelude::*, auth::Secret, error::ConfigError};

/// Client identity and callback address registered with the provider.
///
/// The struct is owned by the caller and only ever borrowed by the flows. The callback is
/// kept as the raw string the caller registered; it is validated on every use rather than at
/// construction so the same value can be round-tripped verbatim into the authorize URL.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCredentials {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// Redirect URI the provider sends the user back to.
	pub callback_url: String,
	/// Client secret for confidential clients.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client_secret: Option<Secret>,
}
impl ClientCredentials {
	/// Creates credentials for a public client (no secret).
	pub fn new(client_id: impl Into<String>, callback_url: impl Into<String>) -> Self {
		Self { client_id: client_id.into(), callback_url: callback_url.into(), client_secret: None }
	}

	/// Attaches a client secret used to authenticate at the token endpoint.
	pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
		self.client_secret = Some(Secret::new(secret));

		self
	}

	/// Parses and validates the callback as an absolute URL with a host.
	pub fn validated_callback(&self) -> Result<Url, ConfigError> {
		validate_callback(&self.callback_url)
	}
}
impl Debug for ClientCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentials")
			.field("client_id", &self.client_id)
			.field("callback_url", &self.callback_url)
			.field("client_secret_set", &self.client_secret.is_some())
			.finish()
	}
}

const CALLBACK_FIELD: &str = "callback_url";

fn validate_callback(raw: &str) -> Result<Url, ConfigError> {
	if raw.trim().is_empty() {
		return Err(ConfigError::invalid_field(CALLBACK_FIELD, "must provide a valid url as callback"));
	}

	let url = Url::parse(raw).map_err(|e| ConfigError::invalid_field(CALLBACK_FIELD, e.to_string()))?;

	if url.cannot_be_a_base() || !url.has_host() {
		return Err(ConfigError::invalid_field(
			CALLBACK_FIELD,
			format!("`{raw}` is not a hierarchical URL with a host"),
		));
	}

	Ok(url)
}
