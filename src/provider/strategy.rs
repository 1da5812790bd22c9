//! Provider strategy hooks that customize token exchanges.
//!
//! Implementations pull the access token out of the provider's response and may decorate
//! outgoing token requests without tying flows to any particular HTTP client.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	error::{ExtractError, TokenExtractionError},
};

/// Field conventionally carrying the access token in OAuth 2.0 JSON responses.
pub const ACCESS_TOKEN_FIELD: &str = "access_token";

/// Strategy hook that lets providers extract tokens and decorate requests.
///
/// Implementors are required to be `Send + Sync`, and the hooks use crate-owned data types so
/// downstream crates never depend on reqwest-specific structures. Both hooks have defaults:
/// [`extract_token`](Self::extract_token) reads `access_token` from a JSON object and
/// [`augment_token_request`](Self::augment_token_request) does nothing.
pub trait ProviderStrategy: Send + Sync {
	/// Turns a successful (2xx) token endpoint body into an [`AccessToken`].
	fn extract_token(&self, body: &[u8]) -> Result<AccessToken, ExtractError> {
		extract_json_token(body, ACCESS_TOKEN_FIELD)
	}

	/// Gives providers a chance to add custom parameters before dispatching.
	///
	/// The map already holds `grant_type`, `code`, `redirect_uri`, and `client_id`; entries
	/// written here are sent with them.
	fn augment_token_request(&self, _params: &mut BTreeMap<String, String>) {}
}

/// Default strategy: JSON object body, token in `access_token`.
#[derive(Debug, Default)]
pub struct DefaultProviderStrategy;
impl Display for DefaultProviderStrategy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("default-provider-strategy")
	}
}
impl ProviderStrategy for DefaultProviderStrategy {}

/// Strategy backed by a plain function or closure.
///
/// ```
/// use oauth2_globus::{
/// 	auth::AccessToken,
/// 	error::ExtractError,
/// 	provider::{ExtractWith, parse_json_object},
/// };
///
/// let strategy = ExtractWith(|body: &[u8]| -> Result<AccessToken, ExtractError> {
/// 	let payload = parse_json_object(body)?;
/// 	let token = payload.get("token").and_then(|v| v.as_str()).unwrap_or_default().to_owned();
///
/// 	Ok(AccessToken::new(token, payload))
/// });
/// # let _ = strategy;
/// ```
pub struct ExtractWith<F>(pub F);
impl<F> ProviderStrategy for ExtractWith<F>
where
	F: Send + Sync + Fn(&[u8]) -> Result<AccessToken, ExtractError>,
{
	fn extract_token(&self, body: &[u8]) -> Result<AccessToken, ExtractError> {
		(self.0)(body)
	}
}
impl<F> Debug for ExtractWith<F> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("ExtractWith(..)")
	}
}

/// Parses a response body as a JSON object, keeping the path of any parse failure.
pub fn parse_json_object(
	body: &[u8],
) -> Result<JsonMap<String, JsonValue>, serde_path_to_error::Error<serde_json::Error>> {
	let mut de = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut de)
}

/// Parses `body` and extracts `field` as the token, keeping the full payload.
pub fn extract_json_token(body: &[u8], field: &str) -> Result<AccessToken, ExtractError> {
	let payload = parse_json_object(body)?;
	let token = match payload.get(field) {
		None | Some(JsonValue::Null) =>
			return Err(TokenExtractionError::MissingField { field: field.to_owned() }.into()),
		Some(JsonValue::String(value)) if !value.is_empty() => value.clone(),
		Some(_) => return Err(TokenExtractionError::NotAString { field: field.to_owned() }.into()),
	};

	Ok(AccessToken::new(token, payload))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn default_strategy_keeps_every_field() {
		let token = DefaultProviderStrategy
			.extract_token(br#"{"access_token":"abc123","expires_in":3600}"#)
			.expect("Token should extract.");

		assert_eq!(token.token_value(), "abc123");
		assert_eq!(token.get("expires_in"), Some(&JsonValue::from(3600)));
		assert_eq!(token.raw_response().len(), 2);
	}

	#[test]
	fn default_strategy_reports_missing_or_mistyped_token() {
		let err = DefaultProviderStrategy
			.extract_token(br#"{"expires_in":3600}"#)
			.expect_err("Missing token must fail.");

		assert!(matches!(
			err,
			ExtractError::Extraction(TokenExtractionError::MissingField { ref field }) if field == "access_token"
		));

		for body in [&br#"{"access_token":42}"#[..], br#"{"access_token":""}"#] {
			let err = DefaultProviderStrategy.extract_token(body).expect_err("Bad token must fail.");

			assert!(matches!(err, ExtractError::Extraction(TokenExtractionError::NotAString { .. })));
		}
	}

	#[test]
	fn non_object_bodies_are_malformed() {
		for body in [&b"<html>error</html>"[..], b"[1,2,3]", b"\"token\"", b""] {
			let err = DefaultProviderStrategy.extract_token(body).expect_err("Body must be rejected.");

			assert!(matches!(err, ExtractError::Malformed(_)));
		}
	}

	#[test]
	fn closure_strategies_replace_extraction() {
		let strategy = ExtractWith(|body: &[u8]| extract_json_token(body, "token"));
		let token = strategy
			.extract_token(br#"{"token":"from-closure"}"#)
			.expect("Closure strategy should extract.");

		assert_eq!(token.token_value(), "from-closure");

		let mut params = BTreeMap::new();

		strategy.augment_token_request(&mut params);

		assert!(params.is_empty());
	}
}
