//! Shared helpers for the authorize and exchange operations.

// crates.io
use url::form_urlencoded;
// self
use crate::{_prelude::*, auth::ScopeSet, error::ConfigError};

/// Encoded separator placed between scopes in the authorize URL.
pub const SCOPE_SEPARATOR: &str = "%20";

/// Percent-encodes a query component the way OAuth 1.0a signature base strings do.
///
/// Unreserved characters (`A-Z a-z 0-9 - . _ ~`) pass through, spaces become `%20`, and every
/// other byte becomes `%XX`.
pub fn encode_component(value: &str) -> String {
	form_urlencoded::byte_serialize(value.as_bytes())
		.collect::<String>()
		.replace('+', "%20")
		.replace('*', "%2A")
		.replace("%7E", "~")
}

/// Joins scopes with [`SCOPE_SEPARATOR`] so they embed verbatim in a query string.
pub(crate) fn format_scope(scope: &ScopeSet) -> String {
	scope.join(SCOPE_SEPARATOR)
}

/// Rejects empty authorization codes before any request is built.
pub(crate) fn validate_code(code: &str) -> Result<(), ConfigError> {
	if code.trim().is_empty() {
		return Err(ConfigError::invalid_field("code", "authorization code must not be empty"));
	}

	Ok(())
}
