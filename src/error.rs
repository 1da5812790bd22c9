//! Crate-level error types shared across flows, providers, and transports.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Caller-supplied data is malformed; raised before any I/O.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Token endpoint answered with a non-success HTTP status.
	#[error("Provider rejected the token request with HTTP {status}.")]
	ProviderRejected {
		/// HTTP status code returned by the provider.
		status: u16,
		/// Raw response body, decoded lossily as UTF-8.
		body: String,
		/// OAuth `error` field, when the body carried one.
		error: Option<String>,
		/// OAuth `error_description` field, when the body carried one.
		error_description: Option<String>,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// Token endpoint body could not be parsed as a JSON object.
	#[error("Token endpoint returned a malformed response (HTTP {status}).")]
	MalformedResponse {
		/// HTTP status code of the response.
		status: u16,
		/// Raw response body kept for diagnostics.
		body: String,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Response parsed but the token could not be extracted from it.
	#[error(transparent)]
	TokenExtraction(#[from] TokenExtractionError),
}

impl Error {
	/// Stable label for the error's taxonomy bucket, used in spans and metrics.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Config(_) => "invalid_configuration",
			Self::Transport(TransportError::Cancelled { .. }) => "cancelled",
			Self::Transport(_) => "transport",
			Self::ProviderRejected { .. } => "provider_rejected",
			Self::MalformedResponse { .. } => "malformed_response",
			Self::TokenExtraction(_) => "token_extraction",
		}
	}
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A caller-supplied field failed validation.
	#[error("Field `{field}` is invalid: {reason}.")]
	InvalidField {
		/// Name of the offending field.
		field: &'static str,
		/// Human-readable validation failure.
		reason: String,
	},
	/// The rendered authorization URL could not be parsed.
	#[error("Rendered authorization URL is invalid.")]
	InvalidAuthorizationUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Provider config failed validation.
	#[error(transparent)]
	Provider(#[from] crate::provider::ProviderConfigError),
}
impl ConfigError {
	/// Shorthand for [`ConfigError::InvalidField`].
	pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
		Self::InvalidField { field, reason: reason.into() }
	}

	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, cancellation).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the token endpoint.")]
	Io(#[from] std::io::Error),
	/// The request hit its deadline or was cancelled before a response arrived.
	#[error("Token request was cancelled: {reason}.")]
	Cancelled {
		/// Short description of what cancelled the request.
		reason: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Failures raised while pulling the token out of an otherwise valid payload.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum TokenExtractionError {
	/// The payload has no such field.
	#[error("Token response is missing the `{field}` field.")]
	MissingField {
		/// Expected field name.
		field: String,
	},
	/// The field exists but is not a non-empty string.
	#[error("Token response field `{field}` is not a non-empty string.")]
	NotAString {
		/// Offending field name.
		field: String,
	},
}

/// Errors returned by token extraction strategies.
#[derive(Debug, ThisError)]
pub enum ExtractError {
	/// The body is not a JSON object.
	#[error("Response body is not a JSON object.")]
	Malformed(#[from] serde_path_to_error::Error<serde_json::Error>),
	/// The body parsed but carries no usable token.
	#[error(transparent)]
	Extraction(#[from] TokenExtractionError),
}
impl ExtractError {
	/// Lifts the strategy error into [`Error`], attaching response context.
	pub fn into_error(self, status: u16, body: &[u8]) -> Error {
		match self {
			Self::Malformed(source) =>
				Error::MalformedResponse { status, body: lossy_body(body), source },
			Self::Extraction(e) => Error::TokenExtraction(e),
		}
	}
}

pub(crate) fn lossy_body(body: &[u8]) -> String {
	String::from_utf8_lossy(body).into_owned()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn invalid_field_names_the_field() {
		let err = Error::from(ConfigError::invalid_field("callback_url", "empty value"));

		assert_eq!(err.to_string(), "Field `callback_url` is invalid: empty value.");
		assert!(matches!(err, Error::Config(ConfigError::InvalidField { field: "callback_url", .. })));
		assert_eq!(err.kind(), "invalid_configuration");
	}

	#[test]
	fn kinds_separate_cancellation_from_network() {
		let cancelled = Error::from(TransportError::Cancelled { reason: "deadline".into() });
		let network = Error::from(TransportError::network(std::io::Error::other("reset")));

		assert_eq!(cancelled.kind(), "cancelled");
		assert_eq!(network.kind(), "transport");
	}

	#[test]
	fn malformed_extract_error_keeps_body() {
		let body = b"<html>error</html>";
		let source = serde_path_to_error::deserialize::<_, JsonMap<String, JsonValue>>(
			&mut serde_json::Deserializer::from_slice(body),
		)
		.expect_err("HTML must not parse as JSON.");
		let err = ExtractError::from(source).into_error(200, body);

		match err {
			Error::MalformedResponse { status, body, .. } => {
				assert_eq!(status, 200);
				assert_eq!(body, "<html>error</html>");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}
}
