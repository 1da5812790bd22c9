//! OAuth wire layer: token request construction, response mapping, and transport error
//! mapping.

pub use oauth2;

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use oauth2::{
	HttpClientError, HttpRequest, HttpResponse,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ClientCredentials},
	error::{ConfigError, TransportError, lossy_body},
	http::parse_retry_after,
	provider::{ClientAuthMethod, ProviderConfig, ProviderStrategy, TokenRequestVerb, parse_json_object},
};

const GRANT_TYPE: &str = "authorization_code";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_ACCEPT: &str = "application/json";

/// Maps HTTP transport failures into crate [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a crate error.
	fn map_transport_error(&self, error: HttpClientError<E>) -> Error;
}

/// Mapper for arbitrary transports; every transport failure becomes a network error.
#[derive(Clone, Debug, Default)]
pub struct DefaultTransportErrorMapper;
impl<E> TransportErrorMapper<E> for DefaultTransportErrorMapper
where
	E: 'static + Send + Sync + StdError,
{
	fn map_transport_error(&self, err: HttpClientError<E>) -> Error {
		map_common_transport_error(err)
	}
}

/// Default mapper for reqwest-backed transports; distinguishes timeouts from other failures.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, err: HttpClientError<ReqwestError>) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(*inner),
			other => map_common_transport_error(other),
		}
	}
}

/// Token request parameters for a single authorization-code exchange.
#[derive(Clone)]
pub(crate) struct TokenRequest {
	pub(crate) endpoint: Url,
	pub(crate) verb: TokenRequestVerb,
	pub(crate) params: BTreeMap<String, String>,
	pub(crate) basic_auth: Option<String>,
}
impl TokenRequest {
	/// Collects `grant_type`, `code`, `redirect_uri`, and `client_id` plus client auth.
	pub(crate) fn authorization_code(
		config: &ProviderConfig,
		strategy: &dyn ProviderStrategy,
		code: &str,
		creds: &ClientCredentials,
	) -> Self {
		let mut params = BTreeMap::new();

		params.insert("grant_type".into(), GRANT_TYPE.into());
		params.insert("code".into(), code.into());
		params.insert("redirect_uri".into(), creds.callback_url.clone());
		params.insert("client_id".into(), creds.client_id.clone());

		let mut basic_auth = None;

		if let Some(secret) = &creds.client_secret {
			match config.client_auth_method {
				ClientAuthMethod::ClientSecretPost => {
					params.insert("client_secret".into(), secret.expose().into());
				},
				ClientAuthMethod::ClientSecretBasic =>
					basic_auth = Some(basic_credentials(&creds.client_id, secret.expose())),
			}
		}

		strategy.augment_token_request(&mut params);

		Self { endpoint: config.token_endpoint.clone(), verb: config.token_request_verb, params, basic_auth }
	}

	/// Encodes the request for the transport.
	pub(crate) fn into_http_request(self) -> Result<HttpRequest, ConfigError> {
		let encoded = form_urlencoded::Serializer::new(String::new())
			.extend_pairs(self.params.iter())
			.finish();
		let (method, uri, body, content_type) = match self.verb {
			TokenRequestVerb::Post => (Method::POST, self.endpoint, encoded.into_bytes(), Some(FORM_CONTENT_TYPE)),
			TokenRequestVerb::Get => {
				let mut url = self.endpoint;

				url.query_pairs_mut().extend_pairs(self.params.iter());

				(Method::GET, url, Vec::new(), None)
			},
		};
		let mut builder = Request::builder().method(method).uri(uri.as_str()).header(ACCEPT, JSON_ACCEPT);

		if let Some(content_type) = content_type {
			builder = builder.header(CONTENT_TYPE, content_type);
		}
		if let Some(credentials) = &self.basic_auth {
			builder = builder.header(AUTHORIZATION, format!("Basic {credentials}"));
		}

		Ok(builder.body(body)?)
	}
}
impl Debug for TokenRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenRequest")
			.field("endpoint", &self.endpoint.as_str())
			.field("verb", &self.verb)
			.field("params", &self.params.keys().collect::<Vec<_>>())
			.field("basic_auth", &self.basic_auth.as_ref().map(|_| "<redacted>"))
			.finish()
	}
}

/// Turns the token endpoint response into an [`AccessToken`] or a taxonomy error.
pub(crate) fn map_token_response(
	strategy: &dyn ProviderStrategy,
	response: HttpResponse,
) -> Result<AccessToken> {
	let status = response.status();
	let body = response.body();

	if !status.is_success() {
		return Err(map_rejection(status.as_u16(), parse_retry_after(response.headers()), body));
	}

	strategy.extract_token(body).map_err(|e| e.into_error(status.as_u16(), body))
}

fn map_rejection(status: u16, retry_after: Option<Duration>, body: &[u8]) -> Error {
	let payload = parse_json_object(body).ok();
	let field = |key: &str| {
		payload.as_ref().and_then(|map| map.get(key)).and_then(JsonValue::as_str).map(str::to_owned)
	};

	Error::ProviderRejected {
		status,
		body: lossy_body(body),
		error: field("error"),
		error_description: field("error_description"),
		retry_after,
	}
}

fn basic_credentials(client_id: &str, secret: &str) -> String {
	let id = form_urlencoded::byte_serialize(client_id.as_bytes()).collect::<String>();
	let secret = form_urlencoded::byte_serialize(secret.as_bytes()).collect::<String>();

	STANDARD.encode(format!("{id}:{secret}"))
}

fn map_common_transport_error<E>(err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Network { source: message.into() }.into(),
		HttpClientError::Reqwest(inner) => TransportError::Network { source: inner }.into(),
		_ => TransportError::Network {
			source: "HTTP client error occurred while calling the token endpoint".into(),
		}
		.into(),
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}
	if err.is_timeout() {
		return TransportError::Cancelled {
			reason: "request timed out while calling the token endpoint".into(),
		}
		.into();
	}

	TransportError::from(err).into()
}
