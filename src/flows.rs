//! Authorization-code operations driven by an [`AuthCodeClient`].

pub mod common;

mod authorize;
mod exchange;

pub use authorize::build_authorization_url;
pub use common::*;

// self
use crate::{
	_prelude::*,
	http::TokenHttpClient,
	oauth::TransportErrorMapper,
	provider::{ProviderConfig, ProviderStrategy},
};
#[cfg(feature = "reqwest")]
use crate::{
	error::ConfigError,
	http::ReqwestHttpClient,
	oauth::ReqwestTransportErrorMapper,
	provider::{DefaultProviderStrategy, globus},
};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestAuthCodeClient = AuthCodeClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Runs the authorization-code grant against a single provider config.
///
/// The client owns the HTTP transport, the error mapper, the immutable provider config, and the
/// strategy that reads tokens out of responses. It carries no mutable state, so one instance
/// can serve any number of concurrent exchanges; each call to
/// [`exchange_code`](AuthCodeClient::exchange_code) sends exactly one request.
#[derive(Clone)]
pub struct AuthCodeClient<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Provider config that defines endpoints, scopes, and token request shape.
	pub config: ProviderConfig,
	/// Strategy responsible for token extraction and request adjustments.
	pub strategy: Arc<dyn ProviderStrategy>,
}
impl<C, M> AuthCodeClient<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		config: ProviderConfig,
		strategy: Arc<dyn ProviderStrategy>,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self { http_client: http_client.into(), transport_mapper: mapper.into(), config, strategy }
	}

	/// Replaces the token extraction strategy.
	pub fn with_strategy(mut self, strategy: Arc<dyn ProviderStrategy>) -> Self {
		self.strategy = strategy;

		self
	}
}
#[cfg(feature = "reqwest")]
impl AuthCodeClient<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client with its own redirect-free reqwest transport.
	pub fn new(config: ProviderConfig, strategy: Arc<dyn ProviderStrategy>) -> Result<Self, ConfigError> {
		Ok(Self::with_http_client(
			config,
			strategy,
			ReqwestHttpClient::new()?,
			Arc::new(ReqwestTransportErrorMapper),
		))
	}

	/// Creates a Globus Auth client using [`DefaultProviderStrategy`].
	pub fn globus() -> Result<Self> {
		let config = globus::config().map_err(ConfigError::from)?;

		Ok(Self::new(config, Arc::new(DefaultProviderStrategy))?)
	}
}
impl<C, M> Debug for AuthCodeClient<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthCodeClient").field("config", &self.config).finish()
	}
}

