//! Demonstrates plugging a custom HTTP client and error mapper into [`AuthCodeClient`].
//!
//! 1. Implement [`TokenHttpClient`] so each exchange gets an [`AsyncHttpClient`] handle.
//! 2. Provide a [`TransportErrorMapper`] that understands the transport's error type.
//! 3. Wrap both in `Arc` and pass them to [`AuthCodeClient::with_http_client`].

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
	sync::Arc,
};
// crates.io
use color_eyre::Result;
// self
use oauth2_globus::{
	auth::ClientCredentials,
	error::{Error, TransportError},
	flows::AuthCodeClient,
	http::TokenHttpClient,
	oauth::{
		TransportErrorMapper,
		oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse},
	},
	provider::{DefaultProviderStrategy, ProviderStrategy, globus},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let strategy: Arc<dyn ProviderStrategy> = Arc::new(DefaultProviderStrategy);
	let client: AuthCodeClient<OfflineHttpClient, OfflineTransportErrorMapper> =
		AuthCodeClient::with_http_client(
			globus::config()?,
			strategy,
			Arc::new(OfflineHttpClient),
			Arc::new(OfflineTransportErrorMapper),
		);
	let creds = ClientCredentials::new("demo-client", "https://app.example.com/oauth/callback");

	println!("Authorize URL: {}.", client.authorization_url(&creds)?);

	match client.exchange_code("demo-code", &creds).await {
		Ok(token) => println!("Unexpected token: {token:?}."),
		Err(Error::Transport(err)) => println!("Custom transport surfaced: {err}."),
		Err(other) => return Err(other.into()),
	}

	Ok(())
}

#[derive(Debug)]
struct OfflineError;
impl Display for OfflineError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Network is offline.")
	}
}
impl StdError for OfflineError {}

struct OfflineHttpClient;
impl TokenHttpClient for OfflineHttpClient {
	type Handle = OfflineHandle;
	type TransportError = OfflineError;

	fn handle(&self) -> Self::Handle {
		OfflineHandle
	}
}

struct OfflineHandle;
impl<'c> AsyncHttpClient<'c> for OfflineHandle {
	type Error = HttpClientError<OfflineError>;
	type Future = Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		Box::pin(async move {
			println!("Would send {} {}.", request.method(), request.uri());

			Err(HttpClientError::Reqwest(Box::new(OfflineError)))
		})
	}
}

struct OfflineTransportErrorMapper;
impl TransportErrorMapper<OfflineError> for OfflineTransportErrorMapper {
	fn map_transport_error(&self, err: HttpClientError<OfflineError>) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => TransportError::network(*inner).into(),
			other => TransportError::Cancelled { reason: format!("Offline transport: {other}") }.into(),
		}
	}
}
