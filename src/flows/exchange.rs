//! Authorization code exchange.
//!
//! [`AuthCodeClient::exchange_code`] validates its inputs, sends exactly one request to the
//! token endpoint, and hands the response to the configured [`ProviderStrategy`]. Nothing is
//! retried: an authorization code is single-use, and a resend after an ambiguous failure could
//! consume it without the caller learning the outcome.
//!
//! [`ProviderStrategy`]: crate::provider::ProviderStrategy

// crates.io
use oauth2::AsyncHttpClient;
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ClientCredentials},
	flows::{AuthCodeClient, common},
	http::TokenHttpClient,
	oauth::{self, TokenRequest, TransportErrorMapper},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl<C, M> AuthCodeClient<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Trades an authorization code for an access token.
	///
	/// Input problems surface as [`Error::Config`] before any I/O. Transport failures map
	/// through [`AuthCodeClient::transport_mapper`]; non-2xx answers become
	/// [`Error::ProviderRejected`]; bodies the strategy cannot read become
	/// [`Error::MalformedResponse`] or [`Error::TokenExtraction`].
	pub async fn exchange_code(&self, code: &str, creds: &ClientCredentials) -> Result<AccessToken> {
		const KIND: FlowKind = FlowKind::TokenExchange;

		let span = FlowSpan::new(KIND, self.config.id.as_ref());

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async {
				creds.validated_callback()?;
				common::validate_code(code)?;

				let request =
					TokenRequest::authorization_code(&self.config, self.strategy.as_ref(), code, creds)
						.into_http_request()?;
				let handle = self.http_client.handle();

				span.event("sending token request");

				let response = handle
					.call(request)
					.await
					.map_err(|err| self.transport_mapper.map_transport_error(err))?;

				span.event("token endpoint responded");

				oauth::map_token_response(self.strategy.as_ref(), response)
			})
			.await;

		span.record_result(&result);
		obs::record_flow_result(KIND, &result);

		result
	}
}
