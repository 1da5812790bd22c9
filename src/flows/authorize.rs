//! Authorization URL construction.
//!
//! Rendering is pure: the same config and credentials always produce the same URL and no request
//! leaves the process. The callback is validated before the template is touched.

// self
use crate::{
	_prelude::*,
	auth::ClientCredentials,
	error::ConfigError,
	flows::{
		AuthCodeClient,
		common::{self, encode_component},
	},
	http::TokenHttpClient,
	oauth::TransportErrorMapper,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::ProviderConfig,
};

/// Builds the URL the end user's browser is sent to.
///
/// `redirect_uri` is percent-encoded and the configured scopes are joined with `%20`.
/// `client_id` is substituted without encoding of its own. The rendered string is then parsed
/// as a [`Url`], which percent-encodes bytes a query cannot hold (spaces, non-ASCII) while
/// reserved characters keep their URL meaning: a `#` in `client_id` starts the fragment and
/// pushes the remaining parameters out of the query.
///
/// ```
/// use oauth2_globus::{auth::ClientCredentials, flows::build_authorization_url, provider::globus};
///
/// let config = globus::config().unwrap();
/// let url = build_authorization_url(&config, &ClientCredentials::new("cid1", "https://app.test/cb"))
/// 	.unwrap();
///
/// assert_eq!(
/// 	url.as_str(),
/// 	"https://auth.globus.org/v2/oauth2/authorize?response_type=code&client_id=cid1&redirect_uri=https%3A%2F%2Fapp.test%2Fcb&scope=openid%20email%20profile"
/// );
/// ```
pub fn build_authorization_url(config: &ProviderConfig, creds: &ClientCredentials) -> Result<Url> {
	const KIND: FlowKind = FlowKind::Authorize;

	let span = FlowSpan::new(KIND, config.id.as_ref());

	obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

	let result = {
		let _guard = span.entered();

		span.event("rendering authorization url");

		render(config, creds)
	};

	span.record_result(&result);
	obs::record_flow_result(KIND, &result);

	result
}

impl<C, M> AuthCodeClient<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Builds the authorize URL for this client's provider.
	pub fn authorization_url(&self, creds: &ClientCredentials) -> Result<Url> {
		build_authorization_url(&self.config, creds)
	}
}

fn render(config: &ProviderConfig, creds: &ClientCredentials) -> Result<Url> {
	creds.validated_callback()?;

	let rendered = config.authorization_endpoint.render(
		&creds.client_id,
		&encode_component(&creds.callback_url),
		&common::format_scope(&config.scopes),
	);

	Ok(Url::parse(&rendered).map_err(|source| ConfigError::InvalidAuthorizationUrl { source })?)
}
