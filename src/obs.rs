//! Optional observability hooks for the authorization-code operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit spans named `oauth2_globus.flow` carrying the `flow`
//!   (`authorize` or `token_exchange`) and `provider` fields, with `outcome` and `error`
//!   recorded when the call finishes.
//! - Enable `metrics` to increment the `oauth2_globus_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow` + `outcome`, and
//!   `oauth2_globus_flow_errors_total` labeled by `flow` + `error` (see [`Error::kind`]).
//!
//! Secrets (client secret, authorization code, access token) never reach either sink.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Authorization URL construction.
	Authorize,
	/// Authorization code exchange against the token endpoint.
	TokenExchange,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Authorize => "authorize",
			FlowKind::TokenExchange => "token_exchange",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to an operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
