// self
use crate::{_prelude::*, obs::FlowKind};
#[cfg(feature = "tracing")] use crate::obs::FlowOutcome;

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// Span wrapping one authorize or token-exchange call.
///
/// Carries `flow` and `provider` from the start; `outcome` and `error` are filled in by
/// [`FlowSpan::record_result`] once the call finishes.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a span tagged with the operation and the provider it targets.
	pub fn new(kind: FlowKind, provider: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"oauth2_globus.flow",
				flow = kind.as_str(),
				provider,
				outcome = tracing::field::Empty,
				error = tracing::field::Empty,
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, provider);

			Self {}
		}
	}

	/// Emits a debug event inside the span.
	pub fn event(&self, message: &'static str) {
		#[cfg(feature = "tracing")]
		{
			tracing::debug!(parent: &self.span, "{message}");
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = message;
		}
	}

	/// Stamps the span with the call's outcome and, on failure, the error kind.
	pub fn record_result<T>(&self, result: &Result<T>) {
		#[cfg(feature = "tracing")]
		{
			match result {
				Ok(_) => {
					self.span.record("outcome", FlowOutcome::Success.as_str());
				},
				Err(e) => {
					self.span.record("outcome", FlowOutcome::Failure.as_str());
					self.span.record("error", e.kind());

					tracing::warn!(parent: &self.span, error = e.kind(), "{e}");
				},
			}
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = result;
		}
	}

	/// Enters the span for synchronous sections.
	pub fn entered(&self) -> FlowSpanGuard<'_> {
		#[cfg(feature = "tracing")]
		{
			FlowSpanGuard { guard: self.span.enter() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			FlowSpanGuard { _span: std::marker::PhantomData }
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// RAII guard returned by [`FlowSpan::entered`].
pub struct FlowSpanGuard<'a> {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::Entered<'a>,
	#[cfg(not(feature = "tracing"))]
	_span: std::marker::PhantomData<&'a FlowSpan>,
}
impl Debug for FlowSpanGuard<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("FlowSpanGuard(..)")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::ConfigError;

	#[test]
	fn flow_span_records_results() {
		let span = FlowSpan::new(FlowKind::Authorize, "globus");

		{
			let _guard = span.entered();

			span.event("rendering authorization url");
		}

		span.record_result(&Ok(()));
		span.record_result::<()>(&Err(ConfigError::invalid_field("callback_url", "empty").into()));
	}

	#[cfg(feature = "tracing")]
	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = FlowSpan::new(FlowKind::TokenExchange, "globus");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
