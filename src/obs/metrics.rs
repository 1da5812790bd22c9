// self
use crate::{
	_prelude::*,
	obs::{FlowKind, FlowOutcome},
};

/// Records a flow outcome via the global metrics recorder (when enabled).
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth2_globus_flow_total",
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records the final outcome of a call, plus `oauth2_globus_flow_errors_total` on failure.
pub fn record_flow_result<T>(kind: FlowKind, result: &Result<T>) {
	match result {
		Ok(_) => record_flow_outcome(kind, FlowOutcome::Success),
		Err(e) => {
			record_flow_outcome(kind, FlowOutcome::Failure);

			#[cfg(feature = "metrics")]
			{
				metrics::counter!(
					"oauth2_globus_flow_errors_total",
					"flow" => kind.as_str(),
					"error" => e.kind()
				)
				.increment(1);
			}
			#[cfg(not(feature = "metrics"))]
			{
				let _ = e;
			}
		},
	}
}
