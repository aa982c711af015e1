// self
use crate::{
	_prelude::*,
	obs::{BackendOp, OpOutcome, counter},
};

/// Future returned by [`OpSpan::instrument`]; a passthrough when tracing is disabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOp<F> = tracing::instrument::Instrumented<F>;
/// Future returned by [`OpSpan::instrument`]; a passthrough when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOp<F> = F;

/// Observation scope for one backend call.
///
/// The span carries `provider`, `op`, and `stage` fields plus an `outcome` field that is filled
/// in by [`OpSpan::record_outcome`], which also feeds the outcome counter.
#[derive(Clone, Debug)]
pub struct OpSpan {
	op: BackendOp,
	stage: &'static str,
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OpSpan {
	/// Opens a span for `op` at the given call site.
	pub fn new(op: BackendOp, stage: &'static str) -> Self {
		Self {
			op,
			stage,
			#[cfg(feature = "tracing")]
			span: tracing::info_span!(
				"defyventures_oauth2.backend",
				provider = crate::provider::NAME,
				op = op.as_str(),
				stage,
				outcome = tracing::field::Empty,
			),
		}
	}

	/// Operation this span observes.
	pub fn op(&self) -> BackendOp {
		self.op
	}

	/// Call site label.
	pub fn stage(&self) -> &'static str {
		self.stage
	}

	/// Stamps `outcome` on the span and increments the counter for this operation.
	pub fn record_outcome(&self, outcome: OpOutcome) {
		#[cfg(feature = "tracing")]
		self.span.record("outcome", outcome.as_str());

		counter::record_op_outcome(self.op, outcome);
	}

	/// Runs a synchronous section inside the span.
	pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
		#[cfg(feature = "tracing")]
		{
			self.span.in_scope(f)
		}
		#[cfg(not(feature = "tracing"))]
		{
			f()
		}
	}

	/// Attaches the span to an async section without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOp<Fut>
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
