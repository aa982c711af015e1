//! Optional observability helpers for backend operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `defyventures_oauth2.backend` with the `op`
//!   (operation), `stage` (call site), and `outcome` fields.
//! - Enable `metrics` to increment the `defyventures_oauth2_op_total` counter for every
//!   attempt/success/failure, labeled by `op` + `outcome`.

mod counter;
mod span;

pub use counter::*;
pub use span::*;

// self
use crate::_prelude::*;

/// Backend operations observed by the instrumentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendOp {
	/// Building authorization request parameters.
	AuthParams,
	/// Building token-request headers.
	AuthHeaders,
	/// Fetching the user profile.
	UserData,
	/// Normalizing the user profile.
	UserDetails,
}
impl BackendOp {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			BackendOp::AuthParams => "auth_params",
			BackendOp::AuthHeaders => "auth_headers",
			BackendOp::UserData => "user_data",
			BackendOp::UserDetails => "user_details",
		}
	}
}
impl Display for BackendOp {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpOutcome {
	/// Entry to a backend operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OpOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpOutcome::Attempt => "attempt",
			OpOutcome::Success => "success",
			OpOutcome::Failure => "failure",
		}
	}

	/// Maps a result to its terminal outcome.
	pub fn of<T, E>(result: &std::result::Result<T, E>) -> Self {
		if result.is_ok() { OpOutcome::Success } else { OpOutcome::Failure }
	}
}
impl Display for OpOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs a synchronous backend operation inside its span and records the outcome.
pub(crate) fn observe<T, E>(
	op: BackendOp,
	stage: &'static str,
	f: impl FnOnce() -> std::result::Result<T, E>,
) -> std::result::Result<T, E> {
	let span = OpSpan::new(op, stage);

	span.record_outcome(OpOutcome::Attempt);

	let result = span.in_scope(f);

	span.record_outcome(OpOutcome::of(&result));

	result
}
