//! Optional observability helpers for provider flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth2_privacyportal.flow` with the `flow`
//!   and `stage` fields.
//! - Enable `metrics` to increment the `oauth2_privacyportal_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Provider interactions observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Building the authorization redirect.
	Authorization,
	/// Calling the token endpoint.
	AccessToken,
	/// Calling the userinfo endpoint.
	ResourceOwner,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Authorization => "authorization",
			FlowKind::AccessToken => "access_token",
			FlowKind::ResourceOwner => "resource_owner",
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
	/// Entry to a client helper.
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

	/// Maps a finished call onto its outcome label.
	pub fn of<T, E>(result: &Result<T, E>) -> Self {
		match result {
			Ok(_) => FlowOutcome::Success,
			Err(_) => FlowOutcome::Failure,
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Records the outcome of a finished flow on its span and on the flow counter.
pub fn record_flow_result<T, E>(span: &FlowSpan, kind: FlowKind, result: &Result<T, E>) {
	let outcome = FlowOutcome::of(result);

	span.record_outcome(outcome);
	record_flow_outcome(kind, outcome);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn outcomes_follow_the_result() {
		assert_eq!(FlowOutcome::of(&Ok::<_, ()>(1)), FlowOutcome::Success);
		assert_eq!(FlowOutcome::of(&Err::<(), _>("boom")), FlowOutcome::Failure);
		assert_eq!(FlowKind::AccessToken.to_string(), "access_token");

		record_flow_result(
			&FlowSpan::new(FlowKind::AccessToken, "outcomes_follow_the_result"),
			FlowKind::AccessToken,
			&Ok::<(), ()>(()),
		);
	}
}
