//! Engine-owned authorization settings the backend reads but never changes.

// self
use crate::_prelude::*;

/// Authorization flags and redirect URI exposed by the hosting engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineSettings {
	/// Redirect URI registered with the provider.
	pub redirect_uri: Url,
	/// Whether the engine round-trips a `state` parameter (`STATE_PARAMETER`).
	pub state_parameter: bool,
	/// Response type requested from the authorization endpoint (`RESPONSE_TYPE`).
	pub response_type: Option<String>,
}
impl EngineSettings {
	const DEFAULT_RESPONSE_TYPE: &'static str = "code";

	/// Creates settings with the authorization-code defaults: state enabled, `response_type=code`.
	pub fn new(redirect_uri: Url) -> Self {
		Self {
			redirect_uri,
			state_parameter: true,
			response_type: Some(Self::DEFAULT_RESPONSE_TYPE.to_owned()),
		}
	}

	/// Overrides the `STATE_PARAMETER` flag.
	pub fn with_state_parameter(mut self, state_parameter: bool) -> Self {
		self.state_parameter = state_parameter;

		self
	}

	/// Overrides `RESPONSE_TYPE`; an empty value disables the parameter.
	pub fn with_response_type(mut self, response_type: impl Into<String>) -> Self {
		self.response_type = Some(response_type.into()).filter(|value| !value.is_empty());

		self
	}

	/// Stops sending `response_type` with authorization requests.
	pub fn without_response_type(mut self) -> Self {
		self.response_type = None;

		self
	}

	/// Returns the response type when one should be sent.
	pub fn response_type(&self) -> Option<&str> {
		self.response_type.as_deref().filter(|value| !value.is_empty())
	}
}
