//! Parameters sent to the authorization endpoint.

// self
use crate::_prelude::*;

/// Query parameters for the authorization request.
///
/// Only presence matters: `state` and `response_type` are omitted entirely when unset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthParams {
	/// OAuth 2.0 client identifier (`KEY` setting).
	pub client_id: String,
	/// Redirect URI, exactly as configured on the engine.
	pub redirect_uri: String,
	/// Opaque state value round-tripped through the provider.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// Requested response type (normally `code`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub response_type: Option<String>,
}
impl AuthParams {
	/// Returns the parameters as `(name, value)` pairs in a stable order.
	pub fn pairs(&self) -> Vec<(&'static str, &str)> {
		let mut pairs =
			vec![("client_id", self.client_id.as_str()), ("redirect_uri", self.redirect_uri.as_str())];

		if let Some(state) = self.state.as_deref() {
			pairs.push(("state", state));
		}
		if let Some(response_type) = self.response_type.as_deref() {
			pairs.push(("response_type", response_type));
		}

		pairs
	}

	/// Converts the parameters into an owned mapping.
	pub fn to_map(&self) -> BTreeMap<String, String> {
		self.pairs().into_iter().map(|(name, value)| (name.to_owned(), value.to_owned())).collect()
	}

	/// Appends the parameters to `url` as query pairs.
	pub fn append_to(&self, url: &mut Url) {
		let mut query = url.query_pairs_mut();

		for (name, value) in self.pairs() {
			query.append_pair(name, value);
		}
	}
}
