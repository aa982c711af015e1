//! Backend contract consumed by social-auth engines.
//!
//! The engine drives the generic authorization-code flow (state handling, code exchange, token
//! storage) and calls back into a [`SocialBackend`] for everything provider specific.

// self
use crate::{
	_prelude::*,
	auth::AuthParams,
	provider::{ExtraDataField, HttpMethod, UserDetails, UserProfile},
};

/// Boxed future returned by [`SocialBackend::user_data`].
pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Extra data persisted alongside the local user record, keyed by local field name.
pub type ExtraData = BTreeMap<String, JsonValue>;

/// Provider-specific hooks an engine requires from every backend.
///
/// Implementors are required to be `Send + Sync`; the engine shares one backend across
/// concurrent requests. Override only what differs from the defaults: `POST` token exchanges and
/// no extra data.
pub trait SocialBackend: Send + Sync {
	/// Identifier used to route requests to this backend.
	fn name(&self) -> &'static str;

	/// Authorization endpoint URL.
	fn authorization_url(&self) -> String;

	/// Token endpoint URL.
	fn access_token_url(&self) -> String;

	/// User-info endpoint URL.
	fn user_data_url(&self) -> String;

	/// HTTP method used for the token exchange.
	fn access_token_method(&self) -> HttpMethod {
		HttpMethod::Post
	}

	/// Token response fields to persist as extra data.
	fn extra_data_fields(&self) -> &'static [ExtraDataField] {
		&[]
	}

	/// Parameters for the authorization request.
	fn auth_params(&self, state: Option<&str>) -> Result<AuthParams>;

	/// Headers attached to the token exchange request.
	fn auth_headers(&self) -> Result<BTreeMap<String, String>>;

	/// Redirect URI sent to the provider for a given state.
	fn get_redirect_uri(&self, state: Option<&str>) -> Url;

	/// Fetches the raw user profile for an access token.
	fn user_data<'a>(&'a self, access_token: &'a str) -> BackendFuture<'a, UserProfile>;

	/// Normalizes a raw user profile into canonical details.
	fn get_user_details(&self, profile: &UserProfile) -> Result<UserDetails>;

	/// Copies [`extra_data_fields`](Self::extra_data_fields) out of a token response.
	///
	/// Fields absent from the response are skipped; non-object responses yield no extra data.
	fn extra_data(&self, token_response: &JsonValue) -> ExtraData {
		let Some(fields) = token_response.as_object() else {
			return ExtraData::new();
		};

		self.extra_data_fields()
			.iter()
			.filter_map(|field| {
				fields.get(field.remote).map(|value| (field.local.to_owned(), value.clone()))
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	struct StaticBackend;
	impl SocialBackend for StaticBackend {
		fn name(&self) -> &'static str {
			"static"
		}

		fn authorization_url(&self) -> String {
			"https://static.example.com/authorize".into()
		}

		fn access_token_url(&self) -> String {
			"https://static.example.com/token".into()
		}

		fn user_data_url(&self) -> String {
			"https://static.example.com/me".into()
		}

		fn extra_data_fields(&self) -> &'static [ExtraDataField] {
			const FIELDS: &[ExtraDataField] =
				&[ExtraDataField::new("uid", "id"), ExtraDataField::new("expires", "expires")];

			FIELDS
		}

		fn auth_params(&self, _state: Option<&str>) -> Result<AuthParams> {
			Ok(AuthParams {
				client_id: "static".into(),
				redirect_uri: self.get_redirect_uri(None).into(),
				state: None,
				response_type: None,
			})
		}

		fn auth_headers(&self) -> Result<BTreeMap<String, String>> {
			Ok(BTreeMap::new())
		}

		fn get_redirect_uri(&self, _state: Option<&str>) -> Url {
			Url::parse("https://app.example.com/cb").expect("Static redirect should parse.")
		}

		fn user_data<'a>(&'a self, _access_token: &'a str) -> BackendFuture<'a, UserProfile> {
			Box::pin(async { Ok(UserProfile::default()) })
		}

		fn get_user_details(&self, profile: &UserProfile) -> Result<UserDetails> {
			Ok(UserDetails::from_profile(profile)?)
		}
	}

	#[test]
	fn defaults_post_and_map_extra_data() {
		let backend = StaticBackend;
		let extra = backend.extra_data(&json!({ "uid": 7, "access_token": "secret" }));

		assert_eq!(backend.access_token_method(), HttpMethod::Post);
		assert_eq!(extra.len(), 1);
		assert_eq!(extra.get("id"), Some(&json!(7)));
		assert!(backend.extra_data(&json!("not-an-object")).is_empty());
	}

	#[test]
	fn backend_is_object_safe() {
		let backend: Arc<dyn SocialBackend> = Arc::new(StaticBackend);

		assert_eq!(backend.name(), "static");
		assert!(backend.auth_headers().expect("Static headers should build.").is_empty());
	}
}
