//! Defy Ventures provider constants and the endpoint set derived from a base URL.

// self
use crate::{_prelude::*, error::ConfigError};

/// Identifier the engine uses to route requests to this backend.
pub const NAME: &str = "defyventures";
/// Base URL used when `BASE_URL` is not configured.
pub const DEFAULT_BASE_URL: &str = "http://learn.defyventures.org";
/// Path of the authorization endpoint relative to the base URL.
pub const AUTHORIZATION_PATH: &str = "/oauth2/authorize/";
/// Path of the token endpoint relative to the base URL.
pub const ACCESS_TOKEN_PATH: &str = "/oauth2/token/";
/// Path of the user-info endpoint relative to the base URL.
pub const USER_DATA_PATH: &str = "/api/user";
/// Prefix applied to every setting name before it reaches the settings source.
pub const SETTING_PREFIX: &str = "SOCIAL_AUTH_DEFYVENTURES_OAUTH2_";
/// HTTP method used for the token exchange.
pub const ACCESS_TOKEN_METHOD: HttpMethod = HttpMethod::Post;
/// Token response fields persisted alongside the local user record.
pub const EXTRA_DATA: &[ExtraDataField] =
	&[ExtraDataField::new("id", "id"), ExtraDataField::new("expires", "expires")];

/// HTTP methods a backend may request for the token exchange.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
	/// `GET` with parameters in the query string.
	Get,
	/// `POST` with a form-encoded body.
	#[default]
	Post,
}
impl HttpMethod {
	/// Returns the method token as sent on the wire.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// A `(remote, local)` field pair copied verbatim from a token response into extra data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ExtraDataField {
	/// Field name in the provider's token response.
	pub remote: &'static str,
	/// Field name under which the value is persisted.
	pub local: &'static str,
}
impl ExtraDataField {
	/// Creates a new field pair.
	pub const fn new(remote: &'static str, local: &'static str) -> Self {
		Self { remote, local }
	}
}

/// Parsed endpoint set for a configured base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderEndpoints {
	/// Authorization endpoint the end user is redirected to.
	pub authorization: Url,
	/// Token endpoint used for the code exchange.
	pub token: Url,
	/// User-info endpoint queried with the access token.
	pub user_data: Url,
}
impl ProviderEndpoints {
	/// Derives the endpoint set from a normalized base URL.
	pub fn from_base_url(base_url: &str) -> Result<Self, ConfigError> {
		let parse = |path: &str| {
			Url::parse(&join(base_url, path))
				.map_err(|source| ConfigError::InvalidEndpoint { source })
		};

		Ok(Self {
			authorization: parse(AUTHORIZATION_PATH)?,
			token: parse(ACCESS_TOKEN_PATH)?,
			user_data: parse(USER_DATA_PATH)?,
		})
	}
}

/// Resolves a configured base URL, falling back to [`DEFAULT_BASE_URL`].
///
/// Trailing slashes are trimmed so joined endpoints never carry `//`. The result must parse as an
/// absolute hierarchical URL without a query or fragment, since endpoint paths are appended to it
/// verbatim.
pub fn resolve_base_url(configured: Option<&str>) -> Result<String, ConfigError> {
	let raw = configured
		.map(str::trim)
		.filter(|value| !value.is_empty())
		.unwrap_or(DEFAULT_BASE_URL);
	let trimmed = raw.trim_end_matches('/');
	let invalid = |source| ConfigError::InvalidBaseUrl { value: raw.to_owned(), source };
	let url = Url::parse(trimmed).map_err(|e| invalid(Some(e)))?;

	if url.cannot_be_a_base() || url.query().is_some() || url.fragment().is_some() {
		return Err(invalid(None));
	}

	Ok(trimmed.to_owned())
}

/// Concatenates a base URL and an endpoint path.
pub(crate) fn join(base_url: &str, path: &str) -> String {
	let mut buf = String::with_capacity(base_url.len() + path.len());

	buf.push_str(base_url);
	buf.push_str(path);

	buf
}

/// Returns the fully prefixed settings key for `name`.
pub fn setting_key(name: &str) -> String {
	join(SETTING_PREFIX, name)
}
