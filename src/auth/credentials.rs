//! Client credentials with a redacted secret, plus the Basic-auth token-request headers.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
// self
use crate::{
	_prelude::*,
	error::ConfigError,
	provider::setting_key,
	settings::SettingsSource,
};

/// `Content-Type` sent with token requests.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
/// `Accept` sent with token requests.
pub const JSON_ACCEPT: &str = "application/json";

/// Redacted client secret wrapper keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSecret(String);
impl ClientSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner secret value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for ClientSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for ClientSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ClientSecret").field(&"<redacted>").finish()
	}
}
impl Display for ClientSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// OAuth client identifier and secret (`KEY` and `SECRET` settings).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientCredentials {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: ClientSecret,
}
impl ClientCredentials {
	/// Creates credentials from raw values.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self { client_id: client_id.into(), client_secret: ClientSecret::new(client_secret) }
	}

	/// Reads `KEY` and `SECRET` from the settings source.
	///
	/// Either one missing fails with [`ConfigError::MissingSetting`] naming the prefixed key.
	pub fn from_settings(settings: &dyn SettingsSource) -> Result<Self, ConfigError> {
		let client_id = required(settings, "KEY")?;
		let client_secret = required(settings, "SECRET")?;

		Ok(Self::new(client_id, client_secret))
	}

	/// Returns the `Authorization` header value: `Basic base64(id ":" secret)`.
	///
	/// Credentials are encoded as UTF-8 bytes with the standard padded alphabet.
	pub fn basic_authorization(&self) -> String {
		let mut raw = Vec::with_capacity(self.client_id.len() + self.client_secret.0.len() + 1);

		raw.extend_from_slice(self.client_id.as_bytes());
		raw.push(b':');
		raw.extend_from_slice(self.client_secret.expose().as_bytes());

		format!("Basic {}", STANDARD.encode(raw))
	}

	/// Headers attached to the token exchange request.
	pub fn token_request_headers(&self) -> BTreeMap<String, String> {
		BTreeMap::from([
			("Content-Type".into(), FORM_CONTENT_TYPE.into()),
			("Accept".into(), JSON_ACCEPT.into()),
			("Authorization".into(), self.basic_authorization()),
		])
	}
}

/// Reads a prefixed setting, failing when it is unset.
pub(crate) fn required(settings: &dyn SettingsSource, name: &str) -> Result<String, ConfigError> {
	let key = setting_key(name);

	settings.setting(&key).ok_or_else(|| ConfigError::missing_setting(key))
}
