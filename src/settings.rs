//! Settings lookup consumed by the backend and the resolved process configuration.
//!
//! [`SettingsSource`] mirrors the engine's `setting(key)` capability: it answers fully prefixed
//! keys such as `SOCIAL_AUTH_DEFYVENTURES_OAUTH2_KEY`. [`MapSettings`] is the bundled
//! implementation, loadable from the process environment or a JSON file at startup.
//! [`BackendConfig`] holds the values resolved once at configuration load time.

// std
use std::{env, ffi::OsString, fs, path::Path};
// self
use crate::{
	_prelude::*,
	error::ConfigError,
	provider::{self, DEFAULT_BASE_URL, SETTING_PREFIX},
};

/// Read-only settings lookup supplied by the hosting engine.
///
/// Implementations must be `Send + Sync`; the backend may call them from concurrent requests.
pub trait SettingsSource: Send + Sync {
	/// Returns the value stored under a fully prefixed `key`, or `None` when unset.
	fn setting(&self, key: &str) -> Option<String>;
}
impl SettingsSource for BTreeMap<String, String> {
	fn setting(&self, key: &str) -> Option<String> {
		self.get(key).cloned()
	}
}
impl SettingsSource for HashMap<String, String> {
	fn setting(&self, key: &str) -> Option<String> {
		self.get(key).cloned()
	}
}

/// Immutable in-memory settings, captured once at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapSettings(BTreeMap<String, String>);
impl MapSettings {
	/// Adds or replaces a setting.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.0.insert(key.into(), value.into());

		self
	}

	/// Captures every variable carrying the backend's setting prefix.
	pub fn from_vars<I, K, V>(vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self(
			vars.into_iter()
				.map(|(key, value)| (key.into(), value.into()))
				.filter(|(key, _)| key.starts_with(SETTING_PREFIX))
				.collect(),
		)
	}

	/// Captures prefixed variables from raw OS pairs, skipping any pair that is not valid UTF-8.
	pub fn from_os_vars<I>(vars: I) -> Self
	where
		I: IntoIterator<Item = (OsString, OsString)>,
	{
		Self::from_vars(vars.into_iter().filter_map(|(key, value)| {
			Some((key.into_string().ok()?, value.into_string().ok()?))
		}))
	}

	/// Captures the backend's settings from the process environment.
	///
	/// Unrelated variables that are not valid UTF-8 are ignored rather than aborting startup.
	pub fn from_env() -> Self {
		Self::from_os_vars(env::vars_os())
	}

	/// Loads settings from a JSON object of string values.
	pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let display = path.display().to_string();
		let bytes = fs::read(path).map_err(|e| ConfigError::settings_file(&display, e))?;
		let de = &mut serde_json::Deserializer::from_slice(&bytes);

		serde_path_to_error::deserialize(de).map_err(|e| ConfigError::settings_file(display, e))
	}

	/// Number of captured settings.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when no settings were captured.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl SettingsSource for MapSettings {
	fn setting(&self, key: &str) -> Option<String> {
		self.0.get(key).cloned()
	}
}

/// Configuration resolved once when the backend is constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
	base_url: String,
}
impl BackendConfig {
	/// Validates and normalizes an explicit base URL.
	pub fn new(base_url: impl AsRef<str>) -> Result<Self, ConfigError> {
		Ok(Self { base_url: provider::resolve_base_url(Some(base_url.as_ref()))? })
	}

	/// Resolves `BASE_URL` from the settings source, falling back to the default.
	pub fn from_settings(settings: &dyn SettingsSource) -> Result<Self, ConfigError> {
		let configured = settings.setting(&provider::setting_key("BASE_URL"));

		Ok(Self { base_url: provider::resolve_base_url(configured.as_deref())? })
	}

	/// Provider root URL without a trailing slash.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}
}
impl Default for BackendConfig {
	fn default() -> Self {
		Self { base_url: DEFAULT_BASE_URL.to_owned() }
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::io::Write;
	// self
	use super::*;

	#[test]
	fn from_vars_keeps_prefixed_keys_only() {
		let settings = MapSettings::from_vars([
			("SOCIAL_AUTH_DEFYVENTURES_OAUTH2_KEY", "abc"),
			("SOCIAL_AUTH_GITHUB_KEY", "other"),
			("PATH", "/usr/bin"),
		]);

		assert_eq!(settings.len(), 1);
		assert_eq!(settings.setting("SOCIAL_AUTH_DEFYVENTURES_OAUTH2_KEY").as_deref(), Some("abc"));
		assert_eq!(settings.setting("SOCIAL_AUTH_GITHUB_KEY"), None);
	}

	#[cfg(unix)]
	#[test]
	fn os_vars_skip_entries_that_are_not_utf8() {
		// std
		use std::os::unix::ffi::OsStringExt;

		let bad_key = OsString::from_vec(b"SOCIAL_AUTH_DEFYVENTURES_OAUTH2_\xff".to_vec());
		let settings = MapSettings::from_os_vars([
			("UNRELATED_BIN".into(), OsString::from_vec(vec![0xff])),
			(bad_key, "x".into()),
			("SOCIAL_AUTH_DEFYVENTURES_OAUTH2_SECRET".into(), OsString::from_vec(vec![0xfe])),
			("SOCIAL_AUTH_DEFYVENTURES_OAUTH2_KEY".into(), "abc".into()),
		]);

		assert_eq!(settings.len(), 1);
		assert_eq!(settings.setting("SOCIAL_AUTH_DEFYVENTURES_OAUTH2_KEY").as_deref(), Some("abc"));
		assert_eq!(settings.setting("SOCIAL_AUTH_DEFYVENTURES_OAUTH2_SECRET"), None);
	}

	#[test]
	fn from_env_only_keeps_prefixed_variables() {
		let settings = MapSettings::from_env();

		assert!(settings.0.keys().all(|key| key.starts_with(SETTING_PREFIX)));
	}

	#[test]
	fn config_reads_base_url_setting() {
		let settings = MapSettings::default()
			.with("SOCIAL_AUTH_DEFYVENTURES_OAUTH2_BASE_URL", "https://staging.defyventures.org/");
		let config = BackendConfig::from_settings(&settings).expect("Config should resolve.");

		assert_eq!(config.base_url(), "https://staging.defyventures.org");

		let config = BackendConfig::from_settings(&MapSettings::default())
			.expect("Config should fall back to the default.");

		assert_eq!(config, BackendConfig::default());
	}

	#[test]
	fn json_file_round_trips_through_settings() {
		let path = env::temp_dir().join(format!("defyventures-settings-{}.json", std::process::id()));

		{
			let mut file = fs::File::create(&path).expect("Temp settings file should be created.");

			file.write_all(br#"{"SOCIAL_AUTH_DEFYVENTURES_OAUTH2_KEY":"abc"}"#)
				.expect("Temp settings file should be written.");
		}

		let settings = MapSettings::from_json_file(&path).expect("Settings file should load.");

		fs::remove_file(&path).expect("Temp settings file should be removed.");

		assert_eq!(settings.setting("SOCIAL_AUTH_DEFYVENTURES_OAUTH2_KEY").as_deref(), Some("abc"));
	}

	#[test]
	fn json_file_errors_name_the_path() {
		let path = env::temp_dir().join("defyventures-settings-missing.json");
		let err = MapSettings::from_json_file(&path).expect_err("Missing file must fail.");

		assert!(matches!(err, ConfigError::SettingsFile { ref path, .. } if path.ends_with(".json")));
	}
}
