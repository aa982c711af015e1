//! Backend-level error types shared across settings, profile normalization, and transport.

// self
use crate::_prelude::*;

/// Backend-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical backend error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Remote profile is missing or mistypes an identity field.
	#[error(transparent)]
	Profile(#[from] ProfileError),
	/// Transport failure while calling the provider (DNS, TCP, TLS, HTTP status).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Provider responded with a body that is not the expected JSON.
	#[error(transparent)]
	Decode(#[from] DecodeError),
}

/// Configuration and validation failures raised by the backend.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A setting required by the requested operation is unset.
	#[error("Setting `{key}` is required but not configured.")]
	MissingSetting {
		/// Fully prefixed setting key.
		key: String,
	},
	/// Configured base URL is not an absolute URL that endpoint paths can be appended to.
	#[error("Base URL `{value}` is invalid.")]
	InvalidBaseUrl {
		/// Value that was rejected.
		value: String,
		/// Parsing failure, or `None` when the URL parsed but carries a query, a fragment, or an
		/// opaque path.
		#[source]
		source: Option<url::ParseError>,
	},
	/// An endpoint derived from the base URL cannot be used by the OAuth client.
	#[error("Endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Settings file could not be read or parsed.
	#[error("Settings file `{path}` could not be loaded.")]
	SettingsFile {
		/// Path of the settings file.
		path: String,
		/// Underlying IO or parsing failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Builds a [`ConfigError::MissingSetting`] for a fully prefixed key.
	pub fn missing_setting(key: impl Into<String>) -> Self {
		Self::MissingSetting { key: key.into() }
	}

	/// Wraps a settings file failure.
	pub fn settings_file(
		path: impl Into<String>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::SettingsFile { path: path.into(), source: Box::new(src) }
	}
}

/// Remote profile failures raised while normalizing user details.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ProfileError {
	/// An identity-critical field is absent, `null`, or empty.
	#[error("User profile is missing the `{field}` field.")]
	Incomplete {
		/// Name of the missing field.
		field: &'static str,
	},
	/// A field is present but is not a JSON string.
	#[error("User profile field `{field}` must be a string.")]
	InvalidField {
		/// Name of the mistyped field.
		field: &'static str,
	},
}

/// Transport-level failures: the request never completed or the provider refused it.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Provider answered with a non-success HTTP status.
	#[error("Provider responded with HTTP {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Truncated response body, when one was returned.
		body_preview: Option<String>,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Response decoding failures.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Response body is not valid JSON.
	#[error("Provider returned malformed JSON.")]
	Json {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Response body is valid JSON but not an object.
	#[error("Provider returned a JSON {found} where an object was expected.")]
	NotAnObject {
		/// JSON type that was returned instead.
		found: &'static str,
	},
}
