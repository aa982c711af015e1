//! User profile payloads returned by the provider and their canonical normalized form.

// self
use crate::{
	_prelude::*,
	error::{DecodeError, ProfileError},
};

/// Raw user profile as returned by the user-info endpoint.
///
/// No schema is enforced; only `email`, `first_name`, and `last_name` are read, and any other
/// field is kept for callers that want it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(JsonMap<String, JsonValue>);
impl UserProfile {
	/// Wraps an already parsed JSON object.
	pub fn new(fields: JsonMap<String, JsonValue>) -> Self {
		Self(fields)
	}

	/// Converts an arbitrary JSON value, rejecting anything that is not an object.
	pub fn from_value(value: JsonValue) -> Result<Self, DecodeError> {
		match value {
			JsonValue::Object(fields) => Ok(Self(fields)),
			other => Err(DecodeError::NotAnObject { found: json_type(&other) }),
		}
	}

	/// Returns the raw value stored under `field`.
	pub fn get(&self, field: &str) -> Option<&JsonValue> {
		self.0.get(field)
	}

	/// Reads an optional string field; `null` counts as absent.
	pub fn str_field(&self, field: &'static str) -> Result<Option<&str>, ProfileError> {
		match self.0.get(field) {
			None | Some(JsonValue::Null) => Ok(None),
			Some(JsonValue::String(value)) => Ok(Some(value.as_str())),
			Some(_) => Err(ProfileError::InvalidField { field }),
		}
	}

	/// Consumes the profile and returns the underlying JSON object.
	pub fn into_inner(self) -> JsonMap<String, JsonValue> {
		self.0
	}
}
impl From<JsonMap<String, JsonValue>> for UserProfile {
	fn from(fields: JsonMap<String, JsonValue>) -> Self {
		Self(fields)
	}
}

/// Canonical user details handed back to the engine.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserDetails {
	/// Username derived from the email address.
	pub username: String,
	/// Email address as returned by the provider.
	pub email: String,
	/// First and last name joined by a space; empty when neither is known.
	pub fullname: String,
}
impl UserDetails {
	/// Normalizes a raw profile.
	///
	/// Fails with [`ProfileError::Incomplete`] when `email` is missing, `null`, or empty, and with
	/// [`ProfileError::InvalidField`] when a read field is not a string.
	pub fn from_profile(profile: &UserProfile) -> Result<Self, ProfileError> {
		let email = profile
			.str_field("email")?
			.filter(|value| !value.is_empty())
			.ok_or(ProfileError::Incomplete { field: "email" })?;
		let first_name = profile.str_field("first_name")?.unwrap_or_default();
		let last_name = profile.str_field("last_name")?.unwrap_or_default();

		Ok(Self {
			username: username_from_email(email),
			email: email.to_owned(),
			fullname: full_name(first_name, last_name),
		})
	}
}

/// Replaces every `@` with `AT` and drops everything that is not an ASCII letter or digit.
pub fn username_from_email(email: &str) -> String {
	email
		.replace('@', "AT")
		.chars()
		.filter(char::is_ascii_alphanumeric)
		.collect()
}

/// Joins first and last name with a single space and trims the result.
pub fn full_name(first_name: &str, last_name: &str) -> String {
	format!("{first_name} {last_name}").trim().to_owned()
}

fn json_type(value: &JsonValue) -> &'static str {
	match value {
		JsonValue::Null => "null",
		JsonValue::Bool(_) => "boolean",
		JsonValue::Number(_) => "number",
		JsonValue::String(_) => "string",
		JsonValue::Array(_) => "array",
		JsonValue::Object(_) => "object",
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	fn profile(value: JsonValue) -> UserProfile {
		UserProfile::from_value(value).expect("Profile fixture should be a JSON object.")
	}

	#[test]
	fn normalizes_email_and_full_name() {
		let details = UserDetails::from_profile(&profile(json!({
			"email": "a.b@x.com",
			"first_name": "A",
			"last_name": "B",
		})))
		.expect("Complete profile should normalize.");

		assert_eq!(details.username, "abATxcom");
		assert_eq!(details.email, "a.b@x.com");
		assert_eq!(details.fullname, "A B");
	}

	#[test]
	fn missing_names_yield_empty_full_name() {
		let details = UserDetails::from_profile(&profile(json!({ "email": "x@y.com" })))
			.expect("Profile without names should normalize.");

		assert_eq!(details.username, "xATycom");
		assert_eq!(details.fullname, "");

		let details = UserDetails::from_profile(&profile(json!({
			"email": "x@y.com",
			"first_name": null,
			"last_name": "  Doe ",
		})))
		.expect("Profile with a single name should normalize.");

		assert_eq!(details.fullname, "Doe");
	}

	#[test]
	fn missing_email_is_reported() {
		for value in [json!({}), json!({ "email": null }), json!({ "email": "" })] {
			let err = UserDetails::from_profile(&profile(value))
				.expect_err("Profile without an email must be rejected.");

			assert_eq!(err, ProfileError::Incomplete { field: "email" });
		}
	}

	#[test]
	fn non_string_fields_are_rejected() {
		let err = UserDetails::from_profile(&profile(json!({ "email": 42 })))
			.expect_err("Numeric email must be rejected.");

		assert_eq!(err, ProfileError::InvalidField { field: "email" });

		let err =
			UserDetails::from_profile(&profile(json!({ "email": "x@y.com", "last_name": [] })))
				.expect_err("Array last name must be rejected.");

		assert_eq!(err, ProfileError::InvalidField { field: "last_name" });
	}

	#[test]
	fn username_keeps_only_ascii_alphanumerics() {
		assert_eq!(username_from_email("jo.ann+tag@ex-ample.co.uk"), "joanntagATexamplecouk");
		assert_eq!(username_from_email("zoë@x.io"), "zoATxio");
		assert_eq!(username_from_email("a@b@c"), "aATbATc");
	}

	#[test]
	fn normalization_is_idempotent() {
		let input = profile(json!({ "email": "a.b@x.com", "first_name": "A", "extra": true }));
		let first = UserDetails::from_profile(&input).expect("First pass should succeed.");
		let second = UserDetails::from_profile(&input).expect("Second pass should succeed.");

		assert_eq!(first, second);
		assert_eq!(input.get("extra"), Some(&JsonValue::Bool(true)));
	}

	#[test]
	fn non_object_payloads_are_rejected() {
		let err = UserProfile::from_value(json!(["a"])).expect_err("Arrays are not profiles.");

		assert!(matches!(err, DecodeError::NotAnObject { found: "array" }));
	}
}
