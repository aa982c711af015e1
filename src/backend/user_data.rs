//! User-info retrieval: a single authenticated GET with the access token in the query string.
//!
//! Transport, status, and decode failures propagate unchanged; nothing here retries.

// self
use crate::{
	_prelude::*,
	backend::DefyVenturesBackend,
	http::JsonHttpClient,
	obs::{BackendOp, OpOutcome, OpSpan},
	provider::{UserDetails, UserProfile},
};

impl<C> DefyVenturesBackend<C>
where
	C: ?Sized + JsonHttpClient,
{
	/// Fetches the raw profile from `user_data_url()` with `token=<access_token>`.
	pub async fn fetch_user_data(&self, access_token: &str) -> Result<UserProfile> {
		let span = OpSpan::new(BackendOp::UserData, "fetch_user_data");

		span.record_outcome(OpOutcome::Attempt);

		let result: Result<UserProfile> = span
			.instrument(async move {
				let params = [("token".to_owned(), access_token.to_owned())];
				let value = self.http_client.get_json(&self.endpoints.user_data, &params).await?;

				UserProfile::from_value(value).map_err(Error::from)
			})
			.await;

		span.record_outcome(OpOutcome::of(&result));

		result
	}

	/// Fetches and normalizes the profile in one step.
	pub async fn user_details(&self, access_token: &str) -> Result<UserDetails> {
		let profile = self.fetch_user_data(access_token).await?;

		self.normalize_user_details(&profile)
	}
}
