#![cfg(feature = "reqwest")]

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
// self
use defyventures_oauth2::{
	backend::{DefyVenturesBackend, ReqwestBackend},
	engine::EngineSettings,
	error::{DecodeError, Error, TransportError},
	provider::SocialBackend,
	settings::{MapSettings, SettingsSource},
	url::Url,
};

fn build_backend(server: &MockServer) -> ReqwestBackend {
	let settings: Arc<dyn SettingsSource> = Arc::new(
		MapSettings::default()
			.with("SOCIAL_AUTH_DEFYVENTURES_OAUTH2_BASE_URL", server.base_url())
			.with("SOCIAL_AUTH_DEFYVENTURES_OAUTH2_KEY", "client-it")
			.with("SOCIAL_AUTH_DEFYVENTURES_OAUTH2_SECRET", "secret-it"),
	);
	let engine = EngineSettings::new(
		Url::parse("https://app.example.com/complete/defyventures/")
			.expect("Redirect URI should parse successfully."),
	);

	DefyVenturesBackend::new(settings, engine).expect("Backend should build successfully.")
}

#[tokio::test]
async fn user_data_sends_token_query_and_parses_profile() {
	let server = MockServer::start_async().await;
	let backend = build_backend(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/user").query_param("token", "access-success");
			then.status(200).header("content-type", "application/json").body(
				"{\"id\":17,\"email\":\"jane.doe@defy.org\",\"first_name\":\"Jane\",\"last_name\":\"Doe\"}",
			);
		})
		.await;
	let profile = backend
		.user_data("access-success")
		.await
		.expect("User data request should succeed.");

	mock.assert_async().await;

	let details = backend.get_user_details(&profile).expect("Profile should normalize.");

	assert_eq!(details.username, "janedoeATdefyorg");
	assert_eq!(details.email, "jane.doe@defy.org");
	assert_eq!(details.fullname, "Jane Doe");
	assert_eq!(profile.get("id"), Some(&serde_json::json!(17)));
}

#[tokio::test]
async fn user_details_fetches_and_normalizes_in_one_step() {
	let server = MockServer::start_async().await;
	let backend = build_backend(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/user").query_param("token", "access-details");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"email\":\"x@y.com\"}");
		})
		.await;
	let details =
		backend.user_details("access-details").await.expect("User details should build.");

	mock.assert_async().await;

	assert_eq!(details.username, "xATycom");
	assert_eq!(details.fullname, "");
}

#[tokio::test]
async fn error_status_surfaces_as_transport_error_without_retry() {
	let server = MockServer::start_async().await;
	let backend = build_backend(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/user");
			then.status(401).body("invalid token");
		})
		.await;
	let err = backend
		.fetch_user_data("access-revoked")
		.await
		.expect_err("Unauthorized responses must fail.");

	mock.assert_hits_async(1).await;

	match err {
		Error::Transport(TransportError::Status { status, body_preview }) => {
			assert_eq!(status, 401);
			assert_eq!(body_preview.as_deref(), Some("invalid token"));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn malformed_json_surfaces_as_decode_error() {
	let server = MockServer::start_async().await;
	let backend = build_backend(&server);
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/user");
			then.status(200).header("content-type", "application/json").body("{\"email\":");
		})
		.await;
	let err = backend
		.fetch_user_data("access-garbled")
		.await
		.expect_err("Malformed JSON must fail.");

	assert!(matches!(err, Error::Decode(DecodeError::Json { .. })));
}
