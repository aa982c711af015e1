//! Walks through what an engine asks of the Defy Ventures backend before and after the redirect:
//! the authorize URL, the token-request headers, and profile normalization.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use serde_json::json;
use url::Url;
// self
use defyventures_oauth2::{
	backend::DefyVenturesBackend,
	engine::EngineSettings,
	provider::{SocialBackend, UserProfile},
	settings::{MapSettings, SettingsSource},
};

fn main() -> Result<()> {
	color_eyre::install()?;

	// Real deployments use `MapSettings::from_env()` or `MapSettings::from_json_file(..)`.
	let settings: Arc<dyn SettingsSource> = Arc::new(
		MapSettings::from_env()
			.with("SOCIAL_AUTH_DEFYVENTURES_OAUTH2_KEY", "demo-client")
			.with("SOCIAL_AUTH_DEFYVENTURES_OAUTH2_SECRET", "demo-secret"),
	);
	let engine = EngineSettings::new(Url::parse("https://app.example.com/complete/defyventures/")?);
	let backend = DefyVenturesBackend::new(settings, engine)?;

	println!("Send your user to {}.", backend.authorization_request_url(Some("demo-state"))?);
	println!(
		"Exchange the code at {} ({}).",
		backend.access_token_url(),
		backend.access_token_method()
	);

	for (name, value) in backend.auth_headers()? {
		println!("  {name}: {value}");
	}

	let token_response = json!({ "access_token": "demo-access", "id": 42, "expires": 3600 });

	println!("Extra data to persist: {:?}.", backend.extra_data(&token_response));

	// Shape of a `/api/user` response; `backend.user_details(token).await` fetches a live one.
	let profile = UserProfile::from_value(json!({
		"email": "jane.doe@defyventures.org",
		"first_name": "Jane",
		"last_name": "Doe",
	}))?;
	let details = backend.get_user_details(&profile)?;

	println!("Normalized user: {} <{}> ({}).", details.username, details.email, details.fullname);

	Ok(())
}
