//! The Defy Ventures backend plugged into a social-auth engine.
//!
//! [`DefyVenturesBackend`] owns the resolved [`BackendConfig`], the engine's
//! [`EngineSettings`], and shared handles to the settings source and JSON client. Every
//! operation is a stateless translation; the only I/O is the user-info request in
//! [`DefyVenturesBackend::fetch_user_data`].

mod user_data;

// self
use crate::{
	_prelude::*,
	auth::{AuthParams, ClientCredentials, credentials},
	engine::EngineSettings,
	http::JsonHttpClient,
	obs::{self, BackendOp},
	provider::{
		self, ACCESS_TOKEN_METHOD, ACCESS_TOKEN_PATH, AUTHORIZATION_PATH, BackendFuture, EXTRA_DATA,
		ExtraDataField, HttpMethod, NAME, ProviderEndpoints, SocialBackend, USER_DATA_PATH,
		UserDetails, UserProfile,
	},
	settings::{BackendConfig, SettingsSource},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestJsonClient;

#[cfg(feature = "reqwest")]
/// Backend specialized for the crate's default reqwest transport.
pub type ReqwestBackend = DefyVenturesBackend<ReqwestJsonClient>;

/// OAuth 2.0 backend for the Defy Ventures identity provider.
pub struct DefyVenturesBackend<C>
where
	C: ?Sized + JsonHttpClient,
{
	/// Configuration resolved at construction time.
	pub config: BackendConfig,
	/// Endpoints derived from [`BackendConfig::base_url`].
	pub endpoints: ProviderEndpoints,
	/// Redirect URI and authorization flags owned by the engine.
	pub engine: EngineSettings,
	/// Settings source answering prefixed keys (`KEY`, `SECRET`, ...).
	pub settings: Arc<dyn SettingsSource>,
	/// JSON client used for the user-info request.
	pub http_client: Arc<C>,
}
impl<C> DefyVenturesBackend<C>
where
	C: ?Sized + JsonHttpClient,
{
	/// Creates a backend that reuses the caller-provided JSON client.
	pub fn with_http_client(
		config: BackendConfig,
		settings: Arc<dyn SettingsSource>,
		engine: EngineSettings,
		http_client: impl Into<Arc<C>>,
	) -> Result<Self> {
		let endpoints = ProviderEndpoints::from_base_url(config.base_url())?;

		Ok(Self { config, endpoints, engine, settings, http_client: http_client.into() })
	}

	/// Provider root URL, without a trailing slash.
	pub fn base_url(&self) -> &str {
		self.config.base_url()
	}

	/// `base_url() + "/oauth2/authorize/"`.
	pub fn authorization_url(&self) -> String {
		provider::join(self.base_url(), AUTHORIZATION_PATH)
	}

	/// `base_url() + "/oauth2/token/"`.
	pub fn access_token_url(&self) -> String {
		provider::join(self.base_url(), ACCESS_TOKEN_PATH)
	}

	/// `base_url() + "/api/user"`.
	pub fn user_data_url(&self) -> String {
		provider::join(self.base_url(), USER_DATA_PATH)
	}

	/// Looks up `SOCIAL_AUTH_DEFYVENTURES_OAUTH2_<name>`.
	pub fn get_setting(&self, name: &str) -> Option<String> {
		self.settings.setting(&provider::setting_key(name))
	}

	/// Looks up a prefixed setting, returning `default` when unset.
	pub fn get_setting_or(&self, name: &str, default: impl Into<String>) -> String {
		self.get_setting(name).unwrap_or_else(|| default.into())
	}

	/// Reads the `KEY`/`SECRET` pair.
	pub fn credentials(&self) -> Result<ClientCredentials> {
		ClientCredentials::from_settings(self.settings.as_ref()).map_err(Error::from)
	}

	/// Returns the engine's redirect URI unmodified.
	///
	/// The provider rejects unexpected query parameters on the redirect URI, so no
	/// `redirect_state` is ever appended regardless of `state`.
	pub fn redirect_uri(&self, _state: Option<&str>) -> &Url {
		&self.engine.redirect_uri
	}

	/// Builds the authorization request parameters.
	///
	/// `state` is sent only when the engine enables `STATE_PARAMETER` and the value is non-empty;
	/// `response_type` only when the engine configures one.
	pub fn build_auth_params(&self, state: Option<&str>) -> Result<AuthParams> {
		obs::observe(BackendOp::AuthParams, "build_auth_params", || -> Result<AuthParams> {
			let client_id = credentials::required(self.settings.as_ref(), "KEY")?;
			let redirect_uri = self.redirect_uri(state).to_string();
			let state = state
				.filter(|value| self.engine.state_parameter && !value.is_empty())
				.map(str::to_owned);

			Ok(AuthParams {
				client_id,
				redirect_uri,
				state,
				response_type: self.engine.response_type().map(str::to_owned),
			})
		})
	}

	/// Authorization endpoint URL with [`AuthParams`] appended as query pairs.
	pub fn authorization_request_url(&self, state: Option<&str>) -> Result<Url> {
		let params = self.build_auth_params(state)?;
		let mut url = self.endpoints.authorization.clone();

		params.append_to(&mut url);

		Ok(url)
	}

	/// Headers for the token exchange: form content type, JSON accept, and Basic auth.
	pub fn build_auth_headers(&self) -> Result<BTreeMap<String, String>> {
		obs::observe(BackendOp::AuthHeaders, "build_auth_headers", || -> Result<_> {
			Ok(self.credentials()?.token_request_headers())
		})
	}

	/// Normalizes a raw profile into [`UserDetails`].
	pub fn normalize_user_details(&self, profile: &UserProfile) -> Result<UserDetails> {
		obs::observe(BackendOp::UserDetails, "normalize_user_details", || -> Result<_> {
			Ok(UserDetails::from_profile(profile)?)
		})
	}
}
#[cfg(feature = "reqwest")]
impl DefyVenturesBackend<ReqwestJsonClient> {
	/// Creates a backend configured from `settings` with its own reqwest client.
	///
	/// `BASE_URL` is resolved once here; later changes to the settings source do not move
	/// the endpoints.
	pub fn new(settings: Arc<dyn SettingsSource>, engine: EngineSettings) -> Result<Self> {
		let config = BackendConfig::from_settings(settings.as_ref())?;

		Self::with_http_client(config, settings, engine, ReqwestJsonClient::default())
	}
}
impl<C> Clone for DefyVenturesBackend<C>
where
	C: ?Sized + JsonHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			config: self.config.clone(),
			endpoints: self.endpoints.clone(),
			engine: self.engine.clone(),
			settings: Arc::clone(&self.settings),
			http_client: Arc::clone(&self.http_client),
		}
	}
}
impl<C> Debug for DefyVenturesBackend<C>
where
	C: ?Sized + JsonHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("DefyVenturesBackend")
			.field("name", &NAME)
			.field("base_url", &self.config.base_url())
			.field("engine", &self.engine)
			.finish()
	}
}
impl<C> SocialBackend for DefyVenturesBackend<C>
where
	C: ?Sized + JsonHttpClient,
{
	fn name(&self) -> &'static str {
		NAME
	}

	fn authorization_url(&self) -> String {
		DefyVenturesBackend::authorization_url(self)
	}

	fn access_token_url(&self) -> String {
		DefyVenturesBackend::access_token_url(self)
	}

	fn user_data_url(&self) -> String {
		DefyVenturesBackend::user_data_url(self)
	}

	fn access_token_method(&self) -> HttpMethod {
		ACCESS_TOKEN_METHOD
	}

	fn extra_data_fields(&self) -> &'static [ExtraDataField] {
		EXTRA_DATA
	}

	fn auth_params(&self, state: Option<&str>) -> Result<AuthParams> {
		self.build_auth_params(state)
	}

	fn auth_headers(&self) -> Result<BTreeMap<String, String>> {
		self.build_auth_headers()
	}

	fn get_redirect_uri(&self, state: Option<&str>) -> Url {
		self.redirect_uri(state).clone()
	}

	fn user_data<'a>(&'a self, access_token: &'a str) -> BackendFuture<'a, UserProfile> {
		Box::pin(self.fetch_user_data(access_token))
	}

	fn get_user_details(&self, profile: &UserProfile) -> Result<UserDetails> {
		self.normalize_user_details(profile)
	}
}
