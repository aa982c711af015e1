//! `oauth2` crate client wiring for engines that delegate the code exchange.
//!
//! The backend never performs the exchange itself; [`DefyVenturesBackend::oauth2_client`] hands
//! the engine a [`BasicClient`] already pointed at the provider's endpoints with HTTP Basic
//! client authentication and the engine's redirect URI.

pub use oauth2;

// crates.io
use oauth2::{
	AuthType, AuthUrl, ClientId, ClientSecret as OAuth2ClientSecret, EndpointNotSet, EndpointSet,
	RedirectUrl, TokenUrl, basic::BasicClient,
};
// self
use crate::{_prelude::*, backend::DefyVenturesBackend, http::JsonHttpClient};

/// [`BasicClient`] with the authorization and token endpoints set.
pub type ConfiguredBasicClient =
	BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

impl<C> DefyVenturesBackend<C>
where
	C: ?Sized + JsonHttpClient,
{
	/// Builds an `oauth2` client configured from `KEY`, `SECRET`, the endpoints, and the redirect.
	pub fn oauth2_client(&self) -> Result<ConfiguredBasicClient> {
		let credentials = self.credentials()?;
		let client = BasicClient::new(ClientId::new(credentials.client_id))
			.set_client_secret(OAuth2ClientSecret::new(
				credentials.client_secret.expose().to_owned(),
			))
			.set_auth_uri(AuthUrl::from_url(self.endpoints.authorization.clone()))
			.set_token_uri(TokenUrl::from_url(self.endpoints.token.clone()))
			.set_redirect_uri(RedirectUrl::from_url(self.engine.redirect_uri.clone()))
			.set_auth_type(AuthType::BasicAuth);

		Ok(client)
	}
}
