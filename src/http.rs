//! Transport primitives for the user-info request.
//!
//! The module exposes [`JsonHttpClient`], the engine's authenticated JSON GET capability, so
//! downstream crates can plug in whatever HTTP stack the hosting engine already owns. The bundled
//! [`ReqwestJsonClient`] performs a single request per call: it never retries, never follows up
//! on failures, and surfaces transport, status, and decode errors as-is.

// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::ACCEPT;
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::error::{DecodeError, TransportError};

/// Boxed future returned by [`JsonHttpClient::get_json`].
pub type JsonFuture<'a> = Pin<Box<dyn Future<Output = Result<JsonValue>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of fetching a JSON document.
///
/// Implementations must be `Send + Sync + 'static` so a single client can be shared by every
/// backend instance behind an [`Arc`], and the returned futures must be `Send` so callers can
/// hop executors.
pub trait JsonHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Issues a GET to `url` with `params` appended to its query string and decodes the body.
	fn get_json<'a>(&'a self, url: &'a Url, params: &'a [(String, String)]) -> JsonFuture<'a>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestJsonClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestJsonClient {
	const BODY_PREVIEW_LIMIT: usize = 256;

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	async fn fetch(&self, url: &Url, params: &[(String, String)]) -> Result<JsonValue> {
		let mut target = url.clone();

		if !params.is_empty() {
			target.query_pairs_mut().extend_pairs(params);
		}

		let response = self
			.0
			.get(target)
			.header(ACCEPT, "application/json")
			.send()
			.await
			.map_err(TransportError::from)?;
		let status = response.status();
		let body = response.bytes().await.map_err(TransportError::from)?;

		if !status.is_success() {
			return Err(TransportError::Status {
				status: status.as_u16(),
				body_preview: body_preview(&body, Self::BODY_PREVIEW_LIMIT),
			}
			.into());
		}

		let de = &mut serde_json::Deserializer::from_slice(&body);
		let value = serde_path_to_error::deserialize(de)
			.map_err(|source| DecodeError::Json { source })?;

		Ok(value)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestJsonClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl JsonHttpClient for ReqwestJsonClient {
	fn get_json<'a>(&'a self, url: &'a Url, params: &'a [(String, String)]) -> JsonFuture<'a> {
		Box::pin(self.fetch(url, params))
	}
}

#[cfg(feature = "reqwest")]
fn body_preview(body: &[u8], limit: usize) -> Option<String> {
	if body.is_empty() {
		return None;
	}

	let text = String::from_utf8_lossy(body);

	if text.chars().count() <= limit {
		return Some(text.into_owned());
	}

	let mut buf: String = text.chars().take(limit).collect();

	buf.push('…');

	Some(buf)
}
