//! Transport that authenticates every request.

use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use tracing::debug;

use crate::client::{ClientConfig, HttpTransport};
use crate::{Error, Result};

use super::token::{BearerTokenSource, TokenSource};

/// Attaches `Authorization: Bearer <token>` to each request before sending
/// it with `reqwest`.
///
/// A token is requested from the source for every request; reuse and refresh
/// are up to the source. When no token can be obtained the request is never
/// sent and the call fails with [`Error::Token`].
pub struct OAuth2Transport<S> {
    http: reqwest::Client,
    source: BearerTokenSource<S>,
}

impl<S: TokenSource> OAuth2Transport<S> {
    /// Authenticate with `source` using a default HTTP client.
    pub fn new(source: S) -> Result<Self> {
        let http = ClientConfig::default().build_http_client()?;
        Ok(Self::with_client(http, source))
    }

    /// Authenticate with `source`, sending through `http`.
    pub fn with_client(http: reqwest::Client, source: S) -> Self {
        Self {
            http,
            source: BearerTokenSource::new(source),
        }
    }

    /// The token source.
    pub fn source(&self) -> &S {
        self.source.get_ref()
    }
}

#[async_trait]
impl<S: TokenSource> HttpTransport for OAuth2Transport<S> {
    async fn execute(&self, mut request: reqwest::Request) -> Result<reqwest::Response> {
        let token = self.source.token().await?;

        let mut value = HeaderValue::from_str(&token.authorization_value())
            .map_err(|_| Error::InvalidHeader(AUTHORIZATION.to_string()))?;
        value.set_sensitive(true);
        request.headers_mut().insert(AUTHORIZATION, value);

        debug!(url = %request.url(), "attached bearer token");
        Ok(self.http.execute(request).await?)
    }
}

impl<S> std::fmt::Debug for OAuth2Transport<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth2Transport").finish_non_exhaustive()
    }
}
