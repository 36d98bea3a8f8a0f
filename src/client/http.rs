//! HTTP client implementation for the eBay API.

use std::sync::Arc;

use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;
use url::Url;

use crate::api::BuyApi;
use crate::auth::{OAuth2Transport, OAuthConfig};
use crate::opt::Opt;
use crate::{Environment, Error, Result, SCOPE_ROOT};

use super::check::check_response;
use super::config::ClientConfig;
use super::context::Context;
use super::request::{self, Request};
use super::transport::HttpTransport;

/// The main client for interacting with the eBay API.
///
/// Holds a base URL and a transport, nothing else, so it is cheap to clone
/// and safe to share across tasks. Endpoint groups hang off
/// [`buy`](Self::buy).
///
/// # Example
///
/// ```no_run
/// use ebay_rs::{Context, EbayClient, Environment};
///
/// # async fn example() -> ebay_rs::Result<()> {
/// let client = EbayClient::from_client_credentials(
///     "my-client-id",
///     "my-client-secret",
///     Environment::Sandbox,
/// )?;
///
/// let ctx = Context::new();
/// let item = client
///     .buy()
///     .browse()
///     .get_item_by_legacy_id(&ctx, "202117468662", &[])
///     .await?;
/// println!("{}: {}", item.item_id, item.title);
/// # Ok(())
/// # }
/// ```
pub struct EbayClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) transport: Arc<dyn HttpTransport>,
    pub(crate) base_url: Url,
}

impl EbayClient {
    /// Create a production client sending requests through `transport`.
    ///
    /// Pass an [`OAuth2Transport`] for authenticated access, or a plain
    /// `reqwest::Client` if credentials are handled elsewhere.
    pub fn new(transport: impl HttpTransport + 'static) -> Result<Self> {
        Self::for_environment(Environment::Production, transport)
    }

    /// Create a sandbox client sending requests through `transport`.
    pub fn sandbox(transport: impl HttpTransport + 'static) -> Result<Self> {
        Self::for_environment(Environment::Sandbox, transport)
    }

    /// Create a client for `env`.
    pub fn for_environment(env: Environment, transport: impl HttpTransport + 'static) -> Result<Self> {
        Self::with_base_url(transport, env.api_base_url())
    }

    /// Create a client against a custom base URL, e.g. a mock server.
    ///
    /// The URL must end with `/` so relative paths resolve below it.
    pub fn with_base_url(transport: impl HttpTransport + 'static, base_url: &str) -> Result<Self> {
        if !base_url.ends_with('/') {
            return Err(Error::Config(format!(
                "base URL {} must have a trailing slash",
                base_url
            )));
        }
        let base_url = Url::parse(base_url)?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                transport: Arc::new(transport),
                base_url,
            }),
        })
    }

    /// Create an unauthenticated client for `env` with its own HTTP client.
    pub fn with_config(env: Environment, config: ClientConfig) -> Result<Self> {
        Self::for_environment(env, config.build_http_client()?)
    }

    /// Create a client authenticated with an application token obtained
    /// through the client-credentials grant for [`SCOPE_ROOT`].
    ///
    /// No token is fetched until the first call.
    pub fn from_client_credentials(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        env: Environment,
    ) -> Result<Self> {
        let source = OAuthConfig::new(client_id, client_secret, env)
            .with_scopes([SCOPE_ROOT])
            .client_credentials()?;
        let http = ClientConfig::default().build_http_client()?;
        Self::for_environment(env, OAuth2Transport::with_client(http, source))
    }

    /// Get the Buy API group.
    pub fn buy(&self) -> BuyApi {
        BuyApi::new(self.inner.clone())
    }

    /// Base URL relative paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Build a request for `path`, which must not start with `/`.
    pub fn new_request(&self, method: Method, path: &str, opts: &[Opt]) -> Result<Request> {
        self.inner.new_request(method, path, opts)
    }

    /// Build a request for `path` with `body` encoded as JSON.
    pub fn new_request_with_body<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        opts: &[Opt],
    ) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        self.inner.new_request_with_body(method, path, body, opts)
    }

    /// Send `request` and decode the JSON response into `T`.
    pub async fn send<T: DeserializeOwned>(&self, ctx: &Context, request: Request) -> Result<T> {
        self.inner.send(ctx, request).await
    }

    /// Send `request` and discard the response body.
    pub async fn send_no_content(&self, ctx: &Context, request: Request) -> Result<()> {
        self.inner.send_no_content(ctx, request).await
    }
}

impl ClientInner {
    pub(crate) fn new_request(&self, method: Method, path: &str, opts: &[Opt]) -> Result<Request> {
        request::build::<()>(&self.base_url, method, path, None, opts)
    }

    pub(crate) fn new_request_with_body<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        opts: &[Opt],
    ) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        request::build(&self.base_url, method, path, Some(body), opts)
    }

    pub(crate) async fn send<T: DeserializeOwned>(&self, ctx: &Context, request: Request) -> Result<T> {
        let body = self.execute(ctx, request).await?;
        serde_json::from_slice(&body).map_err(Error::Decoding)
    }

    pub(crate) async fn send_no_content(&self, ctx: &Context, request: Request) -> Result<()> {
        self.execute(ctx, request).await.map(|_| ())
    }

    /// Send a request and return the full body of a successful response.
    async fn execute(&self, ctx: &Context, request: Request) -> Result<Vec<u8>> {
        // Taken before the transport runs, so credentials it adds stay out.
        let dump = request.dump();
        let request = request.into_inner();
        let method = request.method().clone();
        let url = request.url().clone();

        ctx.run(async {
            debug!(%method, %url, "sending eBay API request");
            let response = self.transport.execute(request).await?;
            debug!(%method, %url, status = %response.status(), "received eBay API response");

            let response = check_response(response, &dump).await?;
            Ok::<_, Error>(response.bytes().await?.to_vec())
        })
        .await
    }
}

impl Clone for EbayClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for EbayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EbayClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish()
    }
}
