//! Pluggable HTTP transport.

use async_trait::async_trait;

use crate::Result;

/// Executes prepared requests.
///
/// [`EbayClient`](crate::EbayClient) hands every request to a transport. A
/// plain `reqwest::Client` sends requests as they are;
/// [`OAuth2Transport`](crate::auth::OAuth2Transport) attaches a bearer token
/// first. Implementations must be safe to share between tasks.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send `request` and return the response head. The body is left unread.
    async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response>;
}

#[async_trait]
impl HttpTransport for reqwest::Client {
    async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response> {
        Ok(reqwest::Client::execute(self, request).await?)
    }
}
