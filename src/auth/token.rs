//! Access tokens and token sources.

use std::convert::Infallible;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use oauth2::basic::{BasicTokenResponse, BasicTokenType};
use oauth2::TokenResponse;
use secrecy::{ExposeSecret, SecretString};

use crate::{Error, Result};

/// An OAuth2 access token.
#[derive(Debug, Clone)]
pub struct Token {
    /// The bearer credential
    pub access_token: SecretString,
    /// Token type as issued ("Bearer", "Application Access Token", ...)
    pub token_type: String,
    /// When the access token stops being accepted, if known
    pub expires_at: Option<DateTime<Utc>>,
    /// Refresh token issued with a user token
    pub refresh_token: Option<SecretString>,
}

impl Token {
    /// A bearer token with no known expiry.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: SecretString::from(access_token.into()),
            token_type: "Bearer".to_string(),
            expires_at: None,
            refresh_token: None,
        }
    }

    /// Set the expiry time.
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Returns `true` if the token expires within `buffer` from now. Tokens
    /// without an expiry never do.
    pub fn is_expired_within(&self, buffer: Duration) -> bool {
        self.expires_at
            .is_some_and(|expires_at| Utc::now() + buffer >= expires_at)
    }

    /// Value for the `Authorization` header.
    pub fn authorization_value(&self) -> String {
        format!("{} {}", self.token_type, self.access_token.expose_secret())
    }

    pub(crate) fn from_response(response: &BasicTokenResponse) -> Self {
        #[allow(unreachable_patterns)]
        let token_type = match response.token_type() {
            BasicTokenType::Bearer => "Bearer".to_string(),
            BasicTokenType::Mac => "MAC".to_string(),
            BasicTokenType::Extension(other) => other.clone(),
            _ => "Bearer".to_string(),
        };
        let expires_at = response
            .expires_in()
            .and_then(|lifetime| Duration::from_std(lifetime).ok())
            .map(|lifetime| Utc::now() + lifetime);

        Self {
            access_token: SecretString::from(response.access_token().secret().clone()),
            token_type,
            expires_at,
            refresh_token: response
                .refresh_token()
                .map(|t| SecretString::from(t.secret().clone())),
        }
    }
}

/// Something that can hand out a currently valid access token.
///
/// Implementations own their caching and refresh policy; callers simply ask
/// for a token before every request.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Error returned when no token can be produced.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return a token that is valid now.
    async fn token(&self) -> std::result::Result<Token, Self::Error>;
}

/// A token source that always returns the same token.
#[derive(Debug, Clone)]
pub struct StaticTokenSource(Token);

impl StaticTokenSource {
    /// Serve `token` forever.
    pub fn new(token: Token) -> Self {
        Self(token)
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    type Error = Infallible;

    async fn token(&self) -> std::result::Result<Token, Infallible> {
        Ok(self.0.clone())
    }
}

/// Wraps a token source for use against the eBay API.
///
/// Every failure of the wrapped source comes back as [`Error::Token`], which
/// keeps "could not authenticate" apart from "the authenticated call failed".
/// Tokens are returned with their type set to `Bearer`, since eBay issues
/// tokens typed "Application Access Token" or "User Access Token" but only
/// accepts them as bearer credentials. Nothing is cached here.
///
/// # Example
///
/// ```
/// use ebay_rs::auth::{BearerTokenSource, StaticTokenSource, Token, TokenSource};
///
/// # async fn example() -> ebay_rs::Result<()> {
/// let mut issued = Token::new("v^1.1#i^1");
/// issued.token_type = "Application Access Token".into();
///
/// let source = BearerTokenSource::new(StaticTokenSource::new(issued));
/// let token = source.token().await?;
/// assert_eq!(token.token_type, "Bearer");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BearerTokenSource<S> {
    inner: S,
}

impl<S> BearerTokenSource<S> {
    /// Wrap `inner`.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// The wrapped source.
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Unwrap the wrapped source.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

#[async_trait]
impl<S: TokenSource> TokenSource for BearerTokenSource<S> {
    type Error = Error;

    async fn token(&self) -> Result<Token> {
        let mut token = self.inner.token().await.map_err(Error::token)?;
        token.token_type = "Bearer".to_string();
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, thiserror::Error)]
    #[error("invalid_client")]
    struct InvalidClient;

    struct FailingSource;

    #[async_trait]
    impl TokenSource for FailingSource {
        type Error = InvalidClient;

        async fn token(&self) -> std::result::Result<Token, InvalidClient> {
            Err(InvalidClient)
        }
    }

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TokenSource for CountingSource {
        type Error = Infallible;

        async fn token(&self) -> std::result::Result<Token, Infallible> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            let mut token = Token::new(format!("token-{}", n));
            token.token_type = "User Access Token".to_string();
            Ok(token)
        }
    }

    #[tokio::test]
    async fn test_failure_is_tagged_as_token_error() {
        let err = BearerTokenSource::new(FailingSource).token().await.unwrap_err();
        assert!(err.is_token_error());
        assert!(!err.is_transport());
        assert!(err.to_string().contains("invalid_client"));
    }

    #[tokio::test]
    async fn test_token_type_normalized_without_caching() {
        let source = BearerTokenSource::new(CountingSource::default());

        let first = source.token().await.unwrap();
        let second = source.token().await.unwrap();

        assert_eq!(first.token_type, "Bearer");
        assert_eq!(first.access_token.expose_secret(), "token-0");
        assert_eq!(second.access_token.expose_secret(), "token-1");
        assert_eq!(source.get_ref().calls.load(Ordering::SeqCst), 2);
        assert_eq!(second.authorization_value(), "Bearer token-1");
    }

    #[test]
    fn test_expiry() {
        let token = Token::new("t");
        assert!(!token.is_expired_within(Duration::seconds(60)));

        let token = Token::new("t").with_expiry(Utc::now() + Duration::seconds(30));
        assert!(token.is_expired_within(Duration::seconds(60)));
        assert!(!token.is_expired_within(Duration::seconds(0)));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let token = Token::new("super-secret-token");
        let debug_str = format!("{:?}", token);
        assert!(!debug_str.contains("super-secret-token"));
    }
}
