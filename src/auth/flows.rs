//! eBay OAuth2 grant flows.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use oauth2::basic::{BasicClient, BasicErrorResponse};
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    HttpClientError, RefreshToken, RequestTokenError, Scope, TokenUrl,
};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;
use tracing::debug;
use url::Url;

use crate::{Environment, Error, Result};

use super::token::{Token, TokenSource};

type CredentialsClient =
    BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;
type CodeClient = BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Error returned by the token endpoint exchange.
pub type TokenRequestError = RequestTokenError<HttpClientError<reqwest::Error>, BasicErrorResponse>;

/// Refresh tokens this long before they expire.
fn expiry_buffer() -> Duration {
    Duration::seconds(60)
}

/// Errors produced by the grant flows.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    /// The token endpoint rejected the request or could not be reached
    #[error("token request failed: {0}")]
    Request(#[from] TokenRequestError),

    /// The access token expired and no refresh token was issued
    #[error("access token expired and no refresh token is available")]
    NoRefreshToken,
}

/// Credentials and endpoints of an eBay application keyset.
///
/// Endpoints default to those of the chosen [`Environment`]; override them
/// to point at a mock server.
///
/// # Example
///
/// ```no_run
/// use ebay_rs::auth::OAuthConfig;
/// use ebay_rs::{Environment, SCOPE_BUY_OFFER_AUCTION, SCOPE_ROOT};
///
/// # fn example() -> ebay_rs::Result<()> {
/// let flow = OAuthConfig::new("client-id", "client-secret", Environment::Sandbox)
///     .with_redirect_uri("My_App-MyApp-SBX-abcdefghi")
///     .with_scopes([SCOPE_ROOT, SCOPE_BUY_OFFER_AUCTION])
///     .authorization_code()?;
///
/// let (url, _state) = flow.authorize_url();
/// println!("sign in at {}", url);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct OAuthConfig {
    client_id: String,
    client_secret: SecretString,
    auth_url: String,
    token_url: String,
    redirect_uri: Option<String>,
    scopes: Vec<String>,
}

impl OAuthConfig {
    /// Keyset for `env`.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        env: Environment,
    ) -> Self {
        let endpoint = env.oauth_endpoint();
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
            auth_url: endpoint.auth_url.to_string(),
            token_url: endpoint.token_url.to_string(),
            redirect_uri: None,
            scopes: Vec::new(),
        }
    }

    /// Override the token endpoint.
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Override the consent page.
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    /// Set the redirect URI. For eBay this is the RuName of the keyset, not
    /// a URL, and it is sent verbatim.
    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Set the scopes to request.
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Token source for application tokens (client-credentials grant).
    pub fn client_credentials(&self) -> Result<ClientCredentialsSource> {
        let oauth = BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_client_secret(self.secret())
            .set_token_uri(TokenUrl::new(self.token_url.clone())?);

        Ok(ClientCredentialsSource {
            oauth,
            http: token_http_client()?,
            scopes: self.scopes(),
            current: RwLock::new(None),
        })
    }

    /// Flow for user tokens (authorization-code grant).
    pub fn authorization_code(&self) -> Result<AuthorizationCodeFlow> {
        let oauth = BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_client_secret(self.secret())
            .set_auth_uri(AuthUrl::new(self.auth_url.clone())?)
            .set_token_uri(TokenUrl::new(self.token_url.clone())?);

        Ok(AuthorizationCodeFlow {
            oauth,
            http: token_http_client()?,
            scopes: self.scopes(),
            redirect_uri: self.redirect_uri.clone(),
        })
    }

    fn secret(&self) -> ClientSecret {
        ClientSecret::new(self.client_secret.expose_secret().to_string())
    }

    fn scopes(&self) -> Vec<Scope> {
        self.scopes.iter().cloned().map(Scope::new).collect()
    }
}

impl std::fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .finish()
    }
}

/// The token endpoint must not be followed through redirects.
fn token_http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?)
}

/// Application tokens from the client-credentials grant.
///
/// A token is reused until it is within a minute of expiring, then a new one
/// is requested. Concurrent callers share a single exchange.
pub struct ClientCredentialsSource {
    oauth: CredentialsClient,
    http: reqwest::Client,
    scopes: Vec<Scope>,
    current: RwLock<Option<Token>>,
}

impl ClientCredentialsSource {
    async fn cached(&self) -> Option<Token> {
        self.current
            .read()
            .await
            .as_ref()
            .filter(|token| !token.is_expired_within(expiry_buffer()))
            .cloned()
    }
}

#[async_trait]
impl TokenSource for ClientCredentialsSource {
    type Error = OAuthError;

    async fn token(&self) -> std::result::Result<Token, OAuthError> {
        if let Some(token) = self.cached().await {
            return Ok(token);
        }

        let mut current = self.current.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(token) = current
            .as_ref()
            .filter(|token| !token.is_expired_within(expiry_buffer()))
        {
            return Ok(token.clone());
        }

        let response = self
            .oauth
            .exchange_client_credentials()
            .add_scopes(self.scopes.clone())
            .request_async(&self.http)
            .await?;
        let token = Token::from_response(&response);
        debug!(expires_at = ?token.expires_at, "obtained application access token");

        *current = Some(token.clone());
        Ok(token)
    }
}

impl std::fmt::Debug for ClientCredentialsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentialsSource")
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}

/// The authorization-code grant: send the user to the consent page, then
/// trade the returned code for a user token.
pub struct AuthorizationCodeFlow {
    oauth: CodeClient,
    http: reqwest::Client,
    scopes: Vec<Scope>,
    redirect_uri: Option<String>,
}

impl AuthorizationCodeFlow {
    /// Consent page URL and the random `state` it carries. Compare the
    /// `state` eBay sends back with the returned one before exchanging.
    pub fn authorize_url(&self) -> (Url, CsrfToken) {
        let mut request = self
            .oauth
            .authorize_url(CsrfToken::new_random)
            .add_scopes(self.scopes.clone());
        if let Some(redirect_uri) = &self.redirect_uri {
            request = request.add_extra_param("redirect_uri", redirect_uri.as_str());
        }
        request.url()
    }

    /// Exchange an authorization code for a user token source.
    pub async fn exchange_code(&self, code: impl Into<String>) -> Result<UserTokenSource> {
        let code = AuthorizationCode::new(code.into());
        let mut request = self.oauth.exchange_code(code);
        if let Some(redirect_uri) = &self.redirect_uri {
            request = request.add_extra_param("redirect_uri", redirect_uri.as_str());
        }

        let response = request
            .request_async(&self.http)
            .await
            .map_err(|e| Error::token(OAuthError::from(e)))?;
        let token = Token::from_response(&response);
        debug!(expires_at = ?token.expires_at, "obtained user access token");

        Ok(self.user_source(token))
    }

    /// Resume a user session from a stored refresh token. The first call
    /// to [`TokenSource::token`] performs a refresh.
    pub fn from_refresh_token(&self, refresh_token: impl Into<String>) -> UserTokenSource {
        let mut token = Token::new("").with_expiry(Utc::now());
        token.refresh_token = Some(SecretString::from(refresh_token.into()));
        self.user_source(token)
    }

    fn user_source(&self, token: Token) -> UserTokenSource {
        UserTokenSource {
            oauth: self.oauth.clone(),
            http: self.http.clone(),
            scopes: self.scopes.clone(),
            current: RwLock::new(token),
        }
    }
}

impl std::fmt::Debug for AuthorizationCodeFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationCodeFlow")
            .field("scopes", &self.scopes)
            .field("redirect_uri", &self.redirect_uri)
            .finish_non_exhaustive()
    }
}

/// User tokens, refreshed with the refresh token shortly before they expire.
pub struct UserTokenSource {
    oauth: CodeClient,
    http: reqwest::Client,
    scopes: Vec<Scope>,
    current: RwLock<Token>,
}

impl UserTokenSource {
    /// The current refresh token, for persisting a session.
    pub async fn refresh_token(&self) -> Option<SecretString> {
        self.current.read().await.refresh_token.clone()
    }
}

#[async_trait]
impl TokenSource for UserTokenSource {
    type Error = OAuthError;

    async fn token(&self) -> std::result::Result<Token, OAuthError> {
        {
            let current = self.current.read().await;
            if !current.is_expired_within(expiry_buffer()) {
                return Ok(current.clone());
            }
        }

        let mut current = self.current.write().await;
        if !current.is_expired_within(expiry_buffer()) {
            return Ok(current.clone());
        }

        let stored = current
            .refresh_token
            .clone()
            .ok_or(OAuthError::NoRefreshToken)?;
        let refresh_token = RefreshToken::new(stored.expose_secret().to_string());
        let response = self
            .oauth
            .exchange_refresh_token(&refresh_token)
            .add_scopes(self.scopes.clone())
            .request_async(&self.http)
            .await?;

        let mut token = Token::from_response(&response);
        // eBay does not rotate refresh tokens on refresh.
        if token.refresh_token.is_none() {
            token.refresh_token = Some(stored);
        }
        debug!(expires_at = ?token.expires_at, "refreshed user access token");

        *current = token.clone();
        Ok(token)
    }
}

impl std::fmt::Debug for UserTokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserTokenSource")
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}
