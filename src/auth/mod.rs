//! OAuth2 authentication for the eBay API.
//!
//! Requests are authenticated by an [`OAuth2Transport`], which asks a
//! [`TokenSource`] for a token before each call. Two sources cover eBay's
//! grants:
//!
//! - [`ClientCredentialsSource`] for application tokens, enough for the
//!   Browse API.
//! - [`UserTokenSource`], obtained through an [`AuthorizationCodeFlow`], for
//!   calls on behalf of a signed-in user such as bidding.
//!
//! Any other source can be plugged in by implementing [`TokenSource`].
//! [`BearerTokenSource`] adapts one to eBay's conventions.
//!
//! ```no_run
//! use ebay_rs::auth::{OAuth2Transport, OAuthConfig};
//! use ebay_rs::{EbayClient, Environment, SCOPE_ROOT};
//!
//! # fn example() -> ebay_rs::Result<()> {
//! let source = OAuthConfig::new("client-id", "client-secret", Environment::Sandbox)
//!     .with_scopes([SCOPE_ROOT])
//!     .client_credentials()?;
//! let client = EbayClient::sandbox(OAuth2Transport::new(source)?)?;
//! # Ok(())
//! # }
//! ```

mod flows;
mod token;
mod transport;

pub use flows::{
    AuthorizationCodeFlow, ClientCredentialsSource, OAuthConfig, OAuthError, TokenRequestError,
    UserTokenSource,
};
pub use token::{BearerTokenSource, StaticTokenSource, Token, TokenSource};
pub use transport::OAuth2Transport;
