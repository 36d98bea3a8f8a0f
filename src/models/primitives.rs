//! Primitive types, identifiers and environment constants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Root application scope, sufficient for client-credentials access to the
/// Browse API.
pub const SCOPE_ROOT: &str = "https://api.ebay.com/oauth/api_scope";
/// Read access to a user's purchase orders.
pub const SCOPE_BUY_ORDER_READONLY: &str = "https://api.ebay.com/oauth/api_scope/buy.order.readonly";
/// Guest checkout.
pub const SCOPE_BUY_GUEST_ORDER: &str = "https://api.ebay.com/oauth/api_scope/buy.guest.order";
/// Bidding on auctions on behalf of a user.
pub const SCOPE_BUY_OFFER_AUCTION: &str = "https://api.ebay.com/oauth/api_scope/buy.offer.auction";
/// Item feed files.
pub const SCOPE_BUY_ITEM_FEED: &str = "https://api.ebay.com/oauth/api_scope/buy.item.feed";
/// Marketing (merchandised products, also-bought).
pub const SCOPE_BUY_MARKETING: &str = "https://api.ebay.com/oauth/api_scope/buy.marketing";

/// A strongly-typed RESTful item ID (e.g. `v1|202117468662|0`).
///
/// # Example
///
/// ```
/// use ebay_rs::ItemId;
///
/// let id = ItemId::new("v1|202117468662|0");
/// assert_eq!(id.as_str(), "v1|202117468662|0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create a new item ID.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the item ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for ItemId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ItemId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// An eBay marketplace identifier, sent in `X-EBAY-C-MARKETPLACE-ID`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketplaceId(String);

impl MarketplaceId {
    /// Create a marketplace ID from its wire form (e.g. `EBAY_DE`).
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// United States.
    pub fn us() -> Self {
        Self::new("EBAY_US")
    }

    /// United Kingdom.
    pub fn gb() -> Self {
        Self::new("EBAY_GB")
    }

    /// Germany.
    pub fn de() -> Self {
        Self::new("EBAY_DE")
    }

    /// Get the marketplace ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MarketplaceId {
    fn default() -> Self {
        Self::us()
    }
}

impl fmt::Display for MarketplaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for MarketplaceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// OAuth2 authorization and token endpoints of an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OAuthEndpoint {
    /// Where the user is sent to grant consent
    pub auth_url: &'static str,
    /// Where codes, refresh tokens and client credentials are exchanged
    pub token_url: &'static str,
}

/// Environment configuration for the eBay API.
///
/// # Example
///
/// ```
/// use ebay_rs::Environment;
///
/// let env = Environment::Sandbox;
/// assert!(env.api_base_url().ends_with('/'));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Production marketplace.
    #[default]
    Production,
    /// Sandbox for development and testing.
    Sandbox,
}

impl Environment {
    /// Base URL for REST API requests. Always ends with `/`.
    pub fn api_base_url(&self) -> &'static str {
        match self {
            Environment::Production => "https://api.ebay.com/",
            Environment::Sandbox => "https://api.sandbox.ebay.com/",
        }
    }

    /// OAuth2 endpoints for this environment.
    pub fn oauth_endpoint(&self) -> OAuthEndpoint {
        match self {
            Environment::Production => OAuthEndpoint {
                auth_url: "https://auth.ebay.com/oauth2/authorize",
                token_url: "https://api.ebay.com/identity/v1/oauth2/token",
            },
            Environment::Sandbox => OAuthEndpoint {
                auth_url: "https://auth.sandbox.ebay.com/oauth2/authorize",
                token_url: "https://api.sandbox.ebay.com/identity/v1/oauth2/token",
            },
        }
    }

    /// Returns `true` if this is the sandbox environment.
    pub fn is_sandbox(&self) -> bool {
        matches!(self, Environment::Sandbox)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Sandbox => write!(f, "sandbox"),
        }
    }
}
