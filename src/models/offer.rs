//! Offer API payloads (auction bidding).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::browse::Amount;
use super::primitives::ItemId;

/// The caller's current proxy bid on an auction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyBid {
    /// ID of the proxy bid
    #[serde(default)]
    pub proxy_bid_id: String,
    /// Maximum amount the caller is willing to pay
    #[serde(default)]
    pub max_amount: Option<Amount>,
}

/// Auction state as seen by the bidding user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bidding {
    /// Auction item
    #[serde(default)]
    pub item_id: ItemId,
    /// "ACTIVE" or "ENDED"
    #[serde(default)]
    pub auction_status: Option<String>,
    /// When the auction ends
    #[serde(default)]
    pub auction_end_date: Option<DateTime<Utc>>,
    /// Number of bids placed
    #[serde(default)]
    pub bid_count: i64,
    /// Current winning price
    #[serde(default)]
    pub current_price: Option<Amount>,
    /// The caller's proxy bid, if any
    #[serde(default)]
    pub current_proxy_bid: Option<ProxyBid>,
    /// Whether the caller is winning
    #[serde(default)]
    pub high_bidder: bool,
    /// Whether the reserve price has been met
    #[serde(default)]
    pub reserve_price_met: bool,
    /// Bid amounts eBay suggests
    #[serde(default)]
    pub suggested_bid_amounts: Vec<Amount>,
}

/// Consent flags required for some auctions.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConsent {
    /// Buyer confirms they are allowed to buy adult-only items
    pub adult_only_item: bool,
}

/// Body of a place-proxy-bid request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceProxyBid {
    /// Maximum amount to bid up to
    pub max_amount: Amount,
    /// Consent flags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_consent: Option<UserConsent>,
}

impl PlaceProxyBid {
    /// Bid up to `max_amount`.
    pub fn new(max_amount: Amount) -> Self {
        Self {
            max_amount,
            user_consent: None,
        }
    }

    /// Consent to bidding on an adult-only item.
    pub fn with_adult_only_consent(mut self) -> Self {
        self.user_consent = Some(UserConsent {
            adult_only_item: true,
        });
        self
    }
}
