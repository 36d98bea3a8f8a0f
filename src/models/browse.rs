//! Browse API payloads: items, item groups and search results.
//!
//! Only the commonly used fields are modeled. Everything is optional on the
//! wire, so every field either has a default or is an `Option`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::primitives::ItemId;
use crate::error::ErrorEntry;

/// A monetary amount. The value travels as a decimal string ("12.50") and
/// keeps its scale through a round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amount {
    /// Decimal value
    pub value: Decimal,
    /// ISO 4217 currency code
    pub currency: String,
}

impl Amount {
    /// Create an amount from a value and a currency code.
    pub fn new(value: Decimal, currency: impl Into<String>) -> Self {
        Self {
            value,
            currency: currency.into(),
        }
    }
}

/// An image reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Image URL
    #[serde(default)]
    pub image_url: String,
    /// Height in pixels
    #[serde(default)]
    pub height: Option<u32>,
    /// Width in pixels
    #[serde(default)]
    pub width: Option<u32>,
}

/// Seller summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    /// Seller user name
    #[serde(default)]
    pub username: String,
    /// Percentage of positive feedback, as a decimal string
    #[serde(default)]
    pub feedback_percentage: Option<String>,
    /// Feedback score
    #[serde(default)]
    pub feedback_score: Option<i64>,
}

/// Where an item is located.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemLocation {
    /// City
    #[serde(default)]
    pub city: Option<String>,
    /// State or province
    #[serde(default)]
    pub state_or_province: Option<String>,
    /// Postal code
    #[serde(default)]
    pub postal_code: Option<String>,
    /// Two-letter country code
    #[serde(default)]
    pub country: Option<String>,
}

/// A shipping option offered for an item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOption {
    /// "FIXED" or "CALCULATED"
    #[serde(default)]
    pub shipping_cost_type: Option<String>,
    /// Shipping cost
    #[serde(default)]
    pub shipping_cost: Option<Amount>,
    /// Carrier code
    #[serde(default)]
    pub shipping_carrier_code: Option<String>,
    /// Earliest delivery estimate
    #[serde(default)]
    pub min_estimated_delivery_date: Option<DateTime<Utc>>,
    /// Latest delivery estimate
    #[serde(default)]
    pub max_estimated_delivery_date: Option<DateTime<Utc>>,
}

/// Availability of an item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedAvailability {
    /// "IN_STOCK", "LIMITED_STOCK" or "OUT_OF_STOCK"
    #[serde(default)]
    pub estimated_availability_status: Option<String>,
    /// Estimated number of units available
    #[serde(default)]
    pub estimated_available_quantity: Option<i64>,
    /// Units sold so far
    #[serde(default)]
    pub estimated_sold_quantity: Option<i64>,
    /// Delivery methods ("SHIP_TO_HOME", "SELLER_ARRANGED_LOCAL_PICKUP", ...)
    #[serde(default)]
    pub delivery_options: Vec<String>,
}

/// A name/value item aspect (e.g. "Color" = "Red").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedAspect {
    /// Aspect value type ("STRING")
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Aspect name
    #[serde(default)]
    pub name: String,
    /// Aspect value
    #[serde(default)]
    pub value: String,
}

/// Parent group of an item that has variations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemGroup {
    /// Group ID
    #[serde(default)]
    pub item_group_id: String,
    /// Group title
    #[serde(default)]
    pub item_group_title: Option<String>,
    /// Group image
    #[serde(default)]
    pub item_group_image: Option<Image>,
    /// Group type ("SELLER_DEFINED_VARIATIONS")
    #[serde(default)]
    pub item_group_type: Option<String>,
    /// Link to the group resource
    #[serde(default)]
    pub item_group_href: Option<String>,
}

/// A category an item belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category ID
    #[serde(default)]
    pub category_id: String,
    /// Category name
    #[serde(default)]
    pub category_name: Option<String>,
}

/// Full item details, returned by `get_item` and `get_item_by_legacy_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// RESTful item ID
    #[serde(default)]
    pub item_id: ItemId,
    /// Legacy (Trading API) item ID
    #[serde(default)]
    pub legacy_item_id: Option<String>,
    /// Item title
    #[serde(default)]
    pub title: String,
    /// Subtitle
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Plain-text description summary
    #[serde(default)]
    pub short_description: Option<String>,
    /// Full HTML description
    #[serde(default)]
    pub description: Option<String>,
    /// Listing price
    #[serde(default)]
    pub price: Option<Amount>,
    /// Current bid of an auction
    #[serde(default)]
    pub current_bid_price: Option<Amount>,
    /// Number of bids placed on an auction
    #[serde(default)]
    pub bid_count: Option<i64>,
    /// Buying options ("FIXED_PRICE", "AUCTION", "BEST_OFFER")
    #[serde(default)]
    pub buying_options: Vec<String>,
    /// Category path, pipe separated
    #[serde(default)]
    pub category_path: Option<String>,
    /// Leaf category ID
    #[serde(default)]
    pub category_id: Option<String>,
    /// Condition label
    #[serde(default)]
    pub condition: Option<String>,
    /// Condition ID
    #[serde(default)]
    pub condition_id: Option<String>,
    /// Where the item ships from
    #[serde(default)]
    pub item_location: Option<ItemLocation>,
    /// Primary image
    #[serde(default)]
    pub image: Option<Image>,
    /// Additional images
    #[serde(default)]
    pub additional_images: Vec<Image>,
    /// Brand
    #[serde(default)]
    pub brand: Option<String>,
    /// Manufacturer part number
    #[serde(default)]
    pub mpn: Option<String>,
    /// Global trade item number
    #[serde(default)]
    pub gtin: Option<String>,
    /// eBay product ID
    #[serde(default)]
    pub epid: Option<String>,
    /// Seller summary
    #[serde(default)]
    pub seller: Option<Seller>,
    /// Availability
    #[serde(default)]
    pub estimated_availabilities: Vec<EstimatedAvailability>,
    /// Shipping options
    #[serde(default)]
    pub shipping_options: Vec<ShippingOption>,
    /// Item aspects
    #[serde(default)]
    pub localized_aspects: Vec<LocalizedAspect>,
    /// Parent group for variation listings
    #[serde(default)]
    pub primary_item_group: Option<ItemGroup>,
    /// When the listing ends
    #[serde(default)]
    pub item_end_date: Option<DateTime<Utc>>,
    /// Listing URL on the eBay site
    #[serde(default)]
    pub item_web_url: Option<String>,
    /// Whether guest checkout is available
    #[serde(default)]
    pub enabled_for_guest_checkout: bool,
    /// Whether the seller is top rated
    #[serde(default)]
    pub top_rated_buying_experience: bool,
}

/// Compact item details, returned by `get_compact_item`.
///
/// Carries only fields that change frequently (price, availability).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompactItem {
    /// RESTful item ID
    #[serde(default)]
    pub item_id: ItemId,
    /// Listing price
    #[serde(default)]
    pub price: Option<Amount>,
    /// Current bid of an auction
    #[serde(default)]
    pub current_bid_price: Option<Amount>,
    /// Number of bids placed on an auction
    #[serde(default)]
    pub bid_count: Option<i64>,
    /// Availability
    #[serde(default)]
    pub estimated_availabilities: Vec<EstimatedAvailability>,
    /// Shipping options
    #[serde(default)]
    pub shipping_options: Vec<ShippingOption>,
    /// When the listing ends
    #[serde(default)]
    pub item_end_date: Option<DateTime<Utc>>,
}

/// All items of an item group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Items {
    /// Items in the group
    #[serde(default)]
    pub items: Vec<Item>,
    /// Non-fatal problems reported with the result
    #[serde(default)]
    pub warnings: Vec<ErrorEntry>,
}

/// One search hit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    /// RESTful item ID
    #[serde(default)]
    pub item_id: ItemId,
    /// Legacy item ID
    #[serde(default)]
    pub legacy_item_id: Option<String>,
    /// Item title
    #[serde(default)]
    pub title: String,
    /// Listing price
    #[serde(default)]
    pub price: Option<Amount>,
    /// Current bid of an auction
    #[serde(default)]
    pub current_bid_price: Option<Amount>,
    /// Number of bids
    #[serde(default)]
    pub bid_count: Option<i64>,
    /// Buying options
    #[serde(default)]
    pub buying_options: Vec<String>,
    /// Categories
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Condition label
    #[serde(default)]
    pub condition: Option<String>,
    /// Condition ID
    #[serde(default)]
    pub condition_id: Option<String>,
    /// Primary image
    #[serde(default)]
    pub image: Option<Image>,
    /// Location
    #[serde(default)]
    pub item_location: Option<ItemLocation>,
    /// Seller summary
    #[serde(default)]
    pub seller: Option<Seller>,
    /// Link to the full item resource
    #[serde(default)]
    pub item_href: Option<String>,
    /// Listing URL on the eBay site
    #[serde(default)]
    pub item_web_url: Option<String>,
}

/// A page of search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Search {
    /// URI of this page
    #[serde(default)]
    pub href: String,
    /// Total number of matches
    #[serde(default)]
    pub total: i64,
    /// URI of the next page
    #[serde(default)]
    pub next: Option<String>,
    /// URI of the previous page
    #[serde(default)]
    pub prev: Option<String>,
    /// Page size
    #[serde(default)]
    pub limit: i64,
    /// Offset of the first hit on this page
    #[serde(default)]
    pub offset: i64,
    /// Hits on this page
    #[serde(default)]
    pub item_summaries: Vec<ItemSummary>,
    /// Non-fatal problems reported with the result
    #[serde(default)]
    pub warnings: Vec<ErrorEntry>,
}
