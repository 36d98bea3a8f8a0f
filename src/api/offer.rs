//! Offer service for auction bidding.

use std::sync::Arc;

use reqwest::Method;

use super::path_segment;
use crate::client::{ClientInner, Context};
use crate::models::{Bidding, MarketplaceId, PlaceProxyBid, ProxyBid};
use crate::opt::Opt;
use crate::Result;

/// Service for the Offer API.
///
/// Both calls act on behalf of a signed-in buyer and need a user token with
/// [`SCOPE_BUY_OFFER_AUCTION`](crate::SCOPE_BUY_OFFER_AUCTION).
///
/// # Example
///
/// ```no_run
/// use ebay_rs::{Amount, Context, Decimal, MarketplaceId, PlaceProxyBid};
///
/// # async fn example(client: ebay_rs::EbayClient) -> ebay_rs::Result<()> {
/// let ctx = Context::new();
/// let bid = PlaceProxyBid::new(Amount::new(Decimal::new(1250, 2), "USD"));
/// let placed = client
///     .buy()
///     .offer()
///     .place_proxy_bid(&ctx, "v1|110511111111|0", &MarketplaceId::us(), &bid)
///     .await?;
/// println!("proxy bid {}", placed.proxy_bid_id);
/// # Ok(())
/// # }
/// ```
pub struct OfferService {
    inner: Arc<ClientInner>,
}

impl OfferService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get the buyer's bidding state on an auction.
    pub async fn get_bidding(
        &self,
        ctx: &Context,
        item_id: &str,
        marketplace_id: &MarketplaceId,
    ) -> Result<Bidding> {
        let request = self.inner.new_request(
            Method::GET,
            &format!("buy/offer/v1_beta/bidding/{}", path_segment(item_id)),
            &[Opt::marketplace_id(marketplace_id)],
        )?;
        self.inner.send(ctx, request).await
    }

    /// Place a proxy bid: eBay bids on the buyer's behalf up to the maximum.
    pub async fn place_proxy_bid(
        &self,
        ctx: &Context,
        item_id: &str,
        marketplace_id: &MarketplaceId,
        bid: &PlaceProxyBid,
    ) -> Result<ProxyBid> {
        let request = self.inner.new_request_with_body(
            Method::POST,
            &format!(
                "buy/offer/v1_beta/bidding/{}/place_proxy_bid",
                path_segment(item_id)
            ),
            bid,
            &[Opt::marketplace_id(marketplace_id)],
        )?;
        self.inner.send(ctx, request).await
    }
}
