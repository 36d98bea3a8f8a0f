//! Browse service for item lookup and search.

use std::sync::Arc;

use reqwest::Method;

use super::path_segment;
use crate::client::{ClientInner, Context};
use crate::models::{CompactItem, Item, Items, Search};
use crate::opt::Opt;
use crate::Result;

/// Service for the Browse API.
///
/// Every method accepts extra [`Opt`]s, applied after the parameters the
/// method sets itself. [`opts`] has helpers for the common search
/// parameters.
///
/// # Example
///
/// ```no_run
/// use ebay_rs::api::opts;
/// use ebay_rs::{Context, Opt};
///
/// # async fn example(client: ebay_rs::EbayClient) -> ebay_rs::Result<()> {
/// let ctx = Context::new();
/// let page = client
///     .buy()
///     .browse()
///     .search(&ctx, &[opts::search("drone"), opts::limit(10)])
///     .await?;
///
/// for summary in &page.item_summaries {
///     println!("{} {}", summary.item_id, summary.title);
/// }
///
/// let item = client
///     .buy()
///     .browse()
///     .get_item(&ctx, "v1|202117468662|0", &[Opt::contextual_location("US", "19406")])
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct BrowseService {
    inner: Arc<ClientInner>,
}

impl BrowseService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get an item by its legacy (Trading API) item ID.
    pub async fn get_item_by_legacy_id(
        &self,
        ctx: &Context,
        legacy_item_id: &str,
        opts: &[Opt],
    ) -> Result<Item> {
        let opts = prepend(Opt::query("legacy_item_id", legacy_item_id), opts);
        let request = self.inner.new_request(
            Method::GET,
            "buy/browse/v1/item/get_item_by_legacy_id",
            &opts,
        )?;
        self.inner.send(ctx, request).await
    }

    /// Get the compact view of an item, suited to refreshing price and
    /// availability.
    pub async fn get_compact_item(
        &self,
        ctx: &Context,
        item_id: &str,
        opts: &[Opt],
    ) -> Result<CompactItem> {
        let opts = prepend(Opt::query("fieldgroups", "COMPACT"), opts);
        let request = self.inner.new_request(
            Method::GET,
            &format!("buy/browse/v1/item/{}", path_segment(item_id)),
            &opts,
        )?;
        self.inner.send(ctx, request).await
    }

    /// Get an item with its product details.
    pub async fn get_item(&self, ctx: &Context, item_id: &str, opts: &[Opt]) -> Result<Item> {
        let opts = prepend(Opt::query("fieldgroups", "PRODUCT"), opts);
        let request = self.inner.new_request(
            Method::GET,
            &format!("buy/browse/v1/item/{}", path_segment(item_id)),
            &opts,
        )?;
        self.inner.send(ctx, request).await
    }

    /// Get every item of a multi-variation listing.
    pub async fn get_items_by_group_id(
        &self,
        ctx: &Context,
        item_group_id: &str,
        opts: &[Opt],
    ) -> Result<Items> {
        let opts = prepend(Opt::query("item_group_id", item_group_id), opts);
        let request = self.inner.new_request(
            Method::GET,
            "buy/browse/v1/item/get_items_by_item_group",
            &opts,
        )?;
        self.inner.send(ctx, request).await
    }

    /// Search items. Query parameters come entirely from `opts`.
    pub async fn search(&self, ctx: &Context, opts: &[Opt]) -> Result<Search> {
        let request =
            self.inner
                .new_request(Method::GET, "buy/browse/v1/item_summary/search", opts)?;
        self.inner.send(ctx, request).await
    }
}

fn prepend(first: Opt, rest: &[Opt]) -> Vec<Opt> {
    let mut opts = Vec::with_capacity(rest.len() + 1);
    opts.push(first);
    opts.extend_from_slice(rest);
    opts
}

/// Options for Browse API calls.
pub mod opts {
    use crate::opt::Opt;

    /// Keywords to search for (`q`).
    pub fn search(q: impl Into<String>) -> Opt {
        Opt::query("q", q)
    }

    /// Maximum number of results per page.
    pub fn limit(limit: u32) -> Opt {
        Opt::query("limit", limit.to_string())
    }

    /// Number of results to skip.
    pub fn offset(offset: u32) -> Opt {
        Opt::query("offset", offset.to_string())
    }

    /// Restrict results to the given categories.
    pub fn category_ids<I, S>(ids: I) -> Opt
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = ids
            .into_iter()
            .map(|id| id.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        Opt::query("category_ids", joined)
    }

    /// Search by Global Trade Item Number.
    pub fn gtin(gtin: impl Into<String>) -> Opt {
        Opt::query("gtin", gtin)
    }

    /// Search by eBay product ID.
    pub fn epid(epid: impl Into<String>) -> Opt {
        Opt::query("epid", epid)
    }

    /// Field filter, e.g. `price:[10..50],priceCurrency:USD`.
    pub fn filter(filter: impl Into<String>) -> Opt {
        Opt::query("filter", filter)
    }

    /// Sort order, e.g. `price` or `-price`.
    pub fn sort(sort: impl Into<String>) -> Opt {
        Opt::query("sort", sort)
    }

    /// Aspect refinement, e.g. `categoryId:15724,Color:{Red}`.
    pub fn aspect_filter(aspect_filter: impl Into<String>) -> Opt {
        Opt::query("aspect_filter", aspect_filter)
    }

    /// Extra field groups to return, e.g. `MATCHING_ITEMS,ASPECT_REFINEMENTS`.
    pub fn fieldgroups(fieldgroups: impl Into<String>) -> Opt {
        Opt::query("fieldgroups", fieldgroups)
    }

    /// Let eBay correct misspelled keywords.
    pub fn auto_correct() -> Opt {
        Opt::query("auto_correct", "KEYWORD")
    }

    /// Shipping destination used to compute shipping costs.
    pub fn contextual_location(country: &str, zip: &str) -> Opt {
        Opt::contextual_location(country, zip)
    }
}
