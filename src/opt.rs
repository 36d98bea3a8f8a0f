//! Per-request options.
//!
//! An [`Opt`] is a function run against a [`Request`] after it has been
//! built. Options may only add query parameters or headers; they run in the
//! order given, so two options writing the same header compose according to
//! how each one writes it.

use std::fmt;
use std::sync::Arc;

use url::form_urlencoded;

use crate::client::Request;
use crate::models::MarketplaceId;
use crate::Result;

/// End-user context header (localization, affiliate data).
pub const END_USER_CTX_HEADER: &str = "X-EBAY-C-ENDUSERCTX";
/// Marketplace selection header.
pub const MARKETPLACE_ID_HEADER: &str = "X-EBAY-C-MARKETPLACE-ID";

type OptFn = dyn Fn(&mut Request) -> Result<()> + Send + Sync;

/// A functional request option.
///
/// # Example
///
/// ```
/// use ebay_rs::Opt;
///
/// let opts = [
///     Opt::contextual_location("US", "19406"),
///     Opt::query("limit", "10"),
/// ];
/// # let _ = opts;
/// ```
#[derive(Clone)]
pub struct Opt(Arc<OptFn>);

impl Opt {
    /// Wrap a custom request mutation.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Request) -> Result<()> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Run the option against a request.
    pub fn apply(&self, request: &mut Request) -> Result<()> {
        (self.0)(request)
    }

    /// Append a query parameter.
    pub fn query(key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        Self::new(move |r| {
            r.append_query(&key, &value);
            Ok(())
        })
    }

    /// Set a header, replacing any previous value.
    pub fn header(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        Self::new(move |r| r.set_header(&name, &value))
    }

    /// Localize results for a buyer in `country` with postal code `zip`.
    ///
    /// Appends `contextualLocation=<escaped "country=..,zip=..">` to the
    /// [`END_USER_CTX_HEADER`], preserving any value already there.
    pub fn contextual_location(country: &str, zip: &str) -> Self {
        let location = format!("country={},zip={}", country, zip);
        let value = format!(
            "contextualLocation={}",
            form_urlencoded::byte_serialize(location.as_bytes()).collect::<String>()
        );
        Self::new(move |r| r.append_header_value(END_USER_CTX_HEADER, &value))
    }

    /// Select the marketplace the call is made against.
    pub fn marketplace_id(marketplace: &MarketplaceId) -> Self {
        Self::header(MARKETPLACE_ID_HEADER, marketplace.as_str())
    }
}

impl fmt::Debug for Opt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Opt").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use url::Url;

    fn request() -> Request {
        Request::new(Method::GET, Url::parse("http://localhost/").unwrap())
    }

    #[test]
    fn test_contextual_location() {
        let mut r = request();
        Opt::contextual_location("US", "19406").apply(&mut r).unwrap();
        assert_eq!(
            r.header(END_USER_CTX_HEADER),
            Some("contextualLocation=country%3DUS%2Czip%3D19406")
        );
    }

    #[test]
    fn test_contextual_location_existing_header() {
        let mut r = request();
        r.set_header(END_USER_CTX_HEADER, "affiliateCampaignId=1").unwrap();
        Opt::contextual_location("US", "19406").apply(&mut r).unwrap();
        assert_eq!(
            r.header(END_USER_CTX_HEADER),
            Some("affiliateCampaignId=1,contextualLocation=country%3DUS%2Czip%3D19406")
        );
    }

    #[test]
    fn test_contextual_location_keeps_non_ascii_value() {
        let mut r = request();
        r.set_header(END_USER_CTX_HEADER, "affiliateReferenceId=café").unwrap();
        Opt::contextual_location("US", "19406").apply(&mut r).unwrap();

        let value = r.headers().get(END_USER_CTX_HEADER).unwrap().as_bytes();
        assert_eq!(
            value,
            "affiliateReferenceId=café,contextualLocation=country%3DUS%2Czip%3D19406".as_bytes()
        );
    }

    #[test]
    fn test_query_appends() {
        let mut r = request();
        Opt::query("q", "red shoes").apply(&mut r).unwrap();
        Opt::query("limit", "2").apply(&mut r).unwrap();
        assert_eq!(r.url().query(), Some("q=red+shoes&limit=2"));
        assert_eq!(r.query("q").as_deref(), Some("red shoes"));
    }

    #[test]
    fn test_header_replaces() {
        let mut r = request();
        Opt::marketplace_id(&MarketplaceId::gb()).apply(&mut r).unwrap();
        Opt::marketplace_id(&MarketplaceId::de()).apply(&mut r).unwrap();
        assert_eq!(r.header(MARKETPLACE_ID_HEADER), Some("EBAY_DE"));
        assert_eq!(r.headers().len(), 1);
    }
}
