//! Integration tests for the request pipeline and the Buy API services.
//!
//! Every test runs against a local `wiremock` server; no credentials are
//! needed.
//!
//! Run with: cargo test --test browse_tests

use std::sync::Once;
use std::time::Duration;

use rust_decimal_macros::dec;
use serde_json::json;
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ebay_rs::api::opts;
use ebay_rs::auth::{OAuth2Transport, StaticTokenSource, Token};
use ebay_rs::prelude::*;
use ebay_rs::Method;

static INIT: Once = Once::new();

/// Initialize logging for tests
fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Start a mock server and a client pointed at it.
async fn setup() -> (EbayClient, MockServer) {
    init_logging();
    let server = MockServer::start().await;
    let client = EbayClient::with_base_url(reqwest::Client::new(), &format!("{}/", server.uri()))
        .expect("mock server URI is a valid base URL");
    (client, server)
}

mod browse_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_item_by_legacy_id() {
        let (client, server) = setup().await;
        Mock::given(method("GET"))
            .and(path("/buy/browse/v1/item/get_item_by_legacy_id"))
            .and(query_param("legacy_item_id", "202117468662"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"itemId": "itemId"}"#, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let item = client
            .buy()
            .browse()
            .get_item_by_legacy_id(&Context::new(), "202117468662", &[])
            .await
            .unwrap();
        assert_eq!(item.item_id, "itemId");
    }

    #[tokio::test]
    async fn test_get_compact_item() {
        let (client, server) = setup().await;
        Mock::given(method("GET"))
            .and(path("/buy/browse/v1/item/v1|202117468662|0"))
            .and(query_param("fieldgroups", "COMPACT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "itemId": "itemId",
                "price": {"value": "9.99", "currency": "USD"},
            })))
            .expect(1)
            .mount(&server)
            .await;

        let item = client
            .buy()
            .browse()
            .get_compact_item(&Context::new(), "v1|202117468662|0", &[])
            .await
            .unwrap();
        assert_eq!(item.item_id, "itemId");
        assert_eq!(item.price.unwrap().value, dec!(9.99));
    }

    #[tokio::test]
    async fn test_get_item() {
        let (client, server) = setup().await;
        Mock::given(method("GET"))
            .and(path("/buy/browse/v1/item/v1|202117468662|0"))
            .and(query_param("fieldgroups", "PRODUCT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"itemId": "itemId"})))
            .expect(1)
            .mount(&server)
            .await;

        let item = client
            .buy()
            .browse()
            .get_item(&Context::new(), "v1|202117468662|0", &[])
            .await
            .unwrap();
        assert_eq!(item.item_id, "itemId");
    }

    #[tokio::test]
    async fn test_get_items_by_group_id() {
        let (client, server) = setup().await;
        Mock::given(method("GET"))
            .and(path("/buy/browse/v1/item/get_items_by_item_group"))
            .and(query_param("item_group_id", "151915076499"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"items": [{"itemId": "itemId"}]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let group = client
            .buy()
            .browse()
            .get_items_by_group_id(&Context::new(), "151915076499", &[])
            .await
            .unwrap();
        assert_eq!(group.items.len(), 1);
        assert_eq!(group.items[0].item_id, "itemId");
    }

    #[tokio::test]
    async fn test_search() {
        let (client, server) = setup().await;
        Mock::given(method("GET"))
            .and(path("/buy/browse/v1/item_summary/search"))
            .and(query_param("q", "search"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "href": "href",
                "total": 1,
                "itemSummaries": [{"itemId": "itemId"}],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client
            .buy()
            .browse()
            .search(&Context::new(), &[opts::search("search"), opts::limit(2)])
            .await
            .unwrap();
        assert_eq!(page.href, "href");
        assert_eq!(page.total, 1);
        assert_eq!(page.item_summaries[0].item_id, "itemId");
    }

    #[tokio::test]
    async fn test_item_id_stays_in_one_path_segment() {
        let (client, server) = setup().await;
        Mock::given(method("GET"))
            .and(path("/buy/browse/v1/item/v1%2F2%3Fx%3D1%230"))
            .and(query_param("fieldgroups", "PRODUCT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"itemId": "odd"})))
            .expect(1)
            .mount(&server)
            .await;

        let item = client
            .buy()
            .browse()
            .get_item(&Context::new(), "v1/2?x=1#0", &[])
            .await
            .unwrap();
        assert_eq!(item.item_id, "odd");
    }

    #[tokio::test]
    async fn test_contextual_location_header_sent() {
        let (client, server) = setup().await;
        Mock::given(method("GET"))
            .and(path("/buy/browse/v1/item/v1|1|0"))
            .and(header(
                "X-EBAY-C-ENDUSERCTX",
                "contextualLocation=country%3DUS%2Czip%3D19406",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"itemId": "v1|1|0"})))
            .expect(1)
            .mount(&server)
            .await;

        let item = client
            .buy()
            .browse()
            .get_item(
                &Context::new(),
                "v1|1|0",
                &[opts::contextual_location("US", "19406")],
            )
            .await
            .unwrap();
        assert_eq!(item.item_id, "v1|1|0");
    }
}

mod offer_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_bidding() {
        let (client, server) = setup().await;
        Mock::given(method("GET"))
            .and(path("/buy/offer/v1_beta/bidding/v1|110|0"))
            .and(header("X-EBAY-C-MARKETPLACE-ID", "EBAY_US"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "itemId": "v1|110|0",
                "auctionStatus": "ACTIVE",
                "bidCount": 3,
                "highBidder": true,
                "currentPrice": {"value": "5.00", "currency": "USD"},
            })))
            .expect(1)
            .mount(&server)
            .await;

        let bidding = client
            .buy()
            .offer()
            .get_bidding(&Context::new(), "v1|110|0", &MarketplaceId::us())
            .await
            .unwrap();
        assert_eq!(bidding.bid_count, 3);
        assert!(bidding.high_bidder);
        assert_eq!(bidding.auction_status.as_deref(), Some("ACTIVE"));
    }

    #[tokio::test]
    async fn test_place_proxy_bid() {
        let (client, server) = setup().await;
        Mock::given(method("POST"))
            .and(path("/buy/offer/v1_beta/bidding/v1|110|0/place_proxy_bid"))
            .and(header("X-EBAY-C-MARKETPLACE-ID", "EBAY_GB"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "maxAmount": {"value": "12.50", "currency": "GBP"},
                "userConsent": {"adultOnlyItem": true},
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"proxyBidId": "8474"})))
            .expect(1)
            .mount(&server)
            .await;

        let bid = PlaceProxyBid::new(Amount::new(dec!(12.50), "GBP")).with_adult_only_consent();
        let placed = client
            .buy()
            .offer()
            .place_proxy_bid(&Context::new(), "v1|110|0", &MarketplaceId::gb(), &bid)
            .await
            .unwrap();
        assert_eq!(placed.proxy_bid_id, "8474");
    }
}

mod error_tests {
    use super::*;

    #[tokio::test]
    async fn test_api_error_codes() {
        let (client, server) = setup().await;
        Mock::given(method("GET"))
            .and(path("/buy/browse/v1/item/get_item_by_legacy_id"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "errors": [{
                    "errorId": 11001,
                    "domain": "API_BROWSE",
                    "category": "REQUEST",
                    "message": "The specified legacy Id was not found.",
                    "parameters": [{"name": "legacy_item_id", "value": "1"}],
                }]
            })))
            .mount(&server)
            .await;

        let err = client
            .buy()
            .browse()
            .get_item_by_legacy_id(&Context::new(), "1", &[])
            .await
            .unwrap_err();

        assert!(err.is_api_error());
        assert_eq!(err.status(), Some(404));
        assert!(is_error(Some(&err), &[11001]));
        assert!(is_error(Some(&err), &[42, 11001]));
        assert!(!is_error(Some(&err), &[11002]));

        let data = err.api_errors().unwrap();
        assert_eq!(data.errors[0].domain, "API_BROWSE");
        assert_eq!(data.errors[0].parameters[0].value, "1");
        assert!(data
            .request_dump
            .starts_with("GET /buy/browse/v1/item/get_item_by_legacy_id?legacy_item_id=1 HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_malformed_error_body() {
        let (client, server) = setup().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client
            .buy()
            .browse()
            .get_item(&Context::new(), "v1|1|0", &[])
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert!(err.api_errors().unwrap().errors.is_empty());
        assert!(!is_error(Some(&err), &[11001]));
    }

    #[tokio::test]
    async fn test_undecodable_success_body() {
        let (client, server) = setup().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client
            .buy()
            .browse()
            .search(&Context::new(), &[opts::search("x")])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decoding(_)));
    }

    #[tokio::test]
    async fn test_leading_slash_rejected_before_sending() {
        let (client, server) = setup().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client
            .new_request(Method::GET, "/buy/browse/v1/item/x", &[])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        init_logging();
        let client = EbayClient::with_base_url(reqwest::Client::new(), "http://127.0.0.1:1/").unwrap();

        let err = client
            .buy()
            .browse()
            .get_item(&Context::new(), "v1|1|0", &[])
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert!(!is_error(Some(&err), &[11001]));
    }
}

mod context_tests {
    use super::*;

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let (client, server) = setup().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"itemId": "late"}))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let ctx = Context::new().with_timeout(Duration::from_millis(100));
        let err = client
            .buy()
            .browse()
            .get_item(&ctx, "v1|1|0", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Timeout));
    }

    #[tokio::test]
    async fn test_canceled_mid_flight() {
        let (client, server) = setup().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"itemId": "late"}))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let ctx = Context::new();
        let canceler = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceler.cancel();
        });

        let err = client
            .buy()
            .browse()
            .get_item(&ctx, "v1|1|0", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Canceled));
    }

    #[tokio::test]
    async fn test_canceled_context_sends_nothing() {
        let (client, server) = setup().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let ctx = Context::new();
        ctx.cancel();
        let err = client
            .buy()
            .browse()
            .search(&ctx, &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Canceled));
    }
}

mod auth_tests {
    use super::*;

    #[tokio::test]
    async fn test_bearer_token_attached_and_kept_out_of_dump() {
        init_logging();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/buy/browse/v1/item/v1|1|0"))
            .and(header("authorization", "Bearer app-token"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "errors": [{"errorId": 1100, "message": "Access denied"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut token = Token::new("app-token");
        token.token_type = "Application Access Token".into();
        let transport =
            OAuth2Transport::with_client(reqwest::Client::new(), StaticTokenSource::new(token));
        let client = EbayClient::with_base_url(transport, &format!("{}/", server.uri())).unwrap();

        let err = client
            .buy()
            .browse()
            .get_item(&Context::new(), "v1|1|0", &[])
            .await
            .unwrap_err();

        assert!(is_error(Some(&err), &[1100]));
        let dump = &err.api_errors().unwrap().request_dump;
        assert!(!dump.contains("app-token"));
    }
}
