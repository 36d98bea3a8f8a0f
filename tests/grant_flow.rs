//! Live grant-flow test against the eBay sandbox.
//!
//! Environment variables required:
//! - SANDBOX_CLIENT_ID: App ID of a sandbox keyset
//! - SANDBOX_CLIENT_SECRET: Cert ID of the same keyset
//! - SANDBOX_AUCTION_URL: URL of an auction listed in the sandbox (auctions
//!   cannot be created through the REST API)
//!
//! Run with: cargo test --test grant_flow -- --ignored

use std::env;

use tracing_subscriber::EnvFilter;

use ebay_rs::prelude::*;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

#[tokio::test]
#[ignore = "requires sandbox credentials"]
async fn test_client_credentials_grant() {
    init_logging();

    let client_id = env::var("SANDBOX_CLIENT_ID").expect("SANDBOX_CLIENT_ID must be set");
    let client_secret =
        env::var("SANDBOX_CLIENT_SECRET").expect("SANDBOX_CLIENT_SECRET must be set");
    let auction_url = env::var("SANDBOX_AUCTION_URL").expect("SANDBOX_AUCTION_URL must be set");

    let client =
        EbayClient::from_client_credentials(client_id, client_secret, Environment::Sandbox)
            .expect("Failed to create client");
    let ctx = Context::new();

    let legacy_id = auction_url
        .rsplit('/')
        .next()
        .expect("auction URL has a path");
    let legacy = client
        .buy()
        .browse()
        .get_item_by_legacy_id(&ctx, legacy_id, &[])
        .await
        .expect("legacy item lookup failed");

    let item = client
        .buy()
        .browse()
        .get_item(&ctx, legacy.item_id.as_str(), &[])
        .await
        .expect("item lookup failed");
    println!("Item ID is {:?}", item.item_id.as_str());
}
