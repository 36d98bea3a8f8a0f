//! HTTP client and request pipeline for the eBay API.
//!
//! A call flows through four steps:
//!
//! 1. [`EbayClient::new_request`] resolves a relative path against the base
//!    URL, encodes the JSON body and applies [`Opt`](crate::Opt)s.
//! 2. The request is dumped for diagnostics and handed to the
//!    [`HttpTransport`], under the call's [`Context`].
//! 3. [`check_response`] turns non-2xx responses into
//!    [`Error::Api`](crate::Error::Api).
//! 4. Successful bodies are decoded into the caller's type.
//!
//! # Example
//!
//! ```no_run
//! use ebay_rs::{Context, EbayClient, Opt};
//! use reqwest::Method;
//!
//! # async fn example(client: EbayClient) -> ebay_rs::Result<()> {
//! let request = client.new_request(
//!     Method::GET,
//!     "buy/browse/v1/item_summary/search",
//!     &[Opt::query("q", "drone")],
//! )?;
//! let page: serde_json::Value = client.send(&Context::new(), request).await?;
//! # Ok(())
//! # }
//! ```

mod check;
mod config;
mod context;
mod http;
mod request;
mod transport;

pub use check::check_response;
pub use config::ClientConfig;
pub use context::Context;
pub use http::EbayClient;
pub use request::Request;
pub use transport::HttpTransport;
pub(crate) use http::ClientInner;
