//! Per-call cancellation and deadlines.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::{Error, Result};

/// Governs a single API call: it can be canceled from another task and may
/// carry a deadline.
///
/// The deadline is measured from the moment each call starts, so one
/// `Context` can be reused across calls. Cancellation is sticky: once the
/// token fires, every call made with this context fails with
/// [`Error::Canceled`].
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use ebay_rs::Context;
///
/// # async fn example(client: ebay_rs::EbayClient) -> ebay_rs::Result<()> {
/// let ctx = Context::new().with_timeout(Duration::from_secs(5));
/// let item = client.buy().browse().get_item(&ctx, "v1|202117468662|0", &[]).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancel: CancellationToken,
    timeout: Option<Duration>,
}

impl Context {
    /// A context that is never canceled and has no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail calls that take longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Tie calls to an existing cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// The token canceling this context.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Cancel every call running, or later made, with this context.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns `true` once the context has been canceled.
    pub fn is_canceled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drive `fut` to completion unless the context is canceled or the
    /// deadline passes first. The losing future is dropped, which aborts the
    /// in-flight request and releases its connection.
    pub(crate) async fn run<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_canceled() {
            return Err(Error::Canceled);
        }

        let guarded = async {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => Err(Error::Canceled),
                result = fut => result,
            }
        };

        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, guarded)
                .await
                .unwrap_or(Err(Error::Timeout)),
            None => guarded.await,
        }
    }
}
