//! Response status checking and error decoding.

use tracing::debug;

use crate::error::ErrorData;
use crate::Result;

/// Check an API response for errors.
///
/// A 2xx response is handed back untouched. Anything else is turned into
/// [`Error::Api`](crate::Error::Api): the body is read to the end and decoded
/// as the API's error document (see [`ErrorData::from_body`]). A body that is
/// empty or not JSON still yields an error, just with no entries, so this
/// never fails for decoding reasons.
pub async fn check_response(
    response: reqwest::Response,
    request_dump: &str,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = match response.bytes().await {
        Ok(body) => body.to_vec(),
        Err(err) => {
            debug!(error = %err, "failed to read error response body");
            Vec::new()
        }
    };

    let mut data = ErrorData::from_body(&body);
    data.status = status.as_u16();
    data.request_dump = request_dump.to_string();

    debug!(
        status = data.status,
        errors = data.errors.len(),
        "eBay API returned an error response"
    );
    Err(data.into())
}
