use crate::model::Error;
use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};

/// Issues a GET and reads the whole body, giving up once `timeout` elapses.
///
/// The deadline covers connecting, receiving headers and reading the body. Running out of
/// time is reported as [`Error::TimeoutExceeded`], any other transport problem as
/// [`Error::TransportFailure`].
pub async fn get(client: &Client, url: &str, timeout: Duration) -> Result<Vec<u8>, Error> {
    if timeout.is_zero() {
        return Err(Error::InvalidTimeout);
    }

    info!(%url, ?timeout, "Sending request");

    let res = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| transport_error(e, url, timeout))?;

    let status = res.status();

    if !status.is_success() {
        warn!(%url, %status, "Unexpected response status");
        return Err(Error::NonOkStatus(status.as_u16()));
    }

    let body = res
        .bytes()
        .await
        .map_err(|e| transport_error(e, url, timeout))?;

    Ok(body.to_vec())
}

fn transport_error(e: reqwest::Error, url: &str, timeout: Duration) -> Error {
    if e.is_timeout() {
        warn!(%url, ?timeout, "Request timed out");
        Error::timeout("http request", timeout)
    } else {
        warn!(%url, error = %e, "Request failed");
        Error::TransportFailure(e)
    }
}
