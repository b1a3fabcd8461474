use reqwest::{Client, StatusCode};
use tracing::{instrument, trace};

use crate::{
    Sample,
    error::{FetchError, FetchResult},
};

/// Fetch and parse one sample from the stats endpoint.
///
/// The request timeout is the one configured on `client`.
#[instrument(skip(client))]
pub async fn fetch_sample(client: &Client, url: &str) -> FetchResult<Sample> {
    trace!("requesting stats");

    let response = client.get(url).send().await.map_err(FetchError::Request)?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::Status(status));
    }

    let body = response.text().await.map_err(FetchError::Body)?;

    let sample = body.parse::<Sample>()?;
    trace!("received sample: {sample:?}");

    Ok(sample)
}
