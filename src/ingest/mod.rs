/// Data ingestion for the DHMZ XML feeds.
///
/// Submodules:
/// - `xml`      — XML text → generic ordered `FeedNode` tree
/// - `feed`     — layout detection and station extraction
/// - `fixtures` — (test only) representative feed payloads

pub mod feed;
pub mod fixtures;
pub mod xml;

use std::time::Duration;

use crate::config::HttpConfig;
use crate::model::FeedError;

/// Builds the blocking HTTP client shared by all feed fetches in a run.
pub fn build_client(http: &HttpConfig) -> Result<reqwest::blocking::Client, FeedError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(http.timeout_secs))
        .user_agent(http.user_agent.as_str())
        .build()?;
    Ok(client)
}

/// Fetches a feed and returns its body as text.
///
/// No retries: any transport failure or non-success status ends the run.
pub fn fetch_feed(client: &reqwest::blocking::Client, url: &str) -> Result<String, FeedError> {
    tracing::info!("fetching {}", url);

    let response = client
        .get(url)
        .header("Accept", "application/xml, text/xml")
        .send()?;

    if !response.status().is_success() {
        return Err(FeedError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    // DHMZ serves UTF-8; decode explicitly rather than trusting the header
    let bytes = response.bytes()?;
    let body = String::from_utf8(bytes.to_vec())
        .map_err(|_| FeedError::NotUtf8(url.to_string()))?;

    tracing::debug!("received {} bytes from {}", body.len(), url);
    Ok(body)
}
