//! Live adapter for the `RevisionComparison` port using a GitHub-style compare API.

use std::error::Error;

use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;

use crate::ports::comparison::{
    CommitComparison, ComparisonFuture, ComparisonRequest, RevisionComparison,
};

const ACCEPT_JSON: &str = "application/vnd.github+json";
const AGENT: &str = concat!("fnscope/", env!("CARGO_PKG_VERSION"));

/// Live comparison client that calls the revision-comparison HTTP service.
pub struct LiveRevisionComparison {
    client: Client,
}

impl LiveRevisionComparison {
    /// Creates a new live comparison client.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for LiveRevisionComparison {
    fn default() -> Self {
        Self::new()
    }
}

/// Error body returned by the service on failure.
#[derive(Deserialize)]
struct ServiceError {
    message: String,
}

impl RevisionComparison for LiveRevisionComparison {
    fn compare(&self, request: &ComparisonRequest) -> ComparisonFuture<'_> {
        let url = request.url.clone();
        let token = request.token.clone();

        Box::pin(async move {
            tracing::debug!(%url, "requesting revision comparison");
            let response = self
                .client
                .get(&url)
                .bearer_auth(&token)
                .header(ACCEPT, ACCEPT_JSON)
                .header(USER_AGENT, AGENT)
                .send()
                .await
                .map_err(|e| -> Box<dyn Error + Send + Sync> {
                    format!("comparison request failed: {e}").into()
                })?;

            let status = response.status();
            let body = response.text().await.map_err(|e| -> Box<dyn Error + Send + Sync> {
                format!("failed to read comparison response: {e}").into()
            })?;

            parse_comparison(status.as_u16(), status.is_success(), body)
        })
    }
}

/// Turns a raw HTTP status and body into a comparison.
fn parse_comparison(
    status: u16,
    success: bool,
    body: String,
) -> Result<CommitComparison, Box<dyn Error + Send + Sync>> {
    if !success {
        let msg =
            serde_json::from_str::<ServiceError>(&body).map(|e| e.message).unwrap_or(body);
        return Err(format!("comparison service error ({status}): {msg}").into());
    }
    serde_json::from_str(&body).map_err(|e| format!("malformed comparison response: {e}").into())
}
