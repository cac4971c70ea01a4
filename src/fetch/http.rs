// src/fetch/http.rs
// =============================================================================
// Downloads pages over HTTP with reqwest.
//
// Behavior:
// - One GET per call, no retries
// - Follows up to 5 redirects
// - Per-request timeout from the run configuration (default 10 seconds)
// - Any non-2xx status is a failure; the body of an error page is ignored
//
// reqwest errors are mapped to FetchError (see error.rs) so the log line says
// "request timed out" or "HTTP 404" instead of reqwest's full error chain.
// =============================================================================

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

use super::Fetcher;
use crate::error::FetchError;

const MAX_REDIRECTS: usize = 5;

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    // Client is cheap to clone (it's an Arc internally) and pools connections
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(user_agent)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}
