//! `FeedClient` - venue feed HTTP client implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::{FeedApi, FeedSource};
use super::error::FetchError;
use super::fallback::fetch_with_fallback;
use super::types::Venue;

/// Primary venue feed endpoint.
pub const PRIMARY_FEED_URL: &str = "https://pennmobile.org/api/dining/venues/?format=json";

/// Backup venue feed endpoint (static mirror with the same schema).
pub const BACKUP_FEED_URL: &str = "https://pennlabs.github.io/backup-data/venues.json";

/// Default transport timeout per request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Venue feed client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct FeedClient {
    /// HTTP client.
    http_client: Client,
    /// Primary endpoint.
    primary_url: Url,
    /// Backup endpoint.
    backup_url: Url,
}

/// Builder for `FeedClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct FeedClientBuilder {
    primary_url: Option<Url>,
    backup_url: Option<Url>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl FeedClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            primary_url: None,
            backup_url: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Overrides the primary endpoint (for wiremock in tests).
    #[must_use]
    pub fn primary_url(mut self, url: Url) -> Self {
        self.primary_url = Some(url);
        self
    }

    /// Overrides the backup endpoint (for wiremock in tests).
    #[must_use]
    pub fn backup_url(mut self, url: Url) -> Self {
        self.backup_url = Some(url);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the per-request timeout (default: 30s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<FeedClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let primary_url = if let Some(url) = self.primary_url {
            url
        } else {
            Url::parse(PRIMARY_FEED_URL).context("invalid default primary URL")?
        };
        let backup_url = if let Some(url) = self.backup_url {
            url
        } else {
            Url::parse(BACKUP_FEED_URL).context("invalid default backup URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(FeedClient {
            http_client,
            primary_url,
            backup_url,
        })
    }
}

impl FeedClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> FeedClientBuilder {
        FeedClientBuilder::new()
    }

    /// Returns the endpoint used for a source.
    #[must_use]
    pub const fn url_for(&self, source: FeedSource) -> &Url {
        match source {
            FeedSource::Primary => &self.primary_url,
            FeedSource::Backup => &self.backup_url,
        }
    }

    /// Fetches the venue list, falling back to the backup endpoint once.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Exhausted`] if both endpoints fail.
    pub async fn fetch_venues(&self) -> Result<Vec<Venue>, FetchError> {
        fetch_with_fallback(self).await
    }

    /// Decodes a response body into venues.
    pub(crate) fn decode_venues(body: &[u8], url: &Url) -> Result<Vec<Venue>, FetchError> {
        serde_json::from_slice(body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

impl FeedApi for FeedClient {
    #[instrument(skip_all, fields(source = %source))]
    async fn fetch_source(&self, source: FeedSource) -> Result<Vec<Venue>, FetchError> {
        let url = self.url_for(source);
        tracing::debug!(%url, "Venue feed request");

        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Network {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Network {
            url: url.to_string(),
            source: e,
        })?;
        tracing::debug!(%url, body_len = body.len(), "Venue feed body received");

        Self::decode_venues(&body, url)
    }
}
