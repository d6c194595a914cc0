//! Venue feed fetch errors.

use thiserror::Error;

/// Failure to obtain the venue list.
///
/// [`FetchError::Network`], [`FetchError::Status`] and [`FetchError::Decode`]
/// describe a single source. Callers of the fallback path only ever see
/// [`FetchError::Exhausted`], which carries the failure of each source.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure (connect, timeout, body read).
    #[error("request to {url} failed: {source}")]
    Network {
        /// Requested URL.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx HTTP response.
    #[error("unexpected HTTP status {status} from {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// Body is not a JSON array of venues.
    #[error("failed to decode venue feed from {url}: {source}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Both the primary and the backup source failed.
    #[error("all venue feed sources failed (primary: {primary}; backup: {backup})")]
    Exhausted {
        /// Primary source failure.
        primary: Box<FetchError>,
        /// Backup source failure.
        backup: Box<FetchError>,
    },
}

impl FetchError {
    /// Returns `true` for transport failures and non-2xx responses.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Status { .. })
    }

    /// Returns `true` for schema mismatches.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Returns `true` when every source has been tried.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }
}
