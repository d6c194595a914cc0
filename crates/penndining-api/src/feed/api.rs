//! `FeedApi` trait definition.
#![allow(clippy::future_not_send)]

use std::fmt;

use super::error::FetchError;
use super::types::Venue;

/// Which feed endpoint a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedSource {
    /// Live venue API.
    Primary,
    /// Static mirror, consulted only after the primary fails.
    Backup,
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("primary"),
            Self::Backup => f.write_str("backup"),
        }
    }
}

/// Venue feed API trait.
///
/// Abstracts a single-source fetch for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(FeedApi: Send)]
pub trait LocalFeedApi {
    /// Fetches and decodes the full venue list from one source.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] on transport failure,
    /// [`FetchError::Status`] on a non-2xx response and
    /// [`FetchError::Decode`] if the body does not match the feed schema.
    async fn fetch_source(&self, source: FeedSource) -> Result<Vec<Venue>, FetchError>;
}
