//! Primary → backup fallback over any [`FeedApi`].

use tracing::instrument;

use super::api::{FeedApi, FeedSource};
use super::error::FetchError;
use super::types::Venue;

/// Fetches the venue list from the primary source, trying the backup once
/// if the primary fails for any reason.
///
/// The backup is never consulted when the primary succeeds. There is no
/// retry beyond the single fallback hop, and results are all-or-nothing.
///
/// # Errors
///
/// Returns [`FetchError::Exhausted`] carrying both failures when the
/// backup fails too.
#[instrument(skip_all)]
pub async fn fetch_with_fallback<A>(api: &A) -> Result<Vec<Venue>, FetchError>
where
    A: FeedApi + Sync,
{
    let primary = match api.fetch_source(FeedSource::Primary).await {
        Ok(venues) => {
            tracing::debug!(source = %FeedSource::Primary, venues = venues.len(), "Venue feed loaded");
            return Ok(venues);
        }
        Err(e) => e,
    };

    tracing::warn!(error = %primary, "Primary venue feed failed, trying backup");

    match api.fetch_source(FeedSource::Backup).await {
        Ok(venues) => {
            tracing::info!(source = %FeedSource::Backup, venues = venues.len(), "Venue feed loaded");
            Ok(venues)
        }
        Err(backup) => {
            tracing::error!(primary = %primary, backup = %backup, "All venue feed sources failed");
            Err(FetchError::Exhausted {
                primary: Box::new(primary),
                backup: Box::new(backup),
            })
        }
    }
}
