//! Venue list load state, published over a `watch` channel.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::instrument;

use super::api::FeedApi;
use super::error::FetchError;
use super::fallback::fetch_with_fallback;
use super::types::Venue;

/// Observable state of the venue list.
///
/// `Idle → Loading → Ready | Failed`; a later load goes back to `Loading`.
/// `stale` carries the last successfully loaded venues so a view can keep
/// showing them while reloading or after a failure.
#[derive(Debug, Clone, Default)]
#[allow(clippy::module_name_repetitions)]
pub enum FeedState {
    /// No load requested yet.
    #[default]
    Idle,
    /// A load is in flight.
    Loading {
        /// Previously loaded venues, if any.
        stale: Option<Arc<[Venue]>>,
    },
    /// The latest load succeeded.
    Ready(Arc<[Venue]>),
    /// The latest load exhausted every source.
    Failed {
        /// Terminal fetch error.
        error: Arc<FetchError>,
        /// Previously loaded venues, if any.
        stale: Option<Arc<[Venue]>>,
    },
}

impl FeedState {
    /// Returns the venues to display: fresh when ready, stale otherwise.
    #[must_use]
    pub fn venues(&self) -> Option<&[Venue]> {
        match self {
            Self::Idle => None,
            Self::Ready(venues) => Some(venues.as_ref()),
            Self::Loading { stale } | Self::Failed { stale, .. } => stale.as_deref(),
        }
    }

    /// Shared handle to the venues returned by [`FeedState::venues`].
    #[must_use]
    pub fn shared_venues(&self) -> Option<Arc<[Venue]>> {
        match self {
            Self::Idle => None,
            Self::Ready(venues) => Some(Arc::clone(venues)),
            Self::Loading { stale } | Self::Failed { stale, .. } => stale.clone(),
        }
    }

    /// Returns `true` while a load is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Returns the terminal error of the latest load, if it failed.
    #[must_use]
    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failed { error, .. } => Some(error.as_ref()),
            _ => None,
        }
    }
}

/// Runs venue loads and publishes each transition to subscribers.
///
/// Overlapping loads are allowed; only the most recently started one may
/// publish its result. A superseded result is still returned to its caller.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct FeedLoader<A> {
    /// Feed implementation.
    api: A,
    /// Published state.
    state: watch::Sender<FeedState>,
    /// Number of loads started so far.
    generation: AtomicU64,
}

impl<A: FeedApi + Sync> FeedLoader<A> {
    /// Creates an idle loader.
    #[must_use]
    pub fn new(api: A) -> Self {
        let (state, _) = watch::channel(FeedState::Idle);
        Self {
            api,
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Subscribes to state transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.state.subscribe()
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn current(&self) -> FeedState {
        self.state.borrow().clone()
    }

    /// Loads the venue list (primary, then backup) and publishes the result.
    ///
    /// # Errors
    ///
    /// Returns the terminal [`FetchError`] when both sources fail. The same
    /// error is published as [`FeedState::Failed`].
    #[instrument(skip_all)]
    pub async fn load(&self) -> Result<Arc<[Venue]>, Arc<FetchError>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst).wrapping_add(1);

        self.state.send_modify(|state| {
            *state = FeedState::Loading {
                stale: state.shared_venues(),
            };
        });
        tracing::debug!(generation, "Venue load started");

        let result = fetch_with_fallback(&self.api)
            .await
            .map(Arc::<[Venue]>::from)
            .map_err(Arc::new);

        let published = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *state = match &result {
                Ok(venues) => FeedState::Ready(Arc::clone(venues)),
                Err(error) => FeedState::Failed {
                    error: Arc::clone(error),
                    stale: state.shared_venues(),
                },
            };
            true
        });

        if published {
            tracing::debug!(generation, ok = result.is_ok(), "Venue load published");
        } else {
            tracing::debug!(generation, "Venue load superseded by a newer load, result dropped");
        }

        result
    }
}
