//! Venue feed module.
//!
//! Handles HTTP requests to the dining venue feed, falling back to the
//! static backup mirror when the primary endpoint fails, and publishes
//! load progress through [`FeedLoader`].

mod api;
mod client;
mod error;
mod fallback;
mod state;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{FeedApi, FeedSource, LocalFeedApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{BACKUP_FEED_URL, DEFAULT_TIMEOUT, FeedClient, FeedClientBuilder, PRIMARY_FEED_URL};
pub use error::FetchError;
pub use fallback::fetch_with_fallback;
#[allow(clippy::module_name_repetitions)]
pub use state::{FeedLoader, FeedState};
pub use types::{DaySchedule, DayStatus, Interval, Venue};
