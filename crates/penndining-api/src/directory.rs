//! Static venue lookup tables.
//!
//! The feed carries neither a venue category nor a detail page, so both are
//! keyed on the venue name. Names are compared after [`normalize_name`].
//! A venue renamed upstream silently falls back to
//! [`VenueCategory::DiningHall`] and [`PLACEHOLDER_DETAIL_URL`].

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::feed::Venue;

/// Base URL of the venue detail pages.
pub const DETAIL_PAGE_BASE_URL: &str =
    "https://university-of-pennsylvania.cafebonappetit.com/cafe/";

/// Detail page for venues missing from the URL table.
pub const PLACEHOLDER_DETAIL_URL: &str = "https://example.com";

/// Venue name → detail page slug under [`DETAIL_PAGE_BASE_URL`].
const DETAIL_PAGE_SLUGS: [(&str, &str); 15] = [
    ("1920 Commons", "1920-commons"),
    ("Hill House", "hill-house"),
    ("English House", "kings-court-english-house"),
    ("Falk Kosher Dining", "falk-dining-commons"),
    ("McClelland Express", "mcclelland"),
    ("Lauder College House", "lauder-college-house"),
    ("Houston Market", "houston-market"),
    ("Accenture Café", "accenture-cafe"),
    ("Joe\u{2019}s Café", "joes-cafe"),
    ("1920 Gourmet Grocer", "1920-gourmet-grocer"),
    ("1920 Starbucks", "1920-starbucks"),
    ("Pret a Manger MBA", "pret-a-manger-upper"),
    ("Pret a Manger Locust Walk", "pret-a-manger-lower"),
    ("Quaker Kitchen", "quaker-kitchen"),
    ("Cafe West", "cafe-west"),
];

/// Venues listed under "Retail Dining". Everything else is a dining hall.
const RETAIL_VENUES: [&str; 9] = [
    "Houston Market",
    "Accenture Café",
    "Joe's Café",
    "1920 Gourmet Grocer",
    "1920 Starbucks",
    "Pret a Manger MBA",
    "Pret a Manger Locust Walk",
    "Quaker Kitchen",
    "Cafe West",
];

static DETAIL_PAGES: LazyLock<HashMap<String, String>> = LazyLock::new(|| {
    DETAIL_PAGE_SLUGS
        .iter()
        .map(|(name, slug)| (normalize_name(name), format!("{DETAIL_PAGE_BASE_URL}{slug}/")))
        .collect()
});

static RETAIL: LazyLock<HashSet<String>> =
    LazyLock::new(|| RETAIL_VENUES.iter().map(|name| normalize_name(name)).collect());

/// Directory section a venue is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::module_name_repetitions)]
pub enum VenueCategory {
    /// Residential dining hall.
    DiningHall,
    /// Retail outlet or cafe.
    Retail,
}

impl VenueCategory {
    /// Sections in display order.
    pub const ALL: [Self; 2] = [Self::DiningHall, Self::Retail];

    /// Section heading.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::DiningHall => "Dining Halls",
            Self::Retail => "Retail Dining",
        }
    }
}

impl fmt::Display for VenueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading())
    }
}

/// Normalizes a venue name for table lookups.
///
/// Applies Unicode NFC and folds the typographic apostrophe (U+2019) to `'`,
/// so `Joe’s Café` and `Joe's Café` are the same key.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.nfc()
        .map(|c| if c == '\u{2019}' { '\'' } else { c })
        .collect()
}

/// Returns the category for a venue name (default: dining hall).
#[must_use]
pub fn category_for(name: &str) -> VenueCategory {
    if RETAIL.contains(&normalize_name(name)) {
        VenueCategory::Retail
    } else {
        VenueCategory::DiningHall
    }
}

/// Returns the detail page URL for a venue name (default:
/// [`PLACEHOLDER_DETAIL_URL`]).
#[must_use]
pub fn detail_page_url(name: &str) -> &'static str {
    DETAIL_PAGES
        .get(&normalize_name(name))
        .map_or(PLACEHOLDER_DETAIL_URL, String::as_str)
}

/// Returns the venues of one section, keeping feed order.
#[must_use]
pub fn venues_in(venues: &[Venue], category: VenueCategory) -> Vec<&Venue> {
    venues.iter().filter(|v| v.category() == category).collect()
}

/// Finds a venue by name, ignoring case and apostrophe style.
#[must_use]
pub fn find_venue<'a>(venues: &'a [Venue], name: &str) -> Option<&'a Venue> {
    let wanted = normalize_name(name).to_lowercase();
    venues
        .iter()
        .find(|v| normalize_name(&v.name).to_lowercase() == wanted)
}
