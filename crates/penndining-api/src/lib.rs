//! Core library for the Penn dining directory.
//!
//! Fetches the venue feed (with a backup mirror) and turns each venue's
//! daily schedule into a compact hours string.

/// Static venue lookup tables (category, detail page).
pub mod directory;

/// Venue feed client, data model and load state.
pub mod feed;

/// Schedule selection and hours formatting.
pub mod schedule;
