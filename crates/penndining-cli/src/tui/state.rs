//! Venue directory TUI state management.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use penndining_api::directory::{VenueCategory, venues_in};
use penndining_api::feed::{FeedState, Venue};
use penndining_api::schedule::{format_hours_on, status_label_on};
use ratatui::widgets::TableState;

/// A venue row for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueRow {
    /// Venue name.
    pub name: String,
    /// `OPEN` / `CLOSED` badge.
    pub status: &'static str,
    /// Formatted hours for the selected day.
    pub hours: String,
    /// Detail page URL.
    pub detail_url: &'static str,
}

/// Feed load status shown in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing requested yet.
    Idle,
    /// Fetch in flight.
    Loading,
    /// Venues loaded.
    Ready,
    /// Latest fetch failed; carries the error message.
    Failed(String),
}

/// One directory section (dining halls or retail).
#[derive(Debug)]
pub struct Section {
    /// Section category.
    pub category: VenueCategory,
    /// Rows in feed order.
    pub rows: Vec<VenueRow>,
    /// Table state (selection and scroll).
    pub table_state: TableState,
}

impl Section {
    fn new(category: VenueCategory) -> Self {
        Self {
            category,
            rows: Vec::new(),
            table_state: TableState::default(),
        }
    }

    fn cursor(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }
}

/// State for the venue directory TUI.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct DirectoryState {
    /// Day whose hours are shown.
    pub date: NaiveDate,
    /// The current calendar day (target of the `t` key).
    pub today: NaiveDate,
    /// Feed load status.
    pub status: LoadStatus,
    /// Sections in display order.
    pub sections: Vec<Section>,
    /// One-shot message shown in the header until the next key press.
    pub notice: Option<String>,
    /// Index into `sections` of the focused section.
    active: usize,
    /// Venues the rows are built from.
    venues: Option<Arc<[Venue]>>,
}

impl DirectoryState {
    /// Creates an empty state showing `date`.
    #[must_use]
    pub fn new(date: NaiveDate, today: NaiveDate) -> Self {
        Self {
            date,
            today,
            status: LoadStatus::Idle,
            sections: VenueCategory::ALL.into_iter().map(Section::new).collect(),
            notice: None,
            active: 0,
            venues: None,
        }
    }

    /// Applies a feed state published by the loader.
    ///
    /// Stale venues carried by `Loading` / `Failed` stay on screen.
    pub fn apply_feed(&mut self, feed: &FeedState) {
        self.status = match feed {
            FeedState::Idle => LoadStatus::Idle,
            FeedState::Loading { .. } => LoadStatus::Loading,
            FeedState::Ready(_) => LoadStatus::Ready,
            FeedState::Failed { error, .. } => LoadStatus::Failed(error.to_string()),
        };
        if let Some(venues) = feed.shared_venues() {
            self.venues = Some(venues);
            self.rebuild_rows();
        }
    }

    /// Number of loaded venues.
    #[must_use]
    pub fn venue_count(&self) -> usize {
        self.venues.as_ref().map_or(0, |v| v.len())
    }

    /// Returns `true` if `section` is the focused one.
    #[must_use]
    pub fn is_active(&self, section: usize) -> bool {
        self.active == section
    }

    /// Returns the row under the cursor (if any).
    #[must_use]
    pub fn selected_row(&self) -> Option<&VenueRow> {
        let section = self.sections.get(self.active)?;
        section.rows.get(section.cursor())
    }

    /// Moves cursor up, continuing into the previous non-empty section.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_up(&mut self) {
        let Some(section) = self.sections.get_mut(self.active) else {
            return;
        };
        let current = section.cursor();
        if current > 0 {
            section.table_state.select(Some(current - 1));
            return;
        }
        if let Some(prev) = (0..self.active)
            .rev()
            .find(|&idx| self.sections.get(idx).is_some_and(|s| !s.rows.is_empty()))
        {
            self.focus(prev);
            if let Some(section) = self.sections.get_mut(prev) {
                let last = section.rows.len().saturating_sub(1);
                section.table_state.select(Some(last));
            }
        }
    }

    /// Moves cursor down, continuing into the next non-empty section.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_down(&mut self) {
        let Some(section) = self.sections.get_mut(self.active) else {
            return;
        };
        let current = section.cursor();
        if current + 1 < section.rows.len() {
            section.table_state.select(Some(current + 1));
            return;
        }
        if let Some(next) = (self.active + 1..self.sections.len())
            .find(|&idx| self.sections.get(idx).is_some_and(|s| !s.rows.is_empty()))
        {
            self.focus(next);
            if let Some(section) = self.sections.get_mut(next) {
                section.table_state.select(Some(0));
            }
        }
    }

    /// Focuses the next non-empty section, wrapping around.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn toggle_section(&mut self) {
        let count = self.sections.len();
        let next = (1..count)
            .map(|step| (self.active + step) % count)
            .find(|&idx| self.sections.get(idx).is_some_and(|s| !s.rows.is_empty()));
        if let Some(next) = next {
            self.focus(next);
        }
    }

    /// Shows the next day.
    pub fn next_day(&mut self) {
        if let Some(date) = self.date.checked_add_days(Days::new(1)) {
            self.set_date(date);
        }
    }

    /// Shows the previous day.
    pub fn prev_day(&mut self) {
        if let Some(date) = self.date.checked_sub_days(Days::new(1)) {
            self.set_date(date);
        }
    }

    /// Jumps back to today.
    pub fn go_today(&mut self) {
        self.set_date(self.today);
    }

    fn set_date(&mut self, date: NaiveDate) {
        if self.date != date {
            self.date = date;
            self.rebuild_rows();
        }
    }

    fn focus(&mut self, section: usize) {
        self.active = section;
        if let Some(s) = self.sections.get_mut(section)
            && s.table_state.selected().is_none()
            && !s.rows.is_empty()
        {
            s.table_state.select(Some(0));
        }
    }

    /// Rebuilds every section's rows for the current date, clamping the
    /// cursors to the new row counts.
    fn rebuild_rows(&mut self) {
        let venues = self.venues.clone().unwrap_or_else(|| Arc::from(Vec::new()));
        for section in &mut self.sections {
            section.rows = venues_in(&venues, section.category)
                .into_iter()
                .map(|venue| VenueRow {
                    name: venue.name.clone(),
                    status: status_label_on(venue, self.date),
                    hours: format_hours_on(venue, self.date),
                    detail_url: venue.detail_page_url(),
                })
                .collect();
            let selected = if section.rows.is_empty() {
                None
            } else {
                Some(section.cursor().min(section.rows.len().saturating_sub(1)))
            };
            section.table_state.select(selected);
        }

        let active_empty = self
            .sections
            .get(self.active)
            .is_none_or(|s| s.rows.is_empty());
        if active_empty
            && let Some(idx) = self.sections.iter().position(|s| !s.rows.is_empty())
        {
            self.active = idx;
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use penndining_api::feed::{DaySchedule, DayStatus, FetchError, Interval};

    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn venue(name: &str, open_on: &str) -> Venue {
        Venue {
            id: 1,
            name: String::from(name),
            address: String::new(),
            image_url: String::new(),
            schedule: vec![DaySchedule {
                date: String::from(open_on),
                status: DayStatus::Open,
                intervals: vec![Interval {
                    start_time: format!("{open_on}T11:00:00"),
                    end_time: format!("{open_on}T14:00:00"),
                    message: String::new(),
                    label: String::new(),
                }],
            }],
        }
    }

    fn ready(venues: Vec<Venue>) -> FeedState {
        FeedState::Ready(Arc::from(venues))
    }

    fn sample() -> FeedState {
        ready(vec![
            venue("1920 Commons", "2024-01-01"),
            venue("Houston Market", "2024-01-01"),
            venue("Hill House", "2024-01-02"),
            venue("Joe's Café", "2024-01-01"),
        ])
    }

    #[test]
    fn test_new_state_is_empty() {
        // Arrange & Act
        let state = DirectoryState::new(date(1), date(1));

        // Assert
        assert_eq!(state.status, LoadStatus::Idle);
        assert_eq!(state.venue_count(), 0);
        assert!(state.selected_row().is_none());
        assert_eq!(state.sections.len(), 2);
    }

    #[test]
    fn test_apply_ready_splits_sections() {
        // Arrange
        let mut state = DirectoryState::new(date(1), date(1));

        // Act
        state.apply_feed(&sample());

        // Assert
        assert_eq!(state.status, LoadStatus::Ready);
        let halls: Vec<&str> = state.sections[0].rows.iter().map(|r| r.name.as_str()).collect();
        let retail: Vec<&str> = state.sections[1].rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(halls, vec!["1920 Commons", "Hill House"]);
        assert_eq!(retail, vec!["Houston Market", "Joe's Café"]);
        assert_eq!(state.selected_row().unwrap().name, "1920 Commons");
    }

    #[test]
    fn test_rows_follow_selected_date() {
        // Arrange
        let mut state = DirectoryState::new(date(1), date(1));
        state.apply_feed(&sample());

        // Act
        state.next_day();

        // Assert
        let hill = &state.sections[0].rows[1];
        assert_eq!(hill.status, "OPEN");
        assert_eq!(hill.hours, "11a - 2p");
        let commons = &state.sections[0].rows[0];
        assert_eq!(commons.status, "CLOSED");
        assert_eq!(commons.hours, "CLOSED TODAY");
    }

    #[test]
    fn test_prev_day_and_today() {
        // Arrange
        let mut state = DirectoryState::new(date(2), date(2));

        // Act
        state.prev_day();
        let previous = state.date;
        state.go_today();

        // Assert
        assert_eq!(previous, date(1));
        assert_eq!(state.date, date(2));
    }

    #[test]
    fn test_cursor_crosses_sections() {
        // Arrange
        let mut state = DirectoryState::new(date(1), date(1));
        state.apply_feed(&sample());

        // Act
        state.move_down();
        state.move_down();
        let crossed = state.selected_row().unwrap().name.clone();
        state.move_up();

        // Assert
        assert_eq!(crossed, "Houston Market");
        assert!(state.is_active(0));
        assert_eq!(state.selected_row().unwrap().name, "Hill House");
    }

    #[test]
    fn test_cursor_stops_at_ends() {
        // Arrange
        let mut state = DirectoryState::new(date(1), date(1));
        state.apply_feed(&sample());

        // Act
        state.move_up();
        let top = state.selected_row().unwrap().name.clone();
        for _ in 0..10 {
            state.move_down();
        }

        // Assert
        assert_eq!(top, "1920 Commons");
        assert_eq!(state.selected_row().unwrap().name, "Joe's Café");
    }

    #[test]
    fn test_toggle_section() {
        // Arrange
        let mut state = DirectoryState::new(date(1), date(1));
        state.apply_feed(&sample());

        // Act
        state.toggle_section();

        // Assert
        assert!(state.is_active(1));
        assert_eq!(state.selected_row().unwrap().name, "Houston Market");
    }

    #[test]
    fn test_failed_keeps_stale_rows() {
        // Arrange
        let mut state = DirectoryState::new(date(1), date(1));
        let first = sample();
        state.apply_feed(&first);
        let failed = FeedState::Failed {
            error: Arc::new(FetchError::Status {
                url: String::from("https://feed.test/"),
                status: 500,
            }),
            stale: first.shared_venues(),
        };

        // Act
        state.apply_feed(&failed);

        // Assert
        assert!(matches!(state.status, LoadStatus::Failed(ref msg) if msg.contains("500")));
        assert_eq!(state.venue_count(), 4);
    }

    #[test]
    fn test_loading_without_stale_keeps_rows() {
        // Arrange
        let mut state = DirectoryState::new(date(1), date(1));
        state.apply_feed(&sample());

        // Act
        state.apply_feed(&FeedState::Loading { stale: None });

        // Assert
        assert_eq!(state.status, LoadStatus::Loading);
        assert_eq!(state.venue_count(), 4);
    }

    #[test]
    fn test_reload_clamps_cursor() {
        // Arrange
        let mut state = DirectoryState::new(date(1), date(1));
        state.apply_feed(&sample());
        state.move_down();

        // Act
        state.apply_feed(&ready(vec![venue("Houston Market", "2024-01-01")]));

        // Assert
        assert!(state.sections[0].rows.is_empty());
        assert!(state.is_active(1));
        assert_eq!(state.selected_row().unwrap().name, "Houston Market");
    }
}
