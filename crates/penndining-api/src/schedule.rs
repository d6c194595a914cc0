//! Hours formatting for venue schedules.
//!
//! Turns one [`DaySchedule`] into a compact string such as `"11a - 2p"` or,
//! for days with several intervals, `"7:30 - 10 | 11 - 2 | 5 - 8"`.

use chrono::{NaiveDate, NaiveDateTime};

use crate::feed::{DaySchedule, Interval, Venue};

/// Hours string for a day without open intervals.
pub const CLOSED_TODAY: &str = "CLOSED TODAY";

/// Separator between the intervals of one day.
pub const INTERVAL_SEPARATOR: &str = " | ";

/// Timestamp format of `starttime` / `endtime`.
pub const FEED_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Date format of `DaySchedule::date`.
pub const FEED_DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats a day's open intervals.
///
/// Returns [`CLOSED_TODAY`] when the day is not open or has no intervals.
/// Intervals are ordered by start time; an interval whose bounds cannot be
/// parsed renders as an empty segment. When a day has more than one
/// interval, every `a`/`p` suffix is dropped.
#[must_use]
pub fn format_day(day: &DaySchedule) -> String {
    if !day.is_open() || day.intervals.is_empty() {
        return String::from(CLOSED_TODAY);
    }

    let ordered = sort_by_start(&day.intervals);
    let joined = ordered
        .iter()
        .copied()
        .map(format_interval)
        .collect::<Vec<_>>()
        .join(INTERVAL_SEPARATOR);

    if ordered.len() > 1 {
        joined.chars().filter(|c| !matches!(c, 'a' | 'p')).collect()
    } else {
        joined
    }
}

/// Formats the venue's hours for a calendar day, [`CLOSED_TODAY`] if the
/// feed has no entry for that day.
#[must_use]
pub fn format_hours_on(venue: &Venue, date: NaiveDate) -> String {
    venue
        .schedule_on(date)
        .map_or_else(|| String::from(CLOSED_TODAY), format_day)
}

/// Badge text for a venue on a calendar day: `"OPEN"` or `"CLOSED"`.
#[must_use]
pub fn status_label_on(venue: &Venue, date: NaiveDate) -> &'static str {
    status_label(venue.schedule_on(date))
}

/// Badge text for a schedule entry; a missing entry is closed.
#[must_use]
pub fn status_label(day: Option<&DaySchedule>) -> &'static str {
    if day.is_some_and(DaySchedule::is_open) {
        "OPEN"
    } else {
        "CLOSED"
    }
}

/// Header label for a day, e.g. `"MONDAY, JANUARY 1"`.
#[must_use]
pub fn format_date_label(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string().to_uppercase()
}

/// Parses a feed timestamp.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, FEED_TIMESTAMP_FORMAT).ok()
}

/// Orders intervals by start time.
///
/// Intervals with an unparseable start compare equal to everything, so they
/// stay where they are; the parseable ones are sorted into the remaining
/// positions.
fn sort_by_start(intervals: &[Interval]) -> Vec<&Interval> {
    let mut timed: Vec<(usize, NaiveDateTime)> = intervals
        .iter()
        .enumerate()
        .filter_map(|(idx, interval)| parse_timestamp(&interval.start_time).map(|t| (idx, t)))
        .collect();
    let slots: Vec<usize> = timed.iter().map(|(idx, _)| *idx).collect();
    timed.sort_by_key(|(_, start)| *start);

    let mut ordered: Vec<&Interval> = intervals.iter().collect();
    for (slot, (idx, _)) in slots.into_iter().zip(timed) {
        if let (Some(dst), Some(src)) = (ordered.get_mut(slot), intervals.get(idx)) {
            *dst = src;
        }
    }
    ordered
}

/// Formats one interval as `"<start> - <end>"`, or `""` if either bound is
/// unparseable.
fn format_interval(interval: &Interval) -> String {
    let (Some(start), Some(end)) = (
        parse_timestamp(&interval.start_time),
        parse_timestamp(&interval.end_time),
    ) else {
        return String::new();
    };
    format!("{} - {}", format_clock(start), format_clock(end))
}

/// `h:mma` with on-the-hour minutes dropped and `AM`/`PM` shortened:
/// 11:00 → `11a`, 10:30 → `10:30a`, 17:00 → `5p`.
fn format_clock(time: NaiveDateTime) -> String {
    time.format("%-I:%M%p")
        .to_string()
        .replace(":00", "")
        .replace("AM", "a")
        .replace("PM", "p")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::feed::DayStatus;

    fn interval(start: &str, end: &str) -> Interval {
        Interval {
            start_time: format!("2024-01-01T{start}"),
            end_time: format!("2024-01-01T{end}"),
            message: String::new(),
            label: String::new(),
        }
    }

    fn day(status: DayStatus, intervals: Vec<Interval>) -> DaySchedule {
        DaySchedule {
            date: String::from("2024-01-01"),
            status,
            intervals,
        }
    }

    fn venue(schedule: Vec<DaySchedule>) -> Venue {
        Venue {
            id: 593,
            name: String::from("1920 Commons"),
            address: String::new(),
            image_url: String::new(),
            schedule,
        }
    }

    #[test]
    fn test_closed_status_ignores_intervals() {
        // Arrange
        let day = day(DayStatus::Closed, vec![interval("11:00:00", "14:00:00")]);

        // Act & Assert
        assert_eq!(format_day(&day), CLOSED_TODAY);
    }

    #[test]
    fn test_unknown_status_is_closed() {
        // Arrange
        let day = day(
            DayStatus::Unknown(String::from("holiday")),
            vec![interval("11:00:00", "14:00:00")],
        );

        // Act & Assert
        assert_eq!(format_day(&day), CLOSED_TODAY);
    }

    #[test]
    fn test_open_without_intervals_is_closed() {
        // Arrange
        let day = day(DayStatus::Open, Vec::new());

        // Act & Assert
        assert_eq!(format_day(&day), "CLOSED TODAY");
    }

    #[test]
    fn test_single_interval_keeps_suffixes() {
        // Arrange
        let day = day(DayStatus::Open, vec![interval("11:00:00", "14:00:00")]);

        // Act & Assert
        assert_eq!(format_day(&day), "11a - 2p");
    }

    #[test]
    fn test_single_interval_with_minutes() {
        // Arrange
        let day = day(DayStatus::Open, vec![interval("07:30:00", "22:15:00")]);

        // Act & Assert
        assert_eq!(format_day(&day), "7:30a - 10:15p");
    }

    #[test]
    fn test_midnight_and_noon() {
        // Arrange
        let day = day(DayStatus::Open, vec![interval("00:00:00", "12:00:00")]);

        // Act & Assert
        assert_eq!(format_day(&day), "12a - 12p");
    }

    #[test]
    fn test_two_intervals_strip_suffixes() {
        // Arrange
        let day = day(
            DayStatus::Open,
            vec![
                interval("09:00:00", "10:30:00"),
                interval("17:00:00", "20:00:00"),
            ],
        );

        // Act & Assert
        assert_eq!(format_day(&day), "9 - 10:30 | 5 - 8");
    }

    #[test]
    fn test_out_of_order_intervals_are_sorted() {
        // Arrange
        let in_order = day(
            DayStatus::Open,
            vec![
                interval("09:00:00", "10:30:00"),
                interval("17:00:00", "20:00:00"),
            ],
        );
        let reversed = day(
            DayStatus::Open,
            vec![
                interval("17:00:00", "20:00:00"),
                interval("09:00:00", "10:30:00"),
            ],
        );

        // Act & Assert
        assert_eq!(format_day(&reversed), format_day(&in_order));
    }

    #[test]
    fn test_three_intervals() {
        // Arrange
        let day = day(
            DayStatus::Open,
            vec![
                interval("17:00:00", "20:00:00"),
                interval("07:30:00", "10:00:00"),
                interval("11:00:00", "14:00:00"),
            ],
        );

        // Act & Assert
        assert_eq!(format_day(&day), "7:30 - 10 | 11 - 2 | 5 - 8");
    }

    #[test]
    fn test_unparseable_interval_is_empty_segment() {
        // Arrange
        let mut broken = interval("11:00:00", "14:00:00");
        broken.end_time = String::from("soon");
        let day = day(
            DayStatus::Open,
            vec![broken, interval("17:00:00", "20:00:00")],
        );

        // Act & Assert
        assert_eq!(format_day(&day), " | 5 - 8");
    }

    #[test]
    fn test_unparseable_start_keeps_position() {
        // Arrange
        let mut broken = interval("00:00:00", "00:00:00");
        broken.start_time = String::from("2024-01-01 12:00");
        let day = day(
            DayStatus::Open,
            vec![
                interval("17:00:00", "20:00:00"),
                broken,
                interval("09:00:00", "10:30:00"),
            ],
        );

        // Act & Assert
        assert_eq!(format_day(&day), "9 - 10:30 |  | 5 - 8");
    }

    #[test]
    fn test_single_unparseable_interval() {
        // Arrange
        let day = day(DayStatus::Open, vec![interval("noon", "14:00:00")]);

        // Act & Assert
        assert_eq!(format_day(&day), "");
    }

    #[test]
    fn test_hours_on_selects_by_date() {
        // Arrange
        let venue = venue(vec![
            DaySchedule {
                date: String::from("2024-01-02"),
                status: DayStatus::Open,
                intervals: vec![interval("11:00:00", "14:00:00")],
            },
            day(DayStatus::Closed, Vec::new()),
        ]);
        let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let jan2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        // Act & Assert
        assert_eq!(format_hours_on(&venue, jan1), CLOSED_TODAY);
        assert_eq!(status_label_on(&venue, jan1), "CLOSED");
        assert_eq!(format_hours_on(&venue, jan2), "11a - 2p");
        assert_eq!(status_label_on(&venue, jan2), "OPEN");
    }

    #[test]
    fn test_hours_on_missing_date_is_closed() {
        // Arrange
        let venue = venue(vec![day(
            DayStatus::Open,
            vec![interval("11:00:00", "14:00:00")],
        )]);
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        // Act & Assert
        assert_eq!(format_hours_on(&venue, date), CLOSED_TODAY);
        assert_eq!(status_label_on(&venue, date), "CLOSED");
    }

    #[test]
    fn test_status_label_open_without_intervals() {
        // Arrange
        let day = day(DayStatus::Open, Vec::new());

        // Act & Assert
        assert_eq!(status_label(Some(&day)), "OPEN");
        assert_eq!(status_label(None), "CLOSED");
    }

    #[test]
    fn test_format_date_label() {
        // Arrange
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        // Act & Assert
        assert_eq!(format_date_label(date), "MONDAY, JANUARY 1");
    }
}
