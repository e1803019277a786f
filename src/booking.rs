use std::collections::BTreeSet;
use thiserror::Error;
use time::{Date, Duration, Month};

/// Number of days between today and the first selectable check-in date.
pub(crate) const LEAD_TIME_DAYS: i64 = 2;

/// Number of days between today and the last selectable date.
pub(crate) const BOOKING_HORIZON_DAYS: i64 = 120;

/// Longest stay that can be booked in one go.
pub(crate) const MAX_STAY_NIGHTS: i64 = 8;

/// Duration published while no complete range is selected.
pub(crate) const DEFAULT_STAY_NIGHTS: i64 = 1;

/// A check-in/check-out selection in progress.
///
/// `to` is only meaningful once `from` is set, and `to >= from` whenever both
/// are present.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct DateRange {
    pub(crate) from: Option<Date>,
    pub(crate) to: Option<Date>,
}

impl DateRange {
    pub(crate) fn new() -> DateRange {
        DateRange::default()
    }

    /// Number of nights between check-in and check-out, or `None` while the
    /// range is incomplete.
    pub(crate) fn nights(&self) -> Option<i64> {
        self.from
            .zip(self.to)
            .map(|(from, to)| (to - from).whole_days())
    }

    /// The stay duration to publish: the night count of a complete range,
    /// falling back to [`DEFAULT_STAY_NIGHTS`] otherwise.
    pub(crate) fn duration_nights(&self) -> i64 {
        self.nights().unwrap_or(DEFAULT_STAY_NIGHTS)
    }

    /// True only when both endpoints have been chosen.
    pub(crate) fn is_selected_days(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }

    /// The range that picking `date` would produce, ignoring validity.
    ///
    /// The first pick sets the check-in date, a later pick completes the
    /// range, an earlier pick restarts from that date, picking the check-in
    /// date again clears the selection, and picking with a complete range
    /// starts over.
    fn picked(self, date: Date) -> DateRange {
        match (self.from, self.to) {
            (None, _) | (Some(_), Some(_)) => DateRange {
                from: Some(date),
                to: None,
            },
            (Some(from), None) if date == from => DateRange::new(),
            (Some(from), None) if date < from => DateRange {
                from: Some(date),
                to: None,
            },
            (Some(from), None) => DateRange {
                from: Some(from),
                to: Some(date),
            },
        }
    }
}

/// Bounds on which dates may be selected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct SelectionWindow {
    pub(crate) earliest: Date,
    pub(crate) latest: Date,
    pub(crate) max_nights: i64,
}

impl SelectionWindow {
    /// The bookable window as seen from `today`: check-in no sooner than two
    /// days out, nothing beyond the 120-day horizon, stays capped at eight
    /// nights.
    pub(crate) fn from_today(today: Date) -> SelectionWindow {
        SelectionWindow {
            earliest: today.saturating_add(Duration::days(LEAD_TIME_DAYS)),
            latest: today.saturating_add(Duration::days(BOOKING_HORIZON_DAYS)),
            max_nights: MAX_STAY_NIGHTS,
        }
    }

    pub(crate) fn contains(&self, date: Date) -> bool {
        self.earliest <= date && date <= self.latest
    }

    pub(crate) fn clamp(&self, date: Date) -> Date {
        date.clamp(self.earliest, self.latest)
    }
}

/// Dates that cannot be selected at all.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct DisabledDays(BTreeSet<Date>);

impl DisabledDays {
    pub(crate) fn contains(&self, date: Date) -> bool {
        self.0.contains(&date)
    }

    /// The sample block-out dates shipped with the demo product.
    pub(crate) fn sample() -> DisabledDays {
        use time::macros::date;
        DisabledDays::from_iter([
            date!(2022 - 06 - 10),
            date!(2022 - 06 - 12),
            date!(2022 - 06 - 20),
        ])
    }
}

impl FromIterator<Date> for DisabledDays {
    fn from_iter<I: IntoIterator<Item = Date>>(iter: I) -> DisabledDays {
        DisabledDays(iter.into_iter().collect())
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum SelectionError {
    #[error("date is not available")]
    Disabled,
    #[error("date is outside the bookable window")]
    OutOfWindow,
    #[error("stay cannot be longer than {0} nights")]
    TooLong(i64),
}

/// Applies a pick to `range`, rejecting dates the calendar would not let the
/// user reach: disabled days, days outside the window, and completions that
/// would exceed the maximum stay.  On rejection the prior range is returned
/// unchanged inside the error path, i.e. the caller keeps its state.
pub(crate) fn apply_pick(
    range: DateRange,
    date: Date,
    window: &SelectionWindow,
    disabled: &DisabledDays,
) -> Result<DateRange, SelectionError> {
    if disabled.contains(date) {
        return Err(SelectionError::Disabled);
    }
    if !window.contains(date) {
        return Err(SelectionError::OutOfWindow);
    }
    let next = range.picked(date);
    if let Some(nights) = next.nights() {
        if nights > window.max_nights {
            return Err(SelectionError::TooLong(window.max_nights));
        }
    }
    Ok(next)
}

/// Display season for a calendar month (Northern-hemisphere buckets).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub(crate) fn for_month(month: Month) -> Season {
        match month {
            Month::January | Month::February | Month::March => Season::Winter,
            Month::April | Month::May | Month::June => Season::Spring,
            Month::July | Month::August | Month::September => Season::Summer,
            Month::October | Month::November | Month::December => Season::Autumn,
        }
    }

    pub(crate) fn emoji(self) -> &'static str {
        match self {
            Season::Winter => "⛄",
            Season::Spring => "🌸",
            Season::Summer => "🌻",
            Season::Autumn => "🍂",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn window() -> SelectionWindow {
        // today = 2024-01-10
        SelectionWindow::from_today(date!(2024 - 01 - 10))
    }

    #[test]
    fn test_window_bounds() {
        let w = window();
        assert_eq!(w.earliest, date!(2024 - 01 - 12));
        assert_eq!(w.latest, date!(2024 - 05 - 09));
        assert_eq!(w.max_nights, 8);
        assert!(!w.contains(date!(2024 - 01 - 11)));
        assert!(w.contains(date!(2024 - 01 - 12)));
        assert!(w.contains(date!(2024 - 05 - 09)));
        assert!(!w.contains(date!(2024 - 05 - 10)));
    }

    #[test]
    fn test_empty_range_duration() {
        let range = DateRange::new();
        assert_eq!(range.nights(), None);
        assert_eq!(range.duration_nights(), 1);
        assert!(!range.is_selected_days());
    }

    #[test]
    fn test_first_pick_sets_check_in() {
        let range = apply_pick(
            DateRange::new(),
            date!(2024 - 01 - 15),
            &window(),
            &DisabledDays::default(),
        )
        .unwrap();
        assert_eq!(range.from, Some(date!(2024 - 01 - 15)));
        assert_eq!(range.to, None);
        assert!(!range.is_selected_days());
        assert_eq!(range.duration_nights(), 1);
    }

    #[test]
    fn test_second_pick_completes_range() {
        let mut range = DateRange::new();
        let w = window();
        let disabled = DisabledDays::default();
        range = apply_pick(range, date!(2024 - 01 - 15), &w, &disabled).unwrap();
        range = apply_pick(range, date!(2024 - 01 - 18), &w, &disabled).unwrap();
        assert!(range.is_selected_days());
        assert_eq!(range.nights(), Some(3));
        assert_eq!(range.duration_nights(), 3);
    }

    #[test]
    fn test_earlier_pick_restarts() {
        let mut range = DateRange::new();
        let w = window();
        let disabled = DisabledDays::default();
        range = apply_pick(range, date!(2024 - 01 - 20), &w, &disabled).unwrap();
        range = apply_pick(range, date!(2024 - 01 - 15), &w, &disabled).unwrap();
        assert_eq!(range.from, Some(date!(2024 - 01 - 15)));
        assert_eq!(range.to, None);
    }

    #[test]
    fn test_repicking_check_in_clears() {
        let mut range = DateRange::new();
        let w = window();
        let disabled = DisabledDays::default();
        range = apply_pick(range, date!(2024 - 01 - 15), &w, &disabled).unwrap();
        range = apply_pick(range, date!(2024 - 01 - 15), &w, &disabled).unwrap();
        assert_eq!(range, DateRange::new());
    }

    #[test]
    fn test_pick_after_complete_range_restarts() {
        let mut range = DateRange::new();
        let w = window();
        let disabled = DisabledDays::default();
        range = apply_pick(range, date!(2024 - 01 - 15), &w, &disabled).unwrap();
        range = apply_pick(range, date!(2024 - 01 - 18), &w, &disabled).unwrap();
        range = apply_pick(range, date!(2024 - 02 - 01), &w, &disabled).unwrap();
        assert_eq!(range.from, Some(date!(2024 - 02 - 01)));
        assert_eq!(range.to, None);
    }

    #[test]
    fn test_too_long_stay_rejected() {
        let mut range = DateRange::new();
        let w = window();
        let disabled = DisabledDays::default();
        range = apply_pick(range, date!(2024 - 01 - 15), &w, &disabled).unwrap();
        let r = apply_pick(range, date!(2024 - 01 - 25), &w, &disabled);
        assert_eq!(r, Err(SelectionError::TooLong(8)));
        // prior state retained by the caller
        assert_eq!(range.from, Some(date!(2024 - 01 - 15)));
        assert_eq!(range.to, None);
    }

    #[test]
    fn test_eight_night_stay_allowed() {
        let mut range = DateRange::new();
        let w = window();
        let disabled = DisabledDays::default();
        range = apply_pick(range, date!(2024 - 01 - 15), &w, &disabled).unwrap();
        range = apply_pick(range, date!(2024 - 01 - 23), &w, &disabled).unwrap();
        assert_eq!(range.nights(), Some(8));
    }

    #[test]
    fn test_out_of_window_rejected() {
        let w = window();
        let disabled = DisabledDays::default();
        assert_eq!(
            apply_pick(DateRange::new(), date!(2024 - 01 - 11), &w, &disabled),
            Err(SelectionError::OutOfWindow),
        );
        assert_eq!(
            apply_pick(DateRange::new(), date!(2024 - 05 - 10), &w, &disabled),
            Err(SelectionError::OutOfWindow),
        );
    }

    #[test]
    fn test_disabled_day_rejected() {
        let w = SelectionWindow::from_today(date!(2022 - 06 - 01));
        let disabled = DisabledDays::sample();
        assert_eq!(
            apply_pick(DateRange::new(), date!(2022 - 06 - 10), &w, &disabled),
            Err(SelectionError::Disabled),
        );
        assert!(apply_pick(DateRange::new(), date!(2022 - 06 - 11), &w, &disabled).is_ok());
    }

    #[test]
    fn test_season_buckets() {
        use Month::*;
        for (month, season) in [
            (January, Season::Winter),
            (February, Season::Winter),
            (March, Season::Winter),
            (April, Season::Spring),
            (May, Season::Spring),
            (June, Season::Spring),
            (July, Season::Summer),
            (August, Season::Summer),
            (September, Season::Summer),
            (October, Season::Autumn),
            (November, Season::Autumn),
            (December, Season::Autumn),
        ] {
            assert_eq!(Season::for_month(month), season, "month = {month:?}");
        }
    }

    #[test]
    fn test_season_emoji_mapping_is_total() {
        for season in [
            Season::Winter,
            Season::Spring,
            Season::Summer,
            Season::Autumn,
        ] {
            assert!(!season.emoji().is_empty());
        }
    }
}
