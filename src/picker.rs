use crate::booking::{apply_pick, DateRange, DisabledDays, SelectionError, SelectionWindow};
use crate::calendar::{CalendarState, DateStyler, MonthCursor};
use crate::query::{duration_value, SearchParams, DURATION_PARAM};
use crate::theme::{
    DISABLED_STYLE, OUT_OF_WINDOW_STYLE, RANGE_EDGE_STYLE, RANGE_STYLE, TODAY_STYLE,
};
use ratatui::style::Style;
use std::cmp::{max, min};
use thiserror::Error;
use time::{Date, Duration};

/// The date-range selector: owns the selection, the displayed month, and the
/// keyboard cursor.  Every change to the range immediately republishes the
/// stay duration into the page's query parameters; `today` is injected rather
/// than read from the clock.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Picker {
    today: Date,
    range: DateRange,
    window: SelectionWindow,
    disabled: DisabledDays,
    month: MonthCursor,
    cursor: Date,
}

impl Picker {
    pub(crate) fn new(today: Date, disabled: DisabledDays, params: &mut SearchParams) -> Picker {
        let window = SelectionWindow::from_today(today);
        let picker = Picker {
            today,
            range: DateRange::new(),
            window,
            disabled,
            // Near the end of a month the window can open in the next month;
            // start on the first bookable month so the cursor is on screen.
            month: MonthCursor::containing(window.earliest),
            cursor: window.earliest,
        };
        picker.publish(params);
        picker
    }

    /// Writes the current duration under the fixed query key.  Runs on
    /// construction and after every range change, within the same update.
    fn publish(&self, params: &mut SearchParams) {
        params.set(DURATION_PARAM, duration_value(self.range.duration_nights()));
    }

    pub(crate) fn select(
        &mut self,
        date: Date,
        params: &mut SearchParams,
    ) -> Result<(), SelectionError> {
        self.range = apply_pick(self.range, date, &self.window, &self.disabled)?;
        self.publish(params);
        Ok(())
    }

    pub(crate) fn select_cursor(
        &mut self,
        params: &mut SearchParams,
    ) -> Result<(), SelectionError> {
        self.select(self.cursor, params)
    }

    pub(crate) fn reset(&mut self, params: &mut SearchParams) {
        self.range = DateRange::new();
        self.publish(params);
    }

    pub(crate) fn is_selected_days(&self) -> bool {
        self.range.is_selected_days()
    }

    pub(crate) fn range(&self) -> DateRange {
        self.range
    }

    pub(crate) fn footer(&self) -> Footer {
        match (self.range.from, self.range.to) {
            (None, _) => Footer::Prompt,
            (Some(check_in), None) => Footer::CheckInOnly { check_in },
            (Some(check_in), Some(check_out)) => Footer::Selected {
                check_in,
                check_out,
                nights: (check_out - check_in).whole_days(),
            },
        }
    }

    pub(crate) fn next_month(&mut self) -> Result<(), OutOfWindowError> {
        let next = self
            .month
            .forward()
            .filter(|m| m.first_day() <= self.window.latest)
            .ok_or(OutOfWindowError)?;
        self.month = next;
        self.snap_cursor_to_month();
        Ok(())
    }

    pub(crate) fn previous_month(&mut self) -> Result<(), OutOfWindowError> {
        let prev = self
            .month
            .back()
            .filter(|m| m.last_day() >= self.window.earliest)
            .ok_or(OutOfWindowError)?;
        self.month = prev;
        self.snap_cursor_to_month();
        Ok(())
    }

    /// Jump the view back to today's month, or to the first bookable month
    /// when today's month holds no selectable days.  Returns `false` when
    /// that month is already displayed, mirroring the disabled today-button.
    pub(crate) fn go_to_today(&mut self) -> bool {
        let home = MonthCursor::containing(self.window.clamp(self.today));
        if self.month == home {
            return false;
        }
        self.month = home;
        self.snap_cursor_to_month();
        true
    }

    /// Moves the keyboard cursor by a number of days, clamped to the
    /// selection window; the displayed month follows the cursor.  Returns
    /// `false` when the cursor could not move.
    pub(crate) fn move_cursor(&mut self, days: i64) -> bool {
        let target = self
            .window
            .clamp(self.cursor.saturating_add(Duration::days(days)));
        if target == self.cursor {
            return false;
        }
        self.cursor = target;
        if !self.month.contains(target) {
            self.month = MonthCursor::containing(target);
        }
        true
    }

    fn snap_cursor_to_month(&mut self) {
        // Every way of setting the displayed month keeps it overlapping the
        // window, so the bounds cannot cross.
        let lo = max(self.month.first_day(), self.window.earliest);
        let hi = min(self.month.last_day(), self.window.latest);
        self.cursor = self.cursor.clamp(lo, hi);
    }
}

impl DateStyler for Picker {
    fn date_style(&self, date: Date) -> Style {
        let is_edge = self.range.from == Some(date) || self.range.to == Some(date);
        let in_range = match (self.range.from, self.range.to) {
            (Some(from), Some(to)) => from < date && date < to,
            _ => false,
        };
        if self.disabled.contains(date) {
            DISABLED_STYLE
        } else if !self.window.contains(date) {
            OUT_OF_WINDOW_STYLE
        } else if is_edge {
            RANGE_EDGE_STYLE
        } else if in_range {
            RANGE_STYLE
        } else if date == self.today {
            TODAY_STYLE
        } else {
            Style::new()
        }
    }
}

impl CalendarState for Picker {
    fn displayed_month(&self) -> MonthCursor {
        self.month
    }

    fn cursor(&self) -> Date {
        self.cursor
    }
}

/// Footer of the picker, varying with the selection state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Footer {
    Prompt,
    CheckInOnly {
        check_in: Date,
    },
    Selected {
        check_in: Date,
        check_out: Date,
        nights: i64,
    },
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("no further months to show")]
pub(crate) struct OutOfWindowError;
