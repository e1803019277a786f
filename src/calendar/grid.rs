use super::month::MonthCursor;
use super::DateStyler;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use time::{Date, Duration, Weekday};

const DAYS_IN_WEEK: usize = 7;

pub(super) trait WeekdayExt {
    fn index0(&self) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_sunday().into()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct StyledDate {
    pub(crate) date: Date,
    pub(crate) style: Style,
}

impl StyledDate {
    /// The four-column cell for this day.  The keyboard cursor is bracketed;
    /// days outside the displayed month are dimmed on top of their style.
    pub(super) fn show(&self, is_cursor: bool, outside_month: bool) -> Span<'static> {
        let s = if is_cursor {
            format!("[{:2}]", self.date.day())
        } else {
            format!(" {:2} ", self.date.day())
        };
        let style = if outside_month {
            self.style.add_modifier(Modifier::DIM)
        } else {
            self.style
        };
        Span::styled(s, style)
    }
}

/// One calendar row, Sunday through Saturday, fully populated (days falling
/// outside the displayed month are still shown).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Week([StyledDate; DAYS_IN_WEEK]);

impl Week {
    pub(crate) fn days(&self) -> impl Iterator<Item = StyledDate> + '_ {
        self.0.iter().copied()
    }

    pub(super) fn first(&self) -> StyledDate {
        self.0[0]
    }

    pub(super) fn last(&self) -> StyledDate {
        self.0[DAYS_IN_WEEK - 1]
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct WeekFactory<'a, S>(&'a S);

impl<'a, S: DateStyler> WeekFactory<'a, S> {
    pub(crate) fn new(styler: &'a S) -> Self {
        WeekFactory(styler)
    }

    fn style_date(&self, date: Date) -> StyledDate {
        StyledDate {
            date,
            style: self.0.date_style(date),
        }
    }

    // Returns the Week containing the given date, which can be at any day of
    // the week
    pub(crate) fn containing(&self, date: Date) -> Week {
        let offset = i64::from(date.weekday().number_days_from_sunday());
        let mut day = date.saturating_sub(Duration::days(offset));
        Week(std::array::from_fn(|_| {
            let cell = self.style_date(day);
            day = day.next_day().unwrap_or(day);
            cell
        }))
    }

    fn week_after(&self, week: &Week) -> Option<Week> {
        week.last().date.next_day().map(|d| self.containing(d))
    }

    /// All the weeks touching the displayed month, in order.
    pub(crate) fn month(&self, cursor: MonthCursor) -> Vec<Week> {
        let last_day = cursor.last_day();
        let mut week = self.containing(cursor.first_day());
        let mut weeks = Vec::with_capacity(6);
        loop {
            let done = week.last().date >= last_day;
            let next = self.week_after(&week);
            weeks.push(week);
            match next {
                Some(w) if !done => week = w,
                _ => break,
            }
        }
        weeks
    }
}
