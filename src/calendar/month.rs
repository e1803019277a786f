use time::{Date, Month};

/// The month currently shown by the calendar.
///
/// Wraps the first day of that month; navigation is a plain
/// previous/next-month walk, with window clamping left to the caller.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub(crate) struct MonthCursor(Date);

impl MonthCursor {
    pub(crate) fn containing(date: Date) -> MonthCursor {
        // Day 1 exists in every month, so the fallback is never taken
        MonthCursor(date.replace_day(1).unwrap_or(date))
    }

    pub(crate) fn year(&self) -> i32 {
        self.0.year()
    }

    pub(crate) fn month(&self) -> Month {
        self.0.month()
    }

    pub(crate) fn first_day(&self) -> Date {
        self.0
    }

    pub(crate) fn last_day(&self) -> Date {
        let len = self.0.month().length(self.0.year());
        self.0.replace_day(len).unwrap_or(self.0)
    }

    pub(crate) fn contains(&self, date: Date) -> bool {
        date.year() == self.0.year() && date.month() == self.0.month()
    }

    pub(crate) fn forward(&self) -> Option<MonthCursor> {
        let (year, month) = match self.0.month() {
            Month::December => (self.0.year().checked_add(1)?, Month::January),
            m => (self.0.year(), m.next()),
        };
        Date::from_calendar_date(year, month, 1).ok().map(MonthCursor)
    }

    pub(crate) fn back(&self) -> Option<MonthCursor> {
        let (year, month) = match self.0.month() {
            Month::January => (self.0.year().checked_sub(1)?, Month::December),
            m => (self.0.year(), m.previous()),
        };
        Date::from_calendar_date(year, month, 1).ok().map(MonthCursor)
    }
}
