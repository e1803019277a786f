mod grid;
mod month;
mod widget;
pub(crate) use self::month::MonthCursor;
pub(crate) use self::widget::{BookingCalendar, CALENDAR_HEIGHT, CALENDAR_WIDTH};
use ratatui::style::Style;
use time::Date;

pub(crate) trait DateStyler {
    fn date_style(&self, date: Date) -> Style;
}

/// What the calendar widget needs from its owner: which month to show, where
/// the keyboard cursor sits, and how each day is styled.
pub(crate) trait CalendarState: DateStyler {
    fn displayed_month(&self) -> MonthCursor;
    fn cursor(&self) -> Date;
}
