use super::grid::{WeekFactory, WeekdayExt};
use super::CalendarState;
use crate::booking::Season;
use crate::theme::{CAPTION_STYLE, WEEKDAY_STYLE};
use ratatui::{prelude::*, widgets::*};
use std::marker::PhantomData;

static HEADER: &str = " Su  Mo  Tu  We  Th  Fr  Sa ";

/// Number of columns per day of week
const DAY_WIDTH: u16 = 4;

/// Width of the day grid in columns
const MAIN_WIDTH: u16 = DAY_WIDTH * 7;

/// Caption column; indented one cell so it lines up with the digit rows
const CAPTION_INDENT: u16 = 1;

/// Number of lines taken up by the caption, the weekday header, and its rule
const TOP_LINES: u16 = 3;

pub(crate) const CALENDAR_WIDTH: u16 = MAIN_WIDTH;

/// Height of the widget when the displayed month spans six weeks
pub(crate) const CALENDAR_HEIGHT: u16 = TOP_LINES + 6;

const ACS_HLINE: char = '─';

/// Month-grid calendar for picking a date range.  The displayed month, the
/// keyboard cursor, and per-day styling all come from the state.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct BookingCalendar<S> {
    _data: PhantomData<S>,
}

impl<S> BookingCalendar<S> {
    pub(crate) fn new() -> BookingCalendar<S> {
        BookingCalendar { _data: PhantomData }
    }
}

impl<S> Default for BookingCalendar<S> {
    fn default() -> Self {
        BookingCalendar::new()
    }
}

impl<S: CalendarState> StatefulWidget for BookingCalendar<S> {
    type State = S;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let month = state.displayed_month();
        let season = Season::for_month(month.month());
        let caption = format!("{} {} {}", season.emoji(), month.month(), month.year());
        let cursor = state.cursor();
        let weeks = WeekFactory::new(&*state).month(month);
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.mvprint(0, CAPTION_INDENT, caption, Some(CAPTION_STYLE));
        canvas.mvprint(1, 0, HEADER, Some(WEEKDAY_STYLE));
        canvas.hline(2, 0, ACS_HLINE, MAIN_WIDTH);
        for (i, week) in std::iter::zip(0u16.., &weeks) {
            for sd in week.days() {
                let s = sd.show(sd.date == cursor, !month.contains(sd.date));
                canvas.mvprint(
                    i + TOP_LINES,
                    DAY_WIDTH * sd.date.weekday().index0(),
                    s.content,
                    Some(s.style),
                );
            }
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // calendar's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}
