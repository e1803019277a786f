use crate::booking::DisabledDays;
use crate::calendar::{BookingCalendar, CALENDAR_HEIGHT, CALENDAR_WIDTH};
use crate::cart::{booking_line, LinesAddForm};
use crate::catalog::ProductVariant;
use crate::help::Help;
use crate::picker::{Footer, Picker};
use crate::query::SearchParams;
use crate::theme::{BASE_STYLE, HINT_STYLE};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Text},
    widgets::{Paragraph, StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::Date;

/// The product page: calendar on top, selection footer underneath, query
/// string and offer line at the bottom.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    picker: Picker,
    params: SearchParams,
    product_title: String,
    variant: ProductVariant,
    state: AppState,
    submitted: Option<LinesAddForm>,
}

/// What the user walked away with: the cart payload and the final query
/// string of the page.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Submission {
    pub(crate) form: LinesAddForm,
    pub(crate) query: String,
}

impl App {
    pub(crate) fn new(
        today: Date,
        disabled: DisabledDays,
        product_title: String,
        variant: ProductVariant,
        mut params: SearchParams,
    ) -> App {
        let picker = Picker::new(today, disabled, &mut params);
        App {
            picker,
            params,
            product_title,
            variant,
            state: AppState::Picking,
            submitted: None,
        }
    }

    pub(crate) fn run<B: Backend>(
        mut self,
        terminal: &mut Terminal<B>,
    ) -> io::Result<Option<Submission>> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(self.into_submission())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Picking => match key {
                KeyCode::Char('h') | KeyCode::Left => self.picker.move_cursor(-1),
                KeyCode::Char('l') | KeyCode::Right => self.picker.move_cursor(1),
                KeyCode::Char('k') | KeyCode::Up => self.picker.move_cursor(-7),
                KeyCode::Char('j') | KeyCode::Down => self.picker.move_cursor(7),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.picker.select_cursor(&mut self.params).is_ok()
                }
                KeyCode::Char('r') => {
                    self.picker.reset(&mut self.params);
                    true
                }
                KeyCode::Char('n') | KeyCode::PageDown => self.picker.next_month().is_ok(),
                KeyCode::Char('p') | KeyCode::PageUp => self.picker.previous_month().is_ok(),
                KeyCode::Char('t') | KeyCode::Home => self.picker.go_to_today(),
                KeyCode::Char('a') => self.submit(),
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Picking;
                true
            }
            AppState::Quitting => false,
        }
    }

    // Submission stays disabled until both stay endpoints are picked and the
    // variant can actually be sold
    fn submit(&mut self) -> bool {
        if !self.picker.is_selected_days() || !self.variant.available_for_sale {
            return false;
        }
        let line = booking_line(&self.variant.id, self.picker.range());
        self.submitted = Some(LinesAddForm::new(vec![line]));
        self.state = AppState::Quitting;
        true
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn into_submission(self) -> Option<Submission> {
        let query = self.params.to_string();
        self.submitted.map(|form| Submission { form, query })
    }

    fn footer_text(&self) -> Text<'static> {
        let mut lines = Vec::new();
        match self.picker.footer() {
            Footer::Prompt => lines.push(Line::raw("Pick your check-in date")),
            Footer::CheckInOnly { check_in } => {
                lines.push(Line::raw(format!("Check-in:  {}", display_date(check_in))));
                lines.push(Line::styled("[r] reset", HINT_STYLE));
            }
            Footer::Selected {
                check_in,
                check_out,
                nights,
            } => {
                lines.push(Line::raw(format!("Check-in:  {}", display_date(check_in))));
                lines.push(Line::raw(format!(
                    "Check-out: {}",
                    display_date(check_out)
                )));
                lines.push(Line::raw(format!("Nights:    {nights}")));
                lines.push(Line::styled("[r] reset", HINT_STYLE));
            }
        }
        Text::from(lines)
    }

    fn status_text(&self) -> Text<'static> {
        let offer = if self.variant.available_for_sale {
            format!(
                "{} | {} | {} | [a] add to cart",
                self.product_title, self.variant.title, self.variant.price
            )
        } else {
            format!("{} | {} | Sold out", self.product_title, self.variant.title)
        };
        Text::from(vec![
            Line::styled(format!("?{}", self.params), HINT_STYLE),
            Line::raw(offer),
        ])
    }
}

fn display_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [cal_row, footer_area, status_area] = Layout::vertical([
            Constraint::Length(CALENDAR_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .areas(area);
        let [cal_area] = Layout::horizontal([Constraint::Length(CALENDAR_WIDTH)]).areas(cal_row);
        BookingCalendar::new().render(cal_area, buf, &mut self.picker);
        Paragraph::new(self.footer_text()).render(footer_area, buf);
        Paragraph::new(self.status_text()).render(status_area, buf);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Picking,
    Helping,
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::theme::{CAPTION_STYLE, OUT_OF_WINDOW_STYLE, WEEKDAY_STYLE};
    use ratatui::style::{Modifier, Style};
    use time::macros::date;

    fn sample_app() -> App {
        let product = Product::sample();
        let variant = product.variant(None).unwrap().clone();
        App::new(
            date!(2024 - 01 - 10),
            DisabledDays::default(),
            product.title.clone(),
            variant,
            SearchParams::new(),
        )
    }

    #[test]
    fn test_submit_needs_complete_range() {
        let mut app = sample_app();
        assert!(!app.handle_key(KeyCode::Char('a')));
        app.picker
            .select(date!(2024 - 01 - 15), &mut app.params)
            .unwrap();
        assert!(!app.handle_key(KeyCode::Char('a')));
        app.picker
            .select(date!(2024 - 01 - 18), &mut app.params)
            .unwrap();
        assert!(app.handle_key(KeyCode::Char('a')));
        assert!(app.quitting());
        let submission = app.into_submission().unwrap();
        assert_eq!(submission.query, "Duration=3Day");
        let payload = serde_json::to_value(&submission.form).unwrap();
        assert_eq!(payload["action"], "LinesAdd");
        assert_eq!(
            payload["inputs"]["lines"][0]["attributes"][0]["value"],
            "2024/01/15",
        );
        assert_eq!(
            payload["inputs"]["lines"][0]["attributes"][1]["value"],
            "2024/01/18",
        );
    }

    #[test]
    fn test_sold_out_variant_blocks_submit() {
        let product = Product::sample();
        let variant = product.variant(Some("Annex Room")).unwrap().clone();
        let mut app = App::new(
            date!(2024 - 01 - 10),
            DisabledDays::default(),
            product.title.clone(),
            variant,
            SearchParams::new(),
        );
        app.picker
            .select(date!(2024 - 01 - 15), &mut app.params)
            .unwrap();
        app.picker
            .select(date!(2024 - 01 - 18), &mut app.params)
            .unwrap();
        assert!(!app.handle_key(KeyCode::Char('a')));
        assert!(!app.quitting());
        assert_eq!(app.into_submission(), None);
    }

    #[test]
    fn test_reset_key() {
        let mut app = sample_app();
        app.picker
            .select(date!(2024 - 01 - 15), &mut app.params)
            .unwrap();
        assert!(app.handle_key(KeyCode::Char('r')));
        assert_eq!(app.picker.footer(), Footer::Prompt);
        assert_eq!(app.params.to_string(), "Duration=1Day");
    }

    #[test]
    fn test_quit_and_help_keys() {
        let mut app = sample_app();
        assert!(app.handle_key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Helping);
        // the Any Key dismisses help
        assert!(app.handle_key(KeyCode::Char('x')));
        assert_eq!(app.state, AppState::Picking);
        assert!(app.handle_key(KeyCode::Esc));
        assert!(app.quitting());
    }

    #[test]
    fn test_invalid_key_rejected() {
        let mut app = sample_app();
        assert!(!app.handle_key(KeyCode::Char('z')));
    }

    #[test]
    fn test_render_initial_screen() {
        let mut app = sample_app();
        let area = Rect::new(0, 0, 40, 14);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            " ⛄ January 2024                        ",
            " Su  Mo  Tu  We  Th  Fr  Sa             ",
            "────────────────────────────            ",
            " 31   1   2   3   4   5   6             ",
            "  7   8   9  10  11 [12] 13             ",
            " 14  15  16  17  18  19  20             ",
            " 21  22  23  24  25  26  27             ",
            " 28  29  30  31   1   2   3             ",
            "                                        ",
            "Pick your check-in date                 ",
            "                                        ",
            "                                        ",
            "?Duration=1Day                          ",
            "Lakeside Cabin Stay | Standard Room | 12",
        ]);
        expected.set_style(*expected.area(), BASE_STYLE);
        // the cell hidden behind the double-width season symbol keeps the
        // base style
        expected.set_style(Rect::new(1, 0, 1, 1), CAPTION_STYLE);
        expected.set_style(Rect::new(3, 0, 13, 1), CAPTION_STYLE);
        expected.set_style(Rect::new(0, 1, 28, 1), WEEKDAY_STYLE);
        // days before the bookable window opens
        expected.set_style(Rect::new(0, 3, 28, 1), OUT_OF_WINDOW_STYLE);
        expected.set_style(Rect::new(0, 4, 20, 1), OUT_OF_WINDOW_STYLE);
        // days outside the displayed month
        expected.set_style(
            Rect::new(0, 3, 4, 1),
            Style::new().add_modifier(Modifier::DIM),
        );
        expected.set_style(
            Rect::new(16, 7, 12, 1),
            Style::new().add_modifier(Modifier::DIM),
        );
        expected.set_style(Rect::new(0, 12, 14, 1), HINT_STYLE);
        assert_eq!(buffer, expected);
    }
}
