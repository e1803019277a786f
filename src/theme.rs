use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const CAPTION_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const TODAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);

/// Check-in and check-out endpoints of the selected range
pub(crate) const RANGE_EDGE_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

/// Nights strictly between the selected endpoints
pub(crate) const RANGE_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Yellow);

pub(crate) const DISABLED_STYLE: Style = BASE_STYLE
    .fg(Color::DarkGray)
    .add_modifier(Modifier::CROSSED_OUT);

pub(crate) const OUT_OF_WINDOW_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const HINT_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);
