//! Semantic styles shared by the components, so colors are picked in one
//! place instead of per widget.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub border: Style,
    pub border_focused: Style,
    pub label: Style,
    pub label_focused: Style,
    pub value: Style,
    pub value_focused: Style,
    pub required: Style,
    pub hint: Style,
    pub error: Style,
    pub info: Style,
    pub gauge: Style,
    pub selection: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::Yellow),
            label: Style::default().fg(Color::White),
            label_focused: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            value: Style::default().fg(Color::Cyan),
            value_focused: Style::default().fg(Color::Black).bg(Color::White),
            required: Style::default().fg(Color::Red),
            hint: Style::default().fg(Color::DarkGray),
            error: Style::default().fg(Color::Red),
            info: Style::default().fg(Color::Green),
            gauge: Style::default().fg(Color::Blue),
            selection: Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        }
    }
}
