use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{components::Component, state::State, theme::Theme, tui::Frame};

/// Top bar: application name, the selected form type, and an update badge
/// while a stored record is being edited.
pub struct Header {
    theme: Theme,
}

impl Header {
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
        }
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Header {
    fn height_constraint(&self) -> Constraint {
        Constraint::Length(3)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &State) -> Result<()> {
        let mut spans = vec![
            Span::styled("FormForge", self.theme.title),
            Span::raw("  ·  "),
        ];
        match state.controller.form_type() {
            Some(name) => spans.push(Span::styled(name.to_string(), self.theme.value)),
            None => spans.push(Span::styled("no form type selected", self.theme.hint)),
        }
        if state.controller.is_editing() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled("[updating record]", self.theme.info));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border);
        f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
        Ok(())
    }
}
