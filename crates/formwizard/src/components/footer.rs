use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    components::Component,
    state::{Focus, InputMode, State, StatusLevel},
    theme::Theme,
    tui::Frame,
};

/// Bottom bar: context-sensitive key hints plus the last status message.
pub struct Footer {
    theme: Theme,
}

impl Footer {
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
        }
    }

    fn hints(&self, state: &State) -> &'static str {
        match (&state.input_mode, state.focus) {
            (InputMode::Insert, _) => "Enter: confirm  Esc: cancel",
            (InputMode::Normal, Focus::Form) => {
                "↑/↓: field  Enter: edit  ←/→: choose  s: submit  t: form type  Tab: records  q: quit"
            }
            (InputMode::Normal, Focus::Records) => {
                "↑/↓: row  e: edit  d: delete  t: form type  Tab: form  q: quit"
            }
        }
    }
}

impl Default for Footer {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Footer {
    fn height_constraint(&self) -> Constraint {
        Constraint::Length(2)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &State) -> Result<()> {
        let mut lines = vec![Line::from(Span::styled(self.hints(state), self.theme.hint))];
        if let Some((level, message)) = &state.status {
            let style = match level {
                StatusLevel::Info => self.theme.info,
                StatusLevel::Error => self.theme.error,
            };
            lines.push(Line::from(Span::styled(message.clone(), style)));
        }
        f.render_widget(Paragraph::new(lines), area);
        Ok(())
    }
}
