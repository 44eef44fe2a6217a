use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Gauge},
};

use crate::{components::Component, state::State, theme::Theme, tui::Frame};

/// Completion gauge for the current draft.
pub struct ProgressGauge {
    theme: Theme,
}

impl ProgressGauge {
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
        }
    }
}

impl Default for ProgressGauge {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ProgressGauge {
    fn height_constraint(&self) -> Constraint {
        Constraint::Length(3)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &State) -> Result<()> {
        let percent = state.controller.progress();
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.border)
                    .title(" Progress "),
            )
            .gauge_style(self.theme.gauge)
            .percent(percent as u16)
            .label(format!("{percent}% completed"));
        f.render_widget(gauge, area);
        Ok(())
    }
}
