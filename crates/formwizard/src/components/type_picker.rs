//! Modal picker for the catalog's form types.
//!
//! Emits `Action::SelectFormType` on Enter and `Action::ClosePopup` on Esc.
//! While open, every key event stops here; the page below never sees input.

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    action::Action,
    components::{
        Component,
        popup::{centered_rect_fixed, draw_popup_frame, render_backdrop},
    },
    state::State,
    theme::Theme,
    tui::{EventResponse, Frame},
};

pub struct TypePicker {
    options: Vec<String>,
    selected: usize,
    theme: Theme,
}

impl TypePicker {
    pub fn new(options: Vec<String>, current: Option<String>) -> Self {
        let selected = current
            .and_then(|name| options.iter().position(|o| *o == name))
            .unwrap_or(0);
        Self {
            options,
            selected,
            theme: Theme::default(),
        }
    }

    fn select_prev(&mut self) {
        if self.options.is_empty() {
            return;
        }
        if self.selected == 0 {
            self.selected = self.options.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    fn select_next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.options.len();
    }
}

impl Component for TypePicker {
    fn height_constraint(&self) -> Constraint {
        Constraint::Min(9)
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        _state: &mut State,
    ) -> Result<Option<EventResponse<Action>>> {
        match key.code {
            KeyCode::Up => {
                self.select_prev();
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            KeyCode::Down => {
                self.select_next();
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            KeyCode::Enter => match self.options.get(self.selected) {
                Some(name) => Ok(Some(EventResponse::Stop(Action::SelectFormType(
                    name.clone(),
                )))),
                None => Ok(Some(EventResponse::Stop(Action::ClosePopup))),
            },
            KeyCode::Esc => Ok(Some(EventResponse::Stop(Action::ClosePopup))),
            // Modal: swallow everything else.
            _ => Ok(Some(EventResponse::Stop(Action::Update))),
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, _state: &State) -> Result<()> {
        let height = (self.options.len() as u16).saturating_add(4).max(9);
        let dialog = centered_rect_fixed(area, 40, height);
        render_backdrop(f, dialog);
        draw_popup_frame(f, dialog, "Form Type");

        let inner = Rect {
            x: dialog.x.saturating_add(1),
            y: dialog.y.saturating_add(1),
            width: dialog.width.saturating_sub(2),
            height: dialog.height.saturating_sub(2),
        };

        let mut lines: Vec<Line> = Vec::new();
        for (idx, option) in self.options.iter().enumerate() {
            let (marker, style) = if idx == self.selected {
                ("▸ ", self.theme.selection)
            } else {
                ("  ", self.theme.value)
            };
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(option.clone(), style),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "↑/↓: select  Enter: confirm  Esc: cancel",
            self.theme.hint,
        )));

        f.render_widget(Paragraph::new(lines), inner);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker() -> TypePicker {
        TypePicker::new(
            vec!["One".into(), "Two".into(), "Three".into()],
            Some("Two".into()),
        )
    }

    #[test]
    fn starts_on_the_current_type() {
        assert_eq!(picker().selected, 1);
    }

    #[test]
    fn unknown_current_type_starts_at_the_top() {
        let p = TypePicker::new(vec!["One".into()], Some("Missing".into()));
        assert_eq!(p.selected, 0);
    }

    #[test]
    fn selection_wraps_in_both_directions() {
        let mut p = picker();
        p.select_next();
        p.select_next();
        assert_eq!(p.selected, 0);
        p.select_prev();
        assert_eq!(p.selected, 2);
    }
}
