//! Interactive renderer for the active schema's fields.
//!
//! Navigation runs over a focus ring; textual fields edit inline through
//! `tui-input`, choice fields cycle their options in place. Every committed
//! change leaves this component as an [`Action::FieldChanged`]; the draft
//! itself is never mutated here.

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use forms::{FieldDef, FieldKind};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{
    action::Action,
    components::Component,
    state::{Focus, InputMode, State},
    theme::Theme,
    tui::{EventResponse, Frame},
};

const DATE_HINT: &str = "YYYY-MM-DD";
const UNSELECTED_HINT: &str = "(select)";

/// Advance through the option ring of a choice field. The ring starts with
/// the "unselected" empty entry, so cycling can always return to blank.
pub fn cycle_choice(current: &str, options: &[String], dir: i32) -> String {
    let len = options.len() as i32 + 1;
    let idx = options
        .iter()
        .position(|o| o == current)
        .map(|i| i as i32 + 1)
        .unwrap_or(0);
    let next = (idx + dir).rem_euclid(len);
    if next == 0 {
        String::new()
    } else {
        options[(next - 1) as usize].clone()
    }
}

pub struct FormView {
    focused: usize,
    scroll: usize,
    editing: bool,
    input: Input,
    theme: Theme,
}

impl FormView {
    pub fn new() -> Self {
        Self {
            focused: 0,
            scroll: 0,
            editing: false,
            input: Input::default(),
            theme: Theme::default(),
        }
    }

    fn field_count(&self, state: &State) -> usize {
        state.controller.schema().map_or(0, |s| s.field_count())
    }

    fn current_field(&self, state: &State) -> Option<FieldDef> {
        state
            .controller
            .schema()
            .and_then(|s| s.fields.get(self.focused))
            .cloned()
    }

    fn focus_next(&mut self, state: &State) {
        let count = self.field_count(state);
        if count == 0 {
            return;
        }
        self.focused = (self.focused + 1) % count;
    }

    fn focus_prev(&mut self, state: &State) {
        let count = self.field_count(state);
        if count == 0 {
            return;
        }
        if self.focused == 0 {
            self.focused = count - 1;
        } else {
            self.focused -= 1;
        }
    }

    fn reset(&mut self) {
        self.focused = 0;
        self.scroll = 0;
        self.editing = false;
        self.input = Input::default();
    }

    fn start_editing(&mut self, state: &mut State, field: &FieldDef) {
        let existing = state
            .controller
            .value_of(&field.name)
            .unwrap_or("")
            .to_string();
        self.input = Input::default().with_value(existing);
        self.editing = true;
        state.input_mode = InputMode::Insert;
    }

    fn stop_editing(&mut self, state: &mut State) {
        self.editing = false;
        self.input = Input::default();
        state.input_mode = InputMode::Normal;
    }

    /// Keep the focused field inside the drawn window.
    fn ensure_visible(&mut self, inner_height: u16) {
        let max_visible = inner_height.max(1) as usize;
        if self.focused < self.scroll {
            self.scroll = self.focused;
        } else if self.focused >= self.scroll + max_visible {
            self.scroll = self.focused + 1 - max_visible;
        }
    }

    fn display_value(&self, state: &State, field: &FieldDef) -> (String, bool) {
        let value = state.controller.value_of(&field.name).unwrap_or("");
        match &field.kind {
            FieldKind::Secret => {
                if value.is_empty() {
                    (String::new(), false)
                } else {
                    ("•".repeat(value.chars().count()), false)
                }
            }
            FieldKind::Date if value.is_empty() => (DATE_HINT.to_string(), true),
            FieldKind::Select { .. } if value.is_empty() => (UNSELECTED_HINT.to_string(), true),
            _ => (value.to_string(), false),
        }
    }
}

impl Default for FormView {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for FormView {
    fn height_constraint(&self) -> Constraint {
        Constraint::Min(8)
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        state: &mut State,
    ) -> Result<Option<EventResponse<Action>>> {
        if state.focus != Focus::Form {
            return Ok(None);
        }
        let Some(field) = self.current_field(state) else {
            return Ok(None);
        };

        if self.editing {
            // Leave control chords (e.g. Ctrl+C) to the global handler.
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return Ok(None);
            }
            match key.code {
                KeyCode::Enter => {
                    let value = self.input.value().to_string();
                    self.stop_editing(state);
                    return Ok(Some(EventResponse::Stop(Action::FieldChanged {
                        name: field.name,
                        value,
                    })));
                }
                KeyCode::Esc => {
                    self.stop_editing(state);
                    return Ok(Some(EventResponse::Stop(Action::Update)));
                }
                KeyCode::Char(c)
                    if field.kind == FieldKind::Number && !c.is_ascii_digit() =>
                {
                    // Numeric editors accept digits only, like their HTML
                    // counterpart; everything else is swallowed.
                    return Ok(Some(EventResponse::Stop(Action::Update)));
                }
                _ => {
                    self.input
                        .handle_event(&crossterm::event::Event::Key(key));
                    return Ok(Some(EventResponse::Stop(Action::Update)));
                }
            }
        }

        match key.code {
            KeyCode::Up => {
                self.focus_prev(state);
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            KeyCode::Down => {
                self.focus_next(state);
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            KeyCode::Home => {
                self.focused = 0;
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            KeyCode::End => {
                let count = self.field_count(state);
                if count > 0 {
                    self.focused = count - 1;
                }
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            KeyCode::Enter => match &field.kind {
                FieldKind::Select { options } => {
                    let current = state.controller.value_of(&field.name).unwrap_or("");
                    let value = cycle_choice(current, options, 1);
                    Ok(Some(EventResponse::Stop(Action::FieldChanged {
                        name: field.name,
                        value,
                    })))
                }
                _ => {
                    self.start_editing(state, &field);
                    Ok(Some(EventResponse::Stop(Action::Update)))
                }
            },
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => match &field.kind {
                FieldKind::Select { options } => {
                    let dir = if key.code == KeyCode::Left { -1 } else { 1 };
                    let current = state.controller.value_of(&field.name).unwrap_or("");
                    let value = cycle_choice(current, options, dir);
                    Ok(Some(EventResponse::Stop(Action::FieldChanged {
                        name: field.name,
                        value,
                    })))
                }
                _ => Ok(None),
            },
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: Action, state: &mut State) -> Result<Option<Action>> {
        match action {
            Action::SelectFormType(_) => {
                self.reset();
                state.input_mode = InputMode::Normal;
            }
            Action::EditRecord(_) => {
                // Values were loaded into the draft; restart at the top.
                self.focused = 0;
                self.scroll = 0;
                self.editing = false;
            }
            _ => {
                let count = self.field_count(state);
                if count > 0 && self.focused >= count {
                    self.focused = count - 1;
                }
            }
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &State) -> Result<()> {
        let focused_region = state.focus == Focus::Form;
        let border_style = if focused_region {
            self.theme.border_focused
        } else {
            self.theme.border
        };
        let title = match state.controller.form_type() {
            Some(name) => format!(" Form — {name} "),
            None => " Form ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let Some(schema) = state.controller.schema() else {
            let hint = Paragraph::new(Line::from(Span::styled(
                "Press t to choose a form type",
                self.theme.hint,
            )))
            .alignment(Alignment::Center);
            f.render_widget(hint, inner);
            return Ok(());
        };

        self.ensure_visible(inner.height);
        let start = self.scroll.min(schema.field_count());
        let end = (start + inner.height.max(1) as usize).min(schema.field_count());

        let mut lines: Vec<Line> = Vec::new();
        for (offset, field) in schema.fields[start..end].iter().enumerate() {
            let idx = start + offset;
            let is_focused = focused_region && idx == self.focused;

            let mut spans = Vec::new();
            let label_style = if is_focused {
                self.theme.label_focused
            } else {
                self.theme.label
            };
            spans.push(Span::styled(format!("{}:", field.label), label_style));
            if field.required {
                spans.push(Span::styled("*", self.theme.required));
            }
            spans.push(Span::raw(" "));

            if is_focused && self.editing {
                spans.push(Span::styled(
                    self.input.value().to_string(),
                    self.theme.value_focused,
                ));
            } else {
                let (text, is_hint) = self.display_value(state, field);
                let style = if is_hint {
                    self.theme.hint
                } else if is_focused {
                    self.theme.value_focused
                } else {
                    self.theme.value
                };
                spans.push(Span::styled(text, style));
            }

            lines.push(Line::from(spans));
        }

        f.render_widget(Paragraph::new(lines), inner);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn states() -> Vec<String> {
        vec!["California".into(), "Texas".into(), "New York".into()]
    }

    #[test]
    fn cycling_forward_walks_options_and_wraps_through_blank() {
        let options = states();
        assert_eq!(cycle_choice("", &options, 1), "California");
        assert_eq!(cycle_choice("California", &options, 1), "Texas");
        assert_eq!(cycle_choice("New York", &options, 1), "");
    }

    #[test]
    fn cycling_backward_from_blank_lands_on_last_option() {
        let options = states();
        assert_eq!(cycle_choice("", &options, -1), "New York");
        assert_eq!(cycle_choice("California", &options, -1), "");
    }

    #[test]
    fn unknown_current_value_restarts_the_ring() {
        let options = states();
        assert_eq!(cycle_choice("Oregon", &options, 1), "California");
    }

    #[test]
    fn empty_option_list_stays_blank() {
        assert_eq!(cycle_choice("", &[], 1), "");
        assert_eq!(cycle_choice("", &[], -1), "");
    }
}
