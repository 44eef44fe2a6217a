//! Tables of submitted records, one per form type.
//!
//! Columns come from the field keys of a type's first record (the identifier
//! never shows up as a column). A single selection runs across all tables;
//! `e` asks the app to edit the selected record, `d` to delete it.

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use forms::{FieldKind, RecordId};
use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::{
    action::Action,
    components::Component,
    state::{Focus, State},
    theme::Theme,
    tui::{EventResponse, Frame},
};

/// Column header for a field key: first letter upper-cased, rest untouched
/// ("firstName" -> "FirstName").
pub fn column_title(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub struct RecordTables {
    selected: usize,
    theme: Theme,
}

impl RecordTables {
    pub fn new() -> Self {
        Self {
            selected: 0,
            theme: Theme::default(),
        }
    }

    fn total(state: &State) -> usize {
        state.controller.store().len()
    }

    /// Resolve the flat selection index to (form type, record id).
    fn selected_record(&self, state: &State) -> Option<(String, RecordId)> {
        let store = state.controller.store();
        let mut remaining = self.selected;
        for form_type in store.form_types() {
            let records = store.records_for(form_type);
            if remaining < records.len() {
                return Some((form_type.to_string(), records[remaining].id));
            }
            remaining -= records.len();
        }
        None
    }

    fn clamp_selection(&mut self, state: &State) {
        let total = Self::total(state);
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }
    }

    /// True when the field is rendered obfuscated in the table as well.
    fn is_secret(state: &State, form_type: &str, field: &str) -> bool {
        state
            .controller
            .catalog()
            .get(form_type)
            .and_then(|schema| schema.field(field))
            .is_some_and(|f| f.kind == FieldKind::Secret)
    }
}

impl Default for RecordTables {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for RecordTables {
    fn height_constraint(&self) -> Constraint {
        Constraint::Fill(1)
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        state: &mut State,
    ) -> Result<Option<EventResponse<Action>>> {
        if state.focus != Focus::Records {
            return Ok(None);
        }
        let total = Self::total(state);
        if total == 0 {
            return Ok(None);
        }

        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1).min(total - 1);
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                match self.selected_record(state) {
                    Some((_, id)) => Ok(Some(EventResponse::Stop(Action::EditRecord(id)))),
                    None => Ok(None),
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => match self.selected_record(state) {
                Some((form_type, id)) => Ok(Some(EventResponse::Stop(Action::DeleteRecord {
                    form_type,
                    id,
                }))),
                None => Ok(None),
            },
            _ => Ok(None),
        }
    }

    fn update(&mut self, _action: Action, state: &mut State) -> Result<Option<Action>> {
        self.clamp_selection(state);
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &State) -> Result<()> {
        let focused_region = state.focus == Focus::Records;
        let border_style = if focused_region {
            self.theme.border_focused
        } else {
            self.theme.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Submitted Records ");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let store = state.controller.store();
        if store.is_empty() {
            let hint = Paragraph::new(Line::from(Span::styled(
                "No records yet",
                self.theme.hint,
            )));
            f.render_widget(hint, inner);
            return Ok(());
        }

        let mut y = inner.y;
        let mut flat_index = 0usize;
        for form_type in store.form_types() {
            let records = store.records_for(form_type);
            if records.is_empty() {
                continue;
            }
            if y >= inner.y + inner.height {
                break;
            }

            let title = Paragraph::new(Line::from(Span::styled(
                form_type.to_string(),
                self.theme.label_focused,
            )));
            f.render_widget(title, Rect::new(inner.x, y, inner.width, 1));
            y += 1;

            let columns: Vec<String> = records[0].field_names().map(str::to_string).collect();
            let header = Row::new(
                columns
                    .iter()
                    .map(|c| Cell::from(column_title(c)))
                    .collect::<Vec<_>>(),
            )
            .style(self.theme.label);

            let rows: Vec<Row> = records
                .iter()
                .enumerate()
                .map(|(i, record)| {
                    let cells: Vec<Cell> = columns
                        .iter()
                        .map(|column| {
                            let value = record.get(column).unwrap_or("");
                            let text = if Self::is_secret(state, form_type, column)
                                && !value.is_empty()
                            {
                                "•".repeat(value.chars().count())
                            } else {
                                value.to_string()
                            };
                            Cell::from(text)
                        })
                        .collect();
                    let style = if focused_region && flat_index + i == self.selected {
                        self.theme.selection
                    } else {
                        self.theme.value
                    };
                    Row::new(cells).style(style)
                })
                .collect();
            flat_index += records.len();

            let remaining = (inner.y + inner.height).saturating_sub(y);
            let table_height = ((records.len() + 1) as u16).min(remaining);
            if table_height == 0 {
                break;
            }
            let widths = vec![Constraint::Ratio(1, columns.len().max(1) as u32); columns.len()];
            let table = Table::new(rows, widths).header(header);
            f.render_widget(table, Rect::new(inner.x, y, inner.width, table_height));
            y += table_height + 1; // blank line between types
        }

        Ok(())
    }
}
