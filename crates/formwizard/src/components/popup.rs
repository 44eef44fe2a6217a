//! Shared helpers for modal popups.
//!
//! Usage: draw the page as usual, then `render_backdrop`, compute a rect with
//! `centered_rect_fixed`, draw the shell with `draw_popup_frame`, and render
//! the popup content inside the returned area.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Block, Borders, Clear},
};

use crate::tui::Frame;

/// Visually separate a popup from the underlying page. Terminals have no real
/// transparency, so a solid dark fill stands in for a dimmed overlay.
pub fn render_backdrop(frame: &mut Frame<'_>, area: Rect) {
    let backdrop = Block::default().style(Style::default().bg(Color::Black));
    frame.render_widget(backdrop, area);
}

/// A centered rectangle of at most `width` x `height`, clamped to `area`.
pub fn centered_rect_fixed(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);

    let x = area.x.saturating_add((area.width.saturating_sub(w)) / 2);
    let y = area.y.saturating_add((area.height.saturating_sub(h)) / 2);

    Rect {
        x,
        y,
        width: w,
        height: h,
    }
}

/// Clear `area` and draw a rounded, titled popup shell over it.
pub fn draw_popup_frame(frame: &mut Frame<'_>, area: Rect, title: impl Into<String>) -> Rect {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title.into()))
        .borders(Borders::ALL)
        .border_set(symbols::border::ROUNDED)
        .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(block, area);
    area
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_clamped_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect_fixed(area, 60, 20);
        assert_eq!(rect, Rect::new(0, 0, 40, 10));
    }

    #[test]
    fn centered_rect_centers_smaller_dialogs() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered_rect_fixed(area, 40, 10);
        assert_eq!(rect, Rect::new(20, 7, 40, 10));
    }
}
