//! Annotator Selector Widget
//!
//! Checkbox panel for the server's annotator registry. Rows come from the
//! title-sorted choice list and every label is padded to the widest title so
//! the checkboxes line up.

use crate::state;
use crate::tui::app::{App, Focus};
use crate::tui::theme::{Icons, Theme};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the annotator checkbox panel
pub fn render_annotators(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Annotators;
    let checked = state::checked_names(&app.choices).len();
    let block = Block::default()
        .title(format!(" Annotators ({}/{}) ", checked, app.choices.len()))
        .borders(Borders::ALL)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.choices.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "Waiting for annotator registry...",
            Theme::text_dim(),
        )));
        frame.render_widget(empty, inner);
        return;
    }

    let width = state::label_width(&app.choices);
    let viewport = inner.height as usize;
    let offset = scroll_offset(app.annotator_cursor, app.choices.len(), viewport);

    let mut lines = Vec::new();
    for (i, choice) in app.choices.iter().enumerate().skip(offset).take(viewport) {
        let cursor = if focused && i == app.annotator_cursor {
            Span::styled(format!("{} ", Icons::SELECTED), Theme::selected())
        } else {
            Span::raw("  ")
        };
        let (box_icon, box_style) = if choice.checked {
            (Icons::CHECKED, Theme::checked())
        } else {
            (Icons::UNCHECKED, Theme::unchecked())
        };
        let label_style = if focused && i == app.annotator_cursor {
            Theme::selected()
        } else {
            Theme::text()
        };
        lines.push(Line::from(vec![
            cursor,
            Span::styled(format!("{box_icon} "), box_style),
            Span::styled(format!("{:<width$}", choice.title), label_style),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// First visible row so the cursor stays inside the viewport.
fn scroll_offset(cursor: usize, len: usize, viewport: usize) -> usize {
    if viewport == 0 || len <= viewport {
        return 0;
    }
    if cursor < viewport {
        0
    } else {
        (cursor + 1 - viewport).min(len - viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_keeps_cursor_visible() {
        assert_eq!(scroll_offset(0, 10, 4), 0);
        assert_eq!(scroll_offset(3, 10, 4), 0);
        assert_eq!(scroll_offset(4, 10, 4), 1);
        assert_eq!(scroll_offset(9, 10, 4), 6);
        assert_eq!(scroll_offset(2, 3, 4), 0);
        assert_eq!(scroll_offset(5, 10, 0), 0);
    }
}
