//! Job Table Widget
//!
//! Rebuilds the job table from the sorted collection every frame. Each row
//! carries a View control (dimmed when the job is not viewable), the original
//! input filename, the local submission time, and the job id.

use crate::tui::app::{App, Focus};
use crate::tui::theme::Theme;
use chrono::Local;
use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
    Frame,
};

/// Render the job table
pub fn render_jobs(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Jobs;
    let block = Block::default()
        .title(format!(" Jobs ({}) ", app.state.jobs.len()))
        .borders(Borders::ALL)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        });

    if app.state.jobs.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let empty = Paragraph::new(Line::from(Span::styled(
            "No jobs yet. Submit one with Ctrl+S.",
            Theme::text_dim(),
        )));
        frame.render_widget(empty, inner);
        return;
    }

    let header = Row::new(vec!["View", "Input", "Submitted", "Job ID"])
        .style(Theme::heading())
        .bottom_margin(1);

    let rows: Vec<Row> = app
        .state
        .jobs
        .iter()
        .map(|job| {
            let view = if job.viewable {
                Span::styled("View", Theme::view_enabled())
            } else {
                Span::styled("View", Theme::view_disabled())
            };
            let submitted = job
                .submission_time
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string();
            Row::new(vec![
                Line::from(view),
                Line::from(Span::styled(job.orig_input_fname.clone(), Theme::text())),
                Line::from(Span::styled(submitted, Theme::text_secondary())),
                Line::from(Span::styled(job.id.clone(), Theme::text_secondary())),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Percentage(35),
            Constraint::Length(19),
            Constraint::Fill(1),
        ],
    )
    .header(header)
    .block(block)
    .highlight_style(Theme::selected())
    .highlight_symbol("▶ ");

    let mut table_state = TableState::default();
    if focused {
        table_state.select(Some(app.job_cursor));
    }
    frame.render_stateful_widget(table, area, &mut table_state);
}
