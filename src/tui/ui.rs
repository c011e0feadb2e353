//! UI Rendering
//!
//! Main layout and rendering logic for the console.

use crate::tui::app::{App, Focus, Status, View};
use crate::tui::theme::Theme;
use crate::tui::widgets;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the main UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Annotators | Jobs
            Constraint::Length(5), // Variant text input
            Constraint::Length(3), // File path + assembly
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);
    widgets::render_annotators(frame, panels[0], app);
    widgets::render_jobs(frame, panels[1], app);

    render_text_input(frame, chunks[2], app);
    render_source_row(frame, chunks[3], app);
    render_status_bar(frame, chunks[4], app);

    if app.view == View::Help {
        render_help(frame);
    }
}

/// Render the header with the server address
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let title_text = vec![Line::from(vec![
        Span::raw("🧬 "),
        Span::styled("Variant Console", Theme::title()),
        Span::raw("  "),
        Span::styled(&app.config.server.base_url, Theme::text_secondary()),
    ])];

    let title = Paragraph::new(title_text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );

    frame.render_widget(title, area);
}

/// Render the variant text input
fn render_text_input(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Variant Input ")
        .borders(Borders::ALL)
        .border_style(if app.focus == Focus::Text {
            Theme::border_focused()
        } else {
            Theme::border()
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(&app.input, inner);
}

/// Render the file path input and the assembly selector
fn render_source_row(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let file_block = Block::default()
        .title(" Input File ")
        .borders(Borders::ALL)
        .border_style(if app.focus == Focus::FilePath {
            Theme::border_focused()
        } else {
            Theme::border()
        });
    let file_inner = file_block.inner(chunks[0]);
    frame.render_widget(file_block, chunks[0]);
    let file_line = if app.file_path.is_empty() {
        Line::from(Span::styled("(no file selected)", Theme::text_dim()))
    } else {
        Line::from(Span::styled(app.file_path.as_str(), Theme::text()))
    };
    frame.render_widget(Paragraph::new(file_line), file_inner);

    let assembly_block = Block::default()
        .title(" Assembly ")
        .borders(Borders::ALL)
        .border_style(if app.focus == Focus::Assembly {
            Theme::border_focused()
        } else {
            Theme::border()
        });
    let assembly_inner = assembly_block.inner(chunks[1]);
    frame.render_widget(assembly_block, chunks[1]);
    let assembly_line = Line::from(vec![
        Span::styled("◀ ", Theme::text_dim()),
        Span::styled(app.assembly(), Theme::text()),
        Span::styled(" ▶", Theme::text_dim()),
    ]);
    frame.render_widget(
        Paragraph::new(assembly_line).alignment(Alignment::Center),
        assembly_inner,
    );
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let status = match &app.status {
        Status::Ready => Span::styled("Ready", Theme::text_secondary()),
        Status::Submitting => Span::styled("Submitting...", Theme::active()),
        Status::Info(message) => Span::styled(message.clone(), Theme::success()),
        Status::Error(message) => Span::styled(message.clone(), Theme::error()),
    };

    let shortcuts = vec![
        Span::styled(" [Ctrl+S]", Theme::shortcut_key()),
        Span::styled(" Submit ", Theme::shortcut_desc()),
        Span::styled("[Tab]", Theme::shortcut_key()),
        Span::styled(" Field ", Theme::shortcut_desc()),
        Span::styled("[Ctrl+R]", Theme::shortcut_key()),
        Span::styled(" Refresh ", Theme::shortcut_desc()),
        Span::styled("[F1]", Theme::shortcut_key()),
        Span::styled(" Help ", Theme::shortcut_desc()),
        Span::styled("[Ctrl+Q]", Theme::shortcut_key()),
        Span::styled(" Quit", Theme::shortcut_desc()),
    ];

    let line = Line::from(
        std::iter::once(status)
            .chain(std::iter::once(Span::raw(" │ ")))
            .chain(shortcuts)
            .collect::<Vec<_>>(),
    );

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the help modal
fn render_help(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let help_lines = vec![
        Line::from(Span::styled("Keyboard Shortcuts", Theme::heading())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Ctrl+S       ", Theme::shortcut_key()),
            Span::styled("Submit job", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Ctrl+R       ", Theme::shortcut_key()),
            Span::styled("Refresh annotators and jobs", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Tab / S-Tab  ", Theme::shortcut_key()),
            Span::styled("Next / previous field", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Space        ", Theme::shortcut_key()),
            Span::styled("Toggle annotator checkbox", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("a / n        ", Theme::shortcut_key()),
            Span::styled("Select all / none (annotators)", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("←/→          ", Theme::shortcut_key()),
            Span::styled("Change assembly", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("↑/↓          ", Theme::shortcut_key()),
            Span::styled("Move cursor in lists", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Enter        ", Theme::shortcut_key()),
            Span::styled("View selected job (jobs panel)", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Ctrl+Q       ", Theme::shortcut_key()),
            Span::styled("Quit", Theme::text()),
        ]),
        Line::from(""),
        Line::from(Span::styled("Press Esc to close", Theme::text_dim())),
    ];

    let paragraph = Paragraph::new(help_lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Theme::border_focused()),
    );

    frame.render_widget(paragraph, area);
}

/// Helper to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
