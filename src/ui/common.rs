//! Common UI components: header bar, status bar, and help overlay.

use std::time::Instant;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Render the header bar with the backend's overall status.
///
/// Displays: status indicator, backend status, operating mode, source.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);

    if app.last_updated.is_none() {
        let line = Line::from(vec![
            Span::styled(" ANDY-OS ", bold),
            Span::raw("│ Waiting for telemetry..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let status_style = app.theme.status_style(app.status);
    let line = Line::from(vec![
        Span::styled(" ● ", status_style),
        Span::styled("ANDY-OS ", bold),
        Span::raw("│ "),
        Span::styled(app.status.label(), status_style),
        Span::raw(" │ "),
        Span::raw(app.mode.label()),
        Span::raw(" │ "),
        Span::styled(
            app.source_description().to_string(),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar at the bottom.
///
/// Shows time since the last snapshot, poll errors, and available controls.
/// Temporary status messages take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = "r:refresh e:export ?:help q:quit";
    let status = match (app.last_updated, &app.load_error) {
        (Some(updated), Some(err)) => format!(
            " Updated {:.1}s ago | Poll failed: {} | {}",
            Instant::now().duration_since(updated).as_secs_f64(),
            err,
            controls
        ),
        (Some(updated), None) => format!(
            " Updated {:.1}s ago | {}",
            Instant::now().duration_since(updated).as_secs_f64(),
            controls
        ),
        (None, Some(err)) => format!(" Error: {} | r:retry q:quit", err),
        (None, None) => " Loading... | q:quit".to_string(),
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the telemetry view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from("  r         Refresh now"),
        Line::from("  e         Export frame to JSON"),
        Line::from("  ?         Toggle help"),
        Line::from("  q / Esc   Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Colors",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  green → yellow → red as a metric"),
        Line::from("  crosses its thresholds"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 40u16.min(area.width.saturating_sub(4));
    let help_height = 14u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
