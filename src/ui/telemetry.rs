//! Telemetry panel rendering.
//!
//! Draws one card per primary metric (value in its severity color plus a
//! gauge scaled to the metric's `high` threshold), the 5m/15m load detail
//! line, and a backend status block.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::{RenderedMetric, TelemetryFrame};

/// Height of a metric card including borders.
const CARD_HEIGHT: u16 = 4;

/// Render the telemetry view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let telemetry = app.frame();

    let chunks = Layout::vertical([
        Constraint::Length(CARD_HEIGHT),
        Constraint::Length(1),
        Constraint::Min(3),
    ])
    .split(area);

    render_cards(frame, app, &telemetry, chunks[0]);
    render_load_detail(frame, app, &telemetry, chunks[1]);
    render_backend(frame, app, chunks[2]);
}

fn render_cards(frame: &mut Frame, app: &App, telemetry: &TelemetryFrame, area: Rect) {
    let primary: Vec<&RenderedMetric> = telemetry.primary().collect();
    let count = primary.len().max(1) as u32;
    let columns =
        Layout::horizontal((0..count).map(|_| Constraint::Ratio(1, count))).split(area);

    for (metric, column) in primary.iter().zip(columns.iter()) {
        render_card(frame, app, metric, *column);
    }
}

fn render_card(frame: &mut Frame, app: &App, metric: &RenderedMetric, area: Rect) {
    let color = Color::from(metric.color);

    let block = Block::default()
        .title(Span::styled(format!(" {} ", metric.label), app.theme.label))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(inner);

    let value = Paragraph::new(Span::styled(
        metric.text.clone(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(value, rows[0]);

    let gauge = LineGauge::default()
        .filled_style(Style::default().fg(color))
        .unfilled_style(Style::default().fg(app.theme.gauge_track))
        .label("")
        .ratio(gauge_ratio(metric));
    frame.render_widget(gauge, rows[1]);
}

fn render_load_detail(frame: &mut Frame, app: &App, telemetry: &TelemetryFrame, area: Rect) {
    let mut spans = vec![Span::styled(" LOAD ", app.theme.label)];
    for metric in telemetry.detail() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{}: {}", metric.label, metric.text),
            Style::default().fg(Color::from(metric.color)),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_backend(frame: &mut Frame, app: &App, area: Rect) {
    let dim = Style::default().add_modifier(Modifier::DIM);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Status  ", dim),
            Span::styled(app.status.label(), app.theme.status_style(app.status)),
        ]),
        Line::from(vec![
            Span::styled("Mode    ", dim),
            Span::raw(app.mode.label()),
        ]),
        Line::from(vec![
            Span::styled("Source  ", dim),
            Span::raw(app.source_description().to_string()),
        ]),
    ];

    if let Some(ref err) = app.load_error {
        lines.push(Line::from(vec![
            Span::styled("Last poll ", dim),
            Span::styled(
                format!("failed: {} (showing last good data)", err),
                Style::default().fg(app.theme.warning),
            ),
        ]));
    }

    let block = Block::default()
        .title(Span::styled(" Backend ", app.theme.header))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Fraction of the gauge to fill; full at the metric's `high` threshold.
fn gauge_ratio(metric: &RenderedMetric) -> f64 {
    if metric.scale <= 0.0 {
        return 0.0;
    }
    (metric.value / metric.scale).clamp(0.0, 1.0)
}
