use super::centered;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const HELP_WIDTH_PERCENT: u16 = 60;
const HELP_HEIGHT_PERCENT: u16 = 80;

pub(super) fn render_help_overlay(f: &mut Frame, area: Rect) {
    let popup_area = centered(area, HELP_WIDTH_PERCENT, HELP_HEIGHT_PERCENT);

    let heading = |text: &'static str| {
        Line::from(vec![Span::styled(
            text,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )])
    };

    let help_lines = vec![
        Line::from(vec![Span::styled(
            "logdeck - Quick Reference",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        heading("Navigation"),
        Line::from("  j/k, ↑/↓          Move selection"),
        Line::from("  n/p, →/←, PgDn/Up Next / previous page"),
        Line::from("  Enter             Show details"),
        Line::from(""),
        heading("Filtering"),
        Line::from("  l                 Cycle level: all → INFO → WARN → ERROR"),
        Line::from("  /                 Edit search (suggestions after a pause)"),
        Line::from("  ↑/↓, Tab          Move through suggestions"),
        Line::from("  Enter             Search / use highlighted suggestion"),
        Line::from("  Ctrl+U            Clear search text"),
        Line::from("  Esc               Leave search"),
        Line::from("  r                 Reload current page"),
        Line::from(""),
        heading("Other"),
        Line::from("  ?                 Show this help"),
        Line::from("  q, Ctrl+C         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )]),
    ];

    let help = Paragraph::new(help_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}
