use super::{centered, level_color};
use crate::model::LogRecord;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const DETAIL_WIDTH_PERCENT: u16 = 70;
const DETAIL_HEIGHT_PERCENT: u16 = 60;

pub(super) fn detail_area(screen: Rect) -> Rect {
    centered(screen, DETAIL_WIDTH_PERCENT, DETAIL_HEIGHT_PERCENT)
}

pub(super) fn render_detail(f: &mut Frame, area: Rect, record: &LogRecord) {
    let label = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![Span::styled("Message: ", label), Span::raw(&record.message)]),
        Line::from(vec![Span::styled("Source:  ", label), Span::raw(&record.source)]),
        Line::from(vec![
            Span::styled("ID:      ", label),
            Span::raw(record.id.to_string()),
        ]),
    ];

    if let Some(details) = record.details.as_deref().filter(|d| !d.is_empty()) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Details:", label)));
        lines.extend(
            details
                .lines()
                .map(|l| Line::styled(l.to_string(), Style::default().fg(Color::Gray))),
        );
    }

    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", record.level),
            Style::default()
                .fg(level_color(record.level))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("- {} ", record.display_timestamp())),
    ]);

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(" Esc/Enter - Close "),
        );

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}
