use super::level_color;
use crate::app::App;
use crate::dispatch::Dispatch;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

const DATE_WIDTH: u16 = 19;
const LEVEL_WIDTH: u16 = 5;
const SOURCE_WIDTH: u16 = 16;

pub(super) fn render_log_table<D: Dispatch>(f: &mut Frame, area: Rect, app: &App<D>) {
    let view = &app.view;
    let title = format!(
        "Logs [level: {}]",
        view.level().map_or("ALL", |level| level.as_str())
    );
    let block = Block::default().borders(Borders::ALL).title(title);

    if view.records().is_empty() {
        let placeholder = if view.is_loading() {
            "Loading..."
        } else {
            "No records."
        };
        let paragraph = Paragraph::new(Line::styled(
            format!(" {}", placeholder),
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(["Date", "Level", "Message", "Source"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows = view.records().iter().map(|record| {
        Row::new(vec![
            Cell::from(record.display_timestamp()),
            Cell::from(record.level.as_str())
                .style(Style::default().fg(level_color(record.level))),
            Cell::from(first_line(&record.message)),
            Cell::from(record.source.as_str()).style(Style::default().fg(Color::DarkGray)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(DATE_WIDTH),
            Constraint::Length(LEVEL_WIDTH),
            Constraint::Min(10),
            Constraint::Length(SOURCE_WIDTH),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let mut state = TableState::default().with_selected(Some(app.selected_row));
    f.render_stateful_widget(table, area, &mut state);
}

/// Multi-line messages show only their first line in the table.
fn first_line(message: &str) -> String {
    match message.split_once('\n') {
        Some((head, _)) => format!("{} …", head.trim_end()),
        None => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        assert_eq!(first_line("single"), "single");
        assert_eq!(first_line("head  \ntail"), "head …");
    }
}
