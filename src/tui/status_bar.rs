use crate::app::App;
use crate::dispatch::Dispatch;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub(super) fn render_status_bar<D: Dispatch>(f: &mut Frame, area: Rect, app: &App<D>) {
    let view = &app.view;
    let pagination = view.pagination();
    let (page, pages) = pagination.page_number();

    let mut top = vec![Span::styled(
        format!(
            " Total: {} | Page {}/{} | Showing {}",
            pagination.total(),
            page,
            pages,
            showing_range(pagination.offset(), view.records().len()),
        ),
        Style::default().add_modifier(Modifier::BOLD),
    )];

    if !view.query().is_empty() {
        top.push(Span::styled(
            format!(" | Query: {}", view.query()),
            Style::default().fg(Color::Cyan),
        ));
    }
    if view.is_loading() {
        top.push(Span::styled(
            " | Loading...",
            Style::default().fg(Color::Yellow),
        ));
    }

    let bottom = if let Some(err) = view.error() {
        Line::from(vec![Span::styled(
            format!(" Error: {} (r - retry)", err),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )])
    } else {
        Line::from(vec![Span::styled(
            " q - Quit | j/k - Row | n/p - Page | l - Level | / - Search | Enter - Details | ? - Help",
            Style::default().fg(Color::DarkGray),
        )])
    };

    let paragraph = Paragraph::new(vec![Line::from(top), bottom])
        .block(Block::default().borders(Borders::ALL).title("Status"));

    f.render_widget(paragraph, area);
}

/// "11-20" style range of the rows on screen, "0" for an empty page.
fn showing_range(offset: usize, rows: usize) -> String {
    if rows == 0 {
        "0".to_string()
    } else {
        format!("{}-{}", offset + 1, offset + rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_showing_range() {
        assert_eq!(showing_range(0, 0), "0");
        assert_eq!(showing_range(0, 10), "1-10");
        assert_eq!(showing_range(20, 3), "21-23");
    }
}
