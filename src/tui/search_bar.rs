use crate::app::App;
use crate::dispatch::Dispatch;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const SEARCH_LABEL: &str = "Search: ";

pub(super) fn render_search_bar<D: Dispatch>(f: &mut Frame, area: Rect, app: &App<D>) {
    let focused = app.is_searching();
    let query = app.view.query();

    let (border_color, title) = if focused {
        (
            Color::Yellow,
            "Search (Enter to search, ↑/↓ suggestions, Esc to leave)",
        )
    } else {
        (Color::White, "Search (/ to edit)")
    };

    let line = Line::from(vec![
        Span::styled(SEARCH_LABEL, Style::default().fg(Color::DarkGray)),
        Span::styled(query, Style::default().fg(Color::Yellow)),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(title),
    );
    f.render_widget(paragraph, area);

    if focused {
        let offset = 1 + SEARCH_LABEL.len() + query.width();
        let cursor_x = area.x.saturating_add(u16::try_from(offset).unwrap_or(u16::MAX));
        let max_x = area.x.saturating_add(area.width.saturating_sub(2));
        f.set_cursor_position((cursor_x.min(max_x), area.y + 1));
    }
}

/// Draw the suggestion dropdown just below the search bar, over `below`.
pub(super) fn render_suggestions<D: Dispatch>(
    f: &mut Frame,
    search_area: Rect,
    below: Rect,
    app: &App<D>,
) {
    let suggestions = app.view.suggestions();
    let height = (suggestions.len() as u16 + 2).min(below.height);
    let x = search_area.x + 1 + SEARCH_LABEL.len() as u16;
    let width = search_area.width.saturating_sub(x - search_area.x + 1);
    if height < 3 || width < 4 {
        return;
    }
    let area = Rect {
        x,
        y: below.y,
        width,
        height,
    };

    let items: Vec<ListItem> = suggestions
        .iter()
        .enumerate()
        .map(|(idx, text)| {
            let style = if app.suggestion_cursor == Some(idx) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::styled(text.as_str(), style))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Suggestions"),
    );

    f.render_widget(Clear, area);
    f.render_widget(list, area);
}
