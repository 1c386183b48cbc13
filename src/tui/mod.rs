mod detail;
mod help;
mod log_table;
mod search_bar;
mod status_bar;

use crate::app::{App, LayoutRect};
use crate::dispatch::Dispatch;
use crate::model::LogLevel;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    Frame,
};

pub fn render<D: Dispatch>(f: &mut Frame, app: &mut App<D>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(1),    // Log table
            Constraint::Length(4), // Status bar (2 lines + borders)
        ])
        .split(f.area());

    search_bar::render_search_bar(f, chunks[0], app);
    log_table::render_log_table(f, chunks[1], app);
    status_bar::render_status_bar(f, chunks[2], app);

    // Dropdown overlaps the top of the table
    if app.view.suggestions_visible() {
        search_bar::render_suggestions(f, chunks[0], chunks[1], app);
    }

    app.detail_area = app.view.selected().map(|record| {
        let area = detail::detail_area(f.area());
        detail::render_detail(f, area, record);
        LayoutRect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: area.height,
        }
    });

    if app.show_help {
        help::render_help_overlay(f, f.area());
    }
}

fn level_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Info => Color::Green,
        LogLevel::Warn => Color::Yellow,
        LogLevel::Error => Color::Red,
    }
}

/// Rectangle of `width_percent` x `height_percent` centered in `area`.
fn centered(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(width_percent) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(height_percent) / 100) as u16;
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::testing::RecordingDispatch;
    use crate::dispatch::FetchOutcome;
    use crate::model::{LogPage, LogRecord, RecordId};
    use crate::view::{LogsView, ViewSettings};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Instant;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn loaded_app() -> App<RecordingDispatch> {
        let mut app = App::new(LogsView::new(
            RecordingDispatch::default(),
            ViewSettings::default(),
        ));
        app.view.mount();
        let req = app.view.dispatcher_mut().take().remove(0);
        app.on_outcome(FetchOutcome {
            stream: req.stream,
            ticket: req.ticket,
            result: Ok(LogPage {
                items: vec![LogRecord {
                    id: RecordId::Number(1),
                    timestamp: None,
                    level: LogLevel::Error,
                    message: "disk full".into(),
                    source: "youtube".into(),
                    details: Some("No space left on device".into()),
                }],
                total: 1,
            }),
        });
        app
    }

    #[test]
    fn test_renders_records_and_total() {
        let mut app = loaded_app();
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("disk full"));
        assert!(text.contains("ERROR"));
        assert!(text.contains("Total: 1"));
        assert!(app.detail_area.is_none());
    }

    #[test]
    fn test_detail_overlay_records_its_area() {
        let mut app = loaded_app();
        app.apply_event(crate::event::AppEvent::OpenDetail, Instant::now());
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("No space left on device"));
        let area = app.detail_area.expect("detail area recorded");
        assert!(area.contains(50, 15));
        assert!(!area.contains(0, 0));
    }

    #[test]
    fn test_overlays_fit_very_wide_terminal() {
        let mut app = loaded_app();
        app.apply_event(crate::event::AppEvent::OpenDetail, Instant::now());
        app.show_help = true;
        let mut terminal = Terminal::new(TestBackend::new(1200, 40)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();

        let area = app.detail_area.expect("detail area recorded");
        assert_eq!(area.width, 840);
        assert_eq!(area.x, 180);
    }

    #[test]
    fn test_search_cursor_with_long_query() {
        let mut app = loaded_app();
        app.apply_event(crate::event::AppEvent::FocusSearch, Instant::now());
        let long = "x".repeat(70_000);
        app.view.edit_query(long, Instant::now());
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();
    }

    #[test]
    fn test_centered_rect_wide_area() {
        let inner = centered(Rect::new(0, 0, 1200, 40), 60, 80);
        assert_eq!(inner, Rect::new(240, 4, 720, 32));
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        let inner = centered(area, 50, 50);
        assert_eq!(inner, Rect::new(25, 10, 50, 20));
    }
}
