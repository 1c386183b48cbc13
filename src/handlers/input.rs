use crate::app::{App, InputMode};
use crate::dispatch::Dispatch;
use crate::event::AppEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Handle keyboard input and return corresponding events
/// Does not mutate app state directly - returns events to be processed
pub fn handle_input_event<D: Dispatch>(key: KeyEvent, app: &App<D>) -> Vec<AppEvent> {
    if is_ctrl_c(&key) {
        return vec![AppEvent::Quit];
    }

    if app.show_help {
        return handle_help_mode(key);
    }

    if app.is_detail_open() {
        return handle_detail_mode(key);
    }

    match app.input_mode {
        InputMode::Search => handle_search_mode(key),
        InputMode::Normal => handle_normal_mode(key),
    }
}

/// Only left clicks matter; they may dismiss the detail panel.
pub fn handle_mouse_event(mouse: MouseEvent) -> Vec<AppEvent> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => vec![AppEvent::MouseClick {
            column: mouse.column,
            row: mouse.row,
        }],
        _ => vec![],
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn handle_help_mode(key: KeyEvent) -> Vec<AppEvent> {
    match key.code {
        KeyCode::Char('q') => vec![AppEvent::Quit],
        // Any other key hides help
        _ => vec![AppEvent::HideHelp],
    }
}

fn handle_detail_mode(key: KeyEvent) -> Vec<AppEvent> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => vec![AppEvent::CloseDetail],
        _ => vec![],
    }
}

fn handle_search_mode(key: KeyEvent) -> Vec<AppEvent> {
    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            vec![AppEvent::SearchClear]
        }
        KeyCode::Char(c) => vec![AppEvent::SearchChar(c)],
        KeyCode::Backspace => vec![AppEvent::SearchBackspace],
        KeyCode::Enter => vec![AppEvent::SearchSubmit],
        KeyCode::Esc => vec![AppEvent::SearchBlur],
        KeyCode::Down | KeyCode::Tab => vec![AppEvent::SuggestionDown],
        KeyCode::Up | KeyCode::BackTab => vec![AppEvent::SuggestionUp],
        _ => vec![],
    }
}

fn handle_normal_mode(key: KeyEvent) -> Vec<AppEvent> {
    match key.code {
        KeyCode::Char('q') => vec![AppEvent::Quit],
        KeyCode::Down | KeyCode::Char('j') => vec![AppEvent::RowDown],
        KeyCode::Up | KeyCode::Char('k') => vec![AppEvent::RowUp],
        KeyCode::Right | KeyCode::PageDown | KeyCode::Char('n') => vec![AppEvent::NextPage],
        KeyCode::Left | KeyCode::PageUp | KeyCode::Char('p') => vec![AppEvent::PrevPage],
        KeyCode::Char('l') => vec![AppEvent::CycleLevel],
        KeyCode::Char('r') => vec![AppEvent::Refresh],
        KeyCode::Char('/') => vec![AppEvent::FocusSearch],
        KeyCode::Enter => vec![AppEvent::OpenDetail],
        KeyCode::Char('?') => vec![AppEvent::ShowHelp],
        _ => vec![],
    }
}
