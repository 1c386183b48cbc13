use crate::dispatch::{Dispatch, FetchOutcome};
use crate::event::AppEvent;
use crate::view::LogsView;
use std::time::Instant;

/// Input mode for user interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// Lightweight rectangle for storing layout areas (avoids ratatui dependency in app module)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl LayoutRect {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && column < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y.saturating_add(self.height)
    }
}

/// Main application state: the logs view plus terminal-only UI state.
pub struct App<D: Dispatch> {
    pub view: LogsView<D>,

    pub input_mode: InputMode,

    /// Highlighted row of the current page
    pub selected_row: usize,

    /// Highlighted suggestion, if the user moved into the dropdown
    pub suggestion_cursor: Option<usize>,

    pub show_help: bool,

    pub should_quit: bool,

    /// Where the detail panel was last drawn, for click-outside handling
    pub detail_area: Option<LayoutRect>,
}

impl<D: Dispatch> App<D> {
    pub fn new(view: LogsView<D>) -> Self {
        Self {
            view,
            input_mode: InputMode::Normal,
            selected_row: 0,
            suggestion_cursor: None,
            show_help: false,
            should_quit: false,
            detail_area: None,
        }
    }

    pub fn is_searching(&self) -> bool {
        self.input_mode == InputMode::Search
    }

    pub fn is_detail_open(&self) -> bool {
        self.view.selected().is_some()
    }

    /// Hand a finished fetch to the view and keep the row highlight in range.
    pub fn on_outcome(&mut self, outcome: FetchOutcome) {
        self.view.apply(outcome);
        self.clamp_selection();
        if !self.view.suggestions_visible() {
            self.suggestion_cursor = None;
        } else if let Some(cursor) = self.suggestion_cursor {
            let last = self.view.suggestions().len().saturating_sub(1);
            self.suggestion_cursor = Some(cursor.min(last));
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.view.records().len();
        self.selected_row = self.selected_row.min(len.saturating_sub(1));
    }

    fn edit_search(&mut self, edit: impl FnOnce(&mut String), now: Instant) {
        let mut text = self.view.query().to_string();
        edit(&mut text);
        self.view.edit_query(text, now);
        self.suggestion_cursor = None;
    }

    fn leave_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.suggestion_cursor = None;
        self.view.blur_search();
    }

    pub fn apply_event(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::RowDown => {
                self.selected_row += 1;
                self.clamp_selection();
            }
            AppEvent::RowUp => self.selected_row = self.selected_row.saturating_sub(1),
            AppEvent::NextPage => {
                self.view.go_to_next();
                self.selected_row = 0;
            }
            AppEvent::PrevPage => {
                self.view.go_to_previous();
                self.selected_row = 0;
            }
            AppEvent::CycleLevel => {
                self.view.cycle_level();
                self.selected_row = 0;
            }
            AppEvent::Refresh => self.view.refresh(),

            AppEvent::FocusSearch => {
                self.input_mode = InputMode::Search;
                self.suggestion_cursor = None;
                self.view.focus_search();
            }
            AppEvent::SearchChar(c) => self.edit_search(|text| text.push(c), now),
            AppEvent::SearchBackspace => {
                self.edit_search(
                    |text| {
                        text.pop();
                    },
                    now,
                );
            }
            AppEvent::SearchClear => self.edit_search(String::clear, now),
            AppEvent::SearchSubmit => {
                match self.suggestion_cursor {
                    Some(index) if self.view.suggestions_visible() => {
                        self.view.select_suggestion(index)
                    }
                    _ => self.view.submit_search(),
                }
                self.selected_row = 0;
                self.leave_search();
            }
            AppEvent::SearchBlur => self.leave_search(),
            AppEvent::SuggestionDown => {
                if self.view.suggestions_visible() {
                    let last = self.view.suggestions().len() - 1;
                    self.suggestion_cursor = Some(match self.suggestion_cursor {
                        None => 0,
                        Some(i) => (i + 1).min(last),
                    });
                }
            }
            AppEvent::SuggestionUp => {
                self.suggestion_cursor = match self.suggestion_cursor {
                    None | Some(0) => None,
                    Some(i) => Some(i - 1),
                };
            }

            AppEvent::OpenDetail => self.view.open_detail(self.selected_row),
            AppEvent::CloseDetail => {
                self.view.close_detail();
                self.detail_area = None;
            }
            AppEvent::MouseClick { column, row } => {
                let inside = self
                    .detail_area
                    .is_some_and(|area| area.contains(column, row));
                if self.is_detail_open() && !inside {
                    self.view.close_detail();
                    self.detail_area = None;
                }
            }

            AppEvent::ShowHelp => self.show_help = true,
            AppEvent::HideHelp => self.show_help = false,
            AppEvent::Quit => self.should_quit = true,
        }
    }
}
