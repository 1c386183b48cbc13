//! The logs view coordinator.
//!
//! Owns every piece of view state (page, filters, records, suggestions,
//! selection) and is the only thing that mutates it. Fetches are handed to a
//! [`Dispatch`] implementation and come back as [`FetchOutcome`]s through
//! [`LogsView::apply`], where tickets decide whether they still count.

use crate::dispatch::{Dispatch, FetchOutcome, FetchRequest, RequestSequence, Stream};
use crate::fetcher::FetchError;
use crate::inspector::DetailInspector;
use crate::model::{LogLevel, LogPage, LogRecord};
use crate::pagination::{Pagination, DEFAULT_PAGE_SIZE};
use crate::query::{DateWindow, LogQuery};
use crate::suggest::{SuggestionEngine, DEFAULT_DEBOUNCE};
use std::time::{Duration, Instant};

/// Session-wide settings fixed at mount.
#[derive(Debug, Clone)]
pub struct ViewSettings {
    pub page_size: usize,
    pub debounce: Duration,
    pub window: DateWindow,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            window: DateWindow::default(),
        }
    }
}

/// Main fetch cycle. `Loading` lasts until the latest issued page request
/// resolves; superseded responses do not end it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchCycle {
    Idle,
    Loading,
}

pub struct LogsView<D: Dispatch> {
    dispatcher: D,
    pagination: Pagination,
    level: Option<LogLevel>,
    query: String,
    window: DateWindow,
    page_sequence: RequestSequence,
    cycle: FetchCycle,
    records: Vec<LogRecord>,
    error: Option<FetchError>,
    suggestions: SuggestionEngine,
    search_focused: bool,
    inspector: DetailInspector,
}

impl<D: Dispatch> LogsView<D> {
    pub fn new(dispatcher: D, settings: ViewSettings) -> Self {
        Self {
            dispatcher,
            pagination: Pagination::new(settings.page_size),
            level: None,
            query: String::new(),
            window: settings.window,
            page_sequence: RequestSequence::new(),
            cycle: FetchCycle::Idle,
            records: Vec::new(),
            error: None,
            suggestions: SuggestionEngine::new(settings.debounce),
            search_focused: false,
            inspector: DetailInspector::default(),
        }
    }

    /// Seed the filters before mounting. Does not fetch.
    pub fn with_filters(mut self, level: Option<LogLevel>, query: impl Into<String>) -> Self {
        self.level = level;
        self.query = query.into();
        self
    }

    // --- accessors -------------------------------------------------------

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn level(&self) -> Option<LogLevel> {
        self.level
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.cycle == FetchCycle::Loading
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn suggestions(&self) -> &[String] {
        self.suggestions.items()
    }

    pub fn suggestions_visible(&self) -> bool {
        self.suggestions.is_visible(self.search_focused)
    }

    pub fn selected(&self) -> Option<&LogRecord> {
        self.inspector.selected()
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.suggestions.next_deadline()
    }

    pub fn dispatcher_mut(&mut self) -> &mut D {
        &mut self.dispatcher
    }

    // --- triggers ----------------------------------------------------------

    /// Initial load.
    pub fn mount(&mut self) {
        self.fetch_page();
    }

    pub fn go_to_next(&mut self) {
        if self.pagination.go_to_next() {
            self.fetch_page();
        }
    }

    pub fn go_to_previous(&mut self) {
        if self.pagination.go_to_previous() {
            self.fetch_page();
        }
    }

    /// Change the level filter; refetches from the first page.
    pub fn set_level(&mut self, level: Option<LogLevel>) {
        if self.level == level {
            return;
        }
        self.level = level;
        self.pagination.reset();
        self.fetch_page();
    }

    pub fn cycle_level(&mut self) {
        self.set_level(LogLevel::cycle(self.level));
    }

    /// Update the search text. Only feeds suggestions; the page is left alone
    /// until [`submit_search`](Self::submit_search).
    pub fn edit_query(&mut self, text: impl Into<String>, now: Instant) {
        self.query = text.into();
        self.suggestions.on_input(&self.query, now);
    }

    pub fn submit_search(&mut self) {
        self.suggestions.cancel_pending();
        self.suggestions.close();
        self.pagination.reset();
        self.fetch_page();
    }

    /// Use suggestion `index` as the query and search for it.
    pub fn select_suggestion(&mut self, index: usize) {
        let Some(text) = self.suggestions.items().get(index).cloned() else {
            return;
        };
        self.query = text;
        self.submit_search();
    }

    /// Re-issue the current page (user-initiated retry).
    pub fn refresh(&mut self) {
        self.fetch_page();
    }

    pub fn focus_search(&mut self) {
        self.search_focused = true;
        self.suggestions.reopen();
    }

    pub fn blur_search(&mut self) {
        self.search_focused = false;
    }

    /// Open the detail panel for the record at `row` of the current page.
    pub fn open_detail(&mut self, row: usize) {
        if let Some(record) = self.records.get(row).cloned() {
            self.inspector.open(record);
        }
    }

    pub fn close_detail(&mut self) {
        self.inspector.close();
    }

    /// Fire timers that are due at `now`.
    pub fn tick(&mut self, now: Instant) {
        if let Some(request) = self.suggestions.poll_due(now) {
            self.dispatcher.dispatch(request);
        }
    }

    // --- outcomes ------------------------------------------------------------

    pub fn apply(&mut self, outcome: FetchOutcome) {
        match outcome.stream {
            Stream::Page => self.apply_page(outcome.ticket, outcome.result),
            Stream::Suggestions => {
                self.suggestions.apply(outcome.ticket, outcome.result);
            }
        }
    }

    fn apply_page(&mut self, ticket: u64, result: Result<LogPage, FetchError>) {
        if !self.page_sequence.is_latest(ticket) {
            tracing::debug!(ticket, "dropping superseded page response");
            return;
        }
        self.cycle = FetchCycle::Idle;

        match result {
            Ok(page) => {
                tracing::debug!(ticket, total = page.total, items = page.items.len(), "page loaded");
                self.records = page.items;
                self.error = None;
                if self.pagination.apply_total(page.total) {
                    tracing::debug!(offset = self.pagination.offset(), "offset past total, refetching");
                    self.fetch_page();
                }
            }
            Err(e) => {
                tracing::warn!(ticket, error = %e, "page fetch failed");
                self.error = Some(e);
            }
        }
    }

    fn fetch_page(&mut self) {
        let query = LogQuery::build(
            self.pagination.offset(),
            self.pagination.page_size(),
            self.level,
            &self.query,
        )
        .with_window(self.window);

        self.cycle = FetchCycle::Loading;
        let request = FetchRequest {
            stream: Stream::Page,
            ticket: self.page_sequence.issue(),
            query,
        };
        self.dispatcher.dispatch(request);
    }
}
