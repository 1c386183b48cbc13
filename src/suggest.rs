//! Debounced search suggestions.
//!
//! Keystrokes arm a deadline; only the deadline that survives without being
//! re-armed produces a lookup. Lookups are ticketed so a slow response from
//! a superseded lookup never replaces newer suggestions.

use crate::dispatch::{FetchRequest, RequestSequence, Stream};
use crate::fetcher::FetchError;
use crate::model::{LogPage, LogRecord};
use crate::query::{LogQuery, SUGGESTION_LIMIT};
use std::time::{Duration, Instant};

/// Quiet period after the last keystroke before a lookup is issued.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Inputs shorter than this (in chars) clear suggestions instead of looking up.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone)]
struct PendingLookup {
    deadline: Instant,
    text: String,
}

#[derive(Debug)]
pub struct SuggestionEngine {
    debounce: Duration,
    pending: Option<PendingLookup>,
    sequence: RequestSequence,
    items: Vec<String>,
    open: bool,
}

impl SuggestionEngine {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            pending: None,
            sequence: RequestSequence::new(),
            items: Vec::new(),
            open: false,
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Whether the dropdown should be drawn for an input with `focused`.
    pub fn is_visible(&self, focused: bool) -> bool {
        focused && self.open && !self.items.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// React to the query text changing to `text` at `now`.
    pub fn on_input(&mut self, text: &str, now: Instant) {
        if text.chars().count() < MIN_QUERY_CHARS {
            self.pending = None;
            self.items.clear();
            self.open = false;
            // A lookup already in flight would resurrect stale suggestions.
            self.sequence.invalidate();
            return;
        }

        self.pending = Some(PendingLookup {
            deadline: now + self.debounce,
            text: text.to_string(),
        });
    }

    /// Fire the pending lookup if its deadline has passed.
    pub fn poll_due(&mut self, now: Instant) -> Option<FetchRequest> {
        if self.pending.as_ref()?.deadline > now {
            return None;
        }
        let pending = self.pending.take()?;
        Some(FetchRequest {
            stream: Stream::Suggestions,
            ticket: self.sequence.issue(),
            query: LogQuery::for_suggestions(&pending.text),
        })
    }

    /// Apply a lookup result. Returns true if it replaced the list.
    ///
    /// Failures and superseded responses leave the current list untouched.
    pub fn apply(&mut self, ticket: u64, result: Result<LogPage, FetchError>) -> bool {
        if !self.sequence.is_latest(ticket) {
            tracing::trace!(ticket, "dropping superseded suggestion response");
            return false;
        }
        match result {
            Ok(page) => {
                self.items = extract_suggestions(&page.items);
                self.open = true;
                true
            }
            Err(e) => {
                tracing::debug!(ticket, error = %e, "suggestion lookup failed");
                false
            }
        }
    }

    /// Drop the pending keystroke timer, if any.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Reopen on focus when there is something to show.
    pub fn reopen(&mut self) {
        if !self.items.is_empty() {
            self.open = true;
        }
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

/// Distinct, trimmed, non-empty texts in result order, at most
/// [`SUGGESTION_LIMIT`]. A record offers its message, or its source when the
/// message is blank.
pub fn extract_suggestions(records: &[LogRecord]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(SUGGESTION_LIMIT);
    for record in records {
        let text = if record.message.is_empty() {
            record.source.trim()
        } else {
            record.message.trim()
        };
        if text.is_empty() || out.iter().any(|s| s == text) {
            continue;
        }
        out.push(text.to_string());
        if out.len() == SUGGESTION_LIMIT {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LogLevel, RecordId};

    fn record(message: &str, source: &str) -> LogRecord {
        LogRecord {
            id: RecordId::Number(1),
            timestamp: None,
            level: LogLevel::Info,
            message: message.to_string(),
            source: source.to_string(),
            details: None,
        }
    }

    fn page(messages: &[&str]) -> LogPage {
        LogPage {
            items: messages.iter().map(|m| record(m, "src")).collect(),
            total: messages.len(),
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fast_typing_fires_once_after_last_keystroke() {
        let t0 = Instant::now();
        let mut engine = SuggestionEngine::default();

        engine.on_input("e", t0);
        engine.on_input("er", t0 + ms(50));
        engine.on_input("err", t0 + ms(100));

        assert!(engine.poll_due(t0 + ms(399)).is_none());
        let request = engine.poll_due(t0 + ms(400)).expect("lookup due");
        assert_eq!(request.stream, Stream::Suggestions);
        assert_eq!(request.query.q.as_deref(), Some("err"));
        assert_eq!(request.query.limit, 6);
        assert_eq!(request.query.level, None);

        assert!(engine.poll_due(t0 + ms(2000)).is_none());
    }

    #[test]
    fn test_short_input_clears_without_lookup() {
        let t0 = Instant::now();
        let mut engine = SuggestionEngine::default();
        engine.on_input("disk", t0);
        let req = engine.poll_due(t0 + ms(300)).unwrap();
        assert!(engine.apply(req.ticket, Ok(page(&["disk full"]))));
        assert_eq!(engine.items().len(), 1);

        engine.on_input("d", t0 + ms(400));
        assert!(engine.items().is_empty());
        assert!(engine.next_deadline().is_none());
        assert!(engine.poll_due(t0 + ms(5000)).is_none());
    }

    #[test]
    fn test_short_input_invalidates_in_flight_lookup() {
        let t0 = Instant::now();
        let mut engine = SuggestionEngine::default();
        engine.on_input("disk", t0);
        let req = engine.poll_due(t0 + ms(300)).unwrap();

        engine.on_input("", t0 + ms(310));
        assert!(!engine.apply(req.ticket, Ok(page(&["disk full"]))));
        assert!(engine.items().is_empty());
    }

    #[test]
    fn test_superseded_response_is_discarded() {
        let t0 = Instant::now();
        let mut engine = SuggestionEngine::default();

        engine.on_input("di", t0);
        let first = engine.poll_due(t0 + ms(300)).unwrap();
        engine.on_input("disk", t0 + ms(310));
        let second = engine.poll_due(t0 + ms(610)).unwrap();

        assert!(engine.apply(second.ticket, Ok(page(&["disk full"]))));
        assert!(!engine.apply(first.ticket, Ok(page(&["dial tone"]))));
        assert_eq!(engine.items(), ["disk full"]);
    }

    #[test]
    fn test_failure_keeps_previous_suggestions() {
        let t0 = Instant::now();
        let mut engine = SuggestionEngine::default();
        engine.on_input("disk", t0);
        let req = engine.poll_due(t0 + ms(300)).unwrap();
        engine.apply(req.ticket, Ok(page(&["disk full"])));

        engine.on_input("disk f", t0 + ms(400));
        let req = engine.poll_due(t0 + ms(700)).unwrap();
        assert!(!engine.apply(req.ticket, Err(FetchError::Status(500))));
        assert_eq!(engine.items(), ["disk full"]);
    }

    #[test]
    fn test_extract_dedupes_trims_and_caps() {
        let records = vec![
            record("  disk full ", "a"),
            record("disk full", "b"),
            record("", "scraper"),
            record("   ", ""),
            record("one", ""),
            record("two", ""),
            record("three", ""),
            record("four", ""),
            record("five", ""),
        ];
        let out = extract_suggestions(&records);
        assert_eq!(out, vec!["disk full", "scraper", "one", "two", "three", "four"]);
    }

    #[test]
    fn test_visibility_requires_focus_open_and_items() {
        let t0 = Instant::now();
        let mut engine = SuggestionEngine::default();
        assert!(!engine.is_visible(true));

        engine.on_input("disk", t0);
        let req = engine.poll_due(t0 + ms(300)).unwrap();
        engine.apply(req.ticket, Ok(page(&["disk full"])));
        assert!(engine.is_visible(true));
        assert!(!engine.is_visible(false));

        engine.close();
        assert!(!engine.is_visible(true));
        engine.reopen();
        assert!(engine.is_visible(true));
    }
}
