//! Query building for the `/logs` endpoint.
//!
//! A [`LogQuery`] is the canonical request descriptor shared by the page
//! fetch and the suggestion fetch. Building one has no side effects.

use crate::model::LogLevel;
use chrono::{NaiveDate, NaiveDateTime};

/// Page size used by suggestion lookups.
pub const SUGGESTION_LIMIT: usize = 6;

const BOUND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Optional `[since, until]` window applied to page queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub since: Option<NaiveDateTime>,
    pub until: Option<NaiveDateTime>,
}

impl DateWindow {
    pub fn is_empty(&self) -> bool {
        self.since.is_none() && self.until.is_none()
    }
}

/// Parse a window bound: either a date (`2024-05-01`) or a datetime
/// (`2024-05-01T08:30:00`, optional fractional seconds).
pub fn parse_bound(raw: &str) -> Result<NaiveDateTime, String> {
    let raw = raw.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("`{}` is not an ISO 8601 date or datetime", raw))
}

/// Request descriptor: `skip`/`limit` always present, filters only when set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    pub skip: usize,
    pub limit: usize,
    pub level: Option<LogLevel>,
    pub q: Option<String>,
    pub window: DateWindow,
}

impl LogQuery {
    /// Build a page query. Empty text omits `q`; an unset level omits `level`.
    pub fn build(offset: usize, page_size: usize, level: Option<LogLevel>, text: &str) -> Self {
        Self {
            skip: offset,
            limit: page_size,
            level,
            q: (!text.is_empty()).then(|| text.to_string()),
            window: DateWindow::default(),
        }
    }

    /// Restrict the query to a date window.
    pub fn with_window(mut self, window: DateWindow) -> Self {
        self.window = window;
        self
    }

    /// Lightweight lookup used for suggestions: first page, fixed limit,
    /// no level filter and no date window.
    pub fn for_suggestions(text: &str) -> Self {
        Self::build(0, SUGGESTION_LIMIT, None, text)
    }

    /// Query string pairs in canonical order.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("skip", self.skip.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(level) = self.level {
            pairs.push(("level", level.as_str().to_string()));
        }
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        if let Some(since) = self.window.since {
            pairs.push(("start_date", since.format(BOUND_FORMAT).to_string()));
        }
        if let Some(until) = self.window.until {
            pairs.push(("end_date", until.format(BOUND_FORMAT).to_string()));
        }
        pairs
    }
}
