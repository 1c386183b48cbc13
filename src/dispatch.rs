//! Background execution of fetches.
//!
//! Every request carries a ticket from its stream's [`RequestSequence`].
//! Workers report back over a channel in completion order; the receiver
//! applies an outcome only if its ticket is still the latest issued, which
//! turns completion order back into issue order.

use crate::fetcher::{FetchError, LogFetcher};
use crate::model::LogPage;
use crate::query::LogQuery;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

/// Independent request streams. Neither cancels or blocks the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Page,
    Suggestions,
}

/// Monotonic ticket counter for one stream.
#[derive(Debug, Default, Clone)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket, superseding every earlier one.
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Supersede outstanding tickets without issuing a request.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        ticket == self.latest
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub stream: Stream,
    pub ticket: u64,
    pub query: LogQuery,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub stream: Stream,
    pub ticket: u64,
    pub result: Result<LogPage, FetchError>,
}

/// Starts a fetch without waiting for it.
pub trait Dispatch {
    fn dispatch(&mut self, request: FetchRequest);
}

/// Runs each request on its own worker thread and reports on a channel.
pub struct ThreadDispatcher {
    fetcher: Arc<dyn LogFetcher>,
    tx: Sender<FetchOutcome>,
}

impl ThreadDispatcher {
    /// Create a dispatcher and the receiver the UI loop drains.
    pub fn new(fetcher: Arc<dyn LogFetcher>) -> (Self, Receiver<FetchOutcome>) {
        let (tx, rx) = channel();
        (Self { fetcher, tx }, rx)
    }
}

impl Dispatch for ThreadDispatcher {
    fn dispatch(&mut self, request: FetchRequest) {
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();

        tracing::debug!(
            stream = ?request.stream,
            ticket = request.ticket,
            pairs = ?request.query.to_pairs(),
            "issuing fetch"
        );

        thread::spawn(move || {
            let FetchRequest {
                stream,
                ticket,
                query,
            } = request;

            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                fetcher.fetch_page(&query)
            }))
            .unwrap_or_else(|_| Err(FetchError::Transport("fetch thread panicked".to_string())));

            // Receiver gone means the view is shutting down.
            let _ = tx.send(FetchOutcome {
                stream,
                ticket,
                result,
            });
        });
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct FixedFetcher(usize);

    impl LogFetcher for FixedFetcher {
        fn fetch_page(&self, _query: &LogQuery) -> Result<LogPage, FetchError> {
            Ok(LogPage {
                items: Vec::new(),
                total: self.0,
            })
        }
    }

    struct PanickingFetcher;

    impl LogFetcher for PanickingFetcher {
        fn fetch_page(&self, _query: &LogQuery) -> Result<LogPage, FetchError> {
            panic!("boom");
        }
    }

    fn request(ticket: u64) -> FetchRequest {
        FetchRequest {
            stream: Stream::Page,
            ticket,
            query: LogQuery::build(0, 10, None, ""),
        }
    }

    #[test]
    fn test_sequence_only_latest_is_current() {
        let mut seq = RequestSequence::new();
        let a = seq.issue();
        let b = seq.issue();
        assert!(!seq.is_latest(a));
        assert!(seq.is_latest(b));
        seq.invalidate();
        assert!(!seq.is_latest(b));
    }

    #[test]
    fn test_thread_dispatcher_reports_outcome() {
        let (mut dispatcher, rx) = ThreadDispatcher::new(Arc::new(FixedFetcher(42)));
        dispatcher.dispatch(request(3));

        let outcome = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(outcome.stream, Stream::Page);
        assert_eq!(outcome.ticket, 3);
        assert_eq!(outcome.result.unwrap().total, 42);
    }

    #[test]
    fn test_thread_dispatcher_survives_fetcher_panic() {
        let (mut dispatcher, rx) = ThreadDispatcher::new(Arc::new(PanickingFetcher));
        dispatcher.dispatch(request(1));

        let outcome = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(outcome.result, Err(FetchError::Transport(_))));
    }
}
