use super::{
    search_stream::{SearchError, SearchHandle, SearchPolicy, SearchSink, search_studios},
    studio::StudioSearchResult,
    transport::EventTransport,
};
use crate::http_handler::http_request::{request_common::RequestError, studio_search_get::StudioSearchRequest};
use chrono::NaiveDate;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Lifecycle of the visible result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Loading,
    Complete,
    /// The last search failed; the message is shown until dismissed.
    Failed(String),
}

impl SearchState {
    pub fn is_terminal(&self) -> bool { matches!(self, SearchState::Complete | SearchState::Failed(_)) }
}

type SharedResults = Arc<Mutex<Vec<StudioSearchResult>>>;

fn lock_results(results: &SharedResults) -> MutexGuard<'_, Vec<StudioSearchResult>> {
    results.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Appends every batch of the active search to the shared list.
struct ResultListSink {
    results: SharedResults,
    state_tx: Arc<watch::Sender<SearchState>>,
}

impl SearchSink for ResultListSink {
    fn on_data(&mut self, studios: Vec<StudioSearchResult>) { lock_results(&self.results).extend(studios); }

    fn on_complete(&mut self) { self.state_tx.send_replace(SearchState::Complete); }

    fn on_error(&mut self, error: SearchError) {
        self.state_tx.send_replace(SearchState::Failed(error.user_message().to_string()));
    }
}

/// Owns the result list shown to the user and the single active search.
///
/// Starting a search tears down the previous one before the list is cleared, so
/// results of different searches never mix.
pub struct SearchController {
    transport: Arc<dyn EventTransport>,
    policy: SearchPolicy,
    results: SharedResults,
    state_tx: Arc<watch::Sender<SearchState>>,
    active: Mutex<Option<SearchHandle>>,
}

impl SearchController {
    pub fn new(transport: Arc<dyn EventTransport>, policy: SearchPolicy) -> Self {
        let (tx, _) = watch::channel(SearchState::Idle);
        Self {
            transport,
            policy,
            results: Arc::new(Mutex::new(Vec::new())),
            state_tx: Arc::new(tx),
            active: Mutex::new(None),
        }
    }

    fn active(&self) -> MutexGuard<'_, Option<SearchHandle>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces any running search with a new one for `rooms` on `date`.
    pub fn start_search(&self, date: NaiveDate, rooms: Vec<String>) -> Result<(), RequestError> {
        let mut active = self.active();
        if let Some(prev) = active.take() {
            prev.cancel();
        }
        lock_results(&self.results).clear();
        self.state_tx.send_replace(SearchState::Loading);
        let sink = ResultListSink { results: Arc::clone(&self.results), state_tx: Arc::clone(&self.state_tx) };
        let request = StudioSearchRequest::new(date, rooms);
        match search_studios(self.transport.as_ref(), &request, self.policy, Box::new(sink)) {
            Ok(handle) => {
                *active = Some(handle);
                Ok(())
            }
            Err(e) => {
                self.state_tx.send_replace(SearchState::Idle);
                Err(e)
            }
        }
    }

    /// Tears down the active search, keeping whatever was already listed.
    pub fn cancel(&self) {
        if let Some(handle) = self.active().take() {
            handle.cancel();
        }
        self.state_tx.send_if_modified(|s| {
            if *s == SearchState::Loading {
                *s = SearchState::Idle;
                true
            } else {
                false
            }
        });
    }

    pub fn studios(&self) -> Vec<StudioSearchResult> { lock_results(&self.results).clone() }

    pub fn state(&self) -> SearchState { self.state_tx.borrow().clone() }

    /// Listed results together with the state they were read in.
    pub fn snapshot(&self) -> (Vec<StudioSearchResult>, SearchState) {
        let results = lock_results(&self.results);
        (results.clone(), self.state())
    }

    /// Watches state transitions, e.g. to await the end of a search.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> { self.state_tx.subscribe() }

    /// Clears a failure notification.
    pub fn dismiss_error(&self) {
        self.state_tx.send_if_modified(|s| {
            if matches!(s, SearchState::Failed(_)) {
                *s = SearchState::Idle;
                true
            } else {
                false
            }
        });
    }
}
