use super::{
    fallback::generate_fallback,
    studio::StudioSearchResult,
    transport::{EventTransport, TransportEvent},
};
use crate::http_handler::{
    http_handler_common::RawRoomAvailability,
    http_request::{
        request_common::{HTTPRequestType, RequestError},
        studio_search_get::StudioSearchRequest,
    },
    http_response::response_common::EventPayloadType,
};
use crate::{error, event, search, warn};
use futures::{StreamExt, stream::BoxStream};
use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use strum_macros::Display;
use tokio_util::sync::CancellationToken;

/// Parser of the batches a search request streams back.
type BatchPayload = <StudioSearchRequest as HTTPRequestType>::Response;

/// Receives the results of one search.
///
/// `on_data` may be called any number of times, followed by at most one of
/// `on_complete`/`on_error`. Callbacks run while the search's delivery lock is held,
/// so implementations must not cancel their own search from inside a callback.
pub trait SearchSink: Send {
    fn on_data(&mut self, studios: Vec<StudioSearchResult>);
    fn on_complete(&mut self);
    fn on_error(&mut self, error: SearchError);
}

/// Adapts three closures to a [`SearchSink`].
pub struct SearchCallbacks<D, C, E> {
    on_data: D,
    on_complete: C,
    on_error: E,
}

impl<D, C, E> SearchCallbacks<D, C, E>
where
    D: FnMut(Vec<StudioSearchResult>) + Send,
    C: FnMut() + Send,
    E: FnMut(SearchError) + Send,
{
    pub fn new(on_data: D, on_complete: C, on_error: E) -> Self { Self { on_data, on_complete, on_error } }
}

impl<D, C, E> SearchSink for SearchCallbacks<D, C, E>
where
    D: FnMut(Vec<StudioSearchResult>) + Send,
    C: FnMut() + Send,
    E: FnMut(SearchError) + Send,
{
    fn on_data(&mut self, studios: Vec<StudioSearchResult>) { (self.on_data)(studios) }
    fn on_complete(&mut self) { (self.on_complete)() }
    fn on_error(&mut self, error: SearchError) { (self.on_error)(error) }
}

/// Terminal failure of a search that had already connected.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum SearchError {
    StreamInterrupted,
}

impl SearchError {
    /// Message suitable for a dismissable notification.
    pub fn user_message(&self) -> &'static str {
        match self {
            SearchError::StreamInterrupted => "Loading studio availability failed. Please search again.",
        }
    }
}

impl std::error::Error for SearchError {}

/// Tunables of the search lifecycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Time the transport gets to report an open connection before fallback data is used.
    connect_timeout: Duration,
}

impl SearchPolicy {
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

    pub fn new(connect_timeout: Duration) -> Self { Self { connect_timeout } }
    pub fn connect_timeout(&self) -> Duration { self.connect_timeout }
}

impl Default for SearchPolicy {
    fn default() -> Self { Self::new(Self::DEFAULT_CONNECT_TIMEOUT) }
}

/// Guards every callback: once closed, nothing reaches the sink anymore.
struct SinkGate {
    sink: Mutex<Option<Box<dyn SearchSink>>>,
}

impl SinkGate {
    fn new(sink: Box<dyn SearchSink>) -> Self { Self { sink: Mutex::new(Some(sink)) } }

    fn lock(&self) -> MutexGuard<'_, Option<Box<dyn SearchSink>>> {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_open(&self) -> bool { self.lock().is_some() }

    fn data(&self, studios: Vec<StudioSearchResult>) {
        if let Some(sink) = self.lock().as_mut() {
            sink.on_data(studios);
        }
    }

    fn complete(&self) {
        let mut guard = self.lock();
        if let Some(mut sink) = guard.take() {
            sink.on_complete();
        }
    }

    /// Delivers a last batch and completes without releasing the lock in between.
    fn data_and_complete(&self, studios: Vec<StudioSearchResult>) {
        let mut guard = self.lock();
        if let Some(mut sink) = guard.take() {
            sink.on_data(studios);
            sink.on_complete();
        }
    }

    fn fail(&self, error: SearchError) {
        let mut guard = self.lock();
        if let Some(mut sink) = guard.take() {
            sink.on_error(error);
        }
    }

    fn close(&self) { drop(self.lock().take()); }
}

/// Teardown handle of a running search.
pub struct SearchHandle {
    gate: Arc<SinkGate>,
    token: CancellationToken,
}

impl SearchHandle {
    /// Stops the search. No callback fires once this returns, even if the
    /// transport still delivers events.
    pub fn cancel(&self) {
        self.gate.close();
        self.token.cancel();
    }

    /// Whether the search may still invoke callbacks.
    pub fn is_active(&self) -> bool { self.gate.is_open() }
}

/// Starts a search for `request` on `transport` and reports to `sink`.
///
/// Must be called from within a tokio runtime. Fails only if the request cannot be
/// built; every later problem ends up in exactly one terminal callback.
pub fn search_studios(
    transport: &dyn EventTransport,
    request: &StudioSearchRequest,
    policy: SearchPolicy,
    sink: Box<dyn SearchSink>,
) -> Result<SearchHandle, RequestError> {
    let stream = transport.connect(request)?;
    let gate = Arc::new(SinkGate::new(sink));
    let token = CancellationToken::new();
    search!("Searching {} room(s) on {}", request.rooms().len(), request.date());
    let driver = SearchDriver {
        rooms: request.rooms().to_vec(),
        policy,
        gate: Arc::clone(&gate),
        next_index: 0,
    };
    tokio::spawn(driver.run(stream, token.clone()));
    Ok(SearchHandle { gate, token })
}

/// Per-search state living inside the spawned task.
struct SearchDriver {
    rooms: Vec<String>,
    policy: SearchPolicy,
    gate: Arc<SinkGate>,
    /// Running index over all delivered items, part of every result id.
    next_index: usize,
}

impl SearchDriver {
    async fn run(mut self, mut stream: BoxStream<'static, TransportEvent>, token: CancellationToken) {
        if self.rooms.is_empty() {
            self.gate.complete();
            return;
        }
        let deadline = tokio::time::sleep(self.policy.connect_timeout());
        tokio::pin!(deadline);
        let mut opened = false;
        loop {
            tokio::select! {
                biased;
                () = token.cancelled() => {
                    event!("Search cancelled");
                    return;
                }
                () = &mut deadline, if !opened => {
                    search!(
                        "No connection within {}ms, using fallback data",
                        self.policy.connect_timeout().as_millis()
                    );
                    self.deliver_fallback();
                    return;
                }
                next = stream.next() => {
                    if !self.handle_event(next, &mut opened) {
                        return;
                    }
                }
            }
        }
    }

    /// Processes one transport event, returns `false` once the search has terminated.
    fn handle_event(&mut self, next: Option<TransportEvent>, opened: &mut bool) -> bool {
        match next {
            Some(TransportEvent::Open) => {
                event!("Event stream open");
                *opened = true;
                true
            }
            Some(TransportEvent::Message(data)) => {
                event!("Received batch: {data}");
                *opened = true;
                match BatchPayload::parse_payload(&data) {
                    Ok(raw) => {
                        let studios = self.transform(&raw);
                        self.gate.data(studios);
                    }
                    Err(e) => warn!("Dropping malformed batch: {e}"),
                }
                true
            }
            Some(TransportEvent::Other(name)) => {
                event!("Ignoring event {name}");
                true
            }
            Some(TransportEvent::Done) => {
                search!("Search done after {} result(s)", self.next_index);
                self.gate.complete();
                false
            }
            Some(TransportEvent::Closed) | None if *opened => {
                search!("Event stream ended after {} result(s)", self.next_index);
                self.gate.complete();
                false
            }
            Some(TransportEvent::Closed) | None => {
                search!("Event stream ended before connecting, using fallback data");
                self.deliver_fallback();
                false
            }
            Some(TransportEvent::Error(e)) if *opened => {
                error!("Event stream failed: {e}");
                self.gate.fail(SearchError::StreamInterrupted);
                false
            }
            Some(TransportEvent::Error(e)) => {
                search!("Connection failed ({e}), using fallback data");
                self.deliver_fallback();
                false
            }
        }
    }

    fn transform(&mut self, raw: &[RawRoomAvailability]) -> Vec<StudioSearchResult> {
        raw.iter()
            .map(|r| {
                let studio = StudioSearchResult::from_raw(r, self.next_index);
                self.next_index += 1;
                studio
            })
            .collect()
    }

    fn deliver_fallback(&mut self) {
        let studios = self.transform(&generate_fallback(&self.rooms));
        self.gate.data_and_complete(studios);
    }
}
