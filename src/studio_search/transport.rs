use crate::event;
use crate::http_handler::{
    http_client::HTTPClient,
    http_request::{request_common::{HTTPRequestType, RequestError}, studio_search_get::StudioSearchRequest},
    http_response::response_common::ResponseError,
};
use futures::{StreamExt, stream::BoxStream};
use reqwest_eventsource::{Event, EventSource, retry::Never};
use std::sync::Arc;

/// Transport-level occurrences of a push source, already stripped of protocol details.
#[derive(Debug)]
pub enum TransportEvent {
    /// The connection has been established.
    Open,
    /// A default (unnamed) event with its raw data.
    Message(String),
    /// The server signalled the end of the result stream.
    Done,
    /// The server closed the stream without a `done` event.
    Closed,
    /// A named event this client does not handle.
    Other(String),
    Error(ResponseError),
}

/// Opens push streams for availability searches.
pub trait EventTransport: Send + Sync {
    fn connect(&self, request: &StudioSearchRequest) -> Result<BoxStream<'static, TransportEvent>, RequestError>;
}

/// Server-sent events over HTTP.
pub struct SseTransport {
    client: Arc<HTTPClient>,
}

impl SseTransport {
    /// Name of the event closing a search stream.
    const DONE_EVENT: &'static str = "done";
    const MESSAGE_EVENT: &'static str = "message";

    pub(crate) fn new(client: Arc<HTTPClient>) -> Self { Self { client } }

    fn map_event(res: Result<Event, reqwest_eventsource::Error>) -> TransportEvent {
        match res {
            Ok(Event::Open) => TransportEvent::Open,
            Ok(Event::Message(msg)) if msg.event == Self::DONE_EVENT => TransportEvent::Done,
            Ok(Event::Message(msg)) if msg.event == Self::MESSAGE_EVENT || msg.event.is_empty() => {
                TransportEvent::Message(msg.data)
            }
            Ok(Event::Message(msg)) => TransportEvent::Other(msg.event),
            Err(reqwest_eventsource::Error::StreamEnded) => TransportEvent::Closed,
            Err(e) => TransportEvent::Error(e.into()),
        }
    }
}

impl EventTransport for SseTransport {
    fn connect(&self, request: &StudioSearchRequest) -> Result<BoxStream<'static, TransportEvent>, RequestError> {
        let builder = request.request_builder(&self.client)?;
        let url = request.url(self.client.url())?;
        event!("Opening event stream {url}");
        let mut source = EventSource::new(builder).map_err(|_| RequestError::Unclonable)?;
        // One search consumes exactly one stream, no reconnects.
        source.set_retry_policy(Box::new(Never));
        Ok(source.map(Self::map_event).boxed())
    }
}
