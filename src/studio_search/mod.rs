//! Incremental availability search: a push stream of result batches with a
//! time-boxed fallback to substitute data.

mod fallback;
mod search_controller;
mod search_stream;
mod studio;
mod time_slot;
mod transport;


pub use fallback::{generate_fallback, generate_fallback_with, known_studios};
pub use search_controller::{SearchController, SearchState};
pub use search_stream::{SearchCallbacks, SearchError, SearchHandle, SearchPolicy, SearchSink, search_studios};
pub use studio::StudioSearchResult;
pub use time_slot::{ALL_TIME_SLOTS, TimeSlot};
pub use transport::{EventTransport, SseTransport, TransportEvent};
