use super::time_slot::TimeSlot;
use crate::http_handler::http_handler_common::RawRoomAvailability;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One bookable sub-room with its availability for the searched date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudioSearchResult {
    id: String,
    name: String,
    room_name: String,
    full_label: String,
    time_slots: Vec<TimeSlot>,
    booking_url: String,
}

impl StudioSearchResult {
    /// Booking page used when a source does not provide one.
    pub const DEFAULT_BOOKING_URL: &'static str = "https://booking.naver.com";

    /// Transforms a raw record; `index` is the running position inside the search
    /// and keeps ids unique even for repeated studio/room pairs.
    pub fn from_raw(raw: &RawRoomAvailability, index: usize) -> Self {
        let full_label = format!("{}\n{}", raw.studio(), raw.room());
        let name = if raw.studio().is_empty() { full_label.clone() } else { raw.studio().to_string() };
        let booking_url =
            if raw.url().is_empty() { Self::DEFAULT_BOOKING_URL.to_string() } else { raw.url().to_string() };
        Self {
            id: format!("{}-{}-{index}", raw.studio(), raw.room()),
            name,
            room_name: raw.room().to_string(),
            full_label,
            time_slots: TimeSlot::materialize(raw.times()),
            booking_url,
        }
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn room_name(&self) -> &str { &self.room_name }
    pub fn full_label(&self) -> &str { &self.full_label }
    pub fn time_slots(&self) -> &[TimeSlot] { &self.time_slots }
    pub fn booking_url(&self) -> &str { &self.booking_url }

    pub fn available_times(&self) -> impl Iterator<Item = &str> {
        self.time_slots.iter().filter(|s| s.is_available()).map(TimeSlot::time)
    }
}

impl fmt::Display for StudioSearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let times: Vec<&str> = self.available_times().collect();
        write!(f, "{} / {} [{}] {}", self.name, self.room_name, times.join(" "), self.booking_url)
    }
}
