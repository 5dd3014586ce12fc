use itertools::Itertools;

/// Availability of one sub-room of a studio as reported by a data source.
///
/// `times` holds unique labels in first-seen order. Labels are either `"HH:00"`
/// or bare hours (`"14"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRoomAvailability {
    studio: String,
    room: String,
    times: Vec<String>,
    url: String,
}

impl RawRoomAvailability {
    pub fn new(studio: &str, room: &str, times: impl IntoIterator<Item = String>, url: &str) -> Self {
        Self {
            studio: studio.to_string(),
            room: room.to_string(),
            times: times.into_iter().unique().collect(),
            url: url.to_string(),
        }
    }

    pub fn studio(&self) -> &str { &self.studio }
    pub fn room(&self) -> &str { &self.room }
    pub fn times(&self) -> &[String] { &self.times }
    pub fn url(&self) -> &str { &self.url }
}
