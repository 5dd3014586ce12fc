use super::{
    aggregate::AggregateResult, availability_map::AvailabilityMap, drag_paint::DragPainter,
    heat_level::HeatLevel, slot_key::SlotKey,
};
use chrono::{Days, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Organizer input for creating a [`ScheduleSession`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub title: String,
    pub start_date: NaiveDate,
    pub day_count: u32,
    pub start_hour: u8,
    pub end_hour: u8,
}

/// A submitted participant, frozen at submission time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    name: String,
    availability: AvailabilityMap,
}

impl Participant {
    pub fn name(&self) -> &str { &self.name }
    pub fn availability(&self) -> &AvailabilityMap { &self.availability }
}

/// One cell of the rendered heatmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatCell {
    pub key: SlotKey,
    pub count: usize,
    pub names: Vec<String>,
    pub level: HeatLevel,
}

/// A "when can everybody meet" poll over a day × hour grid.
///
/// Participants can only be appended; the session itself never changes otherwise.
/// Sessions are only built through [`ScheduleSession::new`], so the grid always
/// stays inside the calendar.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleSession {
    id: String,
    title: String,
    start_date: NaiveDate,
    day_count: u32,
    start_hour: u8,
    end_hour: u8,
    participants: Vec<Participant>,
}

impl ScheduleSession {
    /// Longest poll offered, in days.
    pub const MAX_DAYS: u32 = 31;
    const ID_LEN: usize = 5;
    const ID_ALPHABET: &'static [u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let title = config.title.trim();
        if title.is_empty() {
            return Err(SessionError::EmptyTitle);
        }
        if config.day_count == 0 {
            return Err(SessionError::NoDays);
        }
        if config.day_count > Self::MAX_DAYS {
            return Err(SessionError::TooManyDays);
        }
        if config.start_date.checked_add_days(Days::new(u64::from(config.day_count - 1))).is_none() {
            return Err(SessionError::DateOutOfRange);
        }
        if config.start_hour >= config.end_hour || config.end_hour > 24 {
            return Err(SessionError::InvalidHourRange);
        }
        Ok(Self {
            id: Self::generate_id(),
            title: title.to_string(),
            start_date: config.start_date,
            day_count: config.day_count,
            start_hour: config.start_hour,
            end_hour: config.end_hour,
            participants: Vec::new(),
        })
    }

    fn generate_id() -> String {
        let mut rng = rand::rng();
        (0..Self::ID_LEN)
            .map(|_| char::from(Self::ID_ALPHABET[rng.random_range(0..Self::ID_ALPHABET.len())]))
            .collect()
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn title(&self) -> &str { &self.title }
    pub fn start_date(&self) -> NaiveDate { self.start_date }
    pub fn day_count(&self) -> u32 { self.day_count }
    pub fn start_hour(&self) -> u8 { self.start_hour }
    pub fn end_hour(&self) -> u8 { self.end_hour }
    pub fn participants(&self) -> &[Participant] { &self.participants }

    /// Last date covered by the grid.
    pub fn end_date(&self) -> NaiveDate {
        self.start_date
            .checked_add_days(Days::new(u64::from(self.day_count.saturating_sub(1))))
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..u64::from(self.day_count)).map_while(|d| self.start_date.checked_add_days(Days::new(d)))
    }

    pub fn hours(&self) -> impl Iterator<Item = u8> + '_ { self.start_hour..self.end_hour }

    pub fn contains(&self, key: &SlotKey) -> bool {
        key.date() >= self.start_date
            && key.date() <= self.end_date()
            && key.hour() >= self.start_hour
            && key.hour() < self.end_hour
    }

    /// All slot keys of the grid, day by day, hour by hour.
    pub fn slot_universe(&self) -> Vec<SlotKey> {
        self.dates()
            .flat_map(|date| self.hours().filter_map(move |h| SlotKey::new(date, h).ok()))
            .collect()
    }

    /// Appends a participant by copying `availability`.
    ///
    /// Entries outside of the grid are dropped from the copy.
    pub fn join(&mut self, name: &str, availability: &AvailabilityMap) -> Result<(), SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        let frozen = availability.retained(|k| self.contains(k));
        self.participants.push(Participant { name: name.to_string(), availability: frozen });
        Ok(())
    }

    /// First participant with the given name, used to highlight a single person's slots.
    pub fn participant(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name == name)
    }

    pub fn aggregate(&self) -> AggregateResult { AggregateResult::from_participants(&self.participants) }

    /// Heatmap rows ordered by hour, each row holding one cell per date.
    pub fn heatmap(&self) -> Vec<Vec<HeatCell>> {
        let agg = self.aggregate();
        self.hours()
            .map(|hour| {
                self.dates()
                    .filter_map(|date| SlotKey::new(date, hour).ok())
                    .map(|key| HeatCell {
                        key,
                        count: agg.count(&key),
                        names: agg.names(&key).to_vec(),
                        level: agg.heat_level(&key),
                    })
                    .collect()
            })
            .collect()
    }
}

/// In-progress input of a participant before submission.
#[derive(Debug, Clone, Default)]
pub struct ParticipantDraft {
    availability: AvailabilityMap,
    painter: DragPainter,
}

impl ParticipantDraft {
    pub fn new() -> Self { Self::default() }

    pub fn availability(&self) -> &AvailabilityMap { &self.availability }

    pub fn pointer_down(&mut self, key: SlotKey) { self.painter.pointer_down(&mut self.availability, key); }

    pub fn pointer_enter(&mut self, key: SlotKey) { self.painter.pointer_enter(&mut self.availability, key); }

    pub fn pointer_up(&mut self) { self.painter.pointer_up(); }

    /// Submits the draft into `session` and starts over with an empty grid.
    pub fn submit(&mut self, session: &mut ScheduleSession, name: &str) -> Result<(), SessionError> {
        session.join(name, &self.availability)?;
        self.reset();
        Ok(())
    }

    pub fn reset(&mut self) {
        self.availability.clear();
        self.painter.pointer_up();
    }
}

#[derive(Debug, Display, Copy, Clone, PartialEq, Eq)]
pub enum SessionError {
    EmptyTitle,
    EmptyName,
    NoDays,
    TooManyDays,
    DateOutOfRange,
    InvalidHourRange,
}

impl std::error::Error for SessionError {}
