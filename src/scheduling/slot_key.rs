use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use strum_macros::Display;

/// Identifies one hour-wide cell of a scheduling grid.
///
/// The string form is `YYYY-MM-DD-H` (hour without zero padding), which is also
/// the serialized representation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    date: NaiveDate,
    hour: u8,
}

impl SlotKey {
    /// Creates a new key, hours are restricted to `0..24`.
    pub fn new(date: NaiveDate, hour: u8) -> Result<Self, SlotKeyError> {
        if hour >= 24 {
            return Err(SlotKeyError::HourOutOfRange);
        }
        Ok(Self { date, hour })
    }

    pub fn date(&self) -> NaiveDate { self.date }
    pub fn hour(&self) -> u8 { self.hour }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.date.format("%Y-%m-%d"), self.hour)
    }
}

impl FromStr for SlotKey {
    type Err = SlotKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (date_str, hour_str) = s.rsplit_once('-').ok_or(SlotKeyError::Malformed)?;
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| SlotKeyError::Malformed)?;
        let hour = hour_str.parse::<u8>().map_err(|_| SlotKeyError::Malformed)?;
        Self::new(date, hour)
    }
}

impl Serialize for SlotKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Display, Copy, Clone, PartialEq, Eq)]
pub enum SlotKeyError {
    Malformed,
    HourOutOfRange,
}

impl std::error::Error for SlotKeyError {}
