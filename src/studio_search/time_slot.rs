use serde::{Deserialize, Serialize};
use std::{collections::HashSet, sync::LazyLock};

/// First bookable hour of a rehearsal day.
pub const FIRST_HOUR: u8 = 10;
/// Last bookable hour label (midnight is written as `24:00`).
pub const LAST_HOUR: u8 = 24;

/// The fixed hourly labels `"10:00"` through `"24:00"`.
pub static ALL_TIME_SLOTS: LazyLock<Vec<String>> =
    LazyLock::new(|| (FIRST_HOUR..=LAST_HOUR).map(|h| format!("{h}:00")).collect());

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    time: String,
    available: bool,
}

impl TimeSlot {
    pub fn time(&self) -> &str { &self.time }
    pub fn is_available(&self) -> bool { self.available }

    /// Expands reported available times over the full label universe.
    ///
    /// A label counts as available when it is reported either verbatim or
    /// without its `":00"` suffix.
    pub fn materialize(available_times: &[String]) -> Vec<TimeSlot> {
        let reported: HashSet<&str> = available_times.iter().map(String::as_str).collect();
        ALL_TIME_SLOTS
            .iter()
            .map(|label| {
                let bare = label.strip_suffix(":00").unwrap_or(label);
                TimeSlot {
                    time: label.clone(),
                    available: reported.contains(label.as_str()) || reported.contains(bare),
                }
            })
            .collect()
    }
}
