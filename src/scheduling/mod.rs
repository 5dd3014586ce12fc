//! This module provides the group scheduling components: availability grids,
//! drag painting and the aggregation of all participants into a heatmap.

mod aggregate;
mod availability_map;
mod drag_paint;
mod heat_level;
mod session;
mod slot_key;

#[cfg(test)]
mod tests;

pub use aggregate::AggregateResult;
pub use availability_map::AvailabilityMap;
pub use drag_paint::DragPainter;
pub use heat_level::HeatLevel;
pub use session::{HeatCell, Participant, ParticipantDraft, ScheduleSession, SessionConfig, SessionError};
pub use slot_key::{SlotKey, SlotKeyError};
