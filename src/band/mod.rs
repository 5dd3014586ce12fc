//! Bands, their shared calendars and the demo accounts behind them.

mod auth_controller;
mod band_controller;
mod band_repository;
mod model;

#[cfg(test)]
mod tests;

pub use auth_controller::AuthController;
pub use band_controller::BandController;
pub use band_repository::{BandRepository, BandStore, InMemoryBandRepository, JsonFileBandRepository, RepositoryError};
pub use model::{Band, BandMember, BandSchedule, DemoUser, MemberRole, ScheduleDraft, SchedulePatch};

use strum_macros::Display;

#[derive(Debug, Display)]
pub enum BandError {
    NotSignedIn,
    MissingField,
    WeakPassword,
    EmailTaken,
    InvalidCredentials,
    InvalidInviteCode,
    AlreadyMember,
    NotMember,
    NotOwner,
    OwnerCannotLeave,
    NotFound,
    Hash(String),
    Repository(RepositoryError),
}

impl std::error::Error for BandError {}

impl From<RepositoryError> for BandError {
    fn from(value: RepositoryError) -> Self { BandError::Repository(value) }
}
