use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Random 128-bit identifier in lowercase hex.
pub(super) fn new_id() -> String { format!("{:032x}", rand::rng().random::<u128>()) }

/// Publicly visible part of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoUser {
    pub id: String,
    pub email: String,
    pub nickname: String,
    pub created_at: DateTime<Utc>,
}

/// Account record as persisted, including the argon2 password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    #[serde(flatten)]
    pub user: DemoUser,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Band {
    pub id: String,
    pub name: String,
    pub description: String,
    pub owner_id: String,
    pub member_ids: Vec<String>,
    pub invite_code: String,
    pub created_at: DateTime<Utc>,
}

impl Band {
    pub fn is_owner(&self, user_id: &str) -> bool { self.owner_id == user_id }

    /// Owner or joined member.
    pub fn includes(&self, user_id: &str) -> bool {
        self.is_owner(user_id) || self.member_ids.iter().any(|m| m == user_id)
    }

    /// Number of people in the band, owner included.
    pub fn size(&self) -> usize { self.member_ids.len() + 1 }
}

#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MemberRole {
    Owner,
    Member,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandMember {
    pub id: String,
    pub nickname: String,
    pub email: String,
    pub role: MemberRole,
}

/// A rehearsal or gig entry in a band's calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandSchedule {
    pub id: String,
    pub band_id: String,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub memo: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// User input for a new [`BandSchedule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDraft {
    pub band_id: String,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub memo: String,
}

/// Partial update of a [`BandSchedule`]; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePatch {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub memo: Option<String>,
}

impl SchedulePatch {
    pub(super) fn apply(self, schedule: &mut BandSchedule) {
        if let Some(title) = self.title {
            schedule.title = title;
        }
        if let Some(date) = self.date {
            schedule.date = date;
        }
        if let Some(start_time) = self.start_time {
            schedule.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            schedule.end_time = end_time;
        }
        if let Some(location) = self.location {
            schedule.location = location;
        }
        if let Some(memo) = self.memo {
            schedule.memo = memo;
        }
    }
}
