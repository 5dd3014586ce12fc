use super::entry::{EntryDraft, EntryError, new_entry_id};
use crate::info;
use chrono::{DateTime, TimeDelta, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Display, EnumIter, EnumString, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NoticeCategory {
    Update,
    Event,
    Notice,
    Maintenance,
}

impl NoticeCategory {
    pub fn label(self) -> &'static str {
        match self {
            NoticeCategory::Update => "업데이트",
            NoticeCategory::Event => "이벤트",
            NoticeCategory::Notice => "안내",
            NoticeCategory::Maintenance => "점검",
        }
    }

    /// Label for a stored value; values that are not a category are shown as they are.
    pub fn label_of(value: &str) -> &str {
        match value.parse::<Self>() {
            Ok(category) => category.label(),
            Err(_) => value,
        }
    }
}

/// An announcement by the operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub category: NoticeCategory,
    pub created_at: DateTime<Utc>,
    pub pinned: bool,
}

impl Notice {
    /// Publication date as `YYYY.MM.DD`.
    pub fn display_date(&self) -> String { self.created_at.format("%Y.%m.%d").to_string() }
}

#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self { Self::default() }

    /// Board with the launch announcements, the first one pinned.
    pub fn with_samples(now: DateTime<Utc>) -> Self {
        let sample = |id: &str, title: &str, content: &str, category: NoticeCategory, age: TimeDelta, pinned: bool| Notice {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            author: "관리자".to_string(),
            category,
            created_at: now - age,
            pinned,
        };
        Self {
            notices: vec![
                sample(
                    "1",
                    "밴드룸 서비스 오픈 안내",
                    "안녕하세요! 밴드룸 서비스가 정식 오픈했습니다. 많은 이용 부탁드립니다.",
                    NoticeCategory::Notice,
                    TimeDelta::hours(24),
                    true,
                ),
                sample(
                    "2",
                    "일정 조율 기능 추가",
                    "밴드 멤버들과 합주 시간을 조율할 수 있는 WhenToMeet 스타일 기능이 추가되었습니다.",
                    NoticeCategory::Update,
                    TimeDelta::hours(48),
                    false,
                ),
                sample(
                    "3",
                    "커뮤니티 게시판 오픈",
                    "밴드 멤버 구인, 장비 거래, 공연 정보 등을 공유할 수 있는 커뮤니티가 오픈했습니다.",
                    NoticeCategory::Update,
                    TimeDelta::hours(72),
                    false,
                ),
            ],
        }
    }

    /// Publishes an unpinned notice, checked against the editor limits.
    pub fn publish(
        &mut self,
        draft: &EntryDraft,
        category: NoticeCategory,
        now: DateTime<Utc>,
    ) -> Result<&Notice, EntryError> {
        let draft = draft.normalized()?;
        draft.check_lengths()?;
        let notice = Notice {
            id: new_entry_id(),
            title: draft.title,
            content: draft.content,
            author: draft.author,
            category,
            created_at: now,
            pinned: false,
        };
        info!("Published {category} notice {:?}", notice.title);
        self.notices.insert(0, notice);
        Ok(&self.notices[0])
    }

    pub fn set_pinned(&mut self, id: &str, pinned: bool) -> Result<(), EntryError> {
        let notice = self.notices.iter_mut().find(|n| n.id == id).ok_or(EntryError::NotFound)?;
        notice.pinned = pinned;
        Ok(())
    }

    /// Pinned notices first, newest first within each group.
    pub fn listing(&self) -> Vec<&Notice> {
        self.notices.iter().sorted_by_key(|n| (Reverse(n.pinned), Reverse(n.created_at))).collect()
    }
}
