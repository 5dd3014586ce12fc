use super::entry::{EntryDraft, EntryError, new_entry_id};
use crate::info;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Topic of a community post.
#[derive(
    Debug, Display, EnumIter, EnumString, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PostCategory {
    #[default]
    Free,
    Recruit,
    Gear,
    Gig,
    Question,
}

impl PostCategory {
    pub fn label(self) -> &'static str {
        match self {
            PostCategory::Free => "자유",
            PostCategory::Recruit => "멤버 구인",
            PostCategory::Gear => "장비 거래",
            PostCategory::Gig => "공연 정보",
            PostCategory::Question => "질문",
        }
    }

    /// Category for a stored value, unknown values are shown as [`PostCategory::Free`].
    pub fn lookup(value: &str) -> Self { value.parse().unwrap_or_default() }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub category: PostCategory,
    pub created_at: DateTime<Utc>,
    pub likes: u32,
    pub comments: u32,
}

/// The community board, newest post first.
#[derive(Debug, Clone, Default)]
pub struct PostBoard {
    posts: Vec<Post>,
}

impl PostBoard {
    pub fn new() -> Self { Self::default() }

    /// Board pre-filled with the welcome posts shown on a fresh install.
    pub fn with_samples(now: DateTime<Utc>) -> Self {
        let sample = |id: &str,
                      title: &str,
                      content: &str,
                      author: &str,
                      category: PostCategory,
                      age: TimeDelta,
                      likes: u32,
                      comments: u32| Post {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            author: author.to_string(),
            category,
            created_at: now - age,
            likes,
            comments,
        };
        Self {
            posts: vec![
                sample(
                    "1",
                    "홍대 근처 드러머 구합니다!",
                    "저희 밴드는 인디락 장르를 주로 하고 있고, 매주 토요일 합주합니다. 관심있으신 분 연락주세요!",
                    "기타리스트김",
                    PostCategory::Recruit,
                    TimeDelta::minutes(30),
                    5,
                    3,
                ),
                sample(
                    "2",
                    "펜더 스트랫 판매합니다",
                    "2020년식 펜더 아메리칸 프로페셔널 스트랫 판매합니다. 상태 최상급입니다.",
                    "베이시스트박",
                    PostCategory::Gear,
                    TimeDelta::hours(2),
                    12,
                    8,
                ),
                sample(
                    "3",
                    "이번 주 금요일 홍대 클럽 공연 있어요",
                    "저희 밴드 첫 공연이에요! 많이 와주세요 ㅎㅎ",
                    "보컬이",
                    PostCategory::Gig,
                    TimeDelta::hours(5),
                    24,
                    15,
                ),
            ],
        }
    }

    pub fn posts(&self) -> &[Post] { &self.posts }

    /// Publishes a trimmed copy of `draft` at the top of the board.
    pub fn submit(
        &mut self,
        draft: &EntryDraft,
        category: PostCategory,
        now: DateTime<Utc>,
    ) -> Result<&Post, EntryError> {
        let draft = draft.normalized()?;
        let post = Post {
            id: new_entry_id(),
            title: draft.title,
            content: draft.content,
            author: draft.author,
            category,
            created_at: now,
            likes: 0,
            comments: 0,
        };
        info!("New {category} post by {}", post.author);
        self.posts.insert(0, post);
        Ok(&self.posts[0])
    }

    /// Posts of one category, or all posts for `None`, in board order.
    pub fn filter_by(&self, category: Option<PostCategory>) -> Vec<&Post> {
        self.posts.iter().filter(|p| category.is_none_or(|c| p.category == c)).collect()
    }
}
