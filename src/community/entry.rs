use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use strum_macros::Display;

/// Title, body and author as typed into the editor, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub title: String,
    pub content: String,
    pub author: String,
}

impl EntryDraft {
    const MAX_TITLE_LEN: usize = 100;
    const MAX_CONTENT_LEN: usize = 5000;
    const MAX_AUTHOR_LEN: usize = 20;

    pub fn new(title: &str, content: &str, author: &str) -> Self {
        Self { title: title.to_string(), content: content.to_string(), author: author.to_string() }
    }

    /// Trimmed copy of the draft, blank fields are rejected.
    pub(super) fn normalized(&self) -> Result<EntryDraft, EntryError> {
        let draft = EntryDraft::new(self.title.trim(), self.content.trim(), self.author.trim());
        if draft.title.is_empty() {
            Err(EntryError::MissingTitle)
        } else if draft.content.is_empty() {
            Err(EntryError::MissingContent)
        } else if draft.author.is_empty() {
            Err(EntryError::MissingAuthor)
        } else {
            Ok(draft)
        }
    }

    /// Editor limits, counted in characters.
    pub(super) fn check_lengths(&self) -> Result<(), EntryError> {
        if self.author.chars().count() > Self::MAX_AUTHOR_LEN {
            Err(EntryError::AuthorTooLong)
        } else if self.title.chars().count() > Self::MAX_TITLE_LEN {
            Err(EntryError::TitleTooLong)
        } else if self.content.chars().count() > Self::MAX_CONTENT_LEN {
            Err(EntryError::ContentTooLong)
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Display, Copy, Clone, PartialEq, Eq)]
pub enum EntryError {
    MissingTitle,
    MissingContent,
    MissingAuthor,
    TitleTooLong,
    ContentTooLong,
    AuthorTooLong,
    NotFound,
}

impl std::error::Error for EntryError {}

pub(super) fn new_entry_id() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::rng();
    (0..6).map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())])).collect()
}

/// Relative age of an entry: minutes, then hours, then days, and the plain
/// date once it is a week old. Timestamps in the future count as just now.
pub fn time_ago(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - created_at).max(TimeDelta::zero());
    if elapsed.num_minutes() < 60 {
        format!("{}분 전", elapsed.num_minutes())
    } else if elapsed.num_hours() < 24 {
        format!("{}시간 전", elapsed.num_hours())
    } else if elapsed.num_days() < 7 {
        format!("{}일 전", elapsed.num_days())
    } else {
        created_at.format("%-m월 %-d일").to_string()
    }
}
