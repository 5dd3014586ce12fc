//! Community board posts and service notices.

mod entry;
mod notice;
mod post;


pub use entry::{EntryDraft, EntryError, time_ago};
pub use notice::{Notice, NoticeBoard, NoticeCategory};
pub use post::{Post, PostBoard, PostCategory};
