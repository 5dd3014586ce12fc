pub mod response_common;
pub mod studio_search;
