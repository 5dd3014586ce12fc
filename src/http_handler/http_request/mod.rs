pub mod request_common;
pub mod studio_search_get;
