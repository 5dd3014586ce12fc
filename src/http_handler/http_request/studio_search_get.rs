use super::request_common::{HTTPRequestMethod, HTTPRequestType};
use crate::http_handler::http_response::studio_search::StudioSearchPayload;
use chrono::NaiveDate;

/// Request type for the `/search1-sse` availability event stream.
#[derive(Debug, Clone)]
pub struct StudioSearchRequest {
    date: NaiveDate,
    rooms: Vec<String>,
}

impl StudioSearchRequest {
    pub fn new(date: NaiveDate, rooms: Vec<String>) -> Self { Self { date, rooms } }
    pub fn date(&self) -> NaiveDate { self.date }
    pub fn rooms(&self) -> &[String] { &self.rooms }
}

impl HTTPRequestType for StudioSearchRequest {
    /// Type of the expected event payloads.
    type Response = StudioSearchPayload;
    fn endpoint(&self) -> &'static str { "/search1-sse" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
    fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![("date", self.date.format("%Y-%m-%d").to_string()), ("rooms", self.rooms.join(","))]
    }
}
