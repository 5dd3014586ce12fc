use super::response_common::{EventPayloadType, JSONEventPayloadType, ResponseError};
use crate::http_handler::http_handler_common::RawRoomAvailability;
use serde_json::Value;

/// One batch of the availability stream.
///
/// The wire format maps studio name → sub-room name → `{ "times": [..], "url": ".." }`.
/// Missing or mistyped `times`/`url` fields are treated as empty.
pub struct StudioSearchPayload {}

impl JSONEventPayloadType for StudioSearchPayload {}

impl EventPayloadType for StudioSearchPayload {
    type ParsedPayloadType = Vec<RawRoomAvailability>;

    fn parse_payload(data: &str) -> Result<Self::ParsedPayloadType, ResponseError> {
        let Value::Object(studios) = Self::decode_json(data)? else {
            return Err(ResponseError::MalformedPayload("expected an object of studios".to_string()));
        };
        let mut rooms = Vec::new();
        for (studio_name, studio_rooms) in &studios {
            let Value::Object(studio_rooms) = studio_rooms else {
                return Err(ResponseError::MalformedPayload(format!("rooms of {studio_name} are not an object")));
            };
            for (room_name, info) in studio_rooms {
                let times = info
                    .get("times")
                    .and_then(Value::as_array)
                    .map(|t| t.iter().filter_map(Value::as_str).map(String::from).collect::<Vec<_>>())
                    .unwrap_or_default();
                let url = info.get("url").and_then(Value::as_str).unwrap_or_default();
                rooms.push(RawRoomAvailability::new(studio_name, room_name, times, url));
            }
        }
        Ok(rooms)
    }
}
