use strum_macros::Display;

/// Parses the `data` field of a single server-sent event.
pub(crate) trait EventPayloadType {
    type ParsedPayloadType;
    fn parse_payload(data: &str) -> Result<Self::ParsedPayloadType, ResponseError>;
}

/// JSON payloads that may arrive either as an object or as a JSON string
/// holding the encoded object.
pub(crate) trait JSONEventPayloadType: EventPayloadType {
    fn decode_json(data: &str) -> Result<serde_json::Value, ResponseError> {
        match serde_json::from_str::<serde_json::Value>(data)? {
            serde_json::Value::String(inner) => Ok(serde_json::from_str(&inner)?),
            value => Ok(value),
        }
    }
}

#[derive(Debug, Display)]
pub enum ResponseError {
    InternalServer,
    BadRequest(u16),
    NoConnection,
    MalformedPayload(String),
    Unknown,
}

impl std::error::Error for ResponseError {}

impl From<reqwest::Error> for ResponseError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() || value.is_connect() {
            ResponseError::NoConnection
        } else if let Some(status) = value.status() {
            Self::from_status(status)
        } else {
            ResponseError::Unknown
        }
    }
}

impl From<serde_json::Error> for ResponseError {
    fn from(value: serde_json::Error) -> Self { ResponseError::MalformedPayload(value.to_string()) }
}

impl From<reqwest_eventsource::Error> for ResponseError {
    fn from(value: reqwest_eventsource::Error) -> Self {
        match value {
            reqwest_eventsource::Error::Transport(e) => e.into(),
            reqwest_eventsource::Error::InvalidStatusCode(status, _) => Self::from_status(status),
            reqwest_eventsource::Error::Utf8(e) => ResponseError::MalformedPayload(e.to_string()),
            reqwest_eventsource::Error::Parser(e) => ResponseError::MalformedPayload(e.to_string()),
            _ => ResponseError::Unknown,
        }
    }
}

impl ResponseError {
    fn from_status(status: reqwest::StatusCode) -> Self {
        if status.is_server_error() {
            ResponseError::InternalServer
        } else if status.is_client_error() {
            ResponseError::BadRequest(status.as_u16())
        } else {
            ResponseError::Unknown
        }
    }
}
