use crate::http_handler::{http_client::HTTPClient, http_response::response_common::EventPayloadType};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use strum_macros::Display;

/// Characters left unescaped in query values, the same set browsers keep in `encodeURIComponent`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// HTTP methods used by the search backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum HTTPRequestMethod {
    Get,
}

pub(crate) trait HTTPRequestType {
    /// Parser for whatever the endpoint sends back.
    type Response: EventPayloadType;
    /// `str` object representing the specific endpoint.
    fn endpoint(&self) -> &'static str;
    /// The corresponding HTTP Request Method.
    fn request_method(&self) -> HTTPRequestMethod;
    /// Query string parameters, appended in order and percent-encoded (spaces become `%20`).
    fn query_params(&self) -> Vec<(&'static str, String)> { Vec::new() }

    /// Joins `base_url`, the endpoint and the encoded query parameters.
    fn url(&self, base_url: &str) -> Result<reqwest::Url, RequestError> {
        let mut raw = format!("{}{}", base_url.trim_end_matches('/'), self.endpoint());
        for (i, (key, value)) in self.query_params().iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            raw.push_str(&format!("{sep}{key}={}", utf8_percent_encode(value, QUERY_VALUE)));
        }
        reqwest::Url::parse(&raw).map_err(|_| RequestError::InvalidUrl(raw))
    }

    /// Prepares a request against `client` without sending it.
    fn request_builder(&self, client: &HTTPClient) -> Result<reqwest::RequestBuilder, RequestError> {
        let url = self.url(client.url())?;
        Ok(match self.request_method() {
            HTTPRequestMethod::Get => client.client().get(url),
        })
    }
}

#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum RequestError {
    InvalidUrl(String),
    Unclonable,
}

impl std::error::Error for RequestError {}
