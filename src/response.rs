use crate::error::{InfluxError, InfluxResult};
use crate::request::is_json_mime;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Undecoded result of one request execution
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("Content-Type")
    }

    /// Each `Set-Cookie` value, uncombined
    pub fn set_cookies(&self) -> impl Iterator<Item = &str> {
        self.header("Set-Cookie").into_iter().flat_map(|v| v.split('\n'))
    }
}

/// Response envelope: status, headers, decoded body and the raw payload
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    /// `None` when the resource is absent or the response was not a success
    pub data: Option<T>,
    pub raw: Bytes,
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Decode a raw response according to its Content-Type
    pub fn from_raw(raw: RawResponse) -> InfluxResult<Self> {
        let data = deserialize::<T>(&raw)?;

        Ok(Self {
            status_code: raw.status,
            headers: raw.headers,
            data,
            raw: raw.body,
        })
    }
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResponse<U> {
        ApiResponse {
            status_code: self.status_code,
            headers: self.headers,
            data: self.data.map(f),
            raw: self.raw,
        }
    }
}

/// Decode the body of `raw` into `T`.
///
/// Empty payloads, 204/404 and any other non-2xx status decode to `None`.
pub fn deserialize<T: DeserializeOwned>(raw: &RawResponse) -> InfluxResult<Option<T>> {
    if !raw.is_success() || raw.status == 204 || raw.body.is_empty() {
        return Ok(None);
    }

    let content_type = raw.content_type().unwrap_or_default();
    let decoded = if content_type.is_empty() || is_json_mime(content_type) {
        serde_json::from_slice::<T>(&raw.body)
    } else if content_type.trim_start().to_ascii_lowercase().starts_with("text/") {
        let text = String::from_utf8_lossy(&raw.body).into_owned();
        serde_json::from_value::<T>(serde_json::Value::String(text))
    } else {
        return Err(InfluxError::UnsupportedContentType(content_type.to_string()));
    };

    decoded.map(Some).map_err(|e| InfluxError::Deserialize {
        status: raw.status,
        message: e.to_string(),
        body: raw.body.clone(),
    })
}
