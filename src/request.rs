//! Request descriptors and parameter formatting.
//!
//! A [`RequestDescriptor`] is the canonical form of one API call before it is
//! dispatched: path template plus path, query, header, form and file
//! parameters and an optional body. Parameter values are rendered through
//! [`ParamValue`] so that numbers, booleans, dates and enums always have one
//! locale-independent string form.

use crate::error::{InfluxError, InfluxResult};
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};
use reqwest::Method;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const JSON_MIME: &str = "application/json";

/// Canonical string conversion for path, query and header parameters
pub trait ParamValue {
    fn to_param_string(&self) -> String;
}

impl ParamValue for str {
    fn to_param_string(&self) -> String {
        self.to_string()
    }
}

impl ParamValue for String {
    fn to_param_string(&self) -> String {
        self.clone()
    }
}

impl<T: ParamValue + ?Sized> ParamValue for &T {
    fn to_param_string(&self) -> String {
        (**self).to_param_string()
    }
}

impl ParamValue for bool {
    fn to_param_string(&self) -> String {
        let text = if *self { "true" } else { "false" };
        text.to_string()
    }
}

macro_rules! display_param {
    ($($ty:ty),*) => {
        $(
            impl ParamValue for $ty {
                fn to_param_string(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_param!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

impl ParamValue for DateTime<Utc> {
    fn to_param_string(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl ParamValue for DateTime<FixedOffset> {
    fn to_param_string(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::AutoSi, false)
    }
}

impl ParamValue for NaiveDate {
    fn to_param_string(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }
}

/// Render a serde-serializable enum through its wire name.
///
/// Values that serialize to something other than a JSON string fall back to
/// their compact JSON text.
pub fn serde_param<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(other) => other.to_string(),
        Err(_) => String::new(),
    }
}

/// True for `application/json` and any `*/*+json` media type
pub fn is_json_mime(mime: &str) -> bool {
    let essence = mime
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.split_once('/') {
        Some((_, subtype)) => essence == JSON_MIME || subtype.ends_with("+json"),
        None => false,
    }
}

/// Pick the Content-Type for a request body from the declared candidates
pub fn select_header_content_type(candidates: &[&str]) -> String {
    if candidates.is_empty() {
        return JSON_MIME.to_string();
    }

    candidates
        .iter()
        .find(|c| is_json_mime(c))
        .unwrap_or(&candidates[0])
        .to_string()
}

/// Pick the Accept header value from the declared candidates
pub fn select_header_accept(candidates: &[&str]) -> Option<String> {
    if candidates.is_empty() {
        return None;
    }

    match candidates.iter().find(|c| is_json_mime(c)) {
        Some(json) => Some(json.to_string()),
        None => Some(candidates.join(",")),
    }
}

/// Request payload
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Raw(Bytes),
}

/// File part of a multipart request
#[derive(Debug, Clone, PartialEq)]
pub struct FileParam {
    pub file_name: String,
    pub content: Bytes,
    pub content_type: Option<String>,
}

impl FileParam {
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Canonical description of one API request before dispatch
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path_template: String,
    pub path_params: HashMap<String, String>,
    /// Ordered; the same key may appear more than once
    pub query_params: Vec<(String, String)>,
    pub header_params: BTreeMap<String, String>,
    pub form_params: BTreeMap<String, String>,
    pub file_params: BTreeMap<String, FileParam>,
    pub body: Option<RequestBody>,
    pub content_type: String,
    pub accepts: Vec<String>,
}

impl RequestDescriptor {
    pub fn new(method: Method, path_template: impl Into<String>) -> Self {
        Self {
            method,
            path_template: path_template.into(),
            path_params: HashMap::new(),
            query_params: Vec::new(),
            header_params: BTreeMap::new(),
            form_params: BTreeMap::new(),
            file_params: BTreeMap::new(),
            body: None,
            content_type: JSON_MIME.to_string(),
            accepts: Vec::new(),
        }
    }

    pub fn path_param(mut self, name: &str, value: impl ParamValue) -> Self {
        self.path_params
            .insert(name.to_string(), value.to_param_string());
        self
    }

    pub fn query(mut self, name: &str, value: impl ParamValue) -> Self {
        self.query_params
            .push((name.to_string(), value.to_param_string()));
        self
    }

    /// Add a query parameter only when a value is present
    pub fn query_opt<T: ParamValue>(self, name: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    /// Add one query pair per item, keeping order and duplicates
    pub fn query_list<T: ParamValue>(mut self, name: &str, values: &[T]) -> Self {
        for value in values {
            self.query_params
                .push((name.to_string(), value.to_param_string()));
        }
        self
    }

    /// Set a header, replacing any existing header with the same name
    pub fn header(mut self, name: &str, value: impl ParamValue) -> Self {
        self.set_header(name, value.to_param_string());
        self
    }

    pub fn header_opt<T: ParamValue>(self, name: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.header(name, value),
            None => self,
        }
    }

    pub fn form_param(mut self, name: &str, value: impl ParamValue) -> Self {
        self.form_params
            .insert(name.to_string(), value.to_param_string());
        self
    }

    pub fn file_param(mut self, name: &str, file: FileParam) -> Self {
        self.file_params.insert(name.to_string(), file);
        self
    }

    /// Serialize `body` as the JSON payload
    pub fn json_body<T: Serialize>(mut self, body: &T) -> InfluxResult<Self> {
        self.body = Some(RequestBody::Json(serde_json::to_value(body)?));
        Ok(self)
    }

    pub fn raw_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(RequestBody::Raw(body.into()));
        self
    }

    /// Declare the content types the operation consumes
    pub fn content_types(mut self, candidates: &[&str]) -> Self {
        self.content_type = select_header_content_type(candidates);
        self
    }

    /// Declare the media types the operation produces
    pub fn accepts(mut self, candidates: &[&str]) -> Self {
        self.accepts = candidates.iter().map(|c| c.to_string()).collect();
        self
    }

    /// In-place variant of [`RequestDescriptor::header`]
    pub fn set_header(&mut self, name: &str, value: String) {
        self.header_params
            .retain(|existing, _| !existing.eq_ignore_ascii_case(name));
        self.header_params.insert(name.to_string(), value);
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.header_params
            .keys()
            .any(|existing| existing.eq_ignore_ascii_case(name))
    }

    /// Remove a header, matching the name case-insensitively
    pub fn remove_header(&mut self, name: &str) -> Option<String> {
        let key = self
            .header_params
            .keys()
            .find(|existing| existing.eq_ignore_ascii_case(name))
            .cloned()?;
        self.header_params.remove(&key)
    }

    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.header_params
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Merge default headers underneath the request's own headers
    pub(crate) fn merge_default_headers(&mut self, defaults: &BTreeMap<String, String>) {
        for (name, value) in defaults {
            if !self.has_header(name) {
                self.header_params.insert(name.clone(), value.clone());
            }
        }
    }

    /// Add the Accept header unless one is already present
    pub(crate) fn apply_accept(&mut self) {
        if self.has_header("Accept") {
            return;
        }
        let candidates: Vec<&str> = self.accepts.iter().map(String::as_str).collect();
        if let Some(accept) = select_header_accept(&candidates) {
            self.header_params.insert("Accept".to_string(), accept);
        }
    }

    /// Substitute `{name}` placeholders with percent-encoded path parameters
    pub fn resolve_path(&self) -> InfluxResult<String> {
        let mut resolved = String::with_capacity(self.path_template.len());
        let mut rest = self.path_template.as_str();

        while let Some(start) = rest.find('{') {
            let end = rest[start..].find('}').ok_or_else(|| {
                InfluxError::invalid_param(format!(
                    "Unterminated placeholder in path template {}",
                    self.path_template
                ))
            })? + start;
            let name = &rest[start + 1..end];
            let value = self.path_params.get(name).ok_or_else(|| {
                InfluxError::invalid_param(format!("Missing path parameter '{}'", name))
            })?;

            resolved.push_str(&rest[..start]);
            resolved.push_str(&urlencoding::encode(value));
            rest = &rest[end + 1..];
        }
        resolved.push_str(rest);

        Ok(resolved)
    }
}
