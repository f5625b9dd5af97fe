//! Exception factory hook.
//!
//! After every dispatch the client hands the raw response to the registered
//! [`ExceptionFactory`]. A `Some` result is returned to the caller as
//! [`InfluxError::Api`]; `None` lets the envelope through as ordinary data,
//! including 4xx/5xx responses. With no factory registered nothing is ever
//! raised, so callers that keep the default must inspect
//! [`ApiResponse::status_code`](crate::ApiResponse) themselves.
//!
//! The slot holds at most one handler. Registering a second one is a
//! configuration error; use [`ExceptionFactorySlot::replace`] to swap.

use crate::error::{ApiException, InfluxError, InfluxResult};
use crate::models::ErrorResponse;
use crate::response::RawResponse;
use std::sync::Arc;

type ExceptionFn = dyn Fn(&str, &RawResponse) -> Option<ApiException> + Send + Sync;

/// Maps `(operation name, raw response)` to an optional typed error
#[derive(Clone)]
pub struct ExceptionFactory {
    handler: Arc<ExceptionFn>,
}

impl ExceptionFactory {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&str, &RawResponse) -> Option<ApiException> + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Factory that never raises
    pub fn never() -> Self {
        Self::new(|_, _| None)
    }

    /// Raise for every status >= 400
    pub fn raise_for_status() -> Self {
        Self::new(|operation, response| {
            if response.status >= 400 {
                Some(exception_from_response(operation, response))
            } else {
                None
            }
        })
    }

    /// Raise only for the listed status codes
    pub fn for_statuses(statuses: &[u16]) -> Self {
        let statuses = statuses.to_vec();
        Self::new(move |operation, response| {
            if statuses.contains(&response.status) {
                Some(exception_from_response(operation, response))
            } else {
                None
            }
        })
    }

    pub fn map(&self, operation: &str, response: &RawResponse) -> Option<ApiException> {
        (self.handler)(operation, response)
    }
}

impl std::fmt::Debug for ExceptionFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ExceptionFactory")
    }
}

/// Build an [`ApiException`] using the server's `{code, message}` body when present
pub fn exception_from_response(operation: &str, response: &RawResponse) -> ApiException {
    let message = serde_json::from_slice::<ErrorResponse>(&response.body)
        .ok()
        .and_then(|err| err.message.or(err.code))
        .unwrap_or_else(|| format!("HTTP {}", response.status));

    ApiException::new(
        operation,
        response.status,
        response.headers.clone(),
        response.body.clone(),
        message,
    )
}

/// How non-2xx responses are surfaced when no custom factory is installed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Return every response as data; the caller checks the status code
    #[default]
    SoftFail,
    /// Raise an [`ApiException`] for every status >= 400
    RaiseForStatus,
}

/// Single-handler slot for the exception factory
#[derive(Debug, Clone, Default)]
pub struct ExceptionFactorySlot {
    handler: Option<ExceptionFactory>,
}

impl ExceptionFactorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a handler into an empty slot
    pub fn register(&mut self, factory: ExceptionFactory) -> InfluxResult<()> {
        if self.handler.is_some() {
            return Err(InfluxError::config_error(
                "An exception factory is already registered; composing handlers is unsupported",
            ));
        }
        self.handler = Some(factory);
        Ok(())
    }

    /// Swap the handler, returning the previous one
    pub fn replace(&mut self, factory: ExceptionFactory) -> Option<ExceptionFactory> {
        self.handler.replace(factory)
    }

    pub fn clear(&mut self) -> Option<ExceptionFactory> {
        self.handler.take()
    }

    pub fn is_registered(&self) -> bool {
        self.handler.is_some()
    }

    /// Run the handler; an empty slot never raises
    pub fn map(&self, operation: &str, response: &RawResponse) -> Option<ApiException> {
        self.handler
            .as_ref()
            .and_then(|factory| factory.map(operation, response))
    }
}
