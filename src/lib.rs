/*
 * InfluxDB API client - typed client for the InfluxDB v2 HTTP API
 */

// Internal modules
mod apis;
mod auth;
pub mod blocking;
mod client;
mod config;
mod error;
mod exception;
pub mod models; // Make models public
pub mod operations;
mod request;
mod response;
pub mod transport;

// Re-export public types and interfaces
pub use apis::*;
pub use auth::{Authentication, BasicAuth, BearerAuth, NoAuth, QueryTokenAuth, TokenAuth};
pub use client::{CallOptions, InfluxClient};
pub use config::{Configuration, ConfigurationBuilder};
pub use error::{ApiException, InfluxError, InfluxResult};
pub use exception::{exception_from_response, ErrorPolicy, ExceptionFactory, ExceptionFactorySlot};
pub use models::*;
pub use request::{
    is_json_mime, select_header_accept, select_header_content_type, serde_param, FileParam,
    ParamValue, RequestBody, RequestDescriptor,
};
pub use response::{ApiResponse, RawResponse};
pub use tokio_util::sync::CancellationToken;

// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ApiResponse, CallOptions, CancellationToken, Configuration, ErrorPolicy,
        ExceptionFactory, InfluxClient, InfluxError, InfluxResult, TokenAuth,
        // Common model types
        Organization, Organizations, PostOrganizationRequest, TelegrafPlugins, User,
    };
}
