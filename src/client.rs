use crate::{
    apis::{OrganizationsApi, TelegrafPluginsApi, UsersApi},
    config::Configuration,
    error::{InfluxError, InfluxResult},
    operations::Operation,
    request::{RequestBody, RequestDescriptor},
    response::{ApiResponse, RawResponse},
    transport::{execute_cancellable, PreparedBody, PreparedRequest, ReqwestTransport, Transport},
};
use bytes::Bytes;
use log::{debug, warn};
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Main InfluxDB API client
#[derive(Clone)]
pub struct InfluxClient {
    config: Arc<Configuration>,
    transport: Arc<dyn Transport>,
}

impl InfluxClient {
    /// Create a client using the default reqwest transport
    pub fn new(config: Configuration) -> InfluxResult<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client with a custom transport
    pub fn with_transport(config: Configuration, transport: impl Transport + 'static) -> Self {
        Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Get the base URL
    pub fn base_path(&self) -> &Url {
        self.config.base_url()
    }

    /// Kept for source compatibility; the base URL is fixed at construction.
    #[deprecated(note = "the base URL is fixed at construction; build a new client instead")]
    pub fn set_base_path(&self, base_path: &str) {
        warn!(
            "set_base_path({}) ignored; base URL stays {}",
            base_path,
            self.config.base_url()
        );
    }

    /// Get Telegraf plugins API
    pub fn telegraf_plugins(&self) -> TelegrafPluginsApi<'_> {
        TelegrafPluginsApi::new(self)
    }

    /// Get Organizations API
    pub fn organizations(&self) -> OrganizationsApi<'_> {
        OrganizationsApi::new(self)
    }

    /// Get Users API
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    /// Resolve a descriptor into a wire request: default headers, Accept,
    /// credentials, URL and body encoding
    pub async fn prepare(&self, mut request: RequestDescriptor) -> InfluxResult<PreparedRequest> {
        request.merge_default_headers(self.config.default_headers());
        request.apply_accept();
        self.config.auth().apply_auth(&mut request).await?;

        // Content-Type belongs to the body; a header override replaces the negotiated one
        if let Some(content_type) = request.remove_header(CONTENT_TYPE.as_str()) {
            request.content_type = content_type;
        }
        let headers = Self::prepare_headers(&request)?;

        let url = self.build_url(&request)?;
        let body = Self::prepare_body(&mut request)?;

        Ok(PreparedRequest {
            method: request.method,
            url,
            headers,
            body,
        })
    }

    fn prepare_headers(request: &RequestDescriptor) -> InfluxResult<Vec<(String, String)>> {
        request
            .header_params
            .iter()
            .map(|(name, value)| {
                HeaderName::from_bytes(name.as_bytes())
                    .map_err(|_| InfluxError::invalid_param(format!("Invalid header name: {:?}", name)))?;
                HeaderValue::from_str(value).map_err(|_| {
                    InfluxError::invalid_param(format!("Invalid value for header {}", name))
                })?;
                Ok((name.clone(), value.clone()))
            })
            .collect()
    }

    fn build_url(&self, request: &RequestDescriptor) -> InfluxResult<Url> {
        let base = self.config.base_url();
        let path = request.resolve_path()?;

        let mut url = base.clone();
        url.set_path(&format!("{}{}", base.path().trim_end_matches('/'), path));
        url.set_query(None);
        if !request.query_params.is_empty() {
            url.query_pairs_mut().extend_pairs(
                request
                    .query_params
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            );
        }

        Ok(url)
    }

    fn prepare_body(request: &mut RequestDescriptor) -> InfluxResult<PreparedBody> {
        let fields: Vec<(String, String)> = std::mem::take(&mut request.form_params)
            .into_iter()
            .collect();
        let files: Vec<_> = std::mem::take(&mut request.file_params)
            .into_iter()
            .collect();

        if !files.is_empty() {
            return Ok(PreparedBody::Multipart { fields, files });
        }
        if !fields.is_empty() {
            return Ok(PreparedBody::Form(fields));
        }

        Ok(match request.body.take() {
            None => PreparedBody::Empty,
            Some(RequestBody::Json(value)) => PreparedBody::Bytes {
                content_type: request.content_type.clone(),
                data: Bytes::from(serde_json::to_vec(&value)?),
            },
            Some(RequestBody::Raw(data)) => PreparedBody::Bytes {
                content_type: request.content_type.clone(),
                data,
            },
        })
    }

    /// Dispatch a request and return the undecoded response
    pub async fn call_api(
        &self,
        operation: &str,
        request: RequestDescriptor,
        cancel: Option<&CancellationToken>,
    ) -> InfluxResult<RawResponse> {
        let prepared = self.prepare(request).await?;
        debug!("{}: HTTP {} {}", operation, prepared.method, prepared.url);

        let response = execute_cancellable(self.transport.as_ref(), prepared, cancel)
            .await
            .inspect_err(|e| warn!("{} failed: {}", operation, e))?;
        debug!("{}: HTTP {} ({} bytes)", operation, response.status, response.body.len());

        Ok(response)
    }

    /// Run one operation: dispatch, consult the exception factory, decode.
    ///
    /// A response the factory does not raise is returned as an envelope,
    /// whatever its status code.
    pub async fn invoke_with_http_info<T>(
        &self,
        operation: &Operation,
        request: RequestDescriptor,
        cancel: Option<&CancellationToken>,
    ) -> InfluxResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let response = self.call_api(operation.name, request, cancel).await?;

        if let Some(exception) = self.config.exceptions().map(operation.name, &response) {
            debug!("{}: raising {}", operation.name, exception);
            return Err(InfluxError::Api(exception));
        }

        ApiResponse::from_raw(response)
    }

    /// Like [`invoke_with_http_info`](Self::invoke_with_http_info), returning only the body
    pub async fn invoke<T>(
        &self,
        operation: &Operation,
        request: RequestDescriptor,
        cancel: Option<&CancellationToken>,
    ) -> InfluxResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        self.invoke_with_http_info(operation, request, cancel)
            .await
            .map(ApiResponse::into_data)
    }
}

impl std::fmt::Debug for InfluxClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InfluxClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Per-call options shared by every facade method
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Forwarded verbatim as the `Zap-Trace-Span` header
    pub zap_trace_span: Option<String>,
    pub cancel: Option<CancellationToken>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trace_span(mut self, span: impl Into<String>) -> Self {
        self.zap_trace_span = Some(span.into());
        self
    }

    pub fn cancel_with(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub(crate) fn token(&self) -> Option<&CancellationToken> {
        self.cancel.as_ref()
    }
}
