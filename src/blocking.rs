//! Blocking client.
//!
//! [`BlockingClient`] owns a current-thread tokio runtime and drives the same
//! async pipeline as [`InfluxClient`] on the calling thread. It must not be
//! used from inside an async context.

use crate::{
    client::{CallOptions, InfluxClient},
    config::Configuration,
    error::{InfluxError, InfluxResult},
    models::{TelegrafPluginType, TelegrafPlugins},
    operations::Operation,
    request::RequestDescriptor,
    response::ApiResponse,
};
use serde::de::DeserializeOwned;
use tokio::runtime::{Builder, Runtime};

/// Synchronous InfluxDB API client
pub struct BlockingClient {
    runtime: Runtime,
    inner: InfluxClient,
}

impl BlockingClient {
    pub fn new(config: Configuration) -> InfluxResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| InfluxError::config_error(format!("Failed to start runtime: {}", e)))?;
        let inner = InfluxClient::new(config)?;

        Ok(Self { runtime, inner })
    }

    /// The async client backing this one
    pub fn inner(&self) -> &InfluxClient {
        &self.inner
    }

    pub fn invoke_with_http_info<T>(
        &self,
        operation: &Operation,
        request: RequestDescriptor,
    ) -> InfluxResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        self.runtime
            .block_on(self.inner.invoke_with_http_info(operation, request, None))
    }

    pub fn invoke<T>(&self, operation: &Operation, request: RequestDescriptor) -> InfluxResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        self.runtime
            .block_on(self.inner.invoke(operation, request, None))
    }

    /// Get Telegraf plugins API
    pub fn telegraf_plugins(&self) -> BlockingTelegrafPluginsApi<'_> {
        BlockingTelegrafPluginsApi { client: self }
    }
}

/// Blocking Telegraf plugins API operations
pub struct BlockingTelegrafPluginsApi<'a> {
    client: &'a BlockingClient,
}

impl BlockingTelegrafPluginsApi<'_> {
    /// List all Telegraf plugins
    pub fn get_telegraf_plugins(
        &self,
        plugin_type: Option<TelegrafPluginType>,
        zap_trace_span: Option<&str>,
    ) -> InfluxResult<Option<TelegrafPlugins>> {
        self.get_telegraf_plugins_with_http_info(plugin_type, zap_trace_span)
            .map(ApiResponse::into_data)
    }

    pub fn get_telegraf_plugins_with_http_info(
        &self,
        plugin_type: Option<TelegrafPluginType>,
        zap_trace_span: Option<&str>,
    ) -> InfluxResult<ApiResponse<TelegrafPlugins>> {
        let mut opts = CallOptions::new();
        opts.zap_trace_span = zap_trace_span.map(str::to_string);

        self.client.runtime.block_on(
            self.client
                .inner
                .telegraf_plugins()
                .get_telegraf_plugins_with_http_info(plugin_type, &opts),
        )
    }
}
