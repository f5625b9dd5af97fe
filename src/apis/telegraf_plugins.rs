use crate::{
    client::{CallOptions, InfluxClient},
    error::InfluxResult,
    models::{TelegrafPluginType, TelegrafPlugins},
    operations::{GET_TELEGRAF_PLUGINS, ZAP_TRACE_SPAN},
    response::ApiResponse,
};
use log::info;

/// Telegraf plugins API operations
pub struct TelegrafPluginsApi<'a> {
    client: &'a InfluxClient,
}

impl<'a> TelegrafPluginsApi<'a> {
    pub fn new(client: &'a InfluxClient) -> Self {
        Self { client }
    }

    /// List all Telegraf plugins
    ///
    /// # Arguments
    /// * `plugin_type` - Only return plugins of this type
    /// * `opts` - Trace span and cancellation
    pub async fn get_telegraf_plugins(
        &self,
        plugin_type: Option<TelegrafPluginType>,
        opts: &CallOptions,
    ) -> InfluxResult<Option<TelegrafPlugins>> {
        self.get_telegraf_plugins_with_http_info(plugin_type, opts)
            .await
            .map(ApiResponse::into_data)
    }

    /// List all Telegraf plugins, keeping status and headers
    pub async fn get_telegraf_plugins_with_http_info(
        &self,
        plugin_type: Option<TelegrafPluginType>,
        opts: &CallOptions,
    ) -> InfluxResult<ApiResponse<TelegrafPlugins>> {
        info!("Listing Telegraf plugins (type={:?})", plugin_type);
        let request = GET_TELEGRAF_PLUGINS
            .request()
            .query_opt("type", plugin_type)
            .header_opt(ZAP_TRACE_SPAN, opts.zap_trace_span.as_deref());

        self.client
            .invoke_with_http_info(&GET_TELEGRAF_PLUGINS, request, opts.token())
            .await
    }
}
