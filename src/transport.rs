//! HTTP transport.
//!
//! The client turns a [`RequestDescriptor`](crate::RequestDescriptor) into a
//! [`PreparedRequest`] and hands it to a [`Transport`]. No retries happen at
//! this layer.

use crate::config::Configuration;
use crate::error::{InfluxError, InfluxResult};
use crate::request::FileParam;
use crate::response::RawResponse;
use bytes::Bytes;
use log::{debug, warn};
use reqwest::header::{HeaderMap, SET_COOKIE};
use reqwest::{Client, Method};
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Request body in wire form
#[derive(Debug, Clone)]
pub enum PreparedBody {
    Empty,
    Bytes { content_type: String, data: Bytes },
    Form(Vec<(String, String)>),
    Multipart {
        fields: Vec<(String, String)>,
        files: Vec<(String, FileParam)>,
    },
}

/// Fully resolved request ready for the wire
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: PreparedBody,
}

/// Executes prepared requests
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: PreparedRequest) -> InfluxResult<RawResponse>;
}

/// Default transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a reqwest client honoring the configured timeouts and user agent
    pub fn new(config: &Configuration) -> InfluxResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent())
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self { client })
    }

    /// Use an existing reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn build(&self, request: PreparedRequest) -> InfluxResult<reqwest::RequestBuilder> {
        let mut builder = self.client.request(request.method, request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            PreparedBody::Empty => builder,
            PreparedBody::Bytes { content_type, data } => builder
                .header(reqwest::header::CONTENT_TYPE, content_type)
                .body(data),
            PreparedBody::Form(fields) => builder.form(&fields),
            PreparedBody::Multipart { fields, files } => {
                let mut form = reqwest::multipart::Form::new();
                for (name, value) in fields {
                    form = form.text(name, value);
                }
                for (name, file) in files {
                    let mut part = reqwest::multipart::Part::bytes(file.content.to_vec())
                        .file_name(file.file_name);
                    if let Some(content_type) = file.content_type {
                        part = part.mime_str(&content_type).map_err(|_| {
                            InfluxError::invalid_param(format!(
                                "Invalid content type for file {}: {}",
                                name, content_type
                            ))
                        })?;
                    }
                    form = form.part(name, part);
                }
                builder.multipart(form)
            }
        };

        Ok(builder)
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: PreparedRequest) -> InfluxResult<RawResponse> {
        let builder = self.build(request)?;
        let response = builder.send().await.map_err(InfluxError::from_transport)?;

        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let body = response.bytes().await.map_err(InfluxError::from_transport)?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Flatten response headers into one value per name.
///
/// Repeated fields are combined with `", "`. `Set-Cookie` values cannot be
/// combined that way and are joined with `'\n'` instead; see
/// [`RawResponse::set_cookies`].
pub(crate) fn collect_headers(map: &HeaderMap) -> HashMap<String, String> {
    let mut headers: HashMap<String, String> = HashMap::new();
    for (name, value) in map {
        let separator = if *name == SET_COOKIE { "\n" } else { ", " };
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        headers
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(separator);
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    headers
}

/// Run `request` on `transport`, settling with [`InfluxError::Cancelled`]
/// as soon as `cancel` fires.
///
/// A token that is already cancelled prevents the request from being sent.
/// Otherwise the in-flight transport future is dropped, which aborts the
/// underlying connection work.
pub async fn execute_cancellable(
    transport: &dyn Transport,
    request: PreparedRequest,
    cancel: Option<&CancellationToken>,
) -> InfluxResult<RawResponse> {
    let Some(token) = cancel else {
        return transport.execute(request).await;
    };

    if token.is_cancelled() {
        debug!("Request to {} cancelled before dispatch", request.url);
        return Err(InfluxError::Cancelled);
    }

    let url = request.url.clone();
    tokio::select! {
        biased;
        _ = token.cancelled() => {
            warn!("Request to {} cancelled in flight", url);
            Err(InfluxError::Cancelled)
        }
        result = transport.execute(request) => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct CountingTransport {
        calls: Arc<AtomicUsize>,
        delay: Duration,
    }

    #[async_trait::async_trait]
    impl Transport for CountingTransport {
        async fn execute(&self, _request: PreparedRequest) -> InfluxResult<RawResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(RawResponse {
                status: 204,
                headers: HashMap::new(),
                body: Bytes::new(),
            })
        }
    }

    fn prepared() -> PreparedRequest {
        PreparedRequest {
            method: Method::GET,
            url: Url::parse("http://localhost:8086/api/v2/orgs").unwrap(),
            headers: Vec::new(),
            body: PreparedBody::Empty,
        }
    }

    #[tokio::test]
    async fn pre_cancelled_token_never_dispatches() {
        let calls = Arc::new(AtomicUsize::new(0));
        let transport = CountingTransport {
            calls: calls.clone(),
            delay: Duration::ZERO,
        };
        let token = CancellationToken::new();
        token.cancel();

        let result = execute_cancellable(&transport, prepared(), Some(&token)).await;
        assert!(matches!(result, Err(InfluxError::Cancelled)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn in_flight_cancellation_settles() {
        let transport = CountingTransport {
            calls: Arc::new(AtomicUsize::new(0)),
            delay: Duration::from_secs(60),
        };
        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            execute_cancellable(&transport, prepared(), Some(&token)),
        )
        .await
        .expect("cancelled call must settle");
        assert!(matches!(result, Err(InfluxError::Cancelled)));
    }

    #[tokio::test]
    async fn without_token_runs_to_completion() {
        let transport = CountingTransport {
            calls: Arc::new(AtomicUsize::new(0)),
            delay: Duration::ZERO,
        };
        let response = execute_cancellable(&transport, prepared(), None).await.unwrap();
        assert_eq!(response.status, 204);
    }

    #[test]
    fn repeated_headers_are_combined_except_cookies() {
        let mut map = HeaderMap::new();
        map.append("vary", "Accept".parse().unwrap());
        map.append("vary", "Accept-Encoding".parse().unwrap());
        map.append(SET_COOKIE, "a=1; Expires=Wed, 21 Oct 2026 07:28:00 GMT".parse().unwrap());
        map.append(SET_COOKIE, "b=2".parse().unwrap());

        let response = RawResponse {
            status: 200,
            headers: collect_headers(&map),
            body: Bytes::new(),
        };
        assert_eq!(response.header("Vary"), Some("Accept, Accept-Encoding"));
        assert_eq!(
            response.set_cookies().collect::<Vec<_>>(),
            vec!["a=1; Expires=Wed, 21 Oct 2026 07:28:00 GMT", "b=2"]
        );
    }
}
