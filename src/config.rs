//! Client configuration.
//!
//! A [`Configuration`] is built once through [`ConfigurationBuilder`] and is
//! read-only afterwards. The base URL, default headers, credentials, timeouts
//! and the exception factory are all fixed at build time, so a client can be
//! cloned and shared across tasks without further synchronization.

use crate::auth::{Authentication, NoAuth, TokenAuth};
use crate::error::{InfluxError, InfluxResult};
use crate::exception::{ErrorPolicy, ExceptionFactory, ExceptionFactorySlot};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub const ENV_URL: &str = "INFLUX_URL";
pub const ENV_TOKEN: &str = "INFLUX_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "INFLUX_TIMEOUT_SECS";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Immutable client configuration
#[derive(Clone)]
pub struct Configuration {
    base_url: Url,
    default_headers: BTreeMap<String, String>,
    auth: Arc<dyn Authentication>,
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: String,
    exceptions: ExceptionFactorySlot,
}

impl Configuration {
    pub fn builder(base_url: impl AsRef<str>) -> InfluxResult<ConfigurationBuilder> {
        ConfigurationBuilder::new(base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
    }

    pub fn auth(&self) -> &Arc<dyn Authentication> {
        &self.auth
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn exceptions(&self) -> &ExceptionFactorySlot {
        &self.exceptions
    }
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("base_url", &self.base_url.as_str())
            .field("default_headers", &self.default_headers)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("user_agent", &self.user_agent)
            .field("exception_factory", &self.exceptions.is_registered())
            .finish()
    }
}

/// Builder for [`Configuration`]
pub struct ConfigurationBuilder {
    base_url: Url,
    default_headers: BTreeMap<String, String>,
    auth: Arc<dyn Authentication>,
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: String,
    exceptions: ExceptionFactorySlot,
}

impl ConfigurationBuilder {
    /// Start a configuration for the given base URL (e.g. `http://localhost:8086`)
    pub fn new(base_url: impl AsRef<str>) -> InfluxResult<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        if base_url.cannot_be_a_base() {
            return Err(InfluxError::config_error(format!(
                "Base URL {} cannot carry a path",
                base_url
            )));
        }

        Ok(Self {
            base_url,
            default_headers: BTreeMap::new(),
            auth: Arc::new(NoAuth),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
            exceptions: ExceptionFactorySlot::new(),
        })
    }

    /// Read `INFLUX_URL`, `INFLUX_TOKEN` and `INFLUX_TIMEOUT_SECS`
    pub fn from_env() -> InfluxResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> InfluxResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(ENV_URL)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| InfluxError::config_error(format!("{} is not set", ENV_URL)))?;
        let mut builder = Self::new(url.trim())?;

        if let Some(token) = lookup(ENV_TOKEN).filter(|v| !v.is_empty()) {
            builder = builder.auth(TokenAuth::new(token));
        }

        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                InfluxError::config_error(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_TIMEOUT_SECS, secs
                ))
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(builder)
    }

    /// Add a header sent with every request; later values replace earlier ones
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.default_headers
            .retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
        self.default_headers.insert(name, value.into());
        self
    }

    pub fn auth(mut self, auth: impl Authentication + 'static) -> Self {
        self.auth = Arc::new(auth);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Register the exception factory; fails if one is already registered
    pub fn exception_factory(mut self, factory: ExceptionFactory) -> InfluxResult<Self> {
        self.exceptions.register(factory)?;
        Ok(self)
    }

    /// Select a built-in error policy; `RaiseForStatus` occupies the factory slot
    pub fn error_policy(self, policy: ErrorPolicy) -> InfluxResult<Self> {
        match policy {
            ErrorPolicy::SoftFail => Ok(self),
            ErrorPolicy::RaiseForStatus => {
                self.exception_factory(ExceptionFactory::raise_for_status())
            }
        }
    }

    pub fn build(self) -> Configuration {
        Configuration {
            base_url: self.base_url,
            default_headers: self.default_headers,
            auth: self.auth,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            user_agent: self.user_agent,
            exceptions: self.exceptions,
        }
    }
}
