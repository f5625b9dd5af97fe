use crate::error::{InfluxError, InfluxResult};
use crate::request::RequestDescriptor;
use base64::{engine::general_purpose, Engine};
use secrecy::{ExposeSecret, SecretString};

/// Authentication trait for the InfluxDB API
#[async_trait::async_trait]
pub trait Authentication: Send + Sync {
    /// Apply credentials to the request, as a header or a query parameter
    async fn apply_auth(&self, request: &mut RequestDescriptor) -> InfluxResult<()>;
}

fn check_header_value(value: &str) -> InfluxResult<()> {
    reqwest::header::HeaderValue::from_str(value)
        .map(|_| ())
        .map_err(|e| InfluxError::auth_error(format!("Invalid auth header: {}", e)))
}

/// API token authentication (`Authorization: Token <token>`)
#[derive(Debug, Clone)]
pub struct TokenAuth {
    token: SecretString,
}

impl TokenAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }
}

#[async_trait::async_trait]
impl Authentication for TokenAuth {
    async fn apply_auth(&self, request: &mut RequestDescriptor) -> InfluxResult<()> {
        let auth_value = format!("Token {}", self.token.expose_secret());
        check_header_value(&auth_value)?;
        request.set_header(reqwest::header::AUTHORIZATION.as_str(), auth_value);

        Ok(())
    }
}

/// Basic authentication using username/password
#[derive(Debug, Clone)]
pub struct BasicAuth {
    username: String,
    password: SecretString,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

#[async_trait::async_trait]
impl Authentication for BasicAuth {
    async fn apply_auth(&self, request: &mut RequestDescriptor) -> InfluxResult<()> {
        let credentials = format!("{}:{}", self.username, self.password.expose_secret());
        let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
        let auth_value = format!("Basic {}", encoded);
        check_header_value(&auth_value)?;
        request.set_header(reqwest::header::AUTHORIZATION.as_str(), auth_value);

        Ok(())
    }
}

/// Bearer token authentication
#[derive(Debug, Clone)]
pub struct BearerAuth {
    token: SecretString,
}

impl BearerAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }
}

#[async_trait::async_trait]
impl Authentication for BearerAuth {
    async fn apply_auth(&self, request: &mut RequestDescriptor) -> InfluxResult<()> {
        let auth_value = format!("Bearer {}", self.token.expose_secret());
        check_header_value(&auth_value)?;
        request.set_header(reqwest::header::AUTHORIZATION.as_str(), auth_value);

        Ok(())
    }
}

/// Token passed as a query parameter
#[derive(Debug, Clone)]
pub struct QueryTokenAuth {
    param: String,
    token: SecretString,
}

impl QueryTokenAuth {
    pub fn new(param: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            token: SecretString::from(token.into()),
        }
    }
}

#[async_trait::async_trait]
impl Authentication for QueryTokenAuth {
    async fn apply_auth(&self, request: &mut RequestDescriptor) -> InfluxResult<()> {
        if self.param.is_empty() {
            return Err(InfluxError::auth_error("Query token parameter name is empty"));
        }
        request
            .query_params
            .retain(|(name, _)| name != &self.param);
        request
            .query_params
            .push((self.param.clone(), self.token.expose_secret().to_string()));

        Ok(())
    }
}

/// No authentication
#[derive(Debug, Clone)]
pub struct NoAuth;

#[async_trait::async_trait]
impl Authentication for NoAuth {
    async fn apply_auth(&self, _request: &mut RequestDescriptor) -> InfluxResult<()> {
        Ok(())
    }
}
