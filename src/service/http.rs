//! HTTP implementation of the identity-service boundary. Requests carry the
//! crate user-agent and a default timeout so a dead network cannot hold the
//! surface in a submitting state forever. Non-success responses are mapped to
//! a typed error with a sanitized body excerpt; credentials are never logged.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::service::error::ServiceError;
use crate::service::{AckResponse, IdentityService, LoginResponse};
use crate::APP_USER_AGENT;

/// Environment variable naming the identity service base URL.
pub const AUTH_SERVICE_URL_ENV: &str = "ENSALUTI_AUTH_SERVICE_URL";

/// Default request timeout applied to every identity-service call.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Maximum number of error body characters surfaced in an error message.
const MAX_ERROR_CHARS: usize = 200;

/// Connection settings for the identity service.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub base_url: String,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Reads the base URL from `ENSALUTI_AUTH_SERVICE_URL`. Blank values are
    /// treated as unset.
    pub fn from_env() -> Result<Self, ServiceError> {
        match env::var(AUTH_SERVICE_URL_ENV) {
            Ok(value) if !value.trim().is_empty() => Ok(Self::new(value.trim())),
            _ => Err(ServiceError::Config(format!(
                "{AUTH_SERVICE_URL_ENV} is not set"
            ))),
        }
    }
}

#[derive(Serialize)]
struct LoginPayload<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterPayload<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct ResetPasswordPayload<'a> {
    token: &'a str,
    #[serde(rename = "newPassword")]
    new_password: &'a str,
}

#[derive(Serialize)]
struct ForgotPasswordPayload<'a> {
    identifier: &'a str,
}

/// Identity service client over HTTP.
pub struct HttpIdentityService {
    client: Client,
    base_url: String,
}

impl HttpIdentityService {
    /// Builds the client after validating the configured base URL.
    pub fn new(config: &ServiceConfig) -> Result<Self, ServiceError> {
        let url = Url::parse(&config.base_url).map_err(|err| {
            ServiceError::Config(format!("Invalid identity service URL: {err}"))
        })?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ServiceError::Config(format!(
                    "Unsupported identity service URL scheme: {scheme}"
                )))
            }
        }

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|err| ServiceError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ServiceError> {
        let url = self.endpoint_url(path);
        debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Http {
                status,
                message: error_message(&body),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|err| ServiceError::Parse(format!("Failed to decode response: {err}")))
    }
}

#[async_trait]
impl IdentityService for HttpIdentityService {
    async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, ServiceError> {
        let payload = LoginPayload {
            username,
            password: password.expose_secret(),
        };
        self.post_json("/api/auth/login", &payload).await
    }

    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<AckResponse, ServiceError> {
        let payload = RegisterPayload {
            username,
            email,
            password: password.expose_secret(),
        };
        self.post_json("/api/auth/register", &payload).await
    }

    async fn reset_password(
        &self,
        token: &str,
        new_password: &SecretString,
    ) -> Result<AckResponse, ServiceError> {
        let payload = ResetPasswordPayload {
            token,
            new_password: new_password.expose_secret(),
        };
        self.post_json("/api/auth/reset-password", &payload).await
    }

    async fn forgot_password(&self, identifier: &str) -> Result<AckResponse, ServiceError> {
        let payload = ForgotPasswordPayload { identifier };
        self.post_json("/api/auth/forgot-password", &payload).await
    }
}

fn map_transport_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        ServiceError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        ServiceError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Pulls a human-readable message out of an error body: a JSON `error` or
/// `message` field when present, otherwise the sanitized raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json["error"]
                .as_str()
                .or_else(|| json["message"].as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| sanitize_body(body))
}

/// Trims and truncates an error body so raw server output stays bounded.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
