//! Identity-service boundary. The controller depends on the [`IdentityService`]
//! trait only; [`http::HttpIdentityService`] is the production implementation.
//! Service errors are opaque to the flow: they map uniformly to a mode-specific
//! failure notice, and the raw error is logged for diagnostics only.

pub mod error;
pub mod http;

use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::service::error::ServiceError;

/// Response to a login request. The token, when present, is for the host to
/// consume; the controller does not store it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
}

/// Acknowledgement body shared by the non-login operations.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AckResponse {
    #[serde(default)]
    pub success: bool,
}

/// External backend responsible for credential verification, account
/// creation, and password reset token validation.
#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, ServiceError>;

    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<AckResponse, ServiceError>;

    async fn reset_password(
        &self,
        token: &str,
        new_password: &SecretString,
    ) -> Result<AckResponse, ServiceError>;

    async fn forgot_password(&self, identifier: &str) -> Result<AckResponse, ServiceError>;
}
