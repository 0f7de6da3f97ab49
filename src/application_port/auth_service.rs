use crate::domain_model::UserId;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("missing token")]
    MissingToken,
    #[error("token malformed")]
    Malformed,
    #[error("bad signature")]
    BadSignature,
    #[error("token expired")]
    Expired,
    #[error("token revoked")]
    Revoked,
    #[error("token not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    StorageUnavailable(String),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone)]
pub struct LoginInput {
    pub user_id: UserId,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user_id: UserId,
    pub tokens: AuthTokens,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccessToken(pub String);

#[derive(Debug, Clone, Serialize)]
pub struct RefreshToken(pub String);

#[derive(Debug, Clone, Serialize)]
pub struct AuthTokens {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
    pub access_token_expires_at: DateTime<Utc>,
    pub refresh_token_expires_at: DateTime<Utc>,
}

#[async_trait::async_trait]
pub trait TokenCodec: Send + Sync {
    async fn issue_access_token(
        &self,
        user: UserId,
        ttl: Duration,
    ) -> Result<(AccessToken, DateTime<Utc>), AuthError>;
    async fn verify_access_token(&self, token: &AccessToken) -> Result<UserId, AuthError>;
}

#[async_trait::async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, AuthError>;
    async fn verify_password(&self, password: &str, password_hash: &str)
    -> Result<bool, AuthError>;
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verify credentials and issue a fresh access + refresh pair.
    async fn login(&self, request: LoginInput) -> Result<LoginResult, AuthError>;
    /// Resolve a raw `Authorization` header value to the caller identity.
    async fn authorize(&self, authorization: &str) -> Result<UserId, AuthError>;
    /// Exchange a live refresh token (as a bearer header) for a new access
    /// token. The refresh token itself stays valid.
    async fn refresh(&self, authorization: &str)
    -> Result<(AccessToken, DateTime<Utc>), AuthError>;
    /// Revoke the presented refresh token. Unknown tokens succeed silently.
    async fn revoke(&self, authorization: &str) -> Result<(), AuthError>;
    /// Revoke every live refresh token issued to `user`.
    async fn revoke_all_for_user(&self, user: UserId) -> Result<(), AuthError>;
    /// Hash a plaintext secret for storage, at account creation or change.
    async fn hash_password(&self, password: &str) -> Result<String, AuthError>;
}
