use crate::application_port::AuthError;
use crate::domain_model::{RefreshTokenRecord, UserId};
use crate::domain_port::RefreshTokenStore;
use chrono::{Duration, Utc};
use rand::Rng;
use std::sync::Arc;

/// Issues opaque refresh tokens and tracks their lifecycle through the
/// store. Minting access tokens is the codec's job, never this one's.
pub struct RefreshTokenManager {
    store: Arc<dyn RefreshTokenStore>,
    refresh_ttl: Duration,
}

impl RefreshTokenManager {
    pub fn new(store: Arc<dyn RefreshTokenStore>, refresh_ttl: Duration) -> Self {
        RefreshTokenManager { store, refresh_ttl }
    }

    /// 32 bytes from a CSPRNG, hex-encoded to 64 lowercase characters.
    /// No uniqueness probe against the store; the store's unique key is
    /// the backstop for the astronomically unlikely collision.
    pub fn generate() -> String {
        let mut buffer = [0u8; 32];
        rand::thread_rng().fill(&mut buffer[..]);
        hex::encode(buffer)
    }

    pub async fn issue(&self, user_id: UserId) -> Result<RefreshTokenRecord, AuthError> {
        let issued_at = Utc::now();
        let record = RefreshTokenRecord {
            token: Self::generate(),
            user_id,
            issued_at,
            expires_at: issued_at + self.refresh_ttl,
            revoked_at: None,
        };
        self.store.insert(&record).await?;
        Ok(record)
    }

    /// Revocation is checked before expiry, so a revoked record keeps
    /// reporting `Revoked` after its horizon passes.
    pub async fn validate(&self, token: &str) -> Result<RefreshTokenRecord, AuthError> {
        let record = self.store.find(token).await?.ok_or(AuthError::NotFound)?;

        if record.is_revoked() {
            return Err(AuthError::Revoked);
        }
        if record.is_expired(Utc::now()) {
            return Err(AuthError::Expired);
        }

        Ok(record)
    }

    /// Idempotent: revoking an unknown or already-revoked token succeeds
    /// without touching anything.
    pub async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        self.store.mark_revoked(token, Utc::now()).await
    }

    pub async fn revoke_all_for_user(&self, user_id: UserId) -> Result<(), AuthError> {
        self.store.mark_all_revoked_for_user(user_id, Utc::now()).await
    }
}
