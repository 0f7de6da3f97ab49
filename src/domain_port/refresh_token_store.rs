use crate::application_port::*;
use crate::domain_model::*;
use chrono::{DateTime, Utc};

#[async_trait::async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Insert a new record. Must be atomic insert-if-absent: an existing
    /// record with the same token value fails the call instead of being
    /// overwritten.
    async fn insert(&self, record: &RefreshTokenRecord) -> Result<(), AuthError>;

    /// Fetch a record by exact token value.
    async fn find(&self, token: &str) -> Result<Option<RefreshTokenRecord>, AuthError>;

    /// Set `revoked_at` on a record that is present and not yet revoked.
    /// Absent and already-revoked tokens are left untouched, so the first
    /// revocation timestamp survives concurrent calls.
    async fn mark_revoked(&self, token: &str, revoked_at: DateTime<Utc>)
    -> Result<(), AuthError>;

    /// Revoke every live record owned by `user_id`.
    async fn mark_all_revoked_for_user(
        &self,
        user_id: UserId,
        revoked_at: DateTime<Utc>,
    ) -> Result<(), AuthError>;
}
