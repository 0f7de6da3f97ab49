use crate::domain_model::UserId;
use chrono::{DateTime, Utc};

/// Persisted state of one issued refresh token. The `token` value is the
/// primary lookup key; records are never deleted, only marked revoked.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshTokenRecord {
    pub token: String,
    pub user_id: UserId,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshTokenRecord {
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Expiry boundary is inclusive: a record whose `expires_at` equals
    /// `now` is already expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked() && !self.is_expired(now)
    }
}
