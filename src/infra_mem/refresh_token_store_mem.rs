use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

pub struct MemRefreshTokenStore {
    tokens: DashMap<String, RefreshTokenRecord>,
}

impl MemRefreshTokenStore {
    pub fn new() -> Self {
        MemRefreshTokenStore {
            tokens: DashMap::new(),
        }
    }
}

#[async_trait::async_trait]
impl RefreshTokenStore for MemRefreshTokenStore {
    async fn insert(&self, record: &RefreshTokenRecord) -> Result<(), AuthError> {
        match self.tokens.entry(record.token.clone()) {
            Entry::Occupied(_) => Err(AuthError::StorageUnavailable(
                "duplicate refresh token".to_string(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(())
            }
        }
    }

    async fn find(&self, token: &str) -> Result<Option<RefreshTokenRecord>, AuthError> {
        Ok(self.tokens.get(token).map(|entry| entry.value().clone()))
    }

    async fn mark_revoked(
        &self,
        token: &str,
        revoked_at: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        // The entry lock makes read-then-set atomic; the first revocation
        // timestamp wins.
        if let Some(mut record) = self.tokens.get_mut(token) {
            if record.revoked_at.is_none() {
                record.revoked_at = Some(revoked_at);
            }
        }

        Ok(())
    }

    async fn mark_all_revoked_for_user(
        &self,
        user_id: UserId,
        revoked_at: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        for mut entry in self.tokens.iter_mut() {
            if entry.user_id == user_id && entry.revoked_at.is_none() {
                entry.revoked_at = Some(revoked_at);
            }
        }

        Ok(())
    }
}
