use super::util::is_dup_key;
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

pub struct MySqlRefreshTokenStore {
    pool: MySqlPool,
}

impl MySqlRefreshTokenStore {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlRefreshTokenStore { pool }
    }

    #[inline]
    fn uid_as_bytes(id: &UserId) -> &[u8] {
        id.0.as_bytes()
    }

    #[inline]
    fn uid_from_bytes(id: &[u8]) -> Result<UserId, AuthError> {
        Ok(UserId(
            Uuid::from_slice(id).map_err(|e| AuthError::StorageUnavailable(e.to_string()))?,
        ))
    }

    fn row_to_record(row: MySqlRow) -> Result<RefreshTokenRecord, AuthError> {
        let token: String = row
            .try_get("token")
            .map_err(|e| AuthError::StorageUnavailable(e.to_string()))?;

        let user_id_bytes: Vec<u8> = row
            .try_get("user_id")
            .map_err(|e| AuthError::StorageUnavailable(e.to_string()))?;
        let user_id = Self::uid_from_bytes(&user_id_bytes)?;

        let issued_at: DateTime<Utc> = row
            .try_get("issued_at")
            .map_err(|e| AuthError::StorageUnavailable(e.to_string()))?;
        let expires_at: DateTime<Utc> = row
            .try_get("expires_at")
            .map_err(|e| AuthError::StorageUnavailable(e.to_string()))?;
        let revoked_at: Option<DateTime<Utc>> = row
            .try_get("revoked_at")
            .map_err(|e| AuthError::StorageUnavailable(e.to_string()))?;

        Ok(RefreshTokenRecord {
            token,
            user_id,
            issued_at,
            expires_at,
            revoked_at,
        })
    }
}

#[async_trait::async_trait]
impl RefreshTokenStore for MySqlRefreshTokenStore {
    async fn insert(&self, record: &RefreshTokenRecord) -> Result<(), AuthError> {
        let res = sqlx::query(
            r#"
INSERT INTO refresh_token (token, user_id, issued_at, expires_at, revoked_at)
VALUES (?, ?, ?, ?, ?)
"#,
        )
        .bind(&record.token)
        .bind(Self::uid_as_bytes(&record.user_id))
        .bind(record.issued_at)
        .bind(record.expires_at)
        .bind(record.revoked_at)
        .execute(&self.pool)
        .await;

        match res {
            Ok(_) => Ok(()),
            // The primary key on `token` is the collision backstop.
            Err(e) if is_dup_key(&e) => Err(AuthError::StorageUnavailable(
                "duplicate refresh token".to_string(),
            )),
            Err(e) => Err(AuthError::StorageUnavailable(format!("refresh insert: {e}"))),
        }
    }

    async fn find(&self, token: &str) -> Result<Option<RefreshTokenRecord>, AuthError> {
        let row_opt: Option<MySqlRow> = sqlx::query(
            r#"
SELECT token, user_id, issued_at, expires_at, revoked_at
FROM refresh_token
WHERE token = ?
"#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::StorageUnavailable(format!("refresh select: {e}")))?;

        row_opt.map(Self::row_to_record).transpose()
    }

    async fn mark_revoked(
        &self,
        token: &str,
        revoked_at: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        // Matching zero rows is fine: absent and already-revoked tokens
        // are both silent successes, and the first timestamp survives.
        sqlx::query(
            r#"
UPDATE refresh_token
SET revoked_at = ?
WHERE token = ? AND revoked_at IS NULL
"#,
        )
        .bind(revoked_at)
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::StorageUnavailable(format!("refresh revoke: {e}")))?;

        Ok(())
    }

    async fn mark_all_revoked_for_user(
        &self,
        user_id: UserId,
        revoked_at: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        sqlx::query(
            r#"
UPDATE refresh_token
SET revoked_at = ?
WHERE user_id = ? AND revoked_at IS NULL
"#,
        )
        .bind(revoked_at)
        .bind(Self::uid_as_bytes(&user_id))
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::StorageUnavailable(format!("refresh revoke all: {e}")))?;

        Ok(())
    }
}
