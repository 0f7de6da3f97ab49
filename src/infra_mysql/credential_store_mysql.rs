use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

pub struct MySqlCredentialStore {
    pool: MySqlPool,
}

impl MySqlCredentialStore {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlCredentialStore { pool }
    }

    #[inline]
    fn uid_as_bytes(id: &UserId) -> &[u8] {
        id.0.as_bytes()
    }
}

#[async_trait::async_trait]
impl CredentialStore for MySqlCredentialStore {
    async fn store_credential_hash(
        &self,
        user_id: UserId,
        password_hash: &str,
    ) -> Result<(), AuthError> {
        sqlx::query(
            r#"
INSERT INTO user_credential (user_id, password_hash)
VALUES (?, ?)
ON DUPLICATE KEY UPDATE password_hash = VALUES(password_hash)
"#,
        )
        .bind(Self::uid_as_bytes(&user_id))
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::StorageUnavailable(format!("credential upsert: {e}")))?;

        Ok(())
    }

    async fn load_credential_hash(&self, user_id: UserId) -> Result<Option<String>, AuthError> {
        let row_opt: Option<MySqlRow> = sqlx::query(
            r#"
SELECT password_hash
FROM user_credential
WHERE user_id = ?
"#,
        )
        .bind(Self::uid_as_bytes(&user_id))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::StorageUnavailable(format!("credential select: {e}")))?;

        row_opt
            .map(|row| {
                row.try_get("password_hash")
                    .map_err(|e| AuthError::StorageUnavailable(e.to_string()))
            })
            .transpose()
    }
}
