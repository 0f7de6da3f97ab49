use crate::application_port::{AuthError, CredentialHasher};

/// Hard limit of the bcrypt primitive. The `bcrypt` crate truncates longer
/// input silently, so the boundary has to be enforced here.
pub const MAX_PASSWORD_BYTES: usize = 72;

pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        BcryptHasher { cost }
    }
}

#[async_trait::async_trait]
impl CredentialHasher for BcryptHasher {
    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(AuthError::InvalidInput(format!(
                "password exceeds {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }

        bcrypt::hash(password, self.cost).map_err(|e| AuthError::Internal(e.to_string()))
    }

    async fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, AuthError> {
        // Over-length secrets can never have produced a stored hash.
        if password.len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }

        match bcrypt::verify(password, password_hash) {
            Ok(matched) => Ok(matched),
            Err(e) => Err(AuthError::Internal(format!("corrupt stored hash: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cost 4 is the bcrypt minimum; production cost comes from settings.
    fn hasher() -> BcryptHasher {
        BcryptHasher::new(4)
    }

    #[tokio::test]
    async fn hash_then_verify_round_trips() {
        let hasher = hasher();
        let hash = hasher.hash_password("correct horse battery").await.unwrap();

        assert!(hash.starts_with("$2"));
        assert!(hasher.verify_password("correct horse battery", &hash).await.unwrap());
        assert!(!hasher.verify_password("wrong horse", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn distinct_secrets_do_not_cross_verify() {
        let hasher = hasher();
        let hash = hasher.hash_password("123Xren'ads;kfje234-82u341jkfljfsf").await.unwrap();

        assert!(!hasher.verify_password("123Xren", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn over_length_password_is_rejected_before_hashing() {
        let hasher = hasher();
        let long = "1234567890".repeat(9);
        assert_eq!(long.len(), 90);

        let err = hasher.hash_password(&long).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn boundary_length_password_is_accepted() {
        let hasher = hasher();
        let exact = "a".repeat(MAX_PASSWORD_BYTES);

        let hash = hasher.hash_password(&exact).await.unwrap();
        assert!(hasher.verify_password(&exact, &hash).await.unwrap());
    }

    #[tokio::test]
    async fn over_length_password_never_matches() {
        let hasher = hasher();
        let exact = "a".repeat(MAX_PASSWORD_BYTES);
        let longer = "a".repeat(MAX_PASSWORD_BYTES + 8);
        let hash = hasher.hash_password(&exact).await.unwrap();

        assert!(!hasher.verify_password(&longer, &hash).await.unwrap());
    }

    #[tokio::test]
    async fn corrupt_stored_hash_is_an_error_not_a_mismatch() {
        let hasher = hasher();

        let err = hasher.verify_password("whatever", "not-a-bcrypt-hash").await.unwrap_err();
        assert!(matches!(err, AuthError::Internal(_)));
    }
}
