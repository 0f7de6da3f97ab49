use crate::application_port::*;
use crate::domain_model::*;

#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// Store the hash for an identity, replacing any previous one wholesale.
    async fn store_credential_hash(
        &self,
        user_id: UserId,
        password_hash: &str,
    ) -> Result<(), AuthError>;

    /// Fetch the stored hash for an identity (for login).
    async fn load_credential_hash(&self, user_id: UserId) -> Result<Option<String>, AuthError>;
}
