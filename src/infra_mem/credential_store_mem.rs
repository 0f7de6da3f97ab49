use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use dashmap::DashMap;

pub struct MemCredentialStore {
    hashes: DashMap<UserId, String>,
}

impl MemCredentialStore {
    pub fn new() -> Self {
        MemCredentialStore {
            hashes: DashMap::new(),
        }
    }
}

#[async_trait::async_trait]
impl CredentialStore for MemCredentialStore {
    async fn store_credential_hash(
        &self,
        user_id: UserId,
        password_hash: &str,
    ) -> Result<(), AuthError> {
        self.hashes.insert(user_id, password_hash.to_string());
        Ok(())
    }

    async fn load_credential_hash(&self, user_id: UserId) -> Result<Option<String>, AuthError> {
        Ok(self.hashes.get(&user_id).map(|entry| entry.value().clone()))
    }
}
