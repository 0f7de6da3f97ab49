use crate::application_impl::{RefreshTokenManager, extract_bearer_token};
use crate::application_port::*;
use crate::domain_model::UserId;
use crate::domain_port::CredentialStore;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

pub struct RealAuthService {
    credential_store: Arc<dyn CredentialStore>,
    credential_hasher: Arc<dyn CredentialHasher>,
    token_codec: Arc<dyn TokenCodec>,
    refresh_tokens: RefreshTokenManager,
    access_ttl: Duration,
}

impl RealAuthService {
    pub fn new(
        credential_store: Arc<dyn CredentialStore>,
        credential_hasher: Arc<dyn CredentialHasher>,
        token_codec: Arc<dyn TokenCodec>,
        refresh_tokens: RefreshTokenManager,
        access_ttl: Duration,
    ) -> Self {
        Self {
            credential_store,
            credential_hasher,
            token_codec,
            refresh_tokens,
            access_ttl,
        }
    }
}

#[async_trait::async_trait]
impl AuthService for RealAuthService {
    async fn login(&self, request: LoginInput) -> Result<LoginResult, AuthError> {
        let LoginInput { user_id, password } = request;

        // Unknown identity and wrong password must stay indistinguishable
        // from the outside.
        let password_hash = self
            .credential_store
            .load_credential_hash(user_id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let ok = self
            .credential_hasher
            .verify_password(&password, &password_hash)
            .await?;
        if !ok {
            return Err(AuthError::InvalidCredentials);
        }

        let (access_token, access_exp) = self
            .token_codec
            .issue_access_token(user_id, self.access_ttl)
            .await?;

        let refresh_record = self.refresh_tokens.issue(user_id).await?;

        Ok(LoginResult {
            user_id,
            tokens: AuthTokens {
                access_token,
                refresh_token: RefreshToken(refresh_record.token),
                access_token_expires_at: access_exp,
                refresh_token_expires_at: refresh_record.expires_at,
            },
        })
    }

    async fn authorize(&self, authorization: &str) -> Result<UserId, AuthError> {
        let token = extract_bearer_token(authorization)?;

        self.token_codec
            .verify_access_token(&AccessToken(token.to_string()))
            .await
    }

    async fn refresh(
        &self,
        authorization: &str,
    ) -> Result<(AccessToken, DateTime<Utc>), AuthError> {
        let token = extract_bearer_token(authorization)?;
        let record = self.refresh_tokens.validate(token).await?;

        self.token_codec
            .issue_access_token(record.user_id, self.access_ttl)
            .await
    }

    async fn revoke(&self, authorization: &str) -> Result<(), AuthError> {
        let token = extract_bearer_token(authorization)?;
        self.refresh_tokens.revoke(token).await
    }

    async fn revoke_all_for_user(&self, user: UserId) -> Result<(), AuthError> {
        self.refresh_tokens.revoke_all_for_user(user).await
    }

    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        self.credential_hasher.hash_password(password).await
    }
}
