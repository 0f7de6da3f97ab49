use crate::application_impl::extract_bearer_token;
use crate::application_port::*;
use crate::domain_model::UserId;
use chrono::{DateTime, Duration, Utc};

#[derive(Debug)]
pub struct FakeAuthService;

impl FakeAuthService {
    pub fn new() -> Self {
        Self
    }
}

// Minimal fake implementation for basic use only.
// Extend to simulate more error cases and configurable responses when needed.
#[async_trait::async_trait]
impl AuthService for FakeAuthService {
    async fn login(&self, request: LoginInput) -> Result<LoginResult, AuthError> {
        Ok(LoginResult {
            user_id: request.user_id,
            tokens: get_fake_tokens(request.user_id),
        })
    }

    async fn authorize(&self, authorization: &str) -> Result<UserId, AuthError> {
        let token = extract_bearer_token(authorization)?;
        parse_fake_token(token, "fake-access-token:")
    }

    async fn refresh(
        &self,
        authorization: &str,
    ) -> Result<(AccessToken, DateTime<Utc>), AuthError> {
        let token = extract_bearer_token(authorization)?;
        let user_id = parse_fake_token(token, "fake-refresh-token:")?;

        let tokens = get_fake_tokens(user_id);
        Ok((tokens.access_token, tokens.access_token_expires_at))
    }

    async fn revoke(&self, authorization: &str) -> Result<(), AuthError> {
        extract_bearer_token(authorization)?;
        Ok(())
    }

    async fn revoke_all_for_user(&self, _user: UserId) -> Result<(), AuthError> {
        Ok(())
    }

    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("fake-hash:{}", password))
    }
}

fn parse_fake_token(token: &str, prefix: &str) -> Result<UserId, AuthError> {
    let raw = token.strip_prefix(prefix).ok_or(AuthError::Malformed)?;
    raw.parse::<UserId>().map_err(|_| AuthError::Malformed)
}

fn get_fake_tokens(user_id: UserId) -> AuthTokens {
    let now = Utc::now();
    AuthTokens {
        access_token: AccessToken(format!("fake-access-token:{}", user_id)),
        access_token_expires_at: now + Duration::hours(1),
        refresh_token: RefreshToken(format!("fake-refresh-token:{}", user_id)),
        refresh_token_expires_at: now + Duration::days(60),
    }
}
