//! End-to-end flows over the in-memory backend, wired through the public
//! crate surface the way a caller would assemble it.

use std::sync::Arc;

use chrono::Duration;

use clavier::application_impl::{
    BcryptHasher, JwtHs256Codec, RealAuthService, RefreshTokenManager,
};
use clavier::application_port::{AuthError, AuthService, LoginInput};
use clavier::domain_model::UserId;
use clavier::domain_port::CredentialStore;
use clavier::infra_mem::{MemCredentialStore, MemRefreshTokenStore};

const PASSWORD: &str = "correct horse battery staple";

async fn spawn_service() -> (Arc<dyn AuthService>, UserId) {
    let credential_store = Arc::new(MemCredentialStore::new());
    let refresh_store = Arc::new(MemRefreshTokenStore::new());

    let service: Arc<dyn AuthService> = Arc::new(RealAuthService::new(
        credential_store.clone(),
        Arc::new(BcryptHasher::new(4)),
        Arc::new(JwtHs256Codec::new(b"integration-secret".to_vec())),
        RefreshTokenManager::new(refresh_store, Duration::days(60)),
        Duration::hours(1),
    ));

    let user = UserId(uuid::Uuid::new_v4());
    let hash = service.hash_password(PASSWORD).await.expect("hash password");
    credential_store
        .store_credential_hash(user, &hash)
        .await
        .expect("seed credential");

    (service, user)
}

async fn login(service: &Arc<dyn AuthService>, user: UserId) -> clavier::application_port::LoginResult {
    service
        .login(LoginInput {
            user_id: user,
            password: PASSWORD.to_string(),
        })
        .await
        .expect("login")
}

#[tokio::test]
async fn login_authorize_refresh_revoke_round() {
    let (service, user) = spawn_service().await;
    let result = login(&service, user).await;

    // The access token authorizes requests.
    let access_header = format!("Bearer {}", result.tokens.access_token.0);
    assert_eq!(service.authorize(&access_header).await.expect("authorize"), user);

    // The refresh token mints new access tokens and stays valid itself.
    let refresh_header = format!("Bearer {}", result.tokens.refresh_token.0);
    let (minted, _) = service.refresh(&refresh_header).await.expect("refresh");
    let minted_header = format!("Bearer {}", minted.0);
    assert_eq!(
        service.authorize(&minted_header).await.expect("authorize minted"),
        user
    );

    // Revocation is terminal and repeatable.
    service.revoke(&refresh_header).await.expect("revoke");
    service.revoke(&refresh_header).await.expect("second revoke");
    let err = service.refresh(&refresh_header).await.unwrap_err();
    assert!(matches!(err, AuthError::Revoked), "got {err:?}");
}

#[tokio::test]
async fn revoking_a_refresh_token_does_not_recall_access_tokens() {
    let (service, user) = spawn_service().await;
    let result = login(&service, user).await;

    let refresh_header = format!("Bearer {}", result.tokens.refresh_token.0);
    service.revoke(&refresh_header).await.expect("revoke");

    // Access tokens carry no server-side state, so the one issued at
    // login keeps working until it expires on its own.
    let access_header = format!("Bearer {}", result.tokens.access_token.0);
    assert_eq!(service.authorize(&access_header).await.expect("authorize"), user);
}

#[tokio::test]
async fn unknown_refresh_tokens_refuse_refresh_but_revoke_silently() {
    let (service, _) = spawn_service().await;

    let header = format!("Bearer {}", "0".repeat(64));
    let err = service.refresh(&header).await.unwrap_err();
    assert!(matches!(err, AuthError::NotFound), "got {err:?}");

    service.revoke(&header).await.expect("revoke unknown");
    service.revoke(&header).await.expect("revoke unknown again");
}

#[tokio::test]
async fn revoke_all_for_user_ends_every_session() {
    let (service, user) = spawn_service().await;
    let first = login(&service, user).await;
    let second = login(&service, user).await;

    service.revoke_all_for_user(user).await.expect("revoke all");

    for tokens in [first.tokens, second.tokens] {
        let err = service
            .refresh(&format!("Bearer {}", tokens.refresh_token.0))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Revoked), "got {err:?}");
    }
}

#[tokio::test]
async fn garbage_headers_never_authorize() {
    let (service, _) = spawn_service().await;

    for header in ["", "Bearer", "bearer x", "Token abc"] {
        let err = service.authorize(header).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingToken), "{header:?} got {err:?}");
    }

    let err = service.authorize("Bearer not-a-jwt").await.unwrap_err();
    assert!(matches!(err, AuthError::Malformed), "got {err:?}");
}
