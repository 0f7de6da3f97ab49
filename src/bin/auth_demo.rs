/// Example demonstrating how to call the auth service end to end.
///
/// Runs against the in-memory stores with the dev settings. Switch
/// `store.backend` to `"mysql"` (with `mysql_dsn` pointing at a prepared
/// database) to exercise the MySQL adapters instead:
///
/// $ cargo run --bin auth_demo -- --settings=settings/dev.toml

use std::sync::Arc;

use chrono::Duration;
use sqlx::{MySql, Pool};

use clavier::application_impl::{
    BcryptHasher, FakeAuthService, JwtHs256Codec, RealAuthService, RefreshTokenManager,
};
use clavier::application_port::{AuthService, CredentialHasher, LoginInput, TokenCodec};
use clavier::domain_model::UserId;
use clavier::domain_port::{CredentialStore, RefreshTokenStore};
use clavier::infra_mem::{MemCredentialStore, MemRefreshTokenStore};
use clavier::infra_mysql::{MySqlCredentialStore, MySqlRefreshTokenStore};
use clavier::logger::*;
use clavier::settings::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap();

    let project_settings = parse_settings(cli.settings.as_deref())?;
    info!(?project_settings);
    let logger_config = LogConfig {
        filter: project_settings.log.filter.clone(),
    };
    logger.reload_from_config(&logger_config)?;


    // region initialization

    let (credential_store, refresh_token_store): (
        Arc<dyn CredentialStore>,
        Arc<dyn RefreshTokenStore>,
    ) = match project_settings.store.backend.as_str() {
        "memory" => (
            Arc::new(MemCredentialStore::new()),
            Arc::new(MemRefreshTokenStore::new()),
        ),
        "mysql" => {
            let pool = Pool::<MySql>::connect(&project_settings.store.mysql_dsn).await?;
            let value: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&pool).await?;
            println!("MySQL -> {}", value);
            (
                Arc::new(MySqlCredentialStore::new(pool.clone())),
                Arc::new(MySqlRefreshTokenStore::new(pool)),
            )
        }
        other => return Err(anyhow::anyhow!("Unknown store backend: {}", other)),
    };

    let signing_key = std::env::var("JWT_SIGNING_KEY")
        .unwrap_or_else(|_| "my-dev-secret-key".to_string())
        .into_bytes();

    let auth_service: Arc<dyn AuthService> = match project_settings.auth.backend.as_str() {
        "fake" => Arc::new(FakeAuthService::new()),
        "real" => {
            let credential_hasher: Arc<dyn CredentialHasher> =
                Arc::new(BcryptHasher::new(project_settings.auth.bcrypt_cost));
            let token_codec: Arc<dyn TokenCodec> = Arc::new(JwtHs256Codec::new(signing_key));
            let refresh_tokens = RefreshTokenManager::new(
                refresh_token_store.clone(),
                Duration::seconds(project_settings.auth.refresh_ttl_secs),
            );
            Arc::new(RealAuthService::new(
                credential_store.clone(),
                credential_hasher,
                token_codec,
                refresh_tokens,
                Duration::seconds(project_settings.auth.access_ttl_secs),
            ))
        }
        other => return Err(anyhow::anyhow!("Unknown auth backend: {}", other)),
    };

    // endregion


    // use cases

    const PASSWORD: &str = "testpass";

    let user_id = UserId(uuid::Uuid::new_v4());
    let password_hash = auth_service.hash_password(PASSWORD).await?;
    credential_store
        .store_credential_hash(user_id, &password_hash)
        .await?;
    debug!("seeded user: {}", user_id);

    let login_result = auth_service
        .login(LoginInput {
            user_id,
            password: PASSWORD.to_string(),
        })
        .await?;
    debug!("login_result: {:?}", login_result);
    println!("{}", serde_json::to_string_pretty(&login_result.tokens)?);

    let wrong_password = auth_service
        .login(LoginInput {
            user_id,
            password: "not-the-password".to_string(),
        })
        .await;
    debug!("login with a wrong password -> {:?}", wrong_password);

    let access_header = format!("Bearer {}", login_result.tokens.access_token.0);
    let authorized = auth_service.authorize(&access_header).await?;
    debug!("authorize -> {}", authorized);

    let refresh_header = format!("Bearer {}", login_result.tokens.refresh_token.0);
    let (new_access, new_access_exp) = auth_service.refresh(&refresh_header).await?;
    debug!("refresh -> new access token expiring {}", new_access_exp);
    let authorized = auth_service
        .authorize(&format!("Bearer {}", new_access.0))
        .await?;
    debug!("authorize with the refreshed token -> {}", authorized);

    auth_service.revoke(&refresh_header).await?;
    auth_service.revoke(&refresh_header).await?; // a second revoke is silent
    let refused = auth_service.refresh(&refresh_header).await;
    debug!("refresh after revoke -> {:?}", refused);

    // Access tokens carry no server-side state; revoking the refresh
    // token does not recall them.
    let authorized = auth_service.authorize(&access_header).await?;
    debug!("access token survives revocation -> {}", authorized);

    let second_login = auth_service
        .login(LoginInput {
            user_id,
            password: PASSWORD.to_string(),
        })
        .await?;
    auth_service.revoke_all_for_user(user_id).await?;
    let refused = auth_service
        .refresh(&format!("Bearer {}", second_login.tokens.refresh_token.0))
        .await;
    debug!("refresh after revoke_all_for_user -> {:?}", refused);

    Ok(())
}
