use std::sync::Once;

use async_trait::async_trait;
use recovery_portal::{
    IdentityProvider, OtpChannel, ProviderError, ProviderSession, ProviderUser, SignUpResponse,
    UserUpdate,
};

/// One-time environment setup plus store initialization for router tests.
///
/// Points the data store at a file-backed SQLite database under the
/// system temp directory (a pooled `sqlite::memory:` store would give
/// each pooled connection its own empty database) and removes any stale
/// file from a previous run before the pool is first touched.
pub async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }

        if std::env::var("DATA_STORE_URL").is_err() {
            let db_path = std::env::temp_dir().join("recovery_portal_axum_test.db");
            let _ = std::fs::remove_file(&db_path);
            unsafe {
                std::env::set_var("DATA_STORE_TYPE", "sqlite");
                std::env::set_var("DATA_STORE_URL", format!("sqlite:{}", db_path.display()));
            }
        }
    });

    if let Err(e) = recovery_portal_axum::init().await {
        eprintln!("Warning: Failed to initialize stores: {e}");
    }
}

fn stub_user(email: &str) -> ProviderUser {
    ProviderUser {
        id: "stub-user".to_string(),
        email: Some(email.to_string()),
        phone: None,
        display_name: None,
        email_confirmed: true,
        created_at: None,
    }
}

fn stub_session(email: &str) -> ProviderSession {
    ProviderSession {
        access_token: "stub-access-token".to_string(),
        refresh_token: None,
        expires_in: Some(3600),
        user: stub_user(email),
    }
}

/// Always-succeeding in-process stand-in for the hosted identity
/// provider, enough to drive the router end to end.
pub struct StubProvider;

#[async_trait]
impl IdentityProvider for StubProvider {
    async fn sign_in_with_password(
        &self,
        email: &str,
        _password: &str,
    ) -> Result<ProviderSession, ProviderError> {
        Ok(stub_session(email))
    }

    async fn sign_up(
        &self,
        email: &str,
        _password: &str,
        _display_name: Option<&str>,
    ) -> Result<SignUpResponse, ProviderError> {
        Ok(SignUpResponse {
            user: stub_user(email),
            session: Some(stub_session(email)),
            requires_confirmation: false,
        })
    }

    async fn send_magic_link(&self, _email: &str) -> Result<(), ProviderError> {
        Ok(())
    }

    async fn send_otp(&self, _channel: OtpChannel, _target: &str) -> Result<(), ProviderError> {
        Ok(())
    }

    async fn verify_otp(
        &self,
        _channel: OtpChannel,
        target: &str,
        _token: &str,
    ) -> Result<ProviderSession, ProviderError> {
        Ok(stub_session(target))
    }

    fn authorize_url(
        &self,
        provider: &str,
        redirect_to: Option<&str>,
    ) -> Result<String, ProviderError> {
        let mut url = format!("https://identity.example.com/authorize?provider={provider}");
        if let Some(target) = redirect_to {
            url.push_str("&redirect_to=");
            url.push_str(target);
        }
        Ok(url)
    }

    async fn exchange_code(&self, _code: &str) -> Result<ProviderSession, ProviderError> {
        Ok(stub_session("user@example.com"))
    }

    async fn update_user(
        &self,
        _access_token: &str,
        _update: &UserUpdate,
    ) -> Result<ProviderUser, ProviderError> {
        Ok(stub_user("user@example.com"))
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), ProviderError> {
        Ok(())
    }
}
