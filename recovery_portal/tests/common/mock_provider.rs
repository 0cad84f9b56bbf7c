use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use recovery_portal::{
    IdentityProvider, OtpChannel, ProviderError, ProviderSession, ProviderUser, SignUpResponse,
    UserUpdate,
};

use super::fixtures;

/// Per-method call counters so tests can assert exactly which provider
/// methods an operation reached.
#[derive(Debug, Default)]
pub struct CallCounts {
    pub sign_in: AtomicUsize,
    pub sign_up: AtomicUsize,
    pub send_magic_link: AtomicUsize,
    pub send_otp: AtomicUsize,
    pub verify_otp: AtomicUsize,
    pub authorize_url: AtomicUsize,
    pub exchange_code: AtomicUsize,
    pub update_user: AtomicUsize,
    pub sign_out: AtomicUsize,
}

/// Scriptable in-process stand-in for the hosted identity provider.
///
/// By default every method succeeds with fixture data; `fail_next_with`
/// arms a one-shot failure that the next provider call consumes.
pub struct MockProvider {
    pub calls: CallCounts,
    fail_with: Mutex<Option<ProviderError>>,
    confirmation_required: bool,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            calls: CallCounts::default(),
            fail_with: Mutex::new(None),
            confirmation_required: false,
        }
    }

    /// Provider that answers sign-up with a pending-confirmation
    /// response instead of an immediate session.
    pub fn requiring_confirmation() -> Self {
        Self {
            confirmation_required: true,
            ..Self::new()
        }
    }

    pub fn fail_next_with(&self, error: ProviderError) {
        *self.fail_with.lock().unwrap() = Some(error);
    }

    fn take_failure(&self) -> Result<(), ProviderError> {
        match self.fail_with.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for MockProvider {
    async fn sign_in_with_password(
        &self,
        email: &str,
        _password: &str,
    ) -> Result<ProviderSession, ProviderError> {
        self.calls.sign_in.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;
        Ok(fixtures::provider_session(email))
    }

    async fn sign_up(
        &self,
        email: &str,
        _password: &str,
        display_name: Option<&str>,
    ) -> Result<SignUpResponse, ProviderError> {
        self.calls.sign_up.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;

        let mut user = fixtures::provider_user(email);
        if let Some(name) = display_name {
            user.display_name = Some(name.to_string());
        }

        if self.confirmation_required {
            Ok(SignUpResponse {
                user: ProviderUser {
                    email_confirmed: false,
                    ..user
                },
                session: None,
                requires_confirmation: true,
            })
        } else {
            let session = ProviderSession {
                user: user.clone(),
                ..fixtures::provider_session(email)
            };
            Ok(SignUpResponse {
                user,
                session: Some(session),
                requires_confirmation: false,
            })
        }
    }

    async fn send_magic_link(&self, _email: &str) -> Result<(), ProviderError> {
        self.calls.send_magic_link.fetch_add(1, Ordering::SeqCst);
        self.take_failure()
    }

    async fn send_otp(&self, _channel: OtpChannel, _target: &str) -> Result<(), ProviderError> {
        self.calls.send_otp.fetch_add(1, Ordering::SeqCst);
        self.take_failure()
    }

    async fn verify_otp(
        &self,
        channel: OtpChannel,
        target: &str,
        _token: &str,
    ) -> Result<ProviderSession, ProviderError> {
        self.calls.verify_otp.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;

        let mut session = fixtures::provider_session(target);
        if channel == OtpChannel::Sms {
            session.user.email = None;
            session.user.phone = Some(target.to_string());
        }
        Ok(session)
    }

    fn authorize_url(
        &self,
        provider: &str,
        redirect_to: Option<&str>,
    ) -> Result<String, ProviderError> {
        self.calls.authorize_url.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.fail_with.lock().unwrap().take() {
            return Err(err);
        }
        let mut url = format!("https://identity.example.com/authorize?provider={provider}");
        if let Some(target) = redirect_to {
            url.push_str("&redirect_to=");
            url.push_str(target);
        }
        Ok(url)
    }

    async fn exchange_code(&self, _code: &str) -> Result<ProviderSession, ProviderError> {
        self.calls.exchange_code.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;
        Ok(fixtures::provider_session("user@example.com"))
    }

    async fn update_user(
        &self,
        _access_token: &str,
        update: &UserUpdate,
    ) -> Result<ProviderUser, ProviderError> {
        self.calls.update_user.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;

        let mut user = fixtures::provider_user("user@example.com");
        if let Some(email) = &update.email {
            user.email = Some(email.clone());
        }
        if let Some(phone) = &update.phone {
            user.phone = Some(phone.clone());
        }
        if let Some(name) = &update.display_name {
            user.display_name = Some(name.clone());
        }
        Ok(user)
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), ProviderError> {
        self.calls.sign_out.fetch_add(1, Ordering::SeqCst);
        self.take_failure()
    }
}
