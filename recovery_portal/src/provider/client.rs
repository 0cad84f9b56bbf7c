use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;

use super::config::{IDENTITY_API_KEY, IDENTITY_BASE_URL, IDENTITY_REDIRECT_URI};
use super::errors::ProviderError;
use super::types::{OtpChannel, ProviderSession, ProviderUser, SignUpResponse, UserUpdate};

/// The seam between the auth operations and the hosted identity provider.
///
/// All credential storage, token issuance and session persistence live on
/// the provider's side; implementations only shape requests and decode
/// responses. The portal constructs one client at startup and injects it
/// into whatever runs the operations.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, ProviderError>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<SignUpResponse, ProviderError>;

    async fn send_magic_link(&self, email: &str) -> Result<(), ProviderError>;

    async fn send_otp(&self, channel: OtpChannel, target: &str) -> Result<(), ProviderError>;

    async fn verify_otp(
        &self,
        channel: OtpChannel,
        target: &str,
        token: &str,
    ) -> Result<ProviderSession, ProviderError>;

    /// Assemble the URL the browser should be redirected to for an OAuth
    /// sign-in with the named upstream provider.
    fn authorize_url(
        &self,
        provider: &str,
        redirect_to: Option<&str>,
    ) -> Result<String, ProviderError>;

    async fn exchange_code(&self, code: &str) -> Result<ProviderSession, ProviderError>;

    async fn update_user(
        &self,
        access_token: &str,
        update: &UserUpdate,
    ) -> Result<ProviderUser, ProviderError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError>;
}

/// reqwest-backed client speaking the provider's GoTrue-style REST API
#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    redirect_uri: String,
}

impl HttpIdentityProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            redirect_uri: redirect_uri.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(
            IDENTITY_BASE_URL.as_str(),
            IDENTITY_API_KEY.as_str(),
            IDENTITY_REDIRECT_URI.as_str(),
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post_json(
        &self,
        path: &str,
        body: Value,
        bearer: Option<&str>,
    ) -> Result<String, ProviderError> {
        let mut request = self
            .client
            .post(self.endpoint(path))
            .header("apikey", &self.api_key)
            .json(&body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        if status.is_success() {
            Ok(text)
        } else {
            Err(decode_api_error(status.as_u16(), &text))
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, ProviderError> {
        let body = self
            .post_json(
                "/token?grant_type=password",
                json!({ "email": email, "password": password }),
                None,
            )
            .await?;
        decode_session(&body)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<SignUpResponse, ProviderError> {
        let mut payload = json!({ "email": email, "password": password });
        if let Some(name) = display_name {
            payload["data"] = json!({ "display_name": name });
        }
        let body = self.post_json("/signup", payload, None).await?;

        // The provider answers with a full session when the account is
        // immediately usable, or with a bare user record while email
        // confirmation is pending.
        let value: Value =
            serde_json::from_str(&body).map_err(|e| ProviderError::Serde(e.to_string()))?;

        if value.get("access_token").is_some() {
            let session = decode_session(&body)?;
            Ok(SignUpResponse {
                user: session.user.clone(),
                session: Some(session),
                requires_confirmation: false,
            })
        } else {
            let raw: RawUser =
                serde_json::from_value(value).map_err(|e| ProviderError::Serde(e.to_string()))?;
            let user = ProviderUser::from(raw);
            let requires_confirmation = !user.email_confirmed;
            Ok(SignUpResponse {
                user,
                session: None,
                requires_confirmation,
            })
        }
    }

    async fn send_magic_link(&self, email: &str) -> Result<(), ProviderError> {
        self.post_json("/magiclink", json!({ "email": email }), None)
            .await?;
        Ok(())
    }

    async fn send_otp(&self, channel: OtpChannel, target: &str) -> Result<(), ProviderError> {
        let payload = match channel {
            OtpChannel::Email => json!({ "email": target }),
            OtpChannel::Sms => json!({ "phone": target }),
        };
        self.post_json("/otp", payload, None).await?;
        Ok(())
    }

    async fn verify_otp(
        &self,
        channel: OtpChannel,
        target: &str,
        token: &str,
    ) -> Result<ProviderSession, ProviderError> {
        let payload = match channel {
            OtpChannel::Email => {
                json!({ "type": "magiclink", "email": target, "token": token })
            }
            OtpChannel::Sms => json!({ "type": "sms", "phone": target, "token": token }),
        };
        let body = self.post_json("/verify", payload, None).await?;
        decode_session(&body)
    }

    fn authorize_url(
        &self,
        provider: &str,
        redirect_to: Option<&str>,
    ) -> Result<String, ProviderError> {
        let mut url = Url::parse(&self.endpoint("/authorize"))
            .map_err(|e| ProviderError::Http(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("provider", provider)
            .append_pair("redirect_uri", &self.redirect_uri);
        if let Some(redirect_to) = redirect_to {
            url.query_pairs_mut().append_pair("redirect_to", redirect_to);
        }
        Ok(url.to_string())
    }

    async fn exchange_code(&self, code: &str) -> Result<ProviderSession, ProviderError> {
        let body = self
            .post_json(
                "/token?grant_type=authorization_code",
                json!({ "code": code }),
                None,
            )
            .await?;
        decode_session(&body)
    }

    async fn update_user(
        &self,
        access_token: &str,
        update: &UserUpdate,
    ) -> Result<ProviderUser, ProviderError> {
        let mut payload = json!({});
        if let Some(email) = &update.email {
            payload["email"] = json!(email);
        }
        if let Some(password) = &update.password {
            payload["password"] = json!(password);
        }
        if let Some(phone) = &update.phone {
            payload["phone"] = json!(phone);
        }
        if let Some(display_name) = &update.display_name {
            payload["data"] = json!({ "display_name": display_name });
        }

        let response = self
            .client
            .put(self.endpoint("/user"))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(decode_api_error(status.as_u16(), &text));
        }

        let raw: RawUser =
            serde_json::from_str(&text).map_err(|e| ProviderError::Serde(e.to_string()))?;
        Ok(ProviderUser::from(raw))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError> {
        self.post_json("/logout", json!({}), Some(access_token))
            .await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RawSession {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    user: RawUser,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    email_confirmed_at: Option<String>,
    #[serde(default)]
    user_metadata: Option<Value>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl From<RawUser> for ProviderUser {
    fn from(raw: RawUser) -> Self {
        let display_name = raw
            .user_metadata
            .as_ref()
            .and_then(|m| m.get("display_name"))
            .and_then(Value::as_str)
            .map(|s| s.to_string());
        Self {
            id: raw.id,
            email: raw.email.filter(|s| !s.is_empty()),
            phone: raw.phone.filter(|s| !s.is_empty()),
            display_name,
            email_confirmed: raw.email_confirmed_at.is_some(),
            created_at: raw.created_at,
        }
    }
}

fn decode_session(body: &str) -> Result<ProviderSession, ProviderError> {
    let raw: RawSession =
        serde_json::from_str(body).map_err(|e| ProviderError::Serde(e.to_string()))?;
    Ok(ProviderSession {
        access_token: raw.access_token,
        refresh_token: raw.refresh_token,
        expires_in: raw.expires_in,
        user: ProviderUser::from(raw.user),
    })
}

/// Decode a non-success response body into a classified API error. The
/// provider uses several error shapes; take whichever code/message pair
/// is present.
fn decode_api_error(status: u16, body: &str) -> ProviderError {
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => {
            return ProviderError::Api {
                status,
                code: None,
                message: body.to_string(),
            };
        }
    };

    let code = value
        .get("error_code")
        .or_else(|| value.get("error"))
        .and_then(Value::as_str)
        .map(|s| s.to_string());
    let message = value
        .get("msg")
        .or_else(|| value.get("error_description"))
        .or_else(|| value.get("message"))
        .and_then(Value::as_str)
        .unwrap_or(body)
        .to_string();

    ProviderError::Api {
        status,
        code,
        message,
    }
}
