//! Composite schemas: one per portal operation, assembled from the
//! primitive validators in `fields`. Each schema validates in declared
//! field order and reports every violated rule; the action factory
//! surfaces the first.

use crate::action::FormData;

use super::errors::{FieldViolation, ValidationError};
use super::fields::*;

/// A declarative description of one operation's expected input shape.
///
/// Validating a well-formed submission returns the typed value with
/// exactly the declared fields; a malformed one returns the structured
/// violation list. No side effects.
pub trait Schema {
    type Output;

    fn validate(&self, form: &FormData) -> Result<Self::Output, ValidationError>;
}

/// Accumulates violations in the order rules are checked.
#[derive(Default)]
struct Violations(Vec<FieldViolation>);

impl Violations {
    fn check(&mut self, ok: bool, field: &'static str, message: &'static str) {
        if !ok {
            self.0.push(FieldViolation { field, message });
        }
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError::new(self.0))
        }
    }
}

pub struct SignInSchema;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

impl Schema for SignInSchema {
    type Output = SignInInput;

    fn validate(&self, form: &FormData) -> Result<Self::Output, ValidationError> {
        let email = form.field("email").trim().to_string();
        let password = form.field("password").to_string();

        let mut v = Violations::default();
        v.check(is_valid_email(&email), "email", MSG_EMAIL);
        v.check(!password.is_empty(), "password", MSG_PASSWORD_REQUIRED);
        v.finish(SignInInput { email, password })
    }
}

pub struct SignUpSchema;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

impl Schema for SignUpSchema {
    type Output = SignUpInput;

    fn validate(&self, form: &FormData) -> Result<Self::Output, ValidationError> {
        let email = form.field("email").trim().to_string();
        let password = form.field("password").to_string();
        let confirm = form.field("confirm_password");
        let display_name = form.get("display_name").map(|s| s.trim().to_string());

        let mut v = Violations::default();
        v.check(is_valid_email(&email), "email", MSG_EMAIL);
        v.check(is_strong_password(&password), "password", MSG_PASSWORD_WEAK);
        v.check(confirm == password, "confirm_password", MSG_PASSWORD_MISMATCH);
        if let Some(name) = &display_name {
            v.check(is_valid_display_name(name), "display_name", MSG_DISPLAY_NAME);
        }
        v.finish(SignUpInput {
            email,
            password,
            display_name,
        })
    }
}

pub struct MagicLinkSchema;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagicLinkInput {
    pub email: String,
}

impl Schema for MagicLinkSchema {
    type Output = MagicLinkInput;

    fn validate(&self, form: &FormData) -> Result<Self::Output, ValidationError> {
        let email = form.field("email").trim().to_string();

        let mut v = Violations::default();
        v.check(is_valid_email(&email), "email", MSG_EMAIL);
        v.finish(MagicLinkInput { email })
    }
}

pub struct MagicLinkVerifySchema;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagicLinkVerifyInput {
    pub email: String,
    pub token: String,
}

impl Schema for MagicLinkVerifySchema {
    type Output = MagicLinkVerifyInput;

    fn validate(&self, form: &FormData) -> Result<Self::Output, ValidationError> {
        let email = form.field("email").trim().to_string();
        let token = form.field("token").trim().to_string();

        let mut v = Violations::default();
        v.check(is_valid_email(&email), "email", MSG_EMAIL);
        v.check(is_valid_otp(&token), "token", MSG_OTP);
        v.finish(MagicLinkVerifyInput { email, token })
    }
}

pub struct PhoneOtpSendSchema;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneOtpSendInput {
    pub phone: String,
}

impl Schema for PhoneOtpSendSchema {
    type Output = PhoneOtpSendInput;

    fn validate(&self, form: &FormData) -> Result<Self::Output, ValidationError> {
        let phone = form.field("phone").trim().to_string();

        let mut v = Violations::default();
        v.check(is_valid_phone(&phone), "phone", MSG_PHONE);
        v.finish(PhoneOtpSendInput { phone })
    }
}

pub struct PhoneOtpVerifySchema;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneOtpVerifyInput {
    pub phone: String,
    pub token: String,
}

impl Schema for PhoneOtpVerifySchema {
    type Output = PhoneOtpVerifyInput;

    fn validate(&self, form: &FormData) -> Result<Self::Output, ValidationError> {
        let phone = form.field("phone").trim().to_string();
        let token = form.field("token").trim().to_string();

        let mut v = Violations::default();
        v.check(is_valid_phone(&phone), "phone", MSG_PHONE);
        v.check(is_valid_otp(&token), "token", MSG_OTP);
        v.finish(PhoneOtpVerifyInput { phone, token })
    }
}

pub struct OAuthStartSchema;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthStartInput {
    pub provider: String,
    pub redirect_to: Option<String>,
}

impl Schema for OAuthStartSchema {
    type Output = OAuthStartInput;

    fn validate(&self, form: &FormData) -> Result<Self::Output, ValidationError> {
        let provider = form.field("provider").trim().to_lowercase();
        let redirect_to = form.get("redirect_to").map(|s| s.to_string());

        let mut v = Violations::default();
        v.check(
            OAUTH_PROVIDERS.contains(&provider.as_str()),
            "provider",
            MSG_OAUTH_PROVIDER,
        );
        v.finish(OAuthStartInput {
            provider,
            redirect_to,
        })
    }
}

pub struct OAuthCallbackSchema;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthCallbackInput {
    pub code: String,
}

impl Schema for OAuthCallbackSchema {
    type Output = OAuthCallbackInput;

    fn validate(&self, form: &FormData) -> Result<Self::Output, ValidationError> {
        let code = form.field("code").trim().to_string();

        let mut v = Violations::default();
        v.check(!code.is_empty(), "code", MSG_OAUTH_CODE);
        v.finish(OAuthCallbackInput { code })
    }
}

pub struct ProfileUpdateSchema;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdateInput {
    pub display_name: String,
    pub phone: Option<String>,
}

impl Schema for ProfileUpdateSchema {
    type Output = ProfileUpdateInput;

    fn validate(&self, form: &FormData) -> Result<Self::Output, ValidationError> {
        let display_name = form.field("display_name").trim().to_string();
        let phone = form
            .get("phone")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        let mut v = Violations::default();
        v.check(
            is_valid_display_name(&display_name),
            "display_name",
            MSG_DISPLAY_NAME,
        );
        if let Some(phone) = &phone {
            v.check(is_valid_phone(phone), "phone", MSG_PHONE);
        }
        v.finish(ProfileUpdateInput {
            display_name,
            phone,
        })
    }
}

pub struct EmailUpdateSchema;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailUpdateInput {
    pub email: String,
}

impl Schema for EmailUpdateSchema {
    type Output = EmailUpdateInput;

    fn validate(&self, form: &FormData) -> Result<Self::Output, ValidationError> {
        let email = form.field("email").trim().to_string();

        let mut v = Violations::default();
        v.check(is_valid_email(&email), "email", MSG_EMAIL);
        v.finish(EmailUpdateInput { email })
    }
}

pub struct PasswordUpdateSchema;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordUpdateInput {
    pub password: String,
}

impl Schema for PasswordUpdateSchema {
    type Output = PasswordUpdateInput;

    fn validate(&self, form: &FormData) -> Result<Self::Output, ValidationError> {
        let password = form.field("password").to_string();
        let confirm = form.field("confirm_password");

        let mut v = Violations::default();
        v.check(is_strong_password(&password), "password", MSG_PASSWORD_WEAK);
        v.check(confirm == password, "confirm_password", MSG_PASSWORD_MISMATCH);
        v.finish(PasswordUpdateInput { password })
    }
}

/// For operations with no input (sign-out).
pub struct EmptySchema;

impl Schema for EmptySchema {
    type Output = ();

    fn validate(&self, _form: &FormData) -> Result<Self::Output, ValidationError> {
        Ok(())
    }
}
