//! One function per user-facing auth flow.
//!
//! Every operation is a single action-factory call: validate the form
//! against its schema, call exactly one provider method, classify any
//! provider failure, attach a fixed success message. Retry, backoff and
//! idempotency are the provider's concern, not this layer's.

use crate::action::{ActionResult, FormData, Outcome, run_action, run_redirect_action};
use crate::errors::AppError;
use crate::provider::{IdentityProvider, OtpChannel, ProviderSession, ProviderUser, UserUpdate};
use crate::schema::{
    EmailUpdateSchema, EmptySchema, MagicLinkSchema, MagicLinkVerifySchema, OAuthCallbackSchema,
    OAuthStartSchema, PasswordUpdateSchema, PhoneOtpSendSchema, PhoneOtpVerifySchema,
    ProfileUpdateSchema, Schema, SignInSchema, SignUpSchema,
};

use super::errors::AuthError;
use super::types::SignUpOutcome;

fn provider_failure(err: crate::provider::ProviderError) -> AppError {
    AppError::Auth(AuthError::from_provider(&err))
}

pub async fn sign_in_with_password<P>(
    provider: &P,
    form: &FormData,
) -> ActionResult<ProviderSession>
where
    P: IdentityProvider + ?Sized,
{
    run_action("sign_in_with_password", &SignInSchema, form, |input| async move {
        let session = provider
            .sign_in_with_password(&input.email, &input.password)
            .await
            .map_err(provider_failure)?;
        Ok(Outcome::with_message(session, "Signed in successfully"))
    })
    .await
}

pub async fn sign_up_with_password<P>(
    provider: &P,
    form: &FormData,
) -> ActionResult<SignUpOutcome>
where
    P: IdentityProvider + ?Sized,
{
    run_action("sign_up_with_password", &SignUpSchema, form, |input| async move {
        let response = provider
            .sign_up(&input.email, &input.password, input.display_name.as_deref())
            .await
            .map_err(provider_failure)?;

        let message = if response.requires_confirmation {
            "Check your email to confirm your account"
        } else {
            "Account created successfully"
        };
        Ok(Outcome::with_message(
            SignUpOutcome {
                user: response.user,
                requires_confirmation: response.requires_confirmation,
            },
            message,
        ))
    })
    .await
}

pub async fn send_magic_link<P>(provider: &P, form: &FormData) -> ActionResult<()>
where
    P: IdentityProvider + ?Sized,
{
    run_action("send_magic_link", &MagicLinkSchema, form, |input| async move {
        provider
            .send_magic_link(&input.email)
            .await
            .map_err(provider_failure)?;
        Ok(Outcome::with_message((), "Magic link sent to your email"))
    })
    .await
}

pub async fn verify_magic_link<P>(provider: &P, form: &FormData) -> ActionResult<ProviderSession>
where
    P: IdentityProvider + ?Sized,
{
    run_action(
        "verify_magic_link",
        &MagicLinkVerifySchema,
        form,
        |input| async move {
            let session = provider
                .verify_otp(OtpChannel::Email, &input.email, &input.token)
                .await
                .map_err(provider_failure)?;
            Ok(Outcome::with_message(session, "Signed in successfully"))
        },
    )
    .await
}

pub async fn send_phone_otp<P>(provider: &P, form: &FormData) -> ActionResult<()>
where
    P: IdentityProvider + ?Sized,
{
    run_action("send_phone_otp", &PhoneOtpSendSchema, form, |input| async move {
        provider
            .send_otp(OtpChannel::Sms, &input.phone)
            .await
            .map_err(provider_failure)?;
        Ok(Outcome::with_message(
            (),
            "Verification code sent to your phone",
        ))
    })
    .await
}

pub async fn verify_phone_otp<P>(provider: &P, form: &FormData) -> ActionResult<ProviderSession>
where
    P: IdentityProvider + ?Sized,
{
    run_action(
        "verify_phone_otp",
        &PhoneOtpVerifySchema,
        form,
        |input| async move {
            let session = provider
                .verify_otp(OtpChannel::Sms, &input.phone, &input.token)
                .await
                .map_err(provider_failure)?;
            Ok(Outcome::with_message(session, "Phone number verified"))
        },
    )
    .await
}

/// OAuth initiation: resolves to the provider's authorize URL or
/// propagates the failure so a page-level redirect mechanism can act on
/// it. This is the one flow that rethrows instead of returning a result
/// object.
pub async fn begin_oauth<P>(provider: &P, form: &FormData) -> Result<String, AppError>
where
    P: IdentityProvider + ?Sized,
{
    let input = OAuthStartSchema
        .validate(form)
        .map_err(AppError::Validation)?;

    run_redirect_action("oauth_start", || async move {
        provider
            .authorize_url(&input.provider, input.redirect_to.as_deref())
            .map_err(provider_failure)
    })
    .await
}

pub async fn exchange_oauth_code<P>(
    provider: &P,
    form: &FormData,
) -> ActionResult<ProviderSession>
where
    P: IdentityProvider + ?Sized,
{
    run_action(
        "exchange_oauth_code",
        &OAuthCallbackSchema,
        form,
        |input| async move {
            let session = provider
                .exchange_code(&input.code)
                .await
                .map_err(provider_failure)?;
            Ok(Outcome::with_message(session, "Signed in successfully"))
        },
    )
    .await
}

pub async fn update_profile<P>(
    provider: &P,
    access_token: &str,
    form: &FormData,
) -> ActionResult<ProviderUser>
where
    P: IdentityProvider + ?Sized,
{
    run_action("update_profile", &ProfileUpdateSchema, form, |input| async move {
        let update = UserUpdate {
            display_name: Some(input.display_name),
            phone: input.phone,
            ..UserUpdate::default()
        };
        let user = provider
            .update_user(access_token, &update)
            .await
            .map_err(provider_failure)?;
        Ok(Outcome::with_message(user, "Profile updated"))
    })
    .await
}

pub async fn update_email<P>(
    provider: &P,
    access_token: &str,
    form: &FormData,
) -> ActionResult<ProviderUser>
where
    P: IdentityProvider + ?Sized,
{
    run_action("update_email", &EmailUpdateSchema, form, |input| async move {
        let update = UserUpdate {
            email: Some(input.email),
            ..UserUpdate::default()
        };
        let user = provider
            .update_user(access_token, &update)
            .await
            .map_err(provider_failure)?;
        Ok(Outcome::with_message(
            user,
            "Check your new email address to confirm the change",
        ))
    })
    .await
}

pub async fn update_password<P>(
    provider: &P,
    access_token: &str,
    form: &FormData,
) -> ActionResult<ProviderUser>
where
    P: IdentityProvider + ?Sized,
{
    run_action(
        "update_password",
        &PasswordUpdateSchema,
        form,
        |input| async move {
            let update = UserUpdate {
                password: Some(input.password),
                ..UserUpdate::default()
            };
            let user = provider
                .update_user(access_token, &update)
                .await
                .map_err(provider_failure)?;
            Ok(Outcome::with_message(user, "Password updated"))
        },
    )
    .await
}

pub async fn sign_out<P>(provider: &P, access_token: &str) -> ActionResult<()>
where
    P: IdentityProvider + ?Sized,
{
    run_action("sign_out", &EmptySchema, &FormData::new(), |()| async move {
        provider
            .sign_out(access_token)
            .await
            .map_err(provider_failure)?;
        Ok(Outcome::with_message((), "Signed out"))
    })
    .await
}
