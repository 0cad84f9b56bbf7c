use std::sync::atomic::Ordering;

use recovery_portal::{
    ProviderError, begin_oauth, exchange_oauth_code, send_magic_link, send_phone_otp,
    sign_in_with_password, sign_out, sign_up_with_password, update_email, update_password,
    update_profile, verify_magic_link, verify_phone_otp,
};

use crate::common::fixtures::form;
use crate::common::mock_provider::MockProvider;

fn invalid_credentials_error() -> ProviderError {
    ProviderError::Api {
        status: 400,
        code: Some("invalid_credentials".to_string()),
        message: "Invalid login credentials".to_string(),
    }
}

#[tokio::test]
async fn test_sign_in_success() {
    // Given a provider that accepts the credentials
    let provider = MockProvider::new();
    let form = form(&[
        ("email", "user@example.com"),
        ("password", "Abcdef1!"),
    ]);

    // When signing in
    let result = sign_in_with_password(&provider, &form).await;

    // Then a session comes back with the success message
    assert!(result.is_success());
    let session = result.data.expect("session expected");
    assert_eq!(session.user.email.as_deref(), Some("user@example.com"));
    assert_eq!(result.message.as_deref(), Some("Signed in successfully"));
    assert_eq!(provider.calls.sign_in.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_sign_in_malformed_email_never_reaches_provider() {
    // Given a malformed email
    let provider = MockProvider::new();
    let form = form(&[("email", "not-an-email"), ("password", "Abcdef1!")]);

    // When signing in
    let result = sign_in_with_password(&provider, &form).await;

    // Then validation fails and the provider is never called
    assert!(!result.is_success());
    assert_eq!(
        result.error.as_deref(),
        Some("Please enter a valid email address")
    );
    assert_eq!(provider.calls.sign_in.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_sign_in_wrong_password_maps_to_fixed_phrase() {
    // Given a provider that rejects the credentials
    let provider = MockProvider::new();
    provider.fail_next_with(invalid_credentials_error());
    let form = form(&[("email", "user@example.com"), ("password", "Abcdef1!")]);

    // When signing in
    let result = sign_in_with_password(&provider, &form).await;

    // Then the user sees the classified phrase, not the provider text
    assert!(!result.is_success());
    assert_eq!(
        result.error.as_deref(),
        Some("The email or password you entered is incorrect.")
    );
}

#[tokio::test]
async fn test_sign_up_with_immediate_session() {
    let provider = MockProvider::new();
    let form = form(&[
        ("email", "new@example.com"),
        ("password", "Abcdef1!"),
        ("confirm_password", "Abcdef1!"),
        ("display_name", "New User"),
    ]);

    let result = sign_up_with_password(&provider, &form).await;

    assert!(result.is_success());
    let outcome = result.data.expect("outcome expected");
    assert!(!outcome.requires_confirmation);
    assert_eq!(outcome.user.display_name.as_deref(), Some("New User"));
    assert_eq!(
        result.message.as_deref(),
        Some("Account created successfully")
    );
}

#[tokio::test]
async fn test_sign_up_requiring_email_confirmation_is_not_an_error() {
    // Given a provider configured to require email confirmation
    let provider = MockProvider::requiring_confirmation();
    let form = form(&[
        ("email", "new@example.com"),
        ("password", "Abcdef1!"),
        ("confirm_password", "Abcdef1!"),
    ]);

    // When signing up
    let result = sign_up_with_password(&provider, &form).await;

    // Then the flow succeeds with the confirmation flag and message
    assert!(result.is_success());
    let outcome = result.data.expect("outcome expected");
    assert!(outcome.requires_confirmation);
    assert_eq!(
        result.message.as_deref(),
        Some("Check your email to confirm your account")
    );
}

#[tokio::test]
async fn test_sign_up_password_mismatch_blocks_provider_call() {
    let provider = MockProvider::new();
    let form = form(&[
        ("email", "new@example.com"),
        ("password", "Abcdef1!"),
        ("confirm_password", "different1"),
    ]);

    let result = sign_up_with_password(&provider, &form).await;

    assert!(!result.is_success());
    assert_eq!(result.error.as_deref(), Some("Passwords do not match"));
    assert_eq!(provider.calls.sign_up.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_sign_up_duplicate_email_maps_to_fixed_phrase() {
    let provider = MockProvider::new();
    provider.fail_next_with(ProviderError::Api {
        status: 422,
        code: Some("user_already_exists".to_string()),
        message: "User already registered".to_string(),
    });
    let form = form(&[
        ("email", "taken@example.com"),
        ("password", "Abcdef1!"),
        ("confirm_password", "Abcdef1!"),
    ]);

    let result = sign_up_with_password(&provider, &form).await;

    assert!(!result.is_success());
    assert_eq!(
        result.error.as_deref(),
        Some("An account with this email already exists.")
    );
}

#[tokio::test]
async fn test_magic_link_send_and_verify() {
    let provider = MockProvider::new();

    // When requesting a magic link
    let sent = send_magic_link(&provider, &form(&[("email", "user@example.com")])).await;
    assert!(sent.is_success());
    assert_eq!(
        sent.message.as_deref(),
        Some("Magic link sent to your email")
    );

    // And verifying the emailed token
    let verified = verify_magic_link(
        &provider,
        &form(&[("email", "user@example.com"), ("token", "123456")]),
    )
    .await;

    assert!(verified.is_success());
    assert!(verified.data.is_some());
    assert_eq!(provider.calls.send_magic_link.load(Ordering::SeqCst), 1);
    assert_eq!(provider.calls.verify_otp.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_magic_link_verify_rejects_short_token() {
    let provider = MockProvider::new();

    let result = verify_magic_link(
        &provider,
        &form(&[("email", "user@example.com"), ("token", "123")]),
    )
    .await;

    assert!(!result.is_success());
    assert_eq!(
        result.error.as_deref(),
        Some("Verification code must be 6 digits")
    );
    assert_eq!(provider.calls.verify_otp.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_phone_otp_send_and_verify() {
    let provider = MockProvider::new();

    let sent = send_phone_otp(&provider, &form(&[("phone", "+15551234567")])).await;
    assert!(sent.is_success());
    assert_eq!(
        sent.message.as_deref(),
        Some("Verification code sent to your phone")
    );

    let verified = verify_phone_otp(
        &provider,
        &form(&[("phone", "+15551234567"), ("token", "654321")]),
    )
    .await;

    assert!(verified.is_success());
    assert_eq!(verified.message.as_deref(), Some("Phone number verified"));
    let session = verified.data.expect("session expected");
    assert_eq!(session.user.phone.as_deref(), Some("+15551234567"));
}

#[tokio::test]
async fn test_phone_otp_expired_code_maps_to_fixed_phrase() {
    let provider = MockProvider::new();
    provider.fail_next_with(ProviderError::Api {
        status: 401,
        code: Some("otp_expired".to_string()),
        message: "Token has expired or is invalid".to_string(),
    });

    let result = verify_phone_otp(
        &provider,
        &form(&[("phone", "+15551234567"), ("token", "654321")]),
    )
    .await;

    assert!(!result.is_success());
    assert_eq!(
        result.error.as_deref(),
        Some("That verification code has expired. Request a new one.")
    );
}

#[tokio::test]
async fn test_oauth_redirect_flow() {
    let provider = MockProvider::new();

    // When starting an OAuth flow for a supported upstream provider
    let url = begin_oauth(&provider, &form(&[("provider", "google")]))
        .await
        .expect("redirect URL expected");
    assert!(url.contains("provider=google"));

    // And exchanging the callback code
    let result = exchange_oauth_code(&provider, &form(&[("code", "auth-code-1")])).await;
    assert!(result.is_success());
    assert_eq!(result.message.as_deref(), Some("Signed in successfully"));
}

#[tokio::test]
async fn test_oauth_rejects_unsupported_provider() {
    let provider = MockProvider::new();

    // When starting a flow for an upstream provider not on the allow-list
    let result = begin_oauth(&provider, &form(&[("provider", "myspace")])).await;

    // Then the redirect action propagates the failure to the caller
    let err = result.expect_err("must be rejected");
    assert_eq!(err.user_message(), "Unsupported sign-in provider");
    assert_eq!(provider.calls.authorize_url.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_profile_and_credential_updates() {
    let provider = MockProvider::new();

    let profile = update_profile(
        &provider,
        "access-token-1",
        &form(&[("display_name", "Renamed"), ("phone", "+15551234567")]),
    )
    .await;
    assert!(profile.is_success());
    let user = profile.data.expect("user expected");
    assert_eq!(user.display_name.as_deref(), Some("Renamed"));
    assert_eq!(profile.message.as_deref(), Some("Profile updated"));

    let email = update_email(
        &provider,
        "access-token-1",
        &form(&[("email", "renamed@example.com")]),
    )
    .await;
    assert!(email.is_success());
    assert_eq!(
        email.message.as_deref(),
        Some("Check your new email address to confirm the change")
    );

    let password = update_password(
        &provider,
        "access-token-1",
        &form(&[("password", "Newpass1!"), ("confirm_password", "Newpass1!")]),
    )
    .await;
    assert!(password.is_success());
    assert_eq!(password.message.as_deref(), Some("Password updated"));

    assert_eq!(provider.calls.update_user.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_sign_out() {
    let provider = MockProvider::new();

    let result = sign_out(&provider, "access-token-1").await;

    assert!(result.is_success());
    assert_eq!(result.message.as_deref(), Some("Signed out"));
    assert_eq!(provider.calls.sign_out.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unclassified_provider_failure_shows_generic_phrase() {
    // Given a provider failing with an unrecognized error
    let provider = MockProvider::new();
    provider.fail_next_with(ProviderError::Http("network down".to_string()));
    let form = form(&[("email", "user@example.com"), ("password", "Abcdef1!")]);

    // When signing in
    let result = sign_in_with_password(&provider, &form).await;

    // Then the user sees only the generic fallback
    assert!(!result.is_success());
    assert_eq!(
        result.error.as_deref(),
        Some("Authentication failed. Please try again.")
    );
}
