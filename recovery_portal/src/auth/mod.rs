mod errors;
mod operations;
mod types;

pub use errors::AuthError;
pub use operations::{
    begin_oauth, exchange_oauth_code, send_magic_link, send_phone_otp, sign_in_with_password,
    sign_out, sign_up_with_password, update_email, update_password, update_profile,
    verify_magic_link, verify_phone_otp,
};
pub use types::SignUpOutcome;
