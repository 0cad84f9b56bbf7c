use serde::Serialize;

use crate::provider::ProviderUser;

/// Payload of a successful sign-up. `requires_confirmation` is set when
/// the provider withheld a session pending email confirmation; that is a
/// distinct success, not an error.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SignUpOutcome {
    pub user: ProviderUser,
    pub requires_confirmation: bool,
}
