use std::sync::Arc;

use recovery_portal::{HttpIdentityProvider, IdentityProvider};

/// Shared handler state: one configured identity-provider client per
/// process, injected at router construction.
#[derive(Clone)]
pub struct PortalState {
    pub provider: Arc<dyn IdentityProvider>,
}

impl PortalState {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    /// State backed by the HTTP client configured from the environment.
    pub fn from_env() -> Self {
        Self::new(Arc::new(HttpIdentityProvider::from_env()))
    }
}
