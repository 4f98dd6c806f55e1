//! A fixed identity provider.

use std::sync::Arc;

use rolegate_contracts::{error::RbacResult, identity::Identity};
use rolegate_core::traits::IdentityProvider;

/// Always reports the same identity, or always reports none.
///
/// Useful when the caller has already authenticated the request and builds a
/// service per request, and for tests and the demo CLI.
#[derive(Clone, Default)]
pub struct StaticIdentityProvider {
    identity: Option<Arc<dyn Identity>>,
}

impl StaticIdentityProvider {
    pub fn anonymous() -> Self {
        Self { identity: None }
    }

    pub fn authenticated(identity: impl Identity + 'static) -> Self {
        Self {
            identity: Some(Arc::new(identity)),
        }
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn identity(&self) -> RbacResult<Option<Arc<dyn Identity>>> {
        Ok(self.identity.clone())
    }
}
