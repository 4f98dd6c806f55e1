//! Builds a `RoleService` from an `RbacConfig`.
//!
//! The provider kind is chosen here, once, by matching on the configuration.
//! The service itself never looks anything up at runtime.

use tracing::info;

use rolegate_contracts::error::{RbacError, RbacResult};
use rolegate_core::{
    service::RoleService,
    traits::{IdentityProvider, RoleProvider},
};

use crate::{
    config::{RbacConfig, RoleProviderConfig},
    in_memory::InMemoryRoleProvider,
};

/// Build the role provider named by `config.role_provider`.
///
/// Returns `MisconfiguredService` when no provider is configured, and the
/// provider's own error (`RoleNotFound`, `CyclicHierarchy`) when its role
/// definitions are invalid.
pub fn build_role_provider(config: &RbacConfig) -> RbacResult<Box<dyn RoleProvider>> {
    let provider_config = config
        .role_provider
        .as_ref()
        .ok_or_else(|| RbacError::MisconfiguredService {
            reason: "no role provider has been set".to_string(),
        })?;

    match provider_config {
        RoleProviderConfig::InMemory { roles } => {
            let provider = InMemoryRoleProvider::from_definitions(roles.clone())?;
            info!(
                kind = provider_config.kind(),
                role_count = provider.graph().len(),
                "role provider built"
            );
            Ok(Box::new(provider))
        }
    }
}

/// Wire a `RoleService` from `config` and the caller's identity provider.
pub fn build_role_service(
    config: &RbacConfig,
    identity_provider: Box<dyn IdentityProvider>,
) -> RbacResult<RoleService> {
    let role_provider = build_role_provider(config)?;
    let mut service = RoleService::new(identity_provider, role_provider, config.traversal.strategy());

    if let Some(guest) = &config.guest_role {
        service.set_guest_role(guest.clone());
    }

    info!(
        guest_role = config.guest_role.as_deref().unwrap_or("<none>"),
        traversal = ?config.traversal,
        "role service built"
    );

    Ok(service)
}
