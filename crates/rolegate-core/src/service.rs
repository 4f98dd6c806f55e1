//! The role service: the grant/deny decision engine.
//!
//! The service answers one question, "may the current subject do this?",
//! by the following pipeline:
//!
//!   Identity → Role names (or guest) → Role lookup → Traversal → Permission test
//!
//! A missing permission is the normal `Ok(false)` answer and is never logged
//! as an error. Configuration faults (unknown roles, a guest role that does
//! not exist) and collaborator failures are returned as `Err` so that a
//! misconfigured system is never mistaken for a legitimately denied user.

use std::sync::Arc;

use tracing::{debug, warn};

use rolegate_contracts::{
    error::{RbacError, RbacResult},
    identity::Identity,
    permission::Permission,
    role::Role,
};

use crate::traits::{IdentityProvider, RoleProvider, TraversalStrategy};

/// Decides whether the current identity holds a permission.
///
/// The service owns its three collaborators and an optional guest role name.
/// None of these change after construction, so one service can be shared
/// behind an `Arc` and called from any number of threads.
pub struct RoleService {
    identity_provider: Box<dyn IdentityProvider>,
    role_provider: Box<dyn RoleProvider>,
    traversal: Box<dyn TraversalStrategy>,
    guest_role: Option<String>,
}

impl RoleService {
    /// Create a service with no guest role. Anonymous requests are denied
    /// until `set_guest_role` or `with_guest_role` is used.
    pub fn new(
        identity_provider: Box<dyn IdentityProvider>,
        role_provider: Box<dyn RoleProvider>,
        traversal: Box<dyn TraversalStrategy>,
    ) -> Self {
        Self {
            identity_provider,
            role_provider,
            traversal,
            guest_role: None,
        }
    }

    /// Set the role evaluated for anonymous requests.
    ///
    /// Meant to be called once while the service is being built.
    pub fn set_guest_role(&mut self, name: impl Into<String>) {
        self.guest_role = Some(name.into());
    }

    /// Builder form of `set_guest_role`.
    pub fn with_guest_role(mut self, name: impl Into<String>) -> Self {
        self.set_guest_role(name);
        self
    }

    pub fn guest_role(&self) -> Option<&str> {
        self.guest_role.as_deref()
    }

    /// The identity making the current request, as reported by the provider.
    pub fn identity(&self) -> RbacResult<Option<Arc<dyn Identity>>> {
        self.identity_provider.identity()
    }

    /// Return true if the current identity is granted `permission`.
    ///
    /// # Algorithm
    ///
    /// 1. Ask the identity provider for the current identity.
    /// 2. An identity contributes its assigned role names. An identity with
    ///    no roles is denied outright; it does not fall back to the guest role.
    /// 3. No identity contributes the guest role if one is configured;
    ///    otherwise the request is denied.
    /// 4. Every role name is resolved through the role provider. An unknown
    ///    name is an error, not a denial.
    /// 5. Each resolved role is expanded through the traversal strategy.
    /// 6. The first visited role holding `permission` grants access and
    ///    stops the walk.
    /// 7. If no visited role holds it, access is denied.
    ///
    /// # Errors
    ///
    /// - `RoleNotFound` when an identity references an unknown role.
    /// - `MisconfiguredService` when the guest role does not exist.
    /// - Any error returned by the identity or role provider, unchanged.
    pub fn is_granted(&self, permission: &Permission) -> RbacResult<bool> {
        let identity = self.identity_provider.identity()?;
        self.is_granted_for(identity.as_ref(), permission)
    }

    /// Decide `permission` for an identity the caller already resolved.
    ///
    /// Runs steps 2 to 7 of `is_granted` without asking the identity
    /// provider, so a caller that labels or records the subject evaluates
    /// exactly that subject. `None` is an anonymous request.
    pub fn is_granted_for(
        &self,
        identity: Option<&Arc<dyn Identity>>,
        permission: &Permission,
    ) -> RbacResult<bool> {
        let subject = subject_label(identity);

        debug!(subject = %subject, permission = %permission, "evaluating permission");

        let roles = self.starting_roles(identity)?;
        if roles.is_empty() {
            debug!(subject = %subject, permission = %permission, "no roles to evaluate; denied");
            return Ok(false);
        }

        for start in roles {
            let start_name = start.name().to_string();
            for role in self.traversal.roles_iter(start) {
                if role.has_permission(permission) {
                    debug!(
                        subject = %subject,
                        permission = %permission,
                        assigned_role = %start_name,
                        granting_role = %role.name(),
                        "permission granted"
                    );
                    return Ok(true);
                }
            }
        }

        debug!(subject = %subject, permission = %permission, "permission denied");
        Ok(false)
    }

    /// Return true if `role_name` is one of the roles directly assigned to
    /// `identity`.
    ///
    /// Hierarchy is not consulted: an identity assigned "editor" does not
    /// "have" the "viewer" role even when viewer is editor's parent. Use
    /// `match_identity_roles` for a hierarchy-aware check.
    pub fn has_role(&self, identity: &dyn Identity, role_name: &str) -> bool {
        identity.roles().iter().any(|r| r == role_name)
    }

    /// Resolve the roles a decision for the current request would start from:
    /// the identity's assigned roles, the guest role for an anonymous request,
    /// or nothing.
    pub fn identity_roles(&self) -> RbacResult<Vec<Arc<Role>>> {
        let identity = self.identity_provider.identity()?;
        self.starting_roles(identity.as_ref())
    }

    /// Return true if any role reachable from the current request's roles,
    /// including ancestors, is named in `required`.
    ///
    /// An empty `required` list matches any request.
    pub fn match_identity_roles(&self, required: &[&str]) -> RbacResult<bool> {
        if required.is_empty() {
            return Ok(true);
        }

        for start in self.identity_roles()? {
            if self
                .traversal
                .roles_iter(start)
                .any(|role| required.iter().any(|name| *name == role.name()))
            {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn starting_roles(&self, identity: Option<&Arc<dyn Identity>>) -> RbacResult<Vec<Arc<Role>>> {
        match identity {
            Some(identity) => {
                if identity.roles().is_empty() {
                    return Ok(Vec::new());
                }
                self.role_provider.roles(identity.roles())
            }
            None => match &self.guest_role {
                None => Ok(Vec::new()),
                Some(guest) => match self.role_provider.role(guest) {
                    Ok(role) => Ok(vec![role]),
                    Err(RbacError::RoleNotFound { name }) => {
                        warn!(guest_role = %name, "guest role is not defined by the role provider");
                        Err(RbacError::MisconfiguredService {
                            reason: format!("guest role '{}' does not exist", name),
                        })
                    }
                    Err(other) => Err(other),
                },
            },
        }
    }
}

fn subject_label(identity: Option<&Arc<dyn Identity>>) -> String {
    identity.map_or_else(|| "anonymous".to_string(), |i| i.id().to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rolegate_contracts::identity::SimpleIdentity;

    use super::*;
    use crate::traversal::{BreadthFirstStrategy, DepthFirstStrategy};

    // ── Mock collaborators ────────────────────────────────────────────────────

    struct MockIdentities {
        identity: Option<Arc<dyn Identity>>,
    }

    impl IdentityProvider for MockIdentities {
        fn identity(&self) -> RbacResult<Option<Arc<dyn Identity>>> {
            Ok(self.identity.clone())
        }
    }

    struct FailingIdentities;

    impl IdentityProvider for FailingIdentities {
        fn identity(&self) -> RbacResult<Option<Arc<dyn Identity>>> {
            Err(RbacError::Provider {
                reason: "session store timed out".to_string(),
            })
        }
    }

    /// A role provider over a hand-built map that counts lookups.
    struct MockRoles {
        roles: HashMap<String, Arc<Role>>,
        lookups: Arc<AtomicUsize>,
    }

    impl RoleProvider for MockRoles {
        fn role(&self, name: &str) -> RbacResult<Arc<Role>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.roles
                .get(name)
                .cloned()
                .ok_or_else(|| RbacError::RoleNotFound {
                    name: name.to_string(),
                })
        }
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn perm(name: &str) -> Permission {
        Permission::new(name)
    }

    /// admin{delete}, editor{write; parent viewer}, viewer{read},
    /// senior_editor{publish; parent editor}, empty{}.
    fn sample_roles() -> HashMap<String, Arc<Role>> {
        let viewer = Arc::new(Role::new("viewer").with_permission("read"));
        let editor = Arc::new(
            Role::new("editor")
                .with_permission("write")
                .with_parent(Arc::clone(&viewer)),
        );
        let senior = Arc::new(
            Role::new("senior_editor")
                .with_permission("publish")
                .with_parent(Arc::clone(&editor)),
        );
        let admin = Arc::new(Role::new("admin").with_permission("delete"));
        let empty = Arc::new(Role::new("empty"));

        [viewer, editor, senior, admin, empty]
            .into_iter()
            .map(|r| (r.name().to_string(), r))
            .collect()
    }

    fn service_for(identity: Option<SimpleIdentity>) -> RoleService {
        let identity = identity.map(|i| Arc::new(i) as Arc<dyn Identity>);
        RoleService::new(
            Box::new(MockIdentities { identity }),
            Box::new(MockRoles {
                roles: sample_roles(),
                lookups: Arc::new(AtomicUsize::new(0)),
            }),
            Box::new(BreadthFirstStrategy),
        )
    }

    fn alice(roles: &[&str]) -> Option<SimpleIdentity> {
        Some(SimpleIdentity::new("alice", roles.iter().copied()))
    }

    // ── Direct and inherited grants ───────────────────────────────────────────

    #[test]
    fn test_editor_scenario() {
        let service = service_for(alice(&["editor"]));

        assert!(service.is_granted(&perm("read")).unwrap(), "read via ancestor viewer");
        assert!(service.is_granted(&perm("write")).unwrap());
        assert!(!service.is_granted(&perm("delete")).unwrap());
    }

    #[test]
    fn test_transitive_ancestor_grants() {
        let service = service_for(alice(&["senior_editor"]));

        for p in ["publish", "write", "read"] {
            assert!(service.is_granted(&perm(p)).unwrap(), "expected '{p}' to be granted");
        }
        assert!(!service.is_granted(&perm("delete")).unwrap());
    }

    #[test]
    fn test_union_of_assigned_roles() {
        let service = service_for(alice(&["viewer", "admin"]));

        assert!(service.is_granted(&perm("read")).unwrap());
        assert!(service.is_granted(&perm("delete")).unwrap());
        assert!(!service.is_granted(&perm("write")).unwrap());
    }

    #[test]
    fn test_unknown_permission_denied() {
        let service = service_for(alice(&["senior_editor", "admin"]));
        assert!(!service.is_granted(&perm("billing.refund")).unwrap());
    }

    #[test]
    fn test_depth_first_strategy_gives_same_decisions() {
        let identity: Arc<dyn Identity> =
            Arc::new(SimpleIdentity::new("alice", ["senior_editor"]));
        let service = RoleService::new(
            Box::new(MockIdentities {
                identity: Some(identity),
            }),
            Box::new(MockRoles {
                roles: sample_roles(),
                lookups: Arc::new(AtomicUsize::new(0)),
            }),
            Box::new(DepthFirstStrategy),
        );

        assert!(service.is_granted(&perm("read")).unwrap());
        assert!(!service.is_granted(&perm("delete")).unwrap());
    }

    #[test]
    fn test_is_granted_for_ignores_provider_identity() {
        // The provider reports an anonymous request; the caller's identity wins.
        let service = service_for(None).with_guest_role("viewer");
        let bob: Arc<dyn Identity> = Arc::new(SimpleIdentity::new("bob", ["admin"]));

        assert!(service.is_granted_for(Some(&bob), &perm("delete")).unwrap());
        assert!(!service.is_granted_for(Some(&bob), &perm("read")).unwrap());
        assert!(service.is_granted_for(None, &perm("read")).unwrap());
    }

    // ── Identity with no roles ────────────────────────────────────────────────

    #[test]
    fn test_identity_without_roles_is_denied_even_with_guest() {
        let service = service_for(alice(&[])).with_guest_role("viewer");

        // The guest role grants read, but an identity never falls back to it.
        assert!(!service.is_granted(&perm("read")).unwrap());
    }

    // ── Guest fallback ────────────────────────────────────────────────────────

    #[test]
    fn test_guest_scenario() {
        let service = service_for(None).with_guest_role("viewer");

        assert!(service.is_granted(&perm("read")).unwrap());
        assert!(!service.is_granted(&perm("write")).unwrap());
    }

    #[test]
    fn test_guest_decision_matches_guest_role() {
        let anonymous = service_for(None).with_guest_role("editor");
        let as_editor = service_for(alice(&["editor"]));

        for p in ["read", "write", "delete", "publish"] {
            assert_eq!(
                anonymous.is_granted(&perm(p)).unwrap(),
                as_editor.is_granted(&perm(p)).unwrap(),
                "guest decision for '{p}' must equal the editor decision"
            );
        }
    }

    #[test]
    fn test_anonymous_without_guest_is_always_denied() {
        let service = service_for(None);
        assert_eq!(service.guest_role(), None);

        for p in ["read", "write", "delete"] {
            assert!(!service.is_granted(&perm(p)).unwrap());
        }
    }

    #[test]
    fn test_set_guest_role() {
        let mut service = service_for(None);
        service.set_guest_role("viewer");
        assert_eq!(service.guest_role(), Some("viewer"));
        assert!(service.is_granted(&perm("read")).unwrap());
    }

    #[test]
    fn test_missing_guest_role_is_misconfiguration() {
        let service = service_for(None).with_guest_role("visitor");

        match service.is_granted(&perm("read")) {
            Err(RbacError::MisconfiguredService { reason }) => {
                assert!(reason.contains("visitor"), "unexpected reason: {reason}");
            }
            other => panic!("expected MisconfiguredService, got {:?}", other),
        }
    }

    // ── Configuration faults propagate ────────────────────────────────────────

    #[test]
    fn test_unknown_assigned_role_is_an_error() {
        // "viewer" alone would grant read; the unknown role must still surface.
        let service = service_for(alice(&["viewer", "ghost"]));

        match service.is_granted(&perm("read")) {
            Err(RbacError::RoleNotFound { name }) => assert_eq!(name, "ghost"),
            other => panic!("expected RoleNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_identity_provider_failure_propagates() {
        let service = RoleService::new(
            Box::new(FailingIdentities),
            Box::new(MockRoles {
                roles: sample_roles(),
                lookups: Arc::new(AtomicUsize::new(0)),
            }),
            Box::new(BreadthFirstStrategy),
        )
        .with_guest_role("viewer");

        match service.is_granted(&perm("read")) {
            Err(RbacError::Provider { reason }) => assert!(reason.contains("timed out")),
            other => panic!("expected Provider error, got {:?}", other),
        }
    }

    // ── has_role ──────────────────────────────────────────────────────────────

    #[test]
    fn test_has_role_ignores_hierarchy() {
        let service = service_for(None);
        let identity = SimpleIdentity::new("alice", ["editor"]);

        assert!(service.has_role(&identity, "editor"));
        assert!(!service.has_role(&identity, "viewer"));
    }

    // ── identity_roles / match_identity_roles ─────────────────────────────────

    #[test]
    fn test_identity_roles_resolves_assigned_roles() {
        let service = service_for(alice(&["editor", "admin"]));
        let names: Vec<String> = service
            .identity_roles()
            .unwrap()
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(names, vec!["editor", "admin"]);
    }

    #[test]
    fn test_identity_roles_uses_guest_when_anonymous() {
        let service = service_for(None).with_guest_role("viewer");
        let roles = service.identity_roles().unwrap();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].name(), "viewer");

        assert!(service_for(None).identity_roles().unwrap().is_empty());
    }

    #[test]
    fn test_match_identity_roles_follows_hierarchy() {
        let service = service_for(alice(&["editor"]));

        assert!(service.match_identity_roles(&["viewer"]).unwrap());
        assert!(service.match_identity_roles(&["admin", "editor"]).unwrap());
        assert!(!service.match_identity_roles(&["admin"]).unwrap());
        assert!(service.match_identity_roles(&[]).unwrap());
    }

    #[test]
    fn test_identity_passthrough() {
        let service = service_for(alice(&["editor"]));
        let identity = service.identity().unwrap().unwrap();
        assert_eq!(identity.id(), "alice");

        assert!(service_for(None).identity().unwrap().is_none());
    }

    // ── Statelessness ─────────────────────────────────────────────────────────

    #[test]
    fn test_repeated_checks_are_stable() {
        let lookups = Arc::new(AtomicUsize::new(0));
        let identity: Arc<dyn Identity> = Arc::new(SimpleIdentity::new("alice", ["editor"]));
        let service = RoleService::new(
            Box::new(MockIdentities {
                identity: Some(identity),
            }),
            Box::new(MockRoles {
                roles: sample_roles(),
                lookups: Arc::clone(&lookups),
            }),
            Box::new(BreadthFirstStrategy),
        );

        let first = service.is_granted(&perm("read")).unwrap();
        for _ in 0..10 {
            assert_eq!(service.is_granted(&perm("read")).unwrap(), first);
        }

        // No caching in the service: every check asks the provider again.
        assert_eq!(lookups.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn test_service_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RoleService>();

        let service = Arc::new(service_for(alice(&["editor"])));
        std::thread::scope(|scope| {
            for _ in 0..4 {
                let service = Arc::clone(&service);
                scope.spawn(move || {
                    assert!(service.is_granted(&perm("read")).unwrap());
                    assert!(!service.is_granted(&perm("delete")).unwrap());
                });
            }
        });
    }
}
