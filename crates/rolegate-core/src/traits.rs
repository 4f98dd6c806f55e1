//! Collaborator traits consumed by the role service.
//!
//! - `IdentityProvider`: who is asking (or nobody)
//! - `RoleProvider`: the role graph, already linked
//! - `TraversalStrategy`: which ancestors count toward a decision
//!
//! The service receives one of each at construction and never looks them up
//! at runtime. All three must be `Send + Sync` so a single service can answer
//! checks from many threads at once.

use std::sync::Arc;

use rolegate_contracts::{
    error::RbacResult,
    identity::Identity,
    role::Role,
};

use crate::traversal::RoleIter;

/// Supplies the identity making the current request.
pub trait IdentityProvider: Send + Sync {
    /// Return the current identity, or `None` for an anonymous request.
    ///
    /// Anonymity is an expected answer, not an error. `Err` is reserved for
    /// failures of the provider itself (an unreachable session store, a
    /// timeout) and is propagated by the service unchanged.
    fn identity(&self) -> RbacResult<Option<Arc<dyn Identity>>>;
}

/// Supplies fully linked roles by name.
///
/// Implementations own the role data and any caching of it. Roles returned
/// here must have their parents resolved; the service performs no lazy
/// resolution.
pub trait RoleProvider: Send + Sync {
    /// Look up one role.
    ///
    /// Returns `RbacError::RoleNotFound` if `name` is unknown.
    fn role(&self, name: &str) -> RbacResult<Arc<Role>>;

    /// Look up several roles at once, in the order given.
    ///
    /// The call is atomic: if any name is unknown the whole lookup fails with
    /// `RbacError::RoleNotFound` for the first offending name, and no partial
    /// result is returned.
    fn roles(&self, names: &[String]) -> RbacResult<Vec<Arc<Role>>> {
        names.iter().map(|name| self.role(name)).collect()
    }
}

/// Expands a starting role into every role whose permissions count toward a
/// grant decision.
pub trait TraversalStrategy: Send + Sync {
    /// Return a lazy iterator over `start` and its ancestors.
    ///
    /// The starting role is always yielded first. Each role is yielded at
    /// most once, even when it is reachable along several parent chains.
    fn roles_iter(&self, start: Arc<Role>) -> RoleIter;
}
