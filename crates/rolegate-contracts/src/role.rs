//! The role entity.
//!
//! A `Role` is a named bundle of permissions with zero or more parents.
//! Parents are shared `Arc<Role>` values: a parent has to be fully built
//! before a child can link to it, so a graph assembled from `Arc` links
//! cannot contain a cycle. Cycles can only appear in name-based definitions,
//! which the role graph builder rejects before any `Role` is linked.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::permission::Permission;

/// A named node in the role hierarchy.
///
/// `has_permission` looks at this role's own permissions only. Walking the
/// ancestors is the job of a traversal strategy.
#[derive(Debug, Clone)]
pub struct Role {
    name: String,
    permissions: BTreeSet<Permission>,
    parents: Vec<Arc<Role>>,
}

impl Role {
    /// Create a role with no permissions and no parents.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            permissions: BTreeSet::new(),
            parents: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return true if this role itself holds `permission`.
    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.permissions.contains(permission)
    }

    /// Grant a permission to this role. Adding an existing permission is a no-op.
    pub fn add_permission(&mut self, permission: impl Into<Permission>) {
        self.permissions.insert(permission.into());
    }

    /// Link a parent role. A parent with the same name as an existing parent
    /// is ignored, so parent links stay unique.
    pub fn add_parent(&mut self, parent: Arc<Role>) {
        if self.parents.iter().any(|p| p.name == parent.name) {
            return;
        }
        self.parents.push(parent);
    }

    /// Builder form of `add_permission`.
    pub fn with_permission(mut self, permission: impl Into<Permission>) -> Self {
        self.add_permission(permission);
        self
    }

    /// Builder form of `add_parent`.
    pub fn with_parent(mut self, parent: Arc<Role>) -> Self {
        self.add_parent(parent);
        self
    }

    /// Iterate this role's own permissions in sorted order.
    pub fn permissions(&self) -> impl Iterator<Item = &Permission> {
        self.permissions.iter()
    }

    /// The direct parents, in the order they were linked.
    pub fn parents(&self) -> &[Arc<Role>] {
        &self.parents
    }
}

// Roles are identified by name within one provider's namespace.
impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Role {}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
