//! Role graph construction from name-based definitions.
//!
//! Definitions reference their parents by name. `RoleGraph::build` checks
//! every parent name exists, rejects cycles, and then links the roles into
//! `Arc<Role>` values with parents built before their children. Once built,
//! the graph is immutable and every role in it is fully linked.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use rolegate_contracts::{
    error::{RbacError, RbacResult},
    role::Role,
};

/// A role as declared in configuration, with parents referenced by name.
///
/// Example in TOML:
/// ```toml
/// [roles.editor]
/// permissions = ["article.write"]
/// parents = ["viewer"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    /// Permissions granted directly to this role.
    #[serde(default)]
    pub permissions: Vec<String>,

    /// Names of the roles this role inherits from, in lookup order.
    #[serde(default)]
    pub parents: Vec<String>,
}

/// An immutable, validated set of linked roles keyed by name.
#[derive(Debug, Clone, Default)]
pub struct RoleGraph {
    roles: BTreeMap<String, Arc<Role>>,
}

impl RoleGraph {
    /// Validate and link `definitions`.
    ///
    /// # Errors
    ///
    /// - `RoleNotFound` naming the first parent that is not itself defined.
    /// - `CyclicHierarchy` with the offending path if any role is its own
    ///   ancestor (a role listing itself as parent included).
    pub fn build(definitions: BTreeMap<String, RoleDefinition>) -> RbacResult<Self> {
        for (name, definition) in &definitions {
            for parent in &definition.parents {
                if !definitions.contains_key(parent) {
                    warn!(role = %name, parent = %parent, "role references an undefined parent");
                    return Err(RbacError::RoleNotFound {
                        name: parent.clone(),
                    });
                }
            }
        }

        let order = link_order(&definitions)?;

        let mut roles: BTreeMap<String, Arc<Role>> = BTreeMap::new();
        for name in order {
            let definition = &definitions[&name];
            let mut role = Role::new(name.clone());
            for permission in &definition.permissions {
                role.add_permission(permission.as_str());
            }
            for parent in &definition.parents {
                let linked = roles.get(parent).cloned().ok_or_else(|| RbacError::RoleNotFound {
                    name: parent.clone(),
                })?;
                role.add_parent(linked);
            }
            roles.insert(name, Arc::new(role));
        }

        Ok(Self { roles })
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Role>> {
        self.roles.get(name)
    }

    /// Role names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.roles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

/// Order role names so that every parent precedes its children.
///
/// Iterative depth-first search over parent links. `on_path` holds the roles
/// on the current search path; reaching one of them again is a cycle.
fn link_order(definitions: &BTreeMap<String, RoleDefinition>) -> RbacResult<Vec<String>> {
    let mut order = Vec::with_capacity(definitions.len());
    let mut done: HashSet<&str> = HashSet::new();
    let mut path: Vec<&str> = Vec::new();
    let mut on_path: HashSet<&str> = HashSet::new();

    for root in definitions.keys() {
        if done.contains(root.as_str()) {
            continue;
        }

        // (name, exiting): exit markers pop the role off the current path.
        let mut stack: Vec<(&str, bool)> = vec![(root.as_str(), false)];

        while let Some((name, exiting)) = stack.pop() {
            if exiting {
                path.pop();
                on_path.remove(name);
                if done.insert(name) {
                    order.push(name.to_string());
                }
                continue;
            }

            if on_path.contains(name) {
                let start = path.iter().position(|n| *n == name).unwrap_or(0);
                let mut cycle: Vec<String> = path[start..].iter().map(|n| n.to_string()).collect();
                cycle.push(name.to_string());
                warn!(cycle = %cycle.join(" -> "), "cyclic role hierarchy detected");
                return Err(RbacError::CyclicHierarchy { path: cycle });
            }

            if done.contains(name) {
                continue;
            }

            path.push(name);
            on_path.insert(name);
            stack.push((name, true));

            if let Some(definition) = definitions.get(name) {
                for parent in definition.parents.iter().rev() {
                    stack.push((parent.as_str(), false));
                }
            }
        }
    }

    Ok(order)
}
