//! In-memory role provider.
//!
//! `InMemoryRoleProvider` holds a validated `RoleGraph` and implements the
//! `RoleProvider` trait from rolegate-core. Roles can be loaded from a map of
//! definitions, a TOML string, or a TOML file.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use rolegate_contracts::{
    error::{RbacError, RbacResult},
    role::Role,
};
use rolegate_core::traits::RoleProvider;

use crate::graph::{RoleDefinition, RoleGraph};

/// Top-level shape of a standalone role document.
///
/// ```toml
/// [roles.viewer]
/// permissions = ["read"]
///
/// [roles.editor]
/// permissions = ["write"]
/// parents = ["viewer"]
/// ```
#[derive(Debug, Deserialize)]
struct RoleDocument {
    #[serde(default)]
    roles: BTreeMap<String, RoleDefinition>,
}

/// A `RoleProvider` backed by a role graph held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryRoleProvider {
    graph: RoleGraph,
}

impl InMemoryRoleProvider {
    pub fn new(graph: RoleGraph) -> Self {
        Self { graph }
    }

    /// Validate and link `definitions` into a provider.
    ///
    /// Fails with `RoleNotFound` or `CyclicHierarchy` as `RoleGraph::build` does.
    pub fn from_definitions(definitions: BTreeMap<String, RoleDefinition>) -> RbacResult<Self> {
        Ok(Self::new(RoleGraph::build(definitions)?))
    }

    /// Parse `s` as a TOML role document and build a provider from it.
    ///
    /// Returns `RbacError::ConfigError` if the TOML is malformed.
    pub fn from_toml_str(s: &str) -> RbacResult<Self> {
        let document: RoleDocument = toml::from_str(s).map_err(|e| RbacError::ConfigError {
            reason: format!("failed to parse role TOML: {}", e),
        })?;
        Self::from_definitions(document.roles)
    }

    /// Read the file at `path` and parse it as a TOML role document.
    pub fn from_file(path: &Path) -> RbacResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| RbacError::ConfigError {
            reason: format!("failed to read role file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn graph(&self) -> &RoleGraph {
        &self.graph
    }
}

impl RoleProvider for InMemoryRoleProvider {
    fn role(&self, name: &str) -> RbacResult<Arc<Role>> {
        match self.graph.get(name) {
            Some(role) => Ok(Arc::clone(role)),
            None => {
                debug!(role = %name, "role lookup missed");
                Err(RbacError::RoleNotFound {
                    name: name.to_string(),
                })
            }
        }
    }
}
