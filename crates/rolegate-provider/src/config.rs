//! Service configuration schema.
//!
//! An `RbacConfig` is deserialized from TOML and names the guest role, the
//! traversal strategy, and exactly one role provider.
//!
//! ```toml
//! guest_role = "guest"
//! traversal = "breadth-first"
//!
//! [role_provider.in_memory.roles.guest]
//! permissions = ["article.read"]
//!
//! [role_provider.in_memory.roles.editor]
//! permissions = ["article.write"]
//! parents = ["guest"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use rolegate_contracts::error::{RbacError, RbacResult};
use rolegate_core::{
    traits::TraversalStrategy,
    traversal::{BreadthFirstStrategy, DepthFirstStrategy},
};

use crate::graph::RoleDefinition;

/// Which traversal strategy the service uses, written in kebab-case in TOML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalKind {
    #[default]
    BreadthFirst,
    DepthFirst,
}

impl TraversalKind {
    pub fn strategy(self) -> Box<dyn TraversalStrategy> {
        match self {
            TraversalKind::BreadthFirst => Box::new(BreadthFirstStrategy),
            TraversalKind::DepthFirst => Box::new(DepthFirstStrategy),
        }
    }
}

/// The role source to build, keyed by provider kind.
///
/// The `role_provider` table must hold exactly one entry. A table naming two
/// kinds does not deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleProviderConfig {
    /// Roles declared inline in the configuration document.
    InMemory {
        #[serde(default)]
        roles: BTreeMap<String, RoleDefinition>,
    },
}

impl RoleProviderConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            RoleProviderConfig::InMemory { .. } => "in_memory",
        }
    }
}

/// The top-level structure deserialized from a TOML configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RbacConfig {
    /// Role evaluated for anonymous requests. Unset means anonymous requests
    /// are always denied.
    pub guest_role: Option<String>,

    #[serde(default)]
    pub traversal: TraversalKind,

    /// Unset is accepted by the parser and rejected by the factory.
    pub role_provider: Option<RoleProviderConfig>,
}

impl RbacConfig {
    /// Parse `s` as TOML.
    ///
    /// Returns `RbacError::ConfigError` if the TOML is malformed or does not
    /// match the `RbacConfig` schema.
    pub fn from_toml_str(s: &str) -> RbacResult<Self> {
        toml::from_str(s).map_err(|e| RbacError::ConfigError {
            reason: format!("failed to parse rbac TOML: {}", e),
        })
    }

    /// Read the file at `path` and parse it as TOML configuration.
    pub fn from_file(path: &Path) -> RbacResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| RbacError::ConfigError {
            reason: format!("failed to read rbac config '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }
}
