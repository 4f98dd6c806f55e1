//! Error types for the rolegate authorization engine.
//!
//! Every fallible operation returns `RbacResult<T>`. A missing permission is
//! never an error: it is the ordinary `Ok(false)` answer. The variants here
//! describe configuration faults and collaborator failures, which must reach
//! the caller instead of being mistaken for a denial.

use thiserror::Error;

/// The unified error type for rolegate.
#[derive(Debug, Error)]
pub enum RbacError {
    /// A role name referenced by an identity, a parent link, or a lookup
    /// does not exist in the role provider.
    #[error("role '{name}' not found")]
    RoleNotFound { name: String },

    /// The role definitions contain a cycle.
    ///
    /// `path` lists the roles along the cycle, with the first name repeated
    /// at the end (e.g. `["a", "b", "a"]`).
    #[error("cyclic role hierarchy: {}", path.join(" -> "))]
    CyclicHierarchy { path: Vec<String> },

    /// The service was wired in a way that cannot answer the request, e.g.
    /// no role provider, or a guest role that does not exist.
    #[error("misconfigured role service: {reason}")]
    MisconfiguredService { reason: String },

    /// A configuration document could not be read or parsed.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A collaborator (identity source, role source, audit sink) failed for
    /// its own reasons, such as I/O or a timeout.
    #[error("provider failure: {reason}")]
    Provider { reason: String },
}

/// Convenience alias used throughout the rolegate crates.
pub type RbacResult<T> = Result<T, RbacError>;
