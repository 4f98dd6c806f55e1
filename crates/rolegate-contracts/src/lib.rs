//! # rolegate-contracts
//!
//! Shared types for the rolegate RBAC engine.
//!
//! All crates in the workspace import from here. No decision logic lives in
//! this crate, only the role entity, permission and identity types, and the
//! error type.

pub mod error;
pub mod identity;
pub mod permission;
pub mod role;

pub use error::{RbacError, RbacResult};
pub use identity::{Identity, SimpleIdentity};
pub use permission::Permission;
pub use role::Role;
