//! # rolegate-core
//!
//! The authorization engine for rolegate.
//!
//! This crate provides:
//! - The three collaborator traits (`IdentityProvider`, `RoleProvider`, `TraversalStrategy`)
//! - Two traversal strategies (`BreadthFirstStrategy`, `DepthFirstStrategy`)
//! - The `RoleService` that wires them together to answer grant/deny questions
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rolegate_core::{RoleService, BreadthFirstStrategy};
//!
//! let service = RoleService::new(identities, roles, Box::new(BreadthFirstStrategy))
//!     .with_guest_role("guest");
//! let allowed = service.is_granted(&Permission::new("article.read"))?;
//! ```

pub mod service;
pub mod traits;
pub mod traversal;

pub use service::RoleService;
pub use traits::{IdentityProvider, RoleProvider, TraversalStrategy};
pub use traversal::{BreadthFirstStrategy, DepthFirstStrategy, RoleIter};
