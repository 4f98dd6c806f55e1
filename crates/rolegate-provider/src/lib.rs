//! # rolegate-provider
//!
//! TOML-driven role definitions and service wiring for rolegate.
//!
//! ## Overview
//!
//! This crate provides [`InMemoryRoleProvider`], which implements the
//! [`RoleProvider`](rolegate_core::traits::RoleProvider) trait over a
//! validated [`RoleGraph`], and [`build_role_service`], which assembles a
//! [`RoleService`](rolegate_core::RoleService) from an [`RbacConfig`].
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use rolegate_provider::{build_role_service, RbacConfig, StaticIdentityProvider};
//!
//! let config = RbacConfig::from_file(Path::new("config/roles.toml"))?;
//! let service = build_role_service(&config, Box::new(StaticIdentityProvider::anonymous()))?;
//! ```
//!
//! ## Role definitions
//!
//! Roles list their own permissions and their parents by name. Parent names
//! must be defined in the same document, and no role may be its own
//! ancestor; both are checked when the graph is built, not when a permission
//! is checked.

pub mod config;
pub mod factory;
pub mod graph;
pub mod identity;
pub mod in_memory;

pub use config::{RbacConfig, RoleProviderConfig, TraversalKind};
pub use factory::{build_role_provider, build_role_service};
pub use graph::{RoleDefinition, RoleGraph};
pub use identity::StaticIdentityProvider;
pub use in_memory::InMemoryRoleProvider;

// ── Tests ─────────────────────────────────────────────────────────────────────
