//! # rolegate-audit
//!
//! Append-only record of rolegate access decisions.
//!
//! ## Overview
//!
//! [`AuditedAuthorizer`] wraps a [`RoleService`](rolegate_core::RoleService)
//! and writes a [`DecisionRecord`] for every completed permission check to
//! an [`AuditSink`]. Denials are also logged at `info` level.
//! [`InMemoryAuditSink`] keeps the records for inspection.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rolegate_audit::{AuditedAuthorizer, InMemoryAuditSink};
//!
//! let sink = Arc::new(InMemoryAuditSink::new("api-gateway"));
//! let authorizer = AuditedAuthorizer::new(service, sink.clone());
//! authorizer.is_granted(&Permission::new("article.read"))?;
//!
//! assert_eq!(sink.len()?, 1);
//! ```

pub mod authorizer;
pub mod memory;
pub mod record;
pub mod sink;

pub use authorizer::AuditedAuthorizer;
pub use memory::InMemoryAuditSink;
pub use record::DecisionRecord;
pub use sink::AuditSink;

// ── Tests ─────────────────────────────────────────────────────────────────────
