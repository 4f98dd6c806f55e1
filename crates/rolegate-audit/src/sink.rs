//! The audit sink trait.

use rolegate_contracts::error::RbacResult;

use crate::record::DecisionRecord;

/// Append-only destination for decision records.
///
/// A failed write is returned to the caller of the authorizer: a decision
/// that cannot be recorded is not handed out.
pub trait AuditSink: Send + Sync {
    fn record(&self, record: &DecisionRecord) -> RbacResult<()>;
}
