//! The decision record written for every completed permission check.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rolegate_contracts::permission::Permission;

/// The outcome of a single permission check.
///
/// Only completed decisions are recorded. A check that failed with an error
/// produced no decision and leaves no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// Unique id of this decision.
    pub decision_id: Uuid,

    /// Id of the identity that was evaluated, or `None` for an anonymous
    /// request.
    pub identity: Option<String>,

    /// The permission that was checked.
    pub permission: Permission,

    pub granted: bool,

    /// Wall-clock time (UTC) the decision was made.
    pub timestamp: DateTime<Utc>,
}

impl DecisionRecord {
    pub fn new(identity: Option<String>, permission: Permission, granted: bool) -> Self {
        Self {
            decision_id: Uuid::new_v4(),
            identity,
            permission,
            granted,
            timestamp: Utc::now(),
        }
    }

    /// The subject as it appears in logs: the identity id, or "anonymous".
    pub fn subject(&self) -> &str {
        self.identity.as_deref().unwrap_or("anonymous")
    }
}
