//! In-memory implementation of `AuditSink`.
//!
//! `InMemoryAuditSink` keeps every record in a `Vec` behind a `Mutex`, so one
//! sink can be shared by authorizers answering checks from many threads.

use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use rolegate_contracts::error::{RbacError, RbacResult};

use crate::{record::DecisionRecord, sink::AuditSink};

/// An append-only decision log held in memory.
pub struct InMemoryAuditSink {
    name: String,
    records: Mutex<Vec<DecisionRecord>>,
}

impl InMemoryAuditSink {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every record written so far, in append order.
    pub fn records(&self) -> RbacResult<Vec<DecisionRecord>> {
        Ok(self.lock()?.clone())
    }

    /// Only the denied decisions, in append order.
    pub fn denials(&self) -> RbacResult<Vec<DecisionRecord>> {
        Ok(self.lock()?.iter().filter(|r| !r.granted).cloned().collect())
    }

    /// Every decision recorded for `identity`. `None` selects anonymous
    /// requests.
    pub fn decisions_for(&self, identity: Option<&str>) -> RbacResult<Vec<DecisionRecord>> {
        Ok(self
            .lock()?
            .iter()
            .filter(|r| r.identity.as_deref() == identity)
            .cloned()
            .collect())
    }

    pub fn len(&self) -> RbacResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> RbacResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> RbacResult<MutexGuard<'_, Vec<DecisionRecord>>> {
        self.records.lock().map_err(|e| RbacError::Provider {
            reason: format!("audit log lock poisoned: {}", e),
        })
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&self, record: &DecisionRecord) -> RbacResult<()> {
        let mut records = self.lock()?;
        records.push(record.clone());

        debug!(
            sink = %self.name,
            position = records.len() - 1,
            decision_id = %record.decision_id,
            granted = record.granted,
            "decision recorded"
        );
        Ok(())
    }
}
