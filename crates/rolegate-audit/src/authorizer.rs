//! A role service wrapper that records every decision.

use std::sync::Arc;

use tracing::info;

use rolegate_contracts::{error::RbacResult, permission::Permission};
use rolegate_core::service::RoleService;

use crate::{record::DecisionRecord, sink::AuditSink};

/// Answers permission checks through a `RoleService` and writes each
/// completed decision, grant or deny, to an `AuditSink`.
///
/// Errors from the service are returned without a record, since no decision
/// was made.
pub struct AuditedAuthorizer {
    service: RoleService,
    sink: Arc<dyn AuditSink>,
}

impl AuditedAuthorizer {
    pub fn new(service: RoleService, sink: Arc<dyn AuditSink>) -> Self {
        Self { service, sink }
    }

    pub fn service(&self) -> &RoleService {
        &self.service
    }

    /// Evaluate `permission` for the current identity and record the result.
    ///
    /// The identity provider is asked once. The identity it returns is both
    /// the one evaluated and the one written to the record.
    pub fn is_granted(&self, permission: &Permission) -> RbacResult<bool> {
        let identity = self.service.identity()?;
        let granted = self.service.is_granted_for(identity.as_ref(), permission)?;

        let subject = identity.map(|i| i.id().to_string());
        let record = DecisionRecord::new(subject, permission.clone(), granted);
        self.sink.record(&record)?;

        if !granted {
            info!(
                decision_id = %record.decision_id,
                subject = record.subject(),
                permission = %permission,
                "access denied"
            );
        }

        Ok(granted)
    }
}
