//! The identity contract.
//!
//! Identities are produced by an external identity provider, per request or
//! per session. The engine only reads them.

/// The authenticated subject of an authorization check.
pub trait Identity: Send + Sync {
    /// A stable identifier for this subject (user id, service account, ...).
    fn id(&self) -> &str;

    /// Names of the roles directly assigned to this subject.
    fn roles(&self) -> &[String];
}

/// A plain identity carrying an id and its assigned role names.
///
/// Suitable for tests and for callers whose session layer already resolved
/// the role names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleIdentity {
    id: String,
    roles: Vec<String>,
}

impl SimpleIdentity {
    pub fn new<I, S>(id: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }
}

impl Identity for SimpleIdentity {
    fn id(&self) -> &str {
        &self.id
    }

    fn roles(&self) -> &[String] {
        &self.roles
    }
}
