//! Tenant isolation (Section 4.E, Section 9 open question).
//!
//! Two valid strategies exist: a row-level security policy keyed off a
//! session variable, or a mandatory predicate baked into every query that
//! can read tenant-scoped rows. We chose the latter: it keeps the
//! constraint visible in Rust (a caller cannot construct a tenant-scoped
//! query without supplying a `TenantId`) rather than relying on a
//! session-level `SET` call a future migration could forget to issue.
//! `SignalAudit` has no tenant predicate at all — it is admin-only.

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TenantId(pub Uuid);

impl TenantId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<Uuid> for TenantId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}
