//! Operator session context.

use crate::admins::Admin;

/// Identity of the logged-in operator, passed explicitly to every
/// operation that records who acted. There is deliberately no process-wide
/// "current admin" singleton; hosts hold one session per login and tests
/// can run several side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    pub admin_id: String,
}

impl AdminSession {
    pub fn new(admin_id: impl Into<String>) -> Self {
        Self {
            admin_id: admin_id.into(),
        }
    }
}

impl From<&Admin> for AdminSession {
    fn from(admin: &Admin) -> Self {
        Self {
            admin_id: admin.admin_id.clone(),
        }
    }
}
