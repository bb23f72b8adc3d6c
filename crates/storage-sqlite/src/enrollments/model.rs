//! Database model for enrollments.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use gatecheck_core::enrollments::Enrollment;
use gatecheck_core::errors::Result;

use crate::convert::{extra_from_db, extra_to_db};

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    Debug,
    Clone,
    Serialize,
    Deserialize,
)]
#[diesel(primary_key(enrollment_id))]
#[diesel(table_name = crate::schema::enrollments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct EnrollmentDB {
    pub enrollment_id: String,
    pub user_id: String,
    pub event_id: String,
    pub team_id: Option<String>,
    pub extra: Option<String>,
}

impl From<&Enrollment> for EnrollmentDB {
    fn from(enrollment: &Enrollment) -> Self {
        Self {
            enrollment_id: enrollment.enrollment_id.clone(),
            user_id: enrollment.user_id.clone(),
            event_id: enrollment.event_id.clone(),
            team_id: enrollment.team_id.clone(),
            extra: extra_to_db(&enrollment.extra),
        }
    }
}

impl EnrollmentDB {
    pub fn into_domain(self) -> Result<Enrollment> {
        Ok(Enrollment {
            extra: extra_from_db(self.extra.as_deref())?,
            enrollment_id: self.enrollment_id,
            user_id: self.user_id,
            event_id: self.event_id,
            team_id: self.team_id,
        })
    }
}
