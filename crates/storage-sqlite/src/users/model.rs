//! Database model for attendee records.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use gatecheck_core::errors::Result;
use gatecheck_core::users::User;

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
#[diesel(primary_key(user_id))]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
// Pull upserts are whole-row replacements; a cleared column must land as
// NULL, not be skipped.
#[diesel(treat_none_as_null = true)]
pub struct UserDB {
    pub user_id: String,
    pub unique_code: String,
    pub name: String,
    pub email: String,
    pub mobile_number: String,
    pub department: String,
    pub gender: String,
    pub year: String,
    pub college: String,
    pub is_online_user: bool,
    pub created_at: String,
    pub updated_at: String,
    pub extra: Option<String>,
}

impl From<&User> for UserDB {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id.clone(),
            unique_code: user.unique_code.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            mobile_number: user.mobile_number.clone(),
            department: user.department.clone(),
            gender: user.gender.clone(),
            year: user.year.clone(),
            college: user.college.clone(),
            is_online_user: user.is_online_user,
            created_at: user.created_at.clone(),
            updated_at: user.updated_at.clone(),
            extra: extra_to_db(&user.extra),
        }
    }
}

impl UserDB {
    pub fn into_domain(self) -> Result<User> {
        Ok(User {
            extra: extra_from_db(self.extra.as_deref())?,
            user_id: self.user_id,
            unique_code: self.unique_code,
            name: self.name,
            email: self.email,
            mobile_number: self.mobile_number,
            department: self.department,
            gender: self.gender,
            year: self.year,
            college: self.college,
            is_online_user: self.is_online_user,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
