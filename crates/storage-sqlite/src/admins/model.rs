//! Database model for the admin record.
//!
//! The embedded code block is flattened into columns of the single admin
//! row so the allocator's counter commit is one guarded UPDATE.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use gatecheck_core::admins::{Admin, CodeBlock};

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
#[diesel(primary_key(admin_id))]
#[diesel(table_name = crate::schema::admins)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AdminDB {
    pub admin_id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub code_block_id: String,
    pub code_range_start: i64,
    pub code_range_end: i64,
    pub code_current_value: i64,
    pub code_updated_at: String,
}

impl From<&Admin> for AdminDB {
    fn from(admin: &Admin) -> Self {
        Self {
            admin_id: admin.admin_id.clone(),
            name: admin.name.clone(),
            email: admin.email.clone(),
            created_at: admin.created_at.clone(),
            code_block_id: admin.code_block.id.clone(),
            code_range_start: admin.code_block.range_start,
            code_range_end: admin.code_block.range_end,
            code_current_value: admin.code_block.current_value,
            code_updated_at: admin.code_block.updated_at.clone(),
        }
    }
}

impl From<AdminDB> for Admin {
    fn from(row: AdminDB) -> Self {
        Self {
            code_block: CodeBlock {
                id: row.code_block_id,
                admin_id: row.admin_id.clone(),
                range_start: row.code_range_start,
                range_end: row.code_range_end,
                current_value: row.code_current_value,
                updated_at: row.code_updated_at,
            },
            admin_id: row.admin_id,
            name: row.name,
            email: row.email,
            created_at: row.created_at,
        }
    }
}
