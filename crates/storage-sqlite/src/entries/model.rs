//! Database models for entry logs and attendance.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use gatecheck_core::entries::{Attendance, EntryLog, EntrySource};
use gatecheck_core::errors::Result;

use crate::convert::{enum_from_db, enum_to_db};

#[derive(Queryable, Identifiable, Selectable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::entry_logs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EntryLogDB {
    pub id: i64,
    pub unique_code: String,
    pub admin_id: String,
    pub source: String,
    pub created_at: String,
    pub sync_status: String,
}

/// Insert form without the auto-assigned rowid.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::entry_logs)]
pub struct NewEntryLogDB {
    pub unique_code: String,
    pub admin_id: String,
    pub source: String,
    pub created_at: String,
    pub sync_status: String,
}

impl NewEntryLogDB {
    pub fn from_domain(log: &EntryLog) -> Result<Self> {
        Ok(Self {
            unique_code: log.unique_code.clone(),
            admin_id: log.admin_id.clone(),
            source: enum_to_db(&log.source)?,
            created_at: log.created_at.clone(),
            sync_status: enum_to_db(&log.sync_status)?,
        })
    }
}

impl EntryLogDB {
    pub fn into_domain(self) -> Result<EntryLog> {
        Ok(EntryLog {
            id: Some(self.id),
            unique_code: self.unique_code,
            admin_id: self.admin_id,
            // Older rows may carry source spellings this build does not
            // know; decode lossily rather than failing the scan.
            source: EntrySource::parse_lossy(&self.source),
            created_at: self.created_at,
            sync_status: enum_from_db(&self.sync_status)?,
        })
    }
}

#[derive(Queryable, Identifiable, Selectable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::attendance)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AttendanceDB {
    pub id: i64,
    pub unique_code: String,
    pub event_id: String,
    pub admin_id: String,
    pub created_at: String,
    pub sync_status: String,
}

/// Insert form without the auto-assigned rowid.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::attendance)]
pub struct NewAttendanceDB {
    pub unique_code: String,
    pub event_id: String,
    pub admin_id: String,
    pub created_at: String,
    pub sync_status: String,
}

impl NewAttendanceDB {
    pub fn from_domain(attendance: &Attendance) -> Result<Self> {
        Ok(Self {
            unique_code: attendance.unique_code.clone(),
            event_id: attendance.event_id.clone(),
            admin_id: attendance.admin_id.clone(),
            created_at: attendance.created_at.clone(),
            sync_status: enum_to_db(&attendance.sync_status)?,
        })
    }
}

impl AttendanceDB {
    pub fn into_domain(self) -> Result<Attendance> {
        Ok(Attendance {
            id: Some(self.id),
            unique_code: self.unique_code,
            event_id: self.event_id,
            admin_id: self.admin_id,
            created_at: self.created_at,
            sync_status: enum_from_db(&self.sync_status)?,
        })
    }
}
