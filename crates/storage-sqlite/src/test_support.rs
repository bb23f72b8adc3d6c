//! Shared fixtures for repository tests.

use std::sync::Arc;

use tempfile::tempdir;

use crate::db::{create_pool, init, run_migrations, spawn_writer, DbPool, WriteHandle};

pub(crate) fn setup_db() -> (Arc<DbPool>, WriteHandle) {
    let (pool, writer, _path) = setup_db_with_path();
    (pool, writer)
}

pub(crate) fn setup_db_with_path() -> (Arc<DbPool>, WriteHandle, String) {
    let app_data = tempdir()
        .expect("tempdir")
        .keep()
        .to_string_lossy()
        .to_string();
    let db_path = init(&app_data).expect("init db");
    run_migrations(&db_path).expect("migrate db");
    let pool = create_pool(&db_path).expect("create pool");
    let writer = spawn_writer(pool.as_ref().clone());
    (pool, writer, db_path)
}

pub(crate) fn sample_user(user_id: &str, unique_code: &str) -> gatecheck_core::users::User {
    gatecheck_core::users::User {
        user_id: user_id.to_string(),
        unique_code: unique_code.to_string(),
        name: format!("User {unique_code}"),
        email: format!("{unique_code}@example.com"),
        mobile_number: "9000000000".to_string(),
        department: "CSE".to_string(),
        gender: "F".to_string(),
        year: "3".to_string(),
        college: "Example Institute".to_string(),
        is_online_user: true,
        created_at: "2026-03-01T10:00:00+00:00".to_string(),
        updated_at: "2026-03-01T10:00:00+00:00".to_string(),
        extra: serde_json::Map::new(),
    }
}

pub(crate) fn sample_entry_log(unique_code: &str) -> gatecheck_core::entries::EntryLog {
    gatecheck_core::entries::EntryLog {
        id: None,
        unique_code: unique_code.to_string(),
        admin_id: "adm-1".to_string(),
        source: gatecheck_core::entries::EntrySource::Dashboard,
        created_at: chrono::Utc::now().to_rfc3339(),
        sync_status: gatecheck_core::entries::SyncStatus::Pending,
    }
}

pub(crate) fn sample_attendance(
    unique_code: &str,
    event_id: &str,
) -> gatecheck_core::entries::Attendance {
    gatecheck_core::entries::Attendance {
        id: None,
        unique_code: unique_code.to_string(),
        event_id: event_id.to_string(),
        admin_id: "adm-1".to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
        sync_status: gatecheck_core::entries::SyncStatus::Pending,
    }
}
