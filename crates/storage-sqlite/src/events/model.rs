//! Database model for events.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use gatecheck_core::errors::Result;
use gatecheck_core::events::Event;

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
#[diesel(primary_key(event_id))]
#[diesel(table_name = crate::schema::events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct EventDB {
    pub event_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub extra: Option<String>,
}

impl From<&Event> for EventDB {
    fn from(event: &Event) -> Self {
        Self {
            event_id: event.event_id.clone(),
            name: event.name.clone(),
            description: event.description.clone(),
            extra: extra_to_db(&event.extra),
        }
    }
}

impl EventDB {
    pub fn into_domain(self) -> Result<Event> {
        Ok(Event {
            extra: extra_from_db(self.extra.as_deref())?,
            event_id: self.event_id,
            name: self.name,
            description: self.description,
        })
    }
}
