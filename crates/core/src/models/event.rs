//! Event entity model and DTOs.
//!
//! An event records a person observed doing an action in an area at a time.

use serde::{Deserialize, Serialize};

use crate::entity::{present_keys, Entity, EntityKind, ForeignKey, References, Validate};
use crate::error::CoreError;
use crate::memory::{key_matches, MemoryRecord};
use crate::store::{Repository, Store};
use crate::types::{DbId, Timestamp};
use crate::validation::{
    require_not_future, require_not_future_if_present, require_positive_id,
    require_positive_id_if_present,
};

/// A row from the `events` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Event {
    pub id: DbId,
    pub person_id: DbId,
    pub area_id: Option<DbId>,
    pub action_id: Option<DbId>,
    pub time: Timestamp,
}

/// DTO for creating a new event.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEvent {
    pub person_id: DbId,
    pub area_id: Option<DbId>,
    pub action_id: Option<DbId>,
    #[serde(deserialize_with = "crate::types::timestamp::deserialize")]
    pub time: Timestamp,
}

/// DTO for updating an existing event. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEvent {
    pub person_id: Option<DbId>,
    pub area_id: Option<DbId>,
    pub action_id: Option<DbId>,
    #[serde(default, deserialize_with = "crate::types::timestamp::option::deserialize")]
    pub time: Option<Timestamp>,
}

/// Equality filters for `GET /events`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventFilter {
    pub person_id: Option<DbId>,
    pub area_id: Option<DbId>,
    pub action_id: Option<DbId>,
}

fn keys(person_id: Option<DbId>, area_id: Option<DbId>, action_id: Option<DbId>) -> Vec<ForeignKey> {
    present_keys([
        ("person_id", EntityKind::Person, person_id),
        ("area_id", EntityKind::Area, area_id),
        ("action_id", EntityKind::Action, action_id),
    ])
}

impl Validate for CreateEvent {
    fn validate(&self, now: Timestamp) -> Result<(), CoreError> {
        require_positive_id("person_id", self.person_id)?;
        require_positive_id_if_present("area_id", self.area_id)?;
        require_positive_id_if_present("action_id", self.action_id)?;
        require_not_future("time", self.time, now)
    }
}

impl Validate for UpdateEvent {
    fn validate(&self, now: Timestamp) -> Result<(), CoreError> {
        require_positive_id_if_present("person_id", self.person_id)?;
        require_positive_id_if_present("area_id", self.area_id)?;
        require_positive_id_if_present("action_id", self.action_id)?;
        require_not_future_if_present("time", self.time, now)
    }
}

impl References for Event {
    fn references(&self) -> Vec<ForeignKey> {
        keys(Some(self.person_id), self.area_id, self.action_id)
    }
}

impl References for CreateEvent {
    fn references(&self) -> Vec<ForeignKey> {
        keys(Some(self.person_id), self.area_id, self.action_id)
    }
}

impl References for UpdateEvent {
    fn references(&self) -> Vec<ForeignKey> {
        keys(self.person_id, self.area_id, self.action_id)
    }
}

impl Entity for Event {
    const KIND: EntityKind = EntityKind::Event;

    type Create = CreateEvent;
    type Update = UpdateEvent;
    type Filter = EventFilter;

    fn id(&self) -> DbId {
        self.id
    }

    fn repository(store: &dyn Store) -> &dyn Repository<Self> {
        store.events()
    }
}

impl MemoryRecord for Event {
    fn from_create(id: DbId, input: &CreateEvent) -> Self {
        Self {
            id,
            person_id: input.person_id,
            area_id: input.area_id,
            action_id: input.action_id,
            time: input.time,
        }
    }

    fn apply_update(&mut self, input: &UpdateEvent) {
        if let Some(v) = input.person_id {
            self.person_id = v;
        }
        if let Some(v) = input.area_id {
            self.area_id = Some(v);
        }
        if let Some(v) = input.action_id {
            self.action_id = Some(v);
        }
        if let Some(v) = input.time {
            self.time = v;
        }
    }

    fn matches(&self, filter: &EventFilter) -> bool {
        key_matches(filter.person_id, Some(self.person_id))
            && key_matches(filter.area_id, self.area_id)
            && key_matches(filter.action_id, self.action_id)
    }
}
