//! Track entity model and DTOs.
//!
//! A track is one positional sample of a person: where they were (`x`, `y`),
//! when, and for how long.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::entity::{present_keys, Entity, EntityKind, ForeignKey, References, Validate};
use crate::error::CoreError;
use crate::memory::{key_matches, MemoryRecord};
use crate::store::{Repository, Store};
use crate::types::{DbId, Timestamp};
use crate::validation::{
    require_finite, require_finite_if_present, require_not_future,
    require_not_future_if_present, require_positive, require_positive_id,
    require_positive_id_if_present,
};

/// A row from the `tracks` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Track {
    pub id: DbId,
    pub person_id: DbId,
    pub time: Timestamp,
    /// Length of the tracking segment, in seconds.
    pub duration: f64,
    pub x: f64,
    pub y: f64,
    pub velocity: Option<f64>,
}

/// DTO for creating a track sample.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTrack {
    pub person_id: DbId,
    #[serde(deserialize_with = "crate::types::timestamp::deserialize")]
    pub time: Timestamp,
    pub duration: f64,
    pub x: f64,
    pub y: f64,
    pub velocity: Option<f64>,
}

/// DTO for updating a track sample. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTrack {
    pub person_id: Option<DbId>,
    #[serde(default, deserialize_with = "crate::types::timestamp::option::deserialize")]
    pub time: Option<Timestamp>,
    pub duration: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub velocity: Option<f64>,
}

/// Equality filters for `GET /tracks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackFilter {
    pub person_id: Option<DbId>,
}

impl Validate for CreateTrack {
    fn validate(&self, now: Timestamp) -> Result<(), CoreError> {
        require_positive_id("person_id", self.person_id)?;
        require_not_future("time", self.time, now)?;
        require_positive("duration", self.duration)?;
        require_finite("x", self.x)?;
        require_finite("y", self.y)?;
        require_finite_if_present("velocity", self.velocity)
    }
}

impl Validate for UpdateTrack {
    fn validate(&self, now: Timestamp) -> Result<(), CoreError> {
        require_positive_id_if_present("person_id", self.person_id)?;
        require_not_future_if_present("time", self.time, now)?;
        if let Some(duration) = self.duration {
            require_positive("duration", duration)?;
        }
        require_finite_if_present("x", self.x)?;
        require_finite_if_present("y", self.y)?;
        require_finite_if_present("velocity", self.velocity)
    }
}

impl References for Track {
    fn references(&self) -> Vec<ForeignKey> {
        present_keys([("person_id", EntityKind::Person, Some(self.person_id))])
    }
}

impl References for CreateTrack {
    fn references(&self) -> Vec<ForeignKey> {
        present_keys([("person_id", EntityKind::Person, Some(self.person_id))])
    }
}

impl References for UpdateTrack {
    fn references(&self) -> Vec<ForeignKey> {
        present_keys([("person_id", EntityKind::Person, self.person_id)])
    }
}

impl Entity for Track {
    const KIND: EntityKind = EntityKind::Track;

    /// Listing tracks answers "where is this person now", so a bare request
    /// returns only the latest sample.
    const DEFAULT_LIMIT: i64 = 1;

    type Create = CreateTrack;
    type Update = UpdateTrack;
    type Filter = TrackFilter;

    fn id(&self) -> DbId {
        self.id
    }

    fn repository(store: &dyn Store) -> &dyn Repository<Self> {
        store.tracks()
    }
}

impl MemoryRecord for Track {
    fn from_create(id: DbId, input: &CreateTrack) -> Self {
        Self {
            id,
            person_id: input.person_id,
            time: input.time,
            duration: input.duration,
            x: input.x,
            y: input.y,
            velocity: input.velocity,
        }
    }

    fn apply_update(&mut self, input: &UpdateTrack) {
        if let Some(v) = input.person_id {
            self.person_id = v;
        }
        if let Some(v) = input.time {
            self.time = v;
        }
        if let Some(v) = input.duration {
            self.duration = v;
        }
        if let Some(v) = input.x {
            self.x = v;
        }
        if let Some(v) = input.y {
            self.y = v;
        }
        if let Some(v) = input.velocity {
            self.velocity = Some(v);
        }
    }

    fn matches(&self, filter: &TrackFilter) -> bool {
        key_matches(filter.person_id, Some(self.person_id))
    }

    /// Most recent first; ties broken by newest id.
    fn list_order(a: &Self, b: &Self) -> Ordering {
        b.time.cmp(&a.time).then_with(|| b.id.cmp(&a.id))
    }
}
