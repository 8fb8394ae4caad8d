//! Apparel entity model and DTOs.

use serde::{Deserialize, Serialize};

use crate::entity::{present_keys, Entity, EntityKind, ForeignKey, References, Validate};
use crate::error::CoreError;
use crate::memory::{key_matches, MemoryRecord};
use crate::store::{Repository, Store};
use crate::types::{DbId, Timestamp};
use crate::validation::{
    require_non_empty, require_non_empty_if_present, require_not_future,
    require_not_future_if_present, require_positive_id, require_positive_id_if_present,
};

/// A row from the `apparels` table: what a person was wearing at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Apparel {
    pub id: DbId,
    pub person_id: DbId,
    pub shirt_colour: String,
    pub pant_colour: String,
    pub shoe_colour: Option<String>,
    pub time: Timestamp,
}

/// DTO for creating an apparel record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateApparel {
    pub person_id: DbId,
    #[serde(default)]
    pub shirt_colour: String,
    #[serde(default)]
    pub pant_colour: String,
    pub shoe_colour: Option<String>,
    #[serde(deserialize_with = "crate::types::timestamp::deserialize")]
    pub time: Timestamp,
}

/// DTO for updating an apparel record. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateApparel {
    pub person_id: Option<DbId>,
    pub shirt_colour: Option<String>,
    pub pant_colour: Option<String>,
    pub shoe_colour: Option<String>,
    #[serde(default, deserialize_with = "crate::types::timestamp::option::deserialize")]
    pub time: Option<Timestamp>,
}

/// Equality filters for `GET /apparels`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApparelFilter {
    pub person_id: Option<DbId>,
}

impl Validate for CreateApparel {
    fn validate(&self, now: Timestamp) -> Result<(), CoreError> {
        require_positive_id("person_id", self.person_id)?;
        require_non_empty("shirt_colour", &self.shirt_colour)?;
        require_non_empty("pant_colour", &self.pant_colour)?;
        require_non_empty_if_present("shoe_colour", self.shoe_colour.as_deref())?;
        require_not_future("time", self.time, now)
    }
}

impl Validate for UpdateApparel {
    fn validate(&self, now: Timestamp) -> Result<(), CoreError> {
        require_positive_id_if_present("person_id", self.person_id)?;
        require_non_empty_if_present("shirt_colour", self.shirt_colour.as_deref())?;
        require_non_empty_if_present("pant_colour", self.pant_colour.as_deref())?;
        require_non_empty_if_present("shoe_colour", self.shoe_colour.as_deref())?;
        require_not_future_if_present("time", self.time, now)
    }
}

impl References for Apparel {
    fn references(&self) -> Vec<ForeignKey> {
        present_keys([("person_id", EntityKind::Person, Some(self.person_id))])
    }
}

impl References for CreateApparel {
    fn references(&self) -> Vec<ForeignKey> {
        present_keys([("person_id", EntityKind::Person, Some(self.person_id))])
    }
}

impl References for UpdateApparel {
    fn references(&self) -> Vec<ForeignKey> {
        present_keys([("person_id", EntityKind::Person, self.person_id)])
    }
}

impl Entity for Apparel {
    const KIND: EntityKind = EntityKind::Apparel;

    type Create = CreateApparel;
    type Update = UpdateApparel;
    type Filter = ApparelFilter;

    fn id(&self) -> DbId {
        self.id
    }

    fn repository(store: &dyn Store) -> &dyn Repository<Self> {
        store.apparels()
    }
}

impl MemoryRecord for Apparel {
    fn from_create(id: DbId, input: &CreateApparel) -> Self {
        Self {
            id,
            person_id: input.person_id,
            shirt_colour: input.shirt_colour.clone(),
            pant_colour: input.pant_colour.clone(),
            shoe_colour: input.shoe_colour.clone(),
            time: input.time,
        }
    }

    fn apply_update(&mut self, input: &UpdateApparel) {
        if let Some(v) = input.person_id {
            self.person_id = v;
        }
        if let Some(v) = &input.shirt_colour {
            self.shirt_colour = v.clone();
        }
        if let Some(v) = &input.pant_colour {
            self.pant_colour = v.clone();
        }
        if let Some(v) = &input.shoe_colour {
            self.shoe_colour = Some(v.clone());
        }
        if let Some(v) = input.time {
            self.time = v;
        }
    }

    fn matches(&self, filter: &ApparelFilter) -> bool {
        key_matches(filter.person_id, Some(self.person_id))
    }
}
