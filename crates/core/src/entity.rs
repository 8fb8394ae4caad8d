//! Entity kinds, declared foreign-key sets and the traits that tie an
//! entity to its payloads, rules and repository.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::store::{Repository, Store};
use crate::types::{DbId, Timestamp};

/// Every persisted record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    Gender,
    Race,
    Age,
    Hairline,
    Person,
    Area,
    Action,
    Event,
    Apparel,
    Track,
}

impl EntityKind {
    pub const ALL: [EntityKind; 10] = [
        EntityKind::Gender,
        EntityKind::Race,
        EntityKind::Age,
        EntityKind::Hairline,
        EntityKind::Person,
        EntityKind::Area,
        EntityKind::Action,
        EntityKind::Event,
        EntityKind::Apparel,
        EntityKind::Track,
    ];

    /// Human-readable name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Gender => "Gender",
            EntityKind::Race => "Race",
            EntityKind::Age => "Age",
            EntityKind::Hairline => "Hairline",
            EntityKind::Person => "Person",
            EntityKind::Area => "Area",
            EntityKind::Action => "Action",
            EntityKind::Event => "Event",
            EntityKind::Apparel => "Apparel",
            EntityKind::Track => "Track",
        }
    }

    /// Backing table name. Doubles as the REST resource segment.
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::Gender => "genders",
            EntityKind::Race => "races",
            EntityKind::Age => "ages",
            EntityKind::Hairline => "hairlines",
            EntityKind::Person => "persons",
            EntityKind::Area => "areas",
            EntityKind::Action => "actions",
            EntityKind::Event => "events",
            EntityKind::Apparel => "apparels",
            EntityKind::Track => "tracks",
        }
    }

    /// The declared foreign-key field set of this kind.
    pub fn foreign_keys(self) -> &'static [ForeignKeyField] {
        match self {
            EntityKind::Person => PERSON_KEYS,
            EntityKind::Event => EVENT_KEYS,
            EntityKind::Apparel => APPAREL_KEYS,
            EntityKind::Track => TRACK_KEYS,
            _ => &[],
        }
    }

    /// Foreign-key fields (on other kinds) that point at this kind.
    pub fn dependents(self) -> impl Iterator<Item = (EntityKind, &'static ForeignKeyField)> {
        EntityKind::ALL.into_iter().flat_map(move |kind| {
            kind.foreign_keys()
                .iter()
                .filter(move |fk| fk.target == self)
                .map(move |fk| (kind, fk))
        })
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A declared foreign-key column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKeyField {
    pub column: &'static str,
    pub target: EntityKind,
    pub required: bool,
}

impl ForeignKeyField {
    const fn required(column: &'static str, target: EntityKind) -> Self {
        Self {
            column,
            target,
            required: true,
        }
    }

    const fn optional(column: &'static str, target: EntityKind) -> Self {
        Self {
            column,
            target,
            required: false,
        }
    }
}

const PERSON_KEYS: &[ForeignKeyField] = &[
    ForeignKeyField::optional("gender_id", EntityKind::Gender),
    ForeignKeyField::optional("hairline_id", EntityKind::Hairline),
    ForeignKeyField::optional("race_id", EntityKind::Race),
    ForeignKeyField::optional("age_id", EntityKind::Age),
];

const EVENT_KEYS: &[ForeignKeyField] = &[
    ForeignKeyField::required("person_id", EntityKind::Person),
    ForeignKeyField::optional("area_id", EntityKind::Area),
    ForeignKeyField::optional("action_id", EntityKind::Action),
];

const APPAREL_KEYS: &[ForeignKeyField] =
    &[ForeignKeyField::required("person_id", EntityKind::Person)];

const TRACK_KEYS: &[ForeignKeyField] = &[ForeignKeyField::required("person_id", EntityKind::Person)];

/// A foreign-key value present on a payload or a stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub field: &'static str,
    pub target: EntityKind,
    pub id: DbId,
}

impl ForeignKey {
    pub fn new(field: &'static str, target: EntityKind, id: DbId) -> Self {
        Self { field, target, id }
    }
}

/// Collect the present values of `(field, target, value)` triples.
pub fn present_keys<const N: usize>(
    keys: [(&'static str, EntityKind, Option<DbId>); N],
) -> Vec<ForeignKey> {
    keys.into_iter()
        .filter_map(|(field, target, id)| id.map(|id| ForeignKey::new(field, target, id)))
        .collect()
}

/// Field-level rules for an input payload.
pub trait Validate {
    /// Check the payload against its rules. `now` bounds timestamps.
    fn validate(&self, now: Timestamp) -> Result<(), CoreError>;
}

/// Foreign-key values carried by a payload or a row.
pub trait References {
    /// Present foreign-key values. Absent optional keys are omitted.
    fn references(&self) -> Vec<ForeignKey> {
        Vec::new()
    }
}

/// List filter for entities without filterable columns.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoFilter {}

/// A persisted record type together with its payloads.
pub trait Entity: References + Clone + Serialize + Send + Sync + 'static {
    const KIND: EntityKind;

    /// Page size used when a list request does not name one.
    const DEFAULT_LIMIT: i64 = 100;

    type Create: Validate + References + DeserializeOwned + Send + Sync + 'static;
    type Update: Validate + References + DeserializeOwned + Send + Sync + 'static;
    type Filter: DeserializeOwned + Default + Send + Sync + 'static;

    fn id(&self) -> DbId;

    /// Select this entity's repository from a store.
    fn repository(store: &dyn Store) -> &dyn Repository<Self>;
}
