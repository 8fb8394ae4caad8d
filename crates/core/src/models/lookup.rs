//! Single-column lookup entities: genders, races, ages, hairlines, areas and
//! actions.
//!
//! All six share one shape (an id plus one required, non-empty text column),
//! so they are generated by [`define_lookup_entity!`].

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityKind, NoFilter, References, Validate};
use crate::error::CoreError;
use crate::memory::MemoryRecord;
use crate::store::{Repository, Store};
use crate::types::{DbId, Timestamp};
use crate::validation::{require_non_empty, require_non_empty_if_present};

macro_rules! define_lookup_entity {
    (
        $(#[$meta:meta])*
        $name:ident, $create:ident, $update:ident {
            kind: $kind:ident,
            field: $field:ident = $column:literal,
            repository: $repo:ident,
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
        pub struct $name {
            pub id: DbId,
            #[serde(rename = $column)]
            #[cfg_attr(feature = "sqlx", sqlx(rename = $column))]
            pub $field: String,
        }

        /// DTO for creating a row. An absent value deserializes to `""` and
        /// is rejected as a required field.
        #[derive(Debug, Clone, Default, Deserialize)]
        pub struct $create {
            #[serde(rename = $column, default)]
            pub $field: String,
        }

        /// DTO for patching a row.
        #[derive(Debug, Clone, Default, Deserialize)]
        pub struct $update {
            #[serde(rename = $column)]
            pub $field: Option<String>,
        }

        impl Validate for $create {
            fn validate(&self, _now: Timestamp) -> Result<(), CoreError> {
                require_non_empty($column, &self.$field)
            }
        }

        impl Validate for $update {
            fn validate(&self, _now: Timestamp) -> Result<(), CoreError> {
                require_non_empty_if_present($column, self.$field.as_deref())
            }
        }

        impl References for $name {}
        impl References for $create {}
        impl References for $update {}

        impl Entity for $name {
            const KIND: EntityKind = EntityKind::$kind;

            type Create = $create;
            type Update = $update;
            type Filter = NoFilter;

            fn id(&self) -> DbId {
                self.id
            }

            fn repository(store: &dyn Store) -> &dyn Repository<Self> {
                store.$repo()
            }
        }

        impl MemoryRecord for $name {
            fn from_create(id: DbId, input: &$create) -> Self {
                Self {
                    id,
                    $field: input.$field.clone(),
                }
            }

            fn apply_update(&mut self, input: &$update) {
                if let Some(v) = &input.$field {
                    self.$field = v.clone();
                }
            }

            fn matches(&self, _filter: &NoFilter) -> bool {
                true
            }
        }
    };
}

define_lookup_entity! {
    /// A gender value (e.g. "Male", "Female", "Unknown").
    Gender, CreateGender, UpdateGender {
        kind: Gender,
        field: value = "value",
        repository: genders,
    }
}

define_lookup_entity! {
    /// A race value.
    Race, CreateRace, UpdateRace {
        kind: Race,
        field: value = "value",
        repository: races,
    }
}

define_lookup_entity! {
    /// An age category (e.g. "Adult", "Child", "Senior").
    Age, CreateAge, UpdateAge {
        kind: Age,
        field: value = "value",
        repository: ages,
    }
}

define_lookup_entity! {
    /// A hairline type (e.g. "Receding", "Widow's Peak").
    Hairline, CreateHairline, UpdateHairline {
        kind: Hairline,
        field: kind = "type",
        repository: hairlines,
    }
}

define_lookup_entity! {
    /// A named location where events are observed.
    Area, CreateArea, UpdateArea {
        kind: Area,
        field: name = "name",
        repository: areas,
    }
}

define_lookup_entity! {
    /// A kind of action recorded on events (e.g. "Entry", "Exit").
    Action, CreateAction, UpdateAction {
        kind: Action,
        field: kind = "type",
        repository: actions,
    }
}
