//! Person entity model and DTOs.

use serde::{Deserialize, Serialize};

use crate::entity::{present_keys, Entity, EntityKind, ForeignKey, References, Validate};
use crate::error::CoreError;
use crate::memory::{key_matches, MemoryRecord};
use crate::store::{Repository, Store};
use crate::types::{DbId, Timestamp};
use crate::validation::{require_positive, require_positive_id_if_present};

/// Gender assigned when a create payload omits `gender_id`. Seeded as
/// "Unknown" by the initial migration.
pub const DEFAULT_GENDER_ID: DbId = 3;

/// Height assigned when a create payload omits `height`, in meters.
pub const DEFAULT_HEIGHT: f64 = 0.1;

/// A row from the `persons` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Person {
    pub id: DbId,
    /// Base64-encoded image of the person.
    pub base64: Option<String>,
    /// Height in meters.
    pub height: f64,
    pub glasses: Option<bool>,
    /// A distinctive feature (e.g. a recognition vector).
    pub feature: Option<String>,
    pub gender_id: Option<DbId>,
    pub hairline_id: Option<DbId>,
    pub race_id: Option<DbId>,
    pub age_id: Option<DbId>,
}

/// DTO for creating a new person.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePerson {
    pub base64: Option<String>,
    #[serde(default = "default_height")]
    pub height: f64,
    pub glasses: Option<bool>,
    pub feature: Option<String>,
    /// Defaults to [`DEFAULT_GENDER_ID`] when omitted; an explicit `null`
    /// leaves the person without a gender.
    #[serde(default = "default_gender_id")]
    pub gender_id: Option<DbId>,
    pub hairline_id: Option<DbId>,
    pub race_id: Option<DbId>,
    pub age_id: Option<DbId>,
}

impl Default for CreatePerson {
    fn default() -> Self {
        Self {
            base64: None,
            height: DEFAULT_HEIGHT,
            glasses: None,
            feature: None,
            gender_id: default_gender_id(),
            hairline_id: None,
            race_id: None,
            age_id: None,
        }
    }
}

fn default_height() -> f64 {
    DEFAULT_HEIGHT
}

fn default_gender_id() -> Option<DbId> {
    Some(DEFAULT_GENDER_ID)
}

/// DTO for updating an existing person. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePerson {
    pub base64: Option<String>,
    pub height: Option<f64>,
    pub glasses: Option<bool>,
    pub feature: Option<String>,
    pub gender_id: Option<DbId>,
    pub hairline_id: Option<DbId>,
    pub race_id: Option<DbId>,
    pub age_id: Option<DbId>,
}

/// Equality filters for `GET /persons`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonFilter {
    pub gender_id: Option<DbId>,
    pub hairline_id: Option<DbId>,
    pub race_id: Option<DbId>,
    pub age_id: Option<DbId>,
}

fn validate_keys(
    gender_id: Option<DbId>,
    hairline_id: Option<DbId>,
    race_id: Option<DbId>,
    age_id: Option<DbId>,
) -> Result<(), CoreError> {
    require_positive_id_if_present("gender_id", gender_id)?;
    require_positive_id_if_present("hairline_id", hairline_id)?;
    require_positive_id_if_present("race_id", race_id)?;
    require_positive_id_if_present("age_id", age_id)
}

fn keys(
    gender_id: Option<DbId>,
    hairline_id: Option<DbId>,
    race_id: Option<DbId>,
    age_id: Option<DbId>,
) -> Vec<ForeignKey> {
    present_keys([
        ("gender_id", EntityKind::Gender, gender_id),
        ("hairline_id", EntityKind::Hairline, hairline_id),
        ("race_id", EntityKind::Race, race_id),
        ("age_id", EntityKind::Age, age_id),
    ])
}

impl Validate for CreatePerson {
    fn validate(&self, _now: Timestamp) -> Result<(), CoreError> {
        require_positive("height", self.height)?;
        validate_keys(self.gender_id, self.hairline_id, self.race_id, self.age_id)
    }
}

impl Validate for UpdatePerson {
    fn validate(&self, _now: Timestamp) -> Result<(), CoreError> {
        if let Some(height) = self.height {
            require_positive("height", height)?;
        }
        validate_keys(self.gender_id, self.hairline_id, self.race_id, self.age_id)
    }
}

impl References for Person {
    fn references(&self) -> Vec<ForeignKey> {
        keys(self.gender_id, self.hairline_id, self.race_id, self.age_id)
    }
}

impl References for CreatePerson {
    fn references(&self) -> Vec<ForeignKey> {
        keys(self.gender_id, self.hairline_id, self.race_id, self.age_id)
    }
}

impl References for UpdatePerson {
    fn references(&self) -> Vec<ForeignKey> {
        keys(self.gender_id, self.hairline_id, self.race_id, self.age_id)
    }
}

impl Entity for Person {
    const KIND: EntityKind = EntityKind::Person;

    type Create = CreatePerson;
    type Update = UpdatePerson;
    type Filter = PersonFilter;

    fn id(&self) -> DbId {
        self.id
    }

    fn repository(store: &dyn Store) -> &dyn Repository<Self> {
        store.persons()
    }
}

impl MemoryRecord for Person {
    fn from_create(id: DbId, input: &CreatePerson) -> Self {
        Self {
            id,
            base64: input.base64.clone(),
            height: input.height,
            glasses: input.glasses,
            feature: input.feature.clone(),
            gender_id: input.gender_id,
            hairline_id: input.hairline_id,
            race_id: input.race_id,
            age_id: input.age_id,
        }
    }

    fn apply_update(&mut self, input: &UpdatePerson) {
        if let Some(v) = &input.base64 {
            self.base64 = Some(v.clone());
        }
        if let Some(v) = input.height {
            self.height = v;
        }
        if let Some(v) = input.glasses {
            self.glasses = Some(v);
        }
        if let Some(v) = &input.feature {
            self.feature = Some(v.clone());
        }
        if let Some(v) = input.gender_id {
            self.gender_id = Some(v);
        }
        if let Some(v) = input.hairline_id {
            self.hairline_id = Some(v);
        }
        if let Some(v) = input.race_id {
            self.race_id = Some(v);
        }
        if let Some(v) = input.age_id {
            self.age_id = Some(v);
        }
    }

    fn matches(&self, filter: &PersonFilter) -> bool {
        key_matches(filter.gender_id, self.gender_id)
            && key_matches(filter.hairline_id, self.hairline_id)
            && key_matches(filter.race_id, self.race_id)
            && key_matches(filter.age_id, self.age_id)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    #[test]
    fn omitted_gender_defaults_to_sentinel() {
        let input: CreatePerson = serde_json::from_str(r#"{"height": 1.8}"#).unwrap();
        assert_eq!(input.gender_id, Some(DEFAULT_GENDER_ID));
        assert_eq!(
            input.references(),
            vec![ForeignKey::new("gender_id", EntityKind::Gender, 3)]
        );
    }

    #[test]
    fn explicit_null_gender_is_kept() {
        let input: CreatePerson =
            serde_json::from_str(r#"{"height": 1.8, "gender_id": null}"#).unwrap();
        assert_eq!(input.gender_id, None);
        assert!(input.references().is_empty());
    }

    #[test]
    fn omitted_height_defaults_to_positive_value() {
        let input: CreatePerson = serde_json::from_str("{}").unwrap();
        assert_eq!(input.height, DEFAULT_HEIGHT);
        assert!(input.validate(Utc::now()).is_ok());
    }

    #[test]
    fn non_positive_height_is_invalid() {
        let input = CreatePerson {
            height: -1.0,
            ..CreatePerson::default()
        };
        assert_matches!(
            input.validate(Utc::now()),
            Err(CoreError::InvalidField {
                field: "height",
                ..
            })
        );
    }

    #[test]
    fn non_positive_key_is_invalid_identifier() {
        let input = CreatePerson {
            race_id: Some(0),
            ..CreatePerson::default()
        };
        assert_matches!(
            input.validate(Utc::now()),
            Err(CoreError::InvalidIdentifier {
                field: "race_id",
                id: 0
            })
        );
    }

    #[test]
    fn patch_checks_only_present_fields() {
        assert!(UpdatePerson::default().validate(Utc::now()).is_ok());
        let patch = UpdatePerson {
            height: Some(0.0),
            ..UpdatePerson::default()
        };
        assert_matches!(
            patch.validate(Utc::now()),
            Err(CoreError::InvalidField {
                field: "height",
                ..
            })
        );
    }

    #[test]
    fn apply_update_leaves_absent_fields() {
        let mut person = Person::from_create(
            1,
            &CreatePerson {
                height: 1.7,
                feature: Some("scar".into()),
                ..CreatePerson::default()
            },
        );
        person.apply_update(&UpdatePerson {
            glasses: Some(true),
            ..UpdatePerson::default()
        });
        assert_eq!(person.height, 1.7);
        assert_eq!(person.feature.as_deref(), Some("scar"));
        assert_eq!(person.glasses, Some(true));
        assert_eq!(person.gender_id, Some(DEFAULT_GENDER_ID));
    }

    #[test]
    fn filter_matches_on_every_present_key() {
        let person = Person::from_create(
            1,
            &CreatePerson {
                race_id: Some(2),
                ..CreatePerson::default()
            },
        );
        assert!(person.matches(&PersonFilter::default()));
        assert!(person.matches(&PersonFilter {
            race_id: Some(2),
            gender_id: Some(DEFAULT_GENDER_ID),
            ..PersonFilter::default()
        }));
        assert!(!person.matches(&PersonFilter {
            race_id: Some(5),
            ..PersonFilter::default()
        }));
        assert!(!person.matches(&PersonFilter {
            age_id: Some(1),
            ..PersonFilter::default()
        }));
    }
}
