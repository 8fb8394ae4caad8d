//! In-process [`Store`] backed by ordered maps.
//!
//! Used by the API when no `DATABASE_URL` is configured and by tests. Each
//! table is guarded by its own lock; ids are assigned from a per-table
//! counter and never reused. Nothing enforces foreign keys between tables,
//! so mutations are serialized through [`Store::write_lock`].

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::entity::{Entity, EntityKind};
use crate::error::StoreError;
use crate::models::{
    Action, Age, Apparel, Area, CreateGender, Event, Gender, Hairline, Person, Race, Track,
};
use crate::store::{Page, Repository, Store};
use crate::types::DbId;

/// How an entity is materialized, patched and filtered in memory.
pub trait MemoryRecord: Entity {
    fn from_create(id: DbId, input: &Self::Create) -> Self;

    /// Overwrite the fields present in `input`.
    fn apply_update(&mut self, input: &Self::Update);

    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Listing order. Ascending id unless overridden.
    fn list_order(a: &Self, b: &Self) -> Ordering {
        a.id().cmp(&b.id())
    }
}

/// Equality filter on an optional key: an absent filter matches anything.
pub(crate) fn key_matches(filter: Option<DbId>, value: Option<DbId>) -> bool {
    filter.is_none() || filter == value
}

/// One in-memory table.
pub struct MemoryTable<E> {
    rows: RwLock<BTreeMap<DbId, E>>,
    next_id: AtomicI64,
}

impl<E> Default for MemoryTable<E> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl<E: MemoryRecord> MemoryTable<E> {
    async fn contains(&self, id: DbId) -> bool {
        self.rows.read().await.contains_key(&id)
    }

    async fn count_referencing(&self, column: &str, id: DbId) -> i64 {
        let rows = self.rows.read().await;
        let count = rows
            .values()
            .filter(|row| {
                row.references()
                    .iter()
                    .any(|fk| fk.field == column && fk.id == id)
            })
            .count();
        count as i64
    }
}

#[async_trait]
impl<E: MemoryRecord> Repository<E> for MemoryTable<E> {
    async fn insert(&self, input: &E::Create) -> Result<E, StoreError> {
        let id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst);
        let row = E::from_create(id, input);
        self.rows.write().await.insert(id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<E>, StoreError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn list(&self, filter: &E::Filter, page: Page) -> Result<Vec<E>, StoreError> {
        let rows = self.rows.read().await;
        let mut matching: Vec<E> = rows.values().filter(|row| row.matches(filter)).cloned().collect();
        matching.sort_by(E::list_order);
        let skip = usize::try_from(page.skip).unwrap_or(0);
        let limit = usize::try_from(page.limit).unwrap_or(0);
        Ok(matching.into_iter().skip(skip).take(limit).collect())
    }

    async fn update(&self, id: DbId, input: &E::Update) -> Result<Option<E>, StoreError> {
        let mut rows = self.rows.write().await;
        Ok(rows.get_mut(&id).map(|row| {
            row.apply_update(input);
            row.clone()
        }))
    }

    async fn delete(&self, id: DbId) -> Result<Option<E>, StoreError> {
        Ok(self.rows.write().await.remove(&id))
    }
}

/// A complete in-memory store: one [`MemoryTable`] per entity.
#[derive(Default)]
pub struct MemoryStore {
    genders: MemoryTable<Gender>,
    races: MemoryTable<Race>,
    ages: MemoryTable<Age>,
    hairlines: MemoryTable<Hairline>,
    persons: MemoryTable<Person>,
    areas: MemoryTable<Area>,
    actions: MemoryTable<Action>,
    events: MemoryTable<Event>,
    apparels: MemoryTable<Apparel>,
    tracks: MemoryTable<Track>,
    writes: Arc<Mutex<()>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the same reference rows the initial migration seeds:
    /// genders `Male` (1), `Female` (2) and `Unknown` (3).
    pub async fn with_seed_data() -> Result<Self, StoreError> {
        let store = Self::new();
        for value in ["Male", "Female", "Unknown"] {
            let input = CreateGender {
                value: value.to_string(),
            };
            store.genders.insert(&input).await?;
        }
        Ok(store)
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn genders(&self) -> &dyn Repository<Gender> {
        &self.genders
    }

    fn races(&self) -> &dyn Repository<Race> {
        &self.races
    }

    fn ages(&self) -> &dyn Repository<Age> {
        &self.ages
    }

    fn hairlines(&self) -> &dyn Repository<Hairline> {
        &self.hairlines
    }

    fn persons(&self) -> &dyn Repository<Person> {
        &self.persons
    }

    fn areas(&self) -> &dyn Repository<Area> {
        &self.areas
    }

    fn actions(&self) -> &dyn Repository<Action> {
        &self.actions
    }

    fn events(&self) -> &dyn Repository<Event> {
        &self.events
    }

    fn apparels(&self) -> &dyn Repository<Apparel> {
        &self.apparels
    }

    fn tracks(&self) -> &dyn Repository<Track> {
        &self.tracks
    }

    async fn exists(&self, kind: EntityKind, id: DbId) -> Result<bool, StoreError> {
        let found = match kind {
            EntityKind::Gender => self.genders.contains(id).await,
            EntityKind::Race => self.races.contains(id).await,
            EntityKind::Age => self.ages.contains(id).await,
            EntityKind::Hairline => self.hairlines.contains(id).await,
            EntityKind::Person => self.persons.contains(id).await,
            EntityKind::Area => self.areas.contains(id).await,
            EntityKind::Action => self.actions.contains(id).await,
            EntityKind::Event => self.events.contains(id).await,
            EntityKind::Apparel => self.apparels.contains(id).await,
            EntityKind::Track => self.tracks.contains(id).await,
        };
        Ok(found)
    }

    async fn count_referencing(
        &self,
        kind: EntityKind,
        column: &'static str,
        id: DbId,
    ) -> Result<i64, StoreError> {
        let count = match kind {
            EntityKind::Person => self.persons.count_referencing(column, id).await,
            EntityKind::Event => self.events.count_referencing(column, id).await,
            EntityKind::Apparel => self.apparels.count_referencing(column, id).await,
            EntityKind::Track => self.tracks.count_referencing(column, id).await,
            // Lookup tables carry no foreign keys.
            _ => 0,
        };
        Ok(count)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn write_lock(&self) -> Option<OwnedMutexGuard<()>> {
        Some(Arc::clone(&self.writes).lock_owned().await)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::entity::NoFilter;
    use crate::models::{CreatePerson, CreateRace, CreateTrack, TrackFilter, UpdateRace};

    #[tokio::test]
    async fn seeded_store_has_three_genders() {
        let store = MemoryStore::with_seed_data().await.unwrap();
        let genders = store
            .genders()
            .list(&NoFilter {}, Page::new(0, 100))
            .await
            .unwrap();
        let values: Vec<_> = genders.iter().map(|g| g.value.as_str()).collect();
        assert_eq!(values, vec!["Male", "Female", "Unknown"]);
        assert!(store.exists(EntityKind::Gender, 3).await.unwrap());
        assert!(!store.exists(EntityKind::Gender, 4).await.unwrap());
    }

    #[tokio::test]
    async fn write_lock_is_exclusive_until_dropped() {
        let store = MemoryStore::new();
        let guard = store.write_lock().await;
        assert!(guard.is_some());
        assert!(store.writes.try_lock().is_err());

        drop(guard);
        assert!(store.writes.try_lock().is_ok());
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let first = store
            .races()
            .insert(&CreateRace { value: "A".into() })
            .await
            .unwrap();
        store.races().delete(first.id).await.unwrap();
        let second = store
            .races()
            .insert(&CreateRace { value: "B".into() })
            .await
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn update_of_missing_row_is_none() {
        let store = MemoryStore::new();
        let patch = UpdateRace {
            value: Some("X".into()),
        };
        assert!(store.races().update(9, &patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_applies_skip_and_limit_after_ordering() {
        let store = MemoryStore::new();
        for value in ["a", "b", "c", "d"] {
            store
                .races()
                .insert(&CreateRace { value: value.into() })
                .await
                .unwrap();
        }
        let page = store
            .races()
            .list(&NoFilter {}, Page::new(1, 2))
            .await
            .unwrap();
        let ids: Vec<_> = page.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn tracks_list_most_recent_first() {
        let store = MemoryStore::new();
        let now = Utc::now();
        for minutes in [30, 10, 20] {
            store
                .tracks()
                .insert(&CreateTrack {
                    person_id: 1,
                    time: now - Duration::minutes(minutes),
                    duration: 1.0,
                    x: 0.0,
                    y: 0.0,
                    velocity: None,
                })
                .await
                .unwrap();
        }
        let tracks = store
            .tracks()
            .list(&TrackFilter::default(), Page::new(0, 10))
            .await
            .unwrap();
        let ids: Vec<_> = tracks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn count_referencing_inspects_the_named_column() {
        let store = MemoryStore::new();
        store
            .persons()
            .insert(&CreatePerson {
                race_id: Some(1),
                ..CreatePerson::default()
            })
            .await
            .unwrap();
        store
            .persons()
            .insert(&CreatePerson::default())
            .await
            .unwrap();

        let by_race = store
            .count_referencing(EntityKind::Person, "race_id", 1)
            .await
            .unwrap();
        let by_gender = store
            .count_referencing(EntityKind::Person, "gender_id", 3)
            .await
            .unwrap();
        assert_eq!(by_race, 1);
        assert_eq!(by_gender, 2);
    }
}
