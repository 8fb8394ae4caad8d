//! Persistence seams consumed by the CRUD service.
//!
//! A [`Store`] hands out one [`Repository`] per entity and answers the
//! kind-addressed questions the reference checker needs. Implementations:
//! [`crate::memory::MemoryStore`] and `tracker_db::PgStore`.

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

use crate::entity::{Entity, EntityKind};
use crate::error::StoreError;
use crate::models::{
    Action, Age, Apparel, Area, Event, Gender, Hairline, Person, Race, Track,
};
use crate::types::DbId;

/// Offset pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl Page {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self { skip, limit }
    }
}

/// Row-level operations on one entity table. Each call is atomic.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Insert a new row, returning it with its assigned id.
    async fn insert(&self, input: &E::Create) -> Result<E, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<E>, StoreError>;

    /// Filtered, paginated select in the entity's listing order.
    async fn list(&self, filter: &E::Filter, page: Page) -> Result<Vec<E>, StoreError>;

    /// Apply the present fields of `input`. Returns `None` if no row with
    /// the given `id` exists.
    async fn update(&self, id: DbId, input: &E::Update) -> Result<Option<E>, StoreError>;

    /// Remove a row, returning it as it was. `None` if absent.
    async fn delete(&self, id: DbId) -> Result<Option<E>, StoreError>;
}

#[async_trait]
pub trait Store: Send + Sync {
    fn genders(&self) -> &dyn Repository<Gender>;
    fn races(&self) -> &dyn Repository<Race>;
    fn ages(&self) -> &dyn Repository<Age>;
    fn hairlines(&self) -> &dyn Repository<Hairline>;
    fn persons(&self) -> &dyn Repository<Person>;
    fn areas(&self) -> &dyn Repository<Area>;
    fn actions(&self) -> &dyn Repository<Action>;
    fn events(&self) -> &dyn Repository<Event>;
    fn apparels(&self) -> &dyn Repository<Apparel>;
    fn tracks(&self) -> &dyn Repository<Track>;

    /// Whether a row of `kind` with `id` exists.
    async fn exists(&self, kind: EntityKind, id: DbId) -> Result<bool, StoreError>;

    /// Number of `kind` rows whose `column` equals `id`.
    async fn count_referencing(
        &self,
        kind: EntityKind,
        column: &'static str,
        id: DbId,
    ) -> Result<i64, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;

    /// Serializes check-then-write sequences for backends without
    /// schema-enforced foreign keys. Held by the CRUD service for the
    /// whole of a create, update or delete. `None` when the backend
    /// enforces referential integrity itself.
    async fn write_lock(&self) -> Option<OwnedMutexGuard<()>> {
        None
    }
}
