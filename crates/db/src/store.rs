//! [`Store`] implementation over a PostgreSQL pool.

use async_trait::async_trait;
use tracker_core::entity::{Entity, EntityKind};
use tracker_core::error::StoreError;
use tracker_core::models::{
    Action, Age, Apparel, Area, Event, Gender, Hairline, Person, Race, Track,
};
use tracker_core::store::{Page, Repository, Store};
use tracker_core::types::DbId;

use crate::repositories::{
    ActionRepo, AgeRepo, ApparelRepo, AreaRepo, EventRepo, GenderRepo, HairlineRepo,
    IntegrityRepo, PersonRepo, RaceRepo, TrackRepo,
};
use crate::DbPool;

/// PostgreSQL-backed store. Cheap to clone.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Delegate `Repository<$entity>` to the zero-sized `$repo`.
macro_rules! impl_repository {
    ($entity:ty => $repo:ident) => {
        #[async_trait]
        impl Repository<$entity> for PgStore {
            async fn insert(
                &self,
                input: &<$entity as Entity>::Create,
            ) -> Result<$entity, StoreError> {
                Ok($repo::create(&self.pool, input).await?)
            }

            async fn find_by_id(&self, id: DbId) -> Result<Option<$entity>, StoreError> {
                Ok($repo::find_by_id(&self.pool, id).await?)
            }

            async fn list(
                &self,
                filter: &<$entity as Entity>::Filter,
                page: Page,
            ) -> Result<Vec<$entity>, StoreError> {
                Ok($repo::list(&self.pool, filter, page).await?)
            }

            async fn update(
                &self,
                id: DbId,
                input: &<$entity as Entity>::Update,
            ) -> Result<Option<$entity>, StoreError> {
                Ok($repo::update(&self.pool, id, input).await?)
            }

            async fn delete(&self, id: DbId) -> Result<Option<$entity>, StoreError> {
                Ok($repo::delete(&self.pool, id).await?)
            }
        }
    };
}

impl_repository!(Gender => GenderRepo);
impl_repository!(Race => RaceRepo);
impl_repository!(Age => AgeRepo);
impl_repository!(Hairline => HairlineRepo);
impl_repository!(Area => AreaRepo);
impl_repository!(Action => ActionRepo);
impl_repository!(Person => PersonRepo);
impl_repository!(Event => EventRepo);
impl_repository!(Apparel => ApparelRepo);
impl_repository!(Track => TrackRepo);

#[async_trait]
impl Store for PgStore {
    fn genders(&self) -> &dyn Repository<Gender> {
        self
    }

    fn races(&self) -> &dyn Repository<Race> {
        self
    }

    fn ages(&self) -> &dyn Repository<Age> {
        self
    }

    fn hairlines(&self) -> &dyn Repository<Hairline> {
        self
    }

    fn persons(&self) -> &dyn Repository<Person> {
        self
    }

    fn areas(&self) -> &dyn Repository<Area> {
        self
    }

    fn actions(&self) -> &dyn Repository<Action> {
        self
    }

    fn events(&self) -> &dyn Repository<Event> {
        self
    }

    fn apparels(&self) -> &dyn Repository<Apparel> {
        self
    }

    fn tracks(&self) -> &dyn Repository<Track> {
        self
    }

    async fn exists(&self, kind: EntityKind, id: DbId) -> Result<bool, StoreError> {
        Ok(IntegrityRepo::exists(&self.pool, kind, id).await?)
    }

    async fn count_referencing(
        &self,
        kind: EntityKind,
        column: &'static str,
        id: DbId,
    ) -> Result<i64, StoreError> {
        Ok(IntegrityRepo::count_referencing(&self.pool, kind, column, id).await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
