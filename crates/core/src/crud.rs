//! Generic create/read/update/delete over any [`Entity`].
//!
//! Every write runs field validation first, then the referential-integrity
//! check, and only then touches the store, so a rejected request never
//! leaves a partial mutation behind.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::entity::{Entity, References, Validate};
use crate::error::CoreError;
use crate::references::{check_references, ensure_unreferenced};
use crate::store::{Page, Store};
use crate::types::DbId;

/// The CRUD operation set, shared by every resource.
#[derive(Clone)]
pub struct CrudService {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
}

impl CrudService {
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// A service reading wall-clock time.
    pub fn with_system_clock(store: Arc<dyn Store>) -> Self {
        Self::new(store, Arc::new(SystemClock))
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    pub async fn create<E: Entity>(&self, input: &E::Create) -> Result<E, CoreError> {
        input.validate(self.clock.now())?;

        let _writes = self.store.write_lock().await;
        check_references(self.store(), &input.references()).await?;

        let created = E::repository(self.store()).insert(input).await?;
        tracing::info!(entity = %E::KIND, id = created.id(), "Created");
        Ok(created)
    }

    pub async fn get<E: Entity>(&self, id: DbId) -> Result<E, CoreError> {
        E::repository(self.store())
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: E::KIND,
                id,
            })
    }

    pub async fn list<E: Entity>(&self, filter: &E::Filter, page: Page) -> Result<Vec<E>, CoreError> {
        Ok(E::repository(self.store()).list(filter, page).await?)
    }

    /// Patch an existing row. Only fields present in `input` are validated,
    /// reference-checked and written.
    pub async fn update<E: Entity>(&self, id: DbId, input: &E::Update) -> Result<E, CoreError> {
        let not_found = CoreError::NotFound {
            entity: E::KIND,
            id,
        };
        let _writes = self.store.write_lock().await;
        let repo = E::repository(self.store());
        if repo.find_by_id(id).await?.is_none() {
            return Err(not_found);
        }

        input.validate(self.clock.now())?;
        check_references(self.store(), &input.references()).await?;

        let updated = repo.update(id, input).await?.ok_or(not_found)?;
        tracing::info!(entity = %E::KIND, id, "Updated");
        Ok(updated)
    }

    /// Remove a row and return it as it was. Refused with
    /// [`CoreError::Conflict`] while other rows still reference it.
    pub async fn delete<E: Entity>(&self, id: DbId) -> Result<E, CoreError> {
        let not_found = CoreError::NotFound {
            entity: E::KIND,
            id,
        };
        let _writes = self.store.write_lock().await;
        let repo = E::repository(self.store());
        if repo.find_by_id(id).await?.is_none() {
            return Err(not_found);
        }

        ensure_unreferenced(self.store(), E::KIND, id).await?;

        let deleted = repo.delete(id).await?.ok_or(not_found)?;
        tracing::info!(entity = %E::KIND, id, "Deleted");
        Ok(deleted)
    }
}
