//! Referential-integrity checks run before writes.

use crate::entity::{EntityKind, ForeignKey};
use crate::error::CoreError;
use crate::store::Store;
use crate::types::DbId;

/// Verify that every present foreign key resolves to an existing row.
///
/// Keys are checked in declaration order; the first missing target is
/// reported.
pub async fn check_references(store: &dyn Store, keys: &[ForeignKey]) -> Result<(), CoreError> {
    for key in keys {
        if !store.exists(key.target, key.id).await? {
            tracing::debug!(
                field = key.field,
                target = %key.target,
                id = key.id,
                "Foreign key does not resolve",
            );
            return Err(CoreError::ReferenceNotFound {
                entity: key.target,
                id: key.id,
            });
        }
    }
    Ok(())
}

/// Refuse to delete a row that other rows still point at.
pub async fn ensure_unreferenced(
    store: &dyn Store,
    kind: EntityKind,
    id: DbId,
) -> Result<(), CoreError> {
    for (dependent, field) in kind.dependents() {
        let count = store.count_referencing(dependent, field.column, id).await?;
        if count > 0 {
            return Err(CoreError::Conflict(format!(
                "{kind} with id {id} is still referenced by {count} {}",
                dependent.table(),
            )));
        }
    }
    Ok(())
}
