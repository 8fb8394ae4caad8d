//! Existence and reference-count queries addressed by entity kind.

use sqlx::PgPool;
use tracker_core::entity::EntityKind;
use tracker_core::types::DbId;

pub struct IntegrityRepo;

impl IntegrityRepo {
    /// Whether a row with `id` exists in the table backing `kind`.
    pub async fn exists(pool: &PgPool, kind: EntityKind, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", kind.table());
        let (exists,): (bool,) = sqlx::query_as(&query).bind(id).fetch_one(pool).await?;
        Ok(exists)
    }

    /// Count rows of `kind` whose `column` equals `id`.
    ///
    /// `column` must come from the declared foreign-key set of `kind`.
    pub async fn count_referencing(
        pool: &PgPool,
        kind: EntityKind,
        column: &'static str,
        id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM {} WHERE {column} = $1", kind.table());
        let (count,): (i64,) = sqlx::query_as(&query).bind(id).fetch_one(pool).await?;
        Ok(count)
    }
}
