//! Repository for the `persons` table.

use sqlx::PgPool;
use tracker_core::models::{CreatePerson, Person, PersonFilter, UpdatePerson};
use tracker_core::store::Page;
use tracker_core::types::DbId;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, base64, height, glasses, feature, gender_id, hairline_id, race_id, age_id";

/// Provides CRUD operations for persons.
pub struct PersonRepo;

impl PersonRepo {
    /// Insert a new person, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePerson) -> Result<Person, sqlx::Error> {
        let query = format!(
            "INSERT INTO persons \
                (base64, height, glasses, feature, gender_id, hairline_id, race_id, age_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(&input.base64)
            .bind(input.height)
            .bind(input.glasses)
            .bind(&input.feature)
            .bind(input.gender_id)
            .bind(input.hairline_id)
            .bind(input.race_id)
            .bind(input.age_id)
            .fetch_one(pool)
            .await
    }

    /// Find a person by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Person>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM persons WHERE id = $1");
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List persons, optionally filtered by any of their lookup keys.
    ///
    /// Ordered by id.
    pub async fn list(
        pool: &PgPool,
        filter: &PersonFilter,
        page: Page,
    ) -> Result<Vec<Person>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM persons \
             WHERE ($1::BIGINT IS NULL OR gender_id = $1) \
               AND ($2::BIGINT IS NULL OR hairline_id = $2) \
               AND ($3::BIGINT IS NULL OR race_id = $3) \
               AND ($4::BIGINT IS NULL OR age_id = $4) \
             ORDER BY id \
             OFFSET $5 LIMIT $6"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(filter.gender_id)
            .bind(filter.hairline_id)
            .bind(filter.race_id)
            .bind(filter.age_id)
            .bind(page.skip)
            .bind(page.limit)
            .fetch_all(pool)
            .await
    }

    /// Update a person. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePerson,
    ) -> Result<Option<Person>, sqlx::Error> {
        let query = format!(
            "UPDATE persons SET \
                base64 = COALESCE($2, base64), \
                height = COALESCE($3, height), \
                glasses = COALESCE($4, glasses), \
                feature = COALESCE($5, feature), \
                gender_id = COALESCE($6, gender_id), \
                hairline_id = COALESCE($7, hairline_id), \
                race_id = COALESCE($8, race_id), \
                age_id = COALESCE($9, age_id) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .bind(&input.base64)
            .bind(input.height)
            .bind(input.glasses)
            .bind(&input.feature)
            .bind(input.gender_id)
            .bind(input.hairline_id)
            .bind(input.race_id)
            .bind(input.age_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a person, returning the removed row.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Person>, sqlx::Error> {
        let query = format!("DELETE FROM persons WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
