//! Repository for the `apparels` table.

use sqlx::PgPool;
use tracker_core::models::{Apparel, ApparelFilter, CreateApparel, UpdateApparel};
use tracker_core::store::Page;
use tracker_core::types::DbId;

const COLUMNS: &str = "id, person_id, shirt_colour, pant_colour, shoe_colour, time";

/// Provides CRUD operations for apparel records.
pub struct ApparelRepo;

impl ApparelRepo {
    pub async fn create(pool: &PgPool, input: &CreateApparel) -> Result<Apparel, sqlx::Error> {
        let query = format!(
            "INSERT INTO apparels (person_id, shirt_colour, pant_colour, shoe_colour, time) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Apparel>(&query)
            .bind(input.person_id)
            .bind(&input.shirt_colour)
            .bind(&input.pant_colour)
            .bind(&input.shoe_colour)
            .bind(input.time)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Apparel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM apparels WHERE id = $1");
        sqlx::query_as::<_, Apparel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &ApparelFilter,
        page: Page,
    ) -> Result<Vec<Apparel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM apparels \
             WHERE ($1::BIGINT IS NULL OR person_id = $1) \
             ORDER BY id \
             OFFSET $2 LIMIT $3"
        );
        sqlx::query_as::<_, Apparel>(&query)
            .bind(filter.person_id)
            .bind(page.skip)
            .bind(page.limit)
            .fetch_all(pool)
            .await
    }

    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateApparel,
    ) -> Result<Option<Apparel>, sqlx::Error> {
        let query = format!(
            "UPDATE apparels SET \
                person_id = COALESCE($2, person_id), \
                shirt_colour = COALESCE($3, shirt_colour), \
                pant_colour = COALESCE($4, pant_colour), \
                shoe_colour = COALESCE($5, shoe_colour), \
                time = COALESCE($6, time) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Apparel>(&query)
            .bind(id)
            .bind(input.person_id)
            .bind(&input.shirt_colour)
            .bind(&input.pant_colour)
            .bind(&input.shoe_colour)
            .bind(input.time)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Apparel>, sqlx::Error> {
        let query = format!("DELETE FROM apparels WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Apparel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
