//! Repository for the `tracks` table.

use sqlx::PgPool;
use tracker_core::models::{CreateTrack, Track, TrackFilter, UpdateTrack};
use tracker_core::store::Page;
use tracker_core::types::DbId;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, person_id, time, duration, x, y, velocity";

/// Provides CRUD operations for position tracks.
pub struct TrackRepo;

impl TrackRepo {
    /// Insert a new track sample, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTrack) -> Result<Track, sqlx::Error> {
        let query = format!(
            "INSERT INTO tracks (person_id, time, duration, x, y, velocity) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(input.person_id)
            .bind(input.time)
            .bind(input.duration)
            .bind(input.x)
            .bind(input.y)
            .bind(input.velocity)
            .fetch_one(pool)
            .await
    }

    /// Find a track by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Track>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tracks WHERE id = $1");
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tracks, optionally for one person.
    ///
    /// Ordered by time, most recent first, so `limit = 1` yields the latest
    /// known position.
    pub async fn list(
        pool: &PgPool,
        filter: &TrackFilter,
        page: Page,
    ) -> Result<Vec<Track>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tracks \
             WHERE ($1::BIGINT IS NULL OR person_id = $1) \
             ORDER BY time DESC, id DESC \
             OFFSET $2 LIMIT $3"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(filter.person_id)
            .bind(page.skip)
            .bind(page.limit)
            .fetch_all(pool)
            .await
    }

    /// Update a track. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTrack,
    ) -> Result<Option<Track>, sqlx::Error> {
        let query = format!(
            "UPDATE tracks SET \
                person_id = COALESCE($2, person_id), \
                time = COALESCE($3, time), \
                duration = COALESCE($4, duration), \
                x = COALESCE($5, x), \
                y = COALESCE($6, y), \
                velocity = COALESCE($7, velocity) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .bind(input.person_id)
            .bind(input.time)
            .bind(input.duration)
            .bind(input.x)
            .bind(input.y)
            .bind(input.velocity)
            .fetch_optional(pool)
            .await
    }

    /// Delete a track, returning the removed row.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Track>, sqlx::Error> {
        let query = format!("DELETE FROM tracks WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
