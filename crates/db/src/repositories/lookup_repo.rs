//! Repositories for the single-column lookup tables.

use sqlx::PgPool;
use tracker_core::entity::NoFilter;
use tracker_core::models::{
    Action, Age, Area, CreateAction, CreateAge, CreateArea, CreateGender, CreateHairline,
    CreateRace, Gender, Hairline, Race, UpdateAction, UpdateAge, UpdateArea, UpdateGender,
    UpdateHairline, UpdateRace,
};
use tracker_core::store::Page;
use tracker_core::types::DbId;

macro_rules! define_lookup_repo {
    (
        $(#[$meta:meta])*
        $repo:ident for $entity:ty, $create:ty, $update:ty {
            table: $table:literal,
            column: $column:literal,
            field: $field:ident,
        }
    ) => {
        $(#[$meta])*
        pub struct $repo;

        impl $repo {
            /// Column list shared across queries.
            const COLUMNS: &'static str = concat!("id, ", $column);

            /// Insert a new row, returning it.
            pub async fn create(pool: &PgPool, input: &$create) -> Result<$entity, sqlx::Error> {
                let query = format!(
                    "INSERT INTO {} ({}) VALUES ($1) RETURNING {}",
                    $table,
                    $column,
                    Self::COLUMNS,
                );
                sqlx::query_as::<_, $entity>(&query)
                    .bind(&input.$field)
                    .fetch_one(pool)
                    .await
            }

            pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<$entity>, sqlx::Error> {
                let query = format!("SELECT {} FROM {} WHERE id = $1", Self::COLUMNS, $table);
                sqlx::query_as::<_, $entity>(&query)
                    .bind(id)
                    .fetch_optional(pool)
                    .await
            }

            /// List rows ordered by id. Lookup tables have no filterable columns.
            pub async fn list(
                pool: &PgPool,
                _filter: &NoFilter,
                page: Page,
            ) -> Result<Vec<$entity>, sqlx::Error> {
                let query = format!(
                    "SELECT {} FROM {} ORDER BY id OFFSET $1 LIMIT $2",
                    Self::COLUMNS,
                    $table,
                );
                sqlx::query_as::<_, $entity>(&query)
                    .bind(page.skip)
                    .bind(page.limit)
                    .fetch_all(pool)
                    .await
            }

            /// Update the value if present.
            ///
            /// Returns `None` if no row with the given `id` exists.
            pub async fn update(
                pool: &PgPool,
                id: DbId,
                input: &$update,
            ) -> Result<Option<$entity>, sqlx::Error> {
                let query = format!(
                    "UPDATE {table} SET {column} = COALESCE($2, {column}) \
                     WHERE id = $1 RETURNING {columns}",
                    table = $table,
                    column = $column,
                    columns = Self::COLUMNS,
                );
                sqlx::query_as::<_, $entity>(&query)
                    .bind(id)
                    .bind(&input.$field)
                    .fetch_optional(pool)
                    .await
            }

            /// Delete a row, returning it as it was.
            pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<$entity>, sqlx::Error> {
                let query = format!("DELETE FROM {} WHERE id = $1 RETURNING {}", $table, Self::COLUMNS);
                sqlx::query_as::<_, $entity>(&query)
                    .bind(id)
                    .fetch_optional(pool)
                    .await
            }
        }
    };
}

define_lookup_repo! {
    /// CRUD for `genders`.
    GenderRepo for Gender, CreateGender, UpdateGender {
        table: "genders",
        column: "value",
        field: value,
    }
}

define_lookup_repo! {
    /// CRUD for `races`.
    RaceRepo for Race, CreateRace, UpdateRace {
        table: "races",
        column: "value",
        field: value,
    }
}

define_lookup_repo! {
    /// CRUD for `ages`.
    AgeRepo for Age, CreateAge, UpdateAge {
        table: "ages",
        column: "value",
        field: value,
    }
}

define_lookup_repo! {
    /// CRUD for `hairlines`.
    HairlineRepo for Hairline, CreateHairline, UpdateHairline {
        table: "hairlines",
        column: "\"type\"",
        field: kind,
    }
}

define_lookup_repo! {
    /// CRUD for `areas`.
    AreaRepo for Area, CreateArea, UpdateArea {
        table: "areas",
        column: "name",
        field: name,
    }
}

define_lookup_repo! {
    /// CRUD for `actions`.
    ActionRepo for Action, CreateAction, UpdateAction {
        table: "actions",
        column: "\"type\"",
        field: kind,
    }
}
