//! Generic handlers shared by every resource under `/api/v1`.
//!
//! Each handler is instantiated per entity by [`crate::routes::resource`].

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracker_core::entity::Entity;
use tracker_core::types::DbId;

use crate::error::AppResult;
use crate::query::PageParams;
use crate::state::AppState;

/// POST /api/v1/{resource}
pub async fn create<E: Entity>(
    State(state): State<AppState>,
    payload: Result<Json<E::Create>, JsonRejection>,
) -> AppResult<(StatusCode, Json<E>)> {
    let Json(input) = payload?;
    let created = state.crud.create::<E>(&input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/{resource}?skip=&limit=&<filters>
pub async fn list<E: Entity>(
    State(state): State<AppState>,
    page: Result<Query<PageParams>, QueryRejection>,
    filter: Result<Query<E::Filter>, QueryRejection>,
) -> AppResult<Json<Vec<E>>> {
    let Query(page) = page?;
    let Query(filter) = filter?;
    let rows = state
        .crud
        .list::<E>(&filter, page.resolve(E::DEFAULT_LIMIT)?)
        .await?;
    Ok(Json(rows))
}

/// GET /api/v1/{resource}/{id}
pub async fn get_by_id<E: Entity>(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<E>> {
    let Path(id) = id?;
    Ok(Json(state.crud.get::<E>(id).await?))
}

/// PATCH /api/v1/{resource}/{id}
pub async fn update<E: Entity>(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<E::Update>, JsonRejection>,
) -> AppResult<Json<E>> {
    let Path(id) = id?;
    let Json(input) = payload?;
    Ok(Json(state.crud.update::<E>(id, &input).await?))
}

/// DELETE /api/v1/{resource}/{id}
///
/// Responds with the row as it was before deletion.
pub async fn delete<E: Entity>(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<E>> {
    let Path(id) = id?;
    Ok(Json(state.crud.delete::<E>(id).await?))
}
