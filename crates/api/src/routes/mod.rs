pub mod health;

use axum::routing::get;
use axum::Router;
use tracker_core::entity::Entity;
use tracker_core::models::{
    Action, Age, Apparel, Area, Event, Gender, Hairline, Person, Race, Track,
};

use crate::handlers::crud;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Every resource exposes the same five operations:
///
/// ```text
/// GET    /{resource}          -> list (skip, limit, equality filters)
/// POST   /{resource}          -> create
/// GET    /{resource}/{id}     -> get_by_id
/// PATCH  /{resource}/{id}     -> update (patch)
/// DELETE /{resource}/{id}     -> delete
///
/// Resources: genders, races, ages, hairlines, persons, areas, actions,
///            events, apparels, tracks
///
/// List filters:
///   /persons    gender_id, hairline_id, race_id, age_id
///   /events     person_id, area_id, action_id
///   /apparels   person_id
///   /tracks     person_id (most recent first, default limit 1)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/genders", resource::<Gender>())
        .nest("/races", resource::<Race>())
        .nest("/ages", resource::<Age>())
        .nest("/hairlines", resource::<Hairline>())
        .nest("/persons", resource::<Person>())
        .nest("/areas", resource::<Area>())
        .nest("/actions", resource::<Action>())
        .nest("/events", resource::<Event>())
        .nest("/apparels", resource::<Apparel>())
        .nest("/tracks", resource::<Track>())
}

/// The five CRUD routes for one entity.
pub fn resource<E: Entity>() -> Router<AppState> {
    Router::new()
        .route("/", get(crud::list::<E>).post(crud::create::<E>))
        .route(
            "/{id}",
            get(crud::get_by_id::<E>)
                .patch(crud::update::<E>)
                .delete(crud::delete::<E>),
        )
}
