use tracker_core::crud::CrudService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// CRUD operations over the configured store.
    pub crud: CrudService,
}
