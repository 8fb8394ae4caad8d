//! Domain core of the people-tracking service.
//!
//! Entities and their payloads, field validation, referential-integrity
//! checks and the generic [`crud::CrudService`]. Persistence is reached
//! through the [`store::Store`] seam; [`memory::MemoryStore`] is the
//! in-process implementation, PostgreSQL lives in `tracker-db`.

pub mod clock;
pub mod crud;
pub mod entity;
pub mod error;
pub mod memory;
pub mod models;
pub mod references;
pub mod store;
pub mod types;
pub mod validation;
