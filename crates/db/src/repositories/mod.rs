//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod apparel_repo;
pub mod event_repo;
pub mod integrity_repo;
pub mod lookup_repo;
pub mod person_repo;
pub mod track_repo;

pub use apparel_repo::ApparelRepo;
pub use event_repo::EventRepo;
pub use integrity_repo::IntegrityRepo;
pub use lookup_repo::{ActionRepo, AgeRepo, AreaRepo, GenderRepo, HairlineRepo, RaceRepo};
pub use person_repo::PersonRepo;
pub use track_repo::TrackRepo;
