//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - An entity struct matching the database row (`FromRow` with the `sqlx` feature)
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - A list filter, the [`Validate`](crate::entity::Validate) rules and the
//!   declared foreign keys

pub mod apparel;
pub mod event;
pub mod lookup;
pub mod person;
pub mod track;

pub use apparel::{Apparel, ApparelFilter, CreateApparel, UpdateApparel};
pub use event::{CreateEvent, Event, EventFilter, UpdateEvent};
pub use lookup::{
    Action, Age, Area, CreateAction, CreateAge, CreateArea, CreateGender, CreateHairline,
    CreateRace, Gender, Hairline, Race, UpdateAction, UpdateAge, UpdateArea, UpdateGender,
    UpdateHairline, UpdateRace,
};
pub use person::{CreatePerson, Person, PersonFilter, UpdatePerson, DEFAULT_GENDER_ID};
pub use track::{CreateTrack, Track, TrackFilter, UpdateTrack};
