//! Domain models for the plant inventory and care log services.
//!
//! The two services share nothing but this crate: a [`Plant`] lives in the
//! registry's database, a [`CareEvent`] in the care log's. A care event
//! stores a `planta_id` by value only; the reference is never checked
//! against the registry, and deleting a plant does not touch its events.
//!
//! Wire field names are Spanish to stay compatible with the existing API
//! consumers (`nombre`, `frecuencia_riego_dias`, `cantidad_ml`, ...).

mod care_event;
mod plant;

pub use care_event::*;
pub use plant::*;
