//! Persona domain module.

mod model;
mod request;

pub use model::Persona;
pub use request::{CreatePersonaRequest, MAX_IMAGE_BYTES};
