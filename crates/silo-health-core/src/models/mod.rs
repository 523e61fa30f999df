//! Domain models for the silo-health core.

mod appointment;
mod record;

pub use appointment::*;
pub use record::*;
