//! Domain models for the clinic records system.

mod patient;
mod settings;

pub use patient::*;
pub use settings::*;
