//! Domain models for the price tracker.

pub mod observation;

pub use observation::{NewObservation, PriceObservation};
