//! Fuzzy search suggestions.

pub mod fuzzy;
mod suggest;

pub use suggest::{SuggestionEngine, Suggestions, VehicleHit};
