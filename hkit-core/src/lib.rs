//! Core data model for hkit.
//!
//! Contact pairs, sequence dictionaries and 3D-model beads, plus the packing of a
//! chromosome id and a coordinate into a single ordered 64-bit key that the counting
//! engine sweeps over.
pub mod errors;
pub mod models;
pub mod packing;

pub use errors::{CoreError, Result};
