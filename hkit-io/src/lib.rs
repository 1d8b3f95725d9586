//! # Input/Output utilities for contact pairs.
//!
//! Reading and writing of 4DN-style `.pairs` files (optionally gzip'd) into a
//! [`PairMap`](hkit_core::models::PairMap): a `#chromsize:` header builds the sequence
//! dictionary, and every data line becomes a [`ContactPair`](hkit_core::models::ContactPair).
//!
pub mod consts;
pub mod error;
pub mod pairs;

// re-expose core functions
pub use consts::*;
pub use error::*;
pub use pairs::*;
