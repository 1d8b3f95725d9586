//! Pair-counting engine for Hi-C style contact pairs.
//!
//! This crate annotates arrays of contact pairs (and 3D-model bead pairs) with derived
//! counts in `O(n log n)`:
//!
//! - [`count_contained`]: for each same-chromosome pair, the number of pairs nested inside
//!   it (itself included). Feeds deduplication and filtering.
//! - [`count_neighbors`]: for each pair, the number of other pairs whose two anchors both
//!   fall within a radius box around its own. Feeds density-weighted phasing.
//! - [`count_bead_neighbors`]: the same neighbor count over the bead pairs of a 3D model.
//!
//! Both sweeps are built on [`tree::RankTree`], an AVL tree augmented with subtree sizes
//! whose nodes live in a free-list backed [`pool::NodePool`].
//!
//! ## Quick Start
//!
//! ```rust
//! use hkit_core::models::{ContactPair, sort_pairs};
//! use hkit_count::{count_contained, count_neighbors};
//!
//! let mut pairs = vec![
//!     ContactPair::new(0, 1000, 0, 5000),
//!     ContactPair::new(0, 1010, 0, 4990),
//!     ContactPair::new(1, 200, 1, 900),
//! ];
//!
//! sort_pairs(&mut pairs);
//! count_contained(&mut pairs);
//! assert_eq!(pairs[0].n, 2);
//!
//! count_neighbors(&mut pairs, 100).unwrap();
//! assert_eq!(pairs[0].n, 1);
//! assert_eq!(pairs[2].n, 0);
//! ```
//!
//! Every sweep allocates its tree at the start of the call and drops it before returning;
//! the only lasting effect is the count written into the caller's records.

pub mod consts;
pub mod contained;
pub mod errors;
pub mod neighbors;
pub mod options;
pub mod pool;
pub mod sort;
pub mod tree;

// re-exports
pub use self::contained::count_contained;
pub use self::errors::{CountError, Result};
pub use self::neighbors::{count_bead_neighbors, count_neighbors};
pub use self::options::CountOptions;
