pub mod bead;
pub mod pair;
pub mod pair_map;
pub mod sdict;

// re-export for cleaner imports
pub use self::bead::{Bead, BeadMap, BeadPair};
pub use self::pair::{ContactPair, MAX_COUNT, PairPayload, Strand, sort_pairs};
pub use self::pair_map::PairMap;
pub use self::sdict::SeqDict;
