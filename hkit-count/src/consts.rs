/// The command name for containment counting.
pub const COUNT_CONTAINED_CMD: &str = "count-contained";

/// The command name for neighbor counting.
pub const COUNT_NEI_CMD: &str = "count-nei";

/// Default half-width of the neighbor box, in base pairs.
pub const DEFAULT_RADIUS: u32 = 10_000;

// radix sort: 8 bits per pass over a 64-bit key
pub const RADIX_BITS: u32 = 8;
pub const RADIX_SIZE: usize = 1 << RADIX_BITS;
pub const RADIX_PASSES: u32 = u64::BITS / RADIX_BITS;
