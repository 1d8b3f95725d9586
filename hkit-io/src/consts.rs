/// First line of every pairs file written by hkit.
pub const PAIRS_HEADER: &str = "## pairs format v1.0";
pub const CHROMSIZE_PREFIX: &str = "#chromsize:";
pub const COLUMNS_PREFIX: &str = "#columns:";

/// Mandatory columns of a pairs record, in order.
pub const BASE_COLUMNS: [&str; 7] = ["readID", "chr1", "pos1", "chr2", "pos2", "strand1", "strand2"];
pub const PHASE_COLUMNS: [&str; 2] = ["phase0", "phase1"];
pub const COUNT_COLUMN: &str = "n";

/// Placeholder for a missing read name or an unknown phase.
pub const MISSING: &str = ".";
