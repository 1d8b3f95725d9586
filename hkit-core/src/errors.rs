use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    #[error("Radius must be positive")]
    ZeroRadius,

    #[error("Radius {0} exceeds the packing boundary of {1}; neighbors would bridge chromosomes")]
    InvalidRadius(u64, u32),

    #[error("Coordinate {0} does not fit in a packed key (max {1})")]
    CoordinateOverflow(u64, u32),

    #[error("Unknown chromosome id: {0}")]
    UnknownChromosome(u32),

    #[error("Bead id {0} is out of range ({1} beads)")]
    BeadOutOfRange(u32, usize),
}

pub type Result<T> = std::result::Result<T, CoreError>;
