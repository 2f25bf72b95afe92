//! Error types for denomination decomposition.
use thiserror::Error;

/// Coarse classification of [`DecomposeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A caller-supplied argument is outside its domain.
    InvalidArgument,
    /// The usable denomination table is larger than the encoding supports.
    OutOfRange,
}

/// Upfront validation failures of a decompose call. No partial results are
/// produced when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecomposeError {
    #[error("max count must be in [2, 8], got {0}")]
    InvalidMaxCount(usize),
    #[error("only positive amounts can be decomposed, got {0}")]
    NonPositiveTarget(u64),
    #[error("too many denominations: {len} usable, maximum is {max}")]
    TooManyDenominations { len: usize, max: usize },
}

impl DecomposeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidMaxCount(_) | Self::NonPositiveTarget(_) => ErrorKind::InvalidArgument,
            Self::TooManyDenominations { .. } => ErrorKind::OutOfRange,
        }
    }
}

/// Rejections raised while building a [`DenominationTable`](crate::DenominationTable).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("denomination at index {0} is zero")]
    ZeroDenomination(usize),
    #[error("denominations not descending at index {index}: {prev} < {value}")]
    NotDescending { index: usize, prev: u64, value: u64 },
}

/// Failures of [`decode`](crate::decode) on inconsistent inputs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("count {0} exceeds the 8 indices a u64 can hold")]
    CountTooLarge(usize),
    #[error("packed index {index} out of range for table of {len}")]
    IndexOutOfRange { index: usize, len: usize },
}
