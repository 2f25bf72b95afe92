//! # sake-core
//! Foundation types for standard-denomination decomposition.

pub mod constants;
pub mod denomination;
pub mod encoding;
pub mod error;
pub mod traits;
pub mod types;

pub use denomination::{DenominationTable, UsableDenominations};
pub use encoding::{PackedIndices, decode};
pub use error::{DecodeError, DecomposeError, ErrorKind, TableError};
pub use traits::{Deadline, NeverStop, SearchControl};
pub use types::Decomposition;
