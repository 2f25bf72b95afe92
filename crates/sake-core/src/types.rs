//! Search result type.

use serde::{Deserialize, Serialize};

use crate::encoding::{PackedIndices, decode};
use crate::error::DecodeError;

/// One decomposition found by the search: the achieved sum, the number of
/// denominations used, and their packed indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decomposition {
    pub sum: u64,
    pub count: usize,
    pub encoding: PackedIndices,
}

impl Decomposition {
    /// Denomination values in pick order. `usable` must be the view the
    /// decomposition was produced against.
    pub fn values(&self, usable: &[u64]) -> Result<Vec<u64>, DecodeError> {
        decode(self.encoding.raw(), self.count, usable)
    }

    /// Absolute difference between `target` and the achieved sum.
    pub fn distance(&self, target: u64) -> u64 {
        self.sum.abs_diff(target)
    }
}
