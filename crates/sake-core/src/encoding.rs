//! Packed decomposition encoding.
//!
//! A decomposition is stored as up to eight one-byte indices into the usable
//! denomination view, packed into a `u64`:
//!
//! ```text
//!  byte 7 .............................. byte 0
//! [ unused ... | first pick | ... | last pick ]
//! ```
//!
//! Appending a pick shifts the accumulator left by one byte and writes the new
//! index into the low byte, so the earliest pick ends up in the highest
//! occupied byte. Decoding reads the bytes back in reverse to recover pick
//! order. The layout is a contract: encodings returned by the search are only
//! meaningful together with their pick count and the same usable view.

use serde::{Deserialize, Serialize};

use crate::constants::{INDEX_BITS, INDEX_MASK, MAX_MAX_COUNT};
use crate::error::DecodeError;

/// Up to [`MAX_MAX_COUNT`] table indices packed into one `u64`.
///
/// # Examples
///
/// ```
/// use sake_core::PackedIndices;
/// let packed = PackedIndices::EMPTY.push(0).push(2).push(5);
/// assert_eq!(packed.raw(), 0x00_02_05);
/// assert_eq!(packed.indices(3).collect::<Vec<_>>(), vec![0, 2, 5]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackedIndices(u64);

impl PackedIndices {
    pub const EMPTY: Self = Self(0);

    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Append one pick. Bits shifted past the top byte are lost, which only
    /// happens beyond [`MAX_MAX_COUNT`] picks.
    #[must_use]
    pub const fn push(self, index: u8) -> Self {
        Self((self.0 << INDEX_BITS) | (index as u64 & INDEX_MASK))
    }

    /// Index of the pick at `position` (0 = first pick) in a decomposition
    /// of `count` picks.
    pub fn index_at(self, position: usize, count: usize) -> Option<u8> {
        if position >= count || count > MAX_MAX_COUNT {
            return None;
        }
        let byte = count - position - 1;
        Some(((self.0 >> (byte as u32 * INDEX_BITS)) & INDEX_MASK) as u8)
    }

    /// Iterate the first `count` picks in the order they were made.
    pub fn indices(self, count: usize) -> impl Iterator<Item = u8> {
        let count = count.min(MAX_MAX_COUNT);
        (0..count).filter_map(move |position| self.index_at(position, count))
    }
}

impl From<u64> for PackedIndices {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<PackedIndices> for u64 {
    fn from(packed: PackedIndices) -> Self {
        packed.0
    }
}

/// Recover the denomination values of a packed decomposition, first pick first.
///
/// Byte `i` of `encoding` (0 = lowest) becomes output position
/// `count - i - 1`. `table` must be the usable view the encoding was produced
/// against; mismatched inputs decode to unrelated values or fail with
/// [`DecodeError::IndexOutOfRange`].
///
/// # Examples
///
/// ```
/// use sake_core::decode;
/// let usable = [100, 50, 20, 10, 5, 2, 1];
/// assert_eq!(decode(0x00_02_05_06, 4, &usable).unwrap(), vec![100, 20, 2, 1]);
/// ```
pub fn decode(encoding: u64, count: usize, table: &[u64]) -> Result<Vec<u64>, DecodeError> {
    if count > MAX_MAX_COUNT {
        return Err(DecodeError::CountTooLarge(count));
    }
    let mut values = vec![0; count];
    for i in 0..count {
        let index = ((encoding >> (i as u32 * INDEX_BITS)) & INDEX_MASK) as usize;
        values[count - i - 1] = *table.get(index).ok_or(DecodeError::IndexOutOfRange {
            index,
            len: table.len(),
        })?;
    }
    Ok(values)
}
