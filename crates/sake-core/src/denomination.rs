//! Standard denomination tables.
//!
//! A [`DenominationTable`] is a caller-owned, descending-sorted list of
//! positive values. It is immutable once built and cheap to clone, so one
//! table can be shared by any number of searches. Every search works on a
//! [`UsableDenominations`] view: the suffix of the table whose entries do not
//! exceed the target.

use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_USABLE_DENOMINATIONS;
use crate::error::{DecomposeError, TableError};

/// Descending (non-strict) sequence of positive denominations.
///
/// # Examples
///
/// ```
/// use sake_core::DenominationTable;
/// let table = DenominationTable::new(vec![100, 50, 20, 10]).unwrap();
/// let usable = table.usable_for(60).unwrap();
/// assert_eq!(usable.as_slice(), &[50, 20, 10]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u64>", into = "Vec<u64>")]
pub struct DenominationTable {
    values: Arc<[u64]>,
}

impl DenominationTable {
    /// Build a table, rejecting zero entries and ascending steps.
    pub fn new(values: Vec<u64>) -> Result<Self, TableError> {
        for (index, &value) in values.iter().enumerate() {
            if value == 0 {
                return Err(TableError::ZeroDenomination(index));
            }
            if index > 0 && values[index - 1] < value {
                return Err(TableError::NotDescending {
                    index,
                    prev: values[index - 1],
                    value,
                });
            }
        }
        Ok(Self {
            values: values.into(),
        })
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u64> {
        self.values.get(index).copied()
    }

    /// Drop the leading entries larger than `target`.
    ///
    /// Fails with [`DecomposeError::TooManyDenominations`] when more than
    /// [`MAX_USABLE_DENOMINATIONS`] entries remain, since their indices would
    /// no longer fit the packed encoding.
    pub fn usable_for(&self, target: u64) -> Result<UsableDenominations<'_>, DecomposeError> {
        let offset = self.values.partition_point(|&d| d > target);
        let values = &self.values[offset..];
        if values.len() > MAX_USABLE_DENOMINATIONS {
            return Err(DecomposeError::TooManyDenominations {
                len: values.len(),
                max: MAX_USABLE_DENOMINATIONS,
            });
        }
        Ok(UsableDenominations { values, offset })
    }
}

impl TryFrom<Vec<u64>> for DenominationTable {
    type Error = TableError;

    fn try_from(values: Vec<u64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<DenominationTable> for Vec<u64> {
    fn from(table: DenominationTable) -> Self {
        table.values.to_vec()
    }
}

/// The entries of a table that are `<= target`, in table order.
///
/// Indices used by the search and stored in packed decompositions are
/// relative to this view, not to the full table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsableDenominations<'a> {
    values: &'a [u64],
    offset: usize,
}

impl<'a> UsableDenominations<'a> {
    /// Wrap a slice that is already known to be descending and short enough.
    /// Intended for tests and callers that truncate tables themselves.
    pub fn from_slice(values: &'a [u64]) -> Result<Self, DecomposeError> {
        if values.len() > MAX_USABLE_DENOMINATIONS {
            return Err(DecomposeError::TooManyDenominations {
                len: values.len(),
                max: MAX_USABLE_DENOMINATIONS,
            });
        }
        Ok(Self { values, offset: 0 })
    }

    pub fn as_slice(&self) -> &'a [u64] {
        self.values
    }

    /// Number of leading table entries dropped because they exceed the target.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// First index `>= from` whose denomination does not exceed `amount`,
    /// or `len()` when there is none.
    ///
    /// With duplicate values this is the first entry of the equal run.
    pub fn first_at_most(&self, amount: i128, from: usize) -> usize {
        let from = from.min(self.values.len());
        from + self.values[from..].partition_point(|&d| i128::from(d) > amount)
    }
}

impl Deref for UsableDenominations<'_> {
    type Target = [u64];

    fn deref(&self) -> &[u64] {
        self.values
    }
}
