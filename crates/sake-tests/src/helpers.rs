//! Shared test helpers.

use sake_core::{DecomposeError, Decomposition, DenominationTable};
use sake_search::decompose;

/// The small table used throughout the scenarios.
pub fn std_table() -> DenominationTable {
    DenominationTable::new(vec![100, 50, 20, 10, 5, 2, 1]).expect("descending table")
}

/// `n` distinct denominations `n, n-1, ..., 1`.
pub fn countdown_table(n: u64) -> DenominationTable {
    DenominationTable::new((1..=n).rev().collect()).expect("descending table")
}

/// 255 even denominations `510, 508, ..., 2`.
///
/// Paired with an odd target no decomposition is exact, so the exact-hit skip
/// never shortens the enumeration and the caps are what stops it.
pub fn even_table() -> DenominationTable {
    DenominationTable::new((1..=255u64).rev().map(|i| 2 * i).collect()).expect("descending table")
}

/// Decompose and decode every result against the same truncated view.
pub fn decompose_values(
    target: u64,
    tolerance: i64,
    max_count: usize,
    table: &DenominationTable,
) -> Result<Vec<(Decomposition, Vec<u64>)>, DecomposeError> {
    let found = decompose(target, tolerance, max_count, table)?;
    let usable = table.usable_for(target)?;
    Ok(found
        .into_iter()
        .map(|d| {
            let values = d.values(&usable).expect("search results decode");
            (d, values)
        })
        .collect())
}
