//! Limits of the decomposition search and its packed encoding.

/// Smallest accepted `max_count`. A single-term decomposition is the
/// trivial case and is not searched for.
pub const MIN_MAX_COUNT: usize = 2;

/// Largest accepted `max_count`: one byte per pick in a `u64`.
pub const MAX_MAX_COUNT: usize = 8;

/// Bits used by one table index inside a [`PackedIndices`](crate::PackedIndices).
pub const INDEX_BITS: u32 = 8;

/// Mask selecting a single packed index.
pub const INDEX_MASK: u64 = 0xff;

/// Maximum number of usable denominations (entries `<= target`) per call.
///
/// The byte format could address 256 entries; one slot is kept as headroom.
pub const MAX_USABLE_DENOMINATIONS: usize = 255;

/// Default bound on results produced by one search over all starting indices.
pub const DEFAULT_SEARCH_CAP: usize = 5_000;

/// Default bound on results returned by a single decompose call.
pub const DEFAULT_RESULT_CAP: usize = 10_000;
