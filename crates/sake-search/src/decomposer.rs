//! Decomposition entry points.
//!
//! [`Decomposer::run`] validates a [`DecompositionRequest`], truncates the
//! table to the denominations usable for the target, runs the search either
//! sequentially or with one rayon task per starting index, and applies the
//! configured caps. Both modes return the same results in the same order.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use sake_core::constants::{MAX_MAX_COUNT, MIN_MAX_COUNT};
use sake_core::{
    DecodeError, DecomposeError, Decomposition, DenominationTable, NeverStop, SearchControl,
    UsableDenominations,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::{ConfigError, SearchConfig};
use crate::engine::{SearchEngine, StopReason};
use crate::error::SearchError;

/// Parameters of one decompose call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecompositionRequest {
    pub target: u64,
    /// Slack between target and achieved sum at which a branch stops.
    pub tolerance: i64,
    /// Maximum number of denominations per decomposition, in `[2, 8]`.
    pub max_count: usize,
}

impl DecompositionRequest {
    pub fn new(target: u64, tolerance: i64, max_count: usize) -> Self {
        Self {
            target,
            tolerance,
            max_count,
        }
    }

    pub fn validate(&self) -> Result<(), DecomposeError> {
        if !(MIN_MAX_COUNT..=MAX_MAX_COUNT).contains(&self.max_count) {
            return Err(DecomposeError::InvalidMaxCount(self.max_count));
        }
        if self.target == 0 {
            return Err(DecomposeError::NonPositiveTarget(self.target));
        }
        Ok(())
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Completion {
    /// Every branch was explored.
    Exhausted,
    /// The search stopped at `search_cap` results.
    SearchCapReached,
    /// The output was truncated to `result_cap` results.
    ResultCapReached,
    /// The control stopped the search; results are partial.
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Search nodes visited, including work discarded by the caps.
    pub nodes_visited: u64,
    /// Size of the truncated table the search ran over.
    pub usable_denominations: usize,
    /// Returned results whose sum equals the target.
    pub exact_hits: usize,
}

/// Output of [`Decomposer::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    /// Results in discovery order.
    pub decompositions: Vec<Decomposition>,
    pub completion: Completion,
    pub stats: SearchStats,
    /// Number of leading table entries skipped because they exceed the target.
    /// Decode results against `table[usable_offset..]`.
    pub usable_offset: usize,
}

impl SearchReport {
    /// Denomination values of every result, one item per decomposition in
    /// result order. Items fail only when `table` is not the table the
    /// report was produced from.
    pub fn values<'a>(
        &'a self,
        table: &'a DenominationTable,
    ) -> impl Iterator<Item = Result<Vec<u64>, DecodeError>> + 'a {
        let usable = &table.as_slice()[self.usable_offset.min(table.len())..];
        self.decompositions.iter().map(move |d| d.values(usable))
    }
}

/// Runs decomposition searches with a fixed [`SearchConfig`].
#[derive(Debug, Clone, Default)]
pub struct Decomposer {
    config: SearchConfig,
}

impl Decomposer {
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Validate the request, then enumerate decompositions of
    /// `request.target` over `table`.
    ///
    /// Fails only on validation; once the search starts it always returns a
    /// report, possibly partial if `control` stops it.
    pub fn run<C: SearchControl + ?Sized>(
        &self,
        table: &DenominationTable,
        request: DecompositionRequest,
        control: &C,
    ) -> Result<SearchReport, DecomposeError> {
        request.validate()?;
        let usable = table.usable_for(request.target)?;

        debug!(
            target_amount = request.target,
            tolerance = request.tolerance,
            max_count = request.max_count,
            usable = usable.len(),
            parallel = self.config.parallel,
            "starting decomposition search"
        );

        let (mut decompositions, stop, nodes_visited) = if self.config.parallel {
            self.search_parallel(usable, &request, control)
        } else {
            self.search_sequential(usable, &request, control)
        };

        let mut completion = match stop {
            StopReason::Exhausted => Completion::Exhausted,
            StopReason::CapReached => Completion::SearchCapReached,
            StopReason::Cancelled => Completion::Cancelled,
        };
        if decompositions.len() > self.config.result_cap {
            trace!(
                found = decompositions.len(),
                cap = self.config.result_cap,
                "truncating to result cap"
            );
            decompositions.truncate(self.config.result_cap);
            if completion != Completion::Cancelled {
                completion = Completion::ResultCapReached;
            }
        }
        if completion == Completion::Cancelled {
            warn!(
                found = decompositions.len(),
                "decomposition search cancelled"
            );
        }

        let exact_hits = decompositions
            .iter()
            .filter(|d| d.sum == request.target)
            .count();
        debug!(
            found = decompositions.len(),
            exact_hits,
            nodes_visited,
            ?completion,
            "decomposition search finished"
        );

        Ok(SearchReport {
            decompositions,
            completion,
            stats: SearchStats {
                nodes_visited,
                usable_denominations: usable.len(),
                exact_hits,
            },
            usable_offset: usable.offset(),
        })
    }

    fn search_sequential<C: SearchControl + ?Sized>(
        &self,
        usable: UsableDenominations<'_>,
        request: &DecompositionRequest,
        control: &C,
    ) -> (Vec<Decomposition>, StopReason, u64) {
        let mut engine =
            SearchEngine::new(usable, request.target, request.tolerance, request.max_count);
        let mut out = Vec::new();
        let stop = engine.search_all(self.config.search_cap, &mut out, control);
        (out, stop, engine.nodes_visited())
    }

    /// One task per starting index, each bounded by the search cap on its own.
    /// Concatenating the per-start lists in start order and cutting at the cap
    /// reproduces the sequential output exactly.
    fn search_parallel<C: SearchControl + ?Sized>(
        &self,
        usable: UsableDenominations<'_>,
        request: &DecompositionRequest,
        control: &C,
    ) -> (Vec<Decomposition>, StopReason, u64) {
        let cap = self.config.search_cap;
        let done: Vec<AtomicUsize> = (0..usable.len())
            .map(|_| AtomicUsize::new(PENDING))
            .collect();

        let per_start: Vec<(Vec<Decomposition>, StopReason, u64)> = (0..usable.len())
            .into_par_iter()
            .map(|start| {
                if prefix_fills_cap(&done[..start], cap) {
                    trace!(start, "skipping start index past the search cap");
                    return (Vec::new(), StopReason::CapReached, 0);
                }
                let mut engine = SearchEngine::new(
                    usable,
                    request.target,
                    request.tolerance,
                    request.max_count,
                );
                let mut out = Vec::new();
                let stop = engine.search_from(start, cap, &mut out, control);
                done[start].store(out.len(), Ordering::Release);
                (out, stop, engine.nodes_visited())
            })
            .collect();

        let nodes_visited: u64 = per_start.iter().map(|(_, _, nodes)| nodes).sum();
        let mut merged = Vec::new();
        let mut stop = StopReason::Exhausted;
        for (out, start_stop, _) in per_start {
            let room = cap - merged.len();
            if out.len() >= room {
                merged.extend(out.into_iter().take(room));
                stop = StopReason::CapReached;
                break;
            }
            merged.extend(out);
            if start_stop == StopReason::Cancelled {
                stop = StopReason::Cancelled;
                break;
            }
        }
        (merged, stop, nodes_visited)
    }
}

const PENDING: usize = usize::MAX;

/// True when the completed leading run of `done` already holds `cap` results,
/// so anything found at a later start would be cut anyway.
fn prefix_fills_cap(done: &[AtomicUsize], cap: usize) -> bool {
    let mut total = 0usize;
    for count in done {
        let count = count.load(Ordering::Acquire);
        if count == PENDING {
            return false;
        }
        total += count;
        if total >= cap {
            return true;
        }
    }
    false
}

/// Enumerate decompositions of `target` with the default caps.
///
/// # Examples
///
/// ```
/// use sake_core::DenominationTable;
/// use sake_search::decompose;
///
/// let table = DenominationTable::new(vec![100, 50, 20, 10, 5, 2, 1]).unwrap();
/// let found = decompose(123, 0, 4, &table).unwrap();
/// let usable = table.usable_for(123).unwrap();
/// assert!(found
///     .iter()
///     .any(|d| d.sum == 123 && d.values(&usable).unwrap() == vec![100, 20, 2, 1]));
/// ```
pub fn decompose(
    target: u64,
    tolerance: i64,
    max_count: usize,
    table: &DenominationTable,
) -> Result<Vec<Decomposition>, DecomposeError> {
    Decomposer::default()
        .run(
            table,
            DecompositionRequest::new(target, tolerance, max_count),
            &NeverStop,
        )
        .map(|report| report.decompositions)
}

/// Build a [`Decomposer`] from `config` and run one request.
pub fn search<C: SearchControl + ?Sized>(
    config: SearchConfig,
    table: &DenominationTable,
    request: DecompositionRequest,
    control: &C,
) -> Result<SearchReport, SearchError> {
    let report = Decomposer::new(config)?.run(table, request, control)?;
    Ok(report)
}

/// Results closest to `target`, ties broken by fewer denominations, in
/// discovery order among equals.
pub fn best_by_distance(decompositions: &[Decomposition], target: u64) -> Vec<Decomposition> {
    let Some(best) = decompositions
        .iter()
        .map(|d| (d.distance(target), d.count))
        .min()
    else {
        return Vec::new();
    };
    decompositions
        .iter()
        .filter(|d| (d.distance(target), d.count) == best)
        .copied()
        .collect()
}
