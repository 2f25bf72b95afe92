//! Depth-first decomposition search.
//!
//! The search tree has one root per starting index of the usable view. A node
//! picks one denomination; its children pick denominations at or after its own
//! index, so every path is a non-increasing sequence of values.
//!
//! Visiting a node appends its index to the packed accumulator and adds its
//! value to the running sum. The node is terminal, and emits exactly one
//! result, when no picks are left or the remaining amount is below the
//! tolerance. Otherwise its children start at the first denomination that does
//! not exceed the remaining amount and continue while
//! `budget * denomination >= remaining - tolerance`, i.e. while the remaining
//! picks could still reach the target. A non-terminal node without surviving
//! children emits nothing.
//!
//! When a result hits the target exactly, the rest of the subtree below the
//! root's current child is skipped and the root moves on to its next child.
//!
//! The traversal uses an explicit stack of [`Frame`]s, at most `max_count`
//! deep, and allocates nothing per candidate.

use sake_core::{Decomposition, PackedIndices, SearchControl, UsableDenominations};

/// Why [`SearchEngine::search_from`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The subtree was fully enumerated.
    Exhausted,
    /// The output reached the cap.
    CapReached,
    /// The control asked to stop.
    Cancelled,
}

/// An expanded, non-terminal node.
#[derive(Debug, Clone, Copy)]
struct Frame {
    acc: PackedIndices,
    sum: u64,
    remaining: i128,
    /// Picks still allowed below this node.
    budget: usize,
    /// Next child index to try.
    cursor: usize,
}

enum Visit {
    Emitted(Decomposition),
    Expanded(Frame),
}

/// Search state for one validated request. Cheap to create; one engine per
/// worker in parallel mode.
#[derive(Debug)]
pub struct SearchEngine<'a> {
    denoms: UsableDenominations<'a>,
    target: u64,
    tolerance: i128,
    max_count: usize,
    stack: Vec<Frame>,
    nodes_visited: u64,
}

impl<'a> SearchEngine<'a> {
    /// `max_count` must already be validated to lie in `[2, 8]`.
    pub fn new(
        denoms: UsableDenominations<'a>,
        target: u64,
        tolerance: i64,
        max_count: usize,
    ) -> Self {
        Self {
            denoms,
            target,
            tolerance: i128::from(tolerance),
            max_count,
            stack: Vec::with_capacity(max_count),
            nodes_visited: 0,
        }
    }

    pub fn nodes_visited(&self) -> u64 {
        self.nodes_visited
    }

    /// Enumerate every starting index in order, appending to `out` until it
    /// holds `cap` results.
    pub fn search_all<C: SearchControl + ?Sized>(
        &mut self,
        cap: usize,
        out: &mut Vec<Decomposition>,
        control: &C,
    ) -> StopReason {
        for start in 0..self.denoms.len() {
            match self.search_from(start, cap, out, control) {
                StopReason::Exhausted => continue,
                stop => return stop,
            }
        }
        StopReason::Exhausted
    }

    /// Enumerate the tree rooted at `start`, appending to `out` until it holds
    /// `cap` results. `start` must index into the usable view.
    pub fn search_from<C: SearchControl + ?Sized>(
        &mut self,
        start: usize,
        cap: usize,
        out: &mut Vec<Decomposition>,
        control: &C,
    ) -> StopReason {
        if out.len() >= cap {
            return StopReason::CapReached;
        }
        if control.should_stop() {
            return StopReason::Cancelled;
        }

        self.stack.clear();
        match self.visit(start, PackedIndices::EMPTY, 0, self.max_count - 1) {
            Visit::Emitted(found) => {
                out.push(found);
                return if out.len() >= cap {
                    StopReason::CapReached
                } else {
                    StopReason::Exhausted
                };
            }
            Visit::Expanded(frame) => self.stack.push(frame),
        }

        while let Some(top) = self.stack.last_mut() {
            if control.should_stop() {
                return StopReason::Cancelled;
            }

            let child = top.cursor;
            let reachable = self.denoms.get(child).is_some_and(|&d| {
                top.budget as i128 * i128::from(d) >= top.remaining - self.tolerance
            });
            if !reachable {
                self.stack.pop();
                continue;
            }
            top.cursor += 1;

            let Frame {
                acc, sum, budget, ..
            } = *top;
            match self.visit(child, acc, sum, budget - 1) {
                Visit::Expanded(frame) => self.stack.push(frame),
                Visit::Emitted(found) => {
                    out.push(found);
                    if out.len() >= cap {
                        return StopReason::CapReached;
                    }
                    if found.sum == self.target {
                        self.stack.truncate(1);
                    }
                }
            }
        }
        StopReason::Exhausted
    }

    fn visit(&mut self, index: usize, acc: PackedIndices, sum: u64, budget: usize) -> Visit {
        self.nodes_visited += 1;

        // The usable view holds at most 255 entries, so the index fits a byte.
        let acc = acc.push(index as u8);
        // Children never exceed the remaining amount, so sums stay <= target.
        let sum = sum + self.denoms[index];
        let remaining = i128::from(self.target) - i128::from(sum);

        if budget == 0 || remaining < self.tolerance {
            return Visit::Emitted(Decomposition {
                sum,
                count: self.max_count - budget,
                encoding: acc,
            });
        }

        Visit::Expanded(Frame {
            acc,
            sum,
            remaining,
            budget,
            cursor: self.denoms.first_at_most(remaining, index),
        })
    }
}
