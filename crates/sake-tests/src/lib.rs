//! Property and scenario test suite for Sake.
//!
//! Integration tests in `tests/` check the decomposition invariants across
//! `sake-core` and `sake-search` under randomized tables and parameters.

pub mod helpers;
