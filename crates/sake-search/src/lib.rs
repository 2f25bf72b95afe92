//! # sake-search
//!
//! Enumerates decompositions of a target amount into standard denominations.
//!
//! # Modules
//!
//! - [`config`] — `SearchConfig` caps and execution mode
//! - [`engine`] — explicit-stack depth-first search with pruning
//! - [`decomposer`] — validation, orchestration, parallel fan-out
//! - [`error`] — `SearchError` for configure-and-run callers

pub mod config;
pub mod decomposer;
pub mod engine;
pub mod error;

pub use config::{ConfigError, SearchConfig};
pub use decomposer::{
    Completion, Decomposer, DecompositionRequest, SearchReport, SearchStats, best_by_distance,
    decompose, search,
};
pub use engine::{SearchEngine, StopReason};
pub use error::SearchError;
