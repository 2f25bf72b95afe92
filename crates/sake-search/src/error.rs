//! Error type for callers that configure and run a search in one step.

use sake_core::{DecomposeError, ErrorKind};
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The search configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The request or table was rejected.
    #[error(transparent)]
    Decompose(#[from] DecomposeError),
}

impl SearchError {
    /// Classification of the failure; configuration errors are invalid
    /// arguments.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::Config(_) => ErrorKind::InvalidArgument,
            SearchError::Decompose(e) => e.kind(),
        }
    }
}
