//! Denomination table loading for the command line.
//!
//! A table comes from `--denoms` or from a JSON array file given by
//! `--table-file` / `SAKE_DENOMS_FILE`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use sake_core::DenominationTable;

/// Where to read the denomination table from.
#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// Denominations, descending and comma-separated (e.g. 100,50,20,10).
    #[arg(short, long, value_delimiter = ',')]
    pub denoms: Vec<u64>,

    /// JSON file holding a descending array of denominations. Ignored when
    /// `--denoms` is given.
    #[arg(long, env = "SAKE_DENOMS_FILE")]
    pub table_file: Option<PathBuf>,
}

impl TableArgs {
    pub fn load(&self) -> Result<DenominationTable> {
        if !self.denoms.is_empty() {
            return DenominationTable::new(self.denoms.clone())
                .context("Invalid --denoms table");
        }
        match &self.table_file {
            Some(path) => load_table_file(path),
            None => bail!("No denomination table: pass --denoms or --table-file"),
        }
    }
}

pub fn load_table_file(path: &Path) -> Result<DenominationTable> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read table file: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid denomination table in {}", path.display()))
}
