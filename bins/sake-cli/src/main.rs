//! sake-cli — Command-line front end for standard-denomination decomposition.
//!
//! `decompose` enumerates decompositions of an amount over a denomination
//! table; `decode` turns a packed encoding back into denomination values.

mod table;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use sake_core::{Deadline, Decomposition, NeverStop, SearchControl, decode};
use sake_search::{
    Completion, DecompositionRequest, SearchConfig, SearchStats, best_by_distance, search,
};
use serde::Serialize;
use tracing::info;

use crate::table::TableArgs;

/// Decompose amounts into standard denominations.
#[derive(Parser)]
#[command(name = "sake-cli")]
#[command(version, about = "Decompose amounts into standard denominations")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    log_format: Format,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate decompositions of a target amount.
    Decompose(DecomposeArgs),
    /// Decode a packed decomposition into denomination values.
    Decode(DecodeArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Args)]
struct DecomposeArgs {
    /// Amount to decompose.
    #[arg(short, long)]
    target: u64,

    /// Stop a branch once the remaining amount drops below this value.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    tolerance: i64,

    /// Maximum number of denominations per decomposition (2 to 8).
    #[arg(short, long, default_value_t = 8)]
    max_count: usize,

    #[command(flatten)]
    table: TableArgs,

    /// Results produced by the search before it stops.
    #[arg(long, default_value_t = SearchConfig::default().search_cap)]
    search_cap: usize,

    /// Results returned at most.
    #[arg(long, default_value_t = SearchConfig::default().result_cap)]
    result_cap: usize,

    /// Search starting denominations in parallel.
    #[arg(long)]
    parallel: bool,

    /// Give up after this many milliseconds and print what was found.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Only print the results closest to the target.
    #[arg(long)]
    best: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Args)]
struct DecodeArgs {
    /// Packed encoding, decimal or 0x-prefixed hex.
    #[arg(short, long, value_parser = parse_encoding)]
    encoding: u64,

    /// Number of denominations in the decomposition.
    #[arg(short, long)]
    count: usize,

    /// Target the decomposition was searched for. The table is truncated the
    /// same way the search truncated it.
    #[arg(short, long)]
    target: Option<u64>,

    #[command(flatten)]
    table: TableArgs,
}

#[derive(Serialize)]
struct DecomposeOutput {
    target: u64,
    completion: Completion,
    stats: SearchStats,
    decompositions: Vec<DecompositionOutput>,
}

#[derive(Serialize)]
struct DecompositionOutput {
    #[serde(flatten)]
    decomposition: Decomposition,
    values: Vec<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format);

    match cli.command {
        Commands::Decompose(args) => run_decompose(args),
        Commands::Decode(args) => run_decode(args),
    }
}

fn run_decompose(args: DecomposeArgs) -> Result<()> {
    let table = args.table.load()?;
    let config = SearchConfig {
        search_cap: args.search_cap,
        result_cap: args.result_cap,
        parallel: args.parallel,
    };
    let request = DecompositionRequest::new(args.target, args.tolerance, args.max_count);

    let control: Box<dyn SearchControl> = match args.timeout_ms {
        Some(ms) => Box::new(Deadline::after(Duration::from_millis(ms))),
        None => Box::new(NeverStop),
    };
    let report =
        search(config, &table, request, control.as_ref()).context("Decomposition failed")?;

    info!(
        found = report.decompositions.len(),
        completion = ?report.completion,
        nodes_visited = report.stats.nodes_visited,
        "search complete"
    );

    let selected = if args.best {
        best_by_distance(&report.decompositions, args.target)
    } else {
        report.decompositions.clone()
    };
    let usable = &table.as_slice()[report.usable_offset..];
    let decompositions = selected
        .into_iter()
        .map(|decomposition| {
            let values = decomposition
                .values(usable)
                .context("Search returned an undecodable result")?;
            Ok(DecompositionOutput {
                decomposition,
                values,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    match args.format {
        Format::Json => {
            let output = DecomposeOutput {
                target: args.target,
                completion: report.completion,
                stats: report.stats,
                decompositions,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Format::Text => {
            for entry in &decompositions {
                println!("{}", format_entry(entry));
            }
            println!(
                "# {} result(s), {:?}, {} node(s) visited",
                decompositions.len(),
                report.completion,
                report.stats.nodes_visited
            );
        }
    }
    Ok(())
}

fn run_decode(args: DecodeArgs) -> Result<()> {
    let table = args.table.load()?;
    let usable = match args.target {
        Some(target) => table
            .usable_for(target)
            .context("Table does not fit the target")?
            .as_slice(),
        None => table.as_slice(),
    };
    let values = decode(args.encoding, args.count, usable).context("Failed to decode")?;
    println!("{}", join_values(&values));
    Ok(())
}

fn format_entry(entry: &DecompositionOutput) -> String {
    format!(
        "sum={} count={} encoding=0x{:016x} values={}",
        entry.decomposition.sum,
        entry.decomposition.count,
        entry.decomposition.encoding.raw(),
        join_values(&entry.values)
    )
}

fn join_values(values: &[u64]) -> String {
    values
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join("+")
}

fn parse_encoding(s: &str) -> Result<u64, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid encoding {s:?}: {e}"))
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// `RUST_LOG` takes precedence over `--log-level` when set.
fn init_logging(level_str: &str, format: Format) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    match format {
        Format::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        Format::Text => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use sake_core::PackedIndices;
    use sake_search::{ConfigError, SearchError};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_encoding_accepts_hex_and_decimal() {
        assert_eq!(parse_encoding("0x0102"), Ok(258));
        assert_eq!(parse_encoding("0X0102"), Ok(258));
        assert_eq!(parse_encoding("258"), Ok(258));
        assert!(parse_encoding("0xzz").is_err());
        assert!(parse_encoding("-1").is_err());
    }

    #[test]
    fn decompose_args_parse() {
        let cli = Cli::try_parse_from([
            "sake-cli",
            "decompose",
            "--target",
            "123",
            "--tolerance",
            "-2",
            "--max-count",
            "4",
            "--denoms",
            "100,50,20,10,5,2,1",
            "--format",
            "json",
        ])
        .unwrap();
        let Commands::Decompose(args) = cli.command else {
            panic!("expected decompose");
        };
        assert_eq!(args.target, 123);
        assert_eq!(args.tolerance, -2);
        assert_eq!(args.max_count, 4);
        assert_eq!(args.table.denoms, vec![100, 50, 20, 10, 5, 2, 1]);
        assert_eq!(args.format, Format::Json);
        assert_eq!(args.search_cap, 5_000);
    }

    #[test]
    fn zero_search_cap_is_a_config_error() {
        let cli = Cli::try_parse_from([
            "sake-cli",
            "decompose",
            "-t",
            "7",
            "-d",
            "5,2,1",
            "--search-cap",
            "0",
        ])
        .unwrap();
        let Commands::Decompose(args) = cli.command else {
            panic!("expected decompose");
        };
        let err = run_decompose(args).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SearchError>(),
            Some(&SearchError::Config(ConfigError::ZeroSearchCap))
        );
    }

    #[test]
    fn decode_args_parse_hex() {
        let cli = Cli::try_parse_from([
            "sake-cli", "decode", "-e", "0x0001", "-c", "2", "-t", "7", "-d", "10,5,2,1",
        ])
        .unwrap();
        let Commands::Decode(args) = cli.command else {
            panic!("expected decode");
        };
        assert_eq!(args.encoding, 1);
        assert_eq!(args.target, Some(7));
    }

    #[test]
    fn format_entry_shows_values() {
        let entry = DecompositionOutput {
            decomposition: Decomposition {
                sum: 7,
                count: 2,
                encoding: PackedIndices::EMPTY.push(0).push(1),
            },
            values: vec![5, 2],
        };
        assert_eq!(
            format_entry(&entry),
            "sum=7 count=2 encoding=0x0000000000000001 values=5+2"
        );
    }

    #[test]
    fn json_entry_is_flat() {
        let entry = DecompositionOutput {
            decomposition: Decomposition {
                sum: 7,
                count: 2,
                encoding: PackedIndices::from_raw(1),
            },
            values: vec![5, 2],
        };
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"sum":7,"count":2,"encoding":1,"values":[5,2]}"#
        );
    }
}
