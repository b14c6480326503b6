use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use famtree_stats::normalize::normalize_rows_with_progress;
use famtree_stats::utils::{create_main_progress_bar, hidden_progress_bar};
use famtree_stats::{
    BinningConfig, ColumnConfig, SourceConfig, StatsError, aggregate, aggregate_parallel,
    generate_summary, open_source,
};
use log::{error, info};

#[derive(Parser, Debug)]
#[command(name = "famtree-stats")]
#[command(about = "Demographic statistics per period from a genealogy export")]
#[command(version)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Person export to read (`.parquet` files are read as Parquet, anything else as CSV)
    path: PathBuf,

    /// First year of the bucketed range
    #[arg(requires = "year_to")]
    year_from: Option<i32>,

    /// Last year of the bucketed range
    year_to: Option<i32>,

    /// Bucket width in years (omit or 0 for one bucket over the whole range)
    interval: Option<i32>,

    /// Bucket every year from 1 to 3000 in windows of this many years
    #[arg(long, value_name = "YEARS", conflicts_with = "year_from")]
    every: Option<i32>,

    /// JSON file overriding the source column names
    #[arg(long, value_name = "PATH")]
    columns: Option<PathBuf>,

    /// Field separator of CSV exports
    #[arg(long, default_value_t = ';')]
    delimiter: char,

    /// Print the statistics as JSON
    #[arg(long)]
    json: bool,

    /// Aggregate on all CPU cores
    #[arg(long)]
    parallel: bool,

    /// Hide the progress bar
    #[arg(long, short = 'q')]
    quiet: bool,
}

impl Cli {
    fn binning(&self) -> BinningConfig {
        match (self.every, self.year_from, self.year_to) {
            (Some(interval), _, _) => BinningConfig::by_interval(interval),
            (None, Some(from), Some(to)) => BinningConfig::new(from, to, self.interval.unwrap_or(0)),
            _ => BinningConfig::disabled(),
        }
    }

    fn source_config(&self) -> Result<SourceConfig, StatsError> {
        if !self.delimiter.is_ascii() {
            return Err(StatsError::config(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )));
        }
        Ok(SourceConfig {
            delimiter: self.delimiter as u8,
            ..SourceConfig::default()
        })
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let columns = match &cli.columns {
        Some(path) => ColumnConfig::from_json_file(path)
            .with_context(|| format!("failed to load column mapping {}", path.display()))?,
        None => ColumnConfig::default(),
    };
    let binning = cli.binning();

    let source = open_source(&cli.path, cli.source_config()?);
    let rows = source
        .read_rows()
        .with_context(|| format!("failed to read {}", source.describe()))?;

    let progress = if cli.quiet {
        hidden_progress_bar()
    } else {
        create_main_progress_bar(rows.len() as u64, Some("Normalizing rows"))
    };
    let records = normalize_rows_with_progress(&rows, &columns, Some(&progress));
    progress.finish_and_clear();

    info!("Aggregating {} records with {}", records.len(), binning);
    let stats = if cli.parallel {
        aggregate_parallel(&records, binning)?
    } else {
        aggregate(&records, binning)?
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", generate_summary(&stats));
    }
    Ok(())
}

fn main() -> ExitCode {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
