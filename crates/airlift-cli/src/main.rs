//! AIRLIFT CLI: filter, summarize and export the airport emissions dataset.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use airlift_core::config::DashboardConfig;
use airlift_core::selection::Constraint;
use airlift_exec::{
    CounterService, CounterStatus, Dashboard, HttpCounter, MapPanel, Session, SummaryPanel, View,
};
use airlift_io::{load_dataset, CsvWriter, JsonlWriter};
use airlift_operators::{apply_filters, filter_options, RankKey};
use airlift_query::{apply_config_overrides, parse_yaml_request, ParsedRequest};

#[derive(Parser)]
#[command(name = "airlift")]
#[command(about = "AIRLIFT: airport flight and LTO emissions explorer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Dataset and filter flags shared by every data command.
#[derive(Args, Clone, Debug, Default)]
struct SelectionArgs {
    /// CSV dataset (overrides AIRLIFT_DATA_PATH and the request file)
    #[arg(long)]
    data: Option<String>,

    /// YAML view request with filters, ranking and config overrides
    #[arg(short, long)]
    query: Option<PathBuf>,

    /// Country to keep; repeat for several, "All" for no constraint
    #[arg(long)]
    country: Vec<String>,

    /// Airport name to keep; repeatable
    #[arg(long)]
    airport: Vec<String>,

    /// Operation type to keep; repeatable
    #[arg(long = "operation-type")]
    operation_type: Vec<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Ndjson,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dashboard view for a selection
    View {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Ranking length (overrides AIRLIFT_TOP_N and the request file)
        #[arg(long)]
        top_n: Option<usize>,

        /// Ranking key: flights, fuel, nox, hc, co or pm25
        #[arg(long)]
        by: Option<String>,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List the choices each filter control offers for a selection
    Options {
        #[command(flatten)]
        selection: SelectionArgs,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Write the filtered rows to a file
    Export {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Destination file
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,
    },

    /// Check that a dataset loads and a request file parses
    Validate {
        #[arg(long)]
        data: Option<String>,

        #[arg(short, long)]
        query: Option<PathBuf>,
    },

    /// Record a visit and print the visit count
    Counter,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::View {
            selection,
            top_n,
            by,
            format,
        } => run_view(&selection, top_n, by.as_deref(), format),
        Commands::Options { selection, format } => run_options(&selection, format),
        Commands::Export {
            selection,
            output,
            format,
        } => run_export(&selection, &output, format),
        Commands::Validate { data, query } => run_validate(data, query),
        Commands::Counter => run_counter(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Config and selection after every layer has been applied.
struct Resolved {
    config: DashboardConfig,
    request: ParsedRequest,
}

/// defaults < environment < request file < flags.
fn resolve(args: &SelectionArgs) -> Result<Resolved, Box<dyn std::error::Error>> {
    let mut config = DashboardConfig::from_env();
    let request = match &args.query {
        Some(path) => parse_yaml_request(&fs::read_to_string(path)?)?,
        None => parse_yaml_request("")?,
    };
    if let Some(overrides) = &request.config {
        apply_config_overrides(&mut config, overrides)?;
    }
    let mut resolved = Resolved { config, request };
    apply_selection_flags(&mut resolved, args);
    resolved.config.validate()?;
    Ok(resolved)
}

fn apply_selection_flags(resolved: &mut Resolved, args: &SelectionArgs) {
    if let Some(data) = &args.data {
        resolved.config.data_path = data.clone();
    }
    let sel = &mut resolved.request.selection;
    if !args.country.is_empty() {
        sel.country = Constraint::from_values(&args.country);
    }
    if !args.airport.is_empty() {
        sel.airport = Constraint::from_values(&args.airport);
    }
    if !args.operation_type.is_empty() {
        sel.operation_type = Constraint::from_values(&args.operation_type);
    }
}

fn apply_rank_flags(
    resolved: &mut Resolved,
    top_n: Option<usize>,
    by: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(n) = top_n.or(resolved.request.top_n) {
        resolved.config.top_n = n;
    }
    if let Some(key) = by {
        resolved.request.rank_by = key.parse::<RankKey>()?;
    }
    Ok(())
}

fn run_view(
    args: &SelectionArgs,
    top_n: Option<usize>,
    by: Option<&str>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut resolved = resolve(args)?;
    apply_rank_flags(&mut resolved, top_n, by)?;

    let mut dashboard = Dashboard::open(resolved.config)?.with_rank_key(resolved.request.rank_by);
    let update = dashboard.on_filter_change(&resolved.request.selection)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&update.view)?),
        OutputFormat::Text => print_view(&update.view),
    }
    Ok(())
}

fn run_options(args: &SelectionArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let resolved = resolve(args)?;
    let dataset = load_dataset(&resolved.config.data_path)?;
    let options = filter_options(&dataset.records, &resolved.request.selection);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&options)?),
        OutputFormat::Text => {
            println!("Countries: {}", options.countries.join(", "));
            println!("Airports: {}", options.airports.join(", "));
            println!("Operation types: {}", options.operation_types.join(", "));
        }
    }
    Ok(())
}

fn run_export(
    args: &SelectionArgs,
    output: &Path,
    format: ExportFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let resolved = resolve(args)?;
    let dataset = load_dataset(&resolved.config.data_path)?;
    let rows = apply_filters(&dataset.records, &resolved.request.selection);

    let dest = output.to_string_lossy();
    let written = match format {
        ExportFormat::Ndjson => JsonlWriter::to_path(&dest, &dataset.schema)?.write_rows(rows)?,
        ExportFormat::Csv => CsvWriter::to_path(&dest, &dataset.schema)?.write_rows(rows)?,
    };
    tracing::info!(rows = written, path = %dest, "export finished");
    println!("✓ Exported {} rows to {}", written, dest);
    Ok(())
}

fn run_validate(
    data: Option<String>,
    query: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let args = SelectionArgs {
        data,
        query,
        ..Default::default()
    };
    let resolved = resolve(&args)?;
    let dataset = load_dataset(&resolved.config.data_path)?;
    let unmappable = dataset
        .records
        .iter()
        .filter(|r| r.coordinates().is_none())
        .count();

    println!("✓ Dataset is valid");
    println!("  Rows: {}", dataset.len());
    println!("  Variant: {:?}", dataset.schema.variant());
    println!("  Without coordinates: {}", unmappable);
    println!("  Digest: {}", dataset.digest.short());
    Ok(())
}

fn run_counter() -> Result<(), Box<dyn std::error::Error>> {
    let config = DashboardConfig::from_env();
    config.validate()?;
    let counter = match HttpCounter::from_config(&config) {
        Ok(c) => Some(c),
        Err(airlift_exec::CounterError::Unconfigured(_)) => None,
        Err(e) => return Err(e.into()),
    };

    let mut session = Session::new();
    match session.visit(counter.as_ref().map(|c| c as &dyn CounterService)) {
        CounterStatus::Count { visits } => println!("Total visits: {}", visits),
        CounterStatus::Unavailable { reason } => {
            println!("⚠️ Failed to retrieve visit counter: {}", reason)
        }
        CounterStatus::Unconfigured => {
            return Err("visit counter is not configured (set COUNTERAPI_KEY)".into())
        }
    }
    Ok(())
}

fn print_view(view: &View) {
    match &view.map {
        MapPanel::Ready {
            center,
            zoom,
            markers,
            ..
        } => println!(
            "Map: {} markers, center ({:.4}, {:.4}), zoom {}",
            markers.len(),
            center.lat,
            center.lon,
            zoom
        ),
        MapPanel::NoData { notice } => println!("Map: {}", notice),
        MapPanel::Unconfigured { reason } => println!("Map unavailable: {}", reason),
    }
    println!();

    match &view.summary {
        SummaryPanel::Table { table, .. } => {
            println!("Summary Statistics");
            for row in &table.rows {
                println!("  {:<36} {:>20}", row.label, row.display);
            }
        }
        SummaryPanel::NoData { notice } => println!("{}", notice),
    }
    println!();

    if !view.top.entries.is_empty() {
        println!("Top {} airports by {}", view.top.entries.len(), view.top.by);
        for e in &view.top.entries {
            let value = e
                .value
                .map(|v| airlift_operators::format_thousands(v.trunc() as u64))
                .unwrap_or_else(|| "-".into());
            println!(
                "  {:>3}. {:<40} {:<20} {:>16}",
                e.rank,
                e.airport,
                e.country.as_deref().unwrap_or("Unknown"),
                value
            );
        }
        println!();
    }

    println!("Data Partners");
    for p in &view.partners {
        println!("  {} ({})", p.name, p.url);
    }
}
