mod logging;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::info;

use mise_generate::{Engine, EngineOptions, GenerateError, restaurant_profile};
use mise_schema::{create_index_sql, create_table_sql, insertion_order, restaurant_catalog};
use mise_sqlite::{SinkError, SinkOptions, SqliteSink};

#[derive(Debug, Error)]
enum CliError {
    #[error("generation error: {0}")]
    Generate(#[from] GenerateError),
    #[error("sink error: {0}")]
    Sink(#[from] SinkError),
    #[error("schema error: {0}")]
    Schema(#[from] mise_schema::Error),
    #[error("invalid row override: {0}")]
    InvalidRows(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "mise-seed", version, about = "Restaurant sample database seeder")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Populate a SQLite database file with referentially consistent sample data.
    Seed(SeedArgs),
    /// Print the schema and index DDL without touching a database.
    Ddl,
}

#[derive(Args, Debug)]
struct SeedArgs {
    /// Database file to create or replace.
    #[arg(long, default_value = "restaurant_management.db")]
    db: PathBuf,
    /// RNG seed for reproducible runs; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Per-table row override, e.g. `--rows Customers=200` (repeatable).
    #[arg(long = "rows", value_name = "TABLE=N")]
    rows: Vec<String>,
    /// Write the run report as JSON to this path.
    #[arg(long)]
    report: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Seed(args) => run_seed(args).await,
        Command::Ddl => print_ddl(),
    }
}

async fn run_seed(args: SeedArgs) -> Result<(), CliError> {
    let catalog = restaurant_catalog();
    let mut profile = restaurant_profile();

    for raw in &args.rows {
        let (table, rows) = parse_rows_override(raw)?;
        if !profile.set_rows(&table, rows) {
            return Err(CliError::InvalidRows(format!("unknown table '{table}'")));
        }
    }

    let engine = Engine::new(EngineOptions {
        seed: args.seed,
        ..EngineOptions::default()
    });
    let population = engine.run(&catalog, &profile)?;

    let sink = SqliteSink::connect(&SinkOptions::new(&args.db)).await?;
    sink.apply_schema(&catalog).await?;
    let summary = sink.load(&catalog, &population).await?;
    sink.create_indexes(&catalog).await?;

    if let Some(path) = &args.report {
        std::fs::write(path, serde_json::to_vec_pretty(&population.report)?)?;
    }

    info!(
        db = %args.db.display(),
        rows = summary.rows_inserted,
        seed = population.report.seed,
        "database seeded"
    );
    Ok(())
}

fn print_ddl() -> Result<(), CliError> {
    let catalog = restaurant_catalog();
    let graph = insertion_order(&catalog)?;

    for name in &graph.order {
        let table = catalog
            .table(name)
            .ok_or_else(|| mise_schema::Error::UnknownTable(name.clone()))?;
        println!("{};\n", create_table_sql(table));
    }
    for index in &catalog.indexes {
        println!("{};", create_index_sql(index));
    }
    Ok(())
}

fn parse_rows_override(raw: &str) -> Result<(String, u64), CliError> {
    let (table, rows) = raw
        .split_once('=')
        .ok_or_else(|| CliError::InvalidRows(format!("expected TABLE=N, got '{raw}'")))?;
    let rows = rows
        .trim()
        .parse::<u64>()
        .map_err(|_| CliError::InvalidRows(format!("invalid row count in '{raw}'")))?;
    Ok((table.trim().to_string(), rows))
}
