use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use relgraph::config::{BookConfig, DEFAULT_INPUT, DEFAULT_OUTPUT};
use relgraph::identity::CollisionPolicy;
use relgraph::{inspect, loader, matrix, pipeline};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "relgraph")]
#[command(about = "Convert character spreadsheets into relationship graph JSON")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a character sheet (one row per character) into a book JSON file
    Convert(ConvertArgs),
    /// Convert an adjacency-matrix sheet into a book JSON file
    Matrix(MatrixArgs),
    /// Print headers, row count and the first rows of a character sheet
    Inspect(InspectArgs),
}

#[derive(Args)]
struct ConvertArgs {
    /// Character sheet (.csv, .xlsx, .xls, .ods)
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Output JSON file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// TOML file with book metadata, protagonist and column headers
    #[arg(long)]
    book: Option<PathBuf>,

    /// What to do when two characters share a name variant
    #[arg(long, value_enum, default_value_t = CollisionPolicy::KeepFirst)]
    on_name_collision: CollisionPolicy,

    /// Dry run - don't write the output file
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct MatrixArgs {
    /// Adjacency-matrix sheet
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Output JSON file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// TOML file with book metadata
    #[arg(long)]
    book: Option<PathBuf>,

    /// Dry run - don't write the output file
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct InspectArgs {
    /// Character sheet
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// TOML file with column headers
    #[arg(long)]
    book: Option<PathBuf>,

    /// Number of rows to print
    #[arg(long, default_value_t = 5)]
    rows: usize,
}

fn load_config(path: Option<&Path>) -> Result<BookConfig> {
    match path {
        Some(p) => BookConfig::load(p)
            .with_context(|| format!("Failed to load book file: {}", p.display())),
        None => Ok(BookConfig::default()),
    }
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    let config = load_config(args.book.as_deref())?;
    let start = Instant::now();

    let table = loader::load_table(&args.input)
        .with_context(|| format!("Failed to load sheet: {}", args.input.display()))?;
    let conversion = pipeline::convert(&table, &config, args.on_name_collision)
        .context("Failed to convert sheet")?;

    if args.dry_run {
        info!("Dry run, not writing {}", args.output.display());
    } else {
        pipeline::write_book(&conversion.book, &args.output)
            .with_context(|| format!("Failed to write: {}", args.output.display()))?;
    }

    let stats = &conversion.stats;
    println!();
    println!("=== Summary ===");
    println!("Time:               {:.2}s", start.elapsed().as_secs_f64());
    println!("Output:             {}", args.output.display());
    println!();
    println!("Rows loaded:        {}", stats.rows_loaded);
    println!("Characters:         {}", stats.nodes);
    println!("Relations:          {}", stats.edges());
    println!("  With protagonist: {}", stats.protagonist_edges);
    println!("  Between others:   {}", stats.cross_edges);
    println!("Unresolved rows:    {}", stats.unresolved_rows);
    println!("Duplicate ids:      {}", stats.duplicate_ids);
    println!("Name collisions:    {}", stats.name_collisions);

    Ok(())
}

fn run_matrix(args: MatrixArgs) -> Result<()> {
    let config = load_config(args.book.as_deref())?;

    let table = loader::load_table(&args.input)
        .with_context(|| format!("Failed to load sheet: {}", args.input.display()))?;
    let (book, stats) = matrix::convert_matrix(&table, &config.book);

    if !args.dry_run {
        pipeline::write_book(&book, &args.output)
            .with_context(|| format!("Failed to write: {}", args.output.display()))?;
    }

    println!();
    println!("=== Summary ===");
    println!("Characters:         {}", stats.characters);
    println!("Relations:          {}", stats.edges);
    println!("Skipped cells:      {}", stats.skipped_cells);
    for edge in book.edges.iter().take(10) {
        println!("  {} --[{}]--> {}", edge.source, edge.label, edge.target);
    }

    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let config = load_config(args.book.as_deref())?;
    let table = loader::load_table(&args.input)
        .with_context(|| format!("Failed to load sheet: {}", args.input.display()))?;

    let stdout = io::stdout();
    inspect::describe(&table, &config.columns, args.rows, &mut stdout.lock())?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let result = match cli.command {
        Commands::Convert(args) => run_convert(args),
        Commands::Matrix(args) => run_matrix(args),
        Commands::Inspect(args) => run_inspect(args),
    };

    match result {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
