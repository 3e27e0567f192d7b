//! Inlinelab - Fixtures and Features for Inlining Studies
//!
//! Main CLI entry point for running the fixtures, timing call overhead, and
//! extracting per-function inlining features.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use inlinelab::analysis::{self, OutputFormat};
use inlinelab::config::{LabConfig, CONFIG_FILE_NAME};
use inlinelab::driver;
use inlinelab::{
    checked_branched_accumulate, grid_accumulate_with, increment, increment_inline, scale_value,
    GridBounds, Scalable,
};
use std::fs;
use std::hint::black_box;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "inlinelab")]
#[command(version)]
#[command(about = "Fixtures and feature extraction for inlining studies", long_about = None)]
struct Cli {
    /// Config file (default: search for inlinelab.toml from the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    // Commands sorted alphabetically for easier navigation
    /// Time the grid pass with never-inlined vs always-inlined helpers
    Bench {
        /// Number of grid passes per helper
        #[arg(short, long, default_value = "100")]
        iterations: usize,

        /// Grid rows (default: from config)
        #[arg(long)]
        rows: Option<usize>,

        /// Grid columns (default: from config)
        #[arg(long)]
        cols: Option<usize>,
    },

    /// Run the branched accumulator
    Branch {
        /// First input
        #[arg(allow_hyphen_values = true)]
        x: i64,

        /// Second input
        #[arg(allow_hyphen_values = true)]
        y: i64,
    },

    /// Show or write configuration
    Config {
        /// Show the config file in use
        #[arg(long)]
        path: bool,

        /// Write a default config file to the given path
        #[arg(long, value_name = "FILE")]
        init: Option<PathBuf>,
    },

    /// Extract per-function inlining features from Rust sources
    Features {
        /// Source files or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output format (default: from config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (default: from config, else stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the grid accumulator
    Grid {
        /// Grid rows (default: from config)
        #[arg(long)]
        rows: Option<usize>,

        /// Grid columns (default: from config)
        #[arg(long)]
        cols: Option<usize>,

        /// Use the always-inlined cell helper
        #[arg(long)]
        inline: bool,
    },

    /// Run every demonstration with its reference inputs
    Run {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply the generic scaler at one numeric type
    Scale {
        /// Numeric type to instantiate
        #[arg(short, long, value_enum, default_value = "i32")]
        ty: ScaleType,

        /// Value to scale
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Population variance of the given values
    Variance {
        /// Values (default: samples from config)
        #[arg(allow_hyphen_values = true)]
        values: Vec<f64>,
    },
}

/// Numeric types the scaler is instantiated with from the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScaleType {
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Bench {
            iterations,
            rows,
            cols,
        } => cmd_bench(&config, iterations, rows, cols),
        Commands::Branch { x, y } => cmd_branch(x, y),
        Commands::Config { path, init } => cmd_config(cli.config.as_deref(), &config, path, init),
        Commands::Features {
            inputs,
            format,
            output,
        } => cmd_features(&config, &inputs, format, output),
        Commands::Grid { rows, cols, inline } => cmd_grid(&config, rows, cols, inline),
        Commands::Run { json } => cmd_run(&config, json),
        Commands::Scale { ty, value } => cmd_scale(ty, &value),
        Commands::Variance { values } => cmd_variance(&config, &values),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Logs go to stderr so stdout carries only results
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal())
                .with_target(false),
        )
        .with(env_filter)
        .init();
}

fn load_config(explicit: Option<&Path>) -> Result<LabConfig> {
    match explicit {
        Some(path) => LabConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => LabConfig::load_from_cwd().context("Failed to load config"),
    }
}

fn bounds_from(
    config: &LabConfig,
    rows: Option<usize>,
    cols: Option<usize>,
) -> Result<GridBounds> {
    let base = config.grid_bounds();
    let bounds = GridBounds::new(rows.unwrap_or(base.rows), cols.unwrap_or(base.cols));
    if !bounds.fits() {
        bail!(
            "{}x{} grid is too large: its total overflows i64",
            bounds.rows,
            bounds.cols
        );
    }
    Ok(bounds)
}

fn cmd_bench(
    config: &LabConfig,
    iterations: usize,
    rows: Option<usize>,
    cols: Option<usize>,
) -> Result<()> {
    if iterations == 0 {
        bail!("iterations must be at least 1");
    }
    let bounds = bounds_from(config, rows, cols)?;
    let cells = bounds.cells().context("Grid cell count overflows usize")?;

    println!("Call Overhead Benchmark");
    println!("=======================");
    println!(
        "Grid: {}x{} ({} cells), iterations: {}\n",
        bounds.rows, bounds.cols, cells, iterations
    );

    let never = time_grid(bounds, iterations, increment);
    let always = time_grid(bounds, iterations, increment_inline);

    println!("  never-inlined helper:  {:>10.1} ns/pass", never);
    println!("  always-inlined helper: {:>10.1} ns/pass", always);
    if always > 0.0 {
        println!("  ratio:                 {:>10.2}x", never / always);
    }

    Ok(())
}

/// Mean nanoseconds per grid pass.
fn time_grid<F>(bounds: GridBounds, iterations: usize, cell: F) -> f64
where
    F: Fn(i64) -> i64 + Copy,
{
    // Warm up
    black_box(grid_accumulate_with(bounds, cell));

    let start = Instant::now();
    for _ in 0..iterations {
        black_box(grid_accumulate_with(black_box(bounds), cell));
    }
    start.elapsed().as_nanos() as f64 / iterations as f64
}

fn cmd_branch(x: i64, y: i64) -> Result<()> {
    if checked_branched_accumulate(x, y).is_none() {
        bail!("branch({}, {}) overflows i64", x, y);
    }
    let outcome = driver::run_branch(x, y);
    println!("{}", outcome.result);
    Ok(())
}

fn cmd_config(
    explicit: Option<&Path>,
    config: &LabConfig,
    show_path: bool,
    init: Option<PathBuf>,
) -> Result<()> {
    if let Some(target) = init {
        if target.exists() {
            bail!("{} already exists", target.display());
        }
        LabConfig::default()
            .save(&target)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        println!("Wrote default config to {}", target.display());
        return Ok(());
    }

    if show_path {
        let found = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => LabConfig::find(&std::env::current_dir()?),
        };
        match found {
            Some(path) => println!("{}", path.display()),
            None => println!("(no {} found, using defaults)", CONFIG_FILE_NAME),
        }
        return Ok(());
    }

    let rendered = toml::to_string_pretty(config).context("Failed to render config")?;
    print!("{}", rendered);
    Ok(())
}

fn cmd_features(
    config: &LabConfig,
    inputs: &[PathBuf],
    format: Option<OutputFormat>,
    output: Option<PathBuf>,
) -> Result<()> {
    let format = format.unwrap_or(config.features.format);
    let output = output.or_else(|| config.features.output.as_ref().map(PathBuf::from));

    let rows = analysis::extract_paths(inputs).context("Feature extraction failed")?;
    tracing::info!(functions = rows.len(), "Extracted features");

    match output {
        Some(path) => {
            let mut file = fs::File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            analysis::write_rows(&rows, format, &mut file).context("Failed to write features")?;
            tracing::info!(path = %path.display(), "Features saved");
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            analysis::write_rows(&rows, format, &mut out).context("Failed to write features")?;
            out.flush()?;
        }
    }

    Ok(())
}

fn cmd_grid(
    config: &LabConfig,
    rows: Option<usize>,
    cols: Option<usize>,
    inline: bool,
) -> Result<()> {
    let bounds = bounds_from(config, rows, cols)?;
    let total = if inline {
        grid_accumulate_with(bounds, increment_inline)
    } else {
        grid_accumulate_with(bounds, increment)
    };
    tracing::debug!(rows = bounds.rows, cols = bounds.cols, inline, "Grid pass complete");
    println!("{}", total);
    Ok(())
}

fn cmd_run(config: &LabConfig, json: bool) -> Result<()> {
    let report = driver::run(config);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    }
    Ok(())
}

fn cmd_scale(ty: ScaleType, value: &str) -> Result<()> {
    match ty {
        ScaleType::I8 => print_scaled(parse_value::<i8>(value)?),
        ScaleType::I16 => print_scaled(parse_value::<i16>(value)?),
        ScaleType::I32 => print_scaled(parse_value::<i32>(value)?),
        ScaleType::I64 => print_scaled(parse_value::<i64>(value)?),
        ScaleType::F32 => print_scaled(parse_value::<f32>(value)?),
        ScaleType::F64 => print_scaled(parse_value::<f64>(value)?),
    }
    Ok(())
}

fn parse_value<T>(value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse::<T>()
        .with_context(|| format!("Invalid value for this type: {}", value))
}

fn print_scaled<T: Scalable>(value: T) {
    let scaled = scale_value(value);
    println!("{}", scaled.processed);
    if scaled.is_large() {
        tracing::info!(ty = T::TYPE_NAME, "Result is large!");
    }
}

fn cmd_variance(config: &LabConfig, values: &[f64]) -> Result<()> {
    let values = if values.is_empty() {
        &config.moments.samples[..]
    } else {
        values
    };
    let outcome = driver::run_variance(values);
    println!("{}", outcome.variance);
    Ok(())
}
