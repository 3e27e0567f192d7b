//! Demonstration Driver
//!
//! Runs every fixture with its reference inputs and narrates the results
//! through `tracing`. The fixtures themselves never log; all narration
//! happens here.

use crate::config::LabConfig;
use inlinelab_fixtures::{
    branched_accumulate, call_chain, grid_accumulate, mean, population_variance_with,
    scale_value, standalone_function, Scalable,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Everything computed by one [`run`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverReport {
    pub branch: BranchOutcome,
    pub chain: ChainOutcome,
    pub variance: VarianceOutcome,
    pub grid: GridOutcome,
    pub scaled: Vec<ScaleOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchOutcome {
    pub x: i64,
    pub y: i64,
    pub result: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainOutcome {
    pub first: i64,
    pub second: i64,
    pub chained: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarianceOutcome {
    pub samples: usize,
    pub mean: f64,
    pub variance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridOutcome {
    pub rows: usize,
    pub cols: usize,
    pub total: i64,
}

/// One scaler instantiation, widened to `f64` for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleOutcome {
    pub type_name: String,
    pub original: f64,
    pub processed: f64,
    pub is_large: bool,
}

/// Run all demonstrations in order and collect their results.
pub fn run(config: &LabConfig) -> DriverReport {
    info!("Starting application...");

    let branch = run_branch(config.branch.x, config.branch.y);
    let chain = run_chain();
    let variance = run_variance(&config.moments.samples);
    let grid = run_grid(config);

    let scaled = vec![
        run_scale(config.scaler.int_value),
        run_scale(config.scaler.double_value),
        run_scale(config.scaler.float_value),
        run_scale(config.scaler.short_value),
    ];
    info!("{}", standalone_function());

    info!("Application finished.");

    DriverReport {
        branch,
        chain,
        variance,
        grid,
        scaled,
    }
}

pub fn run_branch(x: i64, y: i64) -> BranchOutcome {
    let result = branched_accumulate(x, y);
    info!(x, y, result, "Branched accumulation");
    BranchOutcome { x, y, result }
}

pub fn run_chain() -> ChainOutcome {
    info!("Calling utility...");
    let chain = call_chain();
    debug!(first = chain.first, second = chain.second, "Intermediate results");
    info!("Result: {}", chain.chained);
    ChainOutcome {
        first: chain.first,
        second: chain.second,
        chained: chain.chained,
    }
}

pub fn run_variance(samples: &[f64]) -> VarianceOutcome {
    let variance = population_variance_with(samples, |val| {
        info!("Processing value: {}", val);
    });
    let sample_mean = mean(samples);
    info!(samples = samples.len(), mean = sample_mean, variance, "Population variance");
    VarianceOutcome {
        samples: samples.len(),
        mean: sample_mean,
        variance,
    }
}

pub fn run_grid(config: &LabConfig) -> GridOutcome {
    let bounds = config.grid_bounds();
    let total = grid_accumulate(bounds);
    info!(rows = bounds.rows, cols = bounds.cols, total, "Grid accumulation");
    GridOutcome {
        rows: bounds.rows,
        cols: bounds.cols,
        total,
    }
}

pub fn run_scale<T: Scalable>(value: T) -> ScaleOutcome {
    let scaled = scale_value(value);
    info!(
        ty = T::TYPE_NAME,
        "Original: {}, Processed: {}", scaled.original, scaled.processed
    );
    if scaled.is_large() {
        info!("Result is large!");
    }
    ScaleOutcome {
        type_name: T::TYPE_NAME.to_string(),
        original: scaled.original.to_real(),
        processed: scaled.processed.to_real(),
        is_large: scaled.is_large(),
    }
}
