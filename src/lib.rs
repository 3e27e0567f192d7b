//! Inlinelab - Fixtures and Features for Inlining Studies
//!
//! A small laboratory for studying how compilers treat function calls:
//! call overhead, inlining impact, and generic instantiation.
//!
//! # Features
//!
//! - **Fixtures**: pure numeric and control-flow functions with visible call
//!   boundaries (re-exported from `inlinelab-fixtures`)
//! - **Feature extraction**: per-function structural metrics read from Rust
//!   source with `syn`
//! - **Driver**: runs each fixture with its reference inputs and narrates
//!   through `tracing`
//! - **Configuration**: `inlinelab.toml` overrides for grid bounds and inputs
//!
//! # Example
//!
//! ```rust
//! use inlinelab::{branched_accumulate, process_data_grid, population_variance, scale_value};
//!
//! assert_eq!(branched_accumulate(5, 10), 26);
//! assert_eq!(process_data_grid(), 396_050_000);
//! assert!((population_variance(&[1.1, 2.2, 3.3, 4.4, 5.5]) - 2.42).abs() < 1e-9);
//! assert_eq!(scale_value(10_i32).processed, 13);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────┐     ┌──────────────┐
//! │ inlinelab.toml │────▶│    Driver    │──▶ tracing
//! └────────────────┘     └──────┬───────┘
//!                               │
//!                               ▼
//!                       ┌──────────────┐
//!                       │   Fixtures   │  #[inline(never)] subjects
//!                       └──────────────┘
//!                               ▲
//!                               │ source
//!                       ┌──────────────┐
//!                       │   Analysis   │──▶ CSV / JSON lines
//!                       └──────────────┘
//! ```

#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod driver;

// Re-export the fixtures under study
pub use inlinelab_fixtures::{
    branched_accumulate, call_chain, checked_branched_accumulate, checked_scalar_transform,
    grid_accumulate, grid_accumulate_with, grid_closed_form, increment, increment_inline, mean,
    population_variance, population_variance_with, process_data_grid, scalar_transform,
    scale_value, standalone_function, CallChain, GridBounds, Scalable, Scaled, DEFAULT_GRID_SIDE,
};

pub use analysis::{
    extract_file, extract_paths, extract_source, AnalysisError, AnalysisResult, FunctionFeatures,
    OutputFormat,
};
pub use config::{ConfigError, ConfigResult, LabConfig};
pub use driver::{run, DriverReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports_agree() {
        assert_eq!(
            Some(grid_accumulate(GridBounds::default())),
            grid_closed_form(GridBounds::default())
        );
        assert_eq!(call_chain().chained, scalar_transform(21 + 41));
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
