//! Inlinelab Fixtures - Rust Source
//!
//! Small numeric and control-flow functions used as subjects for studying
//! compiler behavior: function-call overhead, the impact of inlining, and
//! the cost of generic instantiation.
//!
//! # Design Philosophy
//!
//! 1. **Pure computation** - Every fixture is a deterministic function of its inputs
//! 2. **No narration** - Fixtures return values (or accept an observer); callers decide what to log
//! 3. **Visible call boundaries** - Functions are `#[inline(never)]` unless the point is inlining
//!
//! # Fixtures
//!
//! - [`scalar_transform`] - bounded-growth transform, clamped at zero
//! - [`branched_accumulate`] - loop-or-fallback accumulator
//! - [`call_chain`] - three chained calls to [`scalar_transform`]
//! - [`process_data_grid`] / [`grid_accumulate`] - row-major grid sum of `i*j + 1`
//! - [`population_variance`] - one-pass population variance
//! - [`scale_value`] - generic `(v * 2) / 1.5` over every [`Scalable`] type

pub mod grid;
pub mod moments;
pub mod scalar;
pub mod scale;

// Re-export commonly used functions
pub use grid::*;
pub use moments::*;
pub use scalar::*;
pub use scale::*;
