//! Inlining Feature Extraction
//!
//! Reads Rust source and computes, per function, the structural metrics
//! that predict how much inlining that function will cost or save.
//!
//! # Features
//!
//! - Cyclomatic complexity (branches, loops, extra match arms)
//! - Parameter and local variable counts
//! - Body size in statements and in tokens
//! - Whether the return type is more than a primitive scalar
//! - Whether the function is generic (one copy per instantiation)
//! - How many call sites in the same file name it
//!
//! # Example
//!
//! ```rust
//! use inlinelab::analysis::extract_source;
//!
//! let rows = extract_source("demo.rs", r#"
//!     fn helper(a: i64) -> i64 { a + 1 }
//!     fn caller() -> i64 { helper(1) + helper(2) }
//! "#).unwrap();
//!
//! assert_eq!(rows[0].function_name, "helper");
//! assert_eq!(rows[0].call_site_count, 2);
//! ```

pub mod features;
pub mod parser;
pub mod report;

use std::path::{Path, PathBuf};
use thiserror::Error;

pub use features::{extract_functions, FunctionFeatures};
pub use parser::{parse_source, SourceFunction};
pub use report::{write_rows, OutputFormat, CSV_COLUMNS};

/// Errors that can occur during feature extraction.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: syn::Error,
    },

    #[error("No Rust sources found in {0}")]
    NoSources(String),
}

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Extract feature rows from one in-memory source file.
pub fn extract_source(file_name: &str, source: &str) -> AnalysisResult<Vec<FunctionFeatures>> {
    let functions = parse_source(source).map_err(|e| AnalysisError::Parse {
        file: file_name.to_string(),
        source: e,
    })?;
    Ok(extract_functions(file_name, &functions))
}

/// Extract feature rows from a file on disk.
///
/// The `file_name` column holds the path's final component.
pub fn extract_file(path: &Path) -> AnalysisResult<Vec<FunctionFeatures>> {
    let source = std::fs::read_to_string(path).map_err(|e| AnalysisError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    extract_source(&file_name, &source)
}

/// Expand inputs into a list of `.rs` files.
///
/// Files are taken as given; directories contribute their direct `.rs`
/// children in name order.
pub fn collect_sources(inputs: &[PathBuf]) -> AnalysisResult<Vec<PathBuf>> {
    let mut sources = Vec::new();

    for input in inputs {
        if !input.is_dir() {
            sources.push(input.clone());
            continue;
        }

        let io_err = |e: std::io::Error| AnalysisError::Io {
            path: input.display().to_string(),
            source: e,
        };
        let mut found = Vec::new();
        for entry in std::fs::read_dir(input).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "rs") {
                found.push(path);
            }
        }
        if found.is_empty() {
            return Err(AnalysisError::NoSources(input.display().to_string()));
        }
        found.sort();
        sources.extend(found);
    }

    Ok(sources)
}

/// Extract rows from every source reachable from `inputs`, in order.
pub fn extract_paths(inputs: &[PathBuf]) -> AnalysisResult<Vec<FunctionFeatures>> {
    let mut rows = Vec::new();
    for path in collect_sources(inputs)? {
        let file_rows = extract_file(&path)?;
        tracing::debug!(file = %path.display(), functions = file_rows.len(), "Extracted features");
        rows.extend(file_rows);
    }
    Ok(rows)
}
