//! # tollgrid - vehicle/traffic tabular transformation toolkit
//!
//! A library of stateless transforms over in-memory tabular data from
//! vehicle/traffic datasets: count pivoting, categorical binning,
//! threshold filters, weekly time-coverage validation, distance-matrix
//! construction/decomposition, and toll-rate derivation.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐     ┌───────────┐     ┌────────────┐     ┌──────────────┐
//! │ CSV text │────▶│  Parser   │────▶│ Typed rows │────▶│  Transforms  │
//! │          │     │ (rows)    │     │  (models)  │     │ (pivot/toll) │
//! └──────────┘     └───────────┘     └────────────┘     └──────────────┘
//! ```
//!
//! Every transform is a pure function: one tabular input in, one tabular or
//! scalar output out. There is no shared runtime and no state between calls;
//! chains such as `calculate_distance_matrix` → `unroll_distance_matrix` →
//! `calculate_toll_rate` → `calculate_time_based_toll_rates` are composed by
//! the caller, each step consuming the previous output's schema.
//!
//! ## Quick Start
//!
//! ```rust
//! use tollgrid::models::EdgeRecord;
//! use tollgrid::transform::{calculate_distance_matrix, calculate_toll_rate};
//!
//! let edges = vec![
//!     EdgeRecord::new(1001, 1002, 5.0),
//!     EdgeRecord::new(1002, 1003, 10.0),
//! ];
//!
//! let matrix = calculate_distance_matrix(&edges);
//! assert!(matrix.is_symmetric(1e-10));
//!
//! let tolls = calculate_toll_rate(&edges);
//! assert_eq!(tolls[0].car, 5.0 * 1.2);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Typed row records
//! - [`matrix`] - Labeled dense matrix
//! - [`parser`] - CSV parsing with delimiter auto-detection
//! - [`transform`] - The transform functions

pub mod error;
pub mod matrix;
pub mod models;
pub mod parser;
pub mod transform;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, CsvResult, TransformError, TransformResult};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    decode_rows, CarBand, EdgeRecord, FromRow, SpanRecord, TimedTollRecord, TollRecord,
    VehicleRecord,
};

// =============================================================================
// Re-exports - Matrix
// =============================================================================

pub use matrix::LabeledMatrix;

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    csv_to_rows, detect_delimiter, parse_csv, parse_csv_file, parse_csv_str_auto, ParseResult,
};

// =============================================================================
// Re-exports - Transforms
// =============================================================================

pub use transform::{
    calculate_distance_matrix, calculate_time_based_toll_rates, calculate_toll_rate,
    filter_routes, find_ids_within_ten_percentage_threshold, generate_car_matrix,
    get_bus_indexes, get_type_count, multiply_matrix, time_check, unroll_distance_matrix,
};
