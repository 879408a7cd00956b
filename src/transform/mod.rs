//! Tabular transforms over vehicle/traffic datasets.
//!
//! Two independent families:
//!
//! - [`vehicle`] and [`coverage`] - count pivoting, binning, threshold
//!   filters, and weekly time-coverage validation
//! - [`distance`] and [`toll`] - distance-matrix construction/decomposition
//!   and toll-rate derivation
//!
//! Every function is a pure transform from one in-memory table to another
//! table or scalar mapping; none keeps state between calls.

pub mod coverage;
pub mod distance;
pub mod toll;
pub mod vehicle;

pub use coverage::time_check;
pub use distance::{
    calculate_distance_matrix, find_ids_within_ten_percentage_threshold, unroll_distance_matrix,
};
pub use toll::{calculate_time_based_toll_rates, calculate_toll_rate};
pub use vehicle::{
    filter_routes, generate_car_matrix, get_bus_indexes, get_type_count, multiply_matrix,
};
