//! Dense matrix multiplication benchmarking.
//!
//! Four strategies compute the same product (unblocked and 2x2
//! register-blocked tiled, each sequential and row-partitioned parallel) and
//! a harness times repeated trials of each. The driver binary generates
//! random inputs, runs all four, and appends the mean durations to an
//! append-only CSV.

pub mod benchmarking;
pub mod error;
pub mod generate;
pub mod matrix;
pub mod partition;
pub mod report;
pub mod strategies;

pub use error::{MatmultError, Result};
pub use matrix::{Matrix, Scalar};
pub use strategies::{MultiplyOpts, Strategy};
