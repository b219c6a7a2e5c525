use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatmultError {
    #[error("invalid matrix shape {rows}x{cols}: dimensions must be positive")]
    Dimension { rows: usize, cols: usize },
    #[error("dimension mismatch: [{m}x{k}] @ [{k2}x{n}] -> [{out_rows}x{out_cols}]")]
    DimensionMismatch {
        m: usize,
        k: usize,
        k2: usize,
        n: usize,
        out_rows: usize,
        out_cols: usize,
    },
    #[error("invalid {name}: {value} (must be positive)")]
    Configuration { name: &'static str, value: usize },
    #[error("empty sample range: min must be strictly below max")]
    SampleRange,
    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),
}

pub type Result<T> = std::result::Result<T, MatmultError>;
