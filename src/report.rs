use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::strategies::Strategy;

/// One timing result as handed to the reporter.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchRecord {
    /// Caller-chosen run key (historically the compiler optimisation level).
    pub label: String,
    pub dimension: usize,
    pub strategy: Strategy,
    pub mean_ms: f64,
}

/// Append-only sink in the `label:dimension:variant:duration` line format.
///
/// Durations are written as whole milliseconds; the downstream plotting
/// script parses the field as an integer.
#[derive(Debug, Clone)]
pub struct CsvReporter {
    path: PathBuf,
}

impl CsvReporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvReporter { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &BenchRecord) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line(record))
    }
}

fn line(record: &BenchRecord) -> String {
    format!(
        "{}:{}:{}:{}",
        record.label,
        record.dimension,
        record.strategy.csv_tag(),
        record.mean_ms.round() as u64
    )
}
