//! Sold-object CSV loading.
//!
//! Columns are read by position: `id, living_area, price, lat, lon`. The
//! header row is skipped and rows without living area are dropped.

use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Read};
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use heatmap_common::GeoSample;
use thiserror::Error;
use tracing::{debug, warn};

const COLUMNS: [&str; 5] = ["id", "living_area", "price", "lat", "lon"];
const LIVING_AREA: usize = 1;
const PRICE: usize = 2;
const LAT: usize = 3;
const LON: usize = 4;

/// Errors that can occur while loading price data.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Could not open file {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line}: missing column '{column}'")]
    MissingColumn { line: u64, column: &'static str },

    #[error("Line {line}: invalid {column} value '{value}'")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("Either specify a data file via the -d flag or pipe it to the application")]
    NoInput,
}

pub type Result<T> = std::result::Result<T, LoaderError>;

/// Read samples from any CSV source.
pub fn load_samples<R: Read>(source: R) -> Result<Vec<GeoSample>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut samples = Vec::new();
    let mut skipped = 0usize;

    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let field = |idx: usize| -> Result<f64> {
            let column = COLUMNS[idx];
            let raw = record
                .get(idx)
                .ok_or(LoaderError::MissingColumn { line, column })?;
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| LoaderError::InvalidNumber {
                    line,
                    column,
                    value: raw.to_string(),
                })
        };

        let living_area = field(LIVING_AREA)?;
        let price = field(PRICE)?;
        let lat = field(LAT)?;
        let lon = field(LON)?;

        if living_area <= 0.0 {
            skipped += 1;
            continue;
        }

        samples.push(GeoSample::new(lon, lat, price / living_area));
    }

    if skipped > 0 {
        warn!(skipped, "Dropped rows without living area");
    }
    debug!(loaded = samples.len(), "Parsed price rows");

    Ok(samples)
}

/// Read samples from a file on disk.
pub fn load_samples_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<GeoSample>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoaderError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    load_samples(BufReader::new(file))
}

/// Read samples from `path`, or from stdin when no path is given and
/// stdin is not a terminal.
pub fn load_input(path: Option<&Path>) -> Result<Vec<GeoSample>> {
    match path {
        Some(path) => load_samples_from_path(path),
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                return Err(LoaderError::NoInput);
            }
            load_samples(stdin.lock())
        }
    }
}
