use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the data-loading boundary.
///
/// The analytics core itself never fails: empty input, zero durations and
/// missing grid sides all resolve to defined zero/empty values. Errors only
/// arise when reading season files from disk.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("IO error reading '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error in '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ChartError>;
