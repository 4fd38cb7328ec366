//! Error types for dataset loading, configuration, and routing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur outside the interactive core.
///
/// Unknown country names and missing store operations are deliberately not
/// represented here: those are absorbed where they happen.
#[derive(Debug, Error)]
pub enum MapError {
    /// Failed to read a file from disk.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file to disk.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input was not valid GeoJSON.
    #[error("invalid GeoJSON in {origin}: {source}")]
    GeoJson {
        origin: String,
        #[source]
        source: Box<geojson::Error>,
    },

    /// GeoJSON parsed but contained no usable country polygons.
    #[error("no country polygons found in {origin}")]
    EmptyDataset { origin: String },

    /// Remote dataset download failed.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Configuration file was not valid JSON for the settings schema.
    #[error("invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Route string could not be interpreted.
    #[error("unrecognised route '{0}'")]
    Route(String),

    /// Logging could not be initialised.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, MapError>;
