//! Error types shared by the data layer, the dashboard session and the config loader.

use thiserror::Error;

/// Failure while turning a raw CSV payload into a [`Dataset`](crate::data::dataset::Dataset).
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("header row has no columns")]
    EmptyHeader,
    #[error("line {line}: expected {expected} cells, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("column `{column}` has {found} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("duplicate column name `{0}`")]
    DuplicateColumn(String),
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while accessing a [`DatasetStore`](crate::data::store::DatasetStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no dataset registered under `{0}`")]
    MissingKey(String),
    #[error("dataset `{0}` is already registered")]
    DuplicateKey(String),
}

/// Failure while building a trace, an overlay or a whole figure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FigureError {
    #[error("column `{0}` not found in dataset")]
    MissingColumn(String),
    #[error("unknown trace style `{0}`")]
    UnknownTraceStyle(String),
    #[error("unknown overlay `{0}`")]
    UnknownOverlay(String),
    #[error("overlay `{overlay}` needs a reference dataset")]
    MissingReferenceDataset { overlay: String },
    #[error("dataset has no rows")]
    EmptyDataset,
    #[error("overlay `{overlay}` has no complete rows to fit")]
    InsufficientData { overlay: String },
}

/// Failure while ingesting a file into the session stores.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure while loading or saving a [`DashboardConfig`](crate::config::DashboardConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
