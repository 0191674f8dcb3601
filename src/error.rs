//! Error types for the calendar core and its collaborators.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable calendar configuration.
///
/// Always fatal at startup: no grid is rendered from a partially valid window.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown timezone identifier: {0}")]
    InvalidTimezone(String),

    #[error("Item count must be at least 1 (got {0})")]
    NonPositiveItemCount(i64),

    #[error("Item count {0} exceeds the 31 days a month can hold")]
    ItemCountTooLarge(u32),

    #[error("Start month must be between 1 and 12 (got {0})")]
    MonthOutOfRange(u32),

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Calendar fields that do not describe a real civil date/time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusError {
    #[error("Calendar fields do not form a valid date/time: {0}")]
    InvalidFields(String),
}

/// Errors raised while materializing tiles on a mount point.
#[derive(Debug, Error)]
pub enum PresentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the image embedder.
///
/// Missing or unsupported images are not errors; they are reported and skipped.
#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("Failed to read pages directory {path}: {source}")]
    PagesDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read page {path}: {source}")]
    ReadPage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write page {path}: {source}")]
    WritePage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to rewrite page {path}: {source}")]
    Rewrite {
        path: PathBuf,
        #[source]
        source: lol_html::errors::RewritingError,
    },
}
