//! Error types shared by the table reader, the scraper and the writer.

use std::path::PathBuf;

use thiserror::Error;

use crate::element::ElementKind;

/// A source row holds more than one cell of a role that must be unique.
///
/// Aborts the whole read: a row like this cannot be attributed safely.
#[derive(Debug, Error)]
#[error("Cannot have more than one {kind} per row. Found {count} in {cells:?}")]
pub struct MalformedRow {
    pub kind: ElementKind,
    pub count: usize,
    pub cells: Vec<String>,
}

/// Retrieval of a page failed before any content could be converted.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Target URL {url} has moved: {status}")]
    Moved { url: String, status: u16 },

    #[error("Target URL {url} cannot be read as specified: {status}")]
    ClientRequest { url: String, status: u16 },

    #[error("Target URL {url} had an internal error: {status}")]
    Server { url: String, status: u16 },

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Downloaded content could not be turned into plain text.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Unable to extract text from PDF: {0}")]
    Pdf(#[from] lopdf::Error),
}

/// Everything that can go wrong while producing a single page file.
///
/// The writer records these per URL and carries on with the next one.
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("File {} already exists", .0.display())]
    OverwriteConflict(PathBuf),

    #[error("Unable to save {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
