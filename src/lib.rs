//! The trainset library turns a spreadsheet-exported table of labels, keywords
//! and URLs into a labeled training corpus: one keyword summary file plus one
//! plain-text file per referenced web page.

pub mod compose;
pub mod constants;
pub mod element;
pub mod error;
pub mod parse;
pub mod row;
pub mod scrape;
pub mod table;

/// Enum representing how downloaded content is turned into text.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ContentKind {
    /// Extract the text of every page of a PDF document.
    Pdf,
    /// Strip markup and keep visible text.
    ///
    /// `assumed` is set when the content type was not recognized at all and
    /// markup stripping is only a guess.
    Html { assumed: bool },
    /// Keep the body as it is.
    PlainText,
}

impl ContentKind {
    /// Chooses the conversion from a `Content-Type` header value.
    ///
    /// Matching is a case-insensitive substring check: `pdf` first, then
    /// `html`, then `text`. Anything else is assumed to be HTML. A missing
    /// header counts as `text/html`.
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(content_type) = content_type else {
            return Self::Html { assumed: false };
        };
        let content_type = content_type.to_lowercase();

        if content_type.contains("pdf") {
            Self::Pdf
        } else if content_type.contains("html") {
            Self::Html { assumed: false }
        } else if content_type.contains("text") {
            Self::PlainText
        } else {
            Self::Html { assumed: true }
        }
    }
}

pub use compose::{DataWriter, FailedUrl, WriteReport};
pub use element::{Element, ElementKind};
pub use error::{ConversionError, FetchError, MalformedRow, PageError};
pub use row::CleanedRow;
pub use scrape::{FetcherConfig, PageScraper};
pub use table::{TableReader, TrainingData};
