//! The table module reads a spreadsheet-exported CSV of training data and
//! collects the keywords and URLs of every label.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use log::{debug, info};

use crate::row::CleanedRow;

/// Keywords and URLs collected per label.
///
/// Ordered collections keep labels, URLs and keywords in lexicographic order,
/// so output file names are the same on every run.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct TrainingData {
    pub urls: BTreeMap<String, BTreeSet<String>>,
    pub keywords: BTreeMap<String, BTreeSet<String>>,
}

/// Reads a table of training data row by row, carrying the last seen label
/// forward onto rows that do not name one.
#[derive(Debug)]
pub struct TableReader {
    path: PathBuf,
    current_label: Option<String>,
    data: TrainingData,
}

impl TableReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            current_label: None,
            data: TrainingData::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Label carried onto the next row that has none of its own.
    pub fn current_label(&self) -> Option<&str> {
        self.current_label.as_deref()
    }

    pub fn data(&self) -> &TrainingData {
        &self.data
    }

    /// An independent copy of the collected data, unaffected by further reads.
    pub fn snapshot(&self) -> TrainingData {
        self.data.clone()
    }

    /// Reads every row of the CSV file at the reader's path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed as CSV, or if
    /// any row is malformed. The read stops at the first malformed row.
    pub fn read(&mut self) -> Result<()> {
        info!("Reading from {}", self.path.display());
        let file = std::fs::File::open(&self.path)
            .with_context(|| format!("Unable to open {}", self.path.display()))?;
        self.read_from(file)
            .with_context(|| format!("Unable to read training data from {}", self.path.display()))?;
        info!("Done with {}", self.path.display());
        Ok(())
    }

    /// Reads every row of CSV content from `source`.
    ///
    /// The content has no header row and rows may differ in length.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid CSV or a row is malformed.
    /// A malformed row can be recovered with
    /// `err.downcast_ref::<MalformedRow>()`.
    pub fn read_from<R: Read>(&mut self, source: R) -> Result<()> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(source);

        for (index, record) in reader.records().enumerate() {
            let line = index + 1;
            let record = record.with_context(|| format!("Unable to parse CSV row {line}"))?;
            let row = CleanedRow::from_cells(record.iter())
                .with_context(|| format!("Malformed row {line}"))?;
            self.process_row(row);
        }

        Ok(())
    }

    /// Copies a single row into the per-label URL and keyword sets.
    ///
    /// Rows without a label of their own inherit the current one. Rows that
    /// still have no label are ignored.
    pub fn process_row(&mut self, mut row: CleanedRow) {
        self.current_label = row
            .set_label(self.current_label.as_deref())
            .map(str::to_string);

        let Some(label) = self.current_label.as_ref() else {
            debug!("Skipping row without label: {:?}", row.elements());
            return;
        };

        if let Some(url) = row.url() {
            self.data
                .urls
                .entry(label.clone())
                .or_default()
                .insert(url.to_string());
        }

        if let Some(keywords) = row.keywords() {
            self.data
                .keywords
                .entry(label.clone())
                .or_default()
                .extend(split_keywords(keywords));
        }
    }
}

/// Splits a keyword block on commas, dropping surrounding whitespace and
/// empty entries.
pub fn split_keywords(block: &str) -> impl Iterator<Item = String> + '_ {
    block
        .split(',')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
}
