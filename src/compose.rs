//! The compose module writes the training corpus: a keyword summary file and
//! one text file per URL of every label.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::constants::{KEYWORD_FILE_NAME, PAGE_FILE_EXTENSION};
use crate::error::PageError;
use crate::scrape::PageScraper;
use crate::table::TrainingData;

/// A URL that could not be turned into a page file, and why.
#[derive(Debug)]
pub struct FailedUrl {
    pub url: String,
    pub reason: PageError,
}

/// Outcome of a completed write pass.
#[derive(Debug, Default)]
pub struct WriteReport {
    /// Page files written, in processing order.
    pub written: Vec<PathBuf>,
    pub failures: Vec<FailedUrl>,
}

impl WriteReport {
    pub fn failed_urls(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|failure| failure.url.as_str())
    }
}

/// Writes collected training data into a target directory.
pub struct DataWriter {
    dir: PathBuf,
    urls: BTreeMap<String, BTreeSet<String>>,
    keywords: BTreeMap<String, BTreeSet<String>>,
    force_write: bool,
    scraper: PageScraper,
}

impl DataWriter {
    /// Creates a writer over its own copy of the training data.
    pub fn new(
        target_directory: impl Into<PathBuf>,
        data: TrainingData,
        scraper: PageScraper,
        force_write: bool,
    ) -> Self {
        Self {
            dir: target_directory.into(),
            urls: data.urls,
            keywords: data.keywords,
            force_write,
            scraper,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Runs the writer: directory, keyword summary, then every page.
    ///
    /// # Returns
    ///
    /// Returns a report of written files and of the URLs that failed.
    ///
    /// # Errors
    ///
    /// Returns an error if the target directory cannot be created or the
    /// keyword summary cannot be written, including when it already exists
    /// and writing is not forced. Failures of single pages never abort the run.
    pub async fn write(&self) -> Result<WriteReport> {
        self.create_dir_if_needed()?;
        self.write_keyword_file()?;
        let report = self.write_scraped_pages().await;

        info!("Write complete.");
        info!("{} Failed URLs:", report.failures.len());
        for url in report.failed_urls() {
            warn!("{url}");
        }

        Ok(report)
    }

    /// Makes sure there's a directory in which to store the training data.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory does not exist and cannot be created.
    pub fn create_dir_if_needed(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Unable to create directory {}", self.dir.display()))
    }

    /// Writes one line per label: the label followed by its keywords.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists and writing is not forced, or if
    /// the file cannot be written.
    pub fn write_keyword_file(&self) -> Result<()> {
        let keyword_file = self.dir.join(KEYWORD_FILE_NAME);
        check_overwrite(&keyword_file, self.force_write)?;

        let content: String = self
            .keywords
            .iter()
            .map(|(label, words)| format_keyword_line(label, words))
            .collect();

        fs::write(&keyword_file, content)
            .with_context(|| format!("Unable to write {}", keyword_file.display()))
    }

    /// Writes the scraped pages for every label, collecting failures.
    pub async fn write_scraped_pages(&self) -> WriteReport {
        let mut report = WriteReport::default();
        let label_count = self.urls.len();

        for (label_index, (label, urls)) in self.urls.iter().enumerate() {
            info!("Beginning label {}/{label_count}: {label}", label_index + 1);
            self.write_pages_for_label(label, urls, &mut report).await;
        }

        report
    }

    async fn write_pages_for_label(&self, label: &str, urls: &BTreeSet<String>, report: &mut WriteReport) {
        for (index, url) in urls.iter().enumerate() {
            let output_file = self.page_path(label, index + 1);
            match self.write_page_for_url(&output_file, url).await {
                Ok(()) => report.written.push(output_file),
                Err(reason) => {
                    warn!("Target URL {url} could not be read: {reason}");
                    report.failures.push(FailedUrl {
                        url: url.clone(),
                        reason,
                    });
                }
            }
        }
    }

    /// Path of the `index`-th (1-based) page file of a label.
    pub fn page_path(&self, label: &str, index: usize) -> PathBuf {
        self.dir.join(format!("{label}_{index}.{PAGE_FILE_EXTENSION}"))
    }

    /// Downloads the targeted page and saves it to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists and writing is not forced, if the
    /// page cannot be fetched or converted, or if the file cannot be written.
    pub async fn write_page_for_url(&self, output_file: &Path, url: &str) -> Result<(), PageError> {
        check_overwrite(output_file, self.force_write)?;
        let text = self.scraper.scrape(url).await?;
        fs::write(output_file, text).map_err(|source| PageError::Save {
            path: output_file.to_path_buf(),
            source,
        })
    }
}

/// Tests if a file exists, and if it does, whether it can be overwritten.
///
/// # Errors
///
/// Returns [`PageError::OverwriteConflict`] if the file exists and `force_write`
/// is not set.
pub fn check_overwrite(path: &Path, force_write: bool) -> Result<(), PageError> {
    if !path.exists() {
        info!("Writing to {}", path.display());
        return Ok(());
    }

    if force_write {
        warn!("Overwriting file {}.", path.display());
        Ok(())
    } else {
        Err(PageError::OverwriteConflict(path.to_path_buf()))
    }
}

fn format_keyword_line(label: &str, words: &BTreeSet<String>) -> String {
    let mut line = label.to_string();
    for word in words {
        line.push_str(", ");
        line.push_str(word);
    }
    line.push('\n');
    line
}
