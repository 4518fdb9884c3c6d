/// Name of the keyword summary file written into the output directory.
pub const KEYWORD_FILE_NAME: &str = "all_keywords.csv";

/// Extension of the per-page text files.
pub const PAGE_FILE_EXTENSION: &str = "txt";

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const DEFAULT_USER_AGENT: &str = concat!("trainset/", env!("CARGO_PKG_VERSION"));

/// Elements whose direct text children never reach the reader.
/// `document` stands for text hanging off the document root itself.
pub(crate) const HIDDEN_ELEMENTS: [&str; 6] = ["style", "script", "head", "title", "meta", "document"];
