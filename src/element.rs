//! The element module classifies a single table cell into the role it plays
//! in a row of training data.

use std::fmt;

/// Semantic role of a cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ElementKind {
    /// Category name, e.g. `ENGLISH` or `FEATURE_RATE`.
    Label,
    /// A page to download for the label.
    Url,
    /// Comma-separated terms describing the label.
    Keywords,
    /// Anything else, including empty cells.
    Text,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Label => "label",
            ElementKind::Url => "URL",
            ElementKind::Keywords => "block of keywords",
            ElementKind::Text => "text",
        };
        formatter.write_str(name)
    }
}

/// One classified cell of a table row.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Element {
    content: String,
    kind: ElementKind,
}

impl Element {
    /// Classifies the raw cell and keeps its cleaned content.
    ///
    /// The role is decided on the raw string, the stored content is the
    /// cleaned one.
    pub fn new(raw: &str) -> Self {
        Self {
            content: clean(raw),
            kind: categorize(raw),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }
}

/// Removes surrounding whitespace, unprintable characters and trailing commas.
pub fn clean(raw: &str) -> String {
    let printable: String = raw.trim().chars().filter(|c| is_printable(*c)).collect();
    printable.trim_end_matches(',').to_string()
}

/// Recognizes the role of a raw cell.
///
/// Rules are checked in order: empty, URL, label, keywords, text.
pub fn categorize(raw: &str) -> ElementKind {
    if raw.is_empty() {
        return ElementKind::Text;
    }

    if !raw.chars().any(char::is_whitespace) && raw.starts_with("http") {
        return ElementKind::Url;
    }

    if raw.chars().all(|c| c.is_ascii_uppercase() || c == '_') {
        return ElementKind::Label;
    }

    if raw.chars().all(is_keyword_char) && has_keyword_density(raw) {
        return ElementKind::Keywords;
    }

    ElementKind::Text
}

fn is_printable(c: char) -> bool {
    c.is_ascii_graphic() || matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

fn is_keyword_char(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '-' | ',' | ' ')
}

/// More than one comma for every three spaces.
fn has_keyword_density(raw: &str) -> bool {
    let commas = raw.matches(',').count();
    let spaces = raw.matches(' ').count();
    commas * 3 > spaces
}
