//! The row module groups the classified cells of one source row and resolves
//! which label the row belongs to.

use crate::element::{Element, ElementKind};
use crate::error::MalformedRow;

/// Roles that may appear at most once per row, in the order they are checked.
const UNIQUE_KINDS: [ElementKind; 3] = [ElementKind::Url, ElementKind::Label, ElementKind::Keywords];

/// A validated row of classified cells.
#[derive(Clone, Debug)]
pub struct CleanedRow {
    elements: Vec<Element>,
    label: Option<String>,
}

impl CleanedRow {
    /// Builds a row, rejecting it when a URL, label or keyword block repeats.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedRow`] naming the first repeated role and how many
    /// times it was found.
    pub fn new(elements: Vec<Element>) -> Result<Self, MalformedRow> {
        let row = Self {
            elements,
            label: None,
        };

        for kind in UNIQUE_KINDS {
            let count = row.count(kind);
            if count > 1 {
                return Err(MalformedRow {
                    kind,
                    count,
                    cells: row.elements.iter().map(|e| e.content().to_string()).collect(),
                });
            }
        }

        Ok(row)
    }

    /// Classifies raw cells and builds a row out of them.
    ///
    /// # Errors
    ///
    /// Same as [`CleanedRow::new`].
    pub fn from_cells<I, S>(cells: I) -> Result<Self, MalformedRow>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(cells.into_iter().map(|cell| Element::new(cell.as_ref())).collect())
    }

    /// Number of elements of the given role.
    pub fn count(&self, kind: ElementKind) -> usize {
        self.elements.iter().filter(|e| e.kind() == kind).count()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    fn first_of(&self, kind: ElementKind) -> Option<&str> {
        self.elements
            .iter()
            .find(|e| e.kind() == kind)
            .map(Element::content)
    }

    /// The label written on this row, ignoring earlier rows.
    pub fn own_label(&self) -> Option<&str> {
        self.first_of(ElementKind::Label)
    }

    pub fn url(&self) -> Option<&str> {
        self.first_of(ElementKind::Url)
    }

    pub fn keywords(&self) -> Option<&str> {
        self.first_of(ElementKind::Keywords)
    }

    /// The label resolved by [`CleanedRow::set_label`], if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Resolves the row label, falling back to the label carried from earlier rows.
    ///
    /// A label on the row itself always wins over `default_label`.
    pub fn set_label(&mut self, default_label: Option<&str>) -> Option<&str> {
        self.label = self.own_label().or(default_label).map(str::to_string);
        self.label.as_deref()
    }
}
