//! Document records before and after normalization.

pub mod normalizer;

use serde::{Deserialize, Serialize};

/// One row as read from a corpus source. Empty cells are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawDocument {
    pub title: Option<String>,
    pub summary: Option<String>,
}

impl RawDocument {
    pub fn new<T, S>(title: Option<T>, summary: Option<S>) -> Self
    where
        T: Into<String>,
        S: Into<String>,
    {
        Self {
            title: title.map(Into::into),
            summary: summary.map(Into::into),
        }
    }
}

/// Rows in source order.
pub type RawTable = Vec<RawDocument>;

/// A cleaned corpus entry: both fields present and non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub summary: String,
}

impl Document {
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
        }
    }
}

/// Ordered sequence of documents.
///
/// Row position is the index used by the term-weight and similarity matrices,
/// so the table is never reordered once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentTable {
    docs: Vec<Document>,
}

impl DocumentTable {
    pub fn new(docs: Vec<Document>) -> Self {
        Self { docs }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Document> {
        self.docs.get(index)
    }

    /// Row of the first document whose title equals `title` exactly.
    pub fn position_of_title(&self, title: &str) -> Option<usize> {
        self.docs.iter().position(|d| d.title == title)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.docs.iter()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> + '_ {
        self.docs.iter().map(|d| d.title.as_str())
    }

    pub fn summaries(&self) -> Vec<&str> {
        self.docs.iter().map(|d| d.summary.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a DocumentTable {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.docs.iter()
    }
}
