use indexmap::IndexMap;

use crate::vectorizer::token::TokenFrequency;

/// keep document count and per-term document frequency
///
/// Terms are kept in first-appearance order; `sorted_terms()` gives column order.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// number of documents added
    doc_num: u64,
    /// term -> number of documents containing it
    term_doc_counts: IndexMap<Box<str>, u64>,
}

impl Corpus {
    pub fn new() -> Self {
        Self {
            doc_num: 0,
            term_doc_counts: IndexMap::new(),
        }
    }

    /// Add a document's distinct terms to the corpus
    pub fn add_set<T>(&mut self, terms: &[T])
    where
        T: AsRef<str>,
    {
        self.doc_num += 1;
        for term in terms {
            *self
                .term_doc_counts
                .entry(term.as_ref().into())
                .or_insert(0) += 1;
        }
    }

    /// Add a whole document from its token frequency
    pub fn add_doc(&mut self, freq: &TokenFrequency) {
        self.add_set(&freq.token_set_ref_str());
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Get the number of documents containing `term`
    #[inline]
    pub fn get_term_count(&self, term: &str) -> u64 {
        self.term_doc_counts.get(term).copied().unwrap_or(0)
    }

    /// Get the current vocabulary size (number of unique terms)
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_doc_counts.len()
    }

    /// All terms, sorted, for assigning vocabulary columns
    pub fn sorted_terms(&self) -> Vec<Box<str>> {
        let mut terms: Vec<Box<str>> = self.term_doc_counts.keys().cloned().collect();
        terms.sort_unstable();
        terms
    }
}
