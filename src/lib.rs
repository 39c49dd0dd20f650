//! This crate is a content-based book recommender built on a TF-IDF Vectorizer.
pub mod config;
pub mod document;
pub mod error;
pub mod loader;
pub mod recommender;
pub mod session;
pub mod utils;
pub mod vectorizer;

/// Recommendation Session
/// The top-level struct of this crate.
/// It owns one loaded corpus together with everything derived from it:
/// - The normalized document table
/// - The vocabulary
/// - The L2-normalized TF-IDF matrix
/// - The pairwise cosine similarity matrix
///
/// A load either replaces all four or nothing.
/// Queries before the first successful load fail with `NotReady`.
///
/// `Session<N>` is generic over the weight type `N` (f32 by default).
/// Use `SharedSession` to share one session between threads.
pub use session::{LoadSummary, LoadedIndex, Session, SessionState, SharedSession};

/// Recommender
/// Ranks every other document by similarity to a query title and returns
/// the top-k titles. Ties keep document table order.
pub use recommender::{Recommendation, Recommender};

/// TF-IDF Vectorizer
/// Converts summaries into sparse, L2-normalized TF-IDF vectors over a
/// vocabulary whose columns are in sorted term order.
pub use vectorizer::TFIDFVectorizer;

pub use config::{RecommenderConfig, StopWords, VectorizerConfig};
pub use document::{normalizer::normalize, Document, DocumentTable, RawDocument, RawTable};
pub use error::{RecommendError, Result};
pub use vectorizer::evaluate::similarity::SimilarityMatrix;
