//! Recommendation session: the loaded corpus and everything derived from it.

use std::{path::Path, sync::Arc};

use num::Float;
use parking_lot::RwLock;
use serde::Serialize;

use crate::{
    config::RecommenderConfig,
    document::{
        normalizer::{normalize, NormalizeReport},
        DocumentTable, RawTable,
    },
    error::{RecommendError, Result},
    loader::load_table,
    recommender::{Recommendation, Recommender},
    vectorizer::{evaluate::similarity::SimilarityMatrix, TFIDFVectorizer, TermWeightMatrix, Vocabulary},
};

/// Document table and the structures derived from it.
///
/// Built as one unit and never partially updated.
#[derive(Debug, Clone)]
pub struct LoadedIndex<N = f32>
where
    N: Float,
{
    pub table: DocumentTable,
    pub vocabulary: Vocabulary,
    pub weights: TermWeightMatrix<N>,
    pub similarity: SimilarityMatrix<N>,
}

/// Outcome of a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub documents: usize,
    pub vocabulary: usize,
    pub normalize: NormalizeReport,
}

impl<N> LoadedIndex<N>
where
    N: Float + Send + Sync,
{
    /// Normalize, vectorize and compute similarities.
    ///
    /// Fails with `EmptyCorpus` when normalization leaves no documents.
    pub fn build(raw: RawTable, config: &RecommenderConfig) -> Result<(Self, LoadSummary)> {
        let (table, report) = normalize(raw);
        if table.is_empty() {
            return Err(RecommendError::EmptyCorpus);
        }
        let model = TFIDFVectorizer::<N>::new(config.vectorizer.clone()).fit_transform(&table.summaries());
        let similarity = SimilarityMatrix::from_weights(&model.weights);
        let summary = LoadSummary {
            documents: table.len(),
            vocabulary: model.vocabulary.len(),
            normalize: report,
        };
        Ok((
            Self {
                table,
                vocabulary: model.vocabulary,
                weights: model.weights,
                similarity,
            },
            summary,
        ))
    }

    pub fn recommender(&self, top_k: usize) -> Recommender<'_, N> {
        Recommender::new(&self.table, &self.similarity, top_k)
    }
}

/// Session lifecycle
#[derive(Debug, Clone, Default)]
pub enum SessionState<N = f32>
where
    N: Float,
{
    #[default]
    Empty,
    Loaded(Box<LoadedIndex<N>>),
}

/// Single-owner session.
///
/// `Empty` until a load succeeds. A failed load leaves the previous state as it was.
#[derive(Debug, Clone)]
pub struct Session<N = f32>
where
    N: Float,
{
    config: RecommenderConfig,
    state: SessionState<N>,
}

impl<N> Session<N>
where
    N: Float + Send + Sync,
{
    pub fn new(config: RecommenderConfig) -> Self {
        Self {
            config,
            state: SessionState::Empty,
        }
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState<N> {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, SessionState::Loaded(_))
    }

    /// Loaded index, or `NotReady`.
    pub fn index(&self) -> Result<&LoadedIndex<N>> {
        match &self.state {
            SessionState::Loaded(index) => Ok(index.as_ref()),
            SessionState::Empty => Err(RecommendError::NotReady),
        }
    }

    /// Replace the session contents with a new corpus.
    pub fn load(&mut self, raw: RawTable) -> Result<LoadSummary> {
        let built = LoadedIndex::build(raw, &self.config);
        self.install(built)
    }

    /// Read a corpus file and load it.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadSummary> {
        let raw = load_table(path, &self.config)?;
        self.load(raw)
    }

    fn install(&mut self, built: Result<(LoadedIndex<N>, LoadSummary)>) -> Result<LoadSummary> {
        match built {
            Ok((index, summary)) => {
                self.state = SessionState::Loaded(Box::new(index));
                tracing::info!(
                    documents = summary.documents,
                    vocabulary = summary.vocabulary,
                    "corpus loaded"
                );
                Ok(summary)
            }
            Err(e) => {
                tracing::warn!(error = %e, loaded = self.is_loaded(), "corpus load failed; keeping previous state");
                Err(e)
            }
        }
    }

    pub fn recommend(&self, title: &str) -> Result<Vec<String>> {
        self.index()?.recommender(self.config.top_k).recommend(title)
    }

    pub fn recommend_scored(&self, title: &str) -> Result<Vec<Recommendation>> {
        self.index()?.recommender(self.config.top_k).recommend_scored(title)
    }
}

impl<N> Default for Session<N>
where
    N: Float + Send + Sync,
{
    fn default() -> Self {
        Self::new(RecommenderConfig::default())
    }
}

/// Session shared between threads.
///
/// Loads build the new index without holding the lock and take the write
/// lock only to swap it in. Queries hold the read lock while they rank, so
/// they never see a table paired with a matrix from another load.
#[derive(Debug, Clone)]
pub struct SharedSession<N = f32>
where
    N: Float,
{
    inner: Arc<RwLock<Session<N>>>,
}

impl<N> SharedSession<N>
where
    N: Float + Send + Sync,
{
    pub fn new(config: RecommenderConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Session::new(config))),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.read().is_loaded()
    }

    pub fn load(&self, raw: RawTable) -> Result<LoadSummary> {
        let config = self.inner.read().config().clone();
        let built = LoadedIndex::build(raw, &config);
        self.inner.write().install(built)
    }

    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<LoadSummary> {
        let config = self.inner.read().config().clone();
        let raw = load_table(path, &config)?;
        self.load(raw)
    }

    pub fn recommend(&self, title: &str) -> Result<Vec<String>> {
        self.inner.read().recommend(title)
    }

    pub fn recommend_scored(&self, title: &str) -> Result<Vec<Recommendation>> {
        self.inner.read().recommend_scored(title)
    }
}

impl<N> From<Session<N>> for SharedSession<N>
where
    N: Float,
{
    fn from(session: Session<N>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }
}
