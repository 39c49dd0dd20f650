//! Top-k ranking of similar documents for a query title.

use num::Float;
use serde::Serialize;

use crate::{
    document::DocumentTable,
    error::{RecommendError, Result},
    vectorizer::evaluate::{scoring::Hits, similarity::SimilarityMatrix},
};

/// A recommended title with its cosine score against the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub score: f64,
}

/// Read-only view over a loaded table and its similarity matrix.
///
/// The two must come from the same load: row `i` of the matrix belongs to
/// document `i` of the table.
#[derive(Debug, Clone, Copy)]
pub struct Recommender<'a, N>
where
    N: Float,
{
    table: &'a DocumentTable,
    similarity: &'a SimilarityMatrix<N>,
    top_k: usize,
}

impl<'a, N> Recommender<'a, N>
where
    N: Float + Send + Sync,
{
    pub fn new(table: &'a DocumentTable, similarity: &'a SimilarityMatrix<N>, top_k: usize) -> Self {
        debug_assert_eq!(table.len(), similarity.dim());
        Self {
            table,
            similarity,
            top_k,
        }
    }

    /// Titles of the `top_k` documents most similar to `title`.
    pub fn recommend(&self, title: &str) -> Result<Vec<String>> {
        Ok(self
            .recommend_scored(title)?
            .into_iter()
            .map(|r| r.title)
            .collect())
    }

    /// Same ranking as `recommend`, keeping the scores.
    ///
    /// Ranking is by descending score; ties keep table order. The query is the
    /// first row whose title equals `title`, and only that row is removed, so
    /// an identical duplicate or a later row with the same title is still returned.
    pub fn recommend_scored(&self, title: &str) -> Result<Vec<Recommendation>> {
        let not_found = || RecommendError::NotFound {
            title: title.to_string(),
        };
        let query = self.table.position_of_title(title).ok_or_else(not_found)?;
        let row = self.similarity.row(query).ok_or_else(not_found)?;

        let mut hits = Hits::new(
            row.iter()
                .enumerate()
                .map(|(idx, score)| (idx, score.to_f64().unwrap_or(f64::NAN)))
                .collect(),
        );
        hits.sort_by_score()
            .exclude(|idx| *idx == query)
            .truncate(self.top_k);

        tracing::debug!(query = title, row = query, hits = ?hits, "ranked recommendations");

        Ok(hits
            .list
            .into_iter()
            .filter_map(|(idx, score)| {
                self.table.get(idx).map(|doc| Recommendation {
                    title: doc.title.clone(),
                    score,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{document::Document, vectorizer::TFIDFVectorizer};

    fn build(docs: &[(&str, &str)]) -> (DocumentTable, SimilarityMatrix<f64>) {
        let table = DocumentTable::new(docs.iter().map(|(t, s)| Document::new(*t, *s)).collect());
        let model = TFIDFVectorizer::<f64>::default().fit_transform(&table.summaries());
        let sim = SimilarityMatrix::from_weights(&model.weights);
        (table, sim)
    }

    #[test]
    fn ranks_shared_vocabulary_first_and_excludes_query() {
        let (table, sim) = build(&[
            ("A", "a fast car racing story"),
            ("B", "a slow car racing story"),
            ("C", "space opera with aliens"),
        ]);
        let rec = Recommender::new(&table, &sim, 5);
        assert_eq!(rec.recommend("A").unwrap(), vec!["B", "C"]);
    }

    #[test]
    fn duplicate_summary_is_kept_while_query_row_is_dropped() {
        let (table, sim) = build(&[
            ("A", "car racing story"),
            ("A2", "car racing story"),
            ("C", "space opera"),
        ]);
        let rec = Recommender::new(&table, &sim, 5);
        let scored = rec.recommend_scored("A2").unwrap();
        assert_eq!(scored[0].title, "A");
        assert!((scored[0].score - 1.0).abs() < 1e-9);
        assert!(scored.iter().all(|r| r.title != "A2"));
    }

    #[test]
    fn same_title_later_row_is_still_recommended() {
        let (table, sim) = build(&[
            ("A", "car racing story"),
            ("A", "car racing tale"),
            ("B", "space opera"),
        ]);
        let rec = Recommender::new(&table, &sim, 5);
        // 最初の "A" (行 0) がクエリ、行 1 の "A" は候補に残る
        assert_eq!(rec.recommend("A").unwrap(), vec!["A", "B"]);
        let scored = rec.recommend_scored("A").unwrap();
        assert!(scored[0].score > 0.0 && scored[0].score < 1.0);
        assert_eq!(scored[1].score, 0.0);
    }

    #[test]
    fn ties_follow_table_order() {
        let (table, sim) = build(&[
            ("Q", "alpha"),
            ("X", "beta"),
            ("Y", "gamma"),
            ("Z", "delta"),
        ]);
        let rec = Recommender::new(&table, &sim, 5);
        assert_eq!(rec.recommend("Q").unwrap(), vec!["X", "Y", "Z"]);
    }

    #[test]
    fn at_most_top_k() {
        let docs: Vec<(String, String)> = (0..10)
            .map(|i| (format!("T{i}"), format!("shared words plus unique{i}")))
            .collect();
        let refs: Vec<(&str, &str)> = docs.iter().map(|(t, s)| (t.as_str(), s.as_str())).collect();
        let (table, sim) = build(&refs);
        assert_eq!(Recommender::new(&table, &sim, 5).recommend("T3").unwrap().len(), 5);
        assert_eq!(Recommender::new(&table, &sim, 2).recommend("T3").unwrap().len(), 2);
    }

    #[test]
    fn unknown_title_is_not_found() {
        let (table, sim) = build(&[("A", "car"), ("B", "boat")]);
        let err = Recommender::new(&table, &sim, 5).recommend("NoSuchTitle").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn empty_table_is_not_found() {
        let (table, sim) = build(&[]);
        let err = Recommender::new(&table, &sim, 5).recommend("A").unwrap_err();
        assert!(err.is_not_found());
    }
}
