pub mod corpus;
pub mod evaluate;
pub mod stop_words;
pub mod tfidf;
pub mod token;

use std::marker::PhantomData;

use indexmap::IndexSet;
use num::Float;
use rayon::prelude::*;

use crate::{
    config::VectorizerConfig,
    utils::math::vector::ZeroSpVec,
    vectorizer::{
        corpus::Corpus,
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
        token::TokenFrequency,
    },
};

/// 語彙
/// term -> 列位置 の対応を持つ
/// 列位置は `from_terms` に渡された順
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    terms: IndexSet<Box<str>>,
}

impl Vocabulary {
    pub fn from_terms(terms: Vec<Box<str>>) -> Self {
        Self {
            terms: terms.into_iter().collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    #[inline]
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get_index(index).map(|t| &**t)
    }

    /// 列順に term を返す
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.terms.iter().map(|t| &**t)
    }
}

/// 文書ごとの L2 正規化済み TF-IDF 行
/// 行 i は入力の i 番目の文書に対応する
#[derive(Debug, Clone)]
pub struct TermWeightMatrix<N>
where
    N: Float,
{
    rows: Vec<ZeroSpVec<N>>,
    n_cols: usize,
}

impl<N> TermWeightMatrix<N>
where
    N: Float,
{
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    #[inline]
    pub fn row(&self, index: usize) -> Option<&ZeroSpVec<N>> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[ZeroSpVec<N>] {
        &self.rows
    }
}

/// fit の結果
#[derive(Debug, Clone)]
pub struct FittedModel<N>
where
    N: Float,
{
    pub vocabulary: Vocabulary,
    /// 語彙の列順に並んだ IDF
    pub idf: Vec<N>,
    pub weights: TermWeightMatrix<N>,
}

/// TF-IDF Vectorizer
///
/// 文書集合から語彙と IDF を学習し、各文書を疎な TF-IDF 行に変換する。
///
/// - `N`: 重みの数値型 (f32, f64)
/// - `E`: TF-IDF 計算エンジン
///
/// 同じ入力と設定からは常に同じ語彙と行列ができる。
#[derive(Debug, Clone)]
pub struct TFIDFVectorizer<N = f32, E = DefaultTFIDFEngine>
where
    N: Float + Send + Sync,
    E: TFIDFEngine<N>,
{
    config: VectorizerConfig,
    _marker: PhantomData<(N, E)>,
}

impl<N, E> TFIDFVectorizer<N, E>
where
    N: Float + Send + Sync,
    E: TFIDFEngine<N>,
{
    pub fn new(config: VectorizerConfig) -> Self {
        Self {
            config,
            _marker: PhantomData,
        }
    }

    /// 文書集合から語彙と TF-IDF 行列を作る
    pub fn fit_transform<S>(&self, docs: &[S]) -> FittedModel<N>
    where
        S: AsRef<str> + Sync,
    {
        let config = &self.config;
        // tokenize は文書ごとに独立なので並列
        let freqs: Vec<TokenFrequency> = docs
            .par_iter()
            .map(|doc| TokenFrequency::from_text(doc.as_ref(), config))
            .collect();

        let mut corpus = Corpus::new();
        for freq in &freqs {
            corpus.add_doc(freq);
        }
        let vocabulary = Vocabulary::from_terms(corpus.sorted_terms());
        let idf = E::idf_vec(&corpus, &vocabulary);

        let rows: Vec<ZeroSpVec<N>> = freqs
            .par_iter()
            .map(|freq| {
                let mut row = E::tf_vec(freq, &vocabulary);
                row.map_values(|col, tf| tf * idf[col]);
                row.normalize_l2();
                row.shrink_to_fit();
                row
            })
            .collect();

        tracing::debug!(
            documents = rows.len(),
            vocabulary = vocabulary.len(),
            "fitted tf-idf model"
        );

        FittedModel {
            weights: TermWeightMatrix {
                rows,
                n_cols: vocabulary.len(),
            },
            vocabulary,
            idf,
        }
    }
}

impl<N, E> Default for TFIDFVectorizer<N, E>
where
    N: Float + Send + Sync,
    E: TFIDFEngine<N>,
{
    fn default() -> Self {
        Self::new(VectorizerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_is_sorted() {
        let model = TFIDFVectorizer::<f64>::default()
            .fit_transform(&["zebra apple", "mango apple"]);
        let terms: Vec<&str> = model.vocabulary.iter().collect();
        assert_eq!(terms, vec!["apple", "mango", "zebra"]);
        assert_eq!(model.vocabulary.index_of("mango"), Some(1));
        assert_eq!(model.vocabulary.term(2), Some("zebra"));
    }

    #[test]
    fn rows_are_unit_length() {
        let model = TFIDFVectorizer::<f64>::default()
            .fit_transform(&["car racing story", "space alien story", "car car speed"]);
        assert_eq!(model.weights.n_rows(), 3);
        for row in model.weights.rows() {
            assert!((row.norm_l2() - 1.0).abs() < 1e-9);
            assert_eq!(row.len(), model.vocabulary.len());
        }
    }

    #[test]
    fn stop_word_only_document_is_zero_row() {
        let model = TFIDFVectorizer::<f32>::default().fit_transform(&["the of and", "car racing"]);
        let row = model.weights.row(0).unwrap();
        assert_eq!(row.nnz(), 0);
        assert_eq!(model.weights.n_cols(), 2);
    }

    #[test]
    fn shared_rare_term_outweighs_common_term() {
        // "story" は全文書に出るので idf = 1
        let model = TFIDFVectorizer::<f64>::default()
            .fit_transform(&["car story", "car story", "space story"]);
        let story = model.vocabulary.index_of("story").unwrap();
        let car = model.vocabulary.index_of("car").unwrap();
        assert!((model.idf[story] - 1.0).abs() < 1e-12);
        assert!(model.idf[car] > model.idf[story]);
    }

    #[test]
    fn same_input_same_model() {
        let docs = ["alpha beta", "beta gamma", "gamma delta alpha"];
        let v = TFIDFVectorizer::<f64>::default();
        let a = v.fit_transform(&docs);
        let b = v.fit_transform(&docs);
        assert_eq!(a.vocabulary, b.vocabulary);
        assert_eq!(a.weights.rows(), b.weights.rows());
    }
}
