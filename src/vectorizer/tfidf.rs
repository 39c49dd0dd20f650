use num::Float;

use crate::{
    utils::math::vector::ZeroSpVec,
    vectorizer::{corpus::Corpus, token::TokenFrequency, Vocabulary},
};

/// TF-IDF の重み付け戦略
pub trait TFIDFEngine<N>
where
    N: Float,
{
    /// IDFベクトルを生成する
    /// # Arguments
    /// * `corpus` - コーパス
    /// * `vocabulary` - 列位置の決まった語彙
    /// # Returns
    /// * `Vec<N>` - 語彙の列順に並んだIDF
    fn idf_vec(corpus: &Corpus, vocabulary: &Vocabulary) -> Vec<N>;

    /// TFベクトルを生成する (語彙外のtokenは無視)
    fn tf_vec(freq: &TokenFrequency, vocabulary: &Vocabulary) -> ZeroSpVec<N>;
}

/// デフォルトのTF-IDFエンジン
///
/// - tf: 文書内の生の出現回数
/// - idf: ln((1 + n) / (1 + df)) + 1
///
/// 全文書に出る語でも idf は 1 となり 0 にはならない
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    #[inline]
    pub fn smooth_idf(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }
}

impl<N> TFIDFEngine<N> for DefaultTFIDFEngine
where
    N: Float,
{
    fn idf_vec(corpus: &Corpus, vocabulary: &Vocabulary) -> Vec<N> {
        let doc_num = corpus.get_doc_num();
        vocabulary
            .iter()
            .map(|term| {
                let idf = Self::smooth_idf(doc_num, corpus.get_term_count(term));
                N::from(idf).unwrap_or_else(N::one)
            })
            .collect()
    }

    fn tf_vec(freq: &TokenFrequency, vocabulary: &Vocabulary) -> ZeroSpVec<N> {
        let mut entries: Vec<(usize, N)> = freq
            .iter()
            .filter_map(|(token, count)| {
                let idx = vocabulary.index_of(token)?;
                Some((idx, N::from(count).unwrap_or_else(N::zero)))
            })
            .collect();
        entries.sort_unstable_by_key(|&(idx, _)| idx);
        ZeroSpVec::from_sorted_pairs(vocabulary.len(), entries)
    }
}
