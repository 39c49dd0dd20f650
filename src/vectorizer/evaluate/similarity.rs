use num::Float;
use rayon::prelude::*;

use crate::vectorizer::TermWeightMatrix;

/// 文書間の cosine 類似度行列 (dense, row-major)
///
/// - 正方行列で次元は文書数
/// - 対角は 1.0
/// - 値は `[0, 1]`
/// - `get(i, j) == get(j, i)` がビット単位で成り立つ
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix<N>
where
    N: Float,
{
    dim: usize,
    data: Vec<N>,
}

impl<N> SimilarityMatrix<N>
where
    N: Float + Send + Sync,
{
    /// 0x0 の行列
    pub fn empty() -> Self {
        Self {
            dim: 0,
            data: Vec::new(),
        }
    }

    /// L2 正規化済みの行から類似度行列を作る
    ///
    /// 転置インデックス (term -> (row, weight)) を作り、各行は共通の term を
    /// 持つ文書だけを走査する。どちらの向きも term の昇順で足し込むので
    /// 対称性は丸め誤差込みで保たれる。
    pub fn from_weights(weights: &TermWeightMatrix<N>) -> Self {
        let dim = weights.n_rows();
        if dim == 0 {
            return Self::empty();
        }

        let mut postings: Vec<Vec<(usize, N)>> = vec![Vec::new(); weights.n_cols()];
        for (row_idx, row) in weights.rows().iter().enumerate() {
            for (col, w) in row.raw_iter() {
                postings[col].push((row_idx, w));
            }
        }

        let mut data = vec![N::zero(); dim * dim];
        data.par_chunks_mut(dim)
            .zip(weights.rows().par_iter())
            .enumerate()
            .for_each(|(i, (out, row))| {
                for (col, w) in row.raw_iter() {
                    for &(j, wj) in &postings[col] {
                        out[j] = out[j] + w * wj;
                    }
                }
                for v in out.iter_mut() {
                    *v = v.max(N::zero()).min(N::one());
                }
                out[i] = N::one();
            });

        Self { dim, data }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dim == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<N> {
        if i >= self.dim || j >= self.dim {
            return None;
        }
        Some(self.data[i * self.dim + j])
    }

    /// 行 i の全スコア (自分自身を含む)
    #[inline]
    pub fn row(&self, i: usize) -> Option<&[N]> {
        if i >= self.dim {
            return None;
        }
        Some(&self.data[i * self.dim..(i + 1) * self.dim])
    }
}
