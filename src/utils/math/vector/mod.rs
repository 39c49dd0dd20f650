use std::fmt::{self, Debug};

use num::Float;

/// ZeroSpVecは0要素を疎とした疎ベクトルです
/// indices と values を持ち
/// indices は要素のインデックスを保持し、
/// values は要素の値を保持します
///
/// 要素は indices の昇順でソートされていることを保証します
/// 0 の値は保持しません
#[derive(Clone, PartialEq)]
pub struct ZeroSpVec<N>
where
    N: Float,
{
    inds: Vec<usize>,
    vals: Vec<N>,
    /// logical dimension
    len: usize,
}

impl<N> ZeroSpVec<N>
where
    N: Float,
{
    #[inline]
    pub fn new() -> Self {
        ZeroSpVec {
            inds: Vec::new(),
            vals: Vec::new(),
            len: 0,
        }
    }

    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        ZeroSpVec {
            inds: Vec::with_capacity(cap),
            vals: Vec::with_capacity(cap),
            len: 0,
        }
    }

    /// Build from `(index, value)` pairs in ascending index order.
    /// Zero values are skipped. `len` is the logical dimension.
    pub fn from_sorted_pairs<I>(len: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (usize, N)>,
    {
        let mut vec = ZeroSpVec::new();
        for (idx, val) in pairs {
            vec.push_entry(idx, val);
        }
        vec.len = vec.len.max(len);
        vec
    }

    /// 末尾に疎要素を追加する
    /// index は直前の要素より大きくなければならない
    #[inline]
    pub fn push_entry(&mut self, index: usize, value: N) {
        debug_assert!(
            self.inds.last().map_or(true, |&last| last < index),
            "indices must be strictly ascending"
        );
        if value != N::zero() {
            self.inds.push(index);
            self.vals.push(value);
        }
        if index >= self.len {
            self.len = index + 1;
        }
    }

    /// dense push: the element takes the next logical index
    #[inline]
    pub fn push(&mut self, elem: N) {
        if elem != N::zero() {
            self.inds.push(self.len);
            self.vals.push(elem);
        }
        self.len += 1;
    }

    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.inds.shrink_to_fit();
        self.vals.shrink_to_fit();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// number of stored (non-zero) elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    /// Value at logical `index`; `None` when out of range, zero when not stored.
    #[inline]
    pub fn get(&self, index: usize) -> Option<N> {
        if index >= self.len {
            return None;
        }
        match self.inds.binary_search(&index) {
            Ok(pos) => Some(self.vals[pos]),
            Err(_) => Some(N::zero()),
        }
    }

    /// Iterate stored `(index, value)` pairs in ascending index order.
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.inds.iter().copied().zip(self.vals.iter().copied())
    }

    /// Dot product by merging the two index lists.
    pub fn dot(&self, other: &Self) -> N {
        let mut i = 0;
        let mut j = 0;
        let mut sum = N::zero();
        while i < self.inds.len() && j < other.inds.len() {
            let a = self.inds[i];
            let b = other.inds[j];
            if a == b {
                sum = sum + self.vals[i] * other.vals[j];
                i += 1;
                j += 1;
            } else if a < b {
                i += 1;
            } else {
                j += 1;
            }
        }
        sum
    }

    /// 各要素に `f(index, value)` を適用する
    /// 結果が 0 になった要素は取り除く
    pub fn map_values<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, N) -> N,
    {
        for (idx, val) in self.inds.iter().zip(self.vals.iter_mut()) {
            *val = f(*idx, *val);
        }
        if self.vals.iter().any(|v| *v == N::zero()) {
            let (inds, vals): (Vec<usize>, Vec<N>) = self
                .raw_iter()
                .filter(|(_, v)| *v != N::zero())
                .unzip();
            self.inds = inds;
            self.vals = vals;
        }
    }

    #[inline]
    pub fn norm_l2(&self) -> N {
        self.vals
            .iter()
            .fold(N::zero(), |acc, &v| acc + v * v)
            .sqrt()
    }

    /// L2 正規化
    /// ゼロベクトルはそのまま
    pub fn normalize_l2(&mut self) {
        let norm = self.norm_l2();
        if norm > N::zero() {
            for v in self.vals.iter_mut() {
                *v = *v / norm;
            }
        }
    }
}

impl<N> Default for ZeroSpVec<N>
where
    N: Float,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Debug for ZeroSpVec<N>
where
    N: Float + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "ZeroSpVec {{ len: {}, nnz: {} }} [", self.len, self.nnz())?;
            for (idx, val) in self.raw_iter() {
                writeln!(f, "    {}: {:?}", idx, val)?;
            }
            write!(f, "]")
        } else {
            f.debug_struct("ZeroSpVec")
                .field("len", &self.len)
                .field("inds", &self.inds)
                .field("vals", &self.vals)
                .finish()
        }
    }
}

impl<N> From<Vec<N>> for ZeroSpVec<N>
where
    N: Float,
{
    fn from(vec: Vec<N>) -> Self {
        let mut sp = ZeroSpVec::with_capacity(vec.len());
        for v in vec {
            sp.push(v);
        }
        sp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_push_skips_zeros_but_keeps_dimension() {
        let v: ZeroSpVec<f32> = ZeroSpVec::from(vec![0.0, 2.0, 0.0, 3.0]);
        assert_eq!(v.len(), 4);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.get(0), Some(0.0));
        assert_eq!(v.get(1), Some(2.0));
        assert_eq!(v.get(3), Some(3.0));
        assert_eq!(v.get(4), None);
    }

    #[test]
    fn dot_only_counts_shared_indices() {
        let a = ZeroSpVec::from_sorted_pairs(6, vec![(0, 1.0_f64), (2, 2.0), (5, 3.0)]);
        let b = ZeroSpVec::from_sorted_pairs(6, vec![(1, 4.0_f64), (2, 5.0), (5, 1.0)]);
        assert_eq!(a.dot(&b), 13.0);
        assert_eq!(a.dot(&b), b.dot(&a));
    }

    #[test]
    fn normalize_makes_unit_length() {
        let mut v = ZeroSpVec::from_sorted_pairs(3, vec![(0, 3.0_f64), (2, 4.0)]);
        v.normalize_l2();
        assert!((v.norm_l2() - 1.0).abs() < 1e-12);
        assert!((v.get(0).unwrap() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn zero_vector_stays_zero() {
        let mut v: ZeroSpVec<f32> = ZeroSpVec::from_sorted_pairs(10, Vec::new());
        v.normalize_l2();
        assert_eq!(v.nnz(), 0);
        assert_eq!(v.len(), 10);
        assert_eq!(v.dot(&v), 0.0);
    }
}
