use std::fmt::Debug;

/// Structure to store ranking results
pub struct Hits<K> {
    /// (Document key, Score)
    pub list: Vec<(K, f64)>,
}

impl<K> Hits<K> {
    /// Create a new Hits instance
    pub fn new(vec: Vec<(K, f64)>) -> Self {
        Hits { list: vec }
    }

    /// Sort results by descending score
    ///
    /// The sort is stable: equal scores keep their insertion order.
    /// NaN scores go to the end.
    pub fn sort_by_score(&mut self) -> &mut Self {
        self.list.sort_by(|a, b| match (a.1.is_nan(), b.1.is_nan()) {
            (false, false) => b.1.total_cmp(&a.1),
            (a_nan, b_nan) => a_nan.cmp(&b_nan),
        });
        self
    }

    /// Drop every hit whose key matches `pred`
    pub fn exclude<F>(&mut self, mut pred: F) -> &mut Self
    where
        F: FnMut(&K) -> bool,
    {
        self.list.retain(|(k, _)| !pred(k));
        self
    }

    /// Keep only the first `n` hits
    pub fn truncate(&mut self, n: usize) -> &mut Self {
        self.list.truncate(n);
        self
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl<K> Debug for Hits<K>
where
    K: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            // Pretty print with alternate formatting: each hit on a new line
            writeln!(f, "Hits [")?;
            for (key, score) in &self.list {
                writeln!(f, "    {:?}: {:.6}", key, score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}
