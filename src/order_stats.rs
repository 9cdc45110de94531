/// A subset of `0..universe` with O(log n) order statistics.
///
/// Backed by a Fenwick tree of 0/1 membership counts, so both "k-th smallest
/// element" and "how many elements are below x" cost one tree walk.
#[derive(Clone, Debug)]
pub struct IndexedSet {
    tree: Vec<usize>,
    present: Vec<bool>,
    len: usize,
}

impl IndexedSet {
    #[cfg(test)]
    fn empty(universe: usize) -> Self {
        Self {
            tree: vec![0; universe + 1],
            present: vec![false; universe],
            len: 0,
        }
    }

    /// Every element of `0..universe`.
    pub fn full(universe: usize) -> Self {
        // Node i covers (i - lowbit(i), i], all present.
        let tree = (0..=universe).map(|i| i & i.wrapping_neg()).collect();
        Self {
            tree,
            present: vec![true; universe],
            len: universe,
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, x: usize) -> bool {
        self.present.get(x).copied().unwrap_or(false)
    }

    #[cfg(test)]
    fn insert(&mut self, x: usize) -> bool {
        if x >= self.present.len() || self.present[x] {
            return false;
        }
        self.present[x] = true;
        self.len += 1;
        let mut i = x + 1;
        while i < self.tree.len() {
            self.tree[i] += 1;
            i += i & i.wrapping_neg();
        }
        true
    }

    pub fn remove(&mut self, x: usize) -> bool {
        if !self.contains(x) {
            return false;
        }
        self.present[x] = false;
        self.len -= 1;
        let mut i = x + 1;
        while i < self.tree.len() {
            self.tree[i] -= 1;
            i += i & i.wrapping_neg();
        }
        true
    }

    /// Number of elements strictly less than `x`.
    pub fn rank(&self, x: usize) -> usize {
        let mut i = x.min(self.present.len());
        let mut count = 0;
        while i > 0 {
            count += self.tree[i];
            i &= i - 1;
        }
        count
    }

    /// The `k`-th smallest element, counting from zero.
    pub fn select(&self, k: usize) -> Option<usize> {
        if k >= self.len {
            return None;
        }
        let universe = self.present.len();
        let mut pos = 0;
        let mut remaining = k;
        let mut step = if universe == 0 {
            0
        } else {
            1 << universe.ilog2()
        };
        // Largest prefix holding at most k elements; the answer sits right after it.
        while step > 0 {
            let next = pos + step;
            if next <= universe && self.tree[next] <= remaining {
                pos = next;
                remaining -= self.tree[next];
            }
            step >>= 1;
        }
        Some(pos)
    }

    pub fn first(&self) -> Option<usize> {
        self.select(0)
    }

    #[cfg(test)]
    fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.present
            .iter()
            .enumerate()
            .filter_map(|(x, &present)| present.then_some(x))
    }
}
