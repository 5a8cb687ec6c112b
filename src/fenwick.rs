use alloc::vec::Vec;
use core::cmp;

/// Prefix sums over per-item sizes with O(log n) point update and inverse lookup.
#[derive(Clone, Debug)]
pub(crate) struct Fenwick {
    tree: Vec<f64>, // 1-indexed
    max_bit: usize,
}

impl Fenwick {
    pub(crate) fn new() -> Self {
        Self {
            tree: alloc::vec![0.0],
            max_bit: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.tree.len().saturating_sub(1)
    }

    /// Grows storage to `n` positions. New positions hold size `0`.
    ///
    /// Each appended node is seeded from the existing prefix sums so updates made before the
    /// resize stay visible to the new nodes that cover them.
    pub(crate) fn resize(&mut self, n: usize) {
        let cur = self.len();
        if n <= cur {
            return;
        }
        self.tree.reserve(n - cur);
        for i in cur + 1..=n {
            // tree[i] covers (i - lsb(i), i]; everything but position i already exists.
            let covered = self.prefix_sum(i - 1) - self.prefix_sum(i - lsb(i));
            self.tree.push(covered);
        }
        self.max_bit = highest_power_of_two_leq(n);
    }

    /// Truncates to `n` positions.
    ///
    /// Callers subtract the removed positions' contributions with `update` first, otherwise
    /// later growth would resurrect them.
    pub(crate) fn shrink(&mut self, n: usize) {
        if n >= self.len() {
            return;
        }
        self.tree.truncate(n + 1);
        self.max_bit = if n == 0 {
            0
        } else {
            highest_power_of_two_leq(n)
        };
    }

    pub(crate) fn update(&mut self, index: usize, delta: f64) {
        let n = self.len();
        if index >= n || delta == 0.0 {
            return;
        }
        let mut i = index + 1;
        while i <= n {
            self.tree[i] += delta;
            i += lsb(i);
        }
    }

    /// Sum of sizes for `[0, end_exclusive)`.
    pub(crate) fn prefix_sum(&self, end_exclusive: usize) -> f64 {
        let mut i = cmp::min(end_exclusive, self.len());
        let mut sum = 0.0;
        while i > 0 {
            sum += self.tree[i];
            i -= lsb(i);
        }
        sum
    }

    pub(crate) fn total(&self) -> f64 {
        self.prefix_sum(self.len())
    }

    /// Returns the smallest index `i` such that `prefix_sum(i + 1) >= target`.
    ///
    /// The result is clamped to `[0, len - 1]`. An empty tree returns `0`, which is not a
    /// valid position: callers handle `len == 0` before asking.
    pub(crate) fn lower_bound(&self, target: f64) -> usize {
        let n = self.len();
        if n == 0 || !(target > 0.0) {
            return 0;
        }

        let mut idx = 0usize;
        let mut sum = 0.0;
        let mut bit = self.max_bit;
        while bit != 0 {
            let next = idx + bit;
            if next <= n && sum + self.tree[next] < target {
                sum += self.tree[next];
                idx = next;
            }
            bit >>= 1;
        }
        idx.min(n - 1)
    }

    /// Returns the number of items whose prefix sum is `<= offset`, clamped to `[0, len - 1]`.
    ///
    /// With half-open item ranges `[start, end)` this is the item containing `offset`, so an
    /// item's own start offset maps back to that item.
    pub(crate) fn partition_point(&self, offset: f64) -> usize {
        let n = self.len();
        if n == 0 || !(offset > 0.0) {
            return 0;
        }

        let mut idx = 0usize;
        let mut remaining = offset;
        let mut bit = self.max_bit;
        while bit != 0 {
            let next = idx + bit;
            if next <= n && self.tree[next] <= remaining {
                remaining -= self.tree[next];
                idx = next;
            }
            bit >>= 1;
        }
        idx.min(n - 1)
    }
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn highest_power_of_two_leq(n: usize) -> usize {
    let mut p = 1usize;
    while p <= n / 2 {
        p <<= 1;
    }
    p
}
