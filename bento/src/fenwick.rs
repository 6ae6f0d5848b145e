use alloc::vec::Vec;
use core::cmp;

/// Prefix sums over entry sizes.
#[derive(Clone, Debug, Default)]
pub(crate) struct Fenwick {
    tree: Vec<usize>, // 1-indexed
    total: usize,
    max_bit: usize,
}

impl Fenwick {
    pub(crate) fn from_sizes(sizes: &[usize]) -> Self {
        let n = sizes.len();
        let mut tree = alloc::vec![0usize; n + 1];
        let mut total = 0usize;
        for i in 1..=n {
            let v = sizes[i - 1];
            total += v;
            tree[i] += v;
            let j = i + lsb(i);
            if j <= n {
                tree[j] += tree[i];
            }
        }
        Self {
            tree,
            total,
            max_bit: highest_power_of_two_leq(n),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.tree.len().saturating_sub(1)
    }

    pub(crate) fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len() {
            return;
        }
        self.total = self.prefix_sum(new_len);
        self.tree.truncate(new_len + 1);
        self.max_bit = highest_power_of_two_leq(new_len);
    }

    /// Appends a value in `O(log n)`.
    pub(crate) fn push(&mut self, value: usize) {
        if self.tree.is_empty() {
            self.tree.push(0);
        }
        let new_len = self.len() + 1;
        self.tree.push(0);
        self.total += value;

        // tree[i] holds the sum of the last lsb(i) values ending at i.
        let start_exclusive = new_len - lsb(new_len);
        let before = self.prefix_sum(new_len - 1) - self.prefix_sum(start_exclusive);
        self.tree[new_len] = before + value;

        self.max_bit = highest_power_of_two_leq(new_len);
    }

    pub(crate) fn add(&mut self, index: usize, delta: isize) {
        let n = self.len();
        if index >= n || delta == 0 {
            return;
        }
        self.total = apply_delta(self.total, delta);
        let mut i = index + 1;
        while i <= n {
            self.tree[i] = apply_delta(self.tree[i], delta);
            i += lsb(i);
        }
    }

    /// Sum of the first `count` values.
    pub(crate) fn prefix_sum(&self, count: usize) -> usize {
        let mut i = cmp::min(count, self.len());
        let mut sum = 0usize;
        while i > 0 {
            sum += self.tree[i];
            i &= i - 1;
        }
        sum
    }

    pub(crate) fn total(&self) -> usize {
        self.total
    }

    /// Returns the number of values whose prefix sum is <= `target`.
    ///
    /// For `target < total()` this is the index of the value covering offset `target`;
    /// zero-sized values are skipped.
    pub(crate) fn lower_bound(&self, mut target: usize) -> usize {
        let n = self.len();
        let mut idx = 0usize;
        let mut bit = self.max_bit;
        while bit != 0 {
            let next = idx + bit;
            if next <= n && self.tree[next] <= target {
                target -= self.tree[next];
                idx = next;
            }
            bit >>= 1;
        }
        idx
    }
}

fn apply_delta(value: usize, delta: isize) -> usize {
    let next = value.checked_add_signed(delta);
    debug_assert!(next.is_some(), "Fenwick underflow (cur={value}, delta={delta})");
    next.unwrap_or(0)
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn highest_power_of_two_leq(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let mut p = 1usize;
    while p <= n / 2 {
        p <<= 1;
    }
    p
}
