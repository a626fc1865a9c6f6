//! Usage counters and the adaptive acceptance thresholds derived from them.
//!
//! Thresholds follow the current spread of the counters:
//! `min + (max - min) * fraction`. A fraction of 0 only admits entries at the
//! minimum; a fraction of 1 admits everything.

use serde::Serialize;

/// The candidates used by one slot, as indices into the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Pick {
    Single(usize),
    /// Two distinct indices.
    Pair(usize, usize),
}

impl Pick {
    pub fn contains(&self, index: usize) -> bool {
        match *self {
            Pick::Single(a) => a == index,
            Pick::Pair(a, b) => a == index || b == index,
        }
    }

    /// Whether the two picks have a candidate in common.
    pub fn overlaps(&self, other: &Pick) -> bool {
        match *other {
            Pick::Single(a) => self.contains(a),
            Pick::Pair(a, b) => self.contains(a) || self.contains(b),
        }
    }
}

/// Per-candidate and per-pair usage for one generation pass.
#[derive(Debug, Clone)]
pub struct FairnessTracker {
    pool_size: usize,
    index_scores: Vec<u32>,
    /// Upper-triangular layout: one counter per unordered pair `lo < hi`.
    mix_scores: Vec<u32>,
    last: Option<Pick>,
}

impl FairnessTracker {
    /// All counters start at zero, so unused pairs pull the mix minimum down.
    pub fn new(pool_size: usize) -> Self {
        let pairs = pool_size * pool_size.saturating_sub(1) / 2;
        Self {
            pool_size,
            index_scores: vec![0; pool_size],
            mix_scores: vec![0; pairs],
            last: None,
        }
    }

    pub fn index_scores(&self) -> &[u32] {
        &self.index_scores
    }

    pub fn index_score(&self, index: usize) -> u32 {
        self.index_scores[index]
    }

    /// Joint usage of two distinct indices, in either order.
    pub fn mix_score(&self, a: usize, b: usize) -> u32 {
        self.mix_scores[self.pair_slot(a, b)]
    }

    /// Candidates of the most recently recorded slot.
    pub fn last_selection(&self) -> Option<Pick> {
        self.last
    }

    /// Whether `index` was used by the previous slot.
    pub fn was_just_used(&self, index: usize) -> bool {
        self.last.is_some_and(|last| last.contains(index))
    }

    pub fn index_threshold(&self, fraction: f64) -> f64 {
        spread_threshold(&self.index_scores, fraction)
    }

    pub fn mix_threshold(&self, fraction: f64) -> f64 {
        spread_threshold(&self.mix_scores, fraction)
    }

    /// Count a slot's pick and make it the last selection.
    pub fn record(&mut self, pick: Pick) {
        match pick {
            Pick::Single(a) => {
                self.index_scores[a] += 1;
            }
            Pick::Pair(a, b) => {
                self.index_scores[a] += 1;
                self.index_scores[b] += 1;
                let slot = self.pair_slot(a, b);
                self.mix_scores[slot] += 1;
            }
        }
        self.last = Some(pick);
    }

    fn pair_slot(&self, a: usize, b: usize) -> usize {
        assert!(a != b, "a pair needs two distinct candidates");
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        debug_assert!(hi < self.pool_size);
        // Rows before `lo` hold (n-1) + (n-2) + ... + (n-lo) pairs.
        lo * (2 * self.pool_size - lo - 1) / 2 + (hi - lo - 1)
    }
}

/// `min + (max - min) * fraction`; zero for an empty score set.
fn spread_threshold(scores: &[u32], fraction: f64) -> f64 {
    let min = scores.iter().copied().min().unwrap_or(0);
    let max = scores.iter().copied().max().unwrap_or(0);
    f64::from(min) + f64::from(max - min) * fraction
}
