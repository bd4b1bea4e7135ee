//! Distribution of simulated strikeout totals.

/// Histogram of strikeout totals: `counts[k]` games ended with `k` Ks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KDistribution {
    counts: Vec<u64>,
    total: u64,
}

impl KDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one simulated game.
    pub fn record(&mut self, strikeouts: u32) {
        let k = strikeouts as usize;
        if self.counts.len() <= k {
            self.counts.resize(k + 1, 0);
        }
        self.counts[k] += 1;
        self.total += 1;
    }

    /// Fold another histogram into this one.
    pub fn merge(mut self, other: KDistribution) -> KDistribution {
        if self.counts.len() < other.counts.len() {
            self.counts.resize(other.counts.len(), 0);
        }
        for (k, n) in other.counts.into_iter().enumerate() {
            self.counts[k] += n;
        }
        self.total += other.total;
        self
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Mean strikeouts per game; 0 when empty.
    pub fn mean(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let sum: f64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(k, &n)| k as f64 * n as f64)
            .sum();
        sum / self.total as f64
    }

    /// Share of games with at least `line` strikeouts.
    ///
    /// With a half-point line (6.5) this is P(K ≥ 7).
    pub fn p_at_least(&self, line: f64) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let hits: u64 = self
            .counts
            .iter()
            .enumerate()
            .filter(|(k, _)| *k as f64 >= line)
            .map(|(_, &n)| n)
            .sum();
        hits as f64 / self.total as f64
    }

    /// Smallest total `k` with P(K ≤ k) ≥ q.
    pub fn quantile(&self, q: f64) -> Option<u32> {
        if self.total == 0 || !(0.0..=1.0).contains(&q) {
            return None;
        }
        let target = q * self.total as f64;
        let mut cumulative = 0u64;
        for (k, &n) in self.counts.iter().enumerate() {
            cumulative += n;
            if cumulative as f64 >= target && cumulative > 0 {
                return Some(k as u32);
            }
        }
        Some(self.counts.len().saturating_sub(1) as u32)
    }
}
