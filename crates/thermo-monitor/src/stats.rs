//! Running statistics over the reading history.

/// Value reported by every aggregate while the history is empty.
pub const NEUTRAL: f64 = 0.0;

/// Append-only reading history with running aggregates.
///
/// Sum, minimum and maximum are updated on every append so the aggregate
/// queries do not rescan the history.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    history: Vec<f64>,
    sum: f64,
    min: f64,
    max: f64,
}

impl Statistics {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a reading.
    pub fn append(&mut self, value: f64) {
        if self.history.is_empty() {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.sum += value;
        self.history.push(value);
    }

    /// Mean of the history, or [`NEUTRAL`] when empty.
    pub fn average(&self) -> f64 {
        if self.history.is_empty() {
            return NEUTRAL;
        }
        // Rounding in the running sum must not push the mean outside [min, max]
        (self.sum / self.history.len() as f64)
            .max(self.min)
            .min(self.max)
    }

    /// Smallest reading, or [`NEUTRAL`] when empty.
    pub fn minimum(&self) -> f64 {
        if self.history.is_empty() {
            NEUTRAL
        } else {
            self.min
        }
    }

    /// Largest reading, or [`NEUTRAL`] when empty.
    pub fn maximum(&self) -> f64 {
        if self.history.is_empty() {
            NEUTRAL
        } else {
            self.max
        }
    }

    /// Drops the whole history.
    pub fn clear(&mut self) {
        self.history.clear();
        self.sum = 0.0;
        self.min = NEUTRAL;
        self.max = NEUTRAL;
    }

    /// Readings in arrival order.
    pub fn values(&self) -> &[f64] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_of(values: &[f64]) -> Statistics {
        let mut stats = Statistics::new();
        for &v in values {
            stats.append(v);
        }
        stats
    }

    #[test]
    fn test_empty_is_neutral() {
        let stats = Statistics::new();
        assert!(stats.is_empty());
        assert_eq!(stats.average(), 0.0);
        assert_eq!(stats.minimum(), 0.0);
        assert_eq!(stats.maximum(), 0.0);
    }

    #[test]
    fn test_aggregates() {
        let stats = stats_of(&[20.0, 25.0, 15.0]);
        assert_eq!(stats.average(), 20.0);
        assert_eq!(stats.minimum(), 15.0);
        assert_eq!(stats.maximum(), 25.0);
        assert_eq!(stats.len(), 3);
    }

    #[test]
    fn test_single_value() {
        let stats = stats_of(&[-4.5]);
        assert_eq!(stats.average(), -4.5);
        assert_eq!(stats.minimum(), -4.5);
        assert_eq!(stats.maximum(), -4.5);
    }

    #[test]
    fn test_all_negative() {
        // The first reading seeds min/max, not the neutral value
        let stats = stats_of(&[-10.0, -20.0, -30.0]);
        assert_eq!(stats.maximum(), -10.0);
        assert_eq!(stats.minimum(), -30.0);
        assert_eq!(stats.average(), -20.0);
    }

    #[test]
    fn test_min_le_avg_le_max() {
        // Deterministic pseudo-random walk, checked after every append
        let mut stats = Statistics::new();
        let mut x: u64 = 0x2545_F491_4F6C_DD1D;
        for _ in 0..2000 {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            let value = (x % 20_000) as f64 * 0.0625 - 600.0;
            stats.append(value);
            assert!(stats.minimum() <= stats.average());
            assert!(stats.average() <= stats.maximum());
        }
    }

    #[test]
    fn test_repeated_fraction_stays_in_range() {
        let stats = stats_of(&[0.1; 7]);
        assert_eq!(stats.average(), 0.1);
    }

    #[test]
    fn test_clear_restores_empty() {
        let mut stats = stats_of(&[1.0, 2.0, 3.0]);
        stats.clear();
        assert!(stats.is_empty());
        assert!(stats.values().is_empty());
        assert_eq!(stats.average(), 0.0);
        assert_eq!(stats.minimum(), 0.0);
        assert_eq!(stats.maximum(), 0.0);
    }

    #[test]
    fn test_append_after_clear() {
        let mut stats = stats_of(&[100.0, -100.0]);
        stats.clear();
        stats.append(5.0);
        assert_eq!(stats.minimum(), 5.0);
        assert_eq!(stats.maximum(), 5.0);
        assert_eq!(stats.average(), 5.0);
    }

    #[test]
    fn test_values_keep_order() {
        let stats = stats_of(&[3.0, 1.0, 2.0]);
        assert_eq!(stats.values(), &[3.0, 1.0, 2.0]);
    }
}
