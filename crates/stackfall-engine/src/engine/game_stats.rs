use serde::{Deserialize, Serialize};

/// Game statistics tracking score, cleared rows, and piece count.
///
/// Tracks various metrics during a game session:
///
/// - **Score**: Points earned from sweeps
/// - **Completed pieces**: Total number of pieces locked
/// - **Row clear distribution**: How many rows each lock cleared
///
/// # Example
///
/// ```
/// use stackfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.record_lock(0, 0);
/// stats.record_lock(2, 30);
///
/// assert_eq!(stats.score(), 30);
/// assert_eq!(stats.completed_pieces(), 2);
/// assert_eq!(stats.total_cleared_rows(), 2);
/// assert_eq!(stats.cleared_rows_counter(), &[1, 0, 1, 0, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    score: u64,
    completed_pieces: usize,
    total_cleared_rows: usize,
    cleared_rows_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_rows: 0,
            cleared_rows_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_rows(&self) -> usize {
        self.total_cleared_rows
    }

    /// Returns a histogram of locks by the number of rows they cleared.
    ///
    /// - `[0]`: Locks that cleared nothing
    /// - `[1]` to `[3]`: Locks that cleared that many rows
    /// - `[4]`: Locks that cleared four rows or more (only possible on
    ///   boards where a piece spans more rows than usual)
    #[must_use]
    pub const fn cleared_rows_counter(&self) -> &[usize; 5] {
        &self.cleared_rows_counter
    }

    /// Updates statistics after a piece lock.
    ///
    /// # Arguments
    ///
    /// * `cleared_rows` - Number of rows the sweep removed
    /// * `points` - Points the sweep was worth
    pub fn record_lock(&mut self, cleared_rows: usize, points: u64) {
        self.completed_pieces += 1;
        self.total_cleared_rows += cleared_rows;
        let bucket = cleared_rows.min(self.cleared_rows_counter.len() - 1);
        self.cleared_rows_counter[bucket] += 1;
        self.score = self.score.saturating_add(points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_are_zero() {
        let stats = GameStats::new();
        assert_eq!(stats, GameStats::default());
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.completed_pieces(), 0);
        assert_eq!(stats.total_cleared_rows(), 0);
        assert_eq!(stats.cleared_rows_counter(), &[0; 5]);
    }

    #[test]
    fn test_record_lock_accumulates() {
        let mut stats = GameStats::new();
        stats.record_lock(1, 10);
        stats.record_lock(0, 0);
        stats.record_lock(4, 150);
        assert_eq!(stats.score(), 160);
        assert_eq!(stats.completed_pieces(), 3);
        assert_eq!(stats.total_cleared_rows(), 5);
        assert_eq!(stats.cleared_rows_counter(), &[1, 1, 0, 0, 1]);
    }

    #[test]
    fn test_large_sweeps_share_the_last_bucket() {
        let mut stats = GameStats::new();
        stats.record_lock(6, 630);
        assert_eq!(stats.total_cleared_rows(), 6);
        assert_eq!(stats.cleared_rows_counter(), &[0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_stats_serialization() {
        let mut stats = GameStats::new();
        stats.record_lock(2, 30);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "score": 30,
                "completed_pieces": 1,
                "total_cleared_rows": 2,
                "cleared_rows_counter": [0, 0, 1, 0, 0],
            })
        );
        let back: GameStats = serde_json::from_value(json).unwrap();
        assert_eq!(back, stats);
    }
}
