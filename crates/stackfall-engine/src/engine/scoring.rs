/// Points awarded for clearing `cleared_rows` rows in a single sweep.
///
/// Each cleared row is worth `base × multiplier`, where the multiplier starts
/// at 1 and doubles after every row of the same sweep. With a base of 10:
///
/// | rows | points |
/// |------|--------|
/// | 0    | 0      |
/// | 1    | 10     |
/// | 2    | 30     |
/// | 3    | 70     |
/// | 4    | 150    |
///
/// The sum saturates at `u64::MAX`.
#[must_use]
pub fn sweep_score(cleared_rows: usize, base: u64) -> u64 {
    let mut points = 0u64;
    let mut multiplier = 1u64;
    for _ in 0..cleared_rows {
        points = points.saturating_add(base.saturating_mul(multiplier));
        multiplier = multiplier.saturating_mul(2);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_score_with_base_ten() {
        assert_eq!(sweep_score(0, 10), 0);
        assert_eq!(sweep_score(1, 10), 10);
        assert_eq!(sweep_score(2, 10), 30);
        assert_eq!(sweep_score(3, 10), 70);
        assert_eq!(sweep_score(4, 10), 150);
    }

    #[test]
    fn test_sweep_score_scales_with_base() {
        assert_eq!(sweep_score(2, 1), 3);
        assert_eq!(sweep_score(4, 100), 1500);
        assert_eq!(sweep_score(3, 0), 0);
    }

    #[test]
    fn test_sweep_score_saturates() {
        assert_eq!(sweep_score(200, 10), u64::MAX);
        assert_eq!(sweep_score(2, u64::MAX), u64::MAX);
    }
}
