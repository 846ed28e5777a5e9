/// Round to the nearest integer with halves going towards positive infinity.
///
/// `f64::round` sends `-2.5` to `-3`; power and ranking formulas expect `-2`.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_round_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-0.5), 0);
    }

    #[test]
    fn non_halves_round_to_nearest() {
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(-2.51), -3);
        assert_eq!(round_half_up(0.0), 0);
    }
}
