//! Rounding helpers shared by every engine boundary.
//!
//! Amounts are rounded half-up (toward positive infinity on ties), so
//! `-2.5` becomes `-2.0` and `2.5` becomes `3.0`. Callers round once, when a
//! value leaves the engine; intermediate arithmetic keeps full precision.

/// Round to the nearest whole currency unit.
pub fn round_amount(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    round_amount(value * factor) / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_amount_ties_go_up() {
        assert_eq!(round_amount(2.5), 3.0);
        assert_eq!(round_amount(-2.5), -2.0);
        assert_eq!(round_amount(233.333), 233.0);
        assert_eq!(round_amount(-166.67), -167.0);
    }

    #[test]
    fn test_round_to_places() {
        assert_eq!(round_to(83.333_333, 2), 83.33);
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(1.0, 3), 1.0);
    }
}
