//! Standard Size Ladders
//!
//! Ordered lists of standard ratings, plus the one "round up to the next
//! standard size" search shared by every caller (breakers, VFDs, OCPD).

/// Standard ampere ratings for fuses and inverse time circuit breakers, 240.6(A)
pub const STANDARD_BREAKER_RATINGS: [f64; 37] = [
    15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 110.0, 125.0,
    150.0, 175.0, 200.0, 225.0, 250.0, 300.0, 350.0, 400.0, 450.0, 500.0, 600.0, 700.0, 800.0,
    1000.0, 1200.0, 1600.0, 2000.0, 2500.0, 3000.0, 4000.0, 5000.0, 6000.0,
];

/// Normal-duty VFD output current ratings (A) across common frame sizes
pub const VFD_OUTPUT_RATINGS: [f64; 27] = [
    2.2, 3.3, 4.3, 5.6, 7.6, 9.0, 12.6, 17.5, 25.0, 32.0, 39.0, 45.0, 60.0, 75.0, 91.0, 112.0,
    150.0, 180.0, 216.0, 260.0, 304.0, 377.0, 415.0, 485.0, 520.0, 650.0, 740.0,
];

/// First ladder entry ≥ `target`, or `None` if the target exceeds the ladder.
///
/// The ladder must be ascending. Non-comparable targets (NaN) never match.
pub fn round_up_to_standard<T: PartialOrd + Copy>(ladder: &[T], target: T) -> Option<T> {
    ladder.iter().copied().find(|rating| *rating >= target)
}

/// Next standard breaker/fuse rating at or above `amps`
pub fn standard_breaker_at_least(amps: f64) -> Option<f64> {
    round_up_to_standard(&STANDARD_BREAKER_RATINGS, amps)
}

/// Next VFD output rating at or above `amps`
pub fn vfd_rating_at_least(amps: f64) -> Option<f64> {
    round_up_to_standard(&VFD_OUTPUT_RATINGS, amps)
}

// ============================================================================
// TABLE 430.250 - THREE-PHASE MOTOR FULL-LOAD CURRENT
// ============================================================================

/// (hp, [208 V, 230 V, 460 V, 575 V]) induction-type squirrel cage motors
const MOTOR_FLA_3PH: [(f64, [f64; 4]); 21] = [
    (0.5, [2.4, 2.2, 1.1, 0.9]),
    (0.75, [3.5, 3.2, 1.6, 1.3]),
    (1.0, [4.6, 4.2, 2.1, 1.7]),
    (1.5, [6.6, 6.0, 3.0, 2.4]),
    (2.0, [7.5, 6.8, 3.4, 2.7]),
    (3.0, [10.6, 9.6, 4.8, 3.9]),
    (5.0, [16.7, 15.2, 7.6, 6.1]),
    (7.5, [24.2, 22.0, 11.0, 9.0]),
    (10.0, [30.8, 28.0, 14.0, 11.0]),
    (15.0, [46.2, 42.0, 21.0, 17.0]),
    (20.0, [59.4, 54.0, 27.0, 22.0]),
    (25.0, [74.8, 68.0, 34.0, 27.0]),
    (30.0, [88.0, 80.0, 40.0, 32.0]),
    (40.0, [114.0, 104.0, 52.0, 41.0]),
    (50.0, [143.0, 130.0, 65.0, 52.0]),
    (60.0, [169.0, 154.0, 77.0, 62.0]),
    (75.0, [211.0, 192.0, 96.0, 77.0]),
    (100.0, [273.0, 248.0, 124.0, 99.0]),
    (125.0, [343.0, 312.0, 156.0, 125.0]),
    (150.0, [396.0, 360.0, 180.0, 144.0]),
    (200.0, [528.0, 480.0, 240.0, 192.0]),
];

fn motor_voltage_column(voltage: f64) -> Option<usize> {
    match voltage {
        v if (200.0..220.0).contains(&v) => Some(0),
        v if (220.0..=240.0).contains(&v) => Some(1),
        v if (440.0..=480.0).contains(&v) => Some(2),
        v if (550.0..=600.0).contains(&v) => Some(3),
        _ => None,
    }
}

/// Full-load current of a three-phase induction motor per Table 430.250.
///
/// `None` for a horsepower the table does not list or a system voltage outside
/// the 208/230/460/575 V columns.
pub fn motor_full_load_current(hp: f64, voltage: f64) -> Option<f64> {
    let column = motor_voltage_column(voltage)?;
    MOTOR_FLA_3PH
        .iter()
        .find(|(rated_hp, _)| (rated_hp - hp).abs() < 1e-9)
        .map(|(_, columns)| columns[column])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_up_generic() {
        assert_eq!(round_up_to_standard(&[1, 5, 10], 5), Some(5));
        assert_eq!(round_up_to_standard(&[1, 5, 10], 6), Some(10));
        assert_eq!(round_up_to_standard(&[1, 5, 10], 11), None);
        assert_eq!(round_up_to_standard::<f64>(&[], 1.0), None);
        assert_eq!(round_up_to_standard(&[1.0, 2.0], f64::NAN), None);
    }

    #[test]
    fn test_breaker_ladder() {
        assert_eq!(standard_breaker_at_least(0.0), Some(15.0));
        assert_eq!(standard_breaker_at_least(20.0), Some(20.0));
        assert_eq!(standard_breaker_at_least(20.1), Some(25.0));
        assert_eq!(standard_breaker_at_least(101.0), Some(110.0));
        assert_eq!(standard_breaker_at_least(6001.0), None);
        assert!(STANDARD_BREAKER_RATINGS.windows(2).all(|p| p[0] < p[1]));
    }

    #[test]
    fn test_vfd_ladder() {
        assert_eq!(vfd_rating_at_least(14.0), Some(17.5));
        assert_eq!(vfd_rating_at_least(800.0), None);
    }

    #[test]
    fn test_motor_fla() {
        assert_eq!(motor_full_load_current(10.0, 460.0), Some(14.0));
        assert_eq!(motor_full_load_current(10.0, 480.0), Some(14.0));
        assert_eq!(motor_full_load_current(5.0, 208.0), Some(16.7));
        assert_eq!(motor_full_load_current(4.0, 460.0), None);
        assert_eq!(motor_full_load_current(10.0, 120.0), None);
    }
}
