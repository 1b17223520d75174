//! Diversity (demand) percentages applied to the connected load

use serde::{Deserialize, Serialize};

/// EVSE count table: (minimum count, percent). The last row whose minimum is
/// at or below the count applies.
const EVSE_DIVERSITY: [(u32, f64); 13] = [
    (1, 100.0),
    (3, 90.0),
    (4, 80.0),
    (5, 75.0),
    (6, 70.0),
    (7, 65.0),
    (8, 60.0),
    (9, 55.0),
    (10, 50.0),
    (12, 45.0),
    (14, 40.0),
    (16, 35.0),
    (20, 30.0),
];

/// Diversity percent for a number of EV chargers on a common feeder.
///
/// # Example
/// ```
/// use nec_core::loads::evse_diversity_percent;
///
/// assert_eq!(evse_diversity_percent(2), 100.0);
/// assert_eq!(evse_diversity_percent(3), 90.0);
/// assert_eq!(evse_diversity_percent(25), 30.0);
/// ```
pub fn evse_diversity_percent(count: u32) -> f64 {
    EVSE_DIVERSITY
        .iter()
        .rev()
        .find(|(min, _)| count >= *min)
        .map(|(_, pct)| *pct)
        .unwrap_or(100.0)
}

/// How the connected load is reduced to a calculated load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "method", content = "value")]
pub enum Diversity {
    /// No reduction (100%)
    #[default]
    None,
    /// A percent supplied by the designer
    UserPercent(f64),
    /// The EVSE count table, keyed by the number of chargers
    EvseTable(u32),
}

impl Diversity {
    /// Percent of connected load that counts toward the calculated load
    pub fn percent(&self) -> f64 {
        match self {
            Diversity::None => 100.0,
            Diversity::UserPercent(pct) => *pct,
            Diversity::EvseTable(count) => evse_diversity_percent(*count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evse_table_boundaries() {
        assert_eq!(evse_diversity_percent(0), 100.0);
        assert_eq!(evse_diversity_percent(1), 100.0);
        assert_eq!(evse_diversity_percent(2), 100.0);
        assert_eq!(evse_diversity_percent(3), 90.0);
        assert_eq!(evse_diversity_percent(11), 50.0);
        assert_eq!(evse_diversity_percent(12), 45.0);
        assert_eq!(evse_diversity_percent(19), 35.0);
        assert_eq!(evse_diversity_percent(20), 30.0);
        assert_eq!(evse_diversity_percent(500), 30.0);
    }

    #[test]
    fn test_evse_table_non_increasing() {
        let pcts: Vec<f64> = (1..=30).map(evse_diversity_percent).collect();
        assert!(pcts.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_diversity_json() {
        let d: Diversity = serde_json::from_str(r#"{ "method": "EvseTable", "value": 4 }"#).unwrap();
        assert_eq!(d.percent(), 80.0);
        let d: Diversity = serde_json::from_str(r#"{ "method": "None" }"#).unwrap();
        assert_eq!(d.percent(), 100.0);
    }
}
