//! Load aggregation per NEC Article 220
//!
//! Combines heterogeneous load entries into line and neutral totals, applies
//! a diversity percentage, and recommends the overcurrent device.
//!
//! # Overview
//!
//! - [`LoadCategory`] - Closed set of load kinds with fixed neutral/continuous behavior
//! - [`LoadEntry`] - One load: category, current, voltage
//! - [`Diversity`] - None, a user percent, or the EVSE count table
//! - [`aggregate_loads`] - Totals, calculated load, and recommended OCPD
//! - [`size_vfd`] - Motor FLA rounded up to a drive rating
//!
//! # Example
//!
//! ```
//! use nec_core::loads::{aggregate_loads, Diversity, LoadCategory, LoadEntry};
//!
//! let loads = [
//!     LoadEntry::new(LoadCategory::Range, 50.0, 240.0),
//!     LoadEntry::new(LoadCategory::LineToNeutral, 30.0, 120.0),
//! ];
//!
//! let summary = aggregate_loads(&loads, Diversity::None);
//! assert_eq!(summary.total_neutral_current, 65.0);
//! assert_eq!(summary.total_connected_load, 80.0);
//! assert_eq!(summary.recommended_ocpd, Some(80.0));
//! ```

pub mod diversity;
pub mod load_types;
pub mod motors;

pub use diversity::{evse_diversity_percent, Diversity};
pub use load_types::{CategoryBehavior, LoadCategory};
pub use motors::{size_vfd, VfdSizing};

use serde::{Deserialize, Serialize};

use crate::derating::CONTINUOUS_LOAD_MULTIPLIER;
use crate::errors::{require_non_negative, require_positive, CalcResult};
use crate::tables::{self, nec_ref};
use crate::units::Amps;

/// A single load on the feeder or panel.
///
/// ## JSON Example
///
/// ```json
/// { "category": "Evse", "current_amps": 32.0, "voltage": 240.0, "label": "Bay 1" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadEntry {
    pub category: LoadCategory,

    /// Nameplate or calculated current (A)
    pub current_amps: f64,

    /// Circuit voltage (V)
    pub voltage: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl LoadEntry {
    pub fn new(category: LoadCategory, current_amps: f64, voltage: f64) -> Self {
        Self {
            category,
            current_amps,
            voltage,
            label: None,
        }
    }

    /// Builder: attach a label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Current counted on the neutral
    pub fn neutral_contribution(&self) -> Amps {
        let behavior = self.category.behavior();
        if behavior.needs_neutral {
            Amps(self.current_amps) * behavior.neutral_demand_factor
        } else {
            Amps(0.0)
        }
    }

    /// Current counted on the ungrounded conductors, 125% when continuous
    pub fn line_contribution(&self) -> Amps {
        if self.category.behavior().is_continuous {
            Amps(self.current_amps) * CONTINUOUS_LOAD_MULTIPLIER
        } else {
            Amps(self.current_amps)
        }
    }

    /// Reject negative or non-finite current and non-positive voltage.
    pub fn validate(&self) -> CalcResult<()> {
        require_non_negative("current_amps", self.current_amps)?;
        require_positive("voltage", self.voltage)?;
        Ok(())
    }
}

/// What one entry contributed to the totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadContribution {
    pub category: LoadCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub current_amps: f64,
    pub line_amps: f64,
    pub neutral_amps: f64,
}

/// Aggregated load totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadSummary {
    pub contributions: Vec<LoadContribution>,

    /// Σ line contributions (A)
    pub total_connected_load: f64,

    /// Σ neutral contributions (A)
    pub total_neutral_current: f64,

    /// Percent applied to the connected load
    pub diversity_percent: f64,

    /// connected × diversity / 100 (A)
    pub calculated_load: f64,

    /// First standard breaker rating ≥ calculated load; `None` above 6000 A
    pub recommended_ocpd: Option<f64>,
}

impl LoadSummary {
    /// Categories whose code references apply, deduplicated, in entry order,
    /// then 215.2(A)(1) when any load is continuous
    pub fn nec_references(&self) -> Vec<&'static str> {
        let mut refs: Vec<&'static str> = Vec::new();
        for reference in self.contributions.iter().filter_map(|c| c.category.nec_reference()) {
            if !refs.contains(&reference) {
                refs.push(reference);
            }
        }
        if self.contributions.iter().any(|c| c.category.is_continuous()) {
            refs.push(nec_ref::CONTINUOUS_FEEDER);
        }
        refs
    }
}

/// Sum line and neutral currents, apply diversity, and pick the OCPD.
pub fn aggregate_loads(entries: &[LoadEntry], diversity: Diversity) -> LoadSummary {
    let contributions: Vec<LoadContribution> = entries
        .iter()
        .map(|entry| LoadContribution {
            category: entry.category,
            label: entry.label.clone(),
            current_amps: entry.current_amps,
            line_amps: entry.line_contribution().0,
            neutral_amps: entry.neutral_contribution().0,
        })
        .collect();

    let Amps(connected) = contributions.iter().map(|c| Amps(c.line_amps)).sum::<Amps>();
    let Amps(neutral) = contributions.iter().map(|c| Amps(c.neutral_amps)).sum::<Amps>();

    let diversity_percent = diversity.percent();
    let calculated_load = connected * diversity_percent / 100.0;
    let recommended_ocpd = tables::standard_breaker_at_least(calculated_load);

    tracing::debug!(
        entries = entries.len(),
        connected,
        neutral,
        diversity_percent,
        calculated_load,
        ?recommended_ocpd,
        "aggregated loads"
    );
    if recommended_ocpd.is_none() {
        tracing::warn!(calculated_load, "calculated load exceeds the standard breaker ladder");
    }

    LoadSummary {
        contributions,
        total_connected_load: connected,
        total_neutral_current: neutral,
        diversity_percent,
        calculated_load,
        recommended_ocpd,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_and_line_to_neutral_neutral() {
        let loads = [
            LoadEntry::new(LoadCategory::Range, 50.0, 240.0),
            LoadEntry::new(LoadCategory::LineToNeutral, 30.0, 120.0),
        ];
        let summary = aggregate_loads(&loads, Diversity::None);
        assert!((summary.total_neutral_current - 65.0).abs() < 1e-9);
        assert_eq!(summary.total_connected_load, 80.0);
    }

    #[test]
    fn test_balanced_loads_have_no_neutral() {
        let loads = [
            LoadEntry::new(LoadCategory::LineToLine240, 40.0, 240.0),
            LoadEntry::new(LoadCategory::ThreePhaseBalanced, 60.0, 480.0),
        ];
        let summary = aggregate_loads(&loads, Diversity::None);
        assert_eq!(summary.total_neutral_current, 0.0);
        assert_eq!(summary.total_connected_load, 100.0);
        assert_eq!(summary.recommended_ocpd, Some(100.0));
    }

    #[test]
    fn test_evse_continuous_and_diversity() {
        let loads: Vec<LoadEntry> = (1..=4)
            .map(|n| LoadEntry::new(LoadCategory::Evse, 32.0, 240.0).with_label(format!("Bay {}", n)))
            .collect();
        let summary = aggregate_loads(&loads, Diversity::EvseTable(loads.len() as u32));
        // 4 × 32 × 1.25 = 160 A connected, 80% → 128 A → 150 A breaker
        assert_eq!(summary.total_connected_load, 160.0);
        assert_eq!(summary.diversity_percent, 80.0);
        assert!((summary.calculated_load - 128.0).abs() < 1e-9);
        assert_eq!(summary.recommended_ocpd, Some(150.0));
        assert_eq!(summary.nec_references(), vec![nec_ref::EVSE, nec_ref::CONTINUOUS_FEEDER]);
    }

    #[test]
    fn test_contributions_follow_category_behavior() {
        for category in LoadCategory::ALL {
            let behavior = category.behavior();
            let entry = LoadEntry::new(category, 40.0, 240.0);
            let line = if behavior.is_continuous { 50.0 } else { 40.0 };
            let neutral = if behavior.needs_neutral {
                40.0 * behavior.neutral_demand_factor
            } else {
                0.0
            };
            assert_eq!(entry.line_contribution(), Amps(line), "{}", category);
            assert_eq!(entry.neutral_contribution(), Amps(neutral), "{}", category);
        }
    }

    #[test]
    fn test_user_diversity() {
        let loads = [LoadEntry::new(LoadCategory::LineToNeutral, 100.0, 120.0)];
        let summary = aggregate_loads(&loads, Diversity::UserPercent(75.0));
        assert_eq!(summary.calculated_load, 75.0);
        assert_eq!(summary.recommended_ocpd, Some(80.0));
    }

    #[test]
    fn test_empty_loads() {
        let summary = aggregate_loads(&[], Diversity::None);
        assert_eq!(summary.total_connected_load, 0.0);
        assert_eq!(summary.recommended_ocpd, Some(15.0));
    }

    #[test]
    fn test_load_beyond_ladder() {
        let loads = [LoadEntry::new(LoadCategory::ThreePhaseBalanced, 7000.0, 480.0)];
        assert_eq!(aggregate_loads(&loads, Diversity::None).recommended_ocpd, None);
    }

    #[test]
    fn test_entry_validation() {
        assert!(LoadEntry::new(LoadCategory::Dryer, 24.0, 240.0).validate().is_ok());
        assert!(LoadEntry::new(LoadCategory::Dryer, -1.0, 240.0).validate().is_err());
        assert!(LoadEntry::new(LoadCategory::Dryer, 24.0, 0.0).validate().is_err());
    }
}
