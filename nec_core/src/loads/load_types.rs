//! Load categories and their fixed neutral/continuous behavior
//!
//! Each category carries a behavior record that the aggregator reads through
//! exhaustive matching. Adding a category means adding one match arm per
//! property.

use serde::{Deserialize, Serialize};

use crate::tables::nec_ref;

/// Load category
///
/// # Example
/// ```
/// use nec_core::loads::LoadCategory;
///
/// let range = LoadCategory::Range;
/// assert!(range.needs_neutral());
/// assert_eq!(range.neutral_demand_factor(), 0.70);
/// assert!(!range.is_continuous());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadCategory {
    /// 120 V / 277 V load, full current returns on the neutral
    LineToNeutral,
    /// Household cooking appliance (220.61(B)(1), 70% neutral)
    Range,
    /// Household clothes dryer (220.61(B)(1), 70% neutral)
    Dryer,
    /// Balanced 240 V two-wire load, no neutral
    LineToLine240,
    /// Balanced three-phase load, no neutral current
    ThreePhaseBalanced,
    /// Electric vehicle supply equipment (625.41, continuous)
    Evse,
    /// Storage water heater ≤ 120 gal (422.13, continuous)
    WaterHeater,
}

/// Fixed behavior of a load category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryBehavior {
    pub needs_neutral: bool,
    pub neutral_demand_factor: f64,
    pub is_continuous: bool,
}

impl LoadCategory {
    pub const ALL: [LoadCategory; 7] = [
        LoadCategory::LineToNeutral,
        LoadCategory::Range,
        LoadCategory::Dryer,
        LoadCategory::LineToLine240,
        LoadCategory::ThreePhaseBalanced,
        LoadCategory::Evse,
        LoadCategory::WaterHeater,
    ];

    /// Load returns current on the neutral
    pub fn needs_neutral(&self) -> bool {
        match self {
            LoadCategory::LineToNeutral | LoadCategory::Range | LoadCategory::Dryer => true,
            LoadCategory::LineToLine240
            | LoadCategory::ThreePhaseBalanced
            | LoadCategory::Evse
            | LoadCategory::WaterHeater => false,
        }
    }

    /// Fraction of the line current counted on the neutral
    pub fn neutral_demand_factor(&self) -> f64 {
        match self {
            LoadCategory::LineToNeutral => 1.0,
            LoadCategory::Range | LoadCategory::Dryer => 0.70,
            LoadCategory::LineToLine240
            | LoadCategory::ThreePhaseBalanced
            | LoadCategory::Evse
            | LoadCategory::WaterHeater => 0.0,
        }
    }

    /// Load is treated as continuous (sized at 125%)
    pub fn is_continuous(&self) -> bool {
        matches!(self, LoadCategory::Evse | LoadCategory::WaterHeater)
    }

    /// All three properties together
    pub fn behavior(&self) -> CategoryBehavior {
        CategoryBehavior {
            needs_neutral: self.needs_neutral(),
            neutral_demand_factor: self.neutral_demand_factor(),
            is_continuous: self.is_continuous(),
        }
    }

    /// Code section behind the category's special treatment, if any
    pub fn nec_reference(&self) -> Option<&'static str> {
        match self {
            LoadCategory::Range | LoadCategory::Dryer => Some(nec_ref::NEUTRAL_LOAD),
            LoadCategory::Evse => Some(nec_ref::EVSE),
            LoadCategory::WaterHeater => Some(nec_ref::WATER_HEATER),
            LoadCategory::LineToNeutral | LoadCategory::LineToLine240 | LoadCategory::ThreePhaseBalanced => None,
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            LoadCategory::LineToNeutral => "Line-to-neutral",
            LoadCategory::Range => "Range",
            LoadCategory::Dryer => "Dryer",
            LoadCategory::LineToLine240 => "240 V line-to-line",
            LoadCategory::ThreePhaseBalanced => "Three-phase balanced",
            LoadCategory::Evse => "EV charger",
            LoadCategory::WaterHeater => "Water heater",
        }
    }
}

impl std::fmt::Display for LoadCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_neutral_means_zero_factor() {
        for category in LoadCategory::ALL {
            if !category.needs_neutral() {
                assert_eq!(category.neutral_demand_factor(), 0.0, "{}", category);
            }
        }
    }

    #[test]
    fn test_continuous_categories() {
        let continuous: Vec<_> = LoadCategory::ALL.iter().filter(|c| c.is_continuous()).collect();
        assert_eq!(continuous, vec![&LoadCategory::Evse, &LoadCategory::WaterHeater]);
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&LoadCategory::LineToLine240).unwrap();
        assert_eq!(json, "\"LineToLine240\"");
        let parsed: LoadCategory = serde_json::from_str("\"Range\"").unwrap();
        assert_eq!(parsed, LoadCategory::Range);
    }
}
