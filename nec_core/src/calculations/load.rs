//! # Load Calculation and VFD Sizing

use serde::{Deserialize, Serialize};

use crate::compliance::{ComplianceResult, Selection};
use crate::errors::{require_non_negative, CalcError, CalcResult};
use crate::loads::{aggregate_loads, size_vfd, Diversity, LoadEntry, LoadSummary, VfdSizing};
use crate::tables::nec_ref;

/// Input parameters for a load calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Panel B",
///   "loads": [
///     { "category": "Range", "current_amps": 50.0, "voltage": 240.0 },
///     { "category": "LineToNeutral", "current_amps": 30.0, "voltage": 120.0 }
///   ],
///   "diversity": { "method": "None" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCalculationInput {
    #[serde(default)]
    pub label: String,

    pub loads: Vec<LoadEntry>,

    #[serde(default)]
    pub diversity: Diversity,
}

impl LoadCalculationInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        for entry in &self.loads {
            entry.validate()?;
        }
        if let Diversity::UserPercent(pct) = self.diversity {
            require_non_negative("diversity.value", pct)?;
            if pct > 100.0 {
                return Err(CalcError::invalid_input(
                    "diversity.value",
                    pct.to_string(),
                    "Diversity cannot exceed 100%",
                ));
            }
        }
        Ok(())
    }
}

/// Aggregate loads.
pub fn calculate(input: &LoadCalculationInput) -> CalcResult<LoadSummary> {
    input.validate()?;
    Ok(aggregate_loads(&input.loads, input.diversity))
}

/// Load calculation with compliance report.
pub fn compliance(input: &LoadCalculationInput) -> CalcResult<ComplianceResult> {
    let summary = calculate(input)?;
    ComplianceResult::new("Load Calculation")
        .with_load_summary(&summary)
        .with_details(&summary)
}

/// Input parameters for VFD sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VfdInput {
    #[serde(default)]
    pub label: String,

    pub horsepower: f64,

    /// Three-phase system voltage (208, 230, 460, 575 and nominal equivalents)
    pub voltage: f64,
}

/// Size a VFD; an unlisted motor is an unknown table key.
pub fn calculate_vfd(input: &VfdInput) -> CalcResult<VfdSizing> {
    size_vfd(input.horsepower, input.voltage).ok_or_else(|| {
        CalcError::unknown_table_key(
            nec_ref::MOTOR_FLC,
            format!("{} hp at {} V", input.horsepower, input.voltage),
        )
    })
}

/// VFD sizing with compliance report.
pub fn vfd_compliance(input: &VfdInput) -> CalcResult<ComplianceResult> {
    let sizing = calculate_vfd(input)?;
    let mut report = ComplianceResult::new("VFD Sizing").with_reference(nec_ref::MOTOR_FLC);
    report.selected = Some(Selection::Vfd(sizing.vfd_output_amps));
    report.with_details(&sizing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::LoadCategory;

    #[test]
    fn test_load_calculation() {
        let input = LoadCalculationInput {
            label: "Panel B".to_string(),
            loads: vec![
                LoadEntry::new(LoadCategory::Range, 50.0, 240.0),
                LoadEntry::new(LoadCategory::LineToNeutral, 30.0, 120.0),
            ],
            diversity: Diversity::None,
        };
        let report = compliance(&input).unwrap();
        assert!(report.passes());
        assert_eq!(report.selected, Some(Selection::Breaker(80.0)));
        assert_eq!(report.diversity_percent, Some(100.0));
        assert!((report.details["total_neutral_current"].as_f64().unwrap() - 65.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_diversity() {
        let input = LoadCalculationInput {
            label: String::new(),
            loads: vec![],
            diversity: Diversity::UserPercent(120.0),
        };
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_vfd_unknown_motor() {
        let input = VfdInput {
            label: String::new(),
            horsepower: 12.0,
            voltage: 460.0,
        };
        let err = calculate_vfd(&input).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_TABLE_KEY");
    }

    #[test]
    fn test_vfd_report() {
        let input = VfdInput {
            label: "AHU-1".to_string(),
            horsepower: 10.0,
            voltage: 460.0,
        };
        let report = vfd_compliance(&input).unwrap();
        assert_eq!(report.selected, Some(Selection::Vfd(17.5)));
    }
}
