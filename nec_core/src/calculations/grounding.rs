//! # Grounding Electrode Conductor
//!
//! Table 250.66, keyed by the largest ungrounded service-entrance conductor.

use serde::{Deserialize, Serialize};

use crate::compliance::{ComplianceResult, Selection};
use crate::errors::CalcResult;
use crate::settings::EngineSettings;
use crate::sizing::size_grounding_electrode;
use crate::tables::{nec_ref, Material, WireSize};

/// Input parameters for GEC sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingElectrodeInput {
    #[serde(default)]
    pub label: String,

    /// Largest service-entrance conductor (or equivalent area)
    pub service_conductor: WireSize,

    #[serde(default)]
    pub service_material: Option<Material>,

    #[serde(default)]
    pub gec_material: Option<Material>,
}

/// Results from GEC sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundingElectrodeResult {
    pub service_material: Material,
    pub gec_material: Material,
    pub gec_size: WireSize,
}

pub fn calculate(input: &GroundingElectrodeInput, settings: &EngineSettings) -> GroundingElectrodeResult {
    let service_material = input
        .service_material
        .unwrap_or(settings.default_conductor.material);
    let gec_material = input.gec_material.unwrap_or(Material::Copper);
    GroundingElectrodeResult {
        service_material,
        gec_material,
        gec_size: size_grounding_electrode(service_material, input.service_conductor, gec_material),
    }
}

pub fn compliance(input: &GroundingElectrodeInput, settings: &EngineSettings) -> CalcResult<ComplianceResult> {
    let result = calculate(input, settings);
    let mut report = ComplianceResult::new("Grounding Electrode Conductor").with_reference(nec_ref::GEC);
    report.selected = Some(Selection::Conductor(result.gec_size));
    report.with_details(&result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gec_defaults_to_copper() {
        let input = GroundingElectrodeInput {
            label: "Service".to_string(),
            service_conductor: WireSize::Kcmil500,
            service_material: None,
            gec_material: None,
        };
        let result = calculate(&input, &EngineSettings::default());
        assert_eq!(result.gec_material, Material::Copper);
        assert_eq!(result.gec_size, WireSize::Awg0);
    }
}
