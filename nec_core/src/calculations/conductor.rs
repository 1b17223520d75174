//! # Conductor Sizing and Checking
//!
//! Two calculators share one input shape:
//!
//! - **Conductor Sizing** searches the size ladder for the smallest conductor
//!   meeting ampacity, the 240.4(D) limit, and (when a run length is given)
//!   voltage drop. It also sizes the overcurrent device and the equipment
//!   grounding conductor, upsized in proportion when voltage drop forced a
//!   larger ungrounded conductor.
//! - **Conductor Check** evaluates a proposed size and reports every
//!   constraint it fails.
//!
//! Optional fields fall back to [`EngineSettings`].
//!
//! ## Example
//!
//! ```rust
//! use nec_core::calculations::conductor::{calculate, ConductorSizingInput};
//! use nec_core::settings::EngineSettings;
//! use nec_core::tables::WireSize;
//!
//! let input = ConductorSizingInput {
//!     is_continuous: true,
//!     one_way_length_ft: Some(100.0),
//!     ..ConductorSizingInput::new("Kitchen circuit", 20.0, 120.0)
//! };
//!
//! let result = calculate(&input, &EngineSettings::default()).unwrap();
//! assert_eq!(result.selected_size(), Some(WireSize::Awg8));
//! // 12 AWG carries 20 A but 240.4(D) holds it to a 20 A breaker, below the 25 A design current
//! assert_eq!(result.ampacity_minimum_size, Some(WireSize::Awg10));
//! ```

use serde::{Deserialize, Serialize};

use crate::compliance::ComplianceResult;
use crate::derating::DerateContext;
use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};
use crate::settings::EngineSettings;
use crate::sizing::{
    evaluate_size, select_conductor_size, size_equipment_ground, CircuitPhase, ConductorTemplate, SelectionOutcome,
    SizingRequest, VoltageDropTarget,
};
use crate::tables::{self, nec_ref, Material, TempRating, WireSize};

fn default_current_carrying() -> u32 {
    3
}

/// Input parameters for conductor sizing.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "EV charger feeder",
///   "load_amps": 48.0,
///   "system_voltage": 240.0,
///   "is_continuous": true,
///   "one_way_length_ft": 150.0,
///   "max_voltage_drop_percent": 3.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConductorSizingInput {
    #[serde(default)]
    pub label: String,

    /// Load current (A)
    pub load_amps: f64,

    /// System voltage (V), basis for the voltage-drop percent
    pub system_voltage: f64,

    #[serde(default)]
    pub is_continuous: bool,

    #[serde(default)]
    pub phase: CircuitPhase,

    #[serde(default)]
    pub material: Option<Material>,

    #[serde(default)]
    pub temp_rating: Option<TempRating>,

    /// Equipment terminal rating
    #[serde(default)]
    pub termination: Option<TempRating>,

    /// Ambient temperature (°C)
    #[serde(default)]
    pub ambient_c: Option<f64>,

    #[serde(default = "default_current_carrying")]
    pub current_carrying_conductors: u32,

    /// One-way run length (ft); enables the voltage-drop constraint
    #[serde(default)]
    pub one_way_length_ft: Option<f64>,

    #[serde(default)]
    pub max_voltage_drop_percent: Option<f64>,

    /// Candidate sizes; defaults to 14 AWG through 2000 kcmil
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ladder: Option<Vec<WireSize>>,
}

impl ConductorSizingInput {
    /// Minimal input: everything else defaults
    pub fn new(label: impl Into<String>, load_amps: f64, system_voltage: f64) -> Self {
        ConductorSizingInput {
            label: label.into(),
            load_amps,
            system_voltage,
            is_continuous: false,
            phase: CircuitPhase::SinglePhase,
            material: None,
            temp_rating: None,
            termination: None,
            ambient_c: None,
            current_carrying_conductors: default_current_carrying(),
            one_way_length_ft: None,
            max_voltage_drop_percent: None,
            ladder: None,
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_non_negative("load_amps", self.load_amps)?;
        require_positive("system_voltage", self.system_voltage)?;
        if let Some(ambient) = self.ambient_c {
            if !ambient.is_finite() {
                return Err(CalcError::invalid_input(
                    "ambient_c",
                    ambient.to_string(),
                    "Ambient temperature must be finite",
                ));
            }
        }
        if let Some(length) = self.one_way_length_ft {
            require_non_negative("one_way_length_ft", length)?;
        }
        if let Some(pct) = self.max_voltage_drop_percent {
            require_positive("max_voltage_drop_percent", pct)?;
        }
        if matches!(&self.ladder, Some(ladder) if ladder.is_empty()) {
            return Err(CalcError::invalid_input("ladder", "[]", "Ladder must list at least one size"));
        }
        Ok(())
    }

    /// Material, rating, and termination with settings defaults applied
    pub fn template(&self, settings: &EngineSettings) -> ConductorTemplate {
        ConductorTemplate {
            material: self.material.unwrap_or(settings.default_conductor.material),
            temp_rating: self.temp_rating.unwrap_or(settings.default_conductor.temp_rating),
            termination: self.termination.or(settings.default_termination),
        }
    }

    pub fn derate_context(&self, settings: &EngineSettings) -> DerateContext {
        DerateContext {
            ambient_c: self.ambient_c.unwrap_or(settings.default_ambient_c),
            current_carrying_conductors: self.current_carrying_conductors,
            is_continuous: self.is_continuous,
        }
    }

    /// Voltage-drop target, present only when a run length is given
    pub fn voltage_drop_target(&self, settings: &EngineSettings) -> Option<VoltageDropTarget> {
        self.one_way_length_ft.map(|length| {
            VoltageDropTarget::from_percent(
                length,
                self.system_voltage,
                self.max_voltage_drop_percent
                    .unwrap_or(settings.max_voltage_drop_percent),
                self.phase,
            )
        })
    }

    pub fn sizing_request<'a>(&'a self, settings: &EngineSettings) -> SizingRequest<'a> {
        SizingRequest {
            ladder: self.ladder.as_deref().unwrap_or(WireSize::BUILDING_WIRE),
            template: self.template(settings),
            ctx: self.derate_context(settings),
            load_amps: self.load_amps,
            voltage_drop: self.voltage_drop_target(settings),
        }
    }

    /// Current the overcurrent device must carry: 125% of a continuous load
    pub fn design_current(&self) -> f64 {
        DerateContext {
            is_continuous: self.is_continuous,
            ..DerateContext::default()
        }
        .design_current(self.load_amps)
    }
}

/// Results from conductor sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConductorSizingResult {
    #[serde(flatten)]
    pub outcome: SelectionOutcome,

    /// Smallest size meeting ampacity and 240.4(D) alone
    pub ampacity_minimum_size: Option<WireSize>,

    /// Standard breaker ≥ design current
    pub ocpd_rating: Option<f64>,

    /// Equipment grounding conductor, 250.122 with proportional upsizing
    pub equipment_ground: Option<WireSize>,
}

impl ConductorSizingResult {
    /// Smallest size meeting every constraint
    pub fn selected_size(&self) -> Option<WireSize> {
        self.outcome.selected_size()
    }
}

/// Size a conductor.
pub fn calculate(input: &ConductorSizingInput, settings: &EngineSettings) -> CalcResult<ConductorSizingResult> {
    input.validate()?;

    let request = input.sizing_request(settings);
    let outcome = select_conductor_size(&request);

    let ampacity_minimum_size = if request.voltage_drop.is_some() {
        select_conductor_size(&SizingRequest {
            voltage_drop: None,
            ..request
        })
        .selected_size()
    } else {
        outcome.selected_size()
    };

    let ocpd_rating = tables::standard_breaker_at_least(input.design_current());
    let equipment_ground = match (ocpd_rating, ampacity_minimum_size, outcome.selected_size()) {
        (Some(rating), Some(minimum), Some(installed)) => {
            size_equipment_ground(request.template.material, rating, minimum, installed)
        }
        _ => None,
    };

    tracing::debug!(
        label = %input.label,
        selected = ?outcome.selected_size(),
        ?ampacity_minimum_size,
        ?ocpd_rating,
        ?equipment_ground,
        "conductor sizing"
    );

    Ok(ConductorSizingResult {
        outcome,
        ampacity_minimum_size,
        ocpd_rating,
        equipment_ground,
    })
}

/// Size a conductor and report compliance.
pub fn compliance(input: &ConductorSizingInput, settings: &EngineSettings) -> CalcResult<ComplianceResult> {
    let result = calculate(input, settings)?;
    let request = input.sizing_request(settings);

    let mut report =
        ComplianceResult::new("Conductor Sizing").with_selection(&result.outcome, &request, input.system_voltage);
    if result.equipment_ground.is_some() {
        report = report.with_reference(nec_ref::EGC);
    }
    report.with_details(&result)
}

/// Input for checking a proposed conductor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConductorCheckInput {
    pub proposed_size: WireSize,

    #[serde(flatten)]
    pub circuit: ConductorSizingInput,
}

/// Check a proposed conductor against every constraint.
pub fn check(input: &ConductorCheckInput, settings: &EngineSettings) -> CalcResult<ComplianceResult> {
    input.circuit.validate()?;
    let request = input.circuit.sizing_request(settings);
    let evaluation = evaluate_size(
        &request.template,
        &request.ctx,
        input.proposed_size,
        request.load_amps,
        request.voltage_drop.as_ref(),
    );

    tracing::debug!(size = %input.proposed_size, failed = ?evaluation.failed, "conductor check");

    ComplianceResult::new("Conductor Check")
        .with_check(&evaluation, &request, input.circuit.system_voltage)
        .with_details(&evaluation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kitchen_circuit() -> ConductorSizingInput {
        ConductorSizingInput {
            is_continuous: true,
            one_way_length_ft: Some(100.0),
            ..ConductorSizingInput::new("Kitchen", 20.0, 120.0)
        }
    }

    #[test]
    fn test_voltage_drop_upsizes_and_ground_follows() {
        let result = calculate(&kitchen_circuit(), &EngineSettings::default()).unwrap();
        assert_eq!(result.selected_size(), Some(WireSize::Awg8));
        assert_eq!(result.ampacity_minimum_size, Some(WireSize::Awg10));
        // 125% × 20 A = 25 A breaker
        assert_eq!(result.ocpd_rating, Some(25.0));
        // 10 AWG EGC scaled by 16510/10380 lands on the 8 AWG phase conductor
        assert_eq!(result.equipment_ground, Some(WireSize::Awg8));
    }

    #[test]
    fn test_continuous_breaker_within_small_conductor_limit() {
        let input = ConductorSizingInput {
            is_continuous: true,
            ..ConductorSizingInput::new("Receptacles", 20.0, 120.0)
        };
        let result = calculate(&input, &EngineSettings::default()).unwrap();

        // 12 AWG carries the load but its 20 A limit is below the 25 A breaker
        let twelve = result.outcome.evaluated.iter().find(|e| e.size == WireSize::Awg12).unwrap();
        assert!(!twelve.fails(crate::sizing::Constraint::Ampacity));
        assert!(twelve.fails(crate::sizing::Constraint::OcpdLimit));

        let selected = result.selected_size().unwrap();
        assert_eq!(selected, WireSize::Awg10);
        let rating = result.ocpd_rating.unwrap();
        let limit = tables::ocpd_limit(Material::Copper, selected).unwrap();
        assert!(rating <= limit);
        assert!(compliance(&input, &EngineSettings::default()).unwrap().passes());
    }

    #[test]
    fn test_check_reports_design_current_against_limit() {
        let input = ConductorCheckInput {
            proposed_size: WireSize::Awg12,
            circuit: ConductorSizingInput {
                is_continuous: true,
                ..ConductorSizingInput::new("Receptacles", 20.0, 120.0)
            },
        };
        let report = check(&input, &EngineSettings::default()).unwrap();
        assert!(!report.passes());
        assert_eq!(
            report.violations,
            vec![crate::compliance::Violation::OcpdLimitExceeded {
                ocpd_limit: 20.0,
                design_amps: 25.0,
            }]
        );
    }

    #[test]
    fn test_termination_rating_caps_selection() {
        // 90 °C copper: 6 AWG is 75 A, but 75 °C terminals hold it to 65 A
        let mut input = ConductorSizingInput::new("Unit heater", 70.0, 240.0);
        input.temp_rating = Some(TempRating::C90);
        let uncapped = calculate(&input, &EngineSettings::default()).unwrap();
        assert_eq!(uncapped.selected_size(), Some(WireSize::Awg6));

        input.termination = Some(TempRating::C75);
        let capped = calculate(&input, &EngineSettings::default()).unwrap();
        assert_eq!(capped.selected_size(), Some(WireSize::Awg4));
        let six = capped.outcome.evaluated.iter().find(|e| e.size == WireSize::Awg6).unwrap();
        assert_eq!(six.usable_ampacity, 65.0);
    }

    #[test]
    fn test_settings_termination_default_applies() {
        let mut input = ConductorSizingInput::new("Unit heater", 70.0, 240.0);
        input.temp_rating = Some(TempRating::C90);
        let settings = EngineSettings {
            default_termination: Some(TempRating::C75),
            ..EngineSettings::default()
        };
        let result = calculate(&input, &settings).unwrap();
        assert_eq!(result.selected_size(), Some(WireSize::Awg4));

        // An explicit rating on the input wins over the settings default
        input.termination = Some(TempRating::C90);
        let result = calculate(&input, &settings).unwrap();
        assert_eq!(result.selected_size(), Some(WireSize::Awg6));
    }

    #[test]
    fn test_settings_defaults_apply() {
        let settings = EngineSettings {
            max_voltage_drop_percent: 5.0,
            ..EngineSettings::default()
        };
        // 5% of 120 V = 6.0 V: 10 AWG (4.96 V) now passes
        let result = calculate(&kitchen_circuit(), &settings).unwrap();
        assert_eq!(result.selected_size(), Some(WireSize::Awg10));

        let mut aluminum = EngineSettings::default();
        aluminum.default_conductor.material = Material::Aluminum;
        let input = ConductorSizingInput::new("Feeder", 100.0, 240.0);
        let result = calculate(&input, &aluminum).unwrap();
        // Al 75 °C: 2 AWG 90 A, 1 AWG 100 A
        assert_eq!(result.selected_size(), Some(WireSize::Awg1));
    }

    #[test]
    fn test_invalid_inputs() {
        let mut input = ConductorSizingInput::new("Bad", -1.0, 120.0);
        assert!(calculate(&input, &EngineSettings::default()).is_err());
        input.load_amps = 10.0;
        input.system_voltage = 0.0;
        assert!(calculate(&input, &EngineSettings::default()).is_err());
        input.system_voltage = 120.0;
        input.ladder = Some(vec![]);
        assert!(calculate(&input, &EngineSettings::default()).is_err());
    }

    #[test]
    fn test_compliance_report() {
        let report = compliance(&kitchen_circuit(), &EngineSettings::default()).unwrap();
        assert!(report.passes());
        assert!(report.nec_references.iter().any(|r| r == nec_ref::EGC));
        assert_eq!(report.details["selected"]["size"], "Awg8");
    }

    #[test]
    fn test_check_proposed_size() {
        let input = ConductorCheckInput {
            proposed_size: WireSize::Awg10,
            circuit: kitchen_circuit(),
        };
        let report = check(&input, &EngineSettings::default()).unwrap();
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].tag(), "VoltageDropExceeded");

        let input = ConductorCheckInput {
            proposed_size: WireSize::Awg8,
            circuit: kitchen_circuit(),
        };
        assert!(check(&input, &EngineSettings::default()).unwrap().passes());
    }

    #[test]
    fn test_check_input_json_is_flat() {
        let json = r#"{ "proposed_size": "Awg12", "load_amps": 16.0, "system_voltage": 120.0 }"#;
        let input: ConductorCheckInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.circuit.current_carrying_conductors, 3);
        assert!(check(&input, &EngineSettings::default()).unwrap().passes());
    }
}
