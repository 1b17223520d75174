//! # NEC Calculations
//!
//! This module contains every calculator. Each follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable), with `validate()`
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input, ..) -> CalcResult<*Result>` - Pure calculation function
//! - `compliance(input, ..) -> CalcResult<ComplianceResult>` - Result packaged
//!   with violations and code references
//!
//! [`CalculationItem`] wraps every input in one `"type"`-tagged enum so a
//! host can store or send heterogeneous calculations and run them uniformly.
//!
//! ## Available Calculations
//!
//! - [`conductor`] - Conductor sizing and proposed-size checks
//! - [`raceway`] - Conduit fill and box fill
//! - [`load`] - Load aggregation and VFD sizing
//! - [`grounding`] - Grounding electrode conductor
//! - [`forms`] - Raw string forms that parse to inputs

pub mod conductor;
pub mod forms;
pub mod grounding;
pub mod load;
pub mod raceway;

use serde::{Deserialize, Serialize};

use crate::compliance::{ComplianceResult, ExportRecord};
use crate::errors::CalcResult;
use crate::settings::EngineSettings;

// Re-export commonly used types
pub use conductor::{ConductorCheckInput, ConductorSizingInput, ConductorSizingResult};
pub use forms::{BoxFillForm, ConductorSizingForm};
pub use grounding::{GroundingElectrodeInput, GroundingElectrodeResult};
pub use load::{LoadCalculationInput, VfdInput};
pub use raceway::{BoxFillInput, ConduitFillCalcResult, ConduitFillInput};

/// Enum wrapper for all calculation types.
///
/// ## JSON Example
///
/// ```json
/// { "type": "BoxFill", "volume": { "rated_in3": 18.0 }, "conductors": [{ "size": "Awg12", "count": 6 }] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    ConductorSizing(ConductorSizingInput),
    ConductorCheck(ConductorCheckInput),
    ConduitFill(ConduitFillInput),
    BoxFill(BoxFillInput),
    LoadCalculation(LoadCalculationInput),
    VfdSizing(VfdInput),
    GroundingElectrode(GroundingElectrodeInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::ConductorSizing(c) => &c.label,
            CalculationItem::ConductorCheck(c) => &c.circuit.label,
            CalculationItem::ConduitFill(c) => &c.label,
            CalculationItem::BoxFill(b) => &b.label,
            CalculationItem::LoadCalculation(l) => &l.label,
            CalculationItem::VfdSizing(v) => &v.label,
            CalculationItem::GroundingElectrode(g) => &g.label,
        }
    }

    /// Calculator display name
    pub fn calculator_name(&self) -> &'static str {
        match self {
            CalculationItem::ConductorSizing(_) => "Conductor Sizing",
            CalculationItem::ConductorCheck(_) => "Conductor Check",
            CalculationItem::ConduitFill(_) => "Conduit Fill",
            CalculationItem::BoxFill(_) => "Box Fill",
            CalculationItem::LoadCalculation(_) => "Load Calculation",
            CalculationItem::VfdSizing(_) => "VFD Sizing",
            CalculationItem::GroundingElectrode(_) => "Grounding Electrode Conductor",
        }
    }

    /// Run the calculator.
    pub fn run(&self, settings: &EngineSettings) -> CalcResult<ComplianceResult> {
        tracing::debug!(calculator = self.calculator_name(), label = self.label(), "running calculation");
        match self {
            CalculationItem::ConductorSizing(input) => conductor::compliance(input, settings),
            CalculationItem::ConductorCheck(input) => conductor::check(input, settings),
            CalculationItem::ConduitFill(input) => raceway::conduit_compliance(input, settings),
            CalculationItem::BoxFill(input) => raceway::box_compliance(input),
            CalculationItem::LoadCalculation(input) => load::compliance(input),
            CalculationItem::VfdSizing(input) => load::vfd_compliance(input),
            CalculationItem::GroundingElectrode(input) => grounding::compliance(input, settings),
        }
    }

    /// Run the calculator and flatten the result with this item as inputs.
    pub fn export(&self, settings: &EngineSettings) -> CalcResult<ExportRecord> {
        self.run(settings)?.to_export_record(self, settings)
    }
}
