//! # Compliance Report
//!
//! Packages the outcome of any calculator into one [`ComplianceResult`]:
//! the selection made (if any), derived ampacity and margin, diversity
//! applied, fill figures, and a list of tagged [`Violation`]s. A result with
//! no violations passes.
//!
//! [`ComplianceResult::to_export_record`] flattens a result and its inputs
//! into the record handed to report and export collaborators. JSON objects
//! are key-sorted, so the same inputs always produce the same record.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "calculator": "Conductor Sizing",
//!   "selected": { "kind": "Conductor", "value": "Awg8" },
//!   "ampacity": 40.0,
//!   "margin_percent": 100.0,
//!   "violations": []
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::fill::{BoxFillResult, ConduitFillResult, RacewaySpec};
use crate::loads::LoadSummary;
use crate::settings::EngineSettings;
use crate::sizing::{Constraint, SelectionOutcome, SizeEvaluation, SizingRequest};
use crate::tables::{nec_ref, StandardBox, WireSize};
use crate::units::Volts;

/// What a calculator selected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Selection {
    Conductor(WireSize),
    Raceway(RacewaySpec),
    Box(StandardBox),
    /// Breaker or fuse rating (A)
    Breaker(f64),
    /// VFD output rating (A)
    Vfd(f64),
}

/// Which enclosure an overfill refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Enclosure {
    Conduit,
    Box,
}

/// A code violation found by a calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Violation {
    /// Conduit fill % or box volume over the limit
    Overfill {
        enclosure: Enclosure,
        actual: f64,
        limit: f64,
    },

    /// No size on the ladder satisfies every constraint
    NoConformingSize {
        load_amps: f64,
        largest_size_tested: Option<WireSize>,
        failed: Vec<Constraint>,
    },

    VoltageDropExceeded {
        drop_volts: f64,
        max_drop_volts: f64,
    },

    AmpacityInsufficient {
        usable_ampacity: f64,
        load_amps: f64,
    },

    /// 240.4(D) limit below the current the overcurrent device must carry
    OcpdLimitExceeded {
        ocpd_limit: f64,
        design_amps: f64,
    },

    /// Calculated load above the largest standard breaker
    LoadExceedsStandardOcpd {
        calculated_load: f64,
    },
}

impl Violation {
    /// Short tag for display and logs
    pub fn tag(&self) -> &'static str {
        match self {
            Violation::Overfill { .. } => "Overfill",
            Violation::NoConformingSize { .. } => "NoConformingSize",
            Violation::VoltageDropExceeded { .. } => "VoltageDropExceeded",
            Violation::AmpacityInsufficient { .. } => "AmpacityInsufficient",
            Violation::OcpdLimitExceeded { .. } => "OcpdLimitExceeded",
            Violation::LoadExceedsStandardOcpd { .. } => "LoadExceedsStandardOcpd",
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::Overfill {
                enclosure: Enclosure::Conduit,
                actual,
                limit,
            } => write!(f, "Conduit fill {:.1}% exceeds {:.0}%", actual, limit),
            Violation::Overfill { actual, limit, .. } => {
                write!(f, "Box fill {:.2} in³ exceeds {:.2} in³", actual, limit)
            }
            Violation::NoConformingSize {
                load_amps,
                largest_size_tested,
                failed,
            } => {
                let failed: Vec<&str> = failed.iter().map(|c| c.display_name()).collect();
                match largest_size_tested {
                    Some(size) => write!(
                        f,
                        "No conforming size for {:.1} A; {} fails {}",
                        load_amps,
                        size,
                        failed.join(", ")
                    ),
                    None => write!(f, "No conforming size for {:.1} A; empty ladder", load_amps),
                }
            }
            Violation::VoltageDropExceeded {
                drop_volts,
                max_drop_volts,
            } => write!(f, "Voltage drop {:.2} V exceeds {:.2} V", drop_volts, max_drop_volts),
            Violation::AmpacityInsufficient {
                usable_ampacity,
                load_amps,
            } => write!(f, "Ampacity {:.1} A below load {:.1} A", usable_ampacity, load_amps),
            Violation::OcpdLimitExceeded { ocpd_limit, design_amps } => write!(
                f,
                "Small conductor limit {:.0} A below design current {:.1} A",
                ocpd_limit, design_amps
            ),
            Violation::LoadExceedsStandardOcpd { calculated_load } => {
                write!(f, "Calculated load {:.1} A exceeds standard ratings", calculated_load)
            }
        }
    }
}

/// Outcome of one calculator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    /// Calculator display name
    pub calculator: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<Selection>,

    /// Usable ampacity of the selected or checked conductor (A)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ampacity: Option<f64>,

    /// (ampacity − load) / load × 100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_percent: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voltage_drop_volts: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voltage_drop_percent: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diversity_percent: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_percent: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fill_percent: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_volume_in3: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rated_volume_in3: Option<f64>,

    pub violations: Vec<Violation>,

    /// Table keys that contributed zero
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unsupported: Vec<String>,

    pub nec_references: Vec<String>,

    /// Full calculator output, for reports
    #[serde(default)]
    pub details: serde_json::Value,
}

impl ComplianceResult {
    /// Empty result for a calculator
    pub fn new(calculator: impl Into<String>) -> Self {
        ComplianceResult {
            calculator: calculator.into(),
            selected: None,
            ampacity: None,
            margin_percent: None,
            voltage_drop_volts: None,
            voltage_drop_percent: None,
            diversity_percent: None,
            fill_percent: None,
            max_fill_percent: None,
            required_volume_in3: None,
            rated_volume_in3: None,
            violations: Vec::new(),
            unsupported: Vec::new(),
            nec_references: Vec::new(),
            details: serde_json::Value::Null,
        }
    }

    /// True when no violation was found
    pub fn passes(&self) -> bool {
        self.violations.is_empty()
    }

    /// Builder: add a code reference (deduplicated)
    pub fn with_reference(mut self, reference: &str) -> Self {
        if !self.nec_references.iter().any(|r| r == reference) {
            self.nec_references.push(reference.to_string());
        }
        self
    }

    /// Builder: add several code references
    pub fn with_references<'a>(self, references: impl IntoIterator<Item = &'a str>) -> Self {
        references.into_iter().fold(self, |acc, r| acc.with_reference(r))
    }

    /// Builder: attach the full calculator output
    pub fn with_details<T: Serialize>(mut self, details: &T) -> CalcResult<Self> {
        self.details = serde_json::to_value(details)?;
        Ok(self)
    }

    fn with_evaluation(mut self, evaluation: &SizeEvaluation, request: &SizingRequest<'_>, system_voltage: f64) -> Self {
        self.ampacity = Some(evaluation.usable_ampacity);
        self.margin_percent = margin_percent(evaluation.usable_ampacity, request.load_amps);
        self.voltage_drop_volts = evaluation.voltage_drop_volts;
        self.voltage_drop_percent = evaluation
            .voltage_drop_volts
            .map(|v| Volts(system_voltage).ratio_percent(Volts(v)));
        self.with_references(conductor_references(evaluation, request))
    }

    /// Builder: record the outcome of a size search
    pub fn with_selection(mut self, outcome: &SelectionOutcome, request: &SizingRequest<'_>, system_voltage: f64) -> Self {
        if let Some(selected) = &outcome.selected {
            self.selected = Some(Selection::Conductor(selected.size));
            return self.with_evaluation(selected, request, system_voltage);
        }

        let largest = outcome.evaluated.last();
        self.violations.push(Violation::NoConformingSize {
            load_amps: request.load_amps,
            largest_size_tested: largest.map(|e| e.size),
            failed: outcome.failures_at_largest().to_vec(),
        });
        if let Some(largest) = largest {
            self.push_drop_violation(largest, request);
            self = self.with_evaluation(largest, request, system_voltage);
        }
        self
    }

    /// Builder: record the check of a proposed size
    pub fn with_check(mut self, evaluation: &SizeEvaluation, request: &SizingRequest<'_>, system_voltage: f64) -> Self {
        self.selected = Some(Selection::Conductor(evaluation.size));
        for constraint in &evaluation.failed {
            match constraint {
                Constraint::Ampacity => self.violations.push(Violation::AmpacityInsufficient {
                    usable_ampacity: evaluation.usable_ampacity,
                    load_amps: request.load_amps,
                }),
                Constraint::OcpdLimit => {
                    if let Some(limit) = evaluation.ocpd_limit {
                        self.violations.push(Violation::OcpdLimitExceeded {
                            ocpd_limit: limit,
                            design_amps: evaluation.design_amps,
                        });
                    }
                }
                Constraint::VoltageDrop => self.push_drop_violation(evaluation, request),
                Constraint::UnsupportedSize => {
                    self.unsupported.push(format!("conductor {}", request.template.at(evaluation.size)));
                    self.violations.push(Violation::AmpacityInsufficient {
                        usable_ampacity: 0.0,
                        load_amps: request.load_amps,
                    });
                }
            }
        }
        self.with_evaluation(evaluation, request, system_voltage)
    }

    fn push_drop_violation(&mut self, evaluation: &SizeEvaluation, request: &SizingRequest<'_>) {
        if !evaluation.fails(Constraint::VoltageDrop) {
            return;
        }
        if let (Some(drop_volts), Some(target)) = (evaluation.voltage_drop_volts, request.voltage_drop) {
            self.violations.push(Violation::VoltageDropExceeded {
                drop_volts,
                max_drop_volts: target.max_drop_volts,
            });
        }
    }

    /// Builder: record a conduit fill result
    pub fn with_conduit_fill(mut self, fill: &ConduitFillResult) -> Self {
        self.fill_percent = Some(fill.fill_percent);
        self.max_fill_percent = Some(fill.max_fill_percent);
        self.unsupported.extend(fill.unsupported.iter().cloned());
        if fill.overfilled {
            self.violations.push(Violation::Overfill {
                enclosure: Enclosure::Conduit,
                actual: fill.fill_percent,
                limit: fill.max_fill_percent,
            });
        }
        let article = format!("NEC Article {}", fill.raceway.raceway_type.article());
        self.with_references([nec_ref::CONDUIT_FILL, nec_ref::RACEWAY_DIMENSIONS, nec_ref::CONDUCTOR_DIMENSIONS])
            .with_reference(&article)
    }

    /// Builder: record a box fill result
    pub fn with_box_fill(mut self, fill: &BoxFillResult) -> Self {
        self.required_volume_in3 = Some(fill.required_volume_in3);
        self.rated_volume_in3 = Some(fill.rated_volume_in3);
        self.unsupported.extend(fill.unsupported.iter().cloned());
        if fill.overfilled {
            self.violations.push(Violation::Overfill {
                enclosure: Enclosure::Box,
                actual: fill.required_volume_in3,
                limit: fill.rated_volume_in3,
            });
        }
        self.with_references([nec_ref::BOX_FILL, nec_ref::BOX_VOLUMES])
    }

    /// Builder: record a load aggregation
    pub fn with_load_summary(mut self, summary: &LoadSummary) -> Self {
        self.diversity_percent = Some(summary.diversity_percent);
        match summary.recommended_ocpd {
            Some(rating) => self.selected = Some(Selection::Breaker(rating)),
            None => self.violations.push(Violation::LoadExceedsStandardOcpd {
                calculated_load: summary.calculated_load,
            }),
        }
        self.with_reference(nec_ref::STANDARD_RATINGS)
            .with_references(summary.nec_references())
    }

    /// Flatten into the export record consumed by report collaborators.
    pub fn to_export_record<I: Serialize>(&self, inputs: &I, settings: &EngineSettings) -> CalcResult<ExportRecord> {
        let mut results = serde_json::to_value(self)?;
        if let Some(map) = results.as_object_mut() {
            map.remove("nec_references");
            map.remove("calculator");
        }
        Ok(ExportRecord {
            calculator_name: self.calculator.clone(),
            code_edition: settings.code.clone(),
            inputs: serde_json::to_value(inputs)?,
            results,
            nec_references: self.nec_references.clone(),
        })
    }
}

/// Flat record for report/export collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub calculator_name: String,
    pub code_edition: String,
    pub inputs: serde_json::Value,
    pub results: serde_json::Value,
    pub nec_references: Vec<String>,
}

/// (usable − load) / load × 100; `None` for a zero load
pub fn margin_percent(usable_ampacity: f64, load_amps: f64) -> Option<f64> {
    (load_amps > 0.0).then(|| (usable_ampacity - load_amps) / load_amps * 100.0)
}

fn conductor_references(evaluation: &SizeEvaluation, request: &SizingRequest<'_>) -> Vec<&'static str> {
    let mut refs = vec![nec_ref::AMPACITY];
    if let Some(a) = &evaluation.ampacity {
        if a.temp_correction != 1.0 {
            refs.push(nec_ref::TEMP_CORRECTION);
        }
        if a.bundling_factor != 1.0 {
            refs.push(nec_ref::BUNDLING);
        }
        if a.termination_limit.is_some() {
            refs.push(nec_ref::TERMINATION);
        }
    }
    if request.ctx.is_continuous {
        refs.push(nec_ref::CONTINUOUS_BRANCH);
    }
    if evaluation.ocpd_limit.is_some() {
        refs.push(nec_ref::SMALL_CONDUCTOR);
    }
    if request.voltage_drop.is_some() {
        refs.push(nec_ref::VOLTAGE_DROP);
        refs.push(nec_ref::CONDUCTOR_PROPERTIES);
    }
    refs
}
