//! # Conductor Size Selection
//!
//! Searches the size ladder, smallest first, for the first conductor that
//! satisfies every active constraint at once:
//!
//! 1. usable ampacity ≥ load current (derating chain, continuous reduction)
//! 2. 240.4(D) small-conductor OCPD limit, where one exists, ≥ the current the
//!    overcurrent device must carry (125% of a continuous load)
//! 3. voltage drop ≤ target, when a target is given
//!
//! Ascending rank order makes the first accepted size the smallest conforming
//! size. When nothing on the ladder qualifies, the outcome carries no size and
//! the failed constraints of the largest size tested.
//!
//! ## Example
//!
//! ```rust
//! use nec_core::derating::DerateContext;
//! use nec_core::sizing::{select_conductor_size, ConductorTemplate, SizingRequest, VoltageDropTarget};
//! use nec_core::tables::{Material, TempRating, WireSize};
//!
//! let request = SizingRequest {
//!     ladder: WireSize::BUILDING_WIRE,
//!     template: ConductorTemplate::new(Material::Copper, TempRating::C75),
//!     ctx: DerateContext { is_continuous: true, ..DerateContext::default() },
//!     load_amps: 20.0,
//!     voltage_drop: Some(VoltageDropTarget::single_phase_percent(100.0, 120.0, 3.0)),
//! };
//!
//! let outcome = select_conductor_size(&request);
//! assert_eq!(outcome.selected_size(), Some(WireSize::Awg8));
//! ```

use serde::{Deserialize, Serialize};

use crate::derating::{derated_ampacity_with_termination, ConductorSpec, DerateContext, DeratedAmpacity};
use crate::tables::{self, Material, TempRating, WireSize};
use crate::units::Volts;

// ============================================================================
// VOLTAGE DROP
// ============================================================================

/// Circuit configuration for the voltage-drop multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CircuitPhase {
    /// Out-and-back path: multiplier 2
    #[default]
    SinglePhase,
    /// Balanced three-phase: multiplier √3
    ThreePhase,
}

impl CircuitPhase {
    /// Path-length multiplier applied to one-way length
    pub fn multiplier(&self) -> f64 {
        match self {
            CircuitPhase::SinglePhase => 2.0,
            CircuitPhase::ThreePhase => 3f64.sqrt(),
        }
    }
}

/// A voltage-drop limit over a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropTarget {
    /// One-way circuit length (ft)
    pub one_way_length_ft: f64,

    /// Maximum allowed drop (V)
    pub max_drop_volts: f64,

    #[serde(default)]
    pub phase: CircuitPhase,
}

impl VoltageDropTarget {
    /// Limit expressed as a percent of the system voltage
    pub fn from_percent(one_way_length_ft: f64, system_voltage: f64, max_percent: f64, phase: CircuitPhase) -> Self {
        VoltageDropTarget {
            one_way_length_ft,
            max_drop_volts: Volts(system_voltage).percent(max_percent).0,
            phase,
        }
    }

    /// Single-phase limit as a percent of system voltage
    pub fn single_phase_percent(one_way_length_ft: f64, system_voltage: f64, max_percent: f64) -> Self {
        Self::from_percent(one_way_length_ft, system_voltage, max_percent, CircuitPhase::SinglePhase)
    }
}

/// Voltage drop in volts: `k × L × R × I / 1000`, with `R` in Ω per 1000 ft.
///
/// `None` when Chapter 9 Table 8 has no resistance for the conductor.
pub fn voltage_drop(
    material: Material,
    size: WireSize,
    one_way_length_ft: f64,
    current_amps: f64,
    phase: CircuitPhase,
) -> Option<f64> {
    let r = tables::resistance_per_1000ft(material, size)?;
    Some(phase.multiplier() * one_way_length_ft * r * current_amps / 1000.0)
}

// ============================================================================
// REQUEST / OUTCOME
// ============================================================================

/// Fixed properties of the conductor being sized; only the size varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConductorTemplate {
    pub material: Material,
    pub temp_rating: TempRating,

    /// Equipment terminal rating (110.14(C)), if lower than the insulation
    #[serde(default)]
    pub termination: Option<TempRating>,
}

impl ConductorTemplate {
    pub fn new(material: Material, temp_rating: TempRating) -> Self {
        Self {
            material,
            temp_rating,
            termination: None,
        }
    }

    /// Cap usable ampacity at a terminal temperature rating
    pub fn with_termination(mut self, termination: TempRating) -> Self {
        self.termination = Some(termination);
        self
    }

    /// Conductor spec at a given size
    pub fn at(&self, size: WireSize) -> ConductorSpec {
        ConductorSpec::new(size, self.material, self.temp_rating)
    }
}

/// A constraint a candidate size can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Constraint {
    /// Usable ampacity below the load current
    Ampacity,
    /// 240.4(D) limit below the load current
    OcpdLimit,
    /// Voltage drop above the target
    VoltageDrop,
    /// A table had no entry for this size (ampacity or resistance)
    UnsupportedSize,
}

impl Constraint {
    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Constraint::Ampacity => "Ampacity",
            Constraint::OcpdLimit => "Small conductor OCPD limit",
            Constraint::VoltageDrop => "Voltage drop",
            Constraint::UnsupportedSize => "Unsupported size",
        }
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Diagnostics for one candidate size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeEvaluation {
    pub size: WireSize,

    /// Derating chain, `None` when Table 310.16 has no entry
    pub ampacity: Option<DeratedAmpacity>,

    /// Ampacity the load was compared against (A)
    pub usable_ampacity: f64,

    /// 240.4(D) limit, `None` when no special limit applies
    pub ocpd_limit: Option<f64>,

    /// Current the overcurrent device must carry, checked against the limit (A)
    pub design_amps: f64,

    /// Computed drop (V), when a voltage-drop target is active
    pub voltage_drop_volts: Option<f64>,

    /// Constraints this size fails; empty means accepted
    pub failed: Vec<Constraint>,
}

impl SizeEvaluation {
    /// True when every active constraint is satisfied
    pub fn accepted(&self) -> bool {
        self.failed.is_empty()
    }

    /// Whether a specific constraint failed
    pub fn fails(&self, constraint: Constraint) -> bool {
        self.failed.contains(&constraint)
    }
}

/// Inputs to the size search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingRequest<'a> {
    /// Candidate sizes (any order; searched ascending by rank)
    pub ladder: &'a [WireSize],
    pub template: ConductorTemplate,
    pub ctx: DerateContext,

    /// Required line current (A)
    pub load_amps: f64,

    pub voltage_drop: Option<VoltageDropTarget>,
}

/// Result of the size search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionOutcome {
    /// The smallest accepted size, if any
    pub selected: Option<SizeEvaluation>,

    /// Every size evaluated, ascending, ending at the selected size or the
    /// largest size on the ladder
    pub evaluated: Vec<SizeEvaluation>,
}

impl SelectionOutcome {
    pub fn selected_size(&self) -> Option<WireSize> {
        self.selected.as_ref().map(|e| e.size)
    }

    /// Constraints failed by the largest size tested (empty when a size was selected)
    pub fn failures_at_largest(&self) -> &[Constraint] {
        if self.selected.is_some() {
            return &[];
        }
        self.evaluated.last().map(|e| e.failed.as_slice()).unwrap_or(&[])
    }
}

// ============================================================================
// SEARCH
// ============================================================================

/// Evaluate one size against every active constraint.
pub fn evaluate_size(
    template: &ConductorTemplate,
    ctx: &DerateContext,
    size: WireSize,
    load_amps: f64,
    voltage_drop_target: Option<&VoltageDropTarget>,
) -> SizeEvaluation {
    let spec = template.at(size);
    let ampacity = derated_ampacity_with_termination(&spec, ctx, template.termination);
    let ocpd_limit = tables::ocpd_limit(template.material, size);
    let design_amps = ctx.design_current(load_amps);
    let mut failed = Vec::new();

    let usable_ampacity = match &ampacity {
        Some(a) => {
            let usable = a.usable_ampacity();
            if usable < load_amps {
                failed.push(Constraint::Ampacity);
            }
            usable
        }
        None => {
            failed.push(Constraint::UnsupportedSize);
            0.0
        }
    };

    if let Some(limit) = ocpd_limit {
        if limit < design_amps {
            failed.push(Constraint::OcpdLimit);
        }
    }

    let voltage_drop_volts = voltage_drop_target.and_then(|target| {
        let vd = voltage_drop(template.material, size, target.one_way_length_ft, load_amps, target.phase);
        match vd {
            Some(v) if v > target.max_drop_volts => failed.push(Constraint::VoltageDrop),
            Some(_) => {}
            None if !failed.contains(&Constraint::UnsupportedSize) => failed.push(Constraint::UnsupportedSize),
            None => {}
        }
        vd
    });

    SizeEvaluation {
        size,
        ampacity,
        usable_ampacity,
        ocpd_limit,
        design_amps,
        voltage_drop_volts,
        failed,
    }
}

/// Find the smallest size on the ladder that satisfies every constraint.
pub fn select_conductor_size(request: &SizingRequest<'_>) -> SelectionOutcome {
    let mut ladder = request.ladder.to_vec();
    ladder.sort();
    ladder.dedup();

    let mut evaluated = Vec::with_capacity(ladder.len());
    for size in ladder {
        let evaluation = evaluate_size(
            &request.template,
            &request.ctx,
            size,
            request.load_amps,
            request.voltage_drop.as_ref(),
        );
        tracing::trace!(
            size = %evaluation.size,
            usable_ampacity = evaluation.usable_ampacity,
            voltage_drop = ?evaluation.voltage_drop_volts,
            failed = ?evaluation.failed,
            "evaluated conductor size"
        );
        let accepted = evaluation.accepted();
        evaluated.push(evaluation);
        if accepted {
            let selected = evaluated.last().cloned();
            tracing::debug!(size = %size, load_amps = request.load_amps, "selected conductor size");
            return SelectionOutcome { selected, evaluated };
        }
    }

    tracing::debug!(
        load_amps = request.load_amps,
        failed = ?evaluated.last().map(|e| &e.failed),
        "no conforming conductor size on ladder"
    );
    SelectionOutcome {
        selected: None,
        evaluated,
    }
}

// ============================================================================
// GROUNDING
// ============================================================================

/// Equipment grounding conductor per Table 250.122, increased in proportion
/// to circular-mil area when the ungrounded conductors were upsized beyond the
/// ampacity minimum (250.122(B)). Never larger than the ungrounded conductor.
pub fn size_equipment_ground(
    material: Material,
    ocpd_rating_amps: f64,
    minimum_ungrounded: WireSize,
    installed_ungrounded: WireSize,
) -> Option<WireSize> {
    let table_size = tables::equipment_grounding_conductor(material, ocpd_rating_amps)?;
    if installed_ungrounded <= minimum_ungrounded {
        return Some(table_size.min(installed_ungrounded));
    }

    let ratio = tables::circular_mils(installed_ungrounded) / tables::circular_mils(minimum_ungrounded);
    let required_cmil = tables::circular_mils(table_size) * ratio;
    let upsized = WireSize::ALL
        .iter()
        .copied()
        .find(|size| tables::circular_mils(*size) >= required_cmil)
        .unwrap_or(WireSize::Kcmil2000);

    Some(upsized.max(table_size).min(installed_ungrounded))
}

/// Grounding electrode conductor per Table 250.66
pub fn size_grounding_electrode(
    service_material: Material,
    service_conductor: WireSize,
    gec_material: Material,
) -> WireSize {
    tables::grounding_electrode_conductor(service_material, service_conductor, gec_material)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cu75_request(load_amps: f64, continuous: bool, vd: Option<VoltageDropTarget>) -> SizingRequest<'static> {
        SizingRequest {
            ladder: WireSize::BUILDING_WIRE,
            template: ConductorTemplate::new(Material::Copper, TempRating::C75),
            ctx: DerateContext {
                is_continuous: continuous,
                ..DerateContext::default()
            },
            load_amps,
            voltage_drop: vd,
        }
    }

    #[test]
    fn test_voltage_drop_formula() {
        // 2 × 100 ft × 1.24 Ω/kft × 20 A / 1000
        let vd = voltage_drop(Material::Copper, WireSize::Awg10, 100.0, 20.0, CircuitPhase::SinglePhase).unwrap();
        assert!((vd - 4.96).abs() < 1e-9);
        let vd3 = voltage_drop(Material::Copper, WireSize::Awg10, 100.0, 20.0, CircuitPhase::ThreePhase).unwrap();
        assert!((vd3 - 3f64.sqrt() * 2.48).abs() < 1e-9);
    }

    #[test]
    fn test_ampacity_only_selection() {
        // 30 A non-continuous: 12 AWG (25 A) fails, 10 AWG (35 A, 240.4(D) 30 A) passes.
        let outcome = select_conductor_size(&cu75_request(30.0, false, None));
        assert_eq!(outcome.selected_size(), Some(WireSize::Awg10));
        assert!(outcome.evaluated[1].fails(Constraint::Ampacity));
    }

    #[test]
    fn test_small_conductor_limit_governs() {
        // 16 A continuous on 90 °C copper: 14 AWG usable 20 A but 240.4(D) caps at 15 A.
        let request = SizingRequest {
            template: ConductorTemplate::new(Material::Copper, TempRating::C90),
            ..cu75_request(16.0, true, None)
        };
        let outcome = select_conductor_size(&request);
        let first = &outcome.evaluated[0];
        assert_eq!(first.size, WireSize::Awg14);
        assert!(!first.fails(Constraint::Ampacity));
        assert!(first.fails(Constraint::OcpdLimit));
        assert_eq!(outcome.selected_size(), Some(WireSize::Awg12));
    }

    #[test]
    fn test_continuous_load_checks_limit_at_design_current() {
        // 20 A continuous: 12 AWG carries 20 A but 240.4(D) allows only a 20 A device, not 25 A
        let outcome = select_conductor_size(&cu75_request(20.0, true, None));
        let twelve = outcome.evaluated.iter().find(|e| e.size == WireSize::Awg12).unwrap();
        assert_eq!(twelve.design_amps, 25.0);
        assert_eq!(twelve.failed, vec![Constraint::OcpdLimit]);
        assert_eq!(outcome.selected_size(), Some(WireSize::Awg10));
    }

    #[test]
    fn test_termination_cap_rejects_smaller_size() {
        let request = SizingRequest {
            template: ConductorTemplate::new(Material::Copper, TempRating::C90).with_termination(TempRating::C75),
            ..cu75_request(70.0, false, None)
        };
        let outcome = select_conductor_size(&request);
        let six = outcome.evaluated.iter().find(|e| e.size == WireSize::Awg6).unwrap();
        assert!(six.fails(Constraint::Ampacity));
        assert_eq!(outcome.selected_size(), Some(WireSize::Awg4));

        let uncapped = SizingRequest {
            template: ConductorTemplate::new(Material::Copper, TempRating::C90),
            ..request
        };
        assert_eq!(select_conductor_size(&uncapped).selected_size(), Some(WireSize::Awg6));
    }

    #[test]
    fn test_voltage_drop_forces_upsize() {
        let vd = VoltageDropTarget::single_phase_percent(100.0, 120.0, 3.0);
        let outcome = select_conductor_size(&cu75_request(20.0, true, Some(vd)));
        assert_eq!(outcome.selected_size(), Some(WireSize::Awg8));
        let ten = outcome.evaluated.iter().find(|e| e.size == WireSize::Awg10).unwrap();
        assert_eq!(ten.failed, vec![Constraint::VoltageDrop]);
    }

    #[test]
    fn test_no_conforming_size_reports_largest() {
        let outcome = select_conductor_size(&cu75_request(2000.0, false, None));
        assert_eq!(outcome.selected_size(), None);
        assert_eq!(outcome.evaluated.last().unwrap().size, WireSize::Kcmil2000);
        assert_eq!(outcome.failures_at_largest(), &[Constraint::Ampacity]);
    }

    #[test]
    fn test_unsorted_ladder_is_searched_ascending() {
        let ladder = [WireSize::Awg4, WireSize::Awg14, WireSize::Awg10, WireSize::Awg14];
        let request = SizingRequest {
            ladder: &ladder,
            ..cu75_request(12.0, false, None)
        };
        let outcome = select_conductor_size(&request);
        assert_eq!(outcome.selected_size(), Some(WireSize::Awg14));
        assert_eq!(outcome.evaluated.len(), 1);
    }

    #[test]
    fn test_unsupported_size_is_skipped() {
        let request = SizingRequest {
            ladder: &WireSize::ALL,
            template: ConductorTemplate::new(Material::Aluminum, TempRating::C75),
            ..cu75_request(15.0, false, None)
        };
        let outcome = select_conductor_size(&request);
        assert!(outcome.evaluated[0].fails(Constraint::UnsupportedSize));
        assert_eq!(outcome.selected_size(), Some(WireSize::Awg12));
    }

    #[test]
    fn test_three_phase_drop_is_lower() {
        let single = VoltageDropTarget::single_phase_percent(250.0, 480.0, 3.0);
        let three = VoltageDropTarget::from_percent(250.0, 480.0, 3.0, CircuitPhase::ThreePhase);
        let a = select_conductor_size(&cu75_request(100.0, false, Some(single)));
        let b = select_conductor_size(&cu75_request(100.0, false, Some(three)));
        assert!(b.selected_size().unwrap() <= a.selected_size().unwrap());
    }

    #[test]
    fn test_equipment_ground_proportional_upsize() {
        // 20 A circuit upsized from 12 AWG to 8 AWG for voltage drop:
        // 6530 cmil × (16510 / 6530) = 16510 cmil → 8 AWG EGC.
        let egc = size_equipment_ground(Material::Copper, 20.0, WireSize::Awg12, WireSize::Awg8);
        assert_eq!(egc, Some(WireSize::Awg8));

        let egc = size_equipment_ground(Material::Copper, 20.0, WireSize::Awg12, WireSize::Awg12);
        assert_eq!(egc, Some(WireSize::Awg12));

        // 100 A feeder, 3 AWG minimum upsized to 1/0: 16510 × 105600/52620 ≈ 33133 → 4 AWG.
        let egc = size_equipment_ground(Material::Copper, 100.0, WireSize::Awg3, WireSize::Awg0);
        assert_eq!(egc, Some(WireSize::Awg4));
    }

    #[test]
    fn test_grounding_electrode() {
        assert_eq!(
            size_grounding_electrode(Material::Copper, WireSize::Awg0000, Material::Copper),
            WireSize::Awg2
        );
    }
}
