//! # Raceway and Box Fill
//!
//! ## Conduit fill (Chapter 9 Table 1)
//!
//! ```text
//! fill % = Σ(area_i × count_i) / raceway area × 100
//! ```
//!
//! | Conductors | Max fill |
//! |------------|----------|
//! | 1          | 53%      |
//! | 2          | 31%      |
//! | over 2     | 40%      |
//!
//! ## Box fill (314.16(B))
//!
//! | Item                         | Allowance                          |
//! |------------------------------|------------------------------------|
//! | Each conductor               | 1 × unit volume of its size        |
//! | Each device or yoke          | 2 × unit volume of largest         |
//! | All equipment grounds        | 1 × unit volume of largest (once)  |
//! | Internal cable clamps        | 1 × unit volume of largest (once)  |
//! | Each support fitting         | 1 × unit volume of largest         |
//!
//! Table entries that do not exist contribute zero and are listed in the
//! result's `unsupported` field rather than failing the calculation.

use serde::{Deserialize, Serialize};

use crate::tables::{self, InsulationFamily, Material, RacewayType, StandardBox, TradeSize, WireSize};

/// Max fill for a single conductor (%)
pub const FILL_ONE_CONDUCTOR: f64 = 53.0;
/// Max fill for two conductors (%)
pub const FILL_TWO_CONDUCTORS: f64 = 31.0;
/// Max fill for more than two conductors (%)
pub const FILL_OVER_TWO_CONDUCTORS: f64 = 40.0;

/// Chapter 9 Table 1 limit for a total conductor count.
///
/// Zero conductors fall into the "over 2" column; nothing can overfill.
pub fn max_fill_percent(conductor_count: u32) -> f64 {
    match conductor_count {
        1 => FILL_ONE_CONDUCTOR,
        2 => FILL_TWO_CONDUCTORS,
        _ => FILL_OVER_TWO_CONDUCTORS,
    }
}

// ============================================================================
// CONDUIT FILL
// ============================================================================

/// An insulated conductor as it occupies a raceway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireSpec {
    #[serde(default)]
    pub material: Material,
    /// `None` until resolved against the engine default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insulation: Option<InsulationFamily>,
    pub size: WireSize,
}

impl WireSpec {
    /// Table 5 area (in²); the area does not depend on material.
    /// `None` when the insulation is unresolved or Table 5 has no entry.
    pub fn area_in2(&self) -> Option<f64> {
        self.insulation.and_then(|insulation| tables::wire_area(insulation, self.size))
    }

    /// Fill in the insulation family when the caller left it out
    pub fn with_default_insulation(self, insulation: InsulationFamily) -> Self {
        Self {
            insulation: self.insulation.or(Some(insulation)),
            ..self
        }
    }

    fn key(&self) -> String {
        match self.insulation {
            Some(insulation) => format!("{} {}", self.size, insulation),
            None => format!("{} (insulation unspecified)", self.size),
        }
    }
}

/// A raceway type at a trade size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RacewaySpec {
    pub raceway_type: RacewayType,
    pub trade_size: TradeSize,
}

impl RacewaySpec {
    pub fn new(raceway_type: RacewayType, trade_size: TradeSize) -> Self {
        Self {
            raceway_type,
            trade_size,
        }
    }

    /// Table 4 total area (in²)
    pub fn area_in2(&self) -> Option<f64> {
        tables::raceway_area(self.raceway_type, self.trade_size)
    }
}

impl std::fmt::Display for RacewaySpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.trade_size, self.raceway_type)
    }
}

/// A group of identical conductors in a raceway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConduitOccupant {
    pub wire: WireSpec,
    pub count: u32,
}

/// Conduit fill result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConduitFillResult {
    pub raceway: RacewaySpec,

    /// Raceway total internal area (in²), 0.0 when unknown
    pub raceway_area_in2: f64,

    /// Sum of conductor areas (in²)
    pub conductor_area_in2: f64,

    /// Total number of conductors
    pub conductor_count: u32,

    pub fill_percent: f64,
    pub max_fill_percent: f64,
    pub overfilled: bool,

    /// Table keys with no entry; each contributed zero
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unsupported: Vec<String>,
}

/// Compute conduit fill for a set of occupants.
pub fn conduit_fill(raceway: &RacewaySpec, occupants: &[ConduitOccupant]) -> ConduitFillResult {
    let mut unsupported = Vec::new();

    let raceway_area = raceway.area_in2().unwrap_or_else(|| {
        unsupported.push(format!("raceway {}", raceway));
        0.0
    });

    let mut conductor_area = 0.0;
    let mut conductor_count = 0u32;
    for occupant in occupants {
        conductor_count = conductor_count.saturating_add(occupant.count);
        match occupant.wire.area_in2() {
            Some(area) => conductor_area += area * occupant.count as f64,
            None => unsupported.push(format!("wire {}", occupant.wire.key())),
        }
    }

    let fill_percent = if raceway_area > 0.0 {
        conductor_area / raceway_area * 100.0
    } else {
        0.0
    };
    let max_fill = max_fill_percent(conductor_count);

    if !unsupported.is_empty() {
        tracing::warn!(?unsupported, "conduit fill computed with missing table entries");
    }
    tracing::debug!(
        raceway = %raceway,
        conductor_count,
        fill_percent,
        max_fill,
        "conduit fill"
    );

    ConduitFillResult {
        raceway: *raceway,
        raceway_area_in2: raceway_area,
        conductor_area_in2: conductor_area,
        conductor_count,
        fill_percent,
        max_fill_percent: max_fill,
        overfilled: fill_percent > max_fill,
        unsupported,
    }
}

/// Smallest trade size of a raceway type whose fill stays within the limit.
///
/// `None` when even the largest manufactured size overfills.
pub fn minimum_raceway_size(raceway_type: RacewayType, occupants: &[ConduitOccupant]) -> Option<ConduitFillResult> {
    tables::available_trade_sizes(raceway_type)
        .into_iter()
        .map(|size| conduit_fill(&RacewaySpec::new(raceway_type, size), occupants))
        .find(|result| !result.overfilled)
}

// ============================================================================
// BOX FILL
// ============================================================================

/// Box volume: a rated value or a catalogue box from Table 314.16(A).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxVolume {
    /// Marked or calculated volume (in³)
    RatedIn3(f64),
    /// Standard metal box
    Standard(StandardBox),
}

impl BoxVolume {
    pub fn volume_in3(&self) -> f64 {
        match self {
            BoxVolume::RatedIn3(v) => *v,
            BoxVolume::Standard(b) => b.volume_in3(),
        }
    }
}

/// Conductors of one size entering the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxConductor {
    pub size: WireSize,
    pub count: u32,
}

/// Box contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxFillRequest {
    pub volume: BoxVolume,
    pub conductors: Vec<BoxConductor>,

    /// Devices or yokes (each counts double)
    #[serde(default)]
    pub devices: u32,

    /// One or more equipment grounding conductors present
    #[serde(default)]
    pub has_equipment_ground: bool,

    /// One or more internal cable clamps present
    #[serde(default)]
    pub has_internal_clamp: bool,

    /// Fixture studs or hickeys
    #[serde(default)]
    pub support_fittings: u32,
}

/// Box fill result with each allowance broken out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxFillResult {
    pub conductor_volume_in3: f64,
    pub device_volume_in3: f64,
    pub grounding_volume_in3: f64,
    pub clamp_volume_in3: f64,
    pub fitting_volume_in3: f64,

    /// Sum of every allowance
    pub required_volume_in3: f64,

    pub rated_volume_in3: f64,

    /// Largest conductor in the box, basis for the single/double allowances
    pub largest_conductor: Option<WireSize>,

    pub overfilled: bool,

    /// Smallest catalogue box that would hold the required volume
    pub smallest_standard_box: Option<StandardBox>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unsupported: Vec<String>,
}

/// Compute box fill per 314.16(B).
pub fn box_fill(request: &BoxFillRequest) -> BoxFillResult {
    let mut unsupported = Vec::new();

    let mut conductor_volume = 0.0;
    for c in &request.conductors {
        match tables::box_fill_unit_volume(c.size) {
            Some(unit) => conductor_volume += unit * c.count as f64,
            None => unsupported.push(format!("box fill allowance {}", c.size)),
        }
    }

    let largest_conductor = request
        .conductors
        .iter()
        .filter(|c| c.count > 0)
        .map(|c| c.size)
        .max();
    let allowances_requested = request.devices > 0
        || request.has_equipment_ground
        || request.has_internal_clamp
        || request.support_fittings > 0;
    let largest_unit = match largest_conductor.map(|size| (size, tables::box_fill_unit_volume(size))) {
        Some((_, Some(unit))) => unit,
        Some((size, None)) => {
            if allowances_requested {
                unsupported.push(format!("allowance basis {}", size));
            }
            0.0
        }
        None => 0.0,
    };

    let device_volume = 2.0 * largest_unit * request.devices as f64;
    let grounding_volume = if request.has_equipment_ground { largest_unit } else { 0.0 };
    let clamp_volume = if request.has_internal_clamp { largest_unit } else { 0.0 };
    let fitting_volume = largest_unit * request.support_fittings as f64;

    let required = conductor_volume + device_volume + grounding_volume + clamp_volume + fitting_volume;
    let rated = request.volume.volume_in3();

    if !unsupported.is_empty() {
        tracing::warn!(?unsupported, "box fill computed with missing table entries");
    }
    tracing::debug!(required, rated, "box fill");

    BoxFillResult {
        conductor_volume_in3: conductor_volume,
        device_volume_in3: device_volume,
        grounding_volume_in3: grounding_volume,
        clamp_volume_in3: clamp_volume,
        fitting_volume_in3: fitting_volume,
        required_volume_in3: required,
        rated_volume_in3: rated,
        largest_conductor,
        overfilled: required > rated,
        smallest_standard_box: StandardBox::smallest_for(required),
        unsupported,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thhn(size: WireSize, count: u32) -> ConduitOccupant {
        ConduitOccupant {
            wire: WireSpec {
                material: Material::Copper,
                insulation: Some(InsulationFamily::Thhn),
                size,
            },
            count,
        }
    }

    fn half_inch_emt() -> RacewaySpec {
        RacewaySpec::new(RacewayType::Emt, TradeSize::Half)
    }

    #[test]
    fn test_max_fill_step() {
        assert_eq!(max_fill_percent(0), 40.0);
        assert_eq!(max_fill_percent(1), 53.0);
        assert_eq!(max_fill_percent(2), 31.0);
        assert_eq!(max_fill_percent(3), 40.0);
        assert_eq!(max_fill_percent(40), 40.0);
    }

    #[test]
    fn test_three_conductors() {
        let result = conduit_fill(&half_inch_emt(), &[thhn(WireSize::Awg12, 3)]);
        assert!((result.conductor_area_in2 - 0.0399).abs() < 1e-9);
        assert!((result.fill_percent - 0.0399 / 0.304 * 100.0).abs() < 1e-9);
        assert!(!result.overfilled);
    }

    #[test]
    fn test_two_to_three_boundary() {
        // 2 × 6 AWG: 0.1014 / 0.304 = 33.4% > 31%
        let two = conduit_fill(&half_inch_emt(), &[thhn(WireSize::Awg6, 2)]);
        assert_eq!(two.max_fill_percent, 31.0);
        assert!(two.overfilled);

        // Adding a 14 AWG moves to the 40% column: 36.5%
        let three = conduit_fill(&half_inch_emt(), &[thhn(WireSize::Awg6, 2), thhn(WireSize::Awg14, 1)]);
        assert_eq!(three.conductor_count, 3);
        assert_eq!(three.max_fill_percent, 40.0);
        assert!(three.fill_percent > 31.0);
        assert!(!three.overfilled);
    }

    #[test]
    fn test_single_conductor() {
        let ok = conduit_fill(&half_inch_emt(), &[thhn(WireSize::Awg1, 1)]);
        assert_eq!(ok.max_fill_percent, 53.0);
        assert!(!ok.overfilled);
        let over = conduit_fill(&half_inch_emt(), &[thhn(WireSize::Awg0, 1)]);
        assert!(over.overfilled);
    }

    #[test]
    fn test_empty_conduit() {
        let result = conduit_fill(&half_inch_emt(), &[]);
        assert_eq!(result.fill_percent, 0.0);
        assert_eq!(result.max_fill_percent, 40.0);
        assert!(!result.overfilled);
        assert!(result.unsupported.is_empty());
    }

    #[test]
    fn test_unsupported_keys_contribute_zero() {
        let result = conduit_fill(
            &RacewaySpec::new(RacewayType::Emt, TradeSize::Five),
            &[thhn(WireSize::Awg18, 2)],
        );
        assert_eq!(result.unsupported.len(), 2);
        assert_eq!(result.fill_percent, 0.0);
        assert_eq!(result.conductor_count, 2);
    }

    #[test]
    fn test_huge_counts_saturate() {
        let result = conduit_fill(
            &half_inch_emt(),
            &[thhn(WireSize::Awg12, u32::MAX), thhn(WireSize::Awg12, u32::MAX)],
        );
        assert_eq!(result.conductor_count, u32::MAX);
        assert_eq!(result.max_fill_percent, 40.0);
        assert!(result.overfilled);
    }

    #[test]
    fn test_unresolved_insulation_is_unsupported() {
        let bare = ConduitOccupant {
            wire: WireSpec {
                material: Material::Copper,
                insulation: None,
                size: WireSize::Awg12,
            },
            count: 3,
        };
        let result = conduit_fill(&half_inch_emt(), &[bare]);
        assert_eq!(result.unsupported, vec!["wire 12 AWG (insulation unspecified)".to_string()]);

        let resolved = ConduitOccupant {
            wire: bare.wire.with_default_insulation(InsulationFamily::Thhn),
            ..bare
        };
        let result = conduit_fill(&half_inch_emt(), &[resolved]);
        assert!(result.unsupported.is_empty());
        assert!((result.conductor_area_in2 - 0.0399).abs() < 1e-9);
    }

    #[test]
    fn test_minimum_raceway_size() {
        // 4 × 6 AWG = 0.2028 in²; 1/2" = 66.7%, 3/4" = 38.0%
        let result = minimum_raceway_size(RacewayType::Emt, &[thhn(WireSize::Awg6, 4)]).unwrap();
        assert_eq!(result.raceway.trade_size, TradeSize::ThreeQuarter);
        assert!(!result.overfilled);
    }

    #[test]
    fn test_minimum_raceway_size_none() {
        assert!(minimum_raceway_size(RacewayType::Emt, &[thhn(WireSize::Kcmil1000, 12)]).is_none());
    }

    #[test]
    fn test_box_fill_overfill() {
        // 6 × 2.25 + 2 × 2.25 + 2.25 = 20.25 > 18.0
        let request = BoxFillRequest {
            volume: BoxVolume::RatedIn3(18.0),
            conductors: vec![BoxConductor {
                size: WireSize::Awg12,
                count: 6,
            }],
            devices: 1,
            has_equipment_ground: true,
            has_internal_clamp: false,
            support_fittings: 0,
        };
        let result = box_fill(&request);
        assert!((result.required_volume_in3 - 20.25).abs() < 1e-9);
        assert!(result.overfilled);
        assert_eq!(result.smallest_standard_box, Some(StandardBox::Square4x1_5));
    }

    #[test]
    fn test_box_fill_uses_largest_conductor() {
        let request = BoxFillRequest {
            volume: BoxVolume::Standard(StandardBox::Square4x2_125),
            conductors: vec![
                BoxConductor {
                    size: WireSize::Awg14,
                    count: 4,
                },
                BoxConductor {
                    size: WireSize::Awg10,
                    count: 2,
                },
            ],
            devices: 1,
            has_equipment_ground: true,
            has_internal_clamp: true,
            support_fittings: 1,
        };
        let result = box_fill(&request);
        assert_eq!(result.largest_conductor, Some(WireSize::Awg10));
        // 4×2.0 + 2×2.5 + 5.0 + 2.5 + 2.5 + 2.5
        assert!((result.required_volume_in3 - 25.5).abs() < 1e-9);
        assert_eq!(result.rated_volume_in3, 30.3);
        assert!(!result.overfilled);
    }

    #[test]
    fn test_box_fill_large_conductor_unsupported() {
        let request = BoxFillRequest {
            volume: BoxVolume::RatedIn3(50.0),
            conductors: vec![BoxConductor {
                size: WireSize::Awg4,
                count: 3,
            }],
            devices: 0,
            has_equipment_ground: false,
            has_internal_clamp: false,
            support_fittings: 0,
        };
        let result = box_fill(&request);
        assert_eq!(result.required_volume_in3, 0.0);
        assert_eq!(result.unsupported.len(), 1);
    }

    #[test]
    fn test_box_fill_unsupported_allowance_basis_is_listed() {
        let request = BoxFillRequest {
            volume: BoxVolume::RatedIn3(50.0),
            conductors: vec![
                BoxConductor {
                    size: WireSize::Awg4,
                    count: 3,
                },
                BoxConductor {
                    size: WireSize::Awg12,
                    count: 2,
                },
            ],
            devices: 1,
            has_equipment_ground: true,
            has_internal_clamp: false,
            support_fittings: 0,
        };
        let result = box_fill(&request);
        assert_eq!(result.largest_conductor, Some(WireSize::Awg4));
        assert_eq!(result.device_volume_in3, 0.0);
        assert!((result.required_volume_in3 - 4.5).abs() < 1e-9);
        assert_eq!(
            result.unsupported,
            vec!["box fill allowance 4 AWG".to_string(), "allowance basis 4 AWG".to_string()]
        );
    }

    #[test]
    fn test_box_volume_json() {
        let v: BoxVolume = serde_json::from_str(r#"{ "rated_in3": 18.0 }"#).unwrap();
        assert_eq!(v.volume_in3(), 18.0);
        let v: BoxVolume = serde_json::from_str(r#"{ "standard": "Device3x2x3_5" }"#).unwrap();
        assert_eq!(v.volume_in3(), 18.0);
    }
}
