//! Grounding and Bonding Conductor Tables
//!
//! One canonical table per concern:
//! - Table 250.122: equipment grounding conductor (EGC) by OCPD rating
//! - Table 250.66: grounding electrode conductor (GEC) by largest ungrounded
//!   service-entrance conductor

use super::conductors::Material;
use super::sizes::WireSize;

/// (max OCPD rating A, copper EGC, aluminum EGC)
const EGC_TABLE: [(f64, WireSize, WireSize); 19] = [
    (15.0, WireSize::Awg14, WireSize::Awg12),
    (20.0, WireSize::Awg12, WireSize::Awg10),
    (60.0, WireSize::Awg10, WireSize::Awg8),
    (100.0, WireSize::Awg8, WireSize::Awg6),
    (200.0, WireSize::Awg6, WireSize::Awg4),
    (300.0, WireSize::Awg4, WireSize::Awg2),
    (400.0, WireSize::Awg3, WireSize::Awg1),
    (500.0, WireSize::Awg2, WireSize::Awg0),
    (600.0, WireSize::Awg1, WireSize::Awg00),
    (800.0, WireSize::Awg0, WireSize::Awg000),
    (1000.0, WireSize::Awg00, WireSize::Awg0000),
    (1200.0, WireSize::Awg000, WireSize::Kcmil250),
    (1600.0, WireSize::Awg0000, WireSize::Kcmil350),
    (2000.0, WireSize::Kcmil250, WireSize::Kcmil400),
    (2500.0, WireSize::Kcmil350, WireSize::Kcmil600),
    (3000.0, WireSize::Kcmil400, WireSize::Kcmil600),
    (4000.0, WireSize::Kcmil500, WireSize::Kcmil750),
    (5000.0, WireSize::Kcmil700, WireSize::Kcmil1250),
    (6000.0, WireSize::Kcmil800, WireSize::Kcmil1250),
];

/// Minimum equipment grounding conductor for a circuit protected at
/// `ocpd_rating_amps`. `None` above 6000 A or for a non-positive rating.
pub fn equipment_grounding_conductor(material: Material, ocpd_rating_amps: f64) -> Option<WireSize> {
    if ocpd_rating_amps.is_nan() || ocpd_rating_amps <= 0.0 {
        return None;
    }
    EGC_TABLE
        .iter()
        .find(|(max, _, _)| ocpd_rating_amps <= *max)
        .map(|(_, cu, al)| match material {
            Material::Copper => *cu,
            Material::Aluminum => *al,
        })
}

/// Rows of Table 250.66: (largest copper service conductor, largest aluminum
/// service conductor, copper GEC, aluminum GEC). A row applies when the
/// service conductor is at or below the row's size for its material.
const GEC_TABLE: [(WireSize, WireSize, WireSize, WireSize); 7] = [
    (WireSize::Awg2, WireSize::Awg0, WireSize::Awg8, WireSize::Awg6),
    (WireSize::Awg0, WireSize::Awg000, WireSize::Awg6, WireSize::Awg4),
    (WireSize::Awg000, WireSize::Kcmil250, WireSize::Awg4, WireSize::Awg2),
    (WireSize::Kcmil350, WireSize::Kcmil500, WireSize::Awg2, WireSize::Awg0),
    (WireSize::Kcmil600, WireSize::Kcmil900, WireSize::Awg0, WireSize::Awg000),
    (WireSize::Kcmil1000, WireSize::Kcmil1750, WireSize::Awg00, WireSize::Awg0000),
    (WireSize::Kcmil2000, WireSize::Kcmil2000, WireSize::Awg000, WireSize::Kcmil250),
];

/// Minimum grounding electrode conductor per Table 250.66.
///
/// `service_conductor` is the largest ungrounded service-entrance conductor
/// (or equivalent area for parallel sets). Sizes above the last row use the
/// last row.
pub fn grounding_electrode_conductor(
    service_material: Material,
    service_conductor: WireSize,
    gec_material: Material,
) -> WireSize {
    let row = GEC_TABLE
        .iter()
        .find(|(cu_max, al_max, _, _)| match service_material {
            Material::Copper => service_conductor <= *cu_max,
            Material::Aluminum => service_conductor <= *al_max,
        })
        .unwrap_or(&GEC_TABLE[GEC_TABLE.len() - 1]);

    match gec_material {
        Material::Copper => row.2,
        Material::Aluminum => row.3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_egc_sizes() {
        assert_eq!(equipment_grounding_conductor(Material::Copper, 20.0), Some(WireSize::Awg12));
        assert_eq!(equipment_grounding_conductor(Material::Copper, 25.0), Some(WireSize::Awg10));
        assert_eq!(equipment_grounding_conductor(Material::Copper, 100.0), Some(WireSize::Awg8));
        assert_eq!(equipment_grounding_conductor(Material::Aluminum, 200.0), Some(WireSize::Awg4));
        assert_eq!(equipment_grounding_conductor(Material::Copper, 6001.0), None);
        assert_eq!(equipment_grounding_conductor(Material::Copper, 0.0), None);
    }

    #[test]
    fn test_gec_sizes() {
        assert_eq!(
            grounding_electrode_conductor(Material::Copper, WireSize::Awg2, Material::Copper),
            WireSize::Awg8
        );
        assert_eq!(
            grounding_electrode_conductor(Material::Copper, WireSize::Awg0000, Material::Copper),
            WireSize::Awg2
        );
        assert_eq!(
            grounding_electrode_conductor(Material::Aluminum, WireSize::Awg0000, Material::Copper),
            WireSize::Awg4
        );
        assert_eq!(
            grounding_electrode_conductor(Material::Copper, WireSize::Kcmil2000, Material::Aluminum),
            WireSize::Kcmil250
        );
    }
}
