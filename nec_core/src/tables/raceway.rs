//! Raceway and Insulated Conductor Areas
//!
//! - Chapter 9 Table 4: total internal area (100%) per raceway type and trade size
//! - Chapter 9 Table 5: approximate area of insulated conductors

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::sizes::{TradeSize, WireSize};

/// Raceway type (Chapter 9 Table 4 article)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RacewayType {
    /// Electrical metallic tubing (Article 358)
    #[default]
    Emt,
    /// Intermediate metal conduit (Article 342)
    Imc,
    /// Rigid metal conduit (Article 344)
    Rmc,
    /// Rigid PVC conduit, Schedule 40 (Article 352)
    PvcSch40,
    /// Rigid PVC conduit, Schedule 80 (Article 352)
    PvcSch80,
    /// Flexible metal conduit (Article 348)
    Fmc,
}

impl RacewayType {
    pub const ALL: [RacewayType; 6] = [
        RacewayType::Emt,
        RacewayType::Imc,
        RacewayType::Rmc,
        RacewayType::PvcSch40,
        RacewayType::PvcSch80,
        RacewayType::Fmc,
    ];

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            RacewayType::Emt => "EMT",
            RacewayType::Imc => "IMC",
            RacewayType::Rmc => "RMC",
            RacewayType::PvcSch40 => "PVC Schedule 40",
            RacewayType::PvcSch80 => "PVC Schedule 80",
            RacewayType::Fmc => "FMC",
        }
    }

    /// Governing NEC article
    pub fn article(&self) -> &'static str {
        match self {
            RacewayType::Emt => "358",
            RacewayType::Imc => "342",
            RacewayType::Rmc => "344",
            RacewayType::PvcSch40 | RacewayType::PvcSch80 => "352",
            RacewayType::Fmc => "348",
        }
    }
}

impl std::fmt::Display for RacewayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Insulation family (Chapter 9 Table 5 row group)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InsulationFamily {
    /// THHN, THWN, THWN-2
    #[default]
    Thhn,
    /// XHHW, XHHW-2, XHH
    Xhhw,
    /// THW, THW-2, THHW, RHH/RHW without outer cover
    Thw,
    /// TW
    Tw,
}

impl InsulationFamily {
    pub const ALL: [InsulationFamily; 4] = [
        InsulationFamily::Thhn,
        InsulationFamily::Xhhw,
        InsulationFamily::Thw,
        InsulationFamily::Tw,
    ];

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            InsulationFamily::Thhn => "THHN/THWN-2",
            InsulationFamily::Xhhw => "XHHW-2",
            InsulationFamily::Thw => "THW/THW-2",
            InsulationFamily::Tw => "TW",
        }
    }
}

impl std::fmt::Display for InsulationFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// CHAPTER 9 TABLE 4
// ============================================================================

use TradeSize::*;

const EMT: &[(TradeSize, f64)] = &[
    (Half, 0.304),
    (ThreeQuarter, 0.533),
    (One, 0.864),
    (OneAndQuarter, 1.496),
    (OneAndHalf, 2.036),
    (Two, 3.356),
    (TwoAndHalf, 5.858),
    (Three, 8.846),
    (ThreeAndHalf, 11.545),
    (Four, 14.753),
];

const IMC: &[(TradeSize, f64)] = &[
    (Half, 0.342),
    (ThreeQuarter, 0.586),
    (One, 0.959),
    (OneAndQuarter, 1.647),
    (OneAndHalf, 2.225),
    (Two, 3.630),
    (TwoAndHalf, 5.135),
    (Three, 7.922),
    (ThreeAndHalf, 10.584),
    (Four, 13.631),
];

const RMC: &[(TradeSize, f64)] = &[
    (Half, 0.314),
    (ThreeQuarter, 0.549),
    (One, 0.887),
    (OneAndQuarter, 1.526),
    (OneAndHalf, 2.071),
    (Two, 3.408),
    (TwoAndHalf, 4.866),
    (Three, 7.499),
    (ThreeAndHalf, 10.010),
    (Four, 12.882),
    (Five, 20.212),
    (Six, 29.158),
];

const PVC_40: &[(TradeSize, f64)] = &[
    (Half, 0.285),
    (ThreeQuarter, 0.508),
    (One, 0.832),
    (OneAndQuarter, 1.453),
    (OneAndHalf, 1.986),
    (Two, 3.291),
    (TwoAndHalf, 4.695),
    (Three, 7.268),
    (ThreeAndHalf, 9.737),
    (Four, 12.554),
    (Five, 19.761),
    (Six, 28.567),
];

const PVC_80: &[(TradeSize, f64)] = &[
    (Half, 0.217),
    (ThreeQuarter, 0.409),
    (One, 0.688),
    (OneAndQuarter, 1.237),
    (OneAndHalf, 1.711),
    (Two, 2.874),
    (TwoAndHalf, 4.119),
    (Three, 6.442),
    (ThreeAndHalf, 8.688),
    (Four, 11.258),
    (Five, 17.855),
    (Six, 25.598),
];

const FMC: &[(TradeSize, f64)] = &[
    (Half, 0.317),
    (ThreeQuarter, 0.533),
    (One, 0.817),
    (OneAndQuarter, 1.277),
    (OneAndHalf, 1.858),
    (Two, 3.269),
    (TwoAndHalf, 5.107),
    (Three, 7.548),
    (ThreeAndHalf, 10.116),
    (Four, 12.967),
];

static RACEWAY_AREA: Lazy<HashMap<(RacewayType, TradeSize), f64>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for (raceway, rows) in [
        (RacewayType::Emt, EMT),
        (RacewayType::Imc, IMC),
        (RacewayType::Rmc, RMC),
        (RacewayType::PvcSch40, PVC_40),
        (RacewayType::PvcSch80, PVC_80),
        (RacewayType::Fmc, FMC),
    ] {
        for (size, area) in rows {
            map.insert((raceway, *size), *area);
        }
    }
    map
});

/// Total (100%) internal area in square inches. `None` where the raceway is
/// not manufactured in that trade size (e.g., EMT 5").
pub fn raceway_area(raceway: RacewayType, size: TradeSize) -> Option<f64> {
    RACEWAY_AREA.get(&(raceway, size)).copied()
}

/// Trade sizes available for a raceway type, ascending
pub fn available_trade_sizes(raceway: RacewayType) -> Vec<TradeSize> {
    TradeSize::ALL
        .iter()
        .copied()
        .filter(|size| raceway_area(raceway, *size).is_some())
        .collect()
}

// ============================================================================
// CHAPTER 9 TABLE 5
// ============================================================================

/// (size, [THHN, XHHW, THW, TW]) approximate area in²
const WIRE_AREA: [(WireSize, [Option<f64>; 4]); 26] = [
    (WireSize::Awg14, [Some(0.0097), Some(0.0139), Some(0.0209), Some(0.0139)]),
    (WireSize::Awg12, [Some(0.0133), Some(0.0181), Some(0.0260), Some(0.0181)]),
    (WireSize::Awg10, [Some(0.0211), Some(0.0243), Some(0.0333), Some(0.0243)]),
    (WireSize::Awg8, [Some(0.0366), Some(0.0437), Some(0.0556), Some(0.0437)]),
    (WireSize::Awg6, [Some(0.0507), Some(0.0590), Some(0.0726), Some(0.0726)]),
    (WireSize::Awg4, [Some(0.0824), Some(0.0814), Some(0.0973), Some(0.0973)]),
    (WireSize::Awg3, [Some(0.0973), Some(0.0962), Some(0.1134), Some(0.1134)]),
    (WireSize::Awg2, [Some(0.1158), Some(0.1146), Some(0.1333), Some(0.1333)]),
    (WireSize::Awg1, [Some(0.1562), Some(0.1534), Some(0.1901), Some(0.1901)]),
    (WireSize::Awg0, [Some(0.1855), Some(0.1825), Some(0.2223), Some(0.2223)]),
    (WireSize::Awg00, [Some(0.2223), Some(0.2190), Some(0.2624), Some(0.2624)]),
    (WireSize::Awg000, [Some(0.2679), Some(0.2642), Some(0.3117), Some(0.3117)]),
    (WireSize::Awg0000, [Some(0.3237), Some(0.3197), Some(0.3718), Some(0.3718)]),
    (WireSize::Kcmil250, [Some(0.3970), Some(0.3904), Some(0.4596), Some(0.4596)]),
    (WireSize::Kcmil300, [Some(0.4608), Some(0.4536), Some(0.5281), Some(0.5281)]),
    (WireSize::Kcmil350, [Some(0.5242), Some(0.5166), Some(0.5958), Some(0.5958)]),
    (WireSize::Kcmil400, [Some(0.5863), Some(0.5782), Some(0.6619), Some(0.6619)]),
    (WireSize::Kcmil500, [Some(0.7073), Some(0.6984), Some(0.7901), Some(0.7901)]),
    (WireSize::Kcmil600, [Some(0.8676), Some(0.8709), Some(0.9729), Some(0.9729)]),
    (WireSize::Kcmil700, [Some(0.9887), Some(0.9923), Some(1.1010), Some(1.1010)]),
    (WireSize::Kcmil750, [Some(1.0496), Some(1.0532), Some(1.1652), Some(1.1652)]),
    (WireSize::Kcmil800, [Some(1.1085), Some(1.1122), Some(1.2272), Some(1.2272)]),
    (WireSize::Kcmil900, [Some(1.2311), Some(1.2351), Some(1.3561), Some(1.3561)]),
    (WireSize::Kcmil1000, [Some(1.3478), Some(1.3519), Some(1.4784), Some(1.4784)]),
    (WireSize::Kcmil1250, [None, Some(1.7180), Some(1.8602), None]),
    (WireSize::Kcmil1500, [None, Some(2.0156), Some(2.1695), None]),
];

fn family_column(family: InsulationFamily) -> usize {
    match family {
        InsulationFamily::Thhn => 0,
        InsulationFamily::Xhhw => 1,
        InsulationFamily::Thw => 2,
        InsulationFamily::Tw => 3,
    }
}

/// Approximate cross-sectional area of an insulated conductor in in²
pub fn wire_area(family: InsulationFamily, size: WireSize) -> Option<f64> {
    WIRE_AREA
        .iter()
        .find(|(s, _)| *s == size)
        .and_then(|(_, columns)| columns[family_column(family)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raceway_area_lookup() {
        assert_eq!(raceway_area(RacewayType::Emt, TradeSize::ThreeQuarter), Some(0.533));
        assert_eq!(raceway_area(RacewayType::PvcSch80, TradeSize::Six), Some(25.598));
        assert_eq!(raceway_area(RacewayType::Emt, TradeSize::Five), None);
    }

    #[test]
    fn test_available_trade_sizes_ascending() {
        let sizes = available_trade_sizes(RacewayType::Emt);
        assert_eq!(sizes.first(), Some(&TradeSize::Half));
        assert_eq!(sizes.last(), Some(&TradeSize::Four));
        assert!(sizes.windows(2).all(|p| p[0] < p[1]));
        assert_eq!(available_trade_sizes(RacewayType::Rmc).len(), 12);
    }

    #[test]
    fn test_raceway_area_increases_with_trade_size() {
        for raceway in RacewayType::ALL {
            let areas: Vec<f64> = available_trade_sizes(raceway)
                .into_iter()
                .filter_map(|s| raceway_area(raceway, s))
                .collect();
            assert!(areas.windows(2).all(|p| p[0] < p[1]), "{raceway}");
        }
    }

    #[test]
    fn test_wire_area_lookup() {
        assert_eq!(wire_area(InsulationFamily::Thhn, WireSize::Awg12), Some(0.0133));
        assert_eq!(wire_area(InsulationFamily::Xhhw, WireSize::Awg0), Some(0.1825));
        assert_eq!(wire_area(InsulationFamily::Thhn, WireSize::Awg18), None);
        assert_eq!(wire_area(InsulationFamily::Tw, WireSize::Kcmil1500), None);
    }
}
