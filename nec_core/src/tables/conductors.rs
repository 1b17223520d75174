//! Conductor Property Tables
//!
//! - Table 310.16: allowable ampacity, not more than three current-carrying
//!   conductors, based on 30 °C ambient
//! - Table 310.15(B)(1): ambient temperature correction factors
//! - Table 310.15(C)(1): adjustment for more than three current-carrying
//!   conductors
//! - 240.4(D): small conductor overcurrent protection limits
//! - Chapter 9 Table 8: DC resistance at 75 °C, uncoated, and circular mil area
//!
//! Composite-key tables are built once into `Lazy` hash maps. Every lookup
//! returns `Option`; `None` means the table has no entry for the key.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::sizes::WireSize;

// ============================================================================
// KEYS
// ============================================================================

/// Conductor material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Material {
    #[default]
    Copper,
    /// Aluminum or copper-clad aluminum
    Aluminum,
}

impl Material {
    pub const ALL: [Material; 2] = [Material::Copper, Material::Aluminum];

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Material::Copper => "Copper",
            Material::Aluminum => "Aluminum",
        }
    }

    /// Chemical symbol used in compact labels ("Cu", "Al")
    pub fn symbol(&self) -> &'static str {
        match self {
            Material::Copper => "Cu",
            Material::Aluminum => "Al",
        }
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Insulation temperature rating (Table 310.16 column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TempRating {
    /// 60 °C (TW, UF)
    C60,
    /// 75 °C (THW, THWN, XHHW, USE)
    #[default]
    C75,
    /// 90 °C (THHN, THWN-2, XHHW-2, RHW-2)
    C90,
}

impl TempRating {
    pub const ALL: [TempRating; 3] = [TempRating::C60, TempRating::C75, TempRating::C90];

    /// Rating in degrees Celsius
    pub fn degrees_c(&self) -> u8 {
        match self {
            TempRating::C60 => 60,
            TempRating::C75 => 75,
            TempRating::C90 => 90,
        }
    }

    fn column(&self) -> usize {
        match self {
            TempRating::C60 => 0,
            TempRating::C75 => 1,
            TempRating::C90 => 2,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            TempRating::C60 => "60°C",
            TempRating::C75 => "75°C",
            TempRating::C90 => "90°C",
        }
    }
}

impl std::fmt::Display for TempRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// TABLE 310.16
// ============================================================================

/// (size, [60 °C, 75 °C, 90 °C]) for copper
const COPPER_AMPACITY: [(WireSize, [f64; 3]); 28] = [
    (WireSize::Awg14, [15.0, 20.0, 25.0]),
    (WireSize::Awg12, [20.0, 25.0, 30.0]),
    (WireSize::Awg10, [30.0, 35.0, 40.0]),
    (WireSize::Awg8, [40.0, 50.0, 55.0]),
    (WireSize::Awg6, [55.0, 65.0, 75.0]),
    (WireSize::Awg4, [70.0, 85.0, 95.0]),
    (WireSize::Awg3, [85.0, 100.0, 115.0]),
    (WireSize::Awg2, [95.0, 115.0, 130.0]),
    (WireSize::Awg1, [110.0, 130.0, 145.0]),
    (WireSize::Awg0, [125.0, 150.0, 170.0]),
    (WireSize::Awg00, [145.0, 175.0, 195.0]),
    (WireSize::Awg000, [165.0, 200.0, 225.0]),
    (WireSize::Awg0000, [195.0, 230.0, 260.0]),
    (WireSize::Kcmil250, [215.0, 255.0, 290.0]),
    (WireSize::Kcmil300, [240.0, 285.0, 320.0]),
    (WireSize::Kcmil350, [260.0, 310.0, 350.0]),
    (WireSize::Kcmil400, [280.0, 335.0, 380.0]),
    (WireSize::Kcmil500, [320.0, 380.0, 430.0]),
    (WireSize::Kcmil600, [350.0, 420.0, 475.0]),
    (WireSize::Kcmil700, [385.0, 460.0, 520.0]),
    (WireSize::Kcmil750, [400.0, 475.0, 535.0]),
    (WireSize::Kcmil800, [410.0, 490.0, 555.0]),
    (WireSize::Kcmil900, [435.0, 520.0, 585.0]),
    (WireSize::Kcmil1000, [455.0, 545.0, 615.0]),
    (WireSize::Kcmil1250, [495.0, 590.0, 665.0]),
    (WireSize::Kcmil1500, [525.0, 625.0, 705.0]),
    (WireSize::Kcmil1750, [545.0, 650.0, 735.0]),
    (WireSize::Kcmil2000, [555.0, 665.0, 750.0]),
];

/// (size, [60 °C, 75 °C, 90 °C]) for aluminum / copper-clad aluminum
const ALUMINUM_AMPACITY: [(WireSize, [f64; 3]); 27] = [
    (WireSize::Awg12, [15.0, 20.0, 25.0]),
    (WireSize::Awg10, [25.0, 30.0, 35.0]),
    (WireSize::Awg8, [35.0, 40.0, 45.0]),
    (WireSize::Awg6, [40.0, 50.0, 55.0]),
    (WireSize::Awg4, [55.0, 65.0, 75.0]),
    (WireSize::Awg3, [65.0, 75.0, 85.0]),
    (WireSize::Awg2, [75.0, 90.0, 100.0]),
    (WireSize::Awg1, [85.0, 100.0, 115.0]),
    (WireSize::Awg0, [100.0, 120.0, 135.0]),
    (WireSize::Awg00, [115.0, 135.0, 150.0]),
    (WireSize::Awg000, [130.0, 155.0, 175.0]),
    (WireSize::Awg0000, [150.0, 180.0, 205.0]),
    (WireSize::Kcmil250, [170.0, 205.0, 230.0]),
    (WireSize::Kcmil300, [195.0, 230.0, 260.0]),
    (WireSize::Kcmil350, [210.0, 250.0, 280.0]),
    (WireSize::Kcmil400, [225.0, 270.0, 305.0]),
    (WireSize::Kcmil500, [260.0, 310.0, 350.0]),
    (WireSize::Kcmil600, [285.0, 340.0, 385.0]),
    (WireSize::Kcmil700, [315.0, 375.0, 425.0]),
    (WireSize::Kcmil750, [320.0, 385.0, 435.0]),
    (WireSize::Kcmil800, [330.0, 395.0, 445.0]),
    (WireSize::Kcmil900, [355.0, 425.0, 480.0]),
    (WireSize::Kcmil1000, [375.0, 445.0, 500.0]),
    (WireSize::Kcmil1250, [405.0, 485.0, 545.0]),
    (WireSize::Kcmil1500, [435.0, 520.0, 585.0]),
    (WireSize::Kcmil1750, [455.0, 545.0, 615.0]),
    (WireSize::Kcmil2000, [470.0, 560.0, 630.0]),
];

static AMPACITY: Lazy<HashMap<(Material, TempRating, WireSize), f64>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for (material, rows) in [
        (Material::Copper, &COPPER_AMPACITY[..]),
        (Material::Aluminum, &ALUMINUM_AMPACITY[..]),
    ] {
        for (size, columns) in rows {
            for rating in TempRating::ALL {
                map.insert((material, rating, *size), columns[rating.column()]);
            }
        }
    }
    map
});

/// Allowable ampacity from Table 310.16 (30 °C ambient, ≤ 3 current-carrying
/// conductors). `None` for sizes the table does not list (e.g., 18 AWG, or
/// 14 AWG aluminum).
pub fn base_ampacity(material: Material, rating: TempRating, size: WireSize) -> Option<f64> {
    AMPACITY.get(&(material, rating, size)).copied()
}

// ============================================================================
// TABLE 310.15(B)(1) - AMBIENT TEMPERATURE CORRECTION
// ============================================================================

/// (upper bound of ambient range °C, [60 °C, 75 °C, 90 °C]); `None` = no entry,
/// conductor not permitted at that ambient.
const TEMP_CORRECTION: [(f64, [Option<f64>; 3]); 16] = [
    (10.0, [Some(1.29), Some(1.20), Some(1.15)]),
    (15.0, [Some(1.22), Some(1.15), Some(1.12)]),
    (20.0, [Some(1.15), Some(1.11), Some(1.08)]),
    (25.0, [Some(1.08), Some(1.05), Some(1.04)]),
    (30.0, [Some(1.00), Some(1.00), Some(1.00)]),
    (35.0, [Some(0.91), Some(0.94), Some(0.96)]),
    (40.0, [Some(0.82), Some(0.88), Some(0.91)]),
    (45.0, [Some(0.71), Some(0.82), Some(0.87)]),
    (50.0, [Some(0.58), Some(0.75), Some(0.82)]),
    (55.0, [Some(0.41), Some(0.67), Some(0.76)]),
    (60.0, [None, Some(0.58), Some(0.71)]),
    (65.0, [None, Some(0.47), Some(0.65)]),
    (70.0, [None, Some(0.33), Some(0.58)]),
    (75.0, [None, None, Some(0.50)]),
    (80.0, [None, None, Some(0.41)]),
    (85.0, [None, None, Some(0.29)]),
];

/// Ambient temperature correction factor.
///
/// Rows are ranges; the first row whose upper bound is ≥ the ambient applies
/// (so 30.5 °C uses the 31–35 °C row). `None` above the column's last entry or
/// for a non-finite ambient.
pub fn temp_correction_factor(rating: TempRating, ambient_c: f64) -> Option<f64> {
    if !ambient_c.is_finite() {
        return None;
    }
    TEMP_CORRECTION
        .iter()
        .find(|(upper, _)| ambient_c <= *upper)
        .and_then(|(_, columns)| columns[rating.column()])
}

// ============================================================================
// TABLE 310.15(C)(1) - MORE THAN THREE CURRENT-CARRYING CONDUCTORS
// ============================================================================

/// (upper bound of conductor count, factor)
const BUNDLING: [(u32, f64); 6] = [
    (3, 1.00),
    (6, 0.80),
    (9, 0.70),
    (20, 0.50),
    (30, 0.45),
    (40, 0.40),
];

/// Adjustment factor for the number of current-carrying conductors in a
/// raceway or cable. Zero through three conductors need no adjustment; 41 and
/// above use 35%.
pub fn bundling_factor(current_carrying_conductors: u32) -> f64 {
    BUNDLING
        .iter()
        .find(|(upper, _)| current_carrying_conductors <= *upper)
        .map(|(_, factor)| *factor)
        .unwrap_or(0.35)
}

// ============================================================================
// 240.4(D) - SMALL CONDUCTORS
// ============================================================================

/// Maximum overcurrent device rating for small conductors per 240.4(D).
///
/// `None` means no special limit applies (the conductor's ampacity governs).
pub fn ocpd_limit(material: Material, size: WireSize) -> Option<f64> {
    match (material, size) {
        (Material::Copper, WireSize::Awg18) => Some(7.0),
        (Material::Copper, WireSize::Awg16) => Some(10.0),
        (Material::Copper, WireSize::Awg14) => Some(15.0),
        (Material::Copper, WireSize::Awg12) => Some(20.0),
        (Material::Copper, WireSize::Awg10) => Some(30.0),
        (Material::Aluminum, WireSize::Awg12) => Some(15.0),
        (Material::Aluminum, WireSize::Awg10) => Some(25.0),
        _ => None,
    }
}

// ============================================================================
// CHAPTER 9 TABLE 8 - DC RESISTANCE
// ============================================================================

/// (size, copper Ω/kft, aluminum Ω/kft), stranded, uncoated, at 75 °C
const RESISTANCE: [(WireSize, f64, Option<f64>); 30] = [
    (WireSize::Awg18, 8.08, None),
    (WireSize::Awg16, 5.08, None),
    (WireSize::Awg14, 3.14, None),
    (WireSize::Awg12, 1.98, Some(3.25)),
    (WireSize::Awg10, 1.24, Some(2.04)),
    (WireSize::Awg8, 0.778, Some(1.28)),
    (WireSize::Awg6, 0.491, Some(0.808)),
    (WireSize::Awg4, 0.308, Some(0.508)),
    (WireSize::Awg3, 0.245, Some(0.403)),
    (WireSize::Awg2, 0.194, Some(0.319)),
    (WireSize::Awg1, 0.154, Some(0.253)),
    (WireSize::Awg0, 0.122, Some(0.201)),
    (WireSize::Awg00, 0.0967, Some(0.159)),
    (WireSize::Awg000, 0.0766, Some(0.126)),
    (WireSize::Awg0000, 0.0608, Some(0.100)),
    (WireSize::Kcmil250, 0.0515, Some(0.0847)),
    (WireSize::Kcmil300, 0.0429, Some(0.0707)),
    (WireSize::Kcmil350, 0.0367, Some(0.0605)),
    (WireSize::Kcmil400, 0.0321, Some(0.0529)),
    (WireSize::Kcmil500, 0.0258, Some(0.0424)),
    (WireSize::Kcmil600, 0.0214, Some(0.0353)),
    (WireSize::Kcmil700, 0.0184, Some(0.0303)),
    (WireSize::Kcmil750, 0.0171, Some(0.0282)),
    (WireSize::Kcmil800, 0.0161, Some(0.0265)),
    (WireSize::Kcmil900, 0.0143, Some(0.0235)),
    (WireSize::Kcmil1000, 0.0129, Some(0.0212)),
    (WireSize::Kcmil1250, 0.0103, Some(0.0169)),
    (WireSize::Kcmil1500, 0.00858, Some(0.0141)),
    (WireSize::Kcmil1750, 0.00735, Some(0.0121)),
    (WireSize::Kcmil2000, 0.00643, Some(0.0106)),
];

/// Conductor DC resistance in ohms per 1000 ft
pub fn resistance_per_1000ft(material: Material, size: WireSize) -> Option<f64> {
    RESISTANCE
        .iter()
        .find(|(s, _, _)| *s == size)
        .and_then(|(_, cu, al)| match material {
            Material::Copper => Some(*cu),
            Material::Aluminum => *al,
        })
}

/// Conductor area in circular mils (Chapter 9 Table 8)
pub fn circular_mils(size: WireSize) -> f64 {
    match size {
        WireSize::Awg18 => 1_620.0,
        WireSize::Awg16 => 2_580.0,
        WireSize::Awg14 => 4_110.0,
        WireSize::Awg12 => 6_530.0,
        WireSize::Awg10 => 10_380.0,
        WireSize::Awg8 => 16_510.0,
        WireSize::Awg6 => 26_240.0,
        WireSize::Awg4 => 41_740.0,
        WireSize::Awg3 => 52_620.0,
        WireSize::Awg2 => 66_360.0,
        WireSize::Awg1 => 83_690.0,
        WireSize::Awg0 => 105_600.0,
        WireSize::Awg00 => 133_100.0,
        WireSize::Awg000 => 167_800.0,
        WireSize::Awg0000 => 211_600.0,
        WireSize::Kcmil250 => 250_000.0,
        WireSize::Kcmil300 => 300_000.0,
        WireSize::Kcmil350 => 350_000.0,
        WireSize::Kcmil400 => 400_000.0,
        WireSize::Kcmil500 => 500_000.0,
        WireSize::Kcmil600 => 600_000.0,
        WireSize::Kcmil700 => 700_000.0,
        WireSize::Kcmil750 => 750_000.0,
        WireSize::Kcmil800 => 800_000.0,
        WireSize::Kcmil900 => 900_000.0,
        WireSize::Kcmil1000 => 1_000_000.0,
        WireSize::Kcmil1250 => 1_250_000.0,
        WireSize::Kcmil1500 => 1_500_000.0,
        WireSize::Kcmil1750 => 1_750_000.0,
        WireSize::Kcmil2000 => 2_000_000.0,
    }
}

// ============================================================================
// TESTS
// ============================================================================
