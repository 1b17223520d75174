//! Conductor and Raceway Size Designations
//!
//! Conductor sizes are not numerically ordered by their labels: AWG numbers
//! *decrease* as the wire gets larger (14 → 12 → 10 … → 1), continue through
//! the aught sizes (1/0 … 4/0), then switch to kcmil, which *increases* with
//! size (250 … 2000). Raceway trade sizes are fractional inch labels.
//!
//! Every comparison, sort, and "next size up" search in the crate goes through
//! [`WireSize::rank`] / [`TradeSize::rank`]. Label text is never parsed as a
//! number to decide ordering.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

// ============================================================================
// WIRE SIZE
// ============================================================================

/// Conductor size designation (AWG / kcmil)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireSize {
    /// 18 AWG
    Awg18,
    /// 16 AWG
    Awg16,
    /// 14 AWG
    Awg14,
    /// 12 AWG
    Awg12,
    /// 10 AWG
    Awg10,
    /// 8 AWG
    Awg8,
    /// 6 AWG
    Awg6,
    /// 4 AWG
    Awg4,
    /// 3 AWG
    Awg3,
    /// 2 AWG
    Awg2,
    /// 1 AWG
    Awg1,
    /// 1/0 AWG
    Awg0,
    /// 2/0 AWG
    Awg00,
    /// 3/0 AWG
    Awg000,
    /// 4/0 AWG
    Awg0000,
    /// 250 kcmil
    Kcmil250,
    /// 300 kcmil
    Kcmil300,
    /// 350 kcmil
    Kcmil350,
    /// 400 kcmil
    Kcmil400,
    /// 500 kcmil
    Kcmil500,
    /// 600 kcmil
    Kcmil600,
    /// 700 kcmil
    Kcmil700,
    /// 750 kcmil
    Kcmil750,
    /// 800 kcmil
    Kcmil800,
    /// 900 kcmil
    Kcmil900,
    /// 1000 kcmil
    Kcmil1000,
    /// 1250 kcmil
    Kcmil1250,
    /// 1500 kcmil
    Kcmil1500,
    /// 1750 kcmil
    Kcmil1750,
    /// 2000 kcmil
    Kcmil2000,
}

impl WireSize {
    /// Every size, ascending by rank (smallest conductor first)
    pub const ALL: [WireSize; 30] = [
        WireSize::Awg18,
        WireSize::Awg16,
        WireSize::Awg14,
        WireSize::Awg12,
        WireSize::Awg10,
        WireSize::Awg8,
        WireSize::Awg6,
        WireSize::Awg4,
        WireSize::Awg3,
        WireSize::Awg2,
        WireSize::Awg1,
        WireSize::Awg0,
        WireSize::Awg00,
        WireSize::Awg000,
        WireSize::Awg0000,
        WireSize::Kcmil250,
        WireSize::Kcmil300,
        WireSize::Kcmil350,
        WireSize::Kcmil400,
        WireSize::Kcmil500,
        WireSize::Kcmil600,
        WireSize::Kcmil700,
        WireSize::Kcmil750,
        WireSize::Kcmil800,
        WireSize::Kcmil900,
        WireSize::Kcmil1000,
        WireSize::Kcmil1250,
        WireSize::Kcmil1500,
        WireSize::Kcmil1750,
        WireSize::Kcmil2000,
    ];

    /// Building-wire ladder used for branch circuit and feeder sizing
    /// (14 AWG through 2000 kcmil; Table 310.16 starts at 14 AWG).
    pub const BUILDING_WIRE: &'static [WireSize] = &Self::ALL_FROM_14;

    const ALL_FROM_14: [WireSize; 28] = {
        let mut out = [WireSize::Awg14; 28];
        let mut i = 0;
        while i < 28 {
            out[i] = Self::ALL[i + 2];
            i += 1;
        }
        out
    };

    /// Ordinal rank. Larger conductor ⇒ larger rank.
    ///
    /// This is the single ordering used everywhere in the crate.
    pub const fn rank(self) -> u8 {
        match self {
            WireSize::Awg18 => 0,
            WireSize::Awg16 => 1,
            WireSize::Awg14 => 2,
            WireSize::Awg12 => 3,
            WireSize::Awg10 => 4,
            WireSize::Awg8 => 5,
            WireSize::Awg6 => 6,
            WireSize::Awg4 => 7,
            WireSize::Awg3 => 8,
            WireSize::Awg2 => 9,
            WireSize::Awg1 => 10,
            WireSize::Awg0 => 11,
            WireSize::Awg00 => 12,
            WireSize::Awg000 => 13,
            WireSize::Awg0000 => 14,
            WireSize::Kcmil250 => 15,
            WireSize::Kcmil300 => 16,
            WireSize::Kcmil350 => 17,
            WireSize::Kcmil400 => 18,
            WireSize::Kcmil500 => 19,
            WireSize::Kcmil600 => 20,
            WireSize::Kcmil700 => 21,
            WireSize::Kcmil750 => 22,
            WireSize::Kcmil800 => 23,
            WireSize::Kcmil900 => 24,
            WireSize::Kcmil1000 => 25,
            WireSize::Kcmil1250 => 26,
            WireSize::Kcmil1500 => 27,
            WireSize::Kcmil1750 => 28,
            WireSize::Kcmil2000 => 29,
        }
    }

    /// Look a size up by rank
    pub fn from_rank(rank: u8) -> Option<WireSize> {
        Self::ALL.get(rank as usize).copied()
    }

    /// Next larger standard size, or `None` at 2000 kcmil
    pub fn next_larger(self) -> Option<WireSize> {
        Self::from_rank(self.rank() + 1)
    }

    /// Next smaller standard size, or `None` at 18 AWG
    pub fn next_smaller(self) -> Option<WireSize> {
        self.rank().checked_sub(1).and_then(Self::from_rank)
    }

    /// Bare size token as printed in NEC tables ("12", "1/0", "250")
    pub fn token(&self) -> &'static str {
        match self {
            WireSize::Awg18 => "18",
            WireSize::Awg16 => "16",
            WireSize::Awg14 => "14",
            WireSize::Awg12 => "12",
            WireSize::Awg10 => "10",
            WireSize::Awg8 => "8",
            WireSize::Awg6 => "6",
            WireSize::Awg4 => "4",
            WireSize::Awg3 => "3",
            WireSize::Awg2 => "2",
            WireSize::Awg1 => "1",
            WireSize::Awg0 => "1/0",
            WireSize::Awg00 => "2/0",
            WireSize::Awg000 => "3/0",
            WireSize::Awg0000 => "4/0",
            WireSize::Kcmil250 => "250",
            WireSize::Kcmil300 => "300",
            WireSize::Kcmil350 => "350",
            WireSize::Kcmil400 => "400",
            WireSize::Kcmil500 => "500",
            WireSize::Kcmil600 => "600",
            WireSize::Kcmil700 => "700",
            WireSize::Kcmil750 => "750",
            WireSize::Kcmil800 => "800",
            WireSize::Kcmil900 => "900",
            WireSize::Kcmil1000 => "1000",
            WireSize::Kcmil1250 => "1250",
            WireSize::Kcmil1500 => "1500",
            WireSize::Kcmil1750 => "1750",
            WireSize::Kcmil2000 => "2000",
        }
    }

    /// Whether the size is designated in kcmil rather than AWG
    pub fn is_kcmil(&self) -> bool {
        self.rank() >= WireSize::Kcmil250.rank()
    }

    /// Display name for UI (e.g., "12 AWG", "250 kcmil")
    pub fn display_name(&self) -> String {
        if self.is_kcmil() {
            format!("{} kcmil", self.token())
        } else {
            format!("{} AWG", self.token())
        }
    }
}

impl Ord for WireSize {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for WireSize {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for WireSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for WireSize {
    type Err = CalcError;

    /// Accepts "12", "#12", "12 AWG", "1/0", "0", "00", "250", "250 kcmil", "250 MCM"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let token = lower
            .trim_start_matches('#')
            .trim_end_matches("awg")
            .trim_end_matches("kcmil")
            .trim_end_matches("mcm")
            .trim();

        let aught = match token {
            "0" => Some(WireSize::Awg0),
            "00" => Some(WireSize::Awg00),
            "000" => Some(WireSize::Awg000),
            "0000" => Some(WireSize::Awg0000),
            _ => None,
        };

        aught
            .or_else(|| Self::ALL.iter().copied().find(|size| size.token() == token))
            .ok_or_else(|| CalcError::unknown_table_key("conductor sizes", s))
    }
}

// ============================================================================
// RACEWAY TRADE SIZE
// ============================================================================

/// Raceway trade size designation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeSize {
    /// 1/2" (metric designator 16)
    Half,
    /// 3/4" (21)
    ThreeQuarter,
    /// 1" (27)
    One,
    /// 1-1/4" (35)
    OneAndQuarter,
    /// 1-1/2" (41)
    OneAndHalf,
    /// 2" (53)
    Two,
    /// 2-1/2" (63)
    TwoAndHalf,
    /// 3" (78)
    Three,
    /// 3-1/2" (91)
    ThreeAndHalf,
    /// 4" (103)
    Four,
    /// 5" (129)
    Five,
    /// 6" (155)
    Six,
}

impl TradeSize {
    /// Every trade size, ascending
    pub const ALL: [TradeSize; 12] = [
        TradeSize::Half,
        TradeSize::ThreeQuarter,
        TradeSize::One,
        TradeSize::OneAndQuarter,
        TradeSize::OneAndHalf,
        TradeSize::Two,
        TradeSize::TwoAndHalf,
        TradeSize::Three,
        TradeSize::ThreeAndHalf,
        TradeSize::Four,
        TradeSize::Five,
        TradeSize::Six,
    ];

    /// Ordinal rank. Larger raceway ⇒ larger rank.
    pub const fn rank(self) -> u8 {
        match self {
            TradeSize::Half => 0,
            TradeSize::ThreeQuarter => 1,
            TradeSize::One => 2,
            TradeSize::OneAndQuarter => 3,
            TradeSize::OneAndHalf => 4,
            TradeSize::Two => 5,
            TradeSize::TwoAndHalf => 6,
            TradeSize::Three => 7,
            TradeSize::ThreeAndHalf => 8,
            TradeSize::Four => 9,
            TradeSize::Five => 10,
            TradeSize::Six => 11,
        }
    }

    /// Trade size token ("1/2", "1-1/4")
    pub fn token(&self) -> &'static str {
        match self {
            TradeSize::Half => "1/2",
            TradeSize::ThreeQuarter => "3/4",
            TradeSize::One => "1",
            TradeSize::OneAndQuarter => "1-1/4",
            TradeSize::OneAndHalf => "1-1/2",
            TradeSize::Two => "2",
            TradeSize::TwoAndHalf => "2-1/2",
            TradeSize::Three => "3",
            TradeSize::ThreeAndHalf => "3-1/2",
            TradeSize::Four => "4",
            TradeSize::Five => "5",
            TradeSize::Six => "6",
        }
    }

    /// Metric designator per NEC Table 300.1(C)
    pub fn metric_designator(&self) -> u16 {
        match self {
            TradeSize::Half => 16,
            TradeSize::ThreeQuarter => 21,
            TradeSize::One => 27,
            TradeSize::OneAndQuarter => 35,
            TradeSize::OneAndHalf => 41,
            TradeSize::Two => 53,
            TradeSize::TwoAndHalf => 63,
            TradeSize::Three => 78,
            TradeSize::ThreeAndHalf => 91,
            TradeSize::Four => 103,
            TradeSize::Five => 129,
            TradeSize::Six => 155,
        }
    }
}

impl Ord for TradeSize {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for TradeSize {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for TradeSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\"", self.token())
    }
}

impl FromStr for TradeSize {
    type Err = CalcError;

    /// Accepts "3/4", "3/4\"", "1-1/4 in", or a metric designator ("21")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let token = lower.trim_end_matches("in").trim().trim_end_matches('"').trim();

        Self::ALL
            .iter()
            .copied()
            .find(|size| size.token() == token || size.metric_designator().to_string() == token)
            .ok_or_else(|| CalcError::unknown_table_key("raceway trade sizes", s))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_is_strictly_increasing_over_all() {
        for pair in WireSize::ALL.windows(2) {
            assert!(pair[0].rank() < pair[1].rank(), "{} !< {}", pair[0], pair[1]);
            assert!(pair[0] < pair[1]);
        }
        for pair in TradeSize::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_awg_to_kcmil_transition() {
        // Label numbers go down then up; rank keeps going up.
        assert!(WireSize::Awg14 < WireSize::Awg12);
        assert!(WireSize::Awg1 < WireSize::Awg0);
        assert!(WireSize::Awg0000 < WireSize::Kcmil250);
        assert_eq!(WireSize::Awg0000.next_larger(), Some(WireSize::Kcmil250));
        assert_eq!(WireSize::Kcmil2000.next_larger(), None);
        assert_eq!(WireSize::Awg18.next_smaller(), None);
    }

    #[test]
    fn test_building_wire_ladder() {
        assert_eq!(WireSize::BUILDING_WIRE.len(), 28);
        assert_eq!(WireSize::BUILDING_WIRE[0], WireSize::Awg14);
        assert_eq!(WireSize::BUILDING_WIRE[27], WireSize::Kcmil2000);
    }

    #[test]
    fn test_parse_wire_size() {
        assert_eq!("12".parse::<WireSize>().unwrap(), WireSize::Awg12);
        assert_eq!("#12".parse::<WireSize>().unwrap(), WireSize::Awg12);
        assert_eq!("12 AWG".parse::<WireSize>().unwrap(), WireSize::Awg12);
        assert_eq!("1/0".parse::<WireSize>().unwrap(), WireSize::Awg0);
        assert_eq!("000".parse::<WireSize>().unwrap(), WireSize::Awg000);
        assert_eq!("250 kcmil".parse::<WireSize>().unwrap(), WireSize::Kcmil250);
        assert_eq!("500 MCM".parse::<WireSize>().unwrap(), WireSize::Kcmil500);
        assert!("13".parse::<WireSize>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for size in WireSize::ALL {
            assert_eq!(size.display_name().parse::<WireSize>().unwrap(), size);
        }
        assert_eq!(WireSize::Awg0.to_string(), "1/0 AWG");
        assert_eq!(WireSize::Kcmil350.to_string(), "350 kcmil");
    }

    #[test]
    fn test_parse_trade_size() {
        assert_eq!("3/4".parse::<TradeSize>().unwrap(), TradeSize::ThreeQuarter);
        assert_eq!("1-1/4\"".parse::<TradeSize>().unwrap(), TradeSize::OneAndQuarter);
        assert_eq!("21".parse::<TradeSize>().unwrap(), TradeSize::ThreeQuarter);
        assert!("7".parse::<TradeSize>().is_err());
        assert_eq!(TradeSize::TwoAndHalf.to_string(), "2-1/2\"");
    }
}
