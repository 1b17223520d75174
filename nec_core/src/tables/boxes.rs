//! Box Fill Tables
//!
//! - Table 314.16(B): volume allowance required per conductor
//! - Table 314.16(A): metal boxes

use serde::{Deserialize, Serialize};

use super::sizes::WireSize;

/// Volume allowance per conductor in cubic inches, Table 314.16(B).
///
/// The table stops at 6 AWG; larger conductors are outside the box-fill
/// method (314.28 pull-box sizing applies instead) and return `None`.
pub fn box_fill_unit_volume(size: WireSize) -> Option<f64> {
    match size {
        WireSize::Awg18 => Some(1.50),
        WireSize::Awg16 => Some(1.75),
        WireSize::Awg14 => Some(2.00),
        WireSize::Awg12 => Some(2.25),
        WireSize::Awg10 => Some(2.50),
        WireSize::Awg8 => Some(3.00),
        WireSize::Awg6 => Some(5.00),
        _ => None,
    }
}

/// Standard metal boxes from Table 314.16(A)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardBox {
    /// 4" round/octagonal × 1-1/4"
    Octagon4x1_25,
    /// 4" round/octagonal × 1-1/2"
    Octagon4x1_5,
    /// 4" round/octagonal × 2-1/8"
    Octagon4x2_125,
    /// 4" square × 1-1/4"
    Square4x1_25,
    /// 4" square × 1-1/2"
    Square4x1_5,
    /// 4" square × 2-1/8"
    Square4x2_125,
    /// 4-11/16" square × 1-1/4"
    Square4_69x1_25,
    /// 4-11/16" square × 1-1/2"
    Square4_69x1_5,
    /// 4-11/16" square × 2-1/8"
    Square4_69x2_125,
    /// 3" × 2" × 1-1/2" device box
    Device3x2x1_5,
    /// 3" × 2" × 2" device box
    Device3x2x2,
    /// 3" × 2" × 2-1/4" device box
    Device3x2x2_25,
    /// 3" × 2" × 2-1/2" device box
    Device3x2x2_5,
    /// 3" × 2" × 2-3/4" device box
    Device3x2x2_75,
    /// 3" × 2" × 3-1/2" device box
    Device3x2x3_5,
}

impl StandardBox {
    pub const ALL: [StandardBox; 15] = [
        StandardBox::Octagon4x1_25,
        StandardBox::Octagon4x1_5,
        StandardBox::Octagon4x2_125,
        StandardBox::Square4x1_25,
        StandardBox::Square4x1_5,
        StandardBox::Square4x2_125,
        StandardBox::Square4_69x1_25,
        StandardBox::Square4_69x1_5,
        StandardBox::Square4_69x2_125,
        StandardBox::Device3x2x1_5,
        StandardBox::Device3x2x2,
        StandardBox::Device3x2x2_25,
        StandardBox::Device3x2x2_5,
        StandardBox::Device3x2x2_75,
        StandardBox::Device3x2x3_5,
    ];

    /// Minimum volume in cubic inches
    pub fn volume_in3(&self) -> f64 {
        match self {
            StandardBox::Octagon4x1_25 => 12.5,
            StandardBox::Octagon4x1_5 => 15.5,
            StandardBox::Octagon4x2_125 => 21.5,
            StandardBox::Square4x1_25 => 18.0,
            StandardBox::Square4x1_5 => 21.0,
            StandardBox::Square4x2_125 => 30.3,
            StandardBox::Square4_69x1_25 => 25.5,
            StandardBox::Square4_69x1_5 => 29.5,
            StandardBox::Square4_69x2_125 => 42.0,
            StandardBox::Device3x2x1_5 => 7.5,
            StandardBox::Device3x2x2 => 10.0,
            StandardBox::Device3x2x2_25 => 10.5,
            StandardBox::Device3x2x2_5 => 12.5,
            StandardBox::Device3x2x2_75 => 14.0,
            StandardBox::Device3x2x3_5 => 18.0,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            StandardBox::Octagon4x1_25 => "4\" octagon × 1-1/4\"",
            StandardBox::Octagon4x1_5 => "4\" octagon × 1-1/2\"",
            StandardBox::Octagon4x2_125 => "4\" octagon × 2-1/8\"",
            StandardBox::Square4x1_25 => "4\" square × 1-1/4\"",
            StandardBox::Square4x1_5 => "4\" square × 1-1/2\"",
            StandardBox::Square4x2_125 => "4\" square × 2-1/8\"",
            StandardBox::Square4_69x1_25 => "4-11/16\" square × 1-1/4\"",
            StandardBox::Square4_69x1_5 => "4-11/16\" square × 1-1/2\"",
            StandardBox::Square4_69x2_125 => "4-11/16\" square × 2-1/8\"",
            StandardBox::Device3x2x1_5 => "3×2×1-1/2\" device",
            StandardBox::Device3x2x2 => "3×2×2\" device",
            StandardBox::Device3x2x2_25 => "3×2×2-1/4\" device",
            StandardBox::Device3x2x2_5 => "3×2×2-1/2\" device",
            StandardBox::Device3x2x2_75 => "3×2×2-3/4\" device",
            StandardBox::Device3x2x3_5 => "3×2×3-1/2\" device",
        }
    }

    /// Smallest standard box (by volume) that holds `required_in3`
    pub fn smallest_for(required_in3: f64) -> Option<StandardBox> {
        Self::ALL
            .iter()
            .copied()
            .filter(|b| b.volume_in3() >= required_in3)
            .min_by(|a, b| a.volume_in3().total_cmp(&b.volume_in3()))
    }
}

impl std::fmt::Display for StandardBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
