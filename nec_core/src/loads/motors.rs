//! Three-phase motor and VFD sizing
//!
//! Motor full-load current comes from Table 430.250, never the nameplate.
//! The drive is the first VFD output rating at or above that current; the
//! branch-circuit conductor carries 125% of it (430.22).

use serde::{Deserialize, Serialize};

use crate::derating::CONTINUOUS_LOAD_MULTIPLIER;
use crate::tables;

/// VFD selection for one motor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VfdSizing {
    pub horsepower: f64,
    pub voltage: f64,

    /// Table 430.250 full-load current (A)
    pub motor_fla: f64,

    /// Selected drive output rating (A)
    pub vfd_output_amps: f64,

    /// Minimum branch-circuit conductor ampacity, 125% of FLA (A)
    pub branch_conductor_amps: f64,
}

/// Size a VFD for a three-phase motor.
///
/// `None` when the horsepower/voltage pair is not in Table 430.250 or the FLA
/// exceeds the largest drive rating.
///
/// # Example
/// ```
/// use nec_core::loads::size_vfd;
///
/// let vfd = size_vfd(10.0, 460.0).unwrap();
/// assert_eq!(vfd.motor_fla, 14.0);
/// assert_eq!(vfd.vfd_output_amps, 17.5);
/// ```
pub fn size_vfd(horsepower: f64, voltage: f64) -> Option<VfdSizing> {
    let motor_fla = tables::motor_full_load_current(horsepower, voltage)?;
    let vfd_output_amps = tables::vfd_rating_at_least(motor_fla)?;
    Some(VfdSizing {
        horsepower,
        voltage,
        motor_fla,
        vfd_output_amps,
        branch_conductor_amps: motor_fla * CONTINUOUS_LOAD_MULTIPLIER,
    })
}
