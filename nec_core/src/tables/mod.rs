//! # NEC Table Registry
//!
//! Immutable lookup tables for electrical calculations per NFPA 70 (NEC).
//! Tables are either `const` arrays or `Lazy` maps built on first touch;
//! nothing here has a write path.
//!
//! ## Lookup Contract
//!
//! Every lookup is total. A key the table does not cover (an aluminum 14 AWG
//! ampacity, an EMT 5" raceway, a 4 AWG box-fill allowance) yields `None`,
//! never a panic. Callers decide whether that degrades to "zero contribution"
//! or "size not usable".
//!
//! ## Tables
//!
//! | Module          | NEC reference                                     |
//! |-----------------|---------------------------------------------------|
//! | [`sizes`]       | Size designations and the rank ordering          |
//! | [`conductors`]  | 310.16, 310.15(B)(1), 310.15(C)(1), 240.4(D), Ch. 9 Table 8 |
//! | [`raceway`]     | Ch. 9 Tables 4 and 5                              |
//! | [`boxes`]       | 314.16(A), 314.16(B)                              |
//! | [`grounding`]   | 250.122, 250.66                                   |
//! | [`ladders`]     | 240.6(A), VFD ratings, 430.250                    |

pub mod boxes;
pub mod conductors;
pub mod grounding;
pub mod ladders;
pub mod raceway;
pub mod sizes;

pub use boxes::{box_fill_unit_volume, StandardBox};
pub use conductors::{
    base_ampacity, bundling_factor, circular_mils, ocpd_limit, resistance_per_1000ft,
    temp_correction_factor, Material, TempRating,
};
pub use grounding::{equipment_grounding_conductor, grounding_electrode_conductor};
pub use ladders::{
    motor_full_load_current, round_up_to_standard, standard_breaker_at_least,
    vfd_rating_at_least, STANDARD_BREAKER_RATINGS, VFD_OUTPUT_RATINGS,
};
pub use raceway::{available_trade_sizes, raceway_area, wire_area, InsulationFamily, RacewayType};
pub use sizes::{TradeSize, WireSize};

// ============================================================================
// NEC Code Section References
// ============================================================================

/// NEC section references attached to results and export records.
///
/// These constants provide traceable references to NFPA 70.
pub mod nec_ref {
    // Conductors
    /// Allowable ampacity table
    pub const AMPACITY: &str = "NEC Table 310.16";
    /// Ambient temperature correction
    pub const TEMP_CORRECTION: &str = "NEC 310.15(B)(1)";
    /// More than three current-carrying conductors
    pub const BUNDLING: &str = "NEC 310.15(C)(1)";
    /// Small conductor overcurrent protection
    pub const SMALL_CONDUCTOR: &str = "NEC 240.4(D)";
    /// Termination temperature limitations
    pub const TERMINATION: &str = "NEC 110.14(C)";
    /// Continuous loads on branch circuits
    pub const CONTINUOUS_BRANCH: &str = "NEC 210.19(A)(1)";
    /// Continuous loads on feeders
    pub const CONTINUOUS_FEEDER: &str = "NEC 215.2(A)(1)";
    /// Voltage drop informational notes
    pub const VOLTAGE_DROP: &str = "NEC 210.19(A) Informational Note No. 4";
    /// Conductor properties (resistance)
    pub const CONDUCTOR_PROPERTIES: &str = "NEC Chapter 9 Table 8";

    // Raceways and boxes
    /// Percent of cross section of conduit and tubing for conductors
    pub const CONDUIT_FILL: &str = "NEC Chapter 9 Table 1";
    /// Raceway dimensions
    pub const RACEWAY_DIMENSIONS: &str = "NEC Chapter 9 Table 4";
    /// Insulated conductor dimensions
    pub const CONDUCTOR_DIMENSIONS: &str = "NEC Chapter 9 Table 5";
    /// Box fill calculations
    pub const BOX_FILL: &str = "NEC 314.16(B)";
    /// Metal box volumes
    pub const BOX_VOLUMES: &str = "NEC Table 314.16(A)";

    // Loads and protection
    /// Standard ampere ratings
    pub const STANDARD_RATINGS: &str = "NEC 240.6(A)";
    /// Neutral feeder load
    pub const NEUTRAL_LOAD: &str = "NEC 220.61";
    /// Electric vehicle supply equipment, continuous load
    pub const EVSE: &str = "NEC 625.41";
    /// Storage water heaters, continuous load
    pub const WATER_HEATER: &str = "NEC 422.13";
    /// Motor full-load current
    pub const MOTOR_FLC: &str = "NEC Table 430.250";

    // Grounding
    /// Equipment grounding conductor sizing
    pub const EGC: &str = "NEC Table 250.122";
    /// Grounding electrode conductor sizing
    pub const GEC: &str = "NEC Table 250.66";
}
