//! # Ampacity Derating
//!
//! Composes the derating chain for a conductor:
//!
//! ```text
//! I_derated = I_base × C_temp × C_bundle
//! I_usable  = I_derated × 0.8           (continuous loads)
//! ```
//!
//! | Factor    | Source                  |
//! |-----------|-------------------------|
//! | I_base    | Table 310.16            |
//! | C_temp    | 310.15(B)(1)            |
//! | C_bundle  | 310.15(C)(1)            |
//! | 0.8       | 210.19(A)(1), 215.2(A)(1) (125% of continuous load) |
//!
//! An optional termination rating caps the result at the base ampacity of the
//! termination's column (110.14(C)).
//!
//! ## Example
//!
//! ```rust
//! use nec_core::derating::{derated_ampacity, ConductorSpec, DerateContext};
//! use nec_core::tables::{Material, TempRating, WireSize};
//!
//! let spec = ConductorSpec::new(WireSize::Awg10, Material::Copper, TempRating::C90);
//! let ctx = DerateContext { ambient_c: 40.0, current_carrying_conductors: 6, is_continuous: false };
//!
//! let result = derated_ampacity(&spec, &ctx).unwrap();
//! // 40 A × 0.91 × 0.80
//! assert!((result.derated_ampacity - 29.12).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::tables::{self, Material, TempRating, WireSize};
use crate::units::{Celsius, Fahrenheit};

/// Fraction of derated ampacity usable by a continuous load (1 / 1.25)
pub const CONTINUOUS_USABLE_FRACTION: f64 = 0.8;

/// Multiplier applied to continuous loads (125%)
pub const CONTINUOUS_LOAD_MULTIPLIER: f64 = 1.25;

/// A specific conductor: size, material, and insulation rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConductorSpec {
    pub size: WireSize,
    pub material: Material,
    pub temp_rating: TempRating,
}

impl ConductorSpec {
    /// Create a new conductor spec
    pub fn new(size: WireSize, material: Material, temp_rating: TempRating) -> Self {
        Self {
            size,
            material,
            temp_rating,
        }
    }

    /// Table 310.16 ampacity, `None` if the table has no entry
    pub fn base_ampacity(&self) -> Option<f64> {
        tables::base_ampacity(self.material, self.temp_rating, self.size)
    }

    /// Same material and rating, different size
    pub fn with_size(&self, size: WireSize) -> Self {
        Self { size, ..*self }
    }

    /// Display name (e.g., "8 AWG Cu 75°C")
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.size, self.material.symbol(), self.temp_rating)
    }
}

impl std::fmt::Display for ConductorSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Installation conditions that derate a conductor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerateContext {
    /// Ambient temperature (°C)
    pub ambient_c: f64,

    /// Current-carrying conductors in the raceway or cable
    pub current_carrying_conductors: u32,

    /// Load runs for 3 hours or more
    pub is_continuous: bool,
}

impl Default for DerateContext {
    fn default() -> Self {
        DerateContext {
            ambient_c: 30.0,
            current_carrying_conductors: 3,
            is_continuous: false,
        }
    }
}

impl DerateContext {
    /// Build a context from an ambient in °F
    pub fn from_fahrenheit(ambient_f: f64, current_carrying_conductors: u32, is_continuous: bool) -> Self {
        let Celsius(ambient_c) = Fahrenheit(ambient_f).into();
        DerateContext {
            ambient_c,
            current_carrying_conductors,
            is_continuous,
        }
    }

    /// Current the overcurrent device must carry: 125% of a continuous load
    pub fn design_current(&self, load_amps: f64) -> f64 {
        if self.is_continuous {
            load_amps * CONTINUOUS_LOAD_MULTIPLIER
        } else {
            load_amps
        }
    }
}

/// Every factor in the derating chain, kept for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeratedAmpacity {
    /// Table 310.16 ampacity (A)
    pub base_ampacity: f64,

    /// Ambient correction factor (0.0 when the insulation is not rated for the ambient)
    pub temp_correction: f64,

    /// Bundling adjustment factor
    pub bundling_factor: f64,

    /// base × temp × bundling (A)
    pub derated_ampacity: f64,

    /// derated × 0.8 when the load is continuous
    pub continuous_usable_ampacity: Option<f64>,

    /// Base ampacity in the termination column, when a termination rating applies
    pub termination_limit: Option<f64>,
}

impl DeratedAmpacity {
    /// True when the ambient exceeds the insulation's last correction row
    pub fn exceeds_insulation_rating(&self) -> bool {
        self.temp_correction == 0.0
    }

    /// Ampacity the load must fit within: the termination cap (if any) applied
    /// to the derated value, then the continuous reduction (if any).
    pub fn usable_ampacity(&self) -> f64 {
        let capped = match self.termination_limit {
            Some(limit) => self.derated_ampacity.min(limit),
            None => self.derated_ampacity,
        };
        if self.continuous_usable_ampacity.is_some() {
            capped * CONTINUOUS_USABLE_FRACTION
        } else {
            capped
        }
    }
}

/// Derate a conductor for ambient temperature and bundling.
///
/// Returns `None` when Table 310.16 has no entry for the conductor. An
/// ambient beyond the insulation's correction table yields a 0.0 factor
/// (and therefore zero ampacity) rather than `None`.
pub fn derated_ampacity(spec: &ConductorSpec, ctx: &DerateContext) -> Option<DeratedAmpacity> {
    derated_ampacity_with_termination(spec, ctx, None)
}

/// [`derated_ampacity`] with a 110.14(C) termination cap.
pub fn derated_ampacity_with_termination(
    spec: &ConductorSpec,
    ctx: &DerateContext,
    termination: Option<TempRating>,
) -> Option<DeratedAmpacity> {
    let base = spec.base_ampacity()?;
    let temp_correction = tables::temp_correction_factor(spec.temp_rating, ctx.ambient_c).unwrap_or(0.0);
    let bundling = tables::bundling_factor(ctx.current_carrying_conductors);
    let derated = base * temp_correction * bundling;

    // A termination rated above the insulation never raises the ampacity.
    let termination_limit = termination
        .filter(|t| t.degrees_c() < spec.temp_rating.degrees_c())
        .and_then(|t| tables::base_ampacity(spec.material, t, spec.size));

    Some(DeratedAmpacity {
        base_ampacity: base,
        temp_correction,
        bundling_factor: bundling,
        derated_ampacity: derated,
        continuous_usable_ampacity: ctx.is_continuous.then_some(derated * CONTINUOUS_USABLE_FRACTION),
        termination_limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cu75(size: WireSize) -> ConductorSpec {
        ConductorSpec::new(size, Material::Copper, TempRating::C75)
    }

    #[test]
    fn test_no_derating_at_standard_conditions() {
        let result = derated_ampacity(&cu75(WireSize::Awg12), &DerateContext::default()).unwrap();
        assert_eq!(result.base_ampacity, 25.0);
        assert_eq!(result.derated_ampacity, 25.0);
        assert_eq!(result.continuous_usable_ampacity, None);
        assert_eq!(result.usable_ampacity(), 25.0);
    }

    #[test]
    fn test_temperature_and_bundling_chain() {
        let spec = ConductorSpec::new(WireSize::Awg10, Material::Copper, TempRating::C90);
        let ctx = DerateContext {
            ambient_c: 40.0,
            current_carrying_conductors: 6,
            is_continuous: false,
        };
        let result = derated_ampacity(&spec, &ctx).unwrap();
        assert_eq!(result.temp_correction, 0.91);
        assert_eq!(result.bundling_factor, 0.80);
        assert!((result.derated_ampacity - 40.0 * 0.91 * 0.80).abs() < 1e-9);
    }

    #[test]
    fn test_continuous_usable() {
        let ctx = DerateContext {
            is_continuous: true,
            ..DerateContext::default()
        };
        let result = derated_ampacity(&cu75(WireSize::Awg8), &ctx).unwrap();
        assert_eq!(result.continuous_usable_ampacity, Some(40.0));
        assert_eq!(result.usable_ampacity(), 40.0);
    }

    #[test]
    fn test_unknown_conductor_is_none() {
        let spec = ConductorSpec::new(WireSize::Awg14, Material::Aluminum, TempRating::C75);
        assert!(derated_ampacity(&spec, &DerateContext::default()).is_none());
    }

    #[test]
    fn test_ambient_beyond_rating_zeroes_ampacity() {
        let spec = ConductorSpec::new(WireSize::Awg6, Material::Copper, TempRating::C60);
        let ctx = DerateContext {
            ambient_c: 60.0,
            ..DerateContext::default()
        };
        let result = derated_ampacity(&spec, &ctx).unwrap();
        assert!(result.exceeds_insulation_rating());
        assert_eq!(result.usable_ampacity(), 0.0);
    }

    #[test]
    fn test_termination_cap() {
        // 6 AWG Cu THHN: 75 A at 90 °C, capped to 65 A by 75 °C terminals.
        let spec = ConductorSpec::new(WireSize::Awg6, Material::Copper, TempRating::C90);
        let result =
            derated_ampacity_with_termination(&spec, &DerateContext::default(), Some(TempRating::C75)).unwrap();
        assert_eq!(result.derated_ampacity, 75.0);
        assert_eq!(result.termination_limit, Some(65.0));
        assert_eq!(result.usable_ampacity(), 65.0);

        // Heavily derated below the cap: the derated value governs.
        let hot = DerateContext {
            ambient_c: 50.0,
            current_carrying_conductors: 9,
            is_continuous: false,
        };
        let result = derated_ampacity_with_termination(&spec, &hot, Some(TempRating::C75)).unwrap();
        assert!((result.usable_ampacity() - 75.0 * 0.82 * 0.70).abs() < 1e-9);
    }

    #[test]
    fn test_termination_above_insulation_is_ignored() {
        let spec = ConductorSpec::new(WireSize::Awg6, Material::Copper, TempRating::C60);
        let result =
            derated_ampacity_with_termination(&spec, &DerateContext::default(), Some(TempRating::C75)).unwrap();
        assert_eq!(result.termination_limit, None);
        assert_eq!(result.usable_ampacity(), 55.0);
    }

    #[test]
    fn test_fahrenheit_context() {
        let ctx = DerateContext::from_fahrenheit(104.0, 3, false);
        assert!((ctx.ambient_c - 40.0).abs() < 1e-9);
    }
}
