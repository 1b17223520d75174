//! # Unit Types
//!
//! Type-safe wrappers for electrical units. These provide compile-time
//! safety against unit confusion while remaining lightweight (just f64 wrappers).
//!
//! ## Design Philosophy
//!
//! We use simple newtype wrappers rather than a full units library because:
//! - NEC tables use a small, consistent set of units
//! - We want JSON serialization to be clean (just numbers)
//! - Minimal runtime overhead
//!
//! Calculator inputs and results keep plain `f64` fields with a unit suffix
//! (`load_amps`, `length_ft`) so the JSON stays flat. The wrappers are used at
//! the conversion and summation points.
//!
//! ## Example
//!
//! ```rust
//! use nec_core::units::{Celsius, Fahrenheit, Volts};
//!
//! let ambient: Celsius = Fahrenheit(104.0).into();
//! assert!((ambient.0 - 40.0).abs() < 1e-9);
//!
//! let max_drop = Volts(120.0).percent(3.0);
//! assert!((max_drop.0 - 3.6).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

// ============================================================================
// Temperature Units
// ============================================================================

/// Temperature in degrees Celsius (the NEC correction tables are keyed in °C)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Celsius(pub f64);

/// Temperature in degrees Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fahrenheit(pub f64);

impl From<Fahrenheit> for Celsius {
    fn from(f: Fahrenheit) -> Self {
        Celsius((f.0 - 32.0) * 5.0 / 9.0)
    }
}

impl From<Celsius> for Fahrenheit {
    fn from(c: Celsius) -> Self {
        Fahrenheit(c.0 * 9.0 / 5.0 + 32.0)
    }
}

// ============================================================================
// Electrical Units
// ============================================================================

/// Current in amperes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amps(pub f64);

/// Potential in volts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Volts(pub f64);

impl Volts {
    /// A percentage of this voltage (e.g., 3% of 120 V = 3.6 V)
    pub fn percent(self, pct: f64) -> Volts {
        Volts(self.0 * pct / 100.0)
    }

    /// Express another voltage as a percentage of this one
    pub fn ratio_percent(self, part: Volts) -> f64 {
        if self.0 == 0.0 {
            0.0
        } else {
            part.0 / self.0 * 100.0
        }
    }
}

impl Add for Amps {
    type Output = Amps;
    fn add(self, rhs: Amps) -> Amps {
        Amps(self.0 + rhs.0)
    }
}

impl Mul<f64> for Amps {
    type Output = Amps;
    fn mul(self, rhs: f64) -> Amps {
        Amps(self.0 * rhs)
    }
}

impl std::iter::Sum for Amps {
    fn sum<I: Iterator<Item = Amps>>(iter: I) -> Amps {
        iter.fold(Amps(0.0), |acc, a| acc + a)
    }
}
