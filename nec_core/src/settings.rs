//! # Engine Settings
//!
//! Defaults applied when a calculator input leaves an optional field unset.
//! Settings serialize to JSON so a host application (or `nec_cli
//! --settings`) can load them once at startup.
//!
//! ## Example
//!
//! ```rust
//! use nec_core::settings::EngineSettings;
//!
//! let settings: EngineSettings = serde_json::from_str(r#"{ "max_voltage_drop_percent": 2.0 }"#).unwrap();
//! assert_eq!(settings.max_voltage_drop_percent, 2.0);
//! assert_eq!(settings.default_ambient_c, 30.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::tables::{InsulationFamily, Material, RacewayType, TempRating};

/// Global engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Code edition label carried into export records (e.g., "NEC 2023")
    pub code: String,

    /// Ambient temperature assumed when none is given (°C)
    pub default_ambient_c: f64,

    /// Voltage drop target as a percent of system voltage
    pub max_voltage_drop_percent: f64,

    /// Terminal temperature rating assumed for equipment
    pub default_termination: Option<TempRating>,

    /// Default conductor choices for new calculations
    pub default_conductor: DefaultConductor,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            code: "NEC 2023".to_string(),
            default_ambient_c: 30.0,
            max_voltage_drop_percent: 3.0,
            default_termination: None,
            default_conductor: DefaultConductor::default(),
        }
    }
}

/// Default conductor and raceway choices for new calculations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultConductor {
    pub material: Material,
    pub temp_rating: TempRating,
    pub insulation: InsulationFamily,
    pub raceway: RacewayType,
}

impl Default for DefaultConductor {
    fn default() -> Self {
        DefaultConductor {
            material: Material::Copper,
            temp_rating: TempRating::C75,
            insulation: InsulationFamily::Thhn,
            raceway: RacewayType::Emt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.code, "NEC 2023");
        assert_eq!(settings.default_ambient_c, 30.0);
        assert_eq!(settings.default_conductor.material, Material::Copper);
    }

    #[test]
    fn test_partial_settings_json() {
        let json = r#"{ "code": "NEC 2020", "default_conductor": { "material": "Aluminum" } }"#;
        let settings: EngineSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.code, "NEC 2020");
        assert_eq!(settings.default_conductor.material, Material::Aluminum);
        assert_eq!(settings.default_conductor.temp_rating, TempRating::C75);
        assert_eq!(settings.max_voltage_drop_percent, 3.0);
    }

    #[test]
    fn test_settings_serialization() {
        let settings = EngineSettings::default();
        let json = serde_json::to_string_pretty(&settings).unwrap();
        assert!(json.contains("NEC 2023"));
        let roundtrip: EngineSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, settings);
    }
}
