//! # Raw Form Inputs
//!
//! String-field forms as a host UI collects them. Converting a form yields
//! `None` when the input is insufficient: a required field that is blank or
//! not a number, or an optional field that is filled in but unparseable. A
//! blank optional field takes the [`EngineSettings`] default.
//!
//! ## Example
//!
//! ```rust
//! use nec_core::calculations::forms::ConductorSizingForm;
//! use nec_core::settings::EngineSettings;
//!
//! let mut form = ConductorSizingForm::default();
//! form.load_amps = "20".to_string();
//! assert!(form.to_input(&EngineSettings::default()).is_none()); // voltage missing
//!
//! form.system_voltage = "120".to_string();
//! assert!(form.to_input(&EngineSettings::default()).is_some());
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::fill::{BoxConductor, BoxFillRequest, BoxVolume};
use crate::settings::EngineSettings;
use crate::sizing::CircuitPhase;
use crate::tables::{Material, TempRating, WireSize};

use super::conductor::ConductorSizingInput;
use super::raceway::BoxFillInput;

/// Required numeric field: blank or non-numeric is `None`
fn required<T: FromStr>(field: &str) -> Option<T> {
    field.trim().parse().ok()
}

/// Optional field: blank is `Some(None)`, unparseable is `None`
fn optional<T: FromStr>(field: &str) -> Option<Option<T>> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        Some(None)
    } else {
        trimmed.parse().ok().map(Some)
    }
}

/// Raw conductor sizing form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConductorSizingForm {
    pub label: String,
    pub load_amps: String,
    pub system_voltage: String,
    pub is_continuous: bool,
    pub three_phase: bool,
    pub material: Option<Material>,
    pub temp_rating: Option<TempRating>,
    pub ambient_c: String,
    pub current_carrying_conductors: String,
    pub one_way_length_ft: String,
    pub max_voltage_drop_percent: String,
}

impl ConductorSizingForm {
    /// Parse into an input; `None` when the form is insufficient.
    pub fn to_input(&self, settings: &EngineSettings) -> Option<ConductorSizingInput> {
        let load_amps = required(&self.load_amps)?;
        let system_voltage = required(&self.system_voltage)?;
        let ambient_c: Option<f64> = optional(&self.ambient_c)?;
        let current_carrying: Option<u32> = optional(&self.current_carrying_conductors)?;
        let one_way_length_ft = optional(&self.one_way_length_ft)?;
        let max_voltage_drop_percent: Option<f64> = optional(&self.max_voltage_drop_percent)?;

        let mut input = ConductorSizingInput::new(self.label.clone(), load_amps, system_voltage);
        input.is_continuous = self.is_continuous;
        input.phase = if self.three_phase {
            CircuitPhase::ThreePhase
        } else {
            CircuitPhase::SinglePhase
        };
        input.material = Some(self.material.unwrap_or(settings.default_conductor.material));
        input.temp_rating = Some(self.temp_rating.unwrap_or(settings.default_conductor.temp_rating));
        input.ambient_c = Some(ambient_c.unwrap_or(settings.default_ambient_c));
        if let Some(count) = current_carrying {
            input.current_carrying_conductors = count;
        }
        input.one_way_length_ft = one_way_length_ft;
        input.max_voltage_drop_percent = one_way_length_ft
            .map(|_| max_voltage_drop_percent.unwrap_or(settings.max_voltage_drop_percent));
        Some(input)
    }
}

/// Raw box fill form with a single conductor size.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxFillForm {
    pub label: String,
    pub box_volume_in3: String,
    /// Size label as typed ("12", "#12", "12 AWG")
    pub conductor_size: String,
    pub conductor_count: String,
    pub devices: String,
    pub has_equipment_ground: bool,
    pub has_internal_clamp: bool,
    pub support_fittings: String,
}

impl BoxFillForm {
    /// Parse into an input; `None` when the form is insufficient.
    pub fn to_input(&self) -> Option<BoxFillInput> {
        let volume: f64 = required(&self.box_volume_in3)?;
        let size: WireSize = required(&self.conductor_size)?;
        let count = required(&self.conductor_count)?;
        let devices: Option<u32> = optional(&self.devices)?;
        let support_fittings: Option<u32> = optional(&self.support_fittings)?;

        Some(BoxFillInput {
            label: self.label.clone(),
            request: BoxFillRequest {
                volume: BoxVolume::RatedIn3(volume),
                conductors: vec![BoxConductor { size, count }],
                devices: devices.unwrap_or(0),
                has_equipment_ground: self.has_equipment_ground,
                has_internal_clamp: self.has_internal_clamp,
                support_fittings: support_fittings.unwrap_or(0),
            },
        })
    }
}
