//! # Conduit and Box Fill Calculators
//!
//! Conduit fill either checks a given trade size or, when none is given,
//! finds the smallest trade size of the raceway type that holds the
//! conductors. Box fill checks the 314.16(B) volume against a rated or
//! catalogue box.

use serde::{Deserialize, Serialize};

use crate::compliance::{ComplianceResult, Selection};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::fill::{self, BoxFillRequest, BoxFillResult, BoxVolume, ConduitFillResult, ConduitOccupant, RacewaySpec};
use crate::settings::EngineSettings;
use crate::tables::{RacewayType, TradeSize};

/// Input parameters for conduit fill.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Home run A",
///   "raceway_type": "Emt",
///   "trade_size": "ThreeQuarter",
///   "occupants": [
///     { "wire": { "size": "Awg12" }, "count": 6 },
///     { "wire": { "size": "Awg12", "insulation": "Thhn" }, "count": 1 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConduitFillInput {
    #[serde(default)]
    pub label: String,

    /// Raceway type; settings default when absent
    #[serde(default)]
    pub raceway_type: Option<RacewayType>,

    /// Trade size to check; absent means "find the minimum"
    #[serde(default)]
    pub trade_size: Option<TradeSize>,

    pub occupants: Vec<ConduitOccupant>,
}

impl ConduitFillInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.occupants
            .iter()
            .try_fold(0u32, |total, occupant| total.checked_add(occupant.count))
            .ok_or_else(|| {
                CalcError::invalid_input(
                    "occupants",
                    format!("{} groups", self.occupants.len()),
                    "Total conductor count overflows",
                )
            })?;
        Ok(())
    }
}

/// Results from conduit fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConduitFillCalcResult {
    /// Fill at the checked or selected trade size
    pub fill: ConduitFillResult,

    /// True when the trade size was searched rather than given
    pub searched: bool,
}

/// Compute conduit fill, searching for a trade size if none is given.
///
/// When no trade size fits, the result is the largest size, overfilled.
pub fn calculate_conduit(input: &ConduitFillInput, settings: &EngineSettings) -> CalcResult<ConduitFillCalcResult> {
    input.validate()?;
    let raceway_type = input.raceway_type.unwrap_or(settings.default_conductor.raceway);
    let occupants: Vec<ConduitOccupant> = input
        .occupants
        .iter()
        .map(|occupant| ConduitOccupant {
            wire: occupant.wire.with_default_insulation(settings.default_conductor.insulation),
            ..*occupant
        })
        .collect();

    if let Some(trade_size) = input.trade_size {
        let fill = fill::conduit_fill(&RacewaySpec::new(raceway_type, trade_size), &occupants);
        return Ok(ConduitFillCalcResult { fill, searched: false });
    }

    let fill = match fill::minimum_raceway_size(raceway_type, &occupants) {
        Some(fill) => fill,
        None => {
            let largest = crate::tables::available_trade_sizes(raceway_type)
                .last()
                .copied()
                .ok_or_else(|| CalcError::unknown_table_key("Chapter 9 Table 4", raceway_type.display_name()))?;
            fill::conduit_fill(&RacewaySpec::new(raceway_type, largest), &occupants)
        }
    };
    Ok(ConduitFillCalcResult { fill, searched: true })
}

/// Conduit fill with compliance report.
pub fn conduit_compliance(input: &ConduitFillInput, settings: &EngineSettings) -> CalcResult<ComplianceResult> {
    let result = calculate_conduit(input, settings)?;
    let mut report = ComplianceResult::new("Conduit Fill").with_conduit_fill(&result.fill);
    if !result.fill.overfilled {
        report.selected = Some(Selection::Raceway(result.fill.raceway));
    }
    report.with_details(&result)
}

/// Input parameters for box fill.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Kitchen receptacle",
///   "volume": { "rated_in3": 18.0 },
///   "conductors": [{ "size": "Awg12", "count": 6 }],
///   "devices": 1,
///   "has_equipment_ground": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxFillInput {
    #[serde(default)]
    pub label: String,

    #[serde(flatten)]
    pub request: BoxFillRequest,
}

impl BoxFillInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if let BoxVolume::RatedIn3(v) = self.request.volume {
            require_positive("volume.rated_in3", v)?;
        }
        Ok(())
    }
}

/// Compute box fill.
pub fn calculate_box(input: &BoxFillInput) -> CalcResult<BoxFillResult> {
    input.validate()?;
    Ok(fill::box_fill(&input.request))
}

/// Box fill with compliance report.
pub fn box_compliance(input: &BoxFillInput) -> CalcResult<ComplianceResult> {
    let result = calculate_box(input)?;
    let mut report = ComplianceResult::new("Box Fill").with_box_fill(&result);
    if let BoxVolume::Standard(b) = input.request.volume {
        report.selected = Some(Selection::Box(b));
    }
    report.with_details(&result)
}
