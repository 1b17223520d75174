//! # nec_core - NEC Compliance Calculation Engine
//!
//! `nec_core` sizes conductors, raceways, boxes, and overcurrent devices per
//! NFPA 70 (National Electrical Code) and reports whether a proposed
//! installation satisfies the layered code constraints. All inputs and outputs
//! are JSON-serializable, so a host UI or export pipeline can drive it
//! without linking against any of its types.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Total lookups**: Table misses are `None`, never panics
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use nec_core::calculations::{CalculationItem, ConductorSizingInput};
//! use nec_core::settings::EngineSettings;
//!
//! let item = CalculationItem::ConductorSizing(ConductorSizingInput {
//!     is_continuous: true,
//!     one_way_length_ft: Some(100.0),
//!     ..ConductorSizingInput::new("Kitchen", 20.0, 120.0)
//! });
//!
//! let report = item.run(&EngineSettings::default()).unwrap();
//! assert!(report.passes());
//!
//! // Flatten for export
//! let record = report.to_export_record(&item, &EngineSettings::default()).unwrap();
//! let json = serde_json::to_string_pretty(&record).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`tables`] - Immutable NEC lookup tables and size ordering
//! - [`derating`] - Ampacity derating chain
//! - [`sizing`] - Minimum conforming conductor search, voltage drop, grounding
//! - [`fill`] - Conduit and box fill
//! - [`loads`] - Load aggregation, diversity, VFD sizing
//! - [`compliance`] - Violations, compliance results, export records
//! - [`calculations`] - Calculator inputs and the tagged `CalculationItem`
//! - [`settings`] - Engine-wide defaults
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod compliance;
pub mod derating;
pub mod errors;
pub mod fill;
pub mod loads;
pub mod settings;
pub mod sizing;
pub mod tables;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::CalculationItem;
pub use compliance::{ComplianceResult, ExportRecord, Violation};
pub use errors::{CalcError, CalcResult};
pub use settings::EngineSettings;
pub use tables::{TradeSize, WireSize};
