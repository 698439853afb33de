//! # pile_core - Single Pile Capacity Engine
//!
//! `pile_core` estimates the axial capacity of a single pile in a layered
//! soil profile from Standard Penetration Test (SPT) blow counts. It is meant
//! for preliminary design when cohesion and friction angle have not been
//! measured.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **All or nothing**: A failed run never returns partial rows
//!
//! ## Quick Start
//!
//! ```rust
//! use pile_core::calculations::pile::{calculate, PileCapacityInput, PileParameters};
//! use pile_core::soil::{SoilLayer, SoilType};
//!
//! let input = PileCapacityInput {
//!     label: "P-1".to_string(),
//!     pile: PileParameters::new(0.6, 2.5, 3.0),
//!     layers: vec![
//!         SoilLayer::new(SoilType::Cohesive, 4.0, 8.0),
//!         SoilLayer::new(SoilType::Cohesionless, 12.0, 30.0),
//!     ],
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.layers.len(), 2);
//!
//! // Serialize to JSON for transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The capacity engine
//! - [`soil`] - Soil classes and profile rows
//! - [`spt`] - SPT blow-count correction
//! - [`input`] - Profile parsing (JSON/TOML) and validation
//! - [`report`] - Text and JSON rendering of results
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod input;
pub mod report;
pub mod soil;
pub mod spt;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::pile::{calculate, compute, LayerResult, PileCapacityInput, PileCapacityResult, PileParameters};
pub use errors::{CalcError, CalcResult};
pub use input::{InputDefaults, ProfileInput};
pub use soil::{SoilLayer, SoilLayerInput, SoilType};
