//! # Capacity Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`pile`] - Single pile axial capacity from SPT blow counts

pub mod pile;

// Re-export commonly used types
pub use pile::{
    calculate, compute, compute_raw, LayerResult, PileCapacityInput, PileCapacityResult,
    PileParameters,
};
