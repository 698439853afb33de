//! # Soil Profile
//!
//! Soil classes and layer rows of the SPT boring log.
//!
//! Each row describes one stratum by the depth of its **bottom** measured
//! from the ground surface, so a profile is a table of strictly increasing
//! depths. The thickness of a layer is the difference to the row above it
//! (ground surface for the first row).
//!
//! ## Example
//!
//! ```rust
//! use pile_core::soil::{SoilLayer, SoilLayerInput, SoilType};
//!
//! let raw = SoilLayerInput::new("cohesive", 3.0, 20.0);
//! let layer = SoilLayer::try_from(raw).unwrap();
//! assert_eq!(layer.soil_type, SoilType::Cohesive);
//!
//! assert!(SoilType::from_str_flexible("Silty").is_err());
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Soil behaviour class used to pick the SPT correlation.
///
/// Deserializes case-insensitively: `"COHESIVE"`, `"cohesive"` and
/// `"Cohesive"` are all accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum SoilType {
    /// Sands and gravels; capacity correlated directly to N
    Cohesionless,
    /// Clays and silts; capacity from cohesion estimated as k × N
    Cohesive,
}

impl SoilType {
    /// Both soil classes, in menu order
    pub const ALL: [SoilType; 2] = [SoilType::Cohesionless, SoilType::Cohesive];

    /// Parse ignoring case and surrounding whitespace.
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "cohesionless" => Ok(SoilType::Cohesionless),
            "cohesive" => Ok(SoilType::Cohesive),
            _ => Err(CalcError::invalid_soil_type(s)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SoilType::Cohesionless => "Cohesionless",
            SoilType::Cohesive => "Cohesive",
        }
    }
}

impl FromStr for SoilType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoilType::from_str_flexible(s)
    }
}

impl TryFrom<String> for SoilType {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SoilType::from_str_flexible(&value)
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One validated row of the soil profile.
///
/// ## JSON Example
///
/// ```json
/// { "soil_type": "Cohesionless", "depth_m": 5.0, "field_spt": 10.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilLayer {
    /// Soil class of this stratum
    pub soil_type: SoilType,

    /// Depth from ground surface to the bottom of this layer (m)
    pub depth_m: f64,

    /// Raw field SPT blow count (blows / 300 mm)
    pub field_spt: f64,
}

impl SoilLayer {
    pub fn new(soil_type: SoilType, depth_m: f64, field_spt: f64) -> Self {
        SoilLayer {
            soil_type,
            depth_m,
            field_spt,
        }
    }
}

/// One row of the soil profile as typed by the user.
///
/// The soil type is still free text; conversion to [`SoilLayer`] is where
/// an unknown class is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilLayerInput {
    /// Soil class text, e.g. "Cohesionless"
    pub soil_type: String,

    /// Depth from ground surface to the bottom of this layer (m)
    pub depth_m: f64,

    /// Raw field SPT blow count
    pub field_spt: f64,
}

impl SoilLayerInput {
    pub fn new(soil_type: impl Into<String>, depth_m: f64, field_spt: f64) -> Self {
        SoilLayerInput {
            soil_type: soil_type.into(),
            depth_m,
            field_spt,
        }
    }
}

impl TryFrom<SoilLayerInput> for SoilLayer {
    type Error = CalcError;

    fn try_from(row: SoilLayerInput) -> Result<Self, Self::Error> {
        SoilLayer::try_from(&row)
    }
}

impl TryFrom<&SoilLayerInput> for SoilLayer {
    type Error = CalcError;

    fn try_from(row: &SoilLayerInput) -> Result<Self, Self::Error> {
        Ok(SoilLayer {
            soil_type: SoilType::from_str_flexible(&row.soil_type)?,
            depth_m: row.depth_m,
            field_spt: row.field_spt,
        })
    }
}

impl From<SoilLayer> for SoilLayerInput {
    fn from(layer: SoilLayer) -> Self {
        SoilLayerInput {
            soil_type: layer.soil_type.display_name().to_string(),
            depth_m: layer.depth_m,
            field_spt: layer.field_spt,
        }
    }
}
