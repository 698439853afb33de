//! # Profile Input
//!
//! Turns user-supplied data into a validated [`PileCapacityInput`]. Profiles
//! come either from a JSON/TOML file or from field-by-field text entry; both
//! paths end in the same validation so the engine only ever sees checked
//! input.
//!
//! ## File Format
//!
//! ```toml
//! label = "P-1"
//! diameter_m = 0.5
//! factor_of_safety = 2.5
//! k_value = 3.0
//!
//! [[layers]]
//! soil_type = "Cohesive"
//! depth_m = 3.0
//! field_spt = 6.0
//!
//! [[layers]]
//! soil_type = "Cohesionless"
//! depth_m = 9.0
//! field_spt = 24.0
//! ```
//!
//! `factor_of_safety` and `k_value` may be left out when defaults are
//! supplied (see [`InputDefaults`]).
//!
//! ## Example
//!
//! ```rust
//! use pile_core::input::{InputDefaults, ProfileInput};
//!
//! let json = r#"{
//!     "diameter_m": 0.5,
//!     "layers": [{ "soil_type": "cohesionless", "depth_m": 5.0, "field_spt": 10.0 }]
//! }"#;
//! let defaults = InputDefaults { factor_of_safety: Some(2.5), k_value: Some(3.0) };
//! let input = ProfileInput::from_json_str(json).unwrap().into_input(&defaults).unwrap();
//! assert_eq!(input.pile.factor_of_safety, 2.5);
//! ```

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::calculations::pile::{PileCapacityInput, PileParameters};
use crate::errors::{CalcError, CalcResult};
use crate::soil::{SoilLayer, SoilLayerInput};

/// Label used when a profile does not name its pile
pub const DEFAULT_LABEL: &str = "Pile";

fn default_label() -> String {
    DEFAULT_LABEL.to_string()
}

/// Fallback values for optional profile fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputDefaults {
    pub factor_of_safety: Option<f64>,
    pub k_value: Option<f64>,
}

/// A pile and soil profile as written by the user, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileInput {
    /// User label for the pile
    #[serde(default = "default_label")]
    pub label: String,

    /// Pile diameter (m)
    pub diameter_m: f64,

    /// Factor of safety; falls back to [`InputDefaults`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factor_of_safety: Option<f64>,

    /// Cohesion multiplier k; falls back to [`InputDefaults`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k_value: Option<f64>,

    /// Soil profile rows, top to bottom
    pub layers: Vec<SoilLayerInput>,
}

impl ProfileInput {
    /// Parse a profile from JSON text.
    pub fn from_json_str(text: &str) -> CalcResult<Self> {
        serde_json::from_str(text).map_err(CalcError::serialization)
    }

    /// Parse a profile from TOML text.
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        toml::from_str(text).map_err(CalcError::serialization)
    }

    /// Read a profile file; the format is chosen by extension (`.json` or `.toml`).
    pub fn load(path: &Path) -> CalcResult<Self> {
        let path_str = path.display().to_string();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let parse: fn(&str) -> CalcResult<Self> = match extension.as_deref() {
            Some("json") => Self::from_json_str,
            Some("toml") => Self::from_toml_str,
            other => {
                return Err(CalcError::invalid_input(
                    "profile",
                    other.unwrap_or(""),
                    "Profile file must have a .json or .toml extension",
                ))
            }
        };

        let text = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", &path_str, e.to_string()))?;
        debug!("loaded profile {} ({} bytes)", path_str, text.len());
        parse(&text)
    }

    /// Resolve soil types and defaults, then validate.
    ///
    /// An unknown soil type is reported with its 1-based layer number.
    pub fn into_input(self, defaults: &InputDefaults) -> CalcResult<PileCapacityInput> {
        let factor_of_safety = self
            .factor_of_safety
            .or(defaults.factor_of_safety)
            .ok_or_else(|| CalcError::missing_field("factor_of_safety"))?;
        let k_value = self
            .k_value
            .or(defaults.k_value)
            .ok_or_else(|| CalcError::missing_field("k_value"))?;

        let layers = self
            .layers
            .iter()
            .enumerate()
            .map(|(index, row)| SoilLayer::try_from(row).map_err(|e| e.at_layer(index + 1)))
            .collect::<CalcResult<Vec<_>>>()?;

        let input = PileCapacityInput {
            label: self.label,
            pile: PileParameters::new(self.diameter_m, factor_of_safety, k_value),
            layers,
        };
        input.validate()?;
        Ok(input)
    }
}

impl From<&PileCapacityInput> for ProfileInput {
    fn from(input: &PileCapacityInput) -> Self {
        ProfileInput {
            label: input.label.clone(),
            diameter_m: input.pile.diameter_m,
            factor_of_safety: Some(input.pile.factor_of_safety),
            k_value: Some(input.pile.k_value),
            layers: input.layers.iter().copied().map(SoilLayerInput::from).collect(),
        }
    }
}

/// Parse a numeric text field, naming the field on failure.
pub fn parse_number(field: &str, text: &str) -> CalcResult<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::invalid_input(field, trimmed, "Please enter a valid number")),
    }
}

/// Parse the number of soil layers.
pub fn parse_layer_count(text: &str) -> CalcResult<usize> {
    let trimmed = text.trim();
    match trimmed.parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(CalcError::invalid_input(
            "layer_count",
            trimmed,
            "Please enter a valid number for the number of layers",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soil::SoilType;

    const TOML_PROFILE: &str = r#"
label = "BH-1"
diameter_m = 0.6
factor_of_safety = 3.0
k_value = 3.5

[[layers]]
soil_type = "Cohesive"
depth_m = 3.0
field_spt = 6.0

[[layers]]
soil_type = "cohesionless"
depth_m = 9.0
field_spt = 24.0
"#;

    #[test]
    fn test_toml_profile() {
        let profile = ProfileInput::from_toml_str(TOML_PROFILE).unwrap();
        assert_eq!(profile.label, "BH-1");
        assert_eq!(profile.layers.len(), 2);

        let input = profile.into_input(&InputDefaults::default()).unwrap();
        assert_eq!(input.layers[1].soil_type, SoilType::Cohesionless);
        assert_eq!(input.pile.k_value, 3.5);
    }

    #[test]
    fn test_json_profile_with_defaults() {
        let json = r#"{
            "diameter_m": 0.4,
            "layers": [{ "soil_type": "Cohesive", "depth_m": 3, "field_spt": 20 }]
        }"#;
        let profile = ProfileInput::from_json_str(json).unwrap();
        assert_eq!(profile.label, DEFAULT_LABEL);

        let defaults = InputDefaults {
            factor_of_safety: Some(3.0),
            k_value: Some(3.0),
        };
        let input = profile.into_input(&defaults).unwrap();
        assert_eq!(input.pile.factor_of_safety, 3.0);
        assert_eq!(input.layers[0].depth_m, 3.0);
    }

    #[test]
    fn test_profile_value_beats_default() {
        let profile = ProfileInput::from_toml_str(TOML_PROFILE).unwrap();
        let defaults = InputDefaults {
            factor_of_safety: Some(2.0),
            k_value: Some(2.4),
        };
        let input = profile.into_input(&defaults).unwrap();
        assert_eq!(input.pile.factor_of_safety, 3.0);
    }

    #[test]
    fn test_missing_factor_of_safety() {
        let json = r#"{ "diameter_m": 0.4, "k_value": 3.0, "layers": [] }"#;
        let err = ProfileInput::from_json_str(json)
            .unwrap()
            .into_input(&InputDefaults::default())
            .unwrap_err();
        assert_eq!(err, CalcError::missing_field("factor_of_safety"));
    }

    #[test]
    fn test_unknown_soil_type_names_layer() {
        let text = TOML_PROFILE.replace("\"cohesionless\"", "\"Silty\"");
        let err = ProfileInput::from_toml_str(&text)
            .unwrap()
            .into_input(&InputDefaults::default())
            .unwrap_err();
        assert_eq!(
            err,
            CalcError::InvalidSoilType {
                value: "Silty".to_string(),
                layer: Some(2),
            }
        );
    }

    #[test]
    fn test_validation_runs() {
        let text = TOML_PROFILE.replace("depth_m = 9.0", "depth_m = 2.0");
        let err = ProfileInput::from_toml_str(&text)
            .unwrap()
            .into_input(&InputDefaults::default())
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_malformed_json() {
        let err = ProfileInput::from_json_str("{ \"diameter_m\": \"wide\" }").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let err = ProfileInput::load(Path::new("profile.csv")).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_load_missing_file() {
        let err = ProfileInput::load(Path::new("does/not/exist.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("pile_core_profile_{}.toml", std::process::id()));
        fs::write(&path, TOML_PROFILE).unwrap();
        let profile = ProfileInput::load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(profile.diameter_m, 0.6);
    }

    #[test]
    fn test_roundtrip_from_input() {
        let input = ProfileInput::from_toml_str(TOML_PROFILE)
            .unwrap()
            .into_input(&InputDefaults::default())
            .unwrap();
        let profile = ProfileInput::from(&input);
        let again = profile.into_input(&InputDefaults::default()).unwrap();
        assert_eq!(input, again);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("diameter_m", " 0.45 ").unwrap(), 0.45);
        assert!(parse_number("diameter_m", "abc").is_err());
        assert!(parse_number("diameter_m", "inf").is_err());
    }

    #[test]
    fn test_parse_layer_count() {
        assert_eq!(parse_layer_count("3").unwrap(), 3);
        assert!(parse_layer_count("0").is_err());
        assert!(parse_layer_count("two").is_err());
    }
}
