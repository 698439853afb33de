//! # Single Pile Axial Capacity
//!
//! Estimates the axial capacity of one bored/driven pile from SPT blow
//! counts, layer by layer down the soil profile.
//!
//! ## Method
//!
//! For each layer, with N the corrected SPT value (see [`crate::spt`]):
//!
//! | Soil class   | Unit skin friction fs | Unit end bearing qp |
//! |--------------|-----------------------|---------------------|
//! | Cohesionless | 4N / 200 (tsf)        | 4N (tsf)            |
//! | Cohesive     | 0.55 c (tsf)          | 9 c (tsf)           |
//!
//! where c = k × N (kPa) converted to tsf. Both unit values are converted to
//! kN/m², multiplied by the shaft area of the layer and by the pile base
//! area respectively.
//!
//! Skin friction is summed down the profile. End bearing is **not**: each
//! row reports the capacity the pile would have with its tip at the bottom
//! of that layer, i.e. the end bearing of that layer plus all skin friction
//! above it.
//!
//! ## Example
//!
//! ```rust
//! use pile_core::calculations::pile::{calculate, PileCapacityInput, PileParameters};
//! use pile_core::soil::{SoilLayer, SoilType};
//!
//! let input = PileCapacityInput {
//!     label: "P-1".to_string(),
//!     pile: PileParameters::new(0.5, 2.5, 3.0),
//!     layers: vec![SoilLayer::new(SoilType::Cohesionless, 5.0, 10.0)],
//! };
//!
//! let result = calculate(&input).unwrap();
//! let tip = result.final_layer().unwrap();
//! assert!((tip.allowable_capacity_kn - 361.0).abs() < 0.1);
//! ```

use std::f64::consts::PI;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::soil::{SoilLayer, SoilLayerInput, SoilType};
use crate::spt::correct_spt;
use crate::units::{KiloNewtons, KiloPascals, KnPerSqM, Meters, SqMeters, TonsPerSqFt};

/// Adhesion factor α applied to cohesion for shaft friction in clay
pub const ADHESION_FACTOR: f64 = 0.55;

/// Bearing capacity factor Nc for the pile tip in clay
pub const COHESIVE_BEARING_FACTOR: f64 = 9.0;

/// Multiplier on N for cohesionless correlations (tsf)
pub const COHESIONLESS_N_FACTOR: f64 = 4.0;

/// Divisor turning 4N into unit skin friction for cohesionless soil
pub const COHESIONLESS_SKIN_DIVISOR: f64 = 200.0;

/// Typical range of the cohesion multiplier k, soft to stiff clay
pub const K_VALUE_TYPICAL_RANGE: (f64, f64) = (2.4, 4.0);

/// Field N above which the blow count is usually refusal
const SPT_REFUSAL: f64 = 100.0;

/// Pile geometry and design parameters.
///
/// ## JSON Example
///
/// ```json
/// { "diameter_m": 0.5, "factor_of_safety": 2.5, "k_value": 3.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PileParameters {
    /// Pile shaft diameter (m)
    pub diameter_m: f64,

    /// Factor of safety applied to ultimate capacity
    pub factor_of_safety: f64,

    /// Cohesion multiplier: c (kPa) = k × N
    pub k_value: f64,
}

impl PileParameters {
    pub fn new(diameter_m: f64, factor_of_safety: f64, k_value: f64) -> Self {
        PileParameters {
            diameter_m,
            factor_of_safety,
            k_value,
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        positive("diameter_m", self.diameter_m, "Pile diameter must be positive")?;
        positive(
            "factor_of_safety",
            self.factor_of_safety,
            "Factor of safety must be positive",
        )?;
        positive("k_value", self.k_value, "Cohesion multiplier k must be positive")?;
        Ok(())
    }

    /// Pile tip area π(d/2)²
    pub fn base_area(&self) -> SqMeters {
        let radius = self.diameter_m / 2.0;
        SqMeters(PI * (radius * radius))
    }

    /// Shaft surface area πdL over a layer of the given thickness
    pub fn shaft_area(&self, thickness: Meters) -> SqMeters {
        SqMeters(PI * self.diameter_m * thickness.0)
    }
}

fn positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), reason));
    }
    Ok(())
}

/// Check one layer against the bottom depth of the layer above it.
///
/// `index` is 0-based; messages use 1-based layer numbers.
fn validate_layer(index: usize, layer: &SoilLayer, previous_depth_m: f64) -> CalcResult<()> {
    let number = index + 1;
    if !layer.depth_m.is_finite() {
        return Err(CalcError::invalid_input(
            format!("layers[{number}].depth_m"),
            layer.depth_m.to_string(),
            "Depth must be a finite number",
        ));
    }
    if layer.depth_m <= previous_depth_m {
        return Err(CalcError::invalid_input(
            format!("layers[{number}].depth_m"),
            layer.depth_m.to_string(),
            format!("Depth must be greater than the layer above ({previous_depth_m} m)"),
        ));
    }
    if !layer.field_spt.is_finite() || layer.field_spt < 0.0 {
        return Err(CalcError::invalid_input(
            format!("layers[{number}].field_spt"),
            layer.field_spt.to_string(),
            "SPT blow count must be zero or greater",
        ));
    }
    Ok(())
}

/// Input for a single pile capacity run.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "P-1",
///   "pile": { "diameter_m": 0.5, "factor_of_safety": 2.5, "k_value": 3.0 },
///   "layers": [
///     { "soil_type": "Cohesive", "depth_m": 3.0, "field_spt": 6.0 },
///     { "soil_type": "Cohesionless", "depth_m": 9.0, "field_spt": 24.0 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PileCapacityInput {
    /// User label for this pile (e.g., "P-1", "BH-2 pile")
    pub label: String,

    /// Pile geometry and design parameters
    pub pile: PileParameters,

    /// Soil profile, top to bottom
    pub layers: Vec<SoilLayer>,
}

impl PileCapacityInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.pile.validate()?;
        if self.layers.is_empty() {
            return Err(CalcError::invalid_input(
                "layers",
                "[]",
                "At least one soil layer is required",
            ));
        }
        let mut previous_depth_m = 0.0;
        for (index, layer) in self.layers.iter().enumerate() {
            validate_layer(index, layer, previous_depth_m)?;
            previous_depth_m = layer.depth_m;
        }
        Ok(())
    }
}

/// Capacity of the pile with its tip at the bottom of one layer.
///
/// All forces in kN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerResult {
    /// Bottom depth of this layer (m), echoed from input
    pub depth_m: f64,

    /// Thickness of this layer (m)
    pub layer_thickness_m: f64,

    /// Soil class of this layer
    pub soil_type: SoilType,

    /// Corrected SPT N value
    pub corrected_spt: f64,

    /// Skin friction mobilized in this layer alone
    pub layer_skin_friction_kn: f64,

    /// Skin friction summed from the surface through this layer
    pub skin_friction_kn: f64,

    /// End bearing with the tip in this layer
    pub end_bearing_kn: f64,

    /// end_bearing_kn + skin_friction_kn
    pub ultimate_capacity_kn: f64,

    /// ultimate_capacity_kn / factor of safety
    pub allowable_capacity_kn: f64,
}

/// Results of a pile capacity run, one row per soil layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PileCapacityResult {
    /// Label of the pile
    pub label: String,

    /// Parameters the run used
    pub pile: PileParameters,

    /// Pile tip area (m²)
    pub base_area_m2: f64,

    /// Per-layer results, in profile order
    pub layers: Vec<LayerResult>,
}

impl PileCapacityResult {
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Row for the deepest layer (pile tip at the bottom of the profile)
    pub fn final_layer(&self) -> Option<&LayerResult> {
        self.layers.last()
    }

    /// Row with the largest allowable capacity
    pub fn max_allowable(&self) -> Option<&LayerResult> {
        self.layers
            .iter()
            .max_by(|a, b| a.allowable_capacity_kn.total_cmp(&b.allowable_capacity_kn))
    }

    /// Row for the layer containing a tip placed at `depth_m`.
    ///
    /// Returns `None` when the depth is below the profile.
    pub fn at_depth(&self, depth_m: f64) -> Option<&LayerResult> {
        self.layers.iter().find(|row| row.depth_m >= depth_m)
    }
}

/// Calculate pile capacity for every layer of the profile.
///
/// # Arguments
///
/// * `input` - Pile parameters and soil profile
///
/// # Returns
///
/// * `Ok(PileCapacityResult)` - One row per layer, in order
/// * `Err(CalcError)` - If inputs are invalid; no rows are returned
pub fn calculate(input: &PileCapacityInput) -> CalcResult<PileCapacityResult> {
    input.validate()?;
    debug!(
        "calculating pile '{}': d={} m, FS={}, k={}, {} layers",
        input.label,
        input.pile.diameter_m,
        input.pile.factor_of_safety,
        input.pile.k_value,
        input.layers.len()
    );

    let layers = evaluate_profile(input.layers.iter().copied().map(Ok), &input.pile)?;

    Ok(PileCapacityResult {
        label: input.label.clone(),
        pile: input.pile,
        base_area_m2: input.pile.base_area().value(),
        layers,
    })
}

/// Per-layer capacities for an already-typed soil profile.
///
/// The returned vector has one entry per layer, in the same order.
pub fn compute(layers: &[SoilLayer], pile: &PileParameters) -> CalcResult<Vec<LayerResult>> {
    pile.validate()?;
    require_layers(layers.len())?;
    evaluate_profile(layers.iter().copied().map(Ok), pile)
}

/// Per-layer capacities for rows whose soil type is still text.
///
/// Soil types are resolved while walking the profile; the first unknown
/// type aborts the run with [`CalcError::InvalidSoilType`] naming the layer.
///
/// ```rust
/// use pile_core::calculations::pile::{compute_raw, PileParameters};
/// use pile_core::soil::SoilLayerInput;
/// use pile_core::CalcError;
///
/// let rows = vec![
///     SoilLayerInput::new("Cohesive", 2.0, 8.0),
///     SoilLayerInput::new("Silty", 4.0, 12.0),
/// ];
/// let err = compute_raw(&rows, &PileParameters::new(0.6, 3.0, 3.0)).unwrap_err();
/// assert!(matches!(err, CalcError::InvalidSoilType { layer: Some(2), .. }));
/// ```
pub fn compute_raw(rows: &[SoilLayerInput], pile: &PileParameters) -> CalcResult<Vec<LayerResult>> {
    pile.validate()?;
    require_layers(rows.len())?;
    let layers = rows
        .iter()
        .enumerate()
        .map(|(index, row)| SoilLayer::try_from(row).map_err(|e| e.at_layer(index + 1)));
    evaluate_profile(layers, pile)
}

fn require_layers(count: usize) -> CalcResult<()> {
    if count == 0 {
        return Err(CalcError::invalid_input(
            "layers",
            "[]",
            "At least one soil layer is required",
        ));
    }
    Ok(())
}

/// Walk the profile top to bottom, accumulating skin friction.
///
/// Any error drops the rows computed so far.
fn evaluate_profile<I>(layers: I, pile: &PileParameters) -> CalcResult<Vec<LayerResult>>
where
    I: IntoIterator<Item = CalcResult<SoilLayer>>,
{
    let layers = layers.into_iter();
    let mut results = Vec::with_capacity(layers.size_hint().0);

    let base_area = pile.base_area();
    let mut previous_depth_m = 0.0;
    let mut cumulative_skin = KiloNewtons(0.0);
    let mut k_checked = false;

    for (index, layer) in layers.enumerate() {
        let layer = layer?;
        validate_layer(index, &layer, previous_depth_m)?;

        // k only feeds cohesive layers
        if layer.soil_type == SoilType::Cohesive && !k_checked {
            check_k_value(pile.k_value);
            k_checked = true;
        }

        let thickness = Meters(layer.depth_m - previous_depth_m);
        let n_corrected = correct_spt(layer.field_spt);
        if layer.field_spt > SPT_REFUSAL {
            warn!(
                "layer {} field SPT {} is above {} blows, likely refusal",
                index + 1,
                layer.field_spt,
                SPT_REFUSAL
            );
        }

        let (unit_skin, unit_bearing) = unit_capacities(layer.soil_type, n_corrected, pile.k_value);
        let unit_skin: KnPerSqM = unit_skin.into();
        let unit_bearing: KnPerSqM = unit_bearing.into();

        let layer_skin = unit_skin * pile.shaft_area(thickness);
        cumulative_skin = cumulative_skin + layer_skin;
        let end_bearing = unit_bearing * base_area;

        let ultimate = end_bearing + cumulative_skin;
        let allowable = ultimate / pile.factor_of_safety;

        trace!(
            "layer {}: {} N={} fs={} kN/m2 qp={} kN/m2",
            index + 1,
            layer.soil_type,
            n_corrected,
            unit_skin.value(),
            unit_bearing.value()
        );
        debug!(
            "layer {} @ {} m: Qs={:.3} kN, Qb={:.3} kN, Qa={:.3} kN",
            index + 1,
            layer.depth_m,
            cumulative_skin.value(),
            end_bearing.value(),
            allowable.value()
        );

        results.push(LayerResult {
            depth_m: layer.depth_m,
            layer_thickness_m: thickness.value(),
            soil_type: layer.soil_type,
            corrected_spt: n_corrected,
            layer_skin_friction_kn: layer_skin.value(),
            skin_friction_kn: cumulative_skin.value(),
            end_bearing_kn: end_bearing.value(),
            ultimate_capacity_kn: ultimate.value(),
            allowable_capacity_kn: allowable.value(),
        });
        previous_depth_m = layer.depth_m;
    }

    Ok(results)
}

/// Unit skin friction and unit end bearing in tsf.
fn unit_capacities(soil_type: SoilType, n_corrected: f64, k_value: f64) -> (TonsPerSqFt, TonsPerSqFt) {
    match soil_type {
        SoilType::Cohesionless => (
            TonsPerSqFt(COHESIONLESS_N_FACTOR * n_corrected / COHESIONLESS_SKIN_DIVISOR),
            TonsPerSqFt(COHESIONLESS_N_FACTOR * n_corrected),
        ),
        SoilType::Cohesive => {
            let cohesion: TonsPerSqFt = KiloPascals(k_value * n_corrected).into();
            (
                TonsPerSqFt(ADHESION_FACTOR * cohesion.value()),
                TonsPerSqFt(COHESIVE_BEARING_FACTOR * cohesion.value()),
            )
        }
    }
}

fn check_k_value(k_value: f64) {
    let (low, high) = K_VALUE_TYPICAL_RANGE;
    if k_value < low || k_value > high {
        warn!("cohesion multiplier k={k_value} is outside the typical range {low} to {high}");
    }
}
