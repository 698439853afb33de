//! # Unit Types
//!
//! Type-safe wrappers for the units that appear in a pile capacity run.
//! These are plain `f64` newtypes that serialize as bare numbers.
//!
//! ## Mixed Unit Basis
//!
//! The SPT correlations are stated in US customary units, while geometry and
//! results are metric:
//! - Length: metres (m)
//! - Area: square metres (m²)
//! - Cohesion: kilopascals (kPa), converted to tons per square foot (tsf)
//! - Unit skin friction / end bearing: tsf, converted to kN/m²
//! - Force: kilonewtons (kN), with kips for display only
//!
//! The conversion factors are the fixed engineering constants below and are
//! applied as single multiplications so results are reproducible exactly.
//!
//! ## Example
//!
//! ```rust
//! use pile_core::units::{KiloPascals, TonsPerSqFt, KnPerSqM};
//!
//! let cohesion = KiloPascals(100.0);
//! let tsf: TonsPerSqFt = cohesion.into();
//! let stress: KnPerSqM = tsf.into();
//! assert!((tsf.0 - 0.93).abs() < 1e-12);
//! assert!((stress.0 - 89.0568).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// kPa → ton/ft²
pub const KPA_TO_TSF: f64 = 0.0093;

/// ton/ft² → kN/m²
pub const TSF_TO_KN_PER_M2: f64 = 95.76;

/// kN → kip
pub const KN_TO_KIP: f64 = 0.224809;

// ============================================================================
// Length / Area
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Area in square metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMeters(pub f64);

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in kilopascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloPascals(pub f64);

/// Stress in (short) tons per square foot
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TonsPerSqFt(pub f64);

/// Stress in kilonewtons per square metre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnPerSqM(pub f64);

impl From<KiloPascals> for TonsPerSqFt {
    fn from(kpa: KiloPascals) -> Self {
        TonsPerSqFt(kpa.0 * KPA_TO_TSF)
    }
}

impl From<TonsPerSqFt> for KnPerSqM {
    fn from(tsf: TonsPerSqFt) -> Self {
        KnPerSqM(tsf.0 * TSF_TO_KN_PER_M2)
    }
}

impl Mul<SqMeters> for KnPerSqM {
    type Output = KiloNewtons;
    fn mul(self, area: SqMeters) -> KiloNewtons {
        KiloNewtons(area.0 * self.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

/// Force in kips (display unit only)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kips(pub f64);

impl From<KiloNewtons> for Kips {
    fn from(kn: KiloNewtons) -> Self {
        Kips(kn.0 * KN_TO_KIP)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(SqMeters);
impl_arithmetic!(KiloPascals);
impl_arithmetic!(TonsPerSqFt);
impl_arithmetic!(KnPerSqM);
impl_arithmetic!(KiloNewtons);
impl_arithmetic!(Kips);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kpa_to_tsf() {
        let tsf: TonsPerSqFt = KiloPascals(52.5).into();
        assert_eq!(tsf.0, 52.5 * 0.0093);
    }

    #[test]
    fn test_tsf_to_kn_per_m2() {
        let stress: KnPerSqM = TonsPerSqFt(0.2).into();
        assert!((stress.0 - 19.152).abs() < 1e-12);
    }

    #[test]
    fn test_kn_to_kips() {
        let kips: Kips = KiloNewtons(100.0).into();
        assert!((kips.0 - 22.4809).abs() < 1e-9);
    }

    #[test]
    fn test_stress_times_area() {
        let force = KnPerSqM(100.0) * SqMeters(0.5);
        assert_eq!(force, KiloNewtons(50.0));
    }

    #[test]
    fn test_arithmetic() {
        let a = KiloNewtons(10.0);
        let b = KiloNewtons(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_serialization() {
        let depth = Meters(12.5);
        let json = serde_json::to_string(&depth).unwrap();
        assert_eq!(json, "12.5");

        let roundtrip: Meters = serde_json::from_str(&json).unwrap();
        assert_eq!(depth, roundtrip);
    }
}
