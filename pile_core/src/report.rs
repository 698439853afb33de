//! # Result Reports
//!
//! Renders a [`PileCapacityResult`] for people (plain-text table) or for
//! programs (JSON). Rounding and the kN → kip conversion happen only here;
//! the engine's numbers are never modified.
//!
//! ## Example
//!
//! ```rust
//! use pile_core::calculations::pile::{calculate, PileCapacityInput, PileParameters};
//! use pile_core::report::{render_table, ReportOptions};
//! use pile_core::soil::{SoilLayer, SoilType};
//!
//! let input = PileCapacityInput {
//!     label: "P-1".to_string(),
//!     pile: PileParameters::new(0.5, 2.5, 3.0),
//!     layers: vec![SoilLayer::new(SoilType::Cohesionless, 5.0, 10.0)],
//! };
//! let result = calculate(&input).unwrap();
//! let table = render_table(&result, &ReportOptions::default());
//! assert!(table.contains("361.01 kN (81.16 kip)"));
//! ```

use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::pile::PileCapacityResult;
use crate::errors::{CalcError, CalcResult};
use crate::units::{KiloNewtons, Kips};

/// Shown before any calculation is run.
pub const DISCLAIMER: &str = "This software is designed to calculate the capacity of a single pile \
using empirical relationships based on SPT N values and soil type. It is intended for use when \
detailed soil property information, such as cohesion or angle of friction, is unavailable or \
unreliable. If precise soil properties are known, it is recommended to use more accurate \
calculation methods.";

/// Explains the cohesion multiplier k.
pub const COHESION_MULTIPLIER_HELP: &str = "Cohesion = k * Ncorrected (kPa)\n\
Where k = 2.4 to 4 for softer to stiffer clay,\n\
input the value of k according to your soil condition.";

const HEADERS: [&str; 3] = [
    "Depth (m)",
    "Ultimate End Bearing (kN)",
    "Ultimate Skin Friction (kN)",
];
const ALLOWABLE_HEADER: &str = "Allowable Pile Resistance, Qa (kN)";
const ALLOWABLE_HEADER_KIPS: &str = "Allowable Pile Resistance, Qa (kN / kip)";

/// Formatting choices for the text table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Decimal places for every number
    pub precision: usize,

    /// Append the allowable capacity in kips
    pub show_kips: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            precision: 2,
            show_kips: true,
        }
    }
}

/// Render the per-layer table.
pub fn render_table(result: &PileCapacityResult, options: &ReportOptions) -> String {
    let p = options.precision;
    let rows: Vec<[String; 4]> = result
        .layers
        .iter()
        .map(|row| {
            let allowable = KiloNewtons(row.allowable_capacity_kn);
            let qa = if options.show_kips {
                let kips: Kips = allowable.into();
                format!("{:.p$} kN ({:.p$} kip)", allowable.value(), kips.value())
            } else {
                format!("{:.p$} kN", allowable.value())
            };
            [
                format!("{:.p$}", row.depth_m),
                format!("{:.p$} kN", row.end_bearing_kn),
                format!("{:.p$} kN", row.skin_friction_kn),
                qa,
            ]
        })
        .collect();

    let allowable_header = if options.show_kips { ALLOWABLE_HEADER_KIPS } else { ALLOWABLE_HEADER };
    let headers = [HEADERS[0], HEADERS[1], HEADERS[2], allowable_header];
    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &headers.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:>width$}"))
        .collect();
    let _ = writeln!(out, "{}", line.join(" | "));
}

/// Render a full text report: heading, parameters, table and tip summary.
pub fn render_report(result: &PileCapacityResult, options: &ReportOptions, generated: DateTime<Utc>) -> String {
    let p = options.precision;
    let mut out = String::new();

    let _ = writeln!(out, "SINGLE PILE CAPACITY - {}", result.label);
    let _ = writeln!(out, "Generated: {}", generated.format("%Y-%m-%d"));
    let _ = writeln!(out);
    let _ = writeln!(out, "  Pile diameter:     {:.p$} m", result.pile.diameter_m);
    let _ = writeln!(out, "  Base area:         {:.4} m2", result.base_area_m2);
    let _ = writeln!(out, "  Factor of safety:  {:.p$}", result.pile.factor_of_safety);
    let _ = writeln!(out, "  Cohesion k:        {:.p$} (c = k * N kPa)", result.pile.k_value);
    let _ = writeln!(out);
    out.push_str(&render_table(result, options));

    if let Some(tip) = result.final_layer() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Tip at {:.p$} m: Qu = {:.p$} kN, Qa = {:.p$} kN",
            tip.depth_m, tip.ultimate_capacity_kn, tip.allowable_capacity_kn
        );
    }
    out
}

/// Render the result as pretty-printed JSON.
pub fn render_json(result: &PileCapacityResult) -> CalcResult<String> {
    serde_json::to_string_pretty(result).map_err(CalcError::serialization)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::pile::{calculate, PileCapacityInput, PileParameters};
    use crate::soil::{SoilLayer, SoilType};
    use chrono::TimeZone;

    fn result() -> PileCapacityResult {
        let input = PileCapacityInput {
            label: "P-7".to_string(),
            pile: PileParameters::new(0.5, 2.5, 3.0),
            layers: vec![
                SoilLayer::new(SoilType::Cohesionless, 5.0, 10.0),
                SoilLayer::new(SoilType::Cohesive, 8.0, 20.0),
            ],
        };
        calculate(&input).unwrap()
    }

    #[test]
    fn test_table_layout() {
        let table = render_table(&result(), &ReportOptions::default());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Ultimate End Bearing (kN)"));
        assert!(lines[0].ends_with("Allowable Pile Resistance, Qa (kN / kip)"));
        assert!(lines[1].starts_with("---"));
        assert!(lines[2].contains("5.00"));
        assert!(lines[2].contains("752.10 kN"));
        assert!(lines[2].contains("150.42 kN"));
        assert!(lines[3].trim_start().starts_with("8.00"));
    }

    #[test]
    fn test_table_without_kips() {
        let options = ReportOptions {
            precision: 1,
            show_kips: false,
        };
        let table = render_table(&result(), &options);
        assert!(!table.contains("kip"));
        assert!(table.lines().next().unwrap().ends_with("Allowable Pile Resistance, Qa (kN)"));
        assert!(table.contains("361.0 kN"));
    }

    #[test]
    fn test_report_header() {
        let generated = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        let report = render_report(&result(), &ReportOptions::default(), generated);
        assert!(report.starts_with("SINGLE PILE CAPACITY - P-7"));
        assert!(report.contains("Generated: 2024-03-09"));
        assert!(report.contains("Tip at 8.00 m"));
    }

    #[test]
    fn test_json_output() {
        let result = result();
        let json = render_json(&result).unwrap();
        let parsed: PileCapacityResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
        assert!(json.contains("\"allowable_capacity_kn\""));
    }

    #[test]
    fn test_options_partial_config() {
        let options: ReportOptions = serde_json::from_str(r#"{ "precision": 3 }"#).unwrap();
        assert_eq!(options.precision, 3);
        assert!(options.show_kips);
    }
}
