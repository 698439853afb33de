//! Question-and-answer entry of a soil profile.
//!
//! Asks for the number of layers, then depth, soil type and field SPT for
//! each layer, then the pile parameters. Bad answers are reported and asked
//! again; end of input aborts.

use std::io::{BufRead, Write};

use log::info;
use pile_core::input::{parse_layer_count, parse_number, InputDefaults, DEFAULT_LABEL};
use pile_core::soil::{SoilLayerInput, SoilType};
use pile_core::{CalcError, CalcResult, PileCapacityInput, ProfileInput};

use crate::CliError;

/// "1 = Cohesionless, 2 = Cohesive"
fn soil_type_menu() -> String {
    SoilType::ALL
        .iter()
        .enumerate()
        .map(|(i, soil_type)| format!("{} = {}", i + 1, soil_type.display_name()))
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, CliError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(CliError::EndOfInput);
        }
        Ok(buf.trim().to_string())
    }

    /// Ask until `parse` accepts the answer. An empty answer takes `default`.
    fn ask<T, F>(&mut self, prompt: &str, default: Option<T>, parse: F) -> Result<T, CliError>
    where
        T: Copy,
        F: Fn(&str) -> CalcResult<T>,
    {
        loop {
            let answer = self.read_line(prompt)?;
            if answer.is_empty() {
                if let Some(value) = default {
                    return Ok(value);
                }
            }
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    fn ask_number(&mut self, field: &str, prompt: &str, default: Option<f64>) -> Result<f64, CliError> {
        let prompt = match default {
            Some(value) => format!("{prompt} [{value}]: "),
            None => format!("{prompt}: "),
        };
        self.ask(&prompt, default, |text| parse_number(field, text))
    }

    /// Menu choice by number (1-based, in `SoilType::ALL` order) or by name.
    fn ask_soil_type(&mut self, layer: usize) -> Result<SoilType, CliError> {
        let default = SoilType::ALL[0];
        let prompt = format!("  Soil type ({}) [{default}]: ", soil_type_menu());
        let soil_type = self.ask(&prompt, Some(default), |text| {
            match text.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
                Some(choice) => SoilType::ALL
                    .get(choice)
                    .copied()
                    .ok_or_else(|| CalcError::invalid_soil_type(text).at_layer(layer)),
                None => SoilType::from_str_flexible(text).map_err(|e| e.at_layer(layer)),
            }
        })?;
        Ok(soil_type)
    }

    /// Collect a whole profile and validate it.
    pub fn collect(&mut self, defaults: &InputDefaults) -> Result<PileCapacityInput, CliError> {
        let label = self.read_line(&format!("Pile label [{DEFAULT_LABEL}]: "))?;
        let label = if label.is_empty() { DEFAULT_LABEL.to_string() } else { label };

        let count = self.ask("Number of layers: ", None, parse_layer_count)?;
        let mut layers = Vec::with_capacity(count);
        for layer in 1..=count {
            writeln!(self.output, "Layer {layer}")?;
            let depth_m = self.ask_number("depth_m", "  Depth to bottom of layer (m)", None)?;
            let soil_type = self.ask_soil_type(layer)?;
            let field_spt = self.ask_number("field_spt", "  Field SPT", None)?;
            layers.push(SoilLayerInput::new(soil_type.display_name(), depth_m, field_spt));
        }

        let diameter_m = self.ask_number("diameter_m", "Pile diameter (m)", None)?;
        let factor_of_safety = self.ask_number(
            "factor_of_safety",
            "Factor of safety",
            defaults.factor_of_safety,
        )?;
        let k_value = self.ask_number(
            "k_value",
            "Cohesion = k * Ncorrected (kPa), k",
            defaults.k_value,
        )?;

        let profile = ProfileInput {
            label,
            diameter_m,
            factor_of_safety: Some(factor_of_safety),
            k_value: Some(k_value),
            layers,
        };
        info!("collected {} layers interactively", profile.layers.len());
        Ok(profile.into_input(defaults)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str, defaults: &InputDefaults) -> (Result<PileCapacityInput, CliError>, String) {
        let mut output = Vec::new();
        let result = Prompter::new(Cursor::new(script.as_bytes()), &mut output).collect(defaults);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_collect_two_layers() {
        let script = "P-3\n2\n3.0\n2\n6\n9.0\n\n24\n0.6\n3.0\n3.5\n";
        let (result, _) = run(script, &InputDefaults::default());
        let input = result.unwrap();

        assert_eq!(input.label, "P-3");
        assert_eq!(input.layers.len(), 2);
        assert_eq!(input.layers[0].soil_type, SoilType::Cohesive);
        assert_eq!(input.layers[1].soil_type, SoilType::Cohesionless);
        assert_eq!(input.layers[1].field_spt, 24.0);
        assert_eq!(input.pile.diameter_m, 0.6);
        assert_eq!(input.pile.k_value, 3.5);
    }

    #[test]
    fn test_retries_bad_answers() {
        let script = "\nzero\n1\nabc\n5\nSilty\ncohesionless\n10\n0.5\n2.5\n3\n";
        let (result, output) = run(script, &InputDefaults::default());
        let input = result.unwrap();

        assert_eq!(input.label, DEFAULT_LABEL);
        assert_eq!(input.layers[0].depth_m, 5.0);
        assert!(output.contains("Please enter a valid number for the number of layers"));
        assert!(output.contains("Invalid soil type. Please enter 'Cohesionless' or 'Cohesive'."));
    }

    #[test]
    fn test_uses_defaults() {
        let defaults = InputDefaults {
            factor_of_safety: Some(2.5),
            k_value: Some(3.0),
        };
        let script = "\n1\n5\n1\n10\n0.5\n\n\n";
        let (result, output) = run(script, &defaults);
        let input = result.unwrap();

        assert_eq!(input.pile.factor_of_safety, 2.5);
        assert_eq!(input.pile.k_value, 3.0);
        assert!(output.contains("Factor of safety [2.5]: "));
    }

    #[test]
    fn test_end_of_input() {
        let (result, _) = run("P-1\n2\n3.0\n", &InputDefaults::default());
        assert!(matches!(result, Err(CliError::EndOfInput)));
    }

    #[test]
    fn test_profile_validation_applies() {
        // second layer shallower than the first
        let script = "\n2\n5\n1\n10\n3\n1\n12\n0.5\n2.5\n3\n";
        let (result, _) = run(script, &InputDefaults::default());
        assert!(matches!(result, Err(CliError::Calc(_))));
    }

    #[test]
    fn test_soil_type_menu() {
        assert_eq!(soil_type_menu(), "1 = Cohesionless, 2 = Cohesive");

        // 0 and 3 are off the menu, "2" picks the second entry
        let script = "\n1\n5\n0\n3\n2\n10\n0.5\n2.5\n3\n";
        let (result, output) = run(script, &InputDefaults::default());
        let input = result.unwrap();

        assert_eq!(input.layers[0].soil_type, SoilType::ALL[1]);
        assert!(output.contains("Soil type (1 = Cohesionless, 2 = Cohesive) [Cohesionless]: "));
        assert_eq!(output.matches("Invalid soil type").count(), 2);
    }
}
