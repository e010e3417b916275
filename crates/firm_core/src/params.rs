use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),
    #[error("Parameter {kind} must be finite, got {value}.")]
    NonFinite { kind: ParameterKind, value: f64 },
}

/// Inputs of the firm model: fixed cost, the cubic cost coefficients and the
/// market price.
///
/// The engine accepts any values here. Range and step limits belong to the
/// input widgets (see [`ParameterKind::snap`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    #[serde(rename = "FC")]
    pub fc: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub p: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            fc: ParameterKind::FixedCost.default_value(),
            a: ParameterKind::A.default_value(),
            b: ParameterKind::B.default_value(),
            c: ParameterKind::C.default_value(),
            p: ParameterKind::Price.default_value(),
        }
    }
}

impl Parameters {
    pub fn new(fc: f64, a: f64, b: f64, c: f64, p: f64) -> Self {
        Self { fc, a, b, c, p }
    }

    pub fn get(&self, kind: ParameterKind) -> f64 {
        match kind {
            ParameterKind::FixedCost => self.fc,
            ParameterKind::A => self.a,
            ParameterKind::B => self.b,
            ParameterKind::C => self.c,
            ParameterKind::Price => self.p,
        }
    }

    pub fn set(&mut self, kind: ParameterKind, value: f64) {
        match kind {
            ParameterKind::FixedCost => self.fc = value,
            ParameterKind::A => self.a = value,
            ParameterKind::B => self.b = value,
            ParameterKind::C => self.c = value,
            ParameterKind::Price => self.p = value,
        }
    }

    pub fn as_array(&self) -> [f64; 5] {
        [self.fc, self.a, self.b, self.c, self.p]
    }

    /// Bitwise equality, so that NaN inputs still compare equal to themselves.
    pub fn same_bits(&self, other: &Parameters) -> bool {
        self.as_array()
            .iter()
            .zip(other.as_array().iter())
            .all(|(lhs, rhs)| lhs.to_bits() == rhs.to_bits())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterKind {
    #[serde(rename = "FC")]
    FixedCost,
    #[serde(rename = "a")]
    A,
    #[serde(rename = "b")]
    B,
    #[serde(rename = "c")]
    C,
    #[serde(rename = "p")]
    Price,
}

/// Slider metadata for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterDescriptor {
    pub kind: ParameterKind,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl ParameterKind {
    pub const ALL: [ParameterKind; 5] = [
        ParameterKind::FixedCost,
        ParameterKind::A,
        ParameterKind::B,
        ParameterKind::C,
        ParameterKind::Price,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            ParameterKind::FixedCost => "FC",
            ParameterKind::A => "a",
            ParameterKind::B => "b",
            ParameterKind::C => "c",
            ParameterKind::Price => "p",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ParameterKind::FixedCost => "Fixed cost (FC)",
            ParameterKind::A => "Linear cost coefficient (a)",
            ParameterKind::B => "Quadratic cost coefficient (b)",
            ParameterKind::C => "Cubic cost coefficient (c)",
            ParameterKind::Price => "Price (p)",
        }
    }

    /// `(min, max, step)` of the input widget.
    pub fn bounds(self) -> (f64, f64, f64) {
        match self {
            ParameterKind::FixedCost => (0.0, 20.0, 0.1),
            ParameterKind::A => (0.0, 20.0, 0.1),
            ParameterKind::B => (0.0, 5.0, 0.01),
            ParameterKind::C => (0.0, 1.0, 0.01),
            ParameterKind::Price => (0.0, 20.0, 0.1),
        }
    }

    pub fn default_value(self) -> f64 {
        match self {
            ParameterKind::FixedCost => 5.0,
            ParameterKind::A => 5.0,
            ParameterKind::B => 1.0,
            ParameterKind::C => 0.1,
            ParameterKind::Price => 5.0,
        }
    }

    fn step_decimals(self) -> i32 {
        match self {
            ParameterKind::FixedCost | ParameterKind::A | ParameterKind::Price => 1,
            ParameterKind::B | ParameterKind::C => 2,
        }
    }

    pub fn descriptor(self) -> ParameterDescriptor {
        let (min, max, step) = self.bounds();
        ParameterDescriptor {
            kind: self,
            label: self.label(),
            min,
            max,
            step,
            default: self.default_value(),
        }
    }

    /// Moves a raw widget value onto the step grid and into range.
    pub fn snap(self, value: f64) -> Result<f64, ParameterError> {
        if !value.is_finite() {
            return Err(ParameterError::NonFinite { kind: self, value });
        }
        let (min, max, step) = self.bounds();
        let steps = ((value - min) / step).round();
        let snapped = (min + steps * step).clamp(min, max);
        let scale = 10f64.powi(self.step_decimals());
        Ok((snapped * scale).round() / scale)
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for ParameterKind {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "FC" | "fc" | "Fc" => Ok(ParameterKind::FixedCost),
            "a" | "A" => Ok(ParameterKind::A),
            "b" | "B" => Ok(ParameterKind::B),
            "c" | "C" => Ok(ParameterKind::C),
            "p" | "P" => Ok(ParameterKind::Price),
            other => Err(ParameterError::UnknownParameter(other.to_string())),
        }
    }
}

pub fn parameter_descriptors() -> Vec<ParameterDescriptor> {
    ParameterKind::ALL.iter().map(|kind| kind.descriptor()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_values() {
        let params = Parameters::default();
        assert_eq!(params, Parameters::new(5.0, 5.0, 1.0, 0.1, 5.0));
    }

    #[test]
    fn get_and_set_address_the_same_field() {
        let mut params = Parameters::default();
        for (idx, kind) in ParameterKind::ALL.iter().enumerate() {
            let value = 10.0 + idx as f64;
            params.set(*kind, value);
            assert_eq!(params.get(*kind), value);
        }
        assert_eq!(params.as_array(), [10.0, 11.0, 12.0, 13.0, 14.0]);
    }

    #[test]
    fn parses_symbols() {
        assert_eq!("FC".parse::<ParameterKind>(), Ok(ParameterKind::FixedCost));
        assert_eq!(" p ".parse::<ParameterKind>(), Ok(ParameterKind::Price));
        let err = "q".parse::<ParameterKind>().unwrap_err();
        assert_eq!(err, ParameterError::UnknownParameter("q".to_string()));
        assert_eq!(err.to_string(), "Unknown parameter: q");
    }

    #[test]
    fn snap_rounds_to_grid_and_clamps() {
        assert_eq!(ParameterKind::B.snap(1.234).unwrap(), 1.23);
        assert_eq!(ParameterKind::FixedCost.snap(3.06).unwrap(), 3.1);
        assert_eq!(ParameterKind::C.snap(7.0).unwrap(), 1.0);
        assert_eq!(ParameterKind::Price.snap(-2.0).unwrap(), 0.0);
        assert!(matches!(
            ParameterKind::A.snap(f64::NAN),
            Err(ParameterError::NonFinite { kind: ParameterKind::A, .. })
        ));
    }

    #[test]
    fn same_bits_treats_nan_as_equal() {
        let lhs = Parameters::new(f64::NAN, 1.0, 1.0, 1.0, 1.0);
        let rhs = lhs;
        assert_ne!(lhs, rhs);
        assert!(lhs.same_bits(&rhs));
        assert!(!lhs.same_bits(&Parameters::default()));
    }

    #[test]
    fn serializes_with_model_symbols() {
        let json = serde_json::to_value(Parameters::default()).expect("serialize");
        assert_eq!(json["FC"], 5.0);
        assert_eq!(json["c"], 0.1);
        let descriptors = parameter_descriptors();
        assert_eq!(descriptors.len(), 5);
        assert_eq!(descriptors[2].step, 0.01);
    }
}
