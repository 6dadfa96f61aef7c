//! Axis specifications and their expansion into concrete value sequences.
//!
//! An axis is written either as a comma-separated literal list (`"20, 30, 25"`)
//! or as an inclusive `start:stop:step` range (`"25:129.5:0.5"`). Range values
//! are rounded to [`AXIS_DECIMALS`] places so that binary floating-point drift
//! never adds or drops a boundary value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Decimal places every range value is rounded to.
pub const AXIS_DECIMALS: i32 = 6;
/// Upper bound on the number of values a single axis may expand to.
pub const MAX_AXIS_VALUES: usize = 100_000;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("'{token}' is not a number")]
    InvalidNumber { token: String },
    #[error("range form must be start:stop:step, found {found} component(s)")]
    RangeArity { found: usize },
    #[error("range step must be non-zero")]
    ZeroStep,
    #[error("range step {step} is below the axis precision of {precision}")]
    StepBelowPrecision { step: f64, precision: f64 },
    #[error("'{token}' is not a finite number")]
    NonFinite { token: String },
    #[error("axis expands to no values")]
    EmptyAxis,
    #[error("axis expands to more than {limit} values")]
    TooManyValues { limit: usize },
    #[error("{value} is not a whole number")]
    NonIntegral { value: f64 },
    #[error("{value} is outside the supported range 0..={}", u32::MAX)]
    OutOfRange { value: f64 },
    #[error("axis '{axis}': {source}")]
    InvalidAxis {
        axis: String,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    pub fn for_axis(self, axis: impl Into<String>) -> Self {
        ParseError::InvalidAxis {
            axis: axis.into(),
            source: Box::new(self),
        }
    }
}

/// How one sweep axis is specified in configuration.
///
/// Deserializes from `{"start": 25, "stop": 30, "step": 0.5}`, from a plain
/// array of numbers, or from the compact string form accepted by
/// [`parse_axis`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisSpec {
    Range { start: f64, stop: f64, step: f64 },
    Values(Vec<f64>),
    Compact(String),
}

impl AxisSpec {
    pub fn range(start: f64, stop: f64, step: f64) -> Self {
        AxisSpec::Range { start, stop, step }
    }

    pub fn values(values: impl Into<Vec<f64>>) -> Self {
        AxisSpec::Values(values.into())
    }

    /// Expand into the ordered values the axis ranges over.
    pub fn expand(&self) -> Result<Vec<f64>, ParseError> {
        match self {
            AxisSpec::Range { start, stop, step } => expand_range(*start, *stop, *step),
            AxisSpec::Values(values) => check_literals(values.clone()),
            AxisSpec::Compact(spec) => parse_axis(spec),
        }
    }
}

impl FromStr for AxisSpec {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = parse_spec(s)?;
        // Reject unusable specs at parse time, e.g. a range that never reaches a value.
        spec.expand()?;
        Ok(spec)
    }
}

impl fmt::Display for AxisSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisSpec::Range { start, stop, step } => write!(f, "{start}:{stop}:{step}"),
            AxisSpec::Values(values) => {
                let joined: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                f.write_str(&joined.join(","))
            }
            AxisSpec::Compact(spec) => f.write_str(spec),
        }
    }
}

/// Parse a comma-separated list or a `start:stop:step` range into values.
pub fn parse_axis(spec: &str) -> Result<Vec<f64>, ParseError> {
    parse_spec(spec)?.expand()
}

fn parse_spec(spec: &str) -> Result<AxisSpec, ParseError> {
    if spec.contains(':') {
        let parts: Vec<&str> = spec.split(':').collect();
        if parts.len() != 3 {
            return Err(ParseError::RangeArity { found: parts.len() });
        }
        let start = parse_number(parts[0])?;
        let stop = parse_number(parts[1])?;
        let step = parse_number(parts[2])?;
        return Ok(AxisSpec::range(start, stop, step));
    }

    let values = spec
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_number)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(AxisSpec::Values(values))
}

fn parse_number(token: &str) -> Result<f64, ParseError> {
    let token = token.trim();
    let value = token.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
        token: token.to_string(),
    })?;
    if !value.is_finite() {
        return Err(ParseError::NonFinite {
            token: token.to_string(),
        });
    }
    Ok(value)
}

fn check_literals(values: Vec<f64>) -> Result<Vec<f64>, ParseError> {
    if values.is_empty() {
        return Err(ParseError::EmptyAxis);
    }
    if values.len() > MAX_AXIS_VALUES {
        return Err(ParseError::TooManyValues {
            limit: MAX_AXIS_VALUES,
        });
    }
    if let Some(value) = values.iter().find(|v| !v.is_finite()) {
        return Err(ParseError::NonFinite {
            token: value.to_string(),
        });
    }
    Ok(values)
}

/// Round to [`AXIS_DECIMALS`] places, folding `-0.0` into `0.0`.
pub fn round_to_precision(value: f64) -> f64 {
    let scale = 10f64.powi(AXIS_DECIMALS);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// [`round_to_precision`], failing when scaling pushes the value past `f64`.
fn rounded(value: f64) -> Result<f64, ParseError> {
    let rounded = round_to_precision(value);
    if rounded.is_finite() {
        Ok(rounded)
    } else {
        Err(ParseError::NonFinite {
            token: value.to_string(),
        })
    }
}

/// Expand an inclusive range.
///
/// The k-th value is `round(start + k * step)`, and the loop stops on the
/// first rounded value past the rounded `stop`. Deriving each value from `k`
/// keeps neighbours exactly `step` apart instead of accumulating error.
pub fn expand_range(start: f64, stop: f64, step: f64) -> Result<Vec<f64>, ParseError> {
    for value in [start, stop, step] {
        if !value.is_finite() {
            return Err(ParseError::NonFinite {
                token: value.to_string(),
            });
        }
    }
    if step == 0.0 {
        return Err(ParseError::ZeroStep);
    }
    let precision = 10f64.powi(-AXIS_DECIMALS);
    if step.abs() < precision {
        return Err(ParseError::StepBelowPrecision { step, precision });
    }

    let stop = rounded(stop)?;
    let mut values: Vec<f64> = Vec::new();
    let mut k: u64 = 0;
    loop {
        let value = rounded(start + step * k as f64)?;
        let within = if step > 0.0 { value <= stop } else { value >= stop };
        if !within {
            break;
        }
        // Large magnitudes can absorb the step entirely.
        if values.last() == Some(&value) {
            return Err(ParseError::StepBelowPrecision { step, precision });
        }
        if values.len() == MAX_AXIS_VALUES {
            return Err(ParseError::TooManyValues {
                limit: MAX_AXIS_VALUES,
            });
        }
        values.push(value);
        k += 1;
    }

    if values.is_empty() {
        return Err(ParseError::EmptyAxis);
    }
    Ok(values)
}

/// Convert an expanded axis into whole vehicle counts.
///
/// Fractional values are rejected rather than truncated.
pub fn to_integral(values: &[f64]) -> Result<Vec<u32>, ParseError> {
    values
        .iter()
        .map(|&value| {
            if value.fract() != 0.0 {
                return Err(ParseError::NonIntegral { value });
            }
            if value < 0.0 || value > f64::from(u32::MAX) {
                return Err(ParseError::OutOfRange { value });
            }
            Ok(value as u32)
        })
        .collect()
}
