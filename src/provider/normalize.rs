use serde::Deserialize;

/// A numeric field that some upstreams send as a number and others as text
/// with thousands separators.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    /// Non-numeric text yields 0.
    pub fn as_f64(&self) -> f64 {
        match self {
            RawNumber::Number(n) => *n,
            RawNumber::Text(text) => parse_grouped(text),
        }
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        RawNumber::Number(value)
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        RawNumber::Text(value.to_string())
    }
}

fn parse_grouped(text: &str) -> f64 {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_' && !c.is_whitespace())
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Converts the by-name source's population into a head count.
///
/// The upstream mixes units: small values are millions, mid-range values are
/// thousands, anything else is already absolute. This is a heuristic, not an
/// exact conversion; the thresholds must stay as they are because the option
/// generators rely on the resulting magnitudes.
pub fn normalize_population(raw: impl Into<RawNumber>) -> u64 {
    let value = raw.into().as_f64();
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }

    let people = if value >= 1_000_000.0 {
        value
    } else if value < 10.0 {
        value * 1_000_000.0
    } else if value < 10_000.0 {
        value * 1_000.0
    } else {
        value
    };

    people.round() as u64
}
