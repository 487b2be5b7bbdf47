use serde::{Deserialize, Serialize};

/// Average, minimum and maximum of a series of values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

impl SummaryStats {
    /// Summarise `values`, returning `None` for an empty slice so callers
    /// never divide by zero.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let sum: f64 = values.iter().sum();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            average: sum / values.len() as f64,
            min,
            max,
        })
    }
}
