//! Projection output structures

use serde::{Deserialize, Serialize};

/// Projected outcome of one investment in one product
///
/// Derived on every call, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub investment: f64,
    pub rate: f64,
    pub projected_value: f64,
    pub growth: f64,
}

impl ProjectionResult {
    pub fn new(investment: f64, rate: f64, projected_value: f64) -> Self {
        Self {
            investment,
            rate,
            projected_value,
            growth: projected_value - investment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_is_difference() {
        let result = ProjectionResult::new(10_000.0, 0.05, 10_500.0);
        assert_eq!(result.growth, 500.0);

        let loss = ProjectionResult::new(-1_000.0, 0.05, -1_050.0);
        assert_eq!(loss.growth, -50.0);
    }
}
