//! Base shear reduction from isolation

use serde::{Deserialize, Serialize};

use crate::results::VariantResult;

/// Peak base shears and the reduction achieved by isolation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseShearComparison {
    pub isolated: f64,
    pub fixed_base: f64,
    /// Positive when isolation lowers the base shear; never clamped
    pub reduction_percent: f64,
}

impl BaseShearComparison {
    pub fn new(isolated: f64, fixed_base: f64) -> Self {
        let reduction_percent = if fixed_base == 0.0 {
            0.0
        } else {
            (fixed_base - isolated) / fixed_base * 100.0
        };
        Self {
            isolated,
            fixed_base,
            reduction_percent,
        }
    }
}

/// Compare peak base shear of the two variants
pub fn compute_base_shear(isolated: &VariantResult, fixed_base: &VariantResult) -> BaseShearComparison {
    BaseShearComparison::new(isolated.max_base_shear, fixed_base.max_base_shear)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reduction() {
        assert_relative_eq!(BaseShearComparison::new(30.0, 60.0).reduction_percent, 50.0);
    }

    #[test]
    fn test_amplification_is_negative() {
        let cmp = BaseShearComparison::new(80.0, 60.0);
        assert_relative_eq!(cmp.reduction_percent, -100.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_fixed_base_shear() {
        let cmp = BaseShearComparison::new(25.0, 0.0);
        assert_eq!(cmp.reduction_percent, 0.0);
        assert_eq!(cmp.isolated, 25.0);
    }
}
