//! Upper/lower bound envelope from bearing property modification factors
//!
//! ASCE 7-22 Chapter 17 requires the isolated structure to be checked with
//! bearing friction scaled up and down. Each bound is compared against the
//! same fixed-base run.

use serde::{Deserialize, Serialize};

use super::base_shear::{compute_base_shear, BaseShearComparison};
use super::bearings::{compute_bearing_demands, BearingDemand};
use crate::elements::TFPBearing;
use crate::results::VariantResult;

/// Property modification factors applied to bearing friction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LambdaFactors {
    #[serde(default = "default_lambda_min")]
    pub lambda_min: f64,
    #[serde(default = "default_lambda_max")]
    pub lambda_max: f64,
}

fn default_lambda_min() -> f64 {
    0.85
}

fn default_lambda_max() -> f64 {
    1.8
}

impl Default for LambdaFactors {
    fn default() -> Self {
        Self {
            lambda_min: default_lambda_min(),
            lambda_max: default_lambda_max(),
        }
    }
}

/// Which isolated run a bound entry comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    Nominal,
    Upper,
    Lower,
}

/// The runs of one comparison: nominal isolated, optional bounds, fixed base
#[derive(Debug, Clone)]
pub struct ComparisonRun {
    pub isolated: VariantResult,
    pub isolated_upper: Option<VariantResult>,
    pub isolated_lower: Option<VariantResult>,
    pub fixed_base: VariantResult,
    pub lambda_factors: LambdaFactors,
}

impl ComparisonRun {
    pub fn new(isolated: VariantResult, fixed_base: VariantResult) -> Self {
        Self {
            isolated,
            isolated_upper: None,
            isolated_lower: None,
            fixed_base,
            lambda_factors: LambdaFactors::default(),
        }
    }

    /// Attach the upper and lower bound isolated runs
    pub fn with_bounds(
        mut self,
        upper: VariantResult,
        lower: VariantResult,
        factors: LambdaFactors,
    ) -> Self {
        self.isolated_upper = Some(upper);
        self.isolated_lower = Some(lower);
        self.lambda_factors = factors;
        self
    }

    /// Present isolated runs with their lambda, nominal first
    fn isolated_runs(&self) -> Vec<(Bound, f64, &VariantResult)> {
        let mut runs = vec![(Bound::Nominal, 1.0, &self.isolated)];
        if let Some(upper) = &self.isolated_upper {
            runs.push((Bound::Upper, self.lambda_factors.lambda_max, upper));
        }
        if let Some(lower) = &self.isolated_lower {
            runs.push((Bound::Lower, self.lambda_factors.lambda_min, lower));
        }
        runs
    }
}

/// Base shear and bearing demands for one isolated bound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundComparison {
    pub bound: Bound,
    pub lambda: f64,
    pub base_shear: BaseShearComparison,
    pub bearing_demands: Vec<BearingDemand>,
    /// Largest bearing D/C ratio, 0 without bearings
    pub max_dc_ratio: f64,
}

/// One entry per isolated run present: nominal, then upper, then lower
pub fn compute_bound_envelope(run: &ComparisonRun, bearings: &[TFPBearing]) -> Vec<BoundComparison> {
    run.isolated_runs()
        .into_iter()
        .map(|(bound, lambda, isolated)| {
            let bearing_demands = compute_bearing_demands(isolated, bearings);
            let max_dc_ratio = bearing_demands
                .iter()
                .map(|d| d.dc_ratio)
                .fold(0.0, f64::max);
            BoundComparison {
                bound,
                lambda,
                base_shear: compute_base_shear(isolated, &run.fixed_base),
                bearing_demands,
                max_dc_ratio,
            }
        })
        .collect()
}
