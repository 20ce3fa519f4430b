//! Isolated vs fixed-base comparison metrics
//!
//! Every function here is pure: it borrows the model and two variant
//! results and returns fresh values. Degenerate input gives empty or zero
//! metrics rather than errors.
//!
//! ## Example
//! ```rust
//! use isovis_engine::prelude::*;
//!
//! let mut model = StructuralModel::new();
//! model.add_node(1, Node::planar(0.0, 0.0)).unwrap();
//! model.add_node(2, Node::planar(0.0, 3.0)).unwrap();
//!
//! let mut iso = PushoverResults { max_base_shear: 30.0, ..Default::default() };
//! iso.node_displacements.insert(2, vec![0.03]);
//! let mut fb = PushoverResults { max_base_shear: 60.0, ..Default::default() };
//! fb.node_displacements.insert(2, vec![0.09]);
//!
//! let summary = compute_comparison_summary(
//!     &VariantResult::from_pushover(iso),
//!     &VariantResult::from_pushover(fb),
//!     &model,
//! );
//! assert_eq!(summary.drift_profile.len(), 1);
//! assert_eq!(summary.base_shear.reduction_percent, 50.0);
//! assert_eq!(summary.hinge_distribution.len(), 3);
//! ```

mod base_shear;
mod bearings;
mod bounds;
mod drift;
mod hinges;

pub use base_shear::{compute_base_shear, BaseShearComparison};
pub use bearings::{compute_bearing_demands, BearingDemand, ROOF_TO_BEARING_RATIO};
pub use bounds::{compute_bound_envelope, Bound, BoundComparison, ComparisonRun, LambdaFactors};
pub use drift::{compute_drift_profile, DriftProfile};
pub use hinges::{count_hinges_by_level, HingeDistribution};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::StructuralModel;
use crate::results::VariantResult;

/// Everything the presentation layer needs for one comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub drift_profile: Vec<DriftProfile>,
    pub base_shear: BaseShearComparison,
    pub bearing_demands: Vec<BearingDemand>,
    /// Always IO, LS, CP
    pub hinge_distribution: Vec<HingeDistribution>,
}

/// Reduce two variant results on the same model to comparison metrics
pub fn compute_comparison_summary(
    isolated: &VariantResult,
    fixed_base: &VariantResult,
    model: &StructuralModel,
) -> ComparisonSummary {
    debug!(
        "Comparing variants on '{}': {} nodes, {} bearings",
        model.info.name,
        model.nodes.len(),
        model.bearings.len()
    );

    ComparisonSummary {
        drift_profile: compute_drift_profile(isolated, fixed_base, &model.nodes, model.vertical_axis()),
        base_shear: compute_base_shear(isolated, fixed_base),
        bearing_demands: compute_bearing_demands(isolated, &model.bearings),
        hinge_distribution: count_hinges_by_level(isolated.hinges(), fixed_base.hinges()),
    }
}
