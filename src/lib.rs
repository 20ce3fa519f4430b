//! IsoVis Engine - comparison metrics for base-isolated structures
//!
//! Reduces two analysis result sets of the same building, one on Triple
//! Friction Pendulum isolators and one with a fixed base, to the metrics
//! used to judge the isolation system:
//! - Inter-story drift profiles
//! - Base shear reduction
//! - Bearing displacement demand/capacity ratios
//! - Plastic hinge distribution by performance level (IO, LS, CP)
//!
//! The analyses themselves run elsewhere; this crate only consumes their
//! output.
//!
//! ## Example
//! ```rust
//! use isovis_engine::prelude::*;
//!
//! let mut model = StructuralModel::new();
//! model.add_node(1, Node::planar(0.0, 0.0)).unwrap();
//! model.add_node(2, Node::planar(0.0, 3.5)).unwrap();
//!
//! let isolated = VariantResult::from_pushover(PushoverResults {
//!     max_base_shear: 30.0,
//!     max_roof_displacement: 0.4,
//!     ..Default::default()
//! });
//! let fixed_base = VariantResult::from_pushover(PushoverResults {
//!     max_base_shear: 60.0,
//!     max_roof_displacement: 0.1,
//!     ..Default::default()
//! });
//!
//! let summary = compute_comparison_summary(&isolated, &fixed_base, &model);
//! assert_eq!(summary.base_shear.reduction_percent, 50.0);
//! ```

pub mod analysis;
pub mod api;
pub mod comparison;
pub mod config;
pub mod elements;
pub mod error;
pub mod model;
pub mod results;
pub mod summary;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{AnalysisParams, AnalysisType, GroundMotion, LoadPattern};
    pub use crate::comparison::{
        compute_base_shear, compute_bearing_demands, compute_bound_envelope,
        compute_comparison_summary, compute_drift_profile, count_hinges_by_level,
        BaseShearComparison, BearingDemand, Bound, BoundComparison, ComparisonRun,
        ComparisonSummary, DriftProfile, HingeDistribution, LambdaFactors,
        ROOF_TO_BEARING_RATIO,
    };
    pub use crate::elements::{FrictionModel, Node, Support, TFPBearing, VerticalAxis};
    pub use crate::error::{IsoVisError, IsoVisResult};
    pub use crate::model::{ModelInfo, StructuralModel};
    pub use crate::results::{
        AnalysisResults, CapacityCurvePoint, HingeEnd, HingeState, ModalResults,
        PerformanceLevel, PushoverResults, StaticResults, TimeHistoryResults, VariantData,
        VariantResult,
    };
    pub use crate::summary::{summarize, ResultSummary};
}

#[cfg(feature = "wasm")]
pub mod wasm;
