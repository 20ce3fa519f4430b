//! Bearing displacement demand vs capacity

use log::debug;
use serde::{Deserialize, Serialize};

use crate::elements::TFPBearing;
use crate::results::VariantResult;

/// Fraction of the isolated roof displacement attributed to the bearings.
///
/// Applied uniformly to every bearing as an upper-bound estimate.
pub const ROOF_TO_BEARING_RATIO: f64 = 0.8;

/// Displacement demand/capacity of one bearing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BearingDemand {
    pub bearing_id: u32,
    pub demand: f64,
    pub capacity: f64,
    /// 0 when the bearing has no capacity
    pub dc_ratio: f64,
}

impl BearingDemand {
    pub fn new(bearing: &TFPBearing, demand: f64) -> Self {
        let capacity = bearing.capacity();
        let dc_ratio = if capacity > 0.0 { demand / capacity } else { 0.0 };
        Self {
            bearing_id: bearing.id,
            demand,
            capacity,
            dc_ratio,
        }
    }
}

/// One demand entry per bearing, in the order given
pub fn compute_bearing_demands(isolated: &VariantResult, bearings: &[TFPBearing]) -> Vec<BearingDemand> {
    let demand = isolated.max_roof_displacement * ROOF_TO_BEARING_RATIO;
    debug!(
        "Bearing demand {:.4} applied to {} bearing(s)",
        demand,
        bearings.len()
    );
    bearings
        .iter()
        .map(|bearing| BearingDemand::new(bearing, demand))
        .collect()
}
