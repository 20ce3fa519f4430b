//! Plastic hinge counts by performance level

use serde::{Deserialize, Serialize};

use crate::results::{HingeState, PerformanceLevel};

/// Hinge counts of both variants at one performance level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HingeDistribution {
    pub level: PerformanceLevel,
    pub isolated: usize,
    pub fixed_base: usize,
}

fn count_at(hinges: &[HingeState], level: PerformanceLevel) -> usize {
    hinges.iter().filter(|h| h.level() == Some(level)).count()
}

/// Always three entries, IO then LS then CP. Hinges tagged outside that
/// set are not counted.
pub fn count_hinges_by_level(
    isolated_hinges: &[HingeState],
    fixed_base_hinges: &[HingeState],
) -> Vec<HingeDistribution> {
    PerformanceLevel::ALL
        .iter()
        .map(|&level| HingeDistribution {
            level,
            isolated: count_at(isolated_hinges, level),
            fixed_base: count_at(fixed_base_hinges, level),
        })
        .collect()
}
