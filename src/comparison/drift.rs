//! Inter-story drift profiles

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::elements::{Node, VerticalAxis};
use crate::results::VariantResult;

/// Drift ratios of both variants for one story
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftProfile {
    /// 1-based story index, counted from the lowest band
    pub story: usize,
    /// Elevation of the story's upper band
    pub height: f64,
    pub isolated_drift: f64,
    pub fixed_base_drift: f64,
}

/// Node ids grouped into elevation bands, lowest first.
///
/// Elevations are rounded to the nearest whole unit so nodes that are
/// nominally on the same floor land in the same band. Halves round away
/// from zero (`f64::round`), so -0.5 falls in band -1, not band 0 as
/// JavaScript's `Math.round` would place it.
fn elevation_bands(nodes: &HashMap<u32, Node>, axis: VerticalAxis) -> Vec<(f64, Vec<u32>)> {
    let mut bands: BTreeMap<i64, Vec<u32>> = BTreeMap::new();
    for (id, node) in nodes {
        let level = node.elevation(axis).round() as i64;
        bands.entry(level).or_default().push(*id);
    }

    bands
        .into_iter()
        .map(|(level, mut ids)| {
            // Fixed summation order regardless of map iteration
            ids.sort_unstable();
            (level as f64, ids)
        })
        .collect()
}

/// Mean horizontal displacement over the nodes of a band that have data
fn mean_displacement(variant: &VariantResult, ids: &[u32]) -> f64 {
    let (sum, count) = ids
        .iter()
        .filter_map(|id| variant.horizontal_displacement(*id))
        .fold((0.0, 0usize), |(sum, count), d| (sum + d, count + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Drift ratio per story for the isolated and fixed-base variants.
///
/// Returns an empty profile when the nodes span fewer than two elevation
/// bands.
pub fn compute_drift_profile(
    isolated: &VariantResult,
    fixed_base: &VariantResult,
    nodes: &HashMap<u32, Node>,
    axis: VerticalAxis,
) -> Vec<DriftProfile> {
    let bands = elevation_bands(nodes, axis);
    if bands.len() < 2 {
        debug!("Drift profile skipped: {} elevation band(s)", bands.len());
        return Vec::new();
    }

    let mut profile = Vec::with_capacity(bands.len() - 1);
    for pair in bands.windows(2) {
        let (bottom, bottom_ids) = &pair[0];
        let (top, top_ids) = &pair[1];
        let story_height = top - bottom;
        if story_height <= 0.0 {
            continue;
        }

        let drift = |variant: &VariantResult| {
            let delta = mean_displacement(variant, top_ids) - mean_displacement(variant, bottom_ids);
            delta.abs() / story_height
        };

        profile.push(DriftProfile {
            story: profile.len() + 1,
            height: *top,
            isolated_drift: drift(isolated),
            fixed_base_drift: drift(fixed_base),
        });
    }

    debug!("Drift profile computed for {} stories", profile.len());
    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::PushoverResults;
    use approx::assert_relative_eq;

    fn variant(disps: &[(u32, f64)]) -> VariantResult {
        let mut pushover = PushoverResults::default();
        for (id, dx) in disps {
            pushover.node_displacements.insert(*id, vec![*dx, 0.0, 0.0]);
        }
        VariantResult::from_pushover(pushover)
    }

    fn nodes(list: &[(u32, f64)]) -> HashMap<u32, Node> {
        list.iter()
            .map(|(id, y)| (*id, Node::planar(0.0, *y)))
            .collect()
    }

    #[test]
    fn test_two_story_profile() {
        let nodes = nodes(&[(1, 0.0), (2, 0.0), (3, 3.0), (4, 3.0), (5, 6.0)]);
        let iso = variant(&[(1, 0.0), (2, 0.0), (3, 0.30), (4, 0.30), (5, 0.33)]);
        let fb = variant(&[(1, 0.0), (2, 0.0), (3, 0.06), (4, 0.06), (5, 0.15)]);

        let profile = compute_drift_profile(&iso, &fb, &nodes, VerticalAxis::Y);
        assert_eq!(profile.len(), 2);

        assert_eq!(profile[0].story, 1);
        assert_eq!(profile[0].height, 3.0);
        assert_relative_eq!(profile[0].isolated_drift, 0.10, epsilon = 1e-12);
        assert_relative_eq!(profile[0].fixed_base_drift, 0.02, epsilon = 1e-12);

        assert_eq!(profile[1].story, 2);
        assert_eq!(profile[1].height, 6.0);
        assert_relative_eq!(profile[1].isolated_drift, 0.01, epsilon = 1e-12);
        assert_relative_eq!(profile[1].fixed_base_drift, 0.03, epsilon = 1e-12);
    }

    #[test]
    fn test_single_level_is_empty() {
        let nodes = nodes(&[(1, 3.0), (2, 3.2), (3, 2.9)]);
        let v = variant(&[(1, 1.0)]);
        assert!(compute_drift_profile(&v, &v, &nodes, VerticalAxis::Y).is_empty());
        assert!(compute_drift_profile(&v, &v, &HashMap::new(), VerticalAxis::Y).is_empty());
    }

    #[test]
    fn test_rounding_merges_jittered_floors() {
        let nodes = nodes(&[(1, 0.0), (2, 0.0004), (3, 3.4999), (4, 2.6)]);
        let v = variant(&[(1, 0.0), (2, 0.0), (3, 0.2), (4, 0.4)]);
        let profile = compute_drift_profile(&v, &v, &nodes, VerticalAxis::Y);
        assert_eq!(profile.len(), 1);
        assert_eq!(profile[0].height, 3.0);
        assert_relative_eq!(profile[0].isolated_drift, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_half_rounds_away_from_zero() {
        // Pit at -0.5 is its own band below the ground band
        let nodes = nodes(&[(1, -0.5), (2, 0.0), (3, 3.0)]);
        let v = variant(&[(1, 0.0), (2, 0.0), (3, 0.3)]);
        let profile = compute_drift_profile(&v, &v, &nodes, VerticalAxis::Y);
        assert_eq!(profile.len(), 2);
        assert_eq!(profile[0].height, 0.0);
        assert_eq!(profile[1].height, 3.0);
    }

    #[test]
    fn test_missing_nodes_excluded_from_mean() {
        // Node 4 has no data: the top mean is 0.6, not 0.3
        let nodes = nodes(&[(1, 0.0), (3, 2.0), (4, 2.0)]);
        let v = variant(&[(1, 0.0), (3, 0.6)]);
        let profile = compute_drift_profile(&v, &v, &nodes, VerticalAxis::Y);
        assert_relative_eq!(profile[0].isolated_drift, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_band_without_data_has_zero_mean() {
        let nodes = nodes(&[(1, 0.0), (2, 4.0)]);
        let v = variant(&[(2, -0.8)]);
        let profile = compute_drift_profile(&v, &v, &nodes, VerticalAxis::Y);
        assert_relative_eq!(profile[0].isolated_drift, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_z_up_axis() {
        let nodes: HashMap<u32, Node> = [(1, Node::new(0.0, 5.0, 0.0)), (2, Node::new(0.0, 5.0, 2.0))]
            .into_iter()
            .collect();
        let v = variant(&[(1, 0.0), (2, 0.1)]);
        assert_eq!(compute_drift_profile(&v, &v, &nodes, VerticalAxis::Z).len(), 1);
        assert!(compute_drift_profile(&v, &v, &nodes, VerticalAxis::Y).is_empty());
    }
}
