//! Structural model - nodes, supports and isolation bearings

use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::elements::{Node, Support, TFPBearing, VerticalAxis};
use crate::error::{IsoVisError, IsoVisResult};

/// Model metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelInfo {
    pub name: String,
    pub units: String,
    /// Number of spatial dimensions
    pub ndm: usize,
    /// Number of DOFs per node
    pub ndf: usize,
    /// Explicit Z-up flag; survives derived variants that drop the bearings
    pub z_up: bool,
}

impl Default for ModelInfo {
    fn default() -> Self {
        Self {
            name: "Untitled".to_string(),
            units: "kN-m".to_string(),
            ndm: 2,
            ndf: 3,
            z_up: false,
        }
    }
}

/// The structural model consumed by the comparison engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuralModel {
    pub info: ModelInfo,
    /// Nodes keyed by tag
    pub nodes: HashMap<u32, Node>,
    /// Support conditions keyed by node tag
    pub supports: HashMap<u32, Support>,
    /// Isolation bearings in insertion order
    pub bearings: Vec<TFPBearing>,
}

impl StructuralModel {
    /// Create a new empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty model with the given metadata
    pub fn with_info(info: ModelInfo) -> Self {
        Self {
            info,
            ..Self::default()
        }
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Add a node to the model
    pub fn add_node(&mut self, id: u32, node: Node) -> IsoVisResult<()> {
        if self.nodes.contains_key(&id) {
            return Err(IsoVisError::DuplicateId("node", id));
        }
        self.nodes.insert(id, node);
        Ok(())
    }

    /// Add or replace a support condition
    pub fn add_support(&mut self, node_id: u32, support: Support) -> IsoVisResult<()> {
        if !self.nodes.contains_key(&node_id) {
            return Err(IsoVisError::NodeNotFound(node_id));
        }
        self.supports.insert(node_id, support);
        Ok(())
    }

    /// Add a bearing after its node references have been checked
    pub fn add_bearing(&mut self, bearing: TFPBearing) -> IsoVisResult<()> {
        for node_id in [bearing.node_i, bearing.node_j] {
            if !self.nodes.contains_key(&node_id) {
                return Err(IsoVisError::NodeNotFound(node_id));
            }
        }
        if self.bearing(bearing.id).is_some() {
            return Err(IsoVisError::DuplicateId("bearing", bearing.id));
        }
        self.bearings.push(bearing);
        Ok(())
    }

    // ========================
    // Queries
    // ========================

    /// Look up a bearing by id
    pub fn bearing(&self, id: u32) -> Option<&TFPBearing> {
        self.bearings.iter().find(|b| b.id == id)
    }

    /// Z-up when flagged explicitly, or for a 3D model carrying bearings
    pub fn is_z_up(&self) -> bool {
        self.info.z_up || (self.info.ndm == 3 && !self.bearings.is_empty())
    }

    /// Axis used for story elevations
    pub fn vertical_axis(&self) -> VerticalAxis {
        if self.is_z_up() {
            VerticalAxis::Z
        } else {
            VerticalAxis::Y
        }
    }

    /// Check cross references and bearing properties.
    ///
    /// Models assembled through `add_*` are already consistent; this is for
    /// models deserialized wholesale.
    pub fn validate(&self) -> IsoVisResult<()> {
        for node_id in self.supports.keys() {
            if !self.nodes.contains_key(node_id) {
                return Err(IsoVisError::NodeNotFound(*node_id));
            }
        }

        let mut seen = Vec::with_capacity(self.bearings.len());
        for bearing in &self.bearings {
            if seen.contains(&bearing.id) {
                return Err(IsoVisError::DuplicateId("bearing", bearing.id));
            }
            seen.push(bearing.id);

            for node_id in [bearing.node_i, bearing.node_j] {
                if !self.nodes.contains_key(&node_id) {
                    return Err(IsoVisError::NodeNotFound(node_id));
                }
            }
            bearing.validate()?;
        }
        Ok(())
    }

    // ========================
    // Derived Variants
    // ========================

    /// Fixed-base counterpart: bearings removed, their top nodes fully fixed
    pub fn fixed_base_variant(&self) -> StructuralModel {
        let mut variant = self.clone();
        if self.is_z_up() {
            variant.info.z_up = true;
        }

        let mut fixed_nodes: Vec<u32> = variant.bearings.iter().map(|b| b.node_j).collect();
        fixed_nodes.sort_unstable();
        fixed_nodes.dedup();

        variant.bearings.clear();
        for node_id in &fixed_nodes {
            variant.supports.insert(*node_id, Support::fixed());
        }

        info!(
            "Generated fixed-base variant: removed {} bearings, fixed nodes {:?}",
            self.bearings.len(),
            fixed_nodes
        );
        variant
    }

    /// Copy with bearing friction scaled by a property modification factor
    pub fn with_lambda_factor(&self, factor: f64) -> StructuralModel {
        let mut variant = self.clone();
        variant.bearings = self
            .bearings
            .iter()
            .map(|b| b.with_lambda_factor(factor))
            .collect();

        info!(
            "Applied lambda factor {:.3} to all bearing friction models",
            factor
        );
        variant
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::elements::sample_bearing;
    use approx::assert_relative_eq;

    /// Two-column frame on two bearings, Z-up:
    /// ground nodes 1, 2 at z=0; base nodes 3, 4 at z=1; roof nodes 5, 6 at z=4
    pub(crate) fn isolated_frame() -> StructuralModel {
        let mut model = StructuralModel::with_info(ModelInfo {
            name: "Isolated portal".to_string(),
            ndm: 3,
            ndf: 6,
            ..ModelInfo::default()
        });
        model.add_node(1, Node::new(0.0, 0.0, 0.0)).unwrap();
        model.add_node(2, Node::new(6.0, 0.0, 0.0)).unwrap();
        model.add_node(3, Node::new(0.0, 0.0, 1.0)).unwrap();
        model.add_node(4, Node::new(6.0, 0.0, 1.0)).unwrap();
        model.add_node(5, Node::new(0.0, 0.0, 4.0)).unwrap();
        model.add_node(6, Node::new(6.0, 0.0, 4.0)).unwrap();
        model.add_support(1, Support::fixed()).unwrap();
        model.add_support(2, Support::fixed()).unwrap();
        model.add_bearing(sample_bearing(1, 1, 3)).unwrap();
        model.add_bearing(sample_bearing(2, 2, 4)).unwrap();
        model
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut model = StructuralModel::new();
        model.add_node(1, Node::default()).unwrap();
        assert!(matches!(
            model.add_node(1, Node::default()),
            Err(IsoVisError::DuplicateId("node", 1))
        ));
    }

    #[test]
    fn test_bearing_with_missing_node_rejected() {
        let mut model = StructuralModel::new();
        model.add_node(1, Node::default()).unwrap();
        assert!(matches!(
            model.add_bearing(sample_bearing(1, 1, 99)),
            Err(IsoVisError::NodeNotFound(99))
        ));
    }

    #[test]
    fn test_bearings_keep_insertion_order() {
        let mut model = StructuralModel::new();
        for id in 1..=4 {
            model.add_node(id, Node::default()).unwrap();
        }
        model.add_bearing(sample_bearing(7, 1, 2)).unwrap();
        model.add_bearing(sample_bearing(3, 3, 4)).unwrap();
        let ids: Vec<u32> = model.bearings.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![7, 3]);
    }

    #[test]
    fn test_vertical_axis_detection() {
        let model = isolated_frame();
        assert_eq!(model.vertical_axis(), VerticalAxis::Z);
        assert_eq!(StructuralModel::new().vertical_axis(), VerticalAxis::Y);
    }

    #[test]
    fn test_fixed_base_variant() {
        let model = isolated_frame();
        let fixed = model.fixed_base_variant();

        assert!(fixed.bearings.is_empty());
        assert!(fixed.supports[&3].is_fixed(6));
        assert!(fixed.supports[&4].is_fixed(6));
        assert!(fixed.nodes.contains_key(&1));
        // Still Z-up even though the bearings are gone
        assert!(fixed.info.z_up);
        assert_eq!(fixed.vertical_axis(), VerticalAxis::Z);
        // Source model untouched
        assert_eq!(model.bearings.len(), 2);
    }

    #[test]
    fn test_lambda_variant() {
        let model = isolated_frame();
        let lower = model.with_lambda_factor(0.85);
        assert_relative_eq!(
            lower.bearings[1].friction_models[3].mu_fast,
            0.030 * 0.85,
            epsilon = 1e-12
        );
        assert_eq!(lower.nodes, model.nodes);
    }

    #[test]
    fn test_validate_catches_dangling_bearing() {
        let mut model = isolated_frame();
        model.bearings[0].node_j = 42;
        assert!(matches!(model.validate(), Err(IsoVisError::NodeNotFound(42))));
    }

    #[test]
    fn test_validate_catches_duplicate_bearing() {
        let mut model = isolated_frame();
        model.bearings[1].id = 1;
        assert!(matches!(
            model.validate(),
            Err(IsoVisError::DuplicateId("bearing", 1))
        ));
    }
}
