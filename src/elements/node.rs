//! Node element - represents a point in 3D space

use serde::{Deserialize, Serialize};

/// Axis along which elevations are measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VerticalAxis {
    /// 2D frames and Y-up 3D models
    #[default]
    Y,
    /// Z-up 3D models (required by TFP bearing elements)
    Z,
}

/// A node in the structural model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    #[serde(default)]
    pub z: f64,
}

impl Node {
    /// Create a new node at the given coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create a node in a 2D (X-Y) frame
    pub fn planar(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }

    /// Build a node from a coordinate list of length 1 to 3.
    /// Missing trailing coordinates are zero.
    pub fn from_coords(coords: &[f64]) -> Option<Self> {
        match coords {
            [x] => Some(Self::new(*x, 0.0, 0.0)),
            [x, y] => Some(Self::new(*x, *y, 0.0)),
            [x, y, z] => Some(Self::new(*x, *y, *z)),
            _ => None,
        }
    }

    /// Coordinate along the given vertical axis
    pub fn elevation(&self, axis: VerticalAxis) -> f64 {
        match axis {
            VerticalAxis::Y => self.y,
            VerticalAxis::Z => self.z,
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}
