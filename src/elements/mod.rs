//! Structural model building blocks

mod bearing;
mod node;
mod support;

pub use bearing::{FrictionModel, TFPBearing};
pub use node::{Node, VerticalAxis};
pub use support::Support;

#[cfg(test)]
pub(crate) use bearing::tests::sample_bearing;
