//! Error types for the IsoVis engine
//!
//! The comparison functions themselves never fail. These errors come from
//! model building, parameter validation and the JSON boundary.

use thiserror::Error;

/// Main error type for IsoVis operations
#[derive(Error, Debug)]
pub enum IsoVisError {
    #[error("Node {0} not found in model")]
    NodeNotFound(u32),

    #[error("Duplicate {0} id {1} already exists")]
    DuplicateId(&'static str, u32),

    #[error("Bearing {id} is invalid: {reason}")]
    InvalidBearing { id: u32, reason: String },

    #[error("Invalid analysis parameters: {0}")]
    InvalidParams(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for IsoVis operations
pub type IsoVisResult<T> = Result<T, IsoVisError>;
