//! Triple Friction Pendulum (TFP) isolation bearing

use serde::{Deserialize, Serialize};

use crate::error::{IsoVisError, IsoVisResult};

/// Velocity-dependent friction on one sliding surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrictionModel {
    /// Friction coefficient at slow sliding velocity
    pub mu_slow: f64,
    /// Friction coefficient at fast sliding velocity
    pub mu_fast: f64,
    /// Transition rate between slow and fast friction
    pub trans_rate: f64,
}

impl FrictionModel {
    pub fn new(mu_slow: f64, mu_fast: f64, trans_rate: f64) -> Self {
        Self {
            mu_slow,
            mu_fast,
            trans_rate,
        }
    }

    /// Return a copy with both friction coefficients multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            mu_slow: self.mu_slow * factor,
            mu_fast: self.mu_fast * factor,
            trans_rate: self.trans_rate,
        }
    }

    fn check(&self) -> Result<(), String> {
        if self.mu_slow < 0.0 || self.mu_fast < 0.0 {
            return Err("friction coefficients must be >= 0".to_string());
        }
        if self.mu_fast < self.mu_slow {
            return Err("mu_fast must be >= mu_slow".to_string());
        }
        Ok(())
    }
}

fn default_uy() -> f64 {
    0.001
}
fn default_kvt() -> f64 {
    100.0
}
fn default_min_fv() -> f64 {
    0.1
}
fn default_tol() -> f64 {
    1e-8
}

/// A TFP isolator connecting a ground node to a structure base node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TFPBearing {
    /// Bearing element tag
    pub id: u32,
    /// Bottom (ground) node
    pub node_i: u32,
    /// Top (structure base) node
    pub node_j: u32,
    /// One friction model per sliding surface
    pub friction_models: [FrictionModel; 4],
    /// Effective radii of curvature [L1, L2, L3]
    pub radii: [f64; 3],
    /// Displacement capacities [d1, d2, d3]
    pub disp_capacities: [f64; 3],
    /// Supported vertical load
    pub weight: f64,
    /// Yield displacement
    #[serde(default = "default_uy")]
    pub uy: f64,
    /// Vertical stiffness factor
    #[serde(default = "default_kvt")]
    pub kvt: f64,
    /// Minimum vertical force ratio
    #[serde(default = "default_min_fv")]
    pub min_fv: f64,
    /// Convergence tolerance
    #[serde(default = "default_tol")]
    pub tol: f64,
}

impl TFPBearing {
    /// Create a bearing with default uy, kvt, min_fv and tol
    pub fn new(
        id: u32,
        node_i: u32,
        node_j: u32,
        friction_models: [FrictionModel; 4],
        radii: [f64; 3],
        disp_capacities: [f64; 3],
        weight: f64,
    ) -> Self {
        Self {
            id,
            node_i,
            node_j,
            friction_models,
            radii,
            disp_capacities,
            weight,
            uy: default_uy(),
            kvt: default_kvt(),
            min_fv: default_min_fv(),
            tol: default_tol(),
        }
    }

    /// Total travel capacity: d1 + d2 + d3
    pub fn capacity(&self) -> f64 {
        self.disp_capacities.iter().sum()
    }

    /// Return a copy with all friction coefficients multiplied by `factor`
    pub fn with_lambda_factor(&self, factor: f64) -> Self {
        Self {
            friction_models: self.friction_models.map(|fm| fm.scaled(factor)),
            ..self.clone()
        }
    }

    /// Check scalar properties and friction models
    pub fn validate(&self) -> IsoVisResult<()> {
        let invalid = |reason: String| IsoVisError::InvalidBearing {
            id: self.id,
            reason,
        };

        for (i, fm) in self.friction_models.iter().enumerate() {
            fm.check()
                .map_err(|reason| invalid(format!("friction model {}: {}", i, reason)))?;
        }
        if self
            .disp_capacities
            .iter()
            .any(|d| !d.is_finite() || *d < 0.0)
        {
            return Err(invalid("displacement capacities must be >= 0".to_string()));
        }
        if self.weight <= 0.0 {
            return Err(invalid("weight must be > 0".to_string()));
        }
        if self.uy <= 0.0 {
            return Err(invalid("uy must be > 0".to_string()));
        }
        if self.kvt <= 0.0 {
            return Err(invalid("kvt must be > 0".to_string()));
        }
        if self.min_fv < 0.0 {
            return Err(invalid("min_fv must be >= 0".to_string()));
        }
        if self.tol <= 0.0 {
            return Err(invalid("tol must be > 0".to_string()));
        }
        Ok(())
    }
}
