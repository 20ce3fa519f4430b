//! Analysis types and parameters

use serde::{Deserialize, Serialize};

use crate::error::{IsoVisError, IsoVisResult};

/// Type of structural analysis that produced a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    /// Linear static (gravity) analysis
    #[default]
    Static,
    /// Eigenvalue analysis for periods and mode shapes
    Modal,
    /// Nonlinear response history under ground motion
    TimeHistory,
    /// Nonlinear static pushover
    Pushover,
}

/// Lateral load distribution for pushover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoadPattern {
    #[default]
    Linear,
    FirstMode,
}

/// Ground motion record for time-history analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundMotion {
    /// Time step of the record (s)
    pub dt: f64,
    pub acceleration: Vec<f64>,
    /// DOF direction (1=X, 2=Y, 3=Z)
    #[serde(default = "default_direction")]
    pub direction: u8,
    #[serde(default = "default_scale")]
    pub scale_factor: f64,
}

fn default_direction() -> u8 {
    1
}

fn default_scale() -> f64 {
    1.0
}

/// Parameters controlling an analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisParams {
    #[serde(rename = "type")]
    pub analysis_type: AnalysisType,
    #[serde(default)]
    pub dt: Option<f64>,
    #[serde(default)]
    pub num_steps: Option<usize>,
    #[serde(default)]
    pub num_modes: Option<usize>,
    #[serde(default)]
    pub ground_motions: Vec<GroundMotion>,
    #[serde(default)]
    pub control_node: Option<u32>,
    #[serde(default)]
    pub control_dof: Option<u8>,
    #[serde(default)]
    pub target_displacement: Option<f64>,
    #[serde(default)]
    pub load_pattern: Option<LoadPattern>,
}

impl AnalysisParams {
    fn empty(analysis_type: AnalysisType) -> Self {
        Self {
            analysis_type,
            dt: None,
            num_steps: None,
            num_modes: None,
            ground_motions: Vec::new(),
            control_node: None,
            control_dof: None,
            target_displacement: None,
            load_pattern: None,
        }
    }

    /// Parameters for a displacement-controlled pushover
    pub fn pushover(target_displacement: f64) -> Self {
        Self {
            target_displacement: Some(target_displacement),
            ..Self::empty(AnalysisType::Pushover)
        }
    }

    /// Parameters for a time-history run
    pub fn time_history(dt: f64, num_steps: usize, ground_motions: Vec<GroundMotion>) -> Self {
        Self {
            dt: Some(dt),
            num_steps: Some(num_steps),
            ground_motions,
            ..Self::empty(AnalysisType::TimeHistory)
        }
    }

    /// Check required fields per analysis type and fill in defaults
    pub fn validate(mut self) -> IsoVisResult<Self> {
        if let Some(dt) = self.dt {
            if dt <= 0.0 {
                return Err(IsoVisError::InvalidParams("dt must be > 0".to_string()));
            }
        }
        if self.num_steps == Some(0) {
            return Err(IsoVisError::InvalidParams("num_steps must be > 0".to_string()));
        }
        if let Some(dof) = self.control_dof {
            if !(1..=3).contains(&dof) {
                return Err(IsoVisError::InvalidParams(format!(
                    "control_dof must be 1, 2 or 3, got {}",
                    dof
                )));
            }
        }

        match self.analysis_type {
            AnalysisType::Static => {}
            AnalysisType::Modal => {
                self.num_modes.get_or_insert(3);
            }
            AnalysisType::TimeHistory => {
                if self.dt.is_none() {
                    return Err(IsoVisError::InvalidParams(
                        "dt is required for time_history analysis".to_string(),
                    ));
                }
                if self.num_steps.is_none() {
                    return Err(IsoVisError::InvalidParams(
                        "num_steps is required for time_history analysis".to_string(),
                    ));
                }
                if self.ground_motions.is_empty() {
                    return Err(IsoVisError::InvalidParams(
                        "ground_motions required for time_history analysis".to_string(),
                    ));
                }
            }
            AnalysisType::Pushover => {
                match self.target_displacement {
                    None => {
                        return Err(IsoVisError::InvalidParams(
                            "target_displacement is required for pushover analysis".to_string(),
                        ))
                    }
                    Some(t) if t <= 0.0 => {
                        return Err(IsoVisError::InvalidParams(
                            "target_displacement must be > 0".to_string(),
                        ))
                    }
                    Some(_) => {}
                }
                self.num_steps.get_or_insert(100);
                self.control_dof.get_or_insert(1);
                self.load_pattern.get_or_insert(LoadPattern::Linear);
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pushover_defaults() {
        let params = AnalysisParams::pushover(10.0).validate().unwrap();
        assert_eq!(params.num_steps, Some(100));
        assert_eq!(params.control_dof, Some(1));
        assert_eq!(params.load_pattern, Some(LoadPattern::Linear));
    }

    #[test]
    fn test_pushover_requires_target() {
        let params = AnalysisParams::empty(AnalysisType::Pushover);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_modal_default_modes() {
        let params = AnalysisParams::empty(AnalysisType::Modal).validate().unwrap();
        assert_eq!(params.num_modes, Some(3));
    }

    #[test]
    fn test_time_history_requires_ground_motion() {
        let params = AnalysisParams::time_history(0.01, 500, Vec::new());
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("ground_motions"));
    }

    #[test]
    fn test_time_history_ok() {
        let gm = GroundMotion {
            dt: 0.01,
            acceleration: vec![0.0, 0.1, -0.1],
            direction: 1,
            scale_factor: 9.81,
        };
        assert!(AnalysisParams::time_history(0.01, 3, vec![gm]).validate().is_ok());
    }

    #[test]
    fn test_params_from_json() {
        let json = r#"{"type": "pushover", "target_displacement": 12.0, "load_pattern": "first_mode"}"#;
        let params: AnalysisParams = serde_json::from_str(json).unwrap();
        let params = params.validate().unwrap();
        assert_eq!(params.analysis_type, AnalysisType::Pushover);
        assert_eq!(params.load_pattern, Some(LoadPattern::FirstMode));
    }
}
