//! Result types consumed by the comparison engine
//!
//! These mirror what the analysis layer produces. Node and element keys are
//! integer tags; in JSON they appear as string map keys.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::analysis::AnalysisType;

/// DOF label of the horizontal (X) component in time-history series
pub const HORIZONTAL_DOF: &str = "1";

/// Plastic hinge performance level (ASCE 41)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceLevel {
    /// Immediate Occupancy
    IO,
    /// Life Safety
    LS,
    /// Collapse Prevention
    CP,
}

impl PerformanceLevel {
    /// Reporting order
    pub const ALL: [PerformanceLevel; 3] = [Self::IO, Self::LS, Self::CP];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IO => "IO",
            Self::LS => "LS",
            Self::CP => "CP",
        }
    }

    /// Exact tag match; "elastic", "beyondCP" and friends are not levels
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "IO" => Some(Self::IO),
            "LS" => Some(Self::LS),
            "CP" => Some(Self::CP),
            _ => None,
        }
    }

    /// Level for a moment demand/capacity ratio; `None` while elastic
    pub fn classify(dc_ratio: f64) -> Option<Self> {
        if dc_ratio < 1.0 {
            None
        } else if dc_ratio < 2.0 {
            Some(Self::IO)
        } else if dc_ratio < 3.0 {
            Some(Self::LS)
        } else {
            Some(Self::CP)
        }
    }
}

impl fmt::Display for PerformanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Element end where a hinge forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HingeEnd {
    #[serde(alias = "i")]
    I,
    #[serde(alias = "j")]
    J,
}

/// One plastic hinge observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HingeState {
    pub element_id: u32,
    pub end: HingeEnd,
    /// Plastic rotation (rad)
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub moment: f64,
    /// Raw level tag as reported; `None` when elastic
    #[serde(default)]
    pub performance_level: Option<String>,
    #[serde(default)]
    pub demand_capacity_ratio: f64,
}

impl HingeState {
    /// Classify a hinge from its moment D/C ratio.
    ///
    /// Plastic rotation is approximated as 0.01 rad per unit of D/C
    /// beyond yield.
    pub fn from_demand_capacity(element_id: u32, end: HingeEnd, moment: f64, dc_ratio: f64) -> Self {
        let level = PerformanceLevel::classify(dc_ratio);
        let rotation = if level.is_some() {
            (dc_ratio - 1.0) * 0.01
        } else {
            0.0
        };
        Self {
            element_id,
            end,
            rotation,
            moment,
            performance_level: level.map(|l| l.as_str().to_string()),
            demand_capacity_ratio: dc_ratio,
        }
    }

    /// The reporting level, if the tag is one of IO/LS/CP
    pub fn level(&self) -> Option<PerformanceLevel> {
        self.performance_level
            .as_deref()
            .and_then(PerformanceLevel::from_tag)
    }
}

/// A single point on the pushover capacity curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityCurvePoint {
    pub base_shear: f64,
    pub roof_displacement: f64,
}

/// Results from a static (gravity) analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticResults {
    /// node -> [disp per DOF]
    #[serde(default)]
    pub node_displacements: HashMap<u32, Vec<f64>>,
    /// element -> local forces
    #[serde(default)]
    pub element_forces: HashMap<u32, Vec<f64>>,
    /// node -> [reaction per DOF]
    #[serde(default)]
    pub reactions: HashMap<u32, Vec<f64>>,
}

/// Results from a modal analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModalResults {
    /// Natural periods (s)
    #[serde(default)]
    pub periods: Vec<f64>,
    /// Natural frequencies (Hz)
    #[serde(default)]
    pub frequencies: Vec<f64>,
    /// mode -> node -> shape
    #[serde(default)]
    pub mode_shapes: HashMap<u32, HashMap<u32, Vec<f64>>>,
    /// direction -> participation ratio per mode
    #[serde(default)]
    pub mass_participation: HashMap<String, Vec<f64>>,
}

/// Results from a nonlinear time-history analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeHistoryResults {
    /// Time stamps (s)
    #[serde(default)]
    pub time: Vec<f64>,
    /// node -> DOF label -> series
    #[serde(default)]
    pub node_displacements: HashMap<u32, HashMap<String, Vec<f64>>>,
    /// bearing -> response type -> series
    #[serde(default)]
    pub bearing_responses: HashMap<u32, HashMap<String, Vec<f64>>>,
}

impl TimeHistoryResults {
    /// Largest-magnitude sample of a node's horizontal series, sign kept
    pub fn peak_horizontal_displacement(&self, node_id: u32) -> Option<f64> {
        let series = self.node_displacements.get(&node_id)?.get(HORIZONTAL_DOF)?;
        series
            .iter()
            .copied()
            .reduce(|peak, v| if v.abs() > peak.abs() { v } else { peak })
    }
}

/// Results from a pushover analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushoverResults {
    #[serde(default)]
    pub capacity_curve: Vec<CapacityCurvePoint>,
    /// Hinge states at the final step
    #[serde(default)]
    pub hinge_states: Vec<HingeState>,
    #[serde(default)]
    pub max_base_shear: f64,
    #[serde(default)]
    pub max_roof_displacement: f64,
    #[serde(default)]
    pub ductility_ratio: f64,
    /// Final step: node -> [disp per DOF]
    #[serde(default)]
    pub node_displacements: HashMap<u32, Vec<f64>>,
}

impl PushoverResults {
    /// Roof displacement over the target displacement
    pub fn nominal_ductility(&self, target_displacement: f64) -> f64 {
        self.max_roof_displacement / target_displacement.max(0.001)
    }

    /// Ductility estimated from the capacity curve.
    ///
    /// Yield is taken at the first point whose base shear exceeds 80% of the
    /// peak; returns 0 when no such point has a positive displacement.
    pub fn estimated_ductility(&self) -> f64 {
        let threshold = 0.8 * self.max_base_shear;
        let yield_disp = self
            .capacity_curve
            .iter()
            .find(|pt| pt.base_shear > threshold)
            .map(|pt| pt.roof_displacement);

        match yield_disp {
            Some(uy) if uy > 0.0 => self.max_roof_displacement / uy,
            _ => 0.0,
        }
    }
}

/// Results of any analysis type, tagged by type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "results", rename_all = "snake_case")]
pub enum AnalysisResults {
    Static(StaticResults),
    Modal(ModalResults),
    TimeHistory(TimeHistoryResults),
    Pushover(PushoverResults),
}

/// `{ type, results }` with the payload held as a JSON value until the
/// type is known, so key order does not matter and integer map keys parse
#[derive(Deserialize)]
struct TaggedResults {
    #[serde(rename = "type")]
    analysis_type: AnalysisType,
    results: serde_json::Value,
}

impl<'de> Deserialize<'de> for AnalysisResults {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let TaggedResults {
            analysis_type,
            results,
        } = TaggedResults::deserialize(deserializer)?;

        let parsed = match analysis_type {
            AnalysisType::Static => serde_json::from_value(results).map(Self::Static),
            AnalysisType::Modal => serde_json::from_value(results).map(Self::Modal),
            AnalysisType::TimeHistory => serde_json::from_value(results).map(Self::TimeHistory),
            AnalysisType::Pushover => serde_json::from_value(results).map(Self::Pushover),
        };
        parsed.map_err(de::Error::custom)
    }
}

impl AnalysisResults {
    pub fn analysis_type(&self) -> AnalysisType {
        match self {
            Self::Static(_) => AnalysisType::Static,
            Self::Modal(_) => AnalysisType::Modal,
            Self::TimeHistory(_) => AnalysisType::TimeHistory,
            Self::Pushover(_) => AnalysisType::Pushover,
        }
    }
}

/// Which analyses contributed to a variant's results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantData {
    Pushover(PushoverResults),
    TimeHistory(TimeHistoryResults),
    Both {
        pushover: PushoverResults,
        time_history: TimeHistoryResults,
    },
}

/// Full result of one analysis run for one structural variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantResult {
    pub data: VariantData,
    #[serde(default)]
    pub hinge_states: Option<Vec<HingeState>>,
    pub max_base_shear: f64,
    pub max_roof_displacement: f64,
}

impl VariantResult {
    /// Variant backed by pushover output; peaks and hinges come from it
    pub fn from_pushover(pushover: PushoverResults) -> Self {
        Self {
            hinge_states: Some(pushover.hinge_states.clone()),
            max_base_shear: pushover.max_base_shear,
            max_roof_displacement: pushover.max_roof_displacement,
            data: VariantData::Pushover(pushover),
        }
    }

    /// Variant backed by time-history output
    pub fn from_time_history(
        time_history: TimeHistoryResults,
        max_base_shear: f64,
        max_roof_displacement: f64,
    ) -> Self {
        Self {
            data: VariantData::TimeHistory(time_history),
            hinge_states: None,
            max_base_shear,
            max_roof_displacement,
        }
    }

    pub fn pushover(&self) -> Option<&PushoverResults> {
        match &self.data {
            VariantData::Pushover(p) | VariantData::Both { pushover: p, .. } => Some(p),
            VariantData::TimeHistory(_) => None,
        }
    }

    pub fn time_history(&self) -> Option<&TimeHistoryResults> {
        match &self.data {
            VariantData::TimeHistory(t) | VariantData::Both { time_history: t, .. } => Some(t),
            VariantData::Pushover(_) => None,
        }
    }

    /// Horizontal (DOF 1) displacement of a node, `None` when unavailable.
    ///
    /// Pushover gives the final-step value; time history gives the peak.
    /// When both are present the pushover value wins.
    pub fn horizontal_displacement(&self, node_id: u32) -> Option<f64> {
        let from_pushover = self
            .pushover()
            .and_then(|p| p.node_displacements.get(&node_id))
            .and_then(|d| d.first().copied());

        from_pushover.or_else(|| {
            self.time_history()
                .and_then(|t| t.peak_horizontal_displacement(node_id))
        })
    }

    /// Hinge states, empty when none were reported
    pub fn hinges(&self) -> &[HingeState] {
        self.hinge_states.as_deref().unwrap_or(&[])
    }
}
