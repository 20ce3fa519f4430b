//! JSON request/response types shared by the HTTP server and WASM bindings
//!
//! Requests use the analysis backend's layout: nodes carry a coordinate
//! list, bearings name their nodes as `[bottom, top]`, and each variant is
//! the flat record returned by a comparison run.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::analysis::{AnalysisParams, AnalysisType};
use crate::comparison::{
    compute_bound_envelope, compute_comparison_summary, BoundComparison, ComparisonRun,
    ComparisonSummary, LambdaFactors,
};
use crate::elements::{FrictionModel, Node, Support, TFPBearing, VerticalAxis};
use crate::error::{IsoVisError, IsoVisResult};
use crate::model::{ModelInfo, StructuralModel};
use crate::results::{
    AnalysisResults, HingeState, PushoverResults, TimeHistoryResults, VariantData, VariantResult,
};
use crate::summary::{summarize, ResultSummary};

// ========================
// Input Data Structures
// ========================

#[derive(Debug, Deserialize)]
pub struct NodeData {
    pub id: u32,
    pub coords: Vec<f64>,
    #[serde(default)]
    pub fixity: Vec<u8>,
}

#[derive(Debug, Deserialize)]
pub struct BearingData {
    pub id: u32,
    /// [bottom, top]
    pub nodes: [u32; 2],
    pub friction_models: Vec<FrictionModel>,
    pub radii: [f64; 3],
    pub disp_capacities: [f64; 3],
    pub weight: f64,
    #[serde(default)]
    pub uy: Option<f64>,
    #[serde(default)]
    pub kvt: Option<f64>,
    #[serde(default)]
    pub min_fv: Option<f64>,
    #[serde(default)]
    pub tol: Option<f64>,
}

impl BearingData {
    fn into_bearing(self) -> IsoVisResult<TFPBearing> {
        let id = self.id;
        let friction_models: [FrictionModel; 4] =
            self.friction_models
                .try_into()
                .map_err(|models: Vec<FrictionModel>| IsoVisError::InvalidBearing {
                    id,
                    reason: format!("expected 4 friction models, got {}", models.len()),
                })?;

        let mut bearing = TFPBearing::new(
            id,
            self.nodes[0],
            self.nodes[1],
            friction_models,
            self.radii,
            self.disp_capacities,
            self.weight,
        );
        if let Some(uy) = self.uy {
            bearing.uy = uy;
        }
        if let Some(kvt) = self.kvt {
            bearing.kvt = kvt;
        }
        if let Some(min_fv) = self.min_fv {
            bearing.min_fv = min_fv;
        }
        if let Some(tol) = self.tol {
            bearing.tol = tol;
        }
        Ok(bearing)
    }
}

#[derive(Debug, Deserialize)]
pub struct ModelData {
    #[serde(default)]
    pub model_info: ModelInfo,
    #[serde(default)]
    pub nodes: Vec<NodeData>,
    #[serde(default)]
    pub bearings: Vec<BearingData>,
}

impl ModelData {
    /// Assemble and validate a structural model
    pub fn into_model(self) -> IsoVisResult<StructuralModel> {
        let mut model = StructuralModel::with_info(self.model_info);

        for node in self.nodes {
            let position = Node::from_coords(&node.coords).ok_or_else(|| {
                IsoVisError::InvalidInput(format!(
                    "node {} has {} coordinates, expected 1 to 3",
                    node.id,
                    node.coords.len()
                ))
            })?;
            model.add_node(node.id, position)?;

            let support = Support::from_fixity(&node.fixity)?;
            if support.is_supported() {
                model.add_support(node.id, support)?;
            }
        }

        for bearing in self.bearings {
            model.add_bearing(bearing.into_bearing()?)?;
        }

        model.validate()?;
        Ok(model)
    }
}

/// One variant as returned by a comparison run
#[derive(Debug, Default, Deserialize)]
pub struct VariantRecord {
    #[serde(default)]
    pub pushover_results: Option<PushoverResults>,
    #[serde(default)]
    pub time_history_results: Option<TimeHistoryResults>,
    #[serde(default)]
    pub hinge_states: Option<Vec<HingeState>>,
    #[serde(default)]
    pub max_base_shear: Option<f64>,
    #[serde(default)]
    pub max_roof_displacement: Option<f64>,
    /// Final-step displacements reported beside the pushover block
    #[serde(default)]
    pub node_displacements: HashMap<u32, Vec<f64>>,
}

impl VariantRecord {
    /// Convert to a typed variant; a record with no analysis data is rejected
    pub fn into_variant(self, label: &str) -> IsoVisResult<VariantResult> {
        let pushover = self.pushover_results.map(|mut p| {
            if p.node_displacements.is_empty() {
                p.node_displacements = self.node_displacements;
            }
            p
        });

        let data = match (pushover, self.time_history_results) {
            (Some(pushover), Some(time_history)) => VariantData::Both {
                pushover,
                time_history,
            },
            (Some(pushover), None) => VariantData::Pushover(pushover),
            (None, Some(time_history)) => VariantData::TimeHistory(time_history),
            (None, None) => {
                return Err(IsoVisError::InvalidInput(format!(
                    "{} variant has neither pushover nor time-history results",
                    label
                )))
            }
        };

        let pushover = match &data {
            VariantData::Pushover(p) | VariantData::Both { pushover: p, .. } => Some(p),
            VariantData::TimeHistory(_) => None,
        };
        let max_base_shear = self
            .max_base_shear
            .or_else(|| pushover.map(|p| p.max_base_shear))
            .unwrap_or(0.0);
        let max_roof_displacement = self
            .max_roof_displacement
            .or_else(|| pushover.map(|p| p.max_roof_displacement))
            .unwrap_or(0.0);
        let hinge_states = self
            .hinge_states
            .or_else(|| pushover.map(|p| p.hinge_states.clone()));

        Ok(VariantResult {
            data,
            hinge_states,
            max_base_shear,
            max_roof_displacement,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ComparisonRequest {
    pub model: ModelData,
    pub isolated: VariantRecord,
    pub fixed_base: VariantRecord,
    #[serde(default)]
    pub isolated_upper: Option<VariantRecord>,
    #[serde(default)]
    pub isolated_lower: Option<VariantRecord>,
    #[serde(default)]
    pub lambda_factors: Option<LambdaFactors>,
    /// Pushover parameters of the runs, used for nominal ductility
    #[serde(default)]
    pub params: Option<AnalysisParams>,
}

// ========================
// Output Data Structures
// ========================

/// Ductility of both variants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DuctilityComparison {
    pub isolated: f64,
    pub fixed_base: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResponse {
    pub summary: ComparisonSummary,
    pub envelope: Vec<BoundComparison>,
    pub ductility: DuctilityComparison,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelReport {
    pub name: String,
    pub num_nodes: usize,
    pub num_supports: usize,
    pub num_bearings: usize,
    pub vertical_axis: VerticalAxis,
}

/// Envelope used by every endpoint
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<T>,
}

impl<T> From<IsoVisResult<T>> for ApiResponse<T> {
    fn from(result: IsoVisResult<T>) -> Self {
        match result {
            Ok(results) => Self {
                success: true,
                error: None,
                results: Some(results),
            },
            Err(e) => {
                warn!("Request failed: {}", e);
                Self {
                    success: false,
                    error: Some(e.to_string()),
                    results: None,
                }
            }
        }
    }
}

// ========================
// Operations
// ========================

fn ductility_of(variant: &VariantResult, target: Option<f64>) -> f64 {
    match (variant.pushover(), target) {
        (Some(p), Some(target)) => p.nominal_ductility(target),
        (Some(p), None) => p.estimated_ductility(),
        (None, _) => 0.0,
    }
}

/// Run the comparison summary and bound envelope for a request
pub fn compare(request: ComparisonRequest) -> IsoVisResult<ComparisonResponse> {
    let model = request.model.into_model()?;

    let target = match request.params {
        Some(params) => {
            let params = params.validate()?;
            if params.analysis_type != AnalysisType::Pushover {
                return Err(IsoVisError::InvalidParams(format!(
                    "comparison runs are pushover analyses, got {:?}",
                    params.analysis_type
                )));
            }
            params.target_displacement
        }
        None => None,
    };

    let mut run = ComparisonRun::new(
        request.isolated.into_variant("isolated")?,
        request.fixed_base.into_variant("fixed-base")?,
    );
    run.isolated_upper = request
        .isolated_upper
        .map(|r| r.into_variant("upper-bound"))
        .transpose()?;
    run.isolated_lower = request
        .isolated_lower
        .map(|r| r.into_variant("lower-bound"))
        .transpose()?;
    if let Some(factors) = request.lambda_factors {
        run.lambda_factors = factors;
    }

    debug!(
        "Comparison request: {} nodes, {} bearings, bounds: upper={} lower={}",
        model.nodes.len(),
        model.bearings.len(),
        run.isolated_upper.is_some(),
        run.isolated_lower.is_some()
    );

    Ok(ComparisonResponse {
        summary: compute_comparison_summary(&run.isolated, &run.fixed_base, &model),
        envelope: compute_bound_envelope(&run, &model.bearings),
        ductility: DuctilityComparison {
            isolated: ductility_of(&run.isolated, target),
            fixed_base: ductility_of(&run.fixed_base, target),
        },
    })
}

/// Validate a model and report what the engine sees
pub fn check_model(data: ModelData) -> IsoVisResult<ModelReport> {
    let model = data.into_model()?;
    Ok(ModelReport {
        name: model.info.name.clone(),
        num_nodes: model.nodes.len(),
        num_supports: model.supports.len(),
        num_bearings: model.bearings.len(),
        vertical_axis: model.vertical_axis(),
    })
}

fn to_json<T: Serialize>(response: &ApiResponse<T>) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        format!(
            r#"{{"success":false,"error":"Failed to serialize response: {}"}}"#,
            e
        )
    })
}

fn handle_json<Req, Resp>(request_json: &str, op: impl FnOnce(Req) -> IsoVisResult<Resp>) -> String
where
    Req: for<'de> Deserialize<'de>,
    Resp: Serialize,
{
    let result = serde_json::from_str::<Req>(request_json)
        .map_err(IsoVisError::from)
        .and_then(op);
    to_json(&ApiResponse::from(result))
}

/// `compare` over a JSON string
pub fn compare_json(request_json: &str) -> String {
    handle_json(request_json, compare)
}

/// `summarize` over a JSON `{ "type": ..., "results": ... }` string
pub fn summarize_json(request_json: &str) -> String {
    handle_json(request_json, |results: AnalysisResults| -> IsoVisResult<ResultSummary> {
        Ok(summarize(&results))
    })
}

/// `check_model` over a JSON string
pub fn check_model_json(request_json: &str) -> String {
    handle_json(request_json, check_model)
}
