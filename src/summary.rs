//! Summary statistics for a single analysis result set

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::results::{
    AnalysisResults, ModalResults, PerformanceLevel, PushoverResults, StaticResults,
    TimeHistoryResults,
};

/// Static analysis: governing displacement and reaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticSummary {
    pub max_displacement: f64,
    pub max_displacement_node: Option<u32>,
    pub max_reaction: f64,
    pub max_reaction_node: Option<u32>,
    pub num_nodes: usize,
}

/// Modal analysis: periods and the fundamental mode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModalSummary {
    pub num_modes: usize,
    pub periods: Vec<f64>,
    pub frequencies: Vec<f64>,
    pub fundamental_period: Option<f64>,
    pub fundamental_frequency: Option<f64>,
}

/// Time history: duration and peak responses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeHistorySummary {
    pub duration: f64,
    pub num_steps: usize,
    /// node -> peak |displacement| over all DOFs
    pub peak_node_displacements: BTreeMap<u32, f64>,
    /// bearing -> "peak_<response>" -> peak |value|
    pub peak_bearing_responses: BTreeMap<u32, BTreeMap<String, f64>>,
}

/// Hinge tallies including elastic hinges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HingeCounts {
    pub elastic: usize,
    #[serde(rename = "IO")]
    pub io: usize,
    #[serde(rename = "LS")]
    pub ls: usize,
    #[serde(rename = "CP")]
    pub cp: usize,
}

/// Pushover: capacity peaks, hinge counts and ductility
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushoverSummary {
    pub max_base_shear: f64,
    pub max_roof_displacement: f64,
    pub num_steps: usize,
    pub num_hinges: usize,
    pub hinge_counts: HingeCounts,
    pub ductility_ratio: f64,
}

/// Summary of any analysis type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResultSummary {
    Static(StaticSummary),
    Modal(ModalSummary),
    TimeHistory(TimeHistorySummary),
    Pushover(PushoverSummary),
}

/// Summarize results according to their analysis type
pub fn summarize(results: &AnalysisResults) -> ResultSummary {
    debug!("Summarizing {:?} results", results.analysis_type());
    match results {
        AnalysisResults::Static(r) => ResultSummary::Static(summarize_static(r)),
        AnalysisResults::Modal(r) => ResultSummary::Modal(summarize_modal(r)),
        AnalysisResults::TimeHistory(r) => ResultSummary::TimeHistory(summarize_time_history(r)),
        AnalysisResults::Pushover(r) => ResultSummary::Pushover(summarize_pushover(r)),
    }
}

fn magnitude(values: &[f64]) -> f64 {
    values.iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// Node with the largest vector magnitude; ties keep the lowest id
fn max_by_magnitude(map: &HashMap<u32, Vec<f64>>) -> (f64, Option<u32>) {
    let mut ids: Vec<&u32> = map.keys().collect();
    ids.sort_unstable();

    let mut max = 0.0;
    let mut node = None;
    for id in ids {
        let mag = magnitude(&map[id]);
        if mag > max {
            max = mag;
            node = Some(*id);
        }
    }
    (max, node)
}

fn peak_abs(values: &[f64]) -> Option<f64> {
    values.iter().map(|v| v.abs()).reduce(f64::max)
}

pub fn summarize_static(results: &StaticResults) -> StaticSummary {
    let (max_displacement, max_displacement_node) = max_by_magnitude(&results.node_displacements);
    let (max_reaction, max_reaction_node) = max_by_magnitude(&results.reactions);
    StaticSummary {
        max_displacement,
        max_displacement_node,
        max_reaction,
        max_reaction_node,
        num_nodes: results.node_displacements.len(),
    }
}

pub fn summarize_modal(results: &ModalResults) -> ModalSummary {
    ModalSummary {
        num_modes: results.periods.len(),
        periods: results.periods.clone(),
        frequencies: results.frequencies.clone(),
        fundamental_period: results.periods.first().copied(),
        fundamental_frequency: results.frequencies.first().copied(),
    }
}

pub fn summarize_time_history(results: &TimeHistoryResults) -> TimeHistorySummary {
    let peak_node_displacements = results
        .node_displacements
        .iter()
        .map(|(id, dofs)| {
            let peak = dofs
                .values()
                .filter_map(|series| peak_abs(series))
                .fold(0.0, f64::max);
            (*id, peak)
        })
        .collect();

    let peak_bearing_responses = results
        .bearing_responses
        .iter()
        .map(|(id, responses)| {
            let peaks = responses
                .iter()
                .filter_map(|(kind, series)| {
                    peak_abs(series).map(|peak| (format!("peak_{}", kind), peak))
                })
                .collect();
            (*id, peaks)
        })
        .collect();

    TimeHistorySummary {
        duration: results.time.last().copied().unwrap_or(0.0),
        num_steps: results.time.len(),
        peak_node_displacements,
        peak_bearing_responses,
    }
}

pub fn summarize_pushover(results: &PushoverResults) -> PushoverSummary {
    let mut hinge_counts = HingeCounts::default();
    for hinge in &results.hinge_states {
        match (&hinge.performance_level, hinge.level()) {
            (None, _) => hinge_counts.elastic += 1,
            (_, Some(PerformanceLevel::IO)) => hinge_counts.io += 1,
            (_, Some(PerformanceLevel::LS)) => hinge_counts.ls += 1,
            (_, Some(PerformanceLevel::CP)) => hinge_counts.cp += 1,
            (Some(tag), None) if tag == "elastic" => hinge_counts.elastic += 1,
            (Some(_), None) => {}
        }
    }

    PushoverSummary {
        max_base_shear: results.max_base_shear,
        max_roof_displacement: results.max_roof_displacement,
        num_steps: results.capacity_curve.len(),
        num_hinges: results.hinge_states.len(),
        hinge_counts,
        ductility_ratio: results.estimated_ductility(),
    }
}
