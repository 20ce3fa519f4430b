//! IsoVis Example - three-story frame on TFP bearings
//!
//! The pushover results below stand in for solver output so the example
//! runs without an analysis backend.

use isovis_engine::prelude::*;

const STORY_HEIGHT: f64 = 3.5;
const BAY_WIDTH: f64 = 6.0;

fn node_id(level: u32, column: u32) -> u32 {
    100 * level + column + 1
}

/// Frame nodes from the ground (level 0) to the roof; bearings between
/// level 0 and level 1
fn build_model(stories: u32, bays: u32) -> IsoVisResult<StructuralModel> {
    let mut model = StructuralModel::with_info(ModelInfo {
        name: format!("{}-story isolated frame", stories),
        ndm: 3,
        ndf: 6,
        ..ModelInfo::default()
    });

    for level in 0..=stories + 1 {
        let z = if level == 0 {
            0.0
        } else {
            1.0 + (level - 1) as f64 * STORY_HEIGHT
        };
        for column in 0..=bays {
            model.add_node(node_id(level, column), Node::new(column as f64 * BAY_WIDTH, 0.0, z))?;
        }
    }

    let inner = FrictionModel::new(0.012, 0.018, 0.4);
    let outer = FrictionModel::new(0.018, 0.030, 0.4);
    for column in 0..=bays {
        model.add_support(node_id(0, column), Support::fixed())?;
        model.add_bearing(TFPBearing::new(
            column + 1,
            node_id(0, column),
            node_id(1, column),
            [inner, outer, inner, outer],
            [0.4, 2.0, 0.4],
            [0.05, 0.4, 0.05],
            1000.0,
        ))?;
    }

    model.validate()?;
    Ok(model)
}

/// Pushover output with a linear displacement shape above an offset base
fn pushover(
    model: &StructuralModel,
    base_disp: f64,
    roof_disp: f64,
    max_shear: f64,
    hinges: Vec<HingeState>,
) -> PushoverResults {
    let roof_z = model
        .nodes
        .values()
        .map(|n| n.z)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut results = PushoverResults {
        capacity_curve: (0..=10)
            .map(|i| {
                let t = i as f64 / 10.0;
                CapacityCurvePoint {
                    base_shear: max_shear * (1.0 - (1.0 - t).powi(3)),
                    roof_displacement: roof_disp * t,
                }
            })
            .collect(),
        hinge_states: hinges,
        max_base_shear: max_shear,
        max_roof_displacement: roof_disp,
        ..Default::default()
    };

    for (id, node) in &model.nodes {
        let dx = if node.z <= 0.0 {
            0.0
        } else {
            base_disp + (roof_disp - base_disp) * (node.z - 1.0) / (roof_z - 1.0)
        };
        results.node_displacements.insert(*id, vec![dx, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }
    results
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    println!("=== IsoVis Example: Isolated vs Fixed-Base Frame ===\n");

    let isolated_model = build_model(3, 2)?;
    let fixed_model = isolated_model.fixed_base_variant();
    println!(
        "Model: {} ({} nodes, {} bearings; fixed-base variant has {})",
        isolated_model.info.name,
        isolated_model.nodes.len(),
        isolated_model.bearings.len(),
        fixed_model.bearings.len()
    );

    let isolated = VariantResult::from_pushover(pushover(
        &isolated_model,
        0.28,
        0.32,
        1850.0,
        vec![HingeState::from_demand_capacity(12, HingeEnd::I, 210.0, 1.3)],
    ));
    let fixed_base = VariantResult::from_pushover(pushover(
        &fixed_model,
        0.0,
        0.12,
        5400.0,
        vec![
            HingeState::from_demand_capacity(12, HingeEnd::I, 480.0, 1.6),
            HingeState::from_demand_capacity(12, HingeEnd::J, 610.0, 2.4),
            HingeState::from_demand_capacity(15, HingeEnd::I, 790.0, 3.2),
        ],
    ));

    let summary = compute_comparison_summary(&isolated, &fixed_base, &isolated_model);

    println!("\n--- Inter-story Drift ---");
    println!("{:>6} {:>10} {:>12} {:>12}", "Story", "Height", "Isolated", "Fixed-base");
    for d in &summary.drift_profile {
        println!(
            "{:>6} {:>10.2} {:>11.3}% {:>11.3}%",
            d.story,
            d.height,
            d.isolated_drift * 100.0,
            d.fixed_base_drift * 100.0
        );
    }

    println!("\n--- Base Shear ---");
    println!(
        "Isolated: {:.1} kN, Fixed-base: {:.1} kN, Reduction: {:.1}%",
        summary.base_shear.isolated,
        summary.base_shear.fixed_base,
        summary.base_shear.reduction_percent
    );

    println!("\n--- Bearing Demand/Capacity ---");
    for b in &summary.bearing_demands {
        println!(
            "Bearing {}: demand {:.3} m / capacity {:.3} m = {:.2}",
            b.bearing_id, b.demand, b.capacity, b.dc_ratio
        );
    }

    println!("\n--- Hinge Distribution ---");
    for h in &summary.hinge_distribution {
        println!("{}: isolated {}, fixed-base {}", h.level, h.isolated, h.fixed_base);
    }

    Ok(())
}
