use std::collections::HashMap;

use isovis_engine::prelude::*;
use proptest::prelude::*;

fn pushover_variant(shear: f64, roof: f64, disps: &HashMap<u32, f64>) -> VariantResult {
    let mut results = PushoverResults {
        max_base_shear: shear,
        max_roof_displacement: roof,
        ..Default::default()
    };
    for (id, dx) in disps {
        results.node_displacements.insert(*id, vec![*dx, 0.0, 0.0]);
    }
    VariantResult::from_pushover(results)
}

fn tag_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(Some("IO".to_string())),
        Just(Some("LS".to_string())),
        Just(Some("CP".to_string())),
        Just(Some("elastic".to_string())),
        Just(Some("beyondCP".to_string())),
        Just(None),
    ]
}

fn hinge_list() -> impl Strategy<Value = Vec<HingeState>> {
    prop::collection::vec(tag_strategy(), 0..40).prop_map(|tags| {
        tags.into_iter()
            .enumerate()
            .map(|(i, performance_level)| HingeState {
                element_id: i as u32,
                end: HingeEnd::J,
                rotation: 0.0,
                moment: 0.0,
                performance_level,
                demand_capacity_ratio: 0.0,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn dc_ratio_is_finite_and_consistent(
        caps in prop::collection::vec(prop::array::uniform3(0.0f64..2.0), 0..12),
        roof in 0.0f64..3.0,
    ) {
        let fm = FrictionModel::new(0.01, 0.02, 0.4);
        let bearings: Vec<TFPBearing> = caps
            .iter()
            .enumerate()
            .map(|(i, c)| TFPBearing::new(i as u32 + 1, 1, 2, [fm; 4], [0.4, 2.0, 0.4], *c, 100.0))
            .collect();
        let iso = pushover_variant(0.0, roof, &HashMap::new());

        let demands = compute_bearing_demands(&iso, &bearings);
        prop_assert_eq!(demands.len(), bearings.len());
        for (demand, bearing) in demands.iter().zip(&bearings) {
            let capacity: f64 = bearing.disp_capacities.iter().sum();
            prop_assert_eq!(demand.bearing_id, bearing.id);
            prop_assert_eq!(demand.capacity, capacity);
            prop_assert!(demand.dc_ratio.is_finite());
            if capacity > 0.0 {
                prop_assert_eq!(demand.dc_ratio, demand.demand / capacity);
            } else {
                prop_assert_eq!(demand.dc_ratio, 0.0);
            }
        }
    }

    #[test]
    fn reduction_percent_formula(iso in -1e4f64..1e4, fb in prop_oneof![Just(0.0f64), -1e4f64..1e4]) {
        let cmp = compute_base_shear(
            &pushover_variant(iso, 0.0, &HashMap::new()),
            &pushover_variant(fb, 0.0, &HashMap::new()),
        );
        prop_assert!(cmp.reduction_percent.is_finite());
        if fb == 0.0 {
            prop_assert_eq!(cmp.reduction_percent, 0.0);
        } else {
            prop_assert_eq!(cmp.reduction_percent, (fb - iso) / fb * 100.0);
        }
    }

    #[test]
    fn hinge_counts_match_filtering(iso in hinge_list(), fb in hinge_list()) {
        let dist = count_hinges_by_level(&iso, &fb);
        prop_assert_eq!(dist.len(), 3);

        let expected = |list: &[HingeState], tag: &str| {
            list.iter().filter(|h| h.performance_level.as_deref() == Some(tag)).count()
        };
        for (entry, tag) in dist.iter().zip(["IO", "LS", "CP"]) {
            prop_assert_eq!(entry.level.as_str(), tag);
            prop_assert_eq!(entry.isolated, expected(&iso, tag));
            prop_assert_eq!(entry.fixed_base, expected(&fb, tag));
        }

        let reported: usize = dist.iter().map(|d| d.isolated).sum();
        let in_taxonomy = iso.iter().filter(|h| h.level().is_some()).count();
        prop_assert_eq!(reported, in_taxonomy);
    }

    #[test]
    fn drift_profile_ignores_node_order(
        (entries, order) in prop::collection::vec((0.0f64..30.0, -1.0f64..1.0, any::<bool>()), 0..30)
            .prop_flat_map(|entries| {
                let indices: Vec<usize> = (0..entries.len()).collect();
                (Just(entries), Just(indices).prop_shuffle())
            }),
    ) {
        let node_at = |i: usize| (i as u32 + 1, Node::planar(0.0, entries[i].0));
        let sequential: HashMap<u32, Node> = (0..entries.len()).map(node_at).collect();
        let shuffled: HashMap<u32, Node> = order.iter().map(|&i| node_at(i)).collect();
        let reversed: HashMap<u32, Node> = (0..entries.len()).rev().map(node_at).collect();

        let disps: HashMap<u32, f64> = entries
            .iter()
            .enumerate()
            .filter(|(_, (_, _, has_data))| *has_data)
            .map(|(i, (_, dx, _))| (i as u32 + 1, *dx))
            .collect();

        let iso = pushover_variant(0.0, 0.0, &disps);
        let fb = pushover_variant(0.0, 0.0, &HashMap::new());
        let a = compute_drift_profile(&iso, &fb, &sequential, VerticalAxis::Y);
        let b = compute_drift_profile(&iso, &fb, &shuffled, VerticalAxis::Y);
        let c = compute_drift_profile(&iso, &fb, &reversed, VerticalAxis::Y);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(&a, &c);

        for (i, story) in a.iter().enumerate() {
            prop_assert_eq!(story.story, i + 1);
            prop_assert!(story.isolated_drift >= 0.0);
        }
        let mut levels: Vec<i64> = entries.iter().map(|(y, _, _)| y.round() as i64).collect();
        levels.sort_unstable();
        levels.dedup();
        prop_assert_eq!(a.len(), levels.len().saturating_sub(1));
    }

    #[test]
    fn validated_bearings_have_nonnegative_capacity(
        caps in prop::array::uniform3(-1.0f64..1.0),
        roof in 0.0f64..3.0,
    ) {
        let fm = FrictionModel::new(0.01, 0.02, 0.4);
        let mut model = StructuralModel::new();
        model.add_node(1, Node::planar(0.0, 0.0)).unwrap();
        model.add_node(2, Node::planar(0.0, 1.0)).unwrap();
        model
            .add_bearing(TFPBearing::new(1, 1, 2, [fm; 4], [0.4, 2.0, 0.4], caps, 100.0))
            .unwrap();

        match model.validate() {
            Ok(()) => {
                prop_assert!(caps.iter().all(|c| *c >= 0.0));
                let iso = pushover_variant(0.0, roof, &HashMap::new());
                for demand in compute_bearing_demands(&iso, &model.bearings) {
                    prop_assert!(demand.capacity >= 0.0);
                    prop_assert!(demand.dc_ratio >= 0.0 && demand.dc_ratio.is_finite());
                }
            }
            Err(err) => {
                prop_assert!(caps.iter().any(|c| *c < 0.0));
                let is_invalid_bearing = matches!(err, IsoVisError::InvalidBearing { id: 1, .. });
                prop_assert!(is_invalid_bearing);
            }
        }
    }
}
