use std::collections::BTreeSet;

use grid_types::{Connectivity, Coord, Grid};
use proptest::prelude::*;
use structure_recognition::{
    DistanceStrategy, LandmarkSet, RecognizedStructure, ValueCondition, landmark_distances,
    recognize_connected_regions, recognize_value_regions,
};

fn small_grid() -> impl Strategy<Value = Grid> {
    (1usize..7, 1usize..7).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::collection::vec(0u32..4, cols), rows)
            .prop_map(|rows| Grid::new(rows).expect("generated grid is rectangular"))
    })
}

fn connectivity() -> impl Strategy<Value = Connectivity> {
    prop_oneof![Just(Connectivity::Four), Just(Connectivity::Eight)]
}

/// Value landmarks, or cell landmarks drawn from positions inside a `rows` x `cols` grid.
fn landmarks_for((rows, cols): (usize, usize), target: u32) -> impl Strategy<Value = LandmarkSet> {
    prop_oneof![
        (1u32..4)
            .prop_filter("landmark differs from target", move |v| *v != target)
            .prop_map(|v| LandmarkSet::from_values([v])),
        prop::collection::vec((0..rows, 0..cols), 1..4).prop_map(|cells| {
            LandmarkSet::from_cells(cells.into_iter().map(|(r, c)| Coord::new(r, c)))
        }),
    ]
}

fn assert_disjoint(instances: &[RecognizedStructure]) {
    let mut seen = BTreeSet::new();
    for instance in instances {
        for cell in &instance.cells {
            assert!(seen.insert(*cell), "cell {cell} claimed twice");
        }
    }
}

fn assert_anchor_order(instances: &[RecognizedStructure]) {
    let anchors: Vec<Coord> = instances.iter().map(|i| i.anchor()).collect();
    let mut sorted = anchors.clone();
    sorted.sort();
    assert_eq!(anchors, sorted);
}

proptest! {
    #[test]
    fn connected_regions_partition_target_cells(
        grid in small_grid(),
        target in 0u32..4,
        conn in connectivity(),
    ) {
        let regions = recognize_connected_regions(&grid, target, conn);
        assert_disjoint(&regions);
        assert_anchor_order(&regions);
        let covered: usize = regions.iter().map(|r| r.size()).sum();
        prop_assert_eq!(covered, grid.count_value(target));
        prop_assert!(regions.iter().all(|r| r.cells.iter().all(|c| grid.is_value(*c, target))));
    }

    #[test]
    fn eight_connectivity_never_splits_more(grid in small_grid(), target in 0u32..4) {
        let four = recognize_connected_regions(&grid, target, Connectivity::Four);
        let eight = recognize_connected_regions(&grid, target, Connectivity::Eight);
        prop_assert!(eight.len() <= four.len());
    }

    #[test]
    fn path_conditions_are_a_subset_of_plain_regions(
        grid in small_grid(),
        target in 1u32..4,
        landmark in 1u32..4,
        limit in prop::option::of(1usize..5),
        conn in connectivity(),
    ) {
        prop_assume!(target != landmark);
        let plain = recognize_connected_regions(&grid, target, conn);
        let cond = ValueCondition::path_to(LandmarkSet::from_values([landmark]), conn, limit);
        let filtered = recognize_value_regions(&grid, target, &cond).expect("valid condition");
        assert_disjoint(&filtered);
        assert_anchor_order(&filtered);
        for instance in &filtered {
            prop_assert!(plain.iter().any(|p| p.cells == instance.cells));
            let d = instance.landmark_distance.expect("distance recorded");
            if let Some(max) = limit {
                prop_assert!(d <= max);
            }
        }
    }

    #[test]
    fn adjacency_implies_path_of_one(
        grid in small_grid(),
        target in 1u32..4,
        landmark in 1u32..4,
        conn in connectivity(),
    ) {
        prop_assume!(target != landmark);
        let landmarks = LandmarkSet::from_values([landmark]);
        let adjacent = recognize_value_regions(
            &grid,
            target,
            &ValueCondition::adjacent_to(landmarks.clone(), conn),
        )
        .expect("valid condition");
        let within_one = recognize_value_regions(
            &grid,
            target,
            &ValueCondition::path_to(landmarks, conn, Some(1)),
        )
        .expect("valid condition");
        prop_assert_eq!(adjacent, within_one);
    }

    #[test]
    fn search_strategies_agree(
        (grid, target, landmarks) in small_grid()
            .prop_flat_map(|g| (Just(g), 1u32..4))
            .prop_flat_map(|(g, target)| {
                let landmarks = landmarks_for(g.dims(), target);
                (Just(g), Just(target), landmarks)
            }),
        limit in prop::option::of(1usize..6),
        conn in connectivity(),
    ) {
        let components: Vec<Vec<Coord>> = recognize_connected_regions(&grid, target, conn)
            .into_iter()
            .map(|r| r.cells)
            .collect();
        let run = |strategy| {
            landmark_distances(&grid, &components, target, &landmarks, conn, limit, Some(strategy))
        };
        let from_landmarks = run(DistanceStrategy::FromLandmarks);
        let from_components = run(DistanceStrategy::FromComponents);
        prop_assert_eq!(&from_landmarks, &from_components);
        let chosen =
            landmark_distances(&grid, &components, target, &landmarks, conn, limit, None);
        prop_assert_eq!(chosen, from_landmarks);
    }
}
