use std::cmp::Reverse;

use super::graph::Graph;
use super::model::*;

/// A proposed growth action with its cost and score, not yet committed.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct Candidate {
    pub parent_id: i32,
    pub parent: Coord,
    pub target: Coord,
    pub kind: EntityKind,
    pub facing: Option<Direction>,
    pub cost: Cost,
    pub fitness: i32,
    pub distance: i32,
}
impl Candidate {
    fn for_kind(
        parent: &Entity,
        target: Coord,
        kind: EntityKind,
        facing: Option<Direction>,
        distance: i32,
    ) -> Candidate {
        Candidate {
            parent_id: parent.id,
            parent: parent.coord,
            target,
            kind,
            facing,
            cost: Cost::for_kind(kind),
            fitness: fitness(kind),
            distance,
        }
    }
}

/// One candidate per feature whose first-discovered entry cell is empty. A
/// protein entry cell one step from the organism becomes a harvester facing
/// the protein when both of its protein counters allow it; every other pair
/// becomes a basic organ oriented toward the feature. Ranked ascending by
/// distance to the nearest organ, then ascending by aggregate cost, then
/// descending by fitness; ties keep discovery order.
pub fn generate(graph: &Graph, snapshot: &Snapshot) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for feature in &graph.features {
        let entry = &graph.nodes[&feature.source];
        if entry.kind.is_some() { continue }
        let Some((organ, distance)) = nearest_organ(snapshot, feature.source) else { continue };

        let kind = if feature.kind.is_protein()
            && distance == 1
            && snapshot.player.covers(Cost::for_kind(EntityKind::Harvester))
        {
            EntityKind::Harvester
        } else {
            EntityKind::Basic
        };

        eprintln!(
            "considered {} at {},{} toward {} at {},{} (distance {})",
            kind.code(),
            feature.source.0, feature.source.1,
            feature.kind.code(),
            feature.target.0, feature.target.1,
            distance,
        );

        candidates.push(Candidate::for_kind(
            organ,
            feature.source,
            kind,
            Some(feature.direction),
            distance,
        ));
    }

    candidates.sort_by_key(|c| (c.distance, c.cost.total(), Reverse(c.fitness)));
    candidates
}

/// Structural fallback: keep growing into open space even with nothing to
/// chase. Each organ contributes its first empty neighbor in scan order.
pub fn fallback(layout: &Layout, cells: &CellMap, snapshot: &Snapshot) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for organ in snapshot.organs(Owner::Player) {
        for direction in DIRECTIONS {
            let Some(neighbor) = layout.neighbor(organ.coord, direction) else { continue };
            if cells.is_empty_cell(neighbor) {
                candidates.push(Candidate::for_kind(
                    organ,
                    neighbor,
                    EntityKind::Basic,
                    Some(Direction::North),
                    1,
                ));
                break;
            }
        }
    }

    candidates
}

/// Nearest player organ by taxi distance. Ties keep the first organ in input
/// order, so the scan stays deterministic across identical snapshots.
fn nearest_organ(snapshot: &Snapshot, target: Coord) -> Option<(&Entity, i32)> {
    let mut nearest: Option<(&Entity, i32)> = None;
    for organ in snapshot.organs(Owner::Player) {
        let distance = taxi_distance(organ.coord, target);
        if nearest.map_or(true, |(_, best)| distance < best) {
            nearest = Some((organ, distance));
        }
    }
    nearest
}

pub fn taxi_distance(a: Coord, b: Coord) -> i32 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::model::fixtures;

    fn candidates(rows: &[&str], player: Resources) -> Vec<Candidate> {
        let (layout, snapshot) = fixtures::board(rows, player, 1);
        let cells = CellMap::build(&snapshot);
        let graph = Graph::build(&layout, &cells, &snapshot.roots(Owner::Player));
        generate(&graph, &snapshot)
    }

    #[test]
    fn harvester_for_protein_entry_cell_one_step_out() {
        let ranked = candidates(&["R.A"], fixtures::plenty());

        assert_eq!(ranked.len(), 1);
        let first = &ranked[0];
        assert_eq!(first.kind, EntityKind::Harvester);
        assert_eq!(first.target, (1, 0));
        assert_eq!(first.facing, Some(Direction::East));
        assert_eq!(first.distance, 1);
        assert_eq!(first.parent, (0, 0));
    }

    #[test]
    fn harvester_outranks_farther_candidates() {
        // Protein entry at one step, opponent organ entry at three steps.
        let ranked = candidates(&[
            "R.A",
            "...",
            "..o",
        ], fixtures::plenty());

        assert_eq!(ranked[0].kind, EntityKind::Harvester);
        assert!(ranked[1..].iter().all(|c| c.kind == EntityKind::Basic));
        assert!(ranked.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn basic_when_harvester_is_unaffordable() {
        let player = Resources { a: 5, b: 0, c: 0, d: 0 };
        let ranked = candidates(&["R.A"], player);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].kind, EntityKind::Basic);
        assert_eq!(ranked[0].facing, Some(Direction::East));
    }

    #[test]
    fn basic_when_protein_entry_is_farther_than_one_step() {
        let ranked = candidates(&["R...A"], fixtures::plenty());

        // Entry cell (3,0) is three steps from the only organ.
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].kind, EntityKind::Basic);
        assert_eq!(ranked[0].target, (3, 0));
        assert_eq!(ranked[0].distance, 3);
    }

    #[test]
    fn enemy_organ_features_never_become_harvesters() {
        let ranked = candidates(&["R.o"], fixtures::plenty());

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].kind, EntityKind::Basic);
        assert_eq!(ranked[0].target, (1, 0));
    }

    #[test]
    fn equal_distance_ties_break_on_aggregate_cost() {
        // Two features, both with entry cells one step from an organ: the
        // protein entry yields a harvester (cost 2), the enemy entry a basic
        // (cost 1). Equal distance, so the cheaper candidate ranks first.
        let ranked = candidates(&[
            "A.R.o",
        ], fixtures::plenty());

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].kind, EntityKind::Basic);
        assert_eq!(ranked[0].cost.total(), 1);
        assert_eq!(ranked[1].kind, EntityKind::Harvester);
        assert_eq!(ranked[1].cost.total(), 2);
    }

    #[test]
    fn occupied_entry_cells_produce_no_candidate() {
        // The protein's only reachable neighbor is the root itself.
        let ranked = candidates(&[
            "RA",
            "##",
        ], fixtures::plenty());

        assert!(ranked.is_empty());
    }

    #[test]
    fn nearest_organ_tie_keeps_input_order() {
        // Root (id 1) and basic organ (id 2) are both two steps from the
        // protein entry cell at (2,0).
        let (_, snapshot) = fixtures::board(&[
            "R...",
            "...O",
        ], fixtures::plenty(), 1);

        let (organ, distance) = nearest_organ(&snapshot, (2, 0)).expect("no organ found");
        assert_eq!(distance, 2);
        assert_eq!(organ.id, 1);
    }

    #[test]
    fn fallback_takes_first_open_neighbor_in_compass_order() {
        // North of the organ is walled, so east wins over south and west.
        let (layout, snapshot) = fixtures::board(&[
            "###",
            ".R.",
            "...",
        ], fixtures::plenty(), 1);
        let cells = CellMap::build(&snapshot);

        let candidates = fallback(&layout, &cells, &snapshot);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].target, (2, 1));
        assert_eq!(candidates[0].kind, EntityKind::Basic);
    }

    #[test]
    fn fallback_emits_one_candidate_per_organ_with_space() {
        // The basic organ is fenced in, so only the root contributes.
        let (layout, snapshot) = fixtures::board(&[
            "#O#",
            "#R.",
        ], fixtures::plenty(), 1);
        let cells = CellMap::build(&snapshot);

        let candidates = fallback(&layout, &cells, &snapshot);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].parent, (1, 1));
        assert_eq!(candidates[0].target, (2, 1));
    }

    #[test]
    fn boxed_in_organism_has_no_fallback() {
        let (layout, snapshot) = fixtures::board(&[
            "###",
            "#R#",
            "###",
        ], fixtures::plenty(), 1);
        let cells = CellMap::build(&snapshot);

        assert!(fallback(&layout, &cells, &snapshot).is_empty());
    }
}
