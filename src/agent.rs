use super::graph::Graph;
use super::model::*;
use super::strategy::{self, Candidate};

/// Decide this turn's growth actions from the snapshot alone. Returns at most
/// one action in the current policy; the turn driver caps and WAIT-pads the
/// result to the required count.
pub fn act(layout: &Layout, snapshot: &Snapshot) -> Vec<Action> {
    let cells = CellMap::build(snapshot);

    let roots = snapshot.roots(Owner::Player);
    if roots.is_empty() {
        eprintln!("no root on the board, nothing to grow from");
        return Vec::new();
    }

    let graph = Graph::build(layout, &cells, &roots);
    let child_links: usize = graph.nodes.values().map(|n| n.children.len()).sum();
    eprintln!(
        "graph: {} nodes, {} child links, {} features",
        graph.nodes.len(), child_links, graph.features.len(),
    );

    let mut candidates = strategy::generate(&graph, snapshot);
    if !candidates.iter().any(|c| is_legal(c, layout, &cells, snapshot)) {
        candidates = strategy::fallback(layout, &cells, snapshot);
    }
    eprintln!(
        "{} candidates, inventory a={} b={} c={} d={}",
        candidates.len(),
        snapshot.player.a, snapshot.player.b, snapshot.player.c, snapshot.player.d,
    );

    match candidates.iter().find(|c| is_legal(c, layout, &cells, snapshot)) {
        Some(candidate) => {
            eprintln!(
                "growing {} at {},{} from organ {} at {},{} (distance {})",
                candidate.kind.code(),
                candidate.target.0, candidate.target.1,
                candidate.parent_id,
                candidate.parent.0, candidate.parent.1,
                candidate.distance,
            );
            vec![Action::Grow {
                parent_id: candidate.parent_id,
                coord: candidate.target,
                kind: candidate.kind,
                facing: candidate.facing,
            }]
        }
        None => Vec::new(),
    }
}

/// A candidate may only become a command if it is well-formed, on the board,
/// targets a free cell, and fits the inventory. Anything else is dropped, and
/// the freed slot falls through to WAIT.
fn is_legal(candidate: &Candidate, layout: &Layout, cells: &CellMap, snapshot: &Snapshot) -> bool {
    candidate.parent_id > 0
        && layout.in_bounds(candidate.target)
        && cells.is_empty_cell(candidate.target)
        && snapshot.player.covers(candidate.cost)
}
