use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use super::model::*;

/// One visited coordinate in the turn's traversal arena, keyed by coordinate
/// in `Graph::nodes`. Links are stored as coordinates rather than references;
/// the whole graph is rebuilt from the snapshot every turn and discarded with
/// it.
pub struct Node {
    pub kind: Option<EntityKind>,
    pub distance: i32,
    pub children: Vec<Coord>,
    features: [Option<Coord>; 4],
}
impl Node {
    fn new(kind: Option<EntityKind>, distance: i32) -> Self {
        Self {
            kind,
            distance,
            children: Vec::new(),
            features: [None; 4],
        }
    }

    #[allow(dead_code)]
    pub fn feature_toward(&self, direction: Direction) -> Option<Coord> {
        self.features[direction.index()]
    }
}

/// A protein or enemy organ discovered at the traversal boundary, paired with
/// the frontier cell it was first seen from.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct Feature {
    pub source: Coord,
    pub direction: Direction,
    pub target: Coord,
    pub kind: EntityKind,
}

pub struct Graph {
    pub nodes: FxHashMap<Coord, Node>,
    pub features: Vec<Feature>,
}
impl Graph {
    /// Breadth-first expansion from the player's root cells. Walls and the
    /// board edge are rejected outright; empty cells and our own organs become
    /// children; proteins and opponent organs are recorded as features and
    /// never expanded through. BFS order makes every node's distance the
    /// minimum hop count, so the first source associated with a feature is
    /// also its nearest one.
    pub fn build(layout: &Layout, cells: &CellMap, roots: &[Coord]) -> Graph {
        let mut nodes: FxHashMap<Coord, Node> = FxHashMap::default();
        let mut features = Vec::new();
        let mut seen_features = FxHashSet::default();

        let mut queue = VecDeque::new();
        for &root in roots {
            if nodes.contains_key(&root) { continue }
            nodes.insert(root, Node::new(cells.at(root).map(|e| e.kind), 0));
            queue.push_back(root);
        }

        while let Some(coord) = queue.pop_front() {
            let distance = nodes[&coord].distance;

            for direction in DIRECTIONS {
                let Some(neighbor) = layout.neighbor(coord, direction) else { continue };
                let occupant = cells.at(neighbor);

                if occupant.is_some_and(|e| e.kind == EntityKind::Wall) { continue }

                if let Some(entity) =
                    occupant.filter(|e| e.kind.is_protein() || e.owner == Some(Owner::Opponent))
                {
                    // Features are leaves: growth cannot pass through them.
                    let node = nodes.get_mut(&coord).expect("popped node missing");
                    node.features[direction.index()] = Some(neighbor);
                    if seen_features.insert(neighbor) {
                        features.push(Feature {
                            source: coord,
                            direction,
                            target: neighbor,
                            kind: entity.kind,
                        });
                    }
                    continue;
                }

                // Empty, or one of our own organs: growth-reachable.
                let node = nodes.get_mut(&coord).expect("popped node missing");
                node.children.push(neighbor);
                if !nodes.contains_key(&neighbor) {
                    nodes.insert(neighbor, Node::new(occupant.map(|e| e.kind), distance + 1));
                    queue.push_back(neighbor);
                }
            }
        }

        Graph { nodes, features }
    }
}
