use rustc_hash::FxHashMap;
use serde::Serialize;

pub type Coord = (i32, i32);

/// Fixed scan order for neighbor expansion and fallback growth.
pub const DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

#[derive(Debug,Copy,Clone,PartialEq,Eq,Hash,Serialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}
impl Direction {
    pub fn vector(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::East => "E",
            Direction::South => "S",
            Direction::West => "W",
        }
    }

    pub fn from_code(code: &str) -> Option<Direction> {
        match code {
            "N" => Some(Direction::North),
            "E" => Some(Direction::East),
            "S" => Some(Direction::South),
            "W" => Some(Direction::West),
            _ => None,
        }
    }
}

#[derive(Debug,Copy,Clone,PartialEq,Eq,Hash,Serialize)]
pub enum Owner {
    Player,
    Opponent,
}

#[derive(Debug,Copy,Clone,PartialEq,Eq,Hash,Serialize)]
pub enum EntityKind {
    Root,
    Basic,
    Harvester,
    Tentacle,
    Wall,
    ProteinA,
    ProteinB,
    ProteinC,
    ProteinD,
}
impl EntityKind {
    pub fn is_organ(self) -> bool {
        matches!(
            self,
            EntityKind::Root | EntityKind::Basic | EntityKind::Harvester | EntityKind::Tentacle
        )
    }

    pub fn is_protein(self) -> bool {
        matches!(
            self,
            EntityKind::ProteinA | EntityKind::ProteinB | EntityKind::ProteinC | EntityKind::ProteinD
        )
    }

    pub fn code(self) -> &'static str {
        match self {
            EntityKind::Root => "ROOT",
            EntityKind::Basic => "BASIC",
            EntityKind::Harvester => "HARVESTER",
            EntityKind::Tentacle => "TENTACLE",
            EntityKind::Wall => "WALL",
            EntityKind::ProteinA => "A",
            EntityKind::ProteinB => "B",
            EntityKind::ProteinC => "C",
            EntityKind::ProteinD => "D",
        }
    }

    pub fn from_code(code: &str) -> Option<EntityKind> {
        match code {
            "ROOT" => Some(EntityKind::Root),
            "BASIC" => Some(EntityKind::Basic),
            "HARVESTER" => Some(EntityKind::Harvester),
            "TENTACLE" => Some(EntityKind::Tentacle),
            "WALL" => Some(EntityKind::Wall),
            "A" => Some(EntityKind::ProteinA),
            "B" => Some(EntityKind::ProteinB),
            "C" => Some(EntityKind::ProteinC),
            "D" => Some(EntityKind::ProteinD),
            _ => None,
        }
    }
}

/// One occupant of a board cell, fixed at parse time for the rest of the turn.
#[derive(Debug,Copy,Clone,PartialEq,Eq,Serialize)]
pub struct Entity {
    pub id: i32,
    pub coord: Coord,
    pub kind: EntityKind,
    pub owner: Option<Owner>,
    pub facing: Option<Direction>,
    pub parent_id: Option<i32>,
    pub root_id: Option<i32>,
}

#[derive(Debug,Copy,Clone,PartialEq,Eq,Serialize)]
pub struct Resources {
    pub a: i32,
    pub b: i32,
    pub c: i32,
    pub d: i32,
}
impl Resources {
    pub fn covers(&self, cost: Cost) -> bool {
        self.a >= cost.a && self.b >= cost.b && self.c >= cost.c && self.d >= cost.d
    }
}

#[derive(Debug,Copy,Clone,PartialEq,Eq,Hash)]
pub struct Cost {
    pub a: i32,
    pub b: i32,
    pub c: i32,
    pub d: i32,
}
impl Cost {
    pub const ZERO: Cost = Cost { a: 0, b: 0, c: 0, d: 0 };

    /// Kinds without a defined cost are free, and only ever grown as a structural fallback.
    pub fn for_kind(kind: EntityKind) -> Cost {
        match kind {
            EntityKind::Basic => Cost { a: 1, b: 0, c: 0, d: 0 },
            EntityKind::Harvester => Cost { a: 0, b: 0, c: 1, d: 1 },
            EntityKind::Tentacle => Cost { a: 0, b: 1, c: 1, d: 0 },
            _ => Cost::ZERO,
        }
    }

    pub fn total(self) -> i32 {
        self.a + self.b + self.c + self.d
    }
}

/// Organism-extending kinds are always worth more than anything else.
pub fn fitness(kind: EntityKind) -> i32 {
    if kind.is_organ() { 1 } else { 0 }
}

/// Static board dimensions, read once at startup.
pub struct Layout {
    pub width: i32,
    pub height: i32,
}
impl Layout {
    pub fn in_bounds(&self, (x, y): Coord) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    pub fn neighbor(&self, (x, y): Coord, direction: Direction) -> Option<Coord> {
        let (dx, dy) = direction.vector();
        let coord = (x + dx, y + dy);
        if self.in_bounds(coord) { Some(coord) } else { None }
    }
}

/// One turn's parsed input. Entities keep their input order, which is the
/// deterministic iteration order for every organ scan this turn.
#[derive(Debug,Clone,Serialize)]
pub struct Snapshot {
    pub entities: Vec<Entity>,
    pub player: Resources,
    pub opponent: Resources,
    pub required_actions: usize,
}
impl Snapshot {
    pub fn organs(&self, owner: Owner) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(move |e| e.kind.is_organ() && e.owner == Some(owner))
    }

    pub fn roots(&self, owner: Owner) -> Vec<Coord> {
        self.entities
            .iter()
            .filter(|e| e.kind == EntityKind::Root && e.owner == Some(owner))
            .map(|e| e.coord)
            .collect()
    }
}

/// Per-turn grid model: coordinate to occupant lookup, rebuilt from each
/// snapshot and discarded at turn end.
pub struct CellMap<'a> {
    cells: FxHashMap<Coord, &'a Entity>,
}
impl<'a> CellMap<'a> {
    pub fn build(snapshot: &'a Snapshot) -> Self {
        let mut cells = FxHashMap::default();
        for entity in &snapshot.entities {
            cells.insert(entity.coord, entity);
        }
        Self { cells }
    }

    pub fn at(&self, coord: Coord) -> Option<&'a Entity> {
        self.cells.get(&coord).copied()
    }

    pub fn is_empty_cell(&self, coord: Coord) -> bool {
        !self.cells.contains_key(&coord)
    }
}

pub enum Action {
    Grow {
        parent_id: i32,
        coord: Coord,
        kind: EntityKind,
        facing: Option<Direction>,
    },
    Wait,
}
