use std::io::BufRead;

use thiserror::Error;

use super::model::*;

/// The snapshot is trusted by everything downstream, so any malformed line is
/// fatal: surface it, never guess.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("expected {expected}, got {line:?}")]
    Malformed { expected: &'static str, line: String },
    #[error("unknown entity kind {0:?}")]
    UnknownKind(String),
    #[error("unknown owner {0:?}")]
    UnknownOwner(String),
    #[error("unknown facing {0:?}")]
    UnknownFacing(String),
    #[error("organ {id} at {x},{y} has no owner")]
    UnownedOrgan { id: i32, x: i32, y: i32 },
}

macro_rules! parse_input {
    ($x:expr, $t:ident) => {
        $x.trim().parse::<$t>().map_err(|_| ParseError::Malformed {
            expected: stringify!($t),
            line: $x.trim().to_string(),
        })?
    };
}

pub fn read_layout(input: &mut impl BufRead) -> Result<Layout, ParseError> {
    let line = next_line(input)?;
    let inputs = fields(&line, "width height", 2)?;
    Ok(Layout {
        width: parse_input!(inputs[0], i32),
        height: parse_input!(inputs[1], i32),
    })
}

/// Reads one turn's snapshot. A clean end of stream at the turn boundary
/// returns `None`; running dry anywhere inside the snapshot is malformed.
pub fn read_snapshot(input: &mut impl BufRead) -> Result<Option<Snapshot>, ParseError> {
    let Some(line) = read_line(input)? else { return Ok(None) };
    let entity_count = parse_input!(line, usize);

    let mut entities = Vec::with_capacity(entity_count);
    for _ in 0..entity_count {
        let line = next_line(input)?;
        entities.push(parse_entity(&line)?);
    }

    let player = parse_resources(&next_line(input)?)?;
    let opponent = parse_resources(&next_line(input)?)?;

    let line = next_line(input)?;
    let required_actions = parse_input!(line, usize);

    Ok(Some(Snapshot {
        entities,
        player,
        opponent,
        required_actions,
    }))
}

pub fn format_action(action: &Action) -> String {
    match action {
        Action::Grow { parent_id, coord, kind, facing } => {
            format!("GROW {} {} {} {} {}", parent_id, coord.0, coord.1, kind.code(), facing_code(*facing))
        }
        Action::Wait => format!("WAIT"),
    }
}

fn facing_code(facing: Option<Direction>) -> &'static str {
    match facing {
        Some(direction) => direction.code(),
        None => "X",
    }
}

fn parse_entity(line: &str) -> Result<Entity, ParseError> {
    let inputs = fields(line, "x y kind owner organId facing parentId rootId", 8)?;

    let x = parse_input!(inputs[0], i32);
    let y = parse_input!(inputs[1], i32);
    let kind = EntityKind::from_code(inputs[2])
        .ok_or_else(|| ParseError::UnknownKind(inputs[2].to_string()))?;
    let owner = match inputs[3] {
        "-1" => None,
        "1" => Some(Owner::Player),
        "0" => Some(Owner::Opponent),
        other => return Err(ParseError::UnknownOwner(other.to_string())),
    };
    let id = parse_input!(inputs[4], i32);
    let facing = match inputs[5] {
        "X" => None,
        code => Some(
            Direction::from_code(code).ok_or_else(|| ParseError::UnknownFacing(code.to_string()))?,
        ),
    };
    let parent_id = organ_ref(inputs[6])?;
    let root_id = organ_ref(inputs[7])?;

    if kind.is_organ() && owner.is_none() {
        return Err(ParseError::UnownedOrgan { id, x, y });
    }

    Ok(Entity {
        id,
        coord: (x, y),
        kind,
        owner,
        facing,
        parent_id,
        root_id,
    })
}

fn parse_resources(line: &str) -> Result<Resources, ParseError> {
    let inputs = fields(line, "a b c d", 4)?;
    Ok(Resources {
        a: parse_input!(inputs[0], i32),
        b: parse_input!(inputs[1], i32),
        c: parse_input!(inputs[2], i32),
        d: parse_input!(inputs[3], i32),
    })
}

/// Negative ids on the wire mean "no such organ".
fn organ_ref(field: &str) -> Result<Option<i32>, ParseError> {
    let id = parse_input!(field, i32);
    Ok(if id < 0 { None } else { Some(id) })
}

fn fields<'a>(line: &'a str, expected: &'static str, count: usize) -> Result<Vec<&'a str>, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < count {
        return Err(ParseError::Malformed {
            expected,
            line: line.trim().to_string(),
        });
    }
    Ok(fields)
}

fn next_line(input: &mut impl BufRead) -> Result<String, ParseError> {
    read_line(input)?.ok_or(ParseError::UnexpectedEof)
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>, ParseError> {
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    Ok(if read == 0 { None } else { Some(line) })
}
