use serde::{Deserialize, Serialize};

pub mod agent;
pub mod environment;
pub mod harness;
pub mod policy;

/// Represents a 2D coordinate naming a spot an entity can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

/// The left room of the two-room vacuum world.
pub const LOC_A: Location = Location { x: 0, y: 0 };
/// The right room of the two-room vacuum world.
pub const LOC_B: Location = Location { x: 1, y: 0 };

/// Cleanliness of a single location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Clean,
    Dirty,
}

/// What an agent observes at the start of a turn: where it is and
/// whether that spot is dirty.
///
/// Hashable so percept *sequences* can key a table-driven policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Percept {
    pub location: Location,
    pub status: Status,
}

/// Actions an agent can decide to take in the vacuum world.
///
/// `NoOp` is only ever chosen by the model-based policy; the environment
/// treats it (and any undecided turn) as "do nothing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    Suck,
    NoOp,
}
