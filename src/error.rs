//! Fatal errors raised while setting up or starting a mission.

use thiserror::Error;

use crate::types::Position;

/// Errors that abort map creation, placement, or a command batch.
///
/// Every variant is detected before any grid or rover state is mutated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("map size must be positive, got {width}x{height}")]
    InvalidSize { width: i32, height: i32 },
    #[error("map {width}x{height} is too large: at most {max} cells are supported")]
    MapTooLarge { width: i32, height: i32, max: usize },
    #[error("cannot place {requested} item(s): only {available} free cell(s) on the map")]
    InsufficientSpace { requested: usize, available: usize },
    #[error("invalid command string for rover(s) {}: only l, r, f, b are allowed", .rovers.join(", "))]
    InvalidCommand { rovers: Vec<String> },
    #[error("rover name {0:?} is used more than once")]
    DuplicateRover(String),
    #[error("no rover named {0:?} on the map")]
    UnknownRover(String),
    #[error("at least one rover is required")]
    EmptyRoster,
    #[error("cannot place {item} at {position}: {reason}")]
    InvalidPlacement {
        item: String,
        position: Position,
        reason: &'static str,
    },
}
