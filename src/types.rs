//! Shared identifiers, coordinates, and warning events used across the system.

use std::fmt;

/// Index of a rover inside the simulation roster.
pub type RoverId = usize;

/// Integer grid coordinate; `x` is the column and `y` is the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shift by a unit vector (or any integer delta).
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Category of a warning surfaced to the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WarningKind {
    OutOfBounds,
    Collision,
    InvalidCommand,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WarningKind::OutOfBounds => "out-of-bounds",
            WarningKind::Collision => "collision",
            WarningKind::InvalidCommand => "invalid-command",
        };
        f.write_str(label)
    }
}

/// A non-fatal event recorded while validating or executing orders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warning {
    /// Name of the rover the warning is about.
    pub rover: String,
    pub kind: WarningKind,
    /// Human-readable description for log output.
    pub message: String,
}

impl Warning {
    pub fn new(rover: impl Into<String>, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            rover: rover.into(),
            kind,
            message: message.into(),
        }
    }
}
