//! Rover state: heading, current position, and travel history.

use std::fmt;

use crate::types::Position;

/// Compass direction a rover is facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    /// Clockwise quarter turn.
    pub fn turn_right(self) -> Self {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }

    /// Counter-clockwise quarter turn.
    pub fn turn_left(self) -> Self {
        match self {
            Heading::North => Heading::West,
            Heading::West => Heading::South,
            Heading::South => Heading::East,
            Heading::East => Heading::North,
        }
    }

    /// Unit step for a forward move. North decreases `y`.
    pub fn unit_vector(self) -> (i32, i32) {
        match self {
            Heading::North => (0, -1),
            Heading::East => (1, 0),
            Heading::South => (0, 1),
            Heading::West => (-1, 0),
        }
    }

    /// Parse `N`, `E`, `S`, `W` (any case).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "N" => Some(Heading::North),
            "E" => Some(Heading::East),
            "S" => Some(Heading::South),
            "W" => Some(Heading::West),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Heading::North => 'N',
            Heading::East => 'E',
            Heading::South => 'S',
            Heading::West => 'W',
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A single rover on the map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rover {
    name: String,
    heading: Heading,
    position: Position,
    history: Vec<Position>,
}

impl Rover {
    /// Create an unplaced rover; its history stays empty until placement.
    pub fn new(name: impl Into<String>, heading: Heading) -> Self {
        Self {
            name: name.into(),
            heading,
            position: Position::new(0, 0),
            history: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Every cell visited so far, starting with the initial placement.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    pub fn is_placed(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn turn_left(&mut self) {
        self.heading = self.heading.turn_left();
    }

    pub fn turn_right(&mut self) {
        self.heading = self.heading.turn_right();
    }

    /// Set the initial position and restart the history from it.
    pub(crate) fn place_at(&mut self, position: Position) {
        self.position = position;
        self.history.clear();
        self.history.push(position);
    }

    /// Record an accepted move.
    pub(crate) fn advance_to(&mut self, position: Position) {
        self.position = position;
        self.history.push(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn right_turns_cycle_clockwise() {
        assert_eq!(Heading::North.turn_right(), Heading::East);
        assert_eq!(Heading::East.turn_right(), Heading::South);
        assert_eq!(Heading::South.turn_right(), Heading::West);
        assert_eq!(Heading::West.turn_right(), Heading::North);
    }

    #[test]
    fn turning_does_not_touch_history() {
        let mut rover = Rover::new("Alpha", Heading::North);
        rover.place_at(Position::new(2, 2));
        rover.turn_left();
        rover.turn_left();
        assert_eq!(rover.heading(), Heading::South);
        assert_eq!(rover.position(), Position::new(2, 2));
        assert_eq!(rover.history(), &[Position::new(2, 2)]);
    }

    #[test]
    fn parse_accepts_any_case() {
        assert_eq!(Heading::parse("n"), Some(Heading::North));
        assert_eq!(Heading::parse("W"), Some(Heading::West));
        assert_eq!(Heading::parse("north"), None);
    }

    #[test]
    fn placement_restarts_history() {
        let mut rover = Rover::new("Bravo", Heading::East);
        assert!(!rover.is_placed());
        rover.place_at(Position::new(1, 1));
        rover.advance_to(Position::new(2, 1));
        rover.place_at(Position::new(0, 0));
        assert_eq!(rover.history(), &[Position::new(0, 0)]);
    }

    fn any_heading() -> impl Strategy<Value = Heading> {
        prop::sample::select(Heading::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn four_turns_are_identity(heading in any_heading()) {
            let mut right = heading;
            let mut left = heading;
            for _ in 0..4 {
                right = right.turn_right();
                left = left.turn_left();
            }
            prop_assert_eq!(right, heading);
            prop_assert_eq!(left, heading);
        }

        #[test]
        fn left_and_right_are_inverses(heading in any_heading()) {
            prop_assert_eq!(heading.turn_left().turn_right(), heading);
            prop_assert_eq!(heading.turn_right().turn_left(), heading);
        }
    }
}
