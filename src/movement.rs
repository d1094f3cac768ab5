//! Destination computation and check-then-commit moves.

use thiserror::Error;

use crate::grid::{Cell, Grid};
use crate::rover::{Heading, Rover};
use crate::types::{Position, RoverId};

/// Heading-relative movement direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Why a move was rejected. Rejections never mutate state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("destination {destination} is outside the map")]
    OutOfBounds { destination: Position },
    #[error("destination {destination} is blocked by {occupant}")]
    Collision {
        destination: Position,
        occupant: Cell,
    },
}

/// One cell along the heading (forward) or against it (backward).
pub fn compute_destination(position: Position, heading: Heading, direction: Direction) -> Position {
    let (dx, dy) = heading.unit_vector();
    match direction {
        Direction::Forward => position.offset(dx, dy),
        Direction::Backward => position.offset(-dx, -dy),
    }
}

/// Move rover `id` to `destination` if it is inside the map and empty.
///
/// On success the old cell is cleared, the new cell is claimed, and the
/// destination is appended to the rover's history.
pub fn attempt_move(
    grid: &mut Grid,
    id: RoverId,
    rover: &mut Rover,
    destination: Position,
) -> Result<Position, MoveError> {
    debug_assert_eq!(
        grid.occupancy(rover.position()),
        Some(Cell::Rover(id)),
        "rover position out of sync with grid"
    );
    match grid.occupancy(destination) {
        None => Err(MoveError::OutOfBounds { destination }),
        Some(Cell::Empty) => {
            grid.place(rover.position(), Cell::Empty);
            grid.place(destination, Cell::Rover(id));
            rover.advance_to(destination);
            Ok(destination)
        }
        Some(occupant) => Err(MoveError::Collision {
            destination,
            occupant,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::place_fixed;
    use proptest::prelude::*;

    fn setup(width: i32, height: i32, obstacles: &[Position], start: Position, heading: Heading) -> (Grid, Rover) {
        let mut grid = Grid::new(width, height).expect("grid");
        let mut rovers = vec![Rover::new("Alpha", heading)];
        place_fixed(&mut grid, obstacles, &mut rovers, &[start]).expect("placement");
        let rover = rovers.pop().expect("rover");
        (grid, rover)
    }

    #[test]
    fn forward_follows_heading_vectors() {
        let origin = Position::new(5, 5);
        let cases = [
            (Heading::North, Position::new(5, 4)),
            (Heading::East, Position::new(6, 5)),
            (Heading::South, Position::new(5, 6)),
            (Heading::West, Position::new(4, 5)),
        ];
        for (heading, expected) in cases {
            assert_eq!(compute_destination(origin, heading, Direction::Forward), expected);
        }
        assert_eq!(
            compute_destination(origin, Heading::North, Direction::Backward),
            Position::new(5, 6)
        );
    }

    #[test]
    fn accepted_move_updates_grid_and_history() {
        let (mut grid, mut rover) = setup(10, 10, &[], Position::new(5, 5), Heading::North);
        let destination = compute_destination(rover.position(), rover.heading(), Direction::Forward);
        assert_eq!(attempt_move(&mut grid, 0, &mut rover, destination), Ok(Position::new(5, 4)));
        assert_eq!(grid.occupancy(Position::new(5, 5)), Some(Cell::Empty));
        assert_eq!(grid.occupancy(Position::new(5, 4)), Some(Cell::Rover(0)));
        assert_eq!(rover.history(), &[Position::new(5, 5), Position::new(5, 4)]);
    }

    #[test]
    fn edge_moves_are_out_of_bounds_not_clamped() {
        let (mut grid, mut rover) = setup(10, 10, &[], Position::new(0, 0), Heading::North);
        let up = compute_destination(rover.position(), Heading::North, Direction::Forward);
        assert_eq!(up.y, grid.bounds().min_y);
        assert_eq!(
            attempt_move(&mut grid, 0, &mut rover, up),
            Err(MoveError::OutOfBounds { destination: up })
        );
        let left = compute_destination(rover.position(), Heading::East, Direction::Backward);
        assert!(attempt_move(&mut grid, 0, &mut rover, left).is_err());
        assert_eq!(rover.position(), Position::new(0, 0));
        assert_eq!(rover.history().len(), 1);

        let (mut grid, mut rover) = setup(10, 10, &[], Position::new(9, 9), Heading::East);
        let right = compute_destination(rover.position(), Heading::East, Direction::Forward);
        assert_eq!(right.x, grid.bounds().max_x);
        assert!(matches!(
            attempt_move(&mut grid, 0, &mut rover, right),
            Err(MoveError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn obstacle_blocks_move() {
        let blocked = Position::new(3, 2);
        let (mut grid, mut rover) = setup(5, 5, &[blocked], Position::new(3, 3), Heading::North);
        assert_eq!(
            attempt_move(&mut grid, 0, &mut rover, blocked),
            Err(MoveError::Collision {
                destination: blocked,
                occupant: Cell::Obstacle
            })
        );
        assert_eq!(grid.occupancy(blocked), Some(Cell::Obstacle));
        assert_eq!(grid.occupancy(Position::new(3, 3)), Some(Cell::Rover(0)));
        assert_eq!(rover.history().len(), 1);
    }

    proptest! {
        #[test]
        fn forward_then_backward_restores_position(
            x in 1i32..9,
            y in 1i32..9,
            heading in prop::sample::select(Heading::ALL.to_vec()),
        ) {
            let start = Position::new(x, y);
            let (mut grid, mut rover) = setup(10, 10, &[], start, heading);
            let ahead = compute_destination(start, heading, Direction::Forward);
            prop_assert!(attempt_move(&mut grid, 0, &mut rover, ahead).is_ok());
            let back = compute_destination(rover.position(), heading, Direction::Backward);
            prop_assert!(attempt_move(&mut grid, 0, &mut rover, back).is_ok());
            prop_assert_eq!(rover.position(), start);
            prop_assert_eq!(rover.history(), &[start, ahead, start][..]);
            prop_assert_eq!(grid.find_rover(0), Some(start));
        }
    }
}
