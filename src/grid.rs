//! Fixed-size cell matrix with exclusive occupancy and an open boundary box.

use std::fmt;

use crate::error::SimError;
use crate::types::{Position, RoverId};

/// What a single map cell holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Obstacle,
    Rover(RoverId),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => f.write_str("empty ground"),
            Cell::Obstacle => f.write_str("an obstacle"),
            Cell::Rover(id) => write!(f, "rover #{id}"),
        }
    }
}

/// Open interval of valid coordinates: a position is inside when it lies
/// strictly between the min and max on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn contains(&self, position: Position) -> bool {
        position.x > self.min_x
            && position.x < self.max_x
            && position.y > self.min_y
            && position.y < self.max_y
    }
}

/// Largest map that keeps every flat cell index representable as `i32`.
pub const MAX_CELLS: usize = i32::MAX as usize;

/// Number of cells of a `width × height` map, or the error that forbids it.
pub fn cell_count(width: i32, height: i32) -> Result<usize, SimError> {
    if width <= 0 || height <= 0 {
        return Err(SimError::InvalidSize { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .filter(|cells| *cells <= MAX_CELLS)
        .ok_or(SimError::MapTooLarge {
            width,
            height,
            max: MAX_CELLS,
        })
}

/// Row-major occupancy map; rows are `y`, columns are `x`.
#[derive(Clone, Debug)]
pub struct Grid {
    width: i32,
    height: i32,
    bounds: Bounds,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an all-empty map; both dimensions must be positive and the
    /// cell count must not exceed [`MAX_CELLS`].
    pub fn new(width: i32, height: i32) -> Result<Self, SimError> {
        let cells = cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            bounds: Bounds {
                min_x: -1,
                max_x: width,
                min_y: -1,
                max_y: height,
            },
            cells: vec![Cell::Empty; cells],
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Total number of cells on the map.
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Strict interior test against the boundary box.
    pub fn is_in_bounds(&self, position: Position) -> bool {
        self.bounds.contains(position)
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !self.is_in_bounds(position) {
            return None;
        }
        Some(position.y as usize * self.width as usize + position.x as usize)
    }

    /// Occupant of a cell, or `None` when the position is outside the map.
    pub fn occupancy(&self, position: Position) -> Option<Cell> {
        self.index(position).map(|index| self.cells[index])
    }

    /// Overwrite a cell and return its previous occupant.
    ///
    /// Positions outside the map are left alone and yield `None`.
    pub fn place(&mut self, position: Position, cell: Cell) -> Option<Cell> {
        let index = self.index(position)?;
        Some(std::mem::replace(&mut self.cells[index], cell))
    }

    pub fn is_empty_at(&self, position: Position) -> bool {
        self.occupancy(position) == Some(Cell::Empty)
    }

    pub fn empty_cells(&self) -> usize {
        self.cells.iter().filter(|cell| **cell == Cell::Empty).count()
    }

    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell == Cell::Obstacle).count()
    }

    /// Locate the cell currently marked with the given rover.
    pub fn find_rover(&self, rover: RoverId) -> Option<Position> {
        self.cells
            .iter()
            .position(|cell| *cell == Cell::Rover(rover))
            .map(|index| {
                let width = self.width as usize;
                Position::new((index % width) as i32, (index / width) as i32)
            })
    }

    /// Iterate rows top to bottom, for painting.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_dimensions() {
        assert_eq!(
            Grid::new(0, 5).unwrap_err(),
            SimError::InvalidSize {
                width: 0,
                height: 5
            }
        );
        assert!(Grid::new(4, -1).is_err());
    }

    #[test]
    fn rejects_maps_past_the_cell_limit() {
        assert_eq!(
            Grid::new(2_000_000_000, 2_000_000_000).unwrap_err(),
            SimError::MapTooLarge {
                width: 2_000_000_000,
                height: 2_000_000_000,
                max: MAX_CELLS
            }
        );
        assert_eq!(cell_count(i32::MAX, 1), Ok(MAX_CELLS));
        assert!(cell_count(i32::MAX, 2).is_err());
        assert!(matches!(
            cell_count(65_536, 65_536),
            Err(SimError::MapTooLarge { .. })
        ));
    }

    #[test]
    fn far_cells_index_without_overflow() {
        let mut grid = Grid::new(50_000, 3).expect("grid");
        let corner = Position::new(49_999, 2);
        assert_eq!(grid.place(corner, Cell::Rover(1)), Some(Cell::Empty));
        assert_eq!(grid.find_rover(1), Some(corner));
        assert_eq!(grid.width(), 50_000);
        assert_eq!(grid.height(), 3);
    }

    #[test]
    fn new_grid_is_empty() {
        let grid = Grid::new(4, 3).expect("grid");
        assert_eq!(grid.capacity(), 12);
        assert_eq!(grid.empty_cells(), 12);
        assert_eq!(grid.rows().count(), 3);
        assert!(grid.rows().all(|row| row.len() == 4));
    }

    #[test]
    fn bounds_are_exclusive_at_both_edges() {
        let grid = Grid::new(10, 10).expect("grid");
        assert!(grid.is_in_bounds(Position::new(0, 0)));
        assert!(grid.is_in_bounds(Position::new(9, 9)));
        assert!(!grid.is_in_bounds(Position::new(-1, 5)));
        assert!(!grid.is_in_bounds(Position::new(10, 5)));
        assert!(!grid.is_in_bounds(Position::new(5, -1)));
        assert!(!grid.is_in_bounds(Position::new(5, 10)));
    }

    #[test]
    fn place_returns_previous_occupant() {
        let mut grid = Grid::new(3, 3).expect("grid");
        let spot = Position::new(1, 2);
        assert_eq!(grid.place(spot, Cell::Obstacle), Some(Cell::Empty));
        assert_eq!(grid.occupancy(spot), Some(Cell::Obstacle));
        assert_eq!(grid.place(spot, Cell::Rover(4)), Some(Cell::Obstacle));
        assert_eq!(grid.find_rover(4), Some(spot));
        assert_eq!(grid.empty_cells(), 8);
    }

    #[test]
    fn place_outside_is_ignored() {
        let mut grid = Grid::new(2, 2).expect("grid");
        assert_eq!(grid.place(Position::new(2, 0), Cell::Obstacle), None);
        assert_eq!(grid.occupancy(Position::new(2, 0)), None);
        assert_eq!(grid.empty_cells(), 4);
    }
}
