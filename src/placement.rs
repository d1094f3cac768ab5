//! Setup-time scattering of obstacles and rovers onto the map.

use std::collections::HashSet;

use rand::Rng;

use crate::error::SimError;
use crate::grid::{Cell, Grid};
use crate::rover::Rover;
use crate::types::Position;

fn ensure_capacity(grid: &Grid, obstacles: usize, rovers: usize) -> Result<(), SimError> {
    let available = grid.empty_cells();
    let requested = obstacles.checked_add(rovers).unwrap_or(usize::MAX);
    if requested > available {
        return Err(SimError::InsufficientSpace {
            requested,
            available,
        });
    }
    Ok(())
}

/// Uniformly sample a coordinate strictly inside the grid bounds.
fn sample_position<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Position {
    let bounds = grid.bounds();
    Position::new(
        rng.gen_range(bounds.min_x + 1..bounds.max_x),
        rng.gen_range(bounds.min_y + 1..bounds.max_y),
    )
}

/// Randomly place `obstacles` obstacles and then every rover on distinct
/// empty cells. Rover ids are their indices in `rovers`.
///
/// Fails with `InsufficientSpace` before touching the grid when the request
/// does not fit into the free cells.
pub fn scatter<R: Rng + ?Sized>(
    grid: &mut Grid,
    obstacles: usize,
    rovers: &mut [Rover],
    rng: &mut R,
) -> Result<(), SimError> {
    ensure_capacity(grid, obstacles, rovers.len())?;

    let mut pending_obstacles = obstacles;
    let mut next_rover = 0usize;
    let mut samples = 0u64;
    while pending_obstacles > 0 || next_rover < rovers.len() {
        let candidate = sample_position(grid, rng);
        samples += 1;
        if !grid.is_empty_at(candidate) {
            continue;
        }
        if pending_obstacles > 0 {
            grid.place(candidate, Cell::Obstacle);
            pending_obstacles -= 1;
        } else {
            grid.place(candidate, Cell::Rover(next_rover));
            rovers[next_rover].place_at(candidate);
            log::debug!(
                "[PLACE] rover {} starts at {candidate}",
                rovers[next_rover].name()
            );
            next_rover += 1;
        }
    }
    log::debug!(
        "[PLACE] scattered obstacles={obstacles} rovers={} samples={samples}",
        rovers.len()
    );
    Ok(())
}

/// Place obstacles and rovers at fixed coordinates.
///
/// Every coordinate is checked for bounds and overlap before anything is
/// written, so a failed call leaves the grid untouched.
pub fn place_fixed(
    grid: &mut Grid,
    obstacles: &[Position],
    rovers: &mut [Rover],
    starts: &[Position],
) -> Result<(), SimError> {
    debug_assert_eq!(rovers.len(), starts.len(), "one start per rover");
    ensure_capacity(grid, obstacles.len(), starts.len())?;

    let items = obstacles
        .iter()
        .map(|position| ("obstacle".to_string(), *position))
        .chain(
            rovers
                .iter()
                .zip(starts)
                .map(|(rover, position)| (format!("rover {}", rover.name()), *position)),
        );
    let mut claimed = HashSet::new();
    for (item, position) in items {
        let reason = if !grid.is_in_bounds(position) {
            Some("outside the map")
        } else if !grid.is_empty_at(position) || !claimed.insert(position) {
            Some("cell already occupied")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(SimError::InvalidPlacement {
                item,
                position,
                reason,
            });
        }
    }

    for position in obstacles {
        grid.place(*position, Cell::Obstacle);
    }
    for (id, (rover, position)) in rovers.iter_mut().zip(starts).enumerate() {
        grid.place(*position, Cell::Rover(id));
        rover.place_at(*position);
    }
    Ok(())
}
