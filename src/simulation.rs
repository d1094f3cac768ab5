//! The simulation context: owns the grid, the rovers, and the warning log.

use std::collections::HashSet;

use rand::Rng;

use crate::error::SimError;
use crate::grid::{Cell, Grid};
use crate::movement::{Direction, MoveError, attempt_move, compute_destination};
use crate::placement;
use crate::rover::{Heading, Rover};
use crate::scheduler::{self, Command, CommandRequest, Order, ParsedRequest};
use crate::types::{Position, RoverId, Warning, WarningKind};

/// Ordered path of one rover, handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TravelLog {
    pub rover: String,
    pub path: Vec<Position>,
}

/// Counters and travel logs for one executed command batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub executed_orders: usize,
    pub turns: usize,
    pub accepted_moves: usize,
    pub rejected_moves: usize,
    pub travel_logs: Vec<TravelLog>,
}

pub struct Simulation {
    grid: Grid,
    rovers: Vec<Rover>,
    warnings: Vec<Warning>,
}

fn check_roster<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<(), SimError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(SimError::DuplicateRover(name.to_string()));
        }
    }
    Ok(())
}

impl Simulation {
    /// Create a map and scatter obstacles and rovers at random.
    pub fn setup<R: Rng + ?Sized>(
        width: i32,
        height: i32,
        obstacles: usize,
        roster: &[(String, Heading)],
        rng: &mut R,
    ) -> Result<Self, SimError> {
        let mut grid = Grid::new(width, height)?;
        check_roster(roster.iter().map(|(name, _)| name.as_str()))?;
        let mut rovers: Vec<Rover> = roster
            .iter()
            .map(|(name, heading)| Rover::new(name.clone(), *heading))
            .collect();
        placement::scatter(&mut grid, obstacles, &mut rovers, rng)?;
        log::info!(
            "[SETUP] map {width}x{height} obstacles={obstacles} rovers={}",
            rovers.len()
        );
        Ok(Self {
            grid,
            rovers,
            warnings: Vec::new(),
        })
    }

    /// Create a map with obstacles and rovers at fixed coordinates.
    pub fn with_layout(
        width: i32,
        height: i32,
        obstacles: &[Position],
        roster: &[(&str, Heading, Position)],
    ) -> Result<Self, SimError> {
        let mut grid = Grid::new(width, height)?;
        check_roster(roster.iter().map(|(name, _, _)| *name))?;
        let mut rovers: Vec<Rover> = roster
            .iter()
            .map(|(name, heading, _)| Rover::new(*name, *heading))
            .collect();
        let starts: Vec<Position> = roster.iter().map(|(_, _, start)| *start).collect();
        placement::place_fixed(&mut grid, obstacles, &mut rovers, &starts)?;
        Ok(Self {
            grid,
            rovers,
            warnings: Vec::new(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rovers(&self) -> &[Rover] {
        &self.rovers
    }

    pub fn rover(&self, name: &str) -> Option<&Rover> {
        self.rovers.iter().find(|rover| rover.name() == name)
    }

    /// All warnings recorded so far, oldest first.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    fn rover_id(&self, name: &str) -> Option<RoverId> {
        self.rovers.iter().position(|rover| rover.name() == name)
    }

    fn describe(&self, cell: Cell) -> String {
        match cell {
            Cell::Rover(id) => match self.rovers.get(id) {
                Some(rover) => format!("rover {}", rover.name()),
                None => cell.to_string(),
            },
            other => other.to_string(),
        }
    }

    /// Validate, interleave, and execute a batch of command requests.
    ///
    /// An invalid command string in any request rejects the whole batch:
    /// an `InvalidCommand` warning is recorded for each offender and no
    /// order runs. Unknown rover names are rejected the same way.
    pub fn run(&mut self, requests: &[CommandRequest]) -> Result<RunReport, SimError> {
        let invalid = scheduler::validate(requests);
        if !invalid.is_empty() {
            let rovers: Vec<String> = invalid.iter().map(|w| w.rover.clone()).collect();
            for warning in &invalid {
                log::warn!("[ORDERS] {}: {}", warning.rover, warning.message);
            }
            self.warnings.extend(invalid);
            return Err(SimError::InvalidCommand { rovers });
        }

        let mut parsed = Vec::with_capacity(requests.len());
        for request in requests {
            let rover = self
                .rover_id(&request.rover)
                .ok_or_else(|| SimError::UnknownRover(request.rover.clone()))?;
            parsed.push(ParsedRequest {
                rover,
                commands: scheduler::parse_commands(&request.commands),
            });
        }

        let mut queue = scheduler::interleave(&parsed);
        log::debug!("[ORDERS] {} order(s) scheduled", queue.len());
        let mut report = RunReport::default();
        while let Some(order) = queue.try_pop() {
            report.executed_orders += 1;
            match self.dispatch(order) {
                None => report.turns += 1,
                Some(true) => report.accepted_moves += 1,
                Some(false) => report.rejected_moves += 1,
            }
        }
        report.travel_logs = self.travel_logs();
        log::info!(
            "[ORDERS] done orders={} accepted={} rejected={}",
            report.executed_orders,
            report.accepted_moves,
            report.rejected_moves
        );
        Ok(report)
    }

    /// Apply one order. Returns `None` for turns, otherwise whether the
    /// move was accepted.
    fn dispatch(&mut self, order: Order) -> Option<bool> {
        let rover = &mut self.rovers[order.rover];
        let direction = match order.command {
            Command::TurnLeft => {
                rover.turn_left();
                log::debug!("[ORDER] {} turns left to {}", rover.name(), rover.heading());
                return None;
            }
            Command::TurnRight => {
                rover.turn_right();
                log::debug!("[ORDER] {} turns right to {}", rover.name(), rover.heading());
                return None;
            }
            Command::Forward => Direction::Forward,
            Command::Backward => Direction::Backward,
        };
        let destination = compute_destination(rover.position(), rover.heading(), direction);
        match attempt_move(&mut self.grid, order.rover, rover, destination) {
            Ok(position) => {
                log::debug!("[ORDER] {} moves to {position}", rover.name());
                Some(true)
            }
            Err(err) => {
                let name = rover.name().to_string();
                let warning = match err {
                    MoveError::OutOfBounds { destination } => Warning::new(
                        name,
                        WarningKind::OutOfBounds,
                        format!("move to {destination} leaves the map; skipped"),
                    ),
                    MoveError::Collision {
                        destination,
                        occupant,
                    } => Warning::new(
                        name,
                        WarningKind::Collision,
                        format!(
                            "move to {destination} blocked by {}; skipped",
                            self.describe(occupant)
                        ),
                    ),
                };
                log::debug!("[ORDER] {}: {}", warning.rover, warning.message);
                self.warnings.push(warning);
                Some(false)
            }
        }
    }

    pub fn travel_logs(&self) -> Vec<TravelLog> {
        self.rovers
            .iter()
            .map(|rover| TravelLog {
                rover: rover.name().to_string(),
                path: rover.history().to_vec(),
            })
            .collect()
    }

    /// Verify that every rover's cell matches its recorded position and
    /// that no rover appears on the grid twice.
    pub fn check_invariants(&self) -> bool {
        let rover_cells = self
            .grid
            .rows()
            .flatten()
            .filter(|cell| matches!(cell, Cell::Rover(_)))
            .count();
        rover_cells == self.rovers.len()
            && self.rovers.iter().enumerate().all(|(id, rover)| {
                rover.is_placed()
                    && self.grid.find_rover(id) == Some(rover.position())
                    && rover.history().last() == Some(&rover.position())
            })
    }
}
