//! Text rendering of the map, travel logs, and warnings.

use crate::grid::{Cell, Grid};
use crate::rover::{Heading, Rover};
use crate::simulation::TravelLog;
use crate::types::Warning;

fn heading_glyph(heading: Heading) -> char {
    match heading {
        Heading::North => '^',
        Heading::East => '>',
        Heading::South => 'v',
        Heading::West => '<',
    }
}

fn cell_glyph(cell: Cell, rovers: &[Rover]) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::Obstacle => '#',
        Cell::Rover(id) => rovers
            .get(id)
            .map_or('?', |rover| heading_glyph(rover.heading())),
    }
}

/// Paint the map one row per line, top row first.
pub fn paint(grid: &Grid, rovers: &[Rover]) -> String {
    let mut out = String::with_capacity(grid.capacity() * 2);
    for row in grid.rows() {
        let line: Vec<String> = row
            .iter()
            .map(|cell| cell_glyph(*cell, rovers).to_string())
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

/// `Alpha: (5,5) -> (5,4) -> (5,3)`
pub fn travel_log_line(log: &TravelLog) -> String {
    let path: Vec<String> = log.path.iter().map(ToString::to_string).collect();
    format!("{}: {}", log.rover, path.join(" -> "))
}

pub fn warning_line(warning: &Warning) -> String {
    format!("warning,{},{},{}", warning.kind, warning.rover, warning.message)
}
