//! Grid rover simulation: randomized map setup, heading-relative moves with
//! boundary and collision checks, and round-robin interleaving of several
//! rovers' command strings into one deterministic execution order.

pub mod config;
pub mod error;
pub mod grid;
pub mod logging;
pub mod movement;
pub mod placement;
pub mod render;
pub mod rover;
pub mod runner;
pub mod scheduler;
pub mod simulation;
pub mod types;

pub use config::{RoverSpec, SimConfig};
pub use error::SimError;
pub use grid::{Bounds, Cell, Grid};
pub use rover::{Heading, Rover};
pub use scheduler::{Command, CommandRequest, Order};
pub use simulation::{RunReport, Simulation, TravelLog};
pub use types::{Position, RoverId, Warning, WarningKind};
